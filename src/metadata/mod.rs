//! Column metadata registry.
//!
//! `MetaData` owns the ordered column sequence and the name→index map
//! derived from it. Both are always rebuilt together.

use std::collections::HashMap;

use crate::error::{FlatpackError, LookupError};

mod column;

pub use column::{ColumnDef, ColumnMetaData};

/// How column names are normalized and how collisions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameRules {
    /// Match names exactly instead of case-insensitively
    pub case_sensitive: bool,
    /// Rename colliding names `NAME_2`, `NAME_3`, ... instead of failing
    pub add_suffix: bool,
}

impl NameRules {
    pub fn new(case_sensitive: bool, add_suffix: bool) -> Self {
        Self {
            case_sensitive,
            add_suffix,
        }
    }

    /// Lookup key for `name` under these rules.
    pub fn normalize(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }
}

/// Ordered column definitions plus a normalized name index.
#[derive(Debug, Clone, Default)]
pub struct MetaData {
    columns: Vec<ColumnMetaData>,
    index: HashMap<String, usize>,
    rules: NameRules,
}

impl MetaData {
    /// Register a column sequence.
    ///
    /// Fails with [`FlatpackError::DuplicateColumn`] if two names collide
    /// and suffixing is disabled.
    pub fn new<I, C>(defs: I, rules: NameRules) -> Result<Self, FlatpackError>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnDef>,
    {
        let defs: Vec<ColumnDef> = defs.into_iter().map(Into::into).collect();
        let (columns, index) = build(&defs, rules)?;
        Ok(Self {
            columns,
            index,
            rules,
        })
    }

    /// Replace the column sequence.
    ///
    /// On failure the registry is left exactly as it was.
    pub fn replace<I, C>(&mut self, defs: I) -> Result<(), FlatpackError>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnDef>,
    {
        let defs: Vec<ColumnDef> = defs.into_iter().map(Into::into).collect();
        let (columns, index) = build(&defs, self.rules)?;
        self.columns = columns;
        self.index = index;
        Ok(())
    }

    /// Resolve a column name to its index.
    pub fn index_of(&self, name: &str) -> Result<usize, LookupError> {
        self.index
            .get(&self.rules.normalize(name))
            .copied()
            .ok_or_else(|| LookupError::ColumnNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&self.rules.normalize(name))
    }

    pub fn column(&self, index: usize) -> Option<&ColumnMetaData> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[ColumnMetaData] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn rules(&self) -> NameRules {
        self.rules
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.rules.case_sensitive
    }

    /// Sum of declared widths. Columns without a width count as zero; the
    /// sum saturates at `usize::MAX`.
    pub fn total_width(&self) -> usize {
        self.columns
            .iter()
            .filter_map(|c| c.width)
            .fold(0, usize::saturating_add)
    }
}

fn build(
    defs: &[ColumnDef],
    rules: NameRules,
) -> Result<(Vec<ColumnMetaData>, HashMap<String, usize>), FlatpackError> {
    let mut columns = Vec::with_capacity(defs.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(defs.len());

    for (pos, def) in defs.iter().enumerate() {
        let mut name = def.name.clone();
        let mut key = rules.normalize(&name);

        if let Some(&first) = index.get(&key) {
            if !rules.add_suffix {
                return Err(FlatpackError::DuplicateColumn {
                    name: def.name.clone(),
                    first,
                    second: pos,
                });
            }
            let mut n = 2usize;
            loop {
                let candidate = format!("{}_{}", def.name, n);
                let candidate_key = rules.normalize(&candidate);
                if !index.contains_key(&candidate_key) {
                    name = candidate;
                    key = candidate_key;
                    break;
                }
                n += 1;
            }
        }

        index.insert(key.clone(), pos);
        columns.push(ColumnMetaData {
            name,
            index: pos,
            width: def.width,
            format: def.format.clone(),
            key,
        });
    }

    Ok((columns, index))
}
