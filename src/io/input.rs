//! Input provider trait definition.

use std::fmt::Debug;
use std::io::Read;

/// A flat-file source the parser opens, reads line by line and closes.
///
/// The parser calls `open` once per parse (again after a reset) and pushes
/// the stream onto its close list; it is dropped when the parse ends,
/// whether it succeeded or not. Bytes are split on `\n` and decoded as
/// UTF-8 by the parser, so implementors hand over the raw content.
pub trait InputProvider: Send + Sync + Debug {
    /// Name of the source in `FlatpackError::Io` and in log events.
    /// `"-"` for stdin, the path for files.
    fn id(&self) -> &str;

    /// A fresh stream positioned at the first line. A failure here aborts
    /// the parse at `Stage::Open`.
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}
