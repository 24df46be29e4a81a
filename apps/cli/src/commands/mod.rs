//! Command implementations for the Filemap CLI.

pub mod dump;
pub mod get;
pub mod timediff;
