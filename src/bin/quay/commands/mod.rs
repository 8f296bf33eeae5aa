//! Command implementations

pub mod add;
pub mod completions;
pub mod init;
pub mod list;
pub mod remove;
pub mod update;
