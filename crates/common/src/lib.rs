//! Shared pieces used by every crate in the workspace: logging setup and
//! small wire types.

pub mod types;
pub mod utils;
