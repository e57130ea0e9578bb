//! Service layer for the Whop admin tools.
//! - `whop`: upstream transports (REST writes, catalog reads).
//! - `admin`: the eight tool operations, gated by `WriteGuard`.
//! - `dispatch`: routes a validated `ToolRequest` to its operation.
//! - `groq`: language-model client used by assistant features.

pub mod errors;
pub mod whop;
pub mod write_guard;
pub mod admin;
pub mod dispatch;
pub mod groq;
#[cfg(test)]
pub mod test_support;

pub use admin::WhopAdmin;
pub use dispatch::dispatch;
pub use write_guard::{WriteGuard, WRITES_DISABLED_ERROR};
