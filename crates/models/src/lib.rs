//! Request schema for the Whop admin tools.
//! - `ToolRequest` is the validated envelope, one variant per tool.
//! - Inputs serialize directly into the upstream snake_case payloads.
//! - `ToolResult` is the `{ok, data | error}` contract every tool returns.

pub mod connection;
pub mod errors;
pub mod plan;
pub mod product;
pub mod schema;
pub mod tool_request;
pub mod tool_result;

pub use connection::normalize_connection;
pub use errors::{Issue, Issues, ValidationError};
pub use plan::{PlanCreateInput, PlanInterval, PlanUpdateInput};
pub use product::{ProductCreateInput, ProductUpdateInput, ProductVisibility};
pub use tool_request::{ToolKind, ToolRequest};
pub use tool_result::{DeletedRef, ToolResult};
