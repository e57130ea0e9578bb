pub mod errors;
pub mod observability;
pub mod routes;
pub mod startup;
pub mod state;

pub use routes::build_router;
pub use startup::{build_app, run};
pub use state::AppState;
