use std::sync::Arc;

use service::WhopAdmin;

/// Shared router state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub admin: Arc<WhopAdmin>,
    /// Expose `/dev/tools`
    pub dev_tools: bool,
}

impl AppState {
    pub fn new(admin: WhopAdmin, dev_tools: bool) -> Self {
        Self { admin: Arc::new(admin), dev_tools }
    }

    pub fn from_config(cfg: &configs::AppConfig) -> Self {
        Self::new(WhopAdmin::from_config(&cfg.whop), cfg.server.dev_tools)
    }
}
