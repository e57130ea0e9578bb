use models::ToolResult;

/// Sentinel returned by every mutating tool while writes are off. Callers
/// match on this exact string.
pub const WRITES_DISABLED_ERROR: &str = "Writes disabled (set ALLOW_WRITES=true)";

/// Process-wide write switch, fixed when configuration is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteGuard {
    allow_writes: bool,
}

impl WriteGuard {
    pub fn new(allow_writes: bool) -> Self {
        Self { allow_writes }
    }

    pub fn from_config(cfg: &configs::WhopConfig) -> Self {
        Self::new(cfg.allow_writes)
    }

    pub fn allows_writes(&self) -> bool {
        self.allow_writes
    }

    /// `Some(failure)` when the caller must stop before touching the network.
    pub fn deny<T>(&self) -> Option<ToolResult<T>> {
        if self.allow_writes {
            None
        } else {
            Some(ToolResult::failure(WRITES_DISABLED_ERROR))
        }
    }
}
