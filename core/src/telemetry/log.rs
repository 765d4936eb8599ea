use log::{info, warn};

/// Thin logging facade for fetch and fallback events.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Every silent demo-data substitution goes through here so real
    /// failures stay visible in the logs even when the UI hides them.
    pub fn record_fallback(&self, panel: &str, reason: &str) {
        warn!("{panel}: falling back to demo data ({reason})");
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
