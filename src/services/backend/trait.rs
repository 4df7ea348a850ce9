use crate::config::Config;
use crate::error::Result;
use crate::services::listing_parser::ListingParser;
use crate::window::WindowId;
use std::sync::Arc;

/// Trait for the window manager collaborators, one method per external command
#[async_trait::async_trait]
pub trait WindowBackend: Send + Sync {
    /// Raw desktop listing with one active-marked line
    async fn query_desktops(&self) -> Result<String>;

    /// Raw window listing, one window per line
    async fn query_windows(&self) -> Result<String>;

    /// Id of the currently focused window
    async fn query_active_window(&self) -> Result<WindowId>;

    /// Ask the window manager to focus `window`
    async fn activate_window(&self, window: WindowId) -> Result<()>;

    /// Start `command` without waiting for it; only a failure to start is reported
    async fn launch_process(&self, command: &str) -> Result<()>;
}

/// Factory function to create an appropriate backend based on the dry_run flag
pub fn create_window_backend(
    config: Arc<Config>,
    parser: Arc<dyn ListingParser>,
    dry_run: bool,
) -> Result<Box<dyn WindowBackend>> {
    let backend = super::command::CommandBackend::new(config, parser);

    if dry_run {
        Ok(Box::new(super::dry_run::DryRunBackend::new(Box::new(backend))))
    } else {
        Ok(Box::new(backend))
    }
}
