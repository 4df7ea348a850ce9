use crate::error::Result;
use crate::window::WindowId;
use tracing::{info, warn};

use super::r#trait::WindowBackend;

/// Запросы уходят в настоящий бэкенд, активация и запуск только логируются
pub struct DryRunBackend {
    inner: Box<dyn WindowBackend>,
}

impl DryRunBackend {
    pub fn new(inner: Box<dyn WindowBackend>) -> Self {
        warn!("Режим сухого запуска - окна не активируются, программы не запускаются");
        Self { inner }
    }
}

#[async_trait::async_trait]
impl WindowBackend for DryRunBackend {
    async fn query_desktops(&self) -> Result<String> {
        self.inner.query_desktops().await
    }

    async fn query_windows(&self) -> Result<String> {
        self.inner.query_windows().await
    }

    async fn query_active_window(&self) -> Result<WindowId> {
        self.inner.query_active_window().await
    }

    async fn activate_window(&self, window: WindowId) -> Result<()> {
        info!("[DRY RUN] Активация окна {}", window);
        Ok(())
    }

    async fn launch_process(&self, command: &str) -> Result<()> {
        info!("[DRY RUN] Запуск: {}", command);
        Ok(())
    }
}
