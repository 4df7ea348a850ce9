use crate::error::{AppSwitchError, Result};
use crate::services::backend::WindowBackend;
use crate::services::cycle_selector::select_target;
use crate::services::listing_parser::ListingParser;
use crate::services::window_matcher::{find_candidates, WindowPattern};
use crate::window::{DesktopId, Outcome, WindowId, WindowRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Окна текущего рабочего стола для `--list`
#[derive(Debug, Clone)]
pub struct DesktopListing {
    pub desktop: DesktopId,
    pub windows: Vec<WindowRecord>,
    pub active: Option<WindowId>,
}

/// Run-or-raise: активировать подходящее окно на текущем столе или запустить приложение.
///
/// Каждый вызов начинается с чистого листа: столы, окна и активное окно
/// запрашиваются заново, между запусками ничего не хранится.
pub struct Switcher {
    backend: Box<dyn WindowBackend>,
    parser: Arc<dyn ListingParser>,
}

impl Switcher {
    pub fn new(backend: Box<dyn WindowBackend>, parser: Arc<dyn ListingParser>) -> Self {
        Self { backend, parser }
    }

    pub async fn run(&self, pattern: &str, launch_command: Option<&str>) -> Result<Outcome> {
        let pattern = WindowPattern::new(pattern)?;
        let desktop = self.active_desktop().await?;
        let windows = self.windows().await;

        let candidates = find_candidates(&windows, desktop, &pattern);

        // Активное окно нужно только чтобы выбрать между несколькими кандидатами
        let active = if candidates.len() > 1 {
            self.active_window().await
        } else {
            None
        };

        let Some(target) = select_target(&candidates, active) else {
            return self.launch_or_idle(&pattern, desktop, launch_command).await;
        };

        debug!("Выбрано окно {}", target);
        self.backend.activate_window(target.id).await?;
        Ok(Outcome::Activated(target.id))
    }

    async fn launch_or_idle(
        &self,
        pattern: &WindowPattern,
        desktop: DesktopId,
        launch_command: Option<&str>,
    ) -> Result<Outcome> {
        match launch_command.map(str::trim).filter(|c| !c.is_empty()) {
            Some(command) => {
                info!("Окно '{}' не найдено на столе {}, запускаем", pattern.as_str(), desktop);
                self.backend.launch_process(command).await?;
                Ok(Outcome::Launched(command.to_string()))
            }
            None => {
                info!("Окно '{}' не найдено на столе {}", pattern.as_str(), desktop);
                Ok(Outcome::NoMatchNoLaunch)
            }
        }
    }

    pub async fn list_current_desktop(&self) -> Result<DesktopListing> {
        let desktop = self.active_desktop().await?;
        let windows = self
            .windows()
            .await
            .into_iter()
            .filter(|window| window.desktop == desktop)
            .collect();
        let active = self.active_window().await;

        Ok(DesktopListing {
            desktop,
            windows,
            active,
        })
    }

    async fn active_desktop(&self) -> Result<DesktopId> {
        let raw = self.backend.query_desktops().await.map_err(|e| match e {
            AppSwitchError::DesktopQueryFailed(_) => e,
            other => AppSwitchError::DesktopQueryFailed(other.to_string()),
        })?;

        self.parser.parse_active_desktop(&raw)
    }

    /// Ошибка запроса списка окон не фатальна: считаем, что окон нет
    async fn windows(&self) -> Vec<WindowRecord> {
        match self.backend.query_windows().await {
            Ok(raw) => self.parser.parse_window_listing(&raw),
            Err(e) => {
                warn!("{}; считаем, что окон нет", e);
                Vec::new()
            }
        }
    }

    /// Ошибка определения активного окна не фатальна: выбор падает на первого кандидата
    async fn active_window(&self) -> Option<WindowId> {
        match self.backend.query_active_window().await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}
