use crate::appswitch_error;
use crate::config::{Config, ToolsConfig};
use crate::error::{AppSwitchError, Result};
use crate::services::listing_parser::ListingParser;
use crate::trace_if_enabled;
use crate::window::WindowId;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info};

use super::r#trait::WindowBackend;

/// Бэкенд поверх внешних утилит (по умолчанию wmctrl и xprop)
pub struct CommandBackend {
    config: Arc<Config>,
    parser: Arc<dyn ListingParser>,
}

impl CommandBackend {
    pub fn new(config: Arc<Config>, parser: Arc<dyn ListingParser>) -> Self {
        Self { config, parser }
    }

    fn tools(&self) -> &ToolsConfig {
        &self.config.tools
    }

    fn create_command(argv: &[String], extra: Option<&str>) -> std::result::Result<Command, String> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| "пустая команда".to_string())?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(extra) = extra {
            cmd.arg(extra);
        }
        cmd.stdin(Stdio::null());
        Ok(cmd)
    }

    /// Запустить команду, дождаться завершения и вернуть stdout
    async fn run_capture(argv: &[String], extra: Option<&str>) -> std::result::Result<String, String> {
        let program = argv.first().map(String::as_str).unwrap_or("");
        debug!("Запуск {:?} {:?}", argv, extra);

        let output = Self::create_command(argv, extra)?
            .output()
            .await
            .map_err(|e| format!("{} не запустился: {}", program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{} завершился с {}: {}", program, output.status, stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace_if_enabled!("Вывод {}:\n{}", program, stdout);
        Ok(stdout)
    }
}

#[async_trait::async_trait]
impl WindowBackend for CommandBackend {
    async fn query_desktops(&self) -> Result<String> {
        Self::run_capture(&self.tools().desktops, None)
            .await
            .map_err(|e| appswitch_error!(desktop_query, "{}", e))
    }

    async fn query_windows(&self) -> Result<String> {
        Self::run_capture(&self.tools().windows, None)
            .await
            .map_err(|e| appswitch_error!(window_query, "{}", e))
    }

    async fn query_active_window(&self) -> Result<WindowId> {
        let raw = Self::run_capture(&self.tools().active_window, None)
            .await
            .map_err(|e| appswitch_error!(active_window, "{}", e))?;

        self.parser.parse_active_window(&raw)
    }

    async fn activate_window(&self, window: WindowId) -> Result<()> {
        let id = window.to_string();
        info!("Активируем окно {}", id);

        Self::run_capture(&self.tools().activate, Some(&id))
            .await
            .map(|_| ())
            .map_err(|reason| AppSwitchError::ActivationFailed {
                window: window.to_string(),
                reason,
            })
    }

    async fn launch_process(&self, command: &str) -> Result<()> {
        info!("Запускаем: {}", command);

        let launch_failed = |reason: String| AppSwitchError::LaunchFailed {
            command: command.to_string(),
            reason,
        };

        let mut cmd = Self::create_command(&self.tools().launch_shell, Some(command))
            .map_err(launch_failed)?;
        let child = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| launch_failed(e.to_string()))?;

        debug!("Процесс запущен, pid {:?}; завершения не ждём", child.id());
        // Child без kill_on_drop продолжает работать после drop
        drop(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::listing_parser::WmctrlParser;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn backend(configure: impl FnOnce(&mut ToolsConfig)) -> CommandBackend {
        let mut config = Config::default();
        configure(&mut config.tools);
        CommandBackend::new(Arc::new(config), Arc::new(WmctrlParser::new()))
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let backend = backend(|tools| {
            tools.desktops = argv(&["sh", "-c", "printf '0  * DG: 800x600  Desktop 1\\n'"]);
        });

        let raw = backend.query_desktops().await.unwrap();
        assert_eq!(raw, "0  * DG: 800x600  Desktop 1\n");
    }

    #[tokio::test]
    async fn test_failures_map_to_query_errors() {
        let backend = backend(|tools| {
            tools.desktops = argv(&["appswitch-test-missing-tool"]);
            tools.windows = argv(&["sh", "-c", "echo boom >&2; exit 3"]);
        });

        assert!(matches!(
            backend.query_desktops().await,
            Err(AppSwitchError::DesktopQueryFailed(_))
        ));
        match backend.query_windows().await {
            Err(AppSwitchError::WindowQueryFailed(reason)) => assert!(reason.contains("boom")),
            other => panic!("ожидали WindowQueryFailed, получили {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_active_window_goes_through_parser() {
        let backend = backend(|tools| {
            tools.active_window = argv(&["sh", "-c", "printf '_NET_ACTIVE_WINDOW\\t0x3a00007\\n'"]);
        });

        assert_eq!(
            backend.query_active_window().await.unwrap(),
            WindowId::new(0x03a00007)
        );
    }

    #[tokio::test]
    async fn test_activation_receives_id_and_reports_failure() {
        let ok = backend(|tools| {
            tools.activate = argv(&["sh", "-c", "test \"$0\" = 0x02000002"]);
        });
        assert!(ok.activate_window(WindowId::new(0x02000002)).await.is_ok());

        let failing = backend(|tools| tools.activate = argv(&["false"]));
        assert!(matches!(
            failing.activate_window(WindowId::new(1)).await,
            Err(AppSwitchError::ActivationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_launch_is_fire_and_forget() {
        let launcher = backend(|_| {});
        // Процесс живёт дольше теста, вызов не должен его ждать
        assert!(launcher.launch_process("sleep 5").await.is_ok());

        let broken = backend(|tools| {
            tools.launch_shell = argv(&["appswitch-test-missing-shell", "-c"]);
        });
        assert!(matches!(
            broken.launch_process("slack").await,
            Err(AppSwitchError::LaunchFailed { .. })
        ));
    }
}
