//! In-memory backend for tests: canned tool output and a log of every call.

use crate::error::{AppSwitchError, Result};
use crate::window::WindowId;
use parking_lot::Mutex;
use std::sync::Arc;

use super::r#trait::WindowBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Desktops,
    Windows,
    ActiveWindow,
    Activate(WindowId),
    Launch(String),
}

/// `None` in a query field makes that query fail.
#[derive(Default)]
pub struct ScriptedBackend {
    pub desktops: Option<String>,
    pub windows: Option<String>,
    pub active: Option<WindowId>,
    pub activation_fails: bool,
    pub launch_fails: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedBackend {
    pub fn new(desktops: &str, windows: &str) -> Self {
        Self {
            desktops: Some(desktops.to_string()),
            windows: Some(windows.to_string()),
            ..Self::default()
        }
    }

    pub fn with_active(mut self, raw: &str) -> Self {
        self.active = WindowId::parse(raw);
        self
    }

    /// Shared handle to the call log, stays valid after the backend is boxed
    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        self.calls.clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait::async_trait]
impl WindowBackend for ScriptedBackend {
    async fn query_desktops(&self) -> Result<String> {
        self.record(Call::Desktops);
        self.desktops
            .clone()
            .ok_or_else(|| AppSwitchError::DesktopQueryFailed("wmctrl: cannot open display".into()))
    }

    async fn query_windows(&self) -> Result<String> {
        self.record(Call::Windows);
        self.windows
            .clone()
            .ok_or_else(|| AppSwitchError::WindowQueryFailed("wmctrl: cannot open display".into()))
    }

    async fn query_active_window(&self) -> Result<WindowId> {
        self.record(Call::ActiveWindow);
        self.active
            .ok_or_else(|| AppSwitchError::ActiveWindowQueryFailed("xprop: no focus".into()))
    }

    async fn activate_window(&self, window: WindowId) -> Result<()> {
        self.record(Call::Activate(window));
        if self.activation_fails {
            return Err(AppSwitchError::ActivationFailed {
                window: window.to_string(),
                reason: "wmctrl завершился с exit status: 1".into(),
            });
        }
        Ok(())
    }

    async fn launch_process(&self, command: &str) -> Result<()> {
        self.record(Call::Launch(command.to_string()));
        if self.launch_fails {
            return Err(AppSwitchError::LaunchFailed {
                command: command.to_string(),
                reason: "No such file or directory".into(),
            });
        }
        Ok(())
    }
}
