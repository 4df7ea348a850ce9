use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppSwitchError {
    #[error("Утилита недоступна: {0}")]
    CollaboratorUnavailable(String),

    #[error("Не удалось получить список рабочих столов: {0}")]
    DesktopQueryFailed(String),

    #[error("Активный рабочий стол не найден в выводе")]
    NoActiveDesktopFound,

    #[error("Некорректный шаблон имени окна: {0}")]
    InvalidPattern(String),

    #[error("Не удалось получить список окон: {0}")]
    WindowQueryFailed(String),

    #[error("Не удалось определить активное окно: {0}")]
    ActiveWindowQueryFailed(String),

    #[error("Не удалось активировать окно {window}: {reason}")]
    ActivationFailed { window: String, reason: String },

    #[error("Не удалось запустить '{command}': {reason}")]
    LaunchFailed { command: String, reason: String },
}

impl AppSwitchError {
    pub fn collaborator_unavailable<T>(msg: impl Into<String>) -> Result<T> {
        Err(AppSwitchError::CollaboratorUnavailable(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, AppSwitchError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! appswitch_error {
    (desktop_query, $($arg:tt)*) => {
        $crate::error::AppSwitchError::DesktopQueryFailed(format!($($arg)*))
    };
    (window_query, $($arg:tt)*) => {
        $crate::error::AppSwitchError::WindowQueryFailed(format!($($arg)*))
    };
    (active_window, $($arg:tt)*) => {
        $crate::error::AppSwitchError::ActiveWindowQueryFailed(format!($($arg)*))
    };
}
