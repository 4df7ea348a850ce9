use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Внешние команды. Каждая задаётся как argv: первая строка программа, остальные аргументы.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Список рабочих столов, строка активного стола помечена `*`
    pub desktops: Vec<String>,
    /// Список окон: id, стол, класс, хост, заголовок
    pub windows: Vec<String>,
    /// Идентификатор окна в фокусе
    pub active_window: Vec<String>,
    /// Активация окна, идентификатор дописывается последним аргументом
    pub activate: Vec<String>,
    /// Оболочка для команды запуска, команда дописывается последним аргументом
    pub launch_shell: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "compact".to_string(),
            },
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        fn argv(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|p| p.to_string()).collect()
        }

        Self {
            desktops: argv(&["wmctrl", "-d"]),
            windows: argv(&["wmctrl", "-l", "-x"]),
            active_window: argv(&["xprop", "-root", "32x", "\t$0", "_NET_ACTIVE_WINDOW"]),
            activate: argv(&["wmctrl", "-i", "-a"]),
            launch_shell: argv(&["sh", "-c"]),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/appswitch/config.toml`, иначе `~/.config/appswitch/config.toml`
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("appswitch").join("config.toml")
    }

    /// Загрузка: значения по умолчанию <- TOML файл (если есть) <- переменные `APPSWITCH_*`
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("APPSWITCH_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "pretty" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        for (name, argv) in self.tools.commands() {
            match argv.first() {
                Some(program) if !program.trim().is_empty() => {}
                _ => anyhow::bail!("Пустая команда в tools.{}", name),
            }
        }

        Ok(())
    }
}

impl ToolsConfig {
    /// Все команды с именами ключей конфигурации
    pub fn commands(&self) -> [(&'static str, &[String]); 5] {
        [
            ("desktops", self.desktops.as_slice()),
            ("windows", self.windows.as_slice()),
            ("active_window", self.active_window.as_slice()),
            ("activate", self.activate.as_slice()),
            ("launch_shell", self.launch_shell.as_slice()),
        ]
    }
}
