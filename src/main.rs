use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
mod config;
mod error;
mod services;
mod utils;
mod window;

use config::Config;
use services::{create_window_backend, DesktopListing, ListingParser, Switcher, WmctrlParser};
use window::Outcome;

#[derive(Parser, Debug)]
#[command(name = "appswitch", version)]
#[command(about = "Run-or-raise: переключиться на окно приложения на текущем рабочем столе или запустить его")]
struct Args {
    /// Класс окна или фрагмент регулярного выражения (без учёта регистра)
    #[arg(required_unless_present = "list")]
    name: Option<String>,

    /// Команда запуска, если подходящего окна нет
    launch_command: Option<String>,

    /// Показать окна текущего рабочего стола вместо переключения
    #[arg(short, long)]
    list: bool,

    /// Подробный вывод (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Уровень логирования, перекрывает -v и конфигурацию
    #[arg(long)]
    log_level: Option<String>,

    /// Путь к файлу конфигурации
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Режим сухого запуска (без активации окон и запуска программ)
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn effective_log_level<'a>(&'a self, config: &'a Config) -> &'a str {
        if let Some(level) = self.log_level.as_deref() {
            return level;
        }

        match self.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    }

    /// Утилиты, без которых запуск заведомо не удастся
    fn required_tools(&self) -> Vec<&'static str> {
        let mut required = vec!["desktops"];
        if self.list || self.dry_run {
            return required;
        }

        required.push("activate");
        if self.launch_command.is_some() {
            required.push("launch_shell");
        }
        required
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Arc::new(Config::load(&config_path)?);

    // Инициализация системы логирования
    init_tracing(args.effective_log_level(&config), &config.logging.format)?;

    info!("Запуск appswitch v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {:?}", config_path);

    // Проверка утилит до первого запроса
    utils::check_tools(&config.tools, &args.required_tools(), &["windows", "active_window"])?;

    let parser: Arc<dyn ListingParser> = Arc::new(WmctrlParser::new());
    let backend = create_window_backend(config.clone(), parser.clone(), args.dry_run)?;

    run_app(&args, &Switcher::new(backend, parser)).await
}

/// Всё, что после сборки бэкенда; любая ошибка отсюда даёт ненулевой код выхода
async fn run_app(args: &Args, switcher: &Switcher) -> Result<()> {
    if args.list {
        let listing = switcher.list_current_desktop().await?;
        write_listing(&listing, &mut std::io::stdout().lock())?;
        return Ok(());
    }

    let Some(name) = args.name.as_deref() else {
        anyhow::bail!("Не указано имя окна");
    };

    match switcher.run(name, args.launch_command.as_deref()).await? {
        Outcome::NoMatchNoLaunch => warn!("{}", Outcome::NoMatchNoLaunch),
        outcome => info!("Готово: {}", outcome),
    }

    Ok(())
}

fn write_listing(listing: &DesktopListing, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Рабочий стол {}: окон {}",
        listing.desktop,
        listing.windows.len()
    )?;

    for window in &listing.windows {
        let marker = if Some(window.id) == listing.active { '*' } else { ' ' };
        writeln!(
            out,
            "{} {}  {:<28} {:<12} {}",
            marker, window.id, window.class, window.host, window.title
        )?;
    }

    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // stderr: stdout занят выводом --list
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "pretty" => registry.with(layer.pretty()).init(),
        _ => registry.with(layer.compact()).init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppSwitchError;
    use crate::services::backend::scripted::{Call, ScriptedBackend};
    use crate::window::{DesktopId, WindowId};
    use clap::CommandFactory;

    const DESKTOPS: &str = "0  * DG: 1920x1080  VP: 0,0  WA: 0,0 1920x1080  Web\n";
    const WINDOWS: &str = "0x02000001  0 Navigator.Firefox     laptop Mozilla Firefox\n";

    fn switcher(backend: ScriptedBackend) -> Switcher {
        Switcher::new(Box::new(backend), Arc::new(WmctrlParser::new()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_name_required_unless_list() {
        assert!(Args::try_parse_from(["appswitch"]).is_err());
        assert!(Args::try_parse_from(["appswitch", "--list"]).is_ok());

        let args = Args::try_parse_from(["appswitch", "firefox", "firefox --new-window"]).unwrap();
        assert_eq!(args.name.as_deref(), Some("firefox"));
        assert_eq!(args.launch_command.as_deref(), Some("firefox --new-window"));
    }

    #[test]
    fn test_log_level_precedence() {
        let config = Config::default();

        let args = Args::try_parse_from(["appswitch", "xterm"]).unwrap();
        assert_eq!(args.effective_log_level(&config), "warn");

        let args = Args::try_parse_from(["appswitch", "-vv", "xterm"]).unwrap();
        assert_eq!(args.effective_log_level(&config), "trace");

        let args = Args::try_parse_from(["appswitch", "-v", "--log-level", "error", "xterm"]).unwrap();
        assert_eq!(args.effective_log_level(&config), "error");
    }

    #[test]
    fn test_required_tools() {
        let args = Args::try_parse_from(["appswitch", "xterm"]).unwrap();
        assert_eq!(args.required_tools(), vec!["desktops", "activate"]);

        let args = Args::try_parse_from(["appswitch", "xterm", "xterm -e htop"]).unwrap();
        assert_eq!(args.required_tools(), vec!["desktops", "activate", "launch_shell"]);

        let args = Args::try_parse_from(["appswitch", "--dry-run", "xterm", "xterm"]).unwrap();
        assert_eq!(args.required_tools(), vec!["desktops"]);

        let args = Args::try_parse_from(["appswitch", "--list"]).unwrap();
        assert_eq!(args.required_tools(), vec!["desktops"]);
    }

    #[tokio::test]
    async fn test_activation_failure_reaches_main() {
        let mut backend = ScriptedBackend::new(DESKTOPS, WINDOWS).with_active("0x02000001");
        backend.activation_fails = true;
        let args = Args::try_parse_from(["appswitch", "firefox"]).unwrap();

        let err = run_app(&args, &switcher(backend)).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppSwitchError>(),
            Some(AppSwitchError::ActivationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_match_without_launch_exits_cleanly() {
        let backend = ScriptedBackend::new(DESKTOPS, WINDOWS);
        let calls = backend.calls();
        let args = Args::try_parse_from(["appswitch", "slack"]).unwrap();

        run_app(&args, &switcher(backend)).await.unwrap();

        assert_eq!(*calls.lock(), vec![Call::Desktops, Call::Windows]);
    }

    #[test]
    fn test_listing_header_names_desktop() {
        let listing = DesktopListing {
            desktop: DesktopId::new(0),
            windows: WmctrlParser::new().parse_window_listing(WINDOWS),
            active: WindowId::parse("0x02000001"),
        };
        let mut out = Vec::new();

        write_listing(&listing, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Рабочий стол 0: окон 1"));
        assert!(lines.next().unwrap().starts_with("* 0x02000001  Navigator.Firefox"));
        assert_eq!(lines.next(), None);
    }
}
