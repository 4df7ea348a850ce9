use crate::config::ToolsConfig;
use crate::error::{AppSwitchError, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Проверить, что внешние утилиты доступны, до первого запроса к ним.
///
/// `required` и `optional` это ключи секции `tools`. Отсутствие обязательной
/// утилиты фатально, необязательной только предупреждение.
pub fn check_tools(tools: &ToolsConfig, required: &[&str], optional: &[&str]) -> Result<()> {
    debug!("Проверка внешних утилит...");

    for (name, argv) in tools.commands() {
        let is_required = required.contains(&name);
        if !is_required && !optional.contains(&name) {
            continue;
        }

        let Some(program) = argv.first() else {
            continue;
        };

        match find_program(program) {
            Some(path) => debug!("tools.{}: {} -> {:?}", name, program, path),
            None if is_required => {
                return AppSwitchError::collaborator_unavailable(format!(
                    "{} (tools.{}) не найден в PATH",
                    program, name
                ));
            }
            None => warn!("{} (tools.{}) не найден в PATH, продолжаем без него", program, name),
        }
    }

    info!("Внешние утилиты доступны");
    Ok(())
}

/// Найти исполняемый файл: путь с `/` проверяется как есть, иначе ищем в `PATH`
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
