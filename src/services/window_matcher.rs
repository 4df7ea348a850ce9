use crate::error::{AppSwitchError, Result};
use crate::window::{DesktopId, WindowRecord};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Шаблон имени приложения, сравнивается с классом окна без учёта регистра.
///
/// Шаблон может быть фрагментом регулярного выражения (`fire`, `^xterm`, `code|codium`).
/// Если выражение некорректно, ищем его как обычную подстроку.
#[derive(Debug, Clone)]
pub struct WindowPattern {
    source: String,
    regex: Regex,
}

impl WindowPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(e) => {
                debug!("Шаблон '{}' не является регулярным выражением ({}), ищем подстроку", pattern, e);
                RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| AppSwitchError::InvalidPattern(format!("{}: {}", pattern, e)))?
            }
        };

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, window: &WindowRecord) -> bool {
        self.regex.is_match(&window.class)
    }
}

/// Окна с рабочего стола `desktop`, класс которых подходит под `pattern`, в исходном порядке
pub fn find_candidates(
    windows: &[WindowRecord],
    desktop: DesktopId,
    pattern: &WindowPattern,
) -> Vec<WindowRecord> {
    let candidates: Vec<WindowRecord> = windows
        .iter()
        .filter(|window| window.desktop == desktop && pattern.matches(window))
        .cloned()
        .collect();

    debug!(
        "Кандидатов для '{}' на столе {}: {}",
        pattern.as_str(),
        desktop,
        candidates.len()
    );

    candidates
}
