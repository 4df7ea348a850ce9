use std::fmt;

/// Идентификатор окна, нормализованный до числа.
///
/// wmctrl печатает `0x02000001`, xprop печатает `0x2000001`, xdotool печатает
/// десятичное `33554433`. Все три формы дают одно и то же значение, поэтому
/// идентификаторы сравниваются только как числа.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    #[cfg(test)]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Разобрать идентификатор: `0x`-префикс означает hex любой ширины, иначе десятичное число.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u64::from_str_radix(hex, 16).ok()?
            }
            Some(_) => return None,
            None if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                raw.parse().ok()?
            }
            None => return None,
        };
        Some(Self(value))
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Формат wmctrl, его же принимает `wmctrl -i -a`
        write!(f, "0x{:08x}", self.0)
    }
}

/// Номер виртуального рабочего стола. `-1` у wmctrl означает "на всех столах".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DesktopId(i64);

impl DesktopId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DesktopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Одна строка списка окон
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub desktop: DesktopId,
    pub class: String,
    pub host: String,
    pub title: String,
}

impl WindowRecord {
    pub fn new(id: WindowId, desktop: DesktopId, class: impl Into<String>) -> Self {
        Self {
            id,
            desktop,
            class: class.into(),
            host: String::new(),
            title: String::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl fmt::Display for WindowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{} [{}] {}", self.id, self.desktop, self.class)
        } else {
            write!(f, "{} [{}] {} \"{}\"", self.id, self.desktop, self.class, self.title)
        }
    }
}

/// Итог одного запуска
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Окно найдено и активировано
    Activated(WindowId),
    /// Подходящих окон нет, запущена команда
    Launched(String),
    /// Подходящих окон нет и команда запуска не задана
    NoMatchNoLaunch,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Activated(id) => write!(f, "активировано окно {}", id),
            Outcome::Launched(command) => write!(f, "запущено: {}", command),
            Outcome::NoMatchNoLaunch => write!(f, "подходящих окон нет, команда запуска не задана"),
        }
    }
}
