use crate::appswitch_error;
use crate::debug_if_enabled;
use crate::error::{AppSwitchError, Result};
use crate::window::{DesktopId, WindowId, WindowRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::r#trait::ListingParser;

// `0  * DG: 1920x1080  VP: 0,0  WA: 0,0 1920x1080  Desktop 1`
static ACTIVE_DESKTOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*\*").expect("static regex must compile"));

// `0x02000001  1 firefox.Firefox  laptop Mozilla Firefox`
static WINDOW_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(0[xX][0-9a-fA-F]+)\s+(-?\d+)\s+(\S+)\s+(\S+)(?:\s+(.*))?$")
        .expect("static regex must compile")
});

// xprop: `_NET_ACTIVE_WINDOW(WINDOW): window id # 0x3a00007` или `_NET_ACTIVE_WINDOW\t0x3a00007`
static HEX_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0[xX][0-9a-fA-F]+").expect("static regex must compile"));

// xdotool getactivewindow: `60817415`
static DECIMAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("static regex must compile"));

/// Парсер вывода wmctrl (столы и окна) и xprop/xdotool (активное окно)
#[derive(Debug, Default, Clone, Copy)]
pub struct WmctrlParser;

impl WmctrlParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_window_line(line: &str) -> Option<WindowRecord> {
        let caps = WINDOW_LINE.captures(line)?;

        let id = WindowId::parse(&caps[1])?;
        let desktop = DesktopId::new(caps[2].parse().ok()?);
        let title = caps.get(5).map(|m| m.as_str().trim_end()).unwrap_or("");

        Some(
            WindowRecord::new(id, desktop, &caps[3])
                .with_host(&caps[4])
                .with_title(title),
        )
    }
}

impl ListingParser for WmctrlParser {
    fn parse_active_desktop(&self, raw: &str) -> Result<DesktopId> {
        let mut active = raw.lines().filter_map(|line| {
            let caps = ACTIVE_DESKTOP.captures(line)?;
            caps[1].parse::<i64>().ok().map(DesktopId::new)
        });

        let desktop = active.next().ok_or(AppSwitchError::NoActiveDesktopFound)?;

        let extra = active.count();
        if extra > 0 {
            warn!(
                "В списке столов помечено активными {} строк, используем первый: {}",
                extra + 1,
                desktop
            );
        }

        debug!("Активный рабочий стол: {}", desktop);
        Ok(desktop)
    }

    fn parse_window_listing(&self, raw: &str) -> Vec<WindowRecord> {
        let mut windows = Vec::new();

        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }

            match Self::parse_window_line(line) {
                Some(record) => windows.push(record),
                None => debug_if_enabled!("Пропускаем строку списка окон: {:?}", line),
            }
        }

        debug!("Разобрано окон: {}", windows.len());
        windows
    }

    fn parse_active_window(&self, raw: &str) -> Result<WindowId> {
        let mut tokens: Vec<&str> = HEX_ID.find_iter(raw).map(|m| m.as_str()).collect();
        if tokens.is_empty() {
            tokens.extend(DECIMAL_ID.captures(raw).and_then(|c| c.get(1)).map(|m| m.as_str()));
        }
        if tokens.is_empty() {
            return Err(appswitch_error!(active_window, "идентификатор не найден в {:?}", raw.trim()));
        }

        let ids = tokens
            .iter()
            .map(|token| {
                WindowId::parse(token)
                    .ok_or_else(|| appswitch_error!(active_window, "некорректный идентификатор {:?}", token))
            })
            .collect::<Result<Vec<_>>>()?;

        // xprop дополняет значение нулями: `0x3a00007, 0x0`
        ids.into_iter()
            .find(|id| id.value() != 0)
            .ok_or_else(|| appswitch_error!(active_window, "нет окна в фокусе"))
    }
}
