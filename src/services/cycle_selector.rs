use crate::window::{WindowId, WindowRecord};
use tracing::debug;

/// Выбрать окно для активации.
///
/// - один кандидат: он и возвращается, активное окно не учитывается;
/// - активное окно среди кандидатов: следующий за ним, после последнего первый;
/// - активное окно неизвестно или не среди кандидатов: первый.
///
/// Повторные вызовы с неизменным списком проходят его по кругу. `None` только для пустого списка.
pub fn select_target(
    candidates: &[WindowRecord],
    active: Option<WindowId>,
) -> Option<&WindowRecord> {
    let first = candidates.first()?;
    if candidates.len() == 1 {
        return Some(first);
    }

    let Some(active) = active else {
        debug!("Активное окно неизвестно, берём первого кандидата");
        return Some(first);
    };

    match candidates.iter().position(|window| window.id == active) {
        Some(index) => {
            let next = candidates.get(index + 1).unwrap_or(first);
            debug!(
                "Активное окно {} на позиции {} из {}, следующее {}",
                active,
                index + 1,
                candidates.len(),
                next.id
            );
            Some(next)
        }
        None => {
            debug!("Активное окно {} не среди кандидатов, берём первого", active);
            Some(first)
        }
    }
}
