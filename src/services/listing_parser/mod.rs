//! ListingParser: разбор текстового вывода утилит оконного менеджера
//!
//! Всё знание о формате вывода (`wmctrl -d`, `wmctrl -l -x`, xprop/xdotool)
//! живёт только здесь. Фильтрация и выбор окна работают с уже разобранными
//! записями и не зависят от формата. Новая утилита = новая реализация трейта.

mod wmctrl;
mod r#trait;

pub use self::r#trait::ListingParser;
pub use self::wmctrl::WmctrlParser;
