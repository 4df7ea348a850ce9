//! WindowBackend: единственная точка общения с внешними утилитами
//!
//! Бэкенд только запускает команды и возвращает их сырой вывод (или
//! идентификатор активного окна). Он НЕ фильтрует окна и НЕ выбирает, какое
//! активировать; это делают window_matcher, cycle_selector и Switcher.

mod command;
mod dry_run;
mod r#trait;

#[cfg(test)]
pub(crate) mod scripted;

pub use self::r#trait::{create_window_backend, WindowBackend};
