pub mod record;

pub use record::{DesktopId, Outcome, WindowId, WindowRecord};
