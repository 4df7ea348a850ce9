pub mod backend;
pub mod cycle_selector;
pub mod listing_parser;
pub mod switcher;
pub mod window_matcher;

pub use backend::create_window_backend;
pub use listing_parser::{ListingParser, WmctrlParser};
pub use switcher::{DesktopListing, Switcher};
