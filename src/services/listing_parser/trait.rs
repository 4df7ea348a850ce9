use crate::error::Result;
use crate::window::{DesktopId, WindowId, WindowRecord};

/// Trait for parsers of window manager tool output
pub trait ListingParser: Send + Sync {
    /// Find the active desktop in a desktop listing.
    ///
    /// Fails with `NoActiveDesktopFound` when no line carries the active marker.
    fn parse_active_desktop(&self, raw: &str) -> Result<DesktopId>;

    /// Parse a window listing, one record per well-formed line, in input order.
    ///
    /// Malformed lines are skipped; an empty result is not an error.
    fn parse_window_listing(&self, raw: &str) -> Vec<WindowRecord>;

    /// Extract the focused window id from an active-window query.
    fn parse_active_window(&self, raw: &str) -> Result<WindowId>;
}
