//! Menu layout constants
//!
//! Centralized defaults for menu layout used across the menu system.
//! Every value here is the default of a field in [MenuStyle](crate::config::MenuStyle)
//! or [MenuConfig](crate::config::MenuConfig) and can be overridden there.

/// Padding around a label on every side, in pixels
pub const LABEL_PADDING: f64 = 10.0;

/// Extra width added to the widest item when sizing a menu
pub const ITEM_WIDTH_RESERVE: f64 = 30.0;

/// Glyph drawn at the trailing edge of items that own a submenu
pub const SUBMENU_INDICATOR: &str = ">";

/// Margin kept between a menu's right edge and the viewport's right edge
pub const EDGE_MARGIN_X: f64 = 20.0;

/// Margin kept between a menu's bottom edge and the viewport's bottom edge
pub const EDGE_MARGIN_Y: f64 = 10.0;

/// Estimated pixels per character for label text (used when no font metrics are available)
pub const TEXT_CHAR_WIDTH: f64 = 7.0;

/// Estimated line height for label text
pub const TEXT_LINE_HEIGHT: f64 = 17.0;

/// Interval of the hover reconciliation pass, in milliseconds
pub const RECONCILE_INTERVAL_MS: u64 = 50;

/// Default viewport width, used until the host reports the real surface size
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1920.0;

/// Default viewport height
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 1080.0;
