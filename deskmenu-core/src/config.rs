use nalgebra::Vector2;
use std::time::Duration;

use crate::menu::constants::*;

/// deskmenu Configuration Structure.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    /// Layout style of menus and items.
    pub style: MenuStyle,
    /// How often the hover reconciliation pass runs.
    ///
    /// The value is tunable; nothing in the menu subsystem depends on it being exactly 50ms.
    pub reconcile_interval: Duration,
    /// Size of the display surface until the host reports the real one.
    pub viewport: Vector2<f64>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            style: MenuStyle::default(),
            reconcile_interval: Duration::from_millis(RECONCILE_INTERVAL_MS),
            viewport: Vector2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        }
    }
}

/// Menu layout style.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuStyle {
    /// Padding around each label, applied on every side.
    pub label_padding: f64,
    /// Extra width added to the widest item.
    pub width_reserve: f64,
    /// Glyph rendered after labels of items that own a submenu.
    pub submenu_indicator: String,
    /// Right-edge margin used by the viewport overflow check.
    pub edge_margin_x: f64,
    /// Bottom-edge margin used by the viewport overflow check.
    pub edge_margin_y: f64,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            label_padding: LABEL_PADDING,
            width_reserve: ITEM_WIDTH_RESERVE,
            submenu_indicator: SUBMENU_INDICATOR.to_string(),
            edge_margin_x: EDGE_MARGIN_X,
            edge_margin_y: EDGE_MARGIN_Y,
        }
    }
}
