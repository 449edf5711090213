#![warn(missing_docs)]

//! Nested context menus for desktop-style shells.

pub use nalgebra as math;
pub use vello::kurbo;

pub use deskmenu_core as core;
pub use deskmenu_services as services;

/// A "prelude" for users of deskmenu.
///
/// Importing this module brings into scope the types needed to open, drive and close menus.
///
/// ```rust
/// use deskmenu::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::{MenuConfig, MenuStyle};
    pub use crate::core::input::{
        InputDispatcher, PointerButton, PointerEvent, PointerOutcome, PointerTarget,
    };
    pub use crate::core::menu::{
        ItemId, MenuHost, MenuId, MenuOption, MenuSessionManager, OwnerId, SpawnRequest,
    };
    pub use crate::services::settings::SettingsRegistry;

    // Math
    pub use nalgebra::Vector2;
    pub use vello::kurbo::{Point, Rect};
}
