//! Nested context menu system
//!
//! A context menu is a chain: a root [Menu] plus every submenu spawned from its items.
//! All nodes live in a [MenuTree] arena; the [MenuSessionManager] keeps at most one chain
//! open and the [HoverCoordinator] decides when revealed submenus close again.

pub mod constants;
pub mod host;
pub mod hover;
pub mod item;
pub mod metrics;
pub mod option;
pub mod session;
pub mod tree;
pub mod view;

// Re-export core types
pub use host::{HostEvent, MenuHost, NullHost, RecordingHost};
pub use hover::{HoverCoordinator, ReconcileTimer};
pub use item::{ItemHandle, MenuItemView};
pub use metrics::{ApproximateMetrics, TextMetrics};
pub use option::{MenuAction, MenuOption};
pub use session::{MenuSessionManager, SpawnRequest};
pub use tree::MenuTree;
pub use view::Menu;

slotmap::new_key_type! {
    /// Handle to a [Menu] in a [MenuTree].
    pub struct MenuId;

    /// Handle to a [MenuItemView] in a [MenuTree].
    pub struct ItemId;
}

/// Opaque tag for the collaborator (icon, taskbar, desktop background) that requested a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);
