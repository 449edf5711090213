//! Display-resource notifications
//!
//! The menu tree does not draw anything. A host (renderer, test double, logger) implements
//! [MenuHost] to learn when display resources must be created, shown, hidden or released.

use crate::menu::view::Menu;
use crate::menu::{ItemId, MenuId};

/// Receives display-resource notifications from a [MenuTree](crate::menu::tree::MenuTree).
///
/// All functions have empty default implementations.
pub trait MenuHost {
    /// Called once a menu and all of its items have been laid out.
    fn menu_built(&mut self, _id: MenuId, _menu: &Menu) {}

    /// Called when a menu's display resources must be released.
    ///
    /// Within one chain teardown, submenus are reported before the menu that owns them.
    fn menu_destroyed(&mut self, _id: MenuId) {}

    /// Called when a submenu is revealed or hidden.
    fn submenu_visibility_changed(&mut self, _id: MenuId, _visible: bool) {}

    /// Called when an item's hover highlight changes.
    fn item_highlight_changed(&mut self, _id: ItemId, _highlighted: bool) {}

    /// Called when a menu moved (its items move with it).
    fn menu_moved(&mut self, _id: MenuId, _menu: &Menu) {}
}

/// A [MenuHost] that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl MenuHost for NullHost {}

/// A notification recorded by [RecordingHost].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// See [MenuHost::menu_built].
    Built(MenuId),
    /// See [MenuHost::menu_destroyed].
    Destroyed(MenuId),
    /// See [MenuHost::submenu_visibility_changed].
    Visibility(MenuId, bool),
    /// See [MenuHost::item_highlight_changed].
    Highlight(ItemId, bool),
    /// See [MenuHost::menu_moved].
    Moved(MenuId),
}

/// A [MenuHost] that records every notification into a shared log.
///
/// Useful for asserting teardown order and visibility transitions.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    log: std::rc::Rc<std::cell::RefCell<Vec<HostEvent>>>,
}

impl RecordingHost {
    /// Create a new, empty recording host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<HostEvent> {
        self.log.borrow().clone()
    }

    /// Menus destroyed so far, in teardown order.
    pub fn destroyed(&self) -> Vec<MenuId> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Destroyed(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl MenuHost for RecordingHost {
    fn menu_built(&mut self, id: MenuId, _menu: &Menu) {
        self.log.borrow_mut().push(HostEvent::Built(id));
    }

    fn menu_destroyed(&mut self, id: MenuId) {
        self.log.borrow_mut().push(HostEvent::Destroyed(id));
    }

    fn submenu_visibility_changed(&mut self, id: MenuId, visible: bool) {
        self.log.borrow_mut().push(HostEvent::Visibility(id, visible));
    }

    fn item_highlight_changed(&mut self, id: ItemId, highlighted: bool) {
        self.log.borrow_mut().push(HostEvent::Highlight(id, highlighted));
    }

    fn menu_moved(&mut self, id: MenuId, _menu: &Menu) {
        self.log.borrow_mut().push(HostEvent::Moved(id));
    }
}
