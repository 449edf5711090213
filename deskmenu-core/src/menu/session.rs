// SPDX-License-Identifier: MIT OR Apache-2.0

//! Active menu session management
//!
//! At most one menu chain is open at a time. The session manager owns that single
//! active-root reference: spawning a new root tears the previous chain down, and a
//! pointer-down outside every shown menu of the chain dismisses it.

use nalgebra::Vector2;
use vello::kurbo::Point;

use crate::config::MenuConfig;
use crate::input::{PointerEvent, PointerOutcome};
use crate::menu::hover::HoverCoordinator;
use crate::menu::item::ItemHandle;
use crate::menu::metrics::ApproximateMetrics;
use crate::menu::option::MenuOption;
use crate::menu::tree::MenuTree;
use crate::menu::{ItemId, MenuId, OwnerId};

/// A collaborator's request to open a context menu.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    /// Anchor point (top-left corner before viewport adjustment).
    pub anchor: Vector2<f64>,
    /// Options in display order.
    pub options: Vec<MenuOption>,
    /// The collaborator requesting the menu.
    pub owner: Option<OwnerId>,
    /// Hard-set x position, skipping the right-edge check.
    pub forced_x: Option<f64>,
    /// Hard-set y position, skipping the bottom-edge check.
    pub forced_y: Option<f64>,
}

impl SpawnRequest {
    /// Request a menu at `(x, y)`.
    pub fn new(x: f64, y: f64, options: impl IntoIterator<Item = MenuOption>) -> Self {
        Self {
            anchor: Vector2::new(x, y),
            options: options.into_iter().collect(),
            owner: None,
            forced_x: None,
            forced_y: None,
        }
    }

    /// Set the requesting collaborator.
    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Hard-place the menu; `None` keeps the viewport check for that axis.
    pub fn with_forced_position(mut self, x: Option<f64>, y: Option<f64>) -> Self {
        self.forced_x = x;
        self.forced_y = y;
        self
    }
}

/// Tracks the currently open menu chain of one UI surface.
pub struct MenuSessionManager {
    pub(crate) tree: MenuTree,
    pub(crate) hover: HoverCoordinator,
    active: Option<MenuId>,
    spawn_event: Option<u64>,
}

impl MenuSessionManager {
    /// Create a session manager with approximate label metrics and no display host.
    pub fn new(config: &MenuConfig) -> Self {
        let mut tree = MenuTree::new(config.style.clone(), ApproximateMetrics::default());
        tree.set_viewport(config.viewport);
        Self::with_tree(tree)
    }

    /// Create a session manager around a prepared tree (custom metrics or host).
    pub fn with_tree(tree: MenuTree) -> Self {
        Self {
            tree,
            hover: HoverCoordinator::new(),
            active: None,
            spawn_event: None,
        }
    }

    /// The menu arena.
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Mutable access to the arena, e.g. to build a root menu before [spawn](Self::spawn)ing it.
    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Hover state of the current session.
    pub fn hover(&self) -> &HoverCoordinator {
        &self.hover
    }

    /// Update the display surface size.
    pub fn set_viewport(&mut self, viewport: Vector2<f64>) {
        self.tree.set_viewport(viewport);
    }

    /// Root of the open chain, if any.
    pub fn active_root(&self) -> Option<MenuId> {
        self.active.filter(|id| self.tree.is_alive(*id))
    }

    /// Collaborator that requested the open chain.
    pub fn active_owner(&self) -> Option<OwnerId> {
        self.active_root()
            .and_then(|id| self.tree.menu(id))
            .and_then(|menu| menu.owner())
    }

    /// Every menu of the open chain, root first.
    pub fn active_chain(&self) -> Vec<MenuId> {
        self.active_root()
            .map(|root| self.tree.chain(root))
            .unwrap_or_default()
    }

    /// Make `root` the open chain, destroying the previous one.
    pub fn spawn(&mut self, root: MenuId) {
        let Some(menu) = self.tree.menu(root) else {
            log::debug!("Ignoring spawn of destroyed menu {:?}", root);
            return;
        };
        if !menu.is_root() {
            log::debug!("Ignoring spawn of submenu {:?}", root);
            return;
        }

        if let Some(previous) = self.active.filter(|previous| *previous != root) {
            self.tree.destroy_chain(previous);
        }
        self.active = Some(root);
        self.spawn_event = None;
        self.hover.reset();
        log::debug!("Spawned menu session {:?}", root);
    }

    /// Build a root menu for `request`, place it and make it the open chain.
    pub fn spawn_menu(&mut self, request: SpawnRequest) -> MenuId {
        let SpawnRequest {
            anchor,
            options,
            owner,
            forced_x,
            forced_y,
        } = request;

        let root = self.tree.build_menu(anchor, options, None);
        self.tree.set_owner(root, owner);
        self.tree.adjust_position(root, forced_x, forced_y);
        self.spawn(root);
        root
    }

    /// Like [spawn_menu](Self::spawn_menu), for a menu spawned while handling the pointer-down
    /// stamped `timestamp`.
    ///
    /// When that same event later reaches [handle_pointer_down](Self::handle_pointer_down) it is
    /// ignored, so the click that opened the menu cannot dismiss it.
    pub fn spawn_for_event(&mut self, request: SpawnRequest, timestamp: u64) -> MenuId {
        let root = self.spawn_menu(request);
        self.spawn_event = Some(timestamp);
        root
    }

    /// Like [spawn](Self::spawn), for a root built and placed by the caller while handling the
    /// pointer-down stamped `timestamp`.
    ///
    /// Used when placement depends on the built menu, e.g. a menu sitting on top of a taskbar.
    pub fn spawn_root_for_event(&mut self, root: MenuId, timestamp: u64) {
        self.spawn(root);
        if self.active == Some(root) {
            self.spawn_event = Some(timestamp);
        }
    }

    /// Scene-wide pointer-down listener.
    ///
    /// Dismisses the open chain when the pointer is outside every shown menu of it. A press
    /// inside the chain is left to the item under the pointer.
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        let suppressed = self.spawn_event.take() == Some(event.timestamp);
        if self.active_root().is_none() {
            return PointerOutcome::Unhandled;
        }
        if suppressed {
            log::trace!("Ignoring the pointer-down that spawned the menu");
            return PointerOutcome::Ignored;
        }
        if self.contains_point(event.position) {
            return PointerOutcome::Inside;
        }

        self.dismiss();
        PointerOutcome::Dismissed
    }

    /// Check if `point` is over any shown menu of the open chain.
    pub fn contains_point(&self, point: Point) -> bool {
        self.tree.any_contains(point, &self.active_chain())
    }

    /// Item of the open chain under `point`.
    pub fn item_at(&self, point: Point) -> Option<ItemId> {
        self.tree.item_at(point, &self.active_chain())
    }

    /// Pointer-capability handle for a live item.
    pub fn item(&mut self, id: ItemId) -> Option<ItemHandle<'_>> {
        if self.tree.is_item_alive(id) {
            Some(ItemHandle::new(id, self))
        } else {
            None
        }
    }

    /// Destroy `id` and every menu below it.
    ///
    /// Destroying the active root ends the session. Safe to call on a menu that is already
    /// gone. Returns the number of menus destroyed.
    pub fn destroy_chain(&mut self, id: MenuId) -> usize {
        let destroyed = self.tree.destroy_chain(id);
        if self.active == Some(id) || self.active.is_some_and(|root| !self.tree.is_alive(root)) {
            self.active = None;
            self.spawn_event = None;
            self.hover.reset();
        }
        destroyed
    }

    /// Close the open chain, if any. Returns `true` if a chain was open.
    pub fn dismiss(&mut self) -> bool {
        let Some(root) = self.active_root() else {
            self.active = None;
            return false;
        };
        log::debug!("Dismissing menu session {:?}", root);
        self.destroy_chain(root);
        true
    }

    /// Close the open chain if `owner` requested it. Returns `true` if it was closed.
    pub fn destroy_owned_by(&mut self, owner: OwnerId) -> bool {
        if self.active_owner() == Some(owner) {
            self.dismiss()
        } else {
            false
        }
    }

    /// Run the hover reconciliation pass against the pointer at `pointer`.
    pub fn reconcile_hover(&mut self, pointer: Point) -> bool {
        self.hover.reconcile(&mut self.tree, pointer)
    }
}
