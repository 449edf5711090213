// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu node stored in the [MenuTree](crate::menu::tree::MenuTree)

use nalgebra::Vector2;
use vello::kurbo::Rect;

use crate::menu::{ItemId, MenuId, OwnerId};

/// A vertical list of items with a bounding background.
///
/// Items are owned by the menu in display order (top to bottom). Submenus are owned by the
/// items that spawned them; `child_menus` only mirrors them for cascading position updates.
#[derive(Debug, Clone)]
pub struct Menu {
    pub(crate) parent: Option<MenuId>,
    pub(crate) owner_item: Option<ItemId>,
    pub(crate) owner: Option<OwnerId>,
    pub(crate) items: Vec<ItemId>,
    pub(crate) child_menus: Vec<MenuId>,
    pub(crate) position: Vector2<f64>,
    pub(crate) size: Vector2<f64>,
}

impl Menu {
    pub(crate) fn new(position: Vector2<f64>, parent: Option<MenuId>) -> Self {
        Self {
            parent,
            owner_item: None,
            owner: None,
            items: Vec::new(),
            child_menus: Vec::new(),
            position,
            size: Vector2::zeros(),
        }
    }

    /// The menu this submenu belongs to, or [None] for a root menu.
    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    /// The item of the parent menu that spawned this submenu.
    pub fn owner_item(&self) -> Option<ItemId> {
        self.owner_item
    }

    /// The collaborator that requested this menu (root menus only).
    pub fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    /// Check if this is a root menu.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Items in display order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Submenus spawned by this menu's items, in creation order.
    pub fn child_menus(&self) -> &[MenuId] {
        &self.child_menus
    }

    /// Top-left corner in screen coordinates.
    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    /// Background size: widest item by the summed item heights.
    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    /// Background width.
    pub fn width(&self) -> f64 {
        self.size.x
    }

    /// Background height.
    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// Screen-space bounds of the background.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.size.x,
            self.position.y + self.size.y,
        )
    }
}
