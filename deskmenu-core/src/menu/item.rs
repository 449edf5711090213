// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item views and their pointer behavior (hover, click, submenu reveal)

use nalgebra::Vector2;
use std::sync::Arc;

use crate::input::{PointerEvent, PointerOutcome, PointerTarget};
use crate::menu::option::MenuOption;
use crate::menu::session::MenuSessionManager;
use crate::menu::{ItemId, MenuId};

/// On-screen representation of one [MenuOption] inside a menu.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub(crate) option: Arc<MenuOption>,
    pub(crate) parent_menu: MenuId,
    pub(crate) submenu: Option<MenuId>,
    pub(crate) offset: Vector2<f64>,
    pub(crate) natural_size: Vector2<f64>,
    pub(crate) size: Vector2<f64>,
    pub(crate) laid_out: bool,
    pub(crate) highlighted: bool,
    pub(crate) submenu_visible: bool,
}

impl MenuItemView {
    pub(crate) fn new(
        option: Arc<MenuOption>,
        parent_menu: MenuId,
        offset: Vector2<f64>,
        natural_size: Vector2<f64>,
    ) -> Self {
        Self {
            option,
            parent_menu,
            submenu: None,
            offset,
            natural_size,
            size: natural_size,
            laid_out: false,
            highlighted: false,
            submenu_visible: false,
        }
    }

    /// The option this item displays.
    pub fn option(&self) -> &MenuOption {
        &self.option
    }

    /// Displayed label.
    pub fn label(&self) -> &str {
        self.option.label()
    }

    /// Check if a trailing submenu indicator is drawn after the label.
    pub fn has_indicator(&self) -> bool {
        self.option.has_children()
    }

    /// The menu that owns this item.
    pub fn parent_menu(&self) -> MenuId {
        self.parent_menu
    }

    /// The submenu this item spawned during layout, if it has children.
    pub fn submenu(&self) -> Option<MenuId> {
        self.submenu
    }

    /// Offset of the item's top-left corner from its menu's position.
    pub fn offset(&self) -> Vector2<f64> {
        self.offset
    }

    /// Size measured from the label alone, before uniform layout.
    pub fn natural_size(&self) -> Vector2<f64> {
        self.natural_size
    }

    /// Final size shared with every sibling.
    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    /// Check if the owning menu has laid this item out.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Check if the hover highlight is on.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Check if this item's submenu is currently revealed.
    pub fn is_submenu_visible(&self) -> bool {
        self.submenu.is_some() && self.submenu_visible
    }

    /// Check if clicking this item runs its action and collapses the chain.
    pub fn is_leaf(&self) -> bool {
        self.option.is_leaf()
    }
}

/// Mutable access to one live item together with the session it belongs to.
///
/// Obtained from [MenuSessionManager::item]; implements the [PointerTarget] capability.
pub struct ItemHandle<'a> {
    id: ItemId,
    session: &'a mut MenuSessionManager,
}

impl<'a> ItemHandle<'a> {
    pub(crate) fn new(id: ItemId, session: &'a mut MenuSessionManager) -> Self {
        Self { id, session }
    }

    /// Id of the handled item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The item view, if it is still alive.
    pub fn view(&self) -> Option<&MenuItemView> {
        self.session.tree.item(self.id)
    }
}

impl PointerTarget for ItemHandle<'_> {
    fn on_pointer_enter(&mut self) {
        let session = &mut *self.session;
        let Some(has_submenu) = session.tree.item(self.id).map(|item| item.submenu.is_some()) else {
            return;
        };

        session.tree.set_highlight(self.id, true);
        session.hover.set_hovered(&mut session.tree, self.id);
        if has_submenu {
            session.tree.set_submenu_visible(self.id, true);
        }
    }

    fn on_pointer_exit(&mut self) {
        let session = &mut *self.session;
        if !session.tree.is_item_alive(self.id) {
            return;
        }

        session.tree.set_highlight(self.id, false);
        // The submenu stays open: the pointer may be moving into it. Reconciliation decides.
        session.hover.clear_hovered(self.id);
    }

    fn on_pointer_down(&mut self, _event: &PointerEvent) -> PointerOutcome {
        let session = &mut *self.session;
        let Some(item) = session.tree.item(self.id) else {
            return PointerOutcome::Unhandled;
        };

        if !item.is_leaf() {
            // Submenus open on hover; clicking does not toggle them.
            return PointerOutcome::Inside;
        }

        let action = item.option.action().cloned();
        let menu = item.parent_menu;
        log::debug!("Activating menu item {:?} ({:?})", self.id, item.label());

        if let Some(action) = action {
            action();
        }

        let root = session.tree.root_of(menu);
        session.destroy_chain(root);
        PointerOutcome::Activated
    }
}
