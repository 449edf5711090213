// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arena holding every live menu and item
//!
//! Menus and items reference each other through generational keys. A key to a destroyed
//! node no longer resolves, so back-references never keep anything alive and never dangle.

use nalgebra::Vector2;
use slotmap::SlotMap;
use std::sync::Arc;
use vello::kurbo::{Point, Rect};

use crate::config::MenuStyle;
use crate::menu::host::{MenuHost, NullHost};
use crate::menu::item::MenuItemView;
use crate::menu::metrics::TextMetrics;
use crate::menu::option::MenuOption;
use crate::menu::view::Menu;
use crate::menu::{ItemId, MenuId, OwnerId};

/// Owns all menus and items of one UI surface.
pub struct MenuTree {
    menus: SlotMap<MenuId, Menu>,
    items: SlotMap<ItemId, MenuItemView>,
    style: MenuStyle,
    metrics: Box<dyn TextMetrics>,
    host: Box<dyn MenuHost>,
    viewport: Vector2<f64>,
}

impl MenuTree {
    /// Create an empty tree measuring labels with `metrics`.
    pub fn new(style: MenuStyle, metrics: impl TextMetrics + 'static) -> Self {
        Self {
            menus: SlotMap::with_key(),
            items: SlotMap::with_key(),
            style,
            metrics: Box::new(metrics),
            host: Box::new(NullHost),
            viewport: Vector2::new(
                crate::menu::constants::DEFAULT_VIEWPORT_WIDTH,
                crate::menu::constants::DEFAULT_VIEWPORT_HEIGHT,
            ),
        }
    }

    /// Route display-resource notifications to `host`.
    pub fn with_host(mut self, host: impl MenuHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Set the display surface size used by [MenuTree::adjust_position].
    pub fn set_viewport(&mut self, viewport: Vector2<f64>) {
        self.viewport = viewport;
    }

    /// Display surface size.
    pub fn viewport(&self) -> Vector2<f64> {
        self.viewport
    }

    /// Layout style.
    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    /// Look up a live menu.
    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id)
    }

    /// Look up a live item.
    pub fn item(&self, id: ItemId) -> Option<&MenuItemView> {
        self.items.get(id)
    }

    /// Check if a menu has not been destroyed.
    pub fn is_alive(&self, id: MenuId) -> bool {
        self.menus.contains_key(id)
    }

    /// Check if an item has not been destroyed.
    pub fn is_item_alive(&self, id: ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Number of live menus across all chains.
    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    /// Number of live items across all chains.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Build a menu at `anchor` from `options`.
    ///
    /// Items are stacked top to bottom in the given order and then laid out with one uniform
    /// size (the widest and tallest item). Items with children build their submenu right away,
    /// hidden, anchored at the item's right edge. A submenu registers itself in its parent's
    /// `child_menus`.
    pub fn build_menu(
        &mut self,
        anchor: Vector2<f64>,
        options: impl IntoIterator<Item = MenuOption>,
        parent: Option<MenuId>,
    ) -> MenuId {
        let options: Vec<Arc<MenuOption>> = options.into_iter().map(Arc::new).collect();
        let parent = parent.filter(|parent| {
            let alive = self.menus.contains_key(*parent);
            if !alive {
                log::debug!("Parent menu {:?} is gone, building a root menu instead", parent);
            }
            alive
        });
        self.build_shared(anchor, &options, parent, None)
    }

    fn build_shared(
        &mut self,
        anchor: Vector2<f64>,
        options: &[Arc<MenuOption>],
        parent: Option<MenuId>,
        owner_item: Option<ItemId>,
    ) -> MenuId {
        let id = self.menus.insert(Menu::new(anchor, parent));
        let padding = self.style.label_padding;
        let indicator = self.metrics.measure(&self.style.submenu_indicator);

        // First pass: natural sizes, stacked by running height.
        let mut next_y = 0.0;
        let mut max_width: f64 = 0.0;
        let mut max_height: f64 = 0.0;
        let mut item_ids = Vec::with_capacity(options.len());
        for option in options {
            let label = self.metrics.measure(option.label());
            let natural = Vector2::new(label.x + padding * 2.0, label.y + padding * 2.0);
            let mut width = natural.x;
            if option.has_children() {
                if option.action().is_some() {
                    log::debug!(
                        "Option {:?} has both an action and children; the action is never run",
                        option.label()
                    );
                }
                width += indicator.x + padding * 2.0;
            }

            let item = MenuItemView::new(option.clone(), id, Vector2::new(0.0, next_y), natural);
            item_ids.push(self.items.insert(item));

            next_y += natural.y;
            max_width = max_width.max(width + self.style.width_reserve);
            max_height = max_height.max(natural.y);
        }

        if let Some(menu) = self.menus.get_mut(id) {
            menu.owner_item = owner_item;
            menu.items = item_ids.clone();
            menu.size = Vector2::new(max_width, max_height * item_ids.len() as f64);
        }

        // Second pass: uniform size, then submenus.
        for (index, item_id) in item_ids.iter().enumerate() {
            self.layout_item(*item_id, index, max_width, max_height);
        }

        if let Some(parent) = parent.and_then(|parent| self.menus.get_mut(parent)) {
            parent.child_menus.push(id);
        }

        if let Some(menu) = self.menus.get(id) {
            self.host.menu_built(id, menu);
        }
        log::trace!("Built menu {:?} with {} items", id, item_ids.len());
        id
    }

    fn layout_item(&mut self, id: ItemId, index: usize, width: f64, height: f64) {
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        item.size = Vector2::new(width, height);
        item.offset = Vector2::new(0.0, index as f64 * height);
        item.laid_out = true;

        if item.submenu.is_some() || item.option.is_leaf() {
            return;
        }

        let menu = item.parent_menu;
        let offset = item.offset;
        let children: Vec<Arc<MenuOption>> = item.option.children().to_vec();
        let Some(origin) = self.menus.get(menu).map(|menu| menu.position) else {
            return;
        };

        let anchor = Vector2::new(origin.x + width, origin.y + offset.y);
        let submenu = self.build_shared(anchor, &children, Some(menu), Some(id));
        if let Some(item) = self.items.get_mut(id) {
            item.submenu = Some(submenu);
            item.submenu_visible = false;
        }
    }

    /// Destroy `id` and every submenu below it.
    ///
    /// Submenus are destroyed before the menu owning them (post-order). A destroyed submenu is
    /// detached from its owning item and its parent's `child_menus`. Destroying a menu that is
    /// already gone does nothing. Returns the number of menus destroyed.
    pub fn destroy_chain(&mut self, id: MenuId) -> usize {
        if !self.menus.contains_key(id) {
            log::trace!("Menu {:?} already destroyed", id);
            return 0;
        }

        let mut order = Vec::new();
        self.collect_post_order(id, &mut order);

        if let Some((parent, owner_item)) = self.menus.get(id).map(|menu| (menu.parent, menu.owner_item)) {
            if let Some(parent) = parent.and_then(|parent| self.menus.get_mut(parent)) {
                parent.child_menus.retain(|child| *child != id);
            }
            if let Some(item) = owner_item.and_then(|item| self.items.get_mut(item)) {
                item.submenu = None;
                item.submenu_visible = false;
            }
        }

        for menu_id in &order {
            if let Some(menu) = self.menus.remove(*menu_id) {
                for item in menu.items {
                    self.items.remove(item);
                }
                self.host.menu_destroyed(*menu_id);
            }
        }

        log::debug!("Destroyed menu chain {:?} ({} menus)", id, order.len());
        order.len()
    }

    fn collect_post_order(&self, id: MenuId, out: &mut Vec<MenuId>) {
        let Some(menu) = self.menus.get(id) else {
            return;
        };
        for item in &menu.items {
            if let Some(submenu) = self.items.get(*item).and_then(|item| item.submenu) {
                self.collect_post_order(submenu, out);
            }
        }
        out.push(id);
    }

    /// This menu followed by every menu spawned below it (pre-order).
    pub fn chain(&self, id: MenuId) -> Vec<MenuId> {
        let mut out = Vec::new();
        self.collect_chain(id, &mut out);
        out
    }

    fn collect_chain(&self, id: MenuId, out: &mut Vec<MenuId>) {
        let Some(menu) = self.menus.get(id) else {
            return;
        };
        out.push(id);
        for child in &menu.child_menus {
            self.collect_chain(*child, out);
        }
    }

    /// Walk parent links up to the root of the chain containing `id`.
    pub fn root_of(&self, id: MenuId) -> MenuId {
        let mut current = id;
        while let Some(parent) = self.menus.get(current).and_then(|menu| menu.parent) {
            if !self.menus.contains_key(parent) {
                break;
            }
            current = parent;
        }
        current
    }

    /// Check if `menu` is `ancestor` or lies below it.
    pub fn is_within(&self, menu: MenuId, ancestor: MenuId) -> bool {
        let mut current = Some(menu);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.menus.get(id).and_then(|menu| menu.parent);
        }
        false
    }

    /// Check if a menu is on screen: a live root, or a submenu whose item revealed it
    /// inside a menu that is itself on screen.
    pub fn is_shown(&self, id: MenuId) -> bool {
        let Some(menu) = self.menus.get(id) else {
            return false;
        };
        match menu.owner_item {
            None => true,
            Some(owner) => self
                .items
                .get(owner)
                .is_some_and(|item| item.submenu_visible && self.is_shown(item.parent_menu)),
        }
    }

    /// Tag a menu with the collaborator that requested it.
    pub fn set_owner(&mut self, id: MenuId, owner: Option<OwnerId>) {
        if let Some(menu) = self.menus.get_mut(id) {
            menu.owner = owner;
        }
    }

    /// Screen-space bounds of a menu's background.
    pub fn menu_bounds(&self, id: MenuId) -> Option<Rect> {
        self.menus.get(id).map(Menu::bounds)
    }

    /// Screen-space bounds of an item's hit region.
    pub fn item_bounds(&self, id: ItemId) -> Option<Rect> {
        let item = self.items.get(id)?;
        let menu = self.menus.get(item.parent_menu)?;
        let x = menu.position.x + item.offset.x;
        let y = menu.position.y + item.offset.y;
        Some(Rect::new(x, y, x + item.size.x, y + item.size.y))
    }

    /// Find the item under `point` among the shown menus of `menus`.
    ///
    /// Later menus win, so a submenu overlapping its parent takes the hit.
    pub fn item_at(&self, point: Point, menus: &[MenuId]) -> Option<ItemId> {
        menus
            .iter()
            .rev()
            .filter(|id| self.is_shown(**id))
            .filter_map(|id| self.menus.get(*id))
            .find_map(|menu| {
                menu.items.iter().copied().find(|item| {
                    self.item_bounds(*item).is_some_and(|bounds| bounds.contains(point))
                })
            })
    }

    /// Check if `point` lies inside any shown menu of `menus`.
    pub fn any_contains(&self, point: Point, menus: &[MenuId]) -> bool {
        menus
            .iter()
            .filter(|id| self.is_shown(**id))
            .filter_map(|id| self.menu_bounds(*id))
            .any(|bounds| bounds.contains(point))
    }

    /// Turn an item's hover highlight on or off.
    pub fn set_highlight(&mut self, id: ItemId, highlighted: bool) {
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        if item.highlighted != highlighted {
            item.highlighted = highlighted;
            self.host.item_highlight_changed(id, highlighted);
        }
    }

    /// Reveal or hide the submenu owned by `id`.
    ///
    /// Hiding also hides every submenu revealed below it. Returns `true` if anything changed.
    pub fn set_submenu_visible(&mut self, id: ItemId, visible: bool) -> bool {
        let Some((submenu, current)) = self
            .items
            .get(id)
            .and_then(|item| item.submenu.map(|submenu| (submenu, item.submenu_visible)))
        else {
            return false;
        };

        let mut changed = false;
        if !visible {
            let nested: Vec<ItemId> = self
                .menus
                .get(submenu)
                .map(|menu| menu.items.clone())
                .unwrap_or_default();
            for item in nested {
                changed |= self.set_submenu_visible(item, false);
                self.set_highlight(item, false);
            }
        }

        if current != visible {
            if let Some(item) = self.items.get_mut(id) {
                item.submenu_visible = visible;
            }
            self.host.submenu_visibility_changed(submenu, visible);
            log::trace!("Submenu {:?} of item {:?} visible: {}", submenu, id, visible);
            changed = true;
        }
        changed
    }

    /// Keep a menu inside the viewport, or hard-place it.
    ///
    /// Without a forced x, a menu whose right edge (plus margin) overflows the viewport is
    /// moved left by its own width plus its parent's width, flipping a submenu to the left of
    /// its parent. Without a forced y, a menu overflowing the bottom is moved up by its own
    /// height. Whatever translation results is applied to every submenu below it, and each
    /// submenu then re-checks the viewport from its new position.
    pub fn adjust_position(&mut self, id: MenuId, forced_x: Option<f64>, forced_y: Option<f64>) {
        let Some(menu) = self.menus.get(id) else {
            return;
        };
        let position = menu.position;
        let size = menu.size;
        let parent_width = menu
            .parent
            .and_then(|parent| self.menus.get(parent))
            .map(|parent| parent.size.x)
            .unwrap_or(0.0);

        let right_limit = position.x + size.x + self.style.edge_margin_x;
        let bottom_limit = position.y + size.y + self.style.edge_margin_y;

        let mut flipped = position;
        if forced_x.is_none() && right_limit > self.viewport.x {
            flipped.x -= size.x + parent_width;
        }
        if forced_y.is_none() && bottom_limit > self.viewport.y {
            flipped.y -= size.y;
        }

        let target = Vector2::new(forced_x.unwrap_or(flipped.x), forced_y.unwrap_or(flipped.y));
        let delta = target - position;
        let children = self.move_menu(id, delta);

        for child in children {
            self.translate_subtree(child, delta);
            self.adjust_position(child, None, None);
        }
    }

    fn translate_subtree(&mut self, id: MenuId, delta: Vector2<f64>) {
        if delta == Vector2::zeros() {
            return;
        }
        for child in self.move_menu(id, delta) {
            self.translate_subtree(child, delta);
        }
    }

    /// Move one menu by `delta`, returning its child menus.
    fn move_menu(&mut self, id: MenuId, delta: Vector2<f64>) -> Vec<MenuId> {
        let Some(menu) = self.menus.get_mut(id) else {
            return Vec::new();
        };
        if delta != Vector2::zeros() {
            menu.position += delta;
            self.host.menu_moved(id, menu);
        }
        menu.child_menus.clone()
    }
}
