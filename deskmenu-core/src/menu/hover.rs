// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hover tracking and submenu auto-close
//!
//! Pointer enter/exit events alone cannot tell "left the item into its own submenu" from
//! "left the menu tree". The coordinator remembers the item the pointer last left and a
//! periodic reconciliation pass decides, from the current pointer position, whether that
//! item's submenu should close.

use std::time::{Duration, Instant};
use vello::kurbo::Point;

use crate::menu::tree::MenuTree;
use crate::menu::ItemId;

/// Tracks the hovered item of one menu session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverCoordinator {
    hovered: Option<ItemId>,
    last_hovered: Option<ItemId>,
}

impl HoverCoordinator {
    /// Create a coordinator with no hover state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Item currently under the pointer.
    pub fn hovered(&self) -> Option<ItemId> {
        self.hovered
    }

    /// Item the pointer most recently left.
    pub fn last_hovered(&self) -> Option<ItemId> {
        self.last_hovered
    }

    /// Forget all hover state. Called whenever the session changes.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.last_hovered = None;
    }

    /// Record that the pointer entered `item`.
    ///
    /// Submenus revealed along the previous hover path are hidden unless `item` lies inside
    /// them. The submenu owned by `item` itself is left alone; the item reveals it next.
    pub fn set_hovered(&mut self, tree: &mut MenuTree, item: ItemId) {
        if self.hovered == Some(item) {
            return;
        }
        let Some(target_menu) = tree.item(item).map(|view| view.parent_menu()) else {
            return;
        };

        if let Some(previous) = self.hovered.or(self.last_hovered) {
            if previous != item {
                Self::collapse_outside(tree, previous, item);
            }
        }

        if let Some(hovered) = self.hovered {
            self.last_hovered = Some(hovered);
        }
        self.hovered = Some(item);
        log::trace!("Hovered item {:?} in menu {:?}", item, target_menu);
    }

    /// Walk from `previous` up its chain, hiding every revealed submenu that does not contain
    /// `target`.
    fn collapse_outside(tree: &mut MenuTree, previous: ItemId, target: ItemId) {
        let Some(target_menu) = tree.item(target).map(|view| view.parent_menu()) else {
            return;
        };

        let mut current = Some(previous);
        while let Some(id) = current {
            let Some(view) = tree.item(id) else {
                break;
            };
            let parent_menu = view.parent_menu();
            let revealed = view.is_submenu_visible().then_some(view.submenu()).flatten();

            if let Some(submenu) = revealed {
                if id != target && !tree.is_within(target_menu, submenu) {
                    tree.set_submenu_visible(id, false);
                }
            }

            current = tree.menu(parent_menu).and_then(|menu| menu.owner_item());
        }
    }

    /// Record that the pointer left `item`.
    pub fn clear_hovered(&mut self, item: ItemId) {
        if self.hovered == Some(item) {
            self.last_hovered = Some(item);
            self.hovered = None;
        }
    }

    /// Close the submenu the pointer wandered away from.
    ///
    /// Runs only while nothing is hovered: if the last hovered item's submenu is revealed and
    /// `pointer` is over neither that submenu (or anything shown below it) nor the item itself,
    /// the submenu is hidden. Running it again without any state change does nothing.
    ///
    /// Only the last hovered item is checked. After leaving the tree from a leaf inside a
    /// submenu, that submenu stays open until the next hover or click.
    /// Returns `true` if a submenu was hidden.
    pub fn reconcile(&self, tree: &mut MenuTree, pointer: Point) -> bool {
        if self.hovered.is_some() {
            return false;
        }
        let Some(last) = self.last_hovered else {
            return false;
        };
        let Some(submenu) = tree
            .item(last)
            .filter(|view| view.is_submenu_visible())
            .and_then(|view| view.submenu())
        else {
            return false;
        };

        let over_menu = tree.any_contains(pointer, &tree.chain(submenu));
        let over_item = tree
            .item_bounds(last)
            .is_some_and(|bounds| bounds.contains(pointer));

        if over_menu || over_item {
            return false;
        }

        log::trace!("Reconciliation closing submenu {:?} of item {:?}", submenu, last);
        tree.set_submenu_visible(last, false)
    }
}

/// Schedules the periodic reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl ReconcileTimer {
    /// Create a timer firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check if a pass is due at `now`, scheduling the next one if so.
    ///
    /// The first call is always due.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.next_due.is_some_and(|next| now < next) {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuStyle;
    use crate::menu::metrics::ApproximateMetrics;
    use crate::menu::option::MenuOption;
    use crate::menu::MenuId;
    use nalgebra::Vector2;

    struct Fixture {
        tree: MenuTree,
        root: MenuId,
        view: ItemId,
        sort: ItemId,
        view_submenu: MenuId,
    }

    fn fixture() -> Fixture {
        let mut tree = MenuTree::new(MenuStyle::default(), ApproximateMetrics::default());
        let root = tree.build_menu(
            Vector2::new(0.0, 0.0),
            vec![
                MenuOption::submenu("View", vec![MenuOption::new("Large icons")]),
                MenuOption::submenu("Sort by", vec![MenuOption::new("Name")]),
                MenuOption::new("Refresh"),
            ],
            None,
        );
        let items = tree.menu(root).unwrap().items().to_vec();
        let view_submenu = tree.item(items[0]).unwrap().submenu().unwrap();
        Fixture {
            tree,
            root,
            view: items[0],
            sort: items[1],
            view_submenu,
        }
    }

    fn center(tree: &MenuTree, item: ItemId) -> Point {
        tree.item_bounds(item).unwrap().center()
    }

    #[test]
    fn test_pointer_into_submenu_keeps_it_open() {
        let Fixture { mut tree, view, view_submenu, .. } = fixture();
        let mut hover = HoverCoordinator::new();

        hover.set_hovered(&mut tree, view);
        tree.set_submenu_visible(view, true);
        hover.clear_hovered(view);

        let inside = tree.menu_bounds(view_submenu).unwrap().center();
        assert!(!hover.reconcile(&mut tree, inside));
        assert!(tree.is_shown(view_submenu));

        let child = tree.menu(view_submenu).unwrap().items()[0];
        hover.set_hovered(&mut tree, child);
        assert!(tree.is_shown(view_submenu));
        assert_eq!(hover.last_hovered(), Some(view));
    }

    #[test]
    fn test_sibling_hover_hides_previous_submenu() {
        let Fixture { mut tree, view, sort, view_submenu, .. } = fixture();
        let mut hover = HoverCoordinator::new();

        hover.set_hovered(&mut tree, view);
        tree.set_submenu_visible(view, true);
        hover.clear_hovered(view);
        hover.set_hovered(&mut tree, sort);

        assert!(!tree.is_shown(view_submenu));
        assert_eq!(hover.hovered(), Some(sort));
    }

    #[test]
    fn test_reconcile_closes_after_leaving_tree() {
        let Fixture { mut tree, root, view, view_submenu, .. } = fixture();
        let mut hover = HoverCoordinator::new();

        hover.set_hovered(&mut tree, view);
        tree.set_submenu_visible(view, true);

        // Still hovered: reconciliation does not touch anything.
        let outside = Point::new(1500.0, 900.0);
        assert!(!hover.reconcile(&mut tree, outside));

        hover.clear_hovered(view);
        let over_item = center(&tree, view);
        assert!(!hover.reconcile(&mut tree, over_item));
        assert!(hover.reconcile(&mut tree, outside));
        assert!(!tree.is_shown(view_submenu));
        assert!(tree.is_shown(root));

        // Idempotent.
        assert!(!hover.reconcile(&mut tree, outside));
    }

    #[test]
    fn test_leaving_from_submenu_item_keeps_submenu_until_next_hover() {
        let Fixture { mut tree, root, view, sort, view_submenu } = fixture();
        let mut hover = HoverCoordinator::new();

        hover.set_hovered(&mut tree, view);
        tree.set_submenu_visible(view, true);
        hover.clear_hovered(view);
        let child = tree.menu(view_submenu).unwrap().items()[0];
        hover.set_hovered(&mut tree, child);
        hover.clear_hovered(child);

        // The last hovered item is the leaf, which reveals nothing.
        let outside = Point::new(1500.0, 900.0);
        assert!(!hover.reconcile(&mut tree, outside));
        assert!(!hover.reconcile(&mut tree, outside));
        assert!(tree.is_shown(view_submenu));

        // The next hover elsewhere in the tree collapses it.
        hover.set_hovered(&mut tree, sort);
        assert!(!tree.is_shown(view_submenu));
        assert!(tree.is_shown(root));
    }

    #[test]
    fn test_reset_forgets_items() {
        let Fixture { mut tree, view, .. } = fixture();
        let mut hover = HoverCoordinator::new();
        hover.set_hovered(&mut tree, view);
        hover.clear_hovered(view);
        hover.reset();
        assert_eq!(hover, HoverCoordinator::default());
    }

    #[test]
    fn test_timer_interval() {
        let start = Instant::now();
        let mut timer = ReconcileTimer::new(Duration::from_millis(50));
        assert!(timer.due(start));
        assert!(!timer.due(start + Duration::from_millis(10)));
        assert!(timer.due(start + Duration::from_millis(50)));
        assert!(!timer.due(start + Duration::from_millis(60)));
    }
}
