//! Menu option descriptions
//!
//! A [MenuOption] describes one selectable entry of a context menu. Options are plain data:
//! they know nothing about where or whether they are displayed.

use std::fmt;
use std::sync::Arc;

/// Callback executed when a leaf option is clicked.
pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

/// One selectable entry of a context menu.
///
/// Immutable once constructed. An option with children opens a submenu on hover;
/// an option without children is a leaf and runs its action on click.
#[derive(Clone)]
pub struct MenuOption {
    label: String,
    action: Option<MenuAction>,
    children: Vec<Arc<MenuOption>>,
}

impl MenuOption {
    /// Create a new option with a label, no action and no children.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Create an option that opens a submenu made of `children`.
    pub fn submenu(label: impl Into<String>, children: impl IntoIterator<Item = MenuOption>) -> Self {
        Self::new(label).with_children(children)
    }

    /// Set the action callback.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Append a child option.
    pub fn with_child(mut self, child: MenuOption) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Append several child options, keeping their order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = MenuOption>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Action callback, if any.
    pub fn action(&self) -> Option<&MenuAction> {
        self.action.as_ref()
    }

    /// Child options, in display order.
    pub fn children(&self) -> &[Arc<MenuOption>] {
        &self.children
    }

    /// Check if this option opens a submenu.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this option is a leaf (clicking it runs the action and closes the menu).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("label", &self.label)
            .field("action", &self.action.is_some())
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_keeps_child_order() {
        let option = MenuOption::submenu(
            "New",
            vec![
                MenuOption::new("Folder"),
                MenuOption::new("Text Document"),
                MenuOption::new("Spreadsheet"),
            ],
        );

        let labels: Vec<&str> = option.children().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Folder", "Text Document", "Spreadsheet"]);
        assert!(option.has_children());
        assert!(!option.is_leaf());
    }

    #[test]
    fn test_action_is_shared_between_clones() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let option = MenuOption::new("Open").with_action(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let copy = option.clone();

        (option.action().unwrap())();
        (copy.action().unwrap())();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(copy.is_leaf());
    }
}
