// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pointer input dispatch for menus
//!
//! The [InputDispatcher] is the single place that hit-tests pointer events against the open
//! menu chain. It turns raw moves into enter/exit calls on [PointerTarget]s, routes presses
//! either to the item under the pointer or to the session's outside-click check, and drives
//! the hover reconciliation timer.

use std::time::{Duration, Instant};
use vello::kurbo::Point;

use crate::menu::hover::ReconcileTimer;
use crate::menu::session::MenuSessionManager;
use crate::menu::ItemId;

/// Mouse button of a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button.
    Primary,
    /// Right button (usually opens context menus).
    Secondary,
    /// Middle button.
    Middle,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub position: Point,
    /// Pressed button, [None] for moves.
    pub button: Option<PointerButton>,
    /// Host timestamp of the event. Identifies one physical press across listeners.
    pub timestamp: u64,
}

impl PointerEvent {
    /// A pointer move to `(x, y)`.
    pub fn moved(x: f64, y: f64, timestamp: u64) -> Self {
        Self {
            position: Point::new(x, y),
            button: None,
            timestamp,
        }
    }

    /// A press of `button` at `(x, y)`.
    pub fn down(x: f64, y: f64, button: PointerButton, timestamp: u64) -> Self {
        Self {
            position: Point::new(x, y),
            button: Some(button),
            timestamp,
        }
    }
}

/// What happened to a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// No menu was open; the event is free for other collaborators.
    Unhandled,
    /// The press that spawned the open menu; nothing happened.
    Ignored,
    /// The press landed inside the open chain but did not activate anything.
    Inside,
    /// A leaf item ran its action and the whole chain was closed.
    Activated,
    /// The press landed outside the chain, which was closed.
    Dismissed,
}

impl PointerOutcome {
    /// Check if the menu subsystem consumed the event.
    ///
    /// A dismissing press is not consumed: the collaborator under the pointer may still act on
    /// it, e.g. open a new context menu with a right click.
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Ignored | Self::Inside | Self::Activated)
    }
}

/// Pointer capabilities of an interactive menu element.
pub trait PointerTarget {
    /// The pointer moved onto the element.
    fn on_pointer_enter(&mut self);

    /// The pointer moved off the element.
    fn on_pointer_exit(&mut self);

    /// The pointer was pressed over the element.
    fn on_pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome;
}

/// Routes pointer events to the menu session.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    pointer: Option<Point>,
    under_pointer: Option<ItemId>,
    timer: ReconcileTimer,
}

impl InputDispatcher {
    /// Create a dispatcher running hover reconciliation every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            pointer: None,
            under_pointer: None,
            timer: ReconcileTimer::new(interval),
        }
    }

    /// Last known pointer position.
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    /// Item the dispatcher last reported as entered.
    pub fn under_pointer(&self) -> Option<ItemId> {
        self.under_pointer
    }

    /// Handle a pointer move: exit the item left behind, enter the item now under the pointer.
    pub fn pointer_move(&mut self, session: &mut MenuSessionManager, event: &PointerEvent) {
        self.pointer = Some(event.position);
        let target = session.item_at(event.position);
        if target == self.under_pointer {
            return;
        }

        if let Some(left) = self.under_pointer {
            if let Some(mut item) = session.item(left) {
                item.on_pointer_exit();
            }
        }
        if let Some(entered) = target {
            if let Some(mut item) = session.item(entered) {
                item.on_pointer_enter();
            }
        }
        self.under_pointer = target;
    }

    /// Handle a pointer-down.
    ///
    /// Chain membership is read before anything mutates: a press inside the chain goes to the
    /// item under the pointer, a press outside goes to the session's dismissal path, never both.
    pub fn pointer_down(
        &mut self,
        session: &mut MenuSessionManager,
        event: &PointerEvent,
    ) -> PointerOutcome {
        self.pointer = Some(event.position);
        let target = session.item_at(event.position);

        let outcome = match session.handle_pointer_down(event) {
            PointerOutcome::Inside => match target {
                Some(id) => match session.item(id) {
                    Some(mut item) => item.on_pointer_down(event),
                    None => PointerOutcome::Inside,
                },
                None => PointerOutcome::Inside,
            },
            outcome => outcome,
        };

        if self
            .under_pointer
            .is_some_and(|id| !session.tree().is_item_alive(id))
        {
            self.under_pointer = None;
        }
        outcome
    }

    /// Run the reconciliation pass if its interval has elapsed at `now`.
    ///
    /// Returns `true` if a submenu was hidden.
    pub fn tick(&mut self, session: &mut MenuSessionManager, now: Instant) -> bool {
        if !self.timer.due(now) {
            return false;
        }
        match self.pointer {
            Some(pointer) => session.reconcile_hover(pointer),
            None => false,
        }
    }
}
