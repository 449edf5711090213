use deskmenu::core::menu::{ApproximateMetrics, Menu, MenuTree};
use deskmenu::prelude::*;
use std::time::{Duration, Instant};

const TASKBAR_HEIGHT: f64 = 40.0;

const BACKGROUND: OwnerId = OwnerId(1);
const ICON: OwnerId = OwnerId(2);
const TASKBAR: OwnerId = OwnerId(3);

/// Prints what a renderer would do with each notification.
struct LogHost;

impl MenuHost for LogHost {
    fn menu_built(&mut self, id: MenuId, menu: &Menu) {
        log::info!("draw menu {:?} at {:?} ({} items)", id, menu.bounds(), menu.items().len());
    }

    fn menu_destroyed(&mut self, id: MenuId) {
        log::info!("release menu {:?}", id);
    }

    fn submenu_visibility_changed(&mut self, id: MenuId, visible: bool) {
        log::info!("{} submenu {:?}", if visible { "show" } else { "hide" }, id);
    }

    fn menu_moved(&mut self, id: MenuId, menu: &Menu) {
        log::debug!("move menu {:?} to {:?}", id, menu.bounds());
    }
}

/// The scene: who is under the pointer when the menu subsystem passes on a press.
struct Desktop {
    viewport: Vector2<f64>,
    icon: Rect,
}

impl Desktop {
    fn new(viewport: Vector2<f64>) -> Self {
        Self {
            viewport,
            icon: Rect::new(20.0, 20.0, 84.0, 84.0),
        }
    }

    fn taskbar(&self) -> Rect {
        Rect::new(0.0, self.viewport.y - TASKBAR_HEIGHT, self.viewport.x, self.viewport.y)
    }

    fn owner_at(&self, point: Point) -> OwnerId {
        if self.icon.contains(point) {
            ICON
        } else if self.taskbar().contains(point) {
            TASKBAR
        } else {
            BACKGROUND
        }
    }

    fn menu_for(&self, owner: OwnerId, at: Point) -> SpawnRequest {
        match owner {
            ICON => SpawnRequest::new(
                at.x,
                at.y,
                vec![
                    MenuOption::new("Open").with_action(|| log::info!("opening Trash")),
                    MenuOption::new("Empty Trash").with_action(|| log::info!("emptying Trash")),
                    MenuOption::new("Properties"),
                ],
            )
            .with_owner(ICON),
            _ => SpawnRequest::new(
                at.x,
                at.y,
                vec![
                    MenuOption::submenu(
                        "View",
                        vec![
                            MenuOption::new("Large icons"),
                            MenuOption::new("Small icons"),
                            MenuOption::new("Auto arrange").with_action(|| log::info!("arranging icons")),
                        ],
                    ),
                    MenuOption::submenu(
                        "New",
                        vec![
                            MenuOption::new("Folder").with_action(|| log::info!("new folder")),
                            MenuOption::submenu(
                                "Document",
                                vec![MenuOption::new("Text Document"), MenuOption::new("Spreadsheet")],
                            ),
                        ],
                    ),
                    MenuOption::new("Refresh").with_action(|| log::info!("refreshing desktop")),
                ],
            )
            .with_owner(BACKGROUND),
        }
    }
}

struct Shell {
    desktop: Desktop,
    session: MenuSessionManager,
    dispatcher: InputDispatcher,
    clock: Instant,
    timestamp: u64,
}

impl Shell {
    fn new(config: &MenuConfig) -> Self {
        let mut tree = MenuTree::new(config.style.clone(), ApproximateMetrics::default()).with_host(LogHost);
        tree.set_viewport(config.viewport);
        Self {
            desktop: Desktop::new(config.viewport),
            session: MenuSessionManager::with_tree(tree),
            dispatcher: InputDispatcher::new(config.reconcile_interval),
            clock: Instant::now(),
            timestamp: 0,
        }
    }

    fn next_timestamp(&mut self) -> u64 {
        self.timestamp += 1;
        self.timestamp
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let event = PointerEvent::moved(x, y, self.next_timestamp());
        self.dispatcher.pointer_move(&mut self.session, &event);
        self.advance(Duration::from_millis(60));
    }

    fn press(&mut self, x: f64, y: f64, button: PointerButton) {
        let event = PointerEvent::down(x, y, button, self.next_timestamp());
        let outcome = self.dispatcher.pointer_down(&mut self.session, &event);
        log::info!("press {:?} at ({}, {}) -> {:?}", button, x, y, outcome);
        if outcome.is_consumed() || button != PointerButton::Secondary {
            return;
        }

        let owner = self.desktop.owner_at(event.position);
        if owner == TASKBAR {
            self.open_taskbar_menu(event.position, event.timestamp);
        } else {
            let request = self.desktop.menu_for(owner, event.position);
            self.session.spawn_for_event(request, event.timestamp);
        }

        // The scene-wide listener sees the same press after the collaborator did.
        let echo = self.session.handle_pointer_down(&event);
        log::debug!("spawning press echoed to the session: {:?}", echo);
    }

    /// The taskbar menu sits on top of the bar, so it is placed once its height is known.
    fn open_taskbar_menu(&mut self, at: Point, timestamp: u64) {
        let options = vec![
            MenuOption::new("Task Manager").with_action(|| log::info!("task manager")),
            MenuOption::submenu(
                "Toolbars",
                vec![MenuOption::new("Address"), MenuOption::new("Links")],
            ),
            MenuOption::new("Lock the taskbar"),
        ];
        let tree = self.session.tree_mut();
        let root = tree.build_menu(Vector2::new(at.x, at.y), options, None);
        tree.set_owner(root, Some(TASKBAR));
        let height = tree.menu(root).map(|menu| menu.height()).unwrap_or(0.0);
        tree.adjust_position(root, None, Some(self.desktop.taskbar().y0 - height));
        self.session.spawn_root_for_event(root, timestamp);
    }

    fn advance(&mut self, by: Duration) {
        self.clock += by;
        if self.dispatcher.tick(&mut self.session, self.clock) {
            log::info!("reconciliation closed a submenu");
        }
    }

    /// Center of the item reached by following `path` from the open root, one index per level.
    fn item_center(&self, path: &[usize]) -> Option<Point> {
        let tree = self.session.tree();
        let mut menu = self.session.active_root()?;
        let mut item = None;
        for index in path {
            if let Some(parent) = item {
                menu = tree.item(parent)?.submenu()?;
            }
            item = Some(*tree.menu(menu)?.items().get(*index)?);
        }
        Some(tree.item_bounds(item?)?.center())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match smol::block_on(SettingsRegistry::new()) {
        Ok(registry) => registry.menu_config().clone(),
        Err(e) => {
            log::warn!("Falling back to default menu settings: {}", e);
            MenuConfig::default()
        },
    };
    let mut shell = Shell::new(&config);

    // Right-click the background, walk into "View", then leave the menu.
    shell.press(600.0, 400.0, PointerButton::Secondary);
    if let Some(view) = shell.item_center(&[0]) {
        shell.move_to(view.x, view.y);
    }
    shell.move_to(1200.0, 700.0);

    // Open "New", slide over "Document", then pick "Folder".
    if let Some(new) = shell.item_center(&[1]) {
        shell.move_to(new.x, new.y);
    }
    if let Some(document) = shell.item_center(&[1, 1]) {
        shell.move_to(document.x, document.y);
    }
    if let Some(folder) = shell.item_center(&[1, 0]) {
        shell.move_to(folder.x, folder.y);
        shell.press(folder.x, folder.y, PointerButton::Primary);
    }

    // The icon opens its own menu, then closes it (e.g. because it is being deleted).
    shell.press(50.0, 50.0, PointerButton::Secondary);
    if shell.session.destroy_owned_by(ICON) {
        log::info!("icon closed its menu");
    }

    // Taskbar menu is hard-placed above the bar; a click elsewhere dismisses it.
    let bar = shell.desktop.taskbar().center();
    shell.press(bar.x, bar.y, PointerButton::Secondary);
    shell.press(300.0, 300.0, PointerButton::Primary);

    log::info!("{} menus alive at exit", shell.session.tree().menu_count());
}
