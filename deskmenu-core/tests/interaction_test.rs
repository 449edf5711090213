use deskmenu_core::config::MenuConfig;
use deskmenu_core::input::{InputDispatcher, PointerButton, PointerEvent, PointerOutcome};
use deskmenu_core::kurbo::Point;
use deskmenu_core::menu::{
    ApproximateMetrics, HostEvent, ItemId, MenuId, MenuOption, MenuSessionManager, MenuTree,
    RecordingHost, SpawnRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn desktop_menu(clicks: Arc<AtomicUsize>) -> Vec<MenuOption> {
    vec![
        MenuOption::submenu(
            "View",
            vec![
                MenuOption::new("Large icons"),
                MenuOption::new("Show file extensions").with_action(move || {
                    clicks.fetch_add(1, Ordering::SeqCst);
                }),
            ],
        ),
        MenuOption::submenu(
            "Sort by",
            vec![MenuOption::new("Name"), MenuOption::new("Item type")],
        ),
        MenuOption::new("Display settings"),
    ]
}

fn setup(host: RecordingHost) -> (MenuSessionManager, InputDispatcher) {
    let config = MenuConfig::default();
    let mut tree = MenuTree::new(config.style.clone(), ApproximateMetrics::default()).with_host(host);
    tree.set_viewport(config.viewport);
    (
        MenuSessionManager::with_tree(tree),
        InputDispatcher::new(config.reconcile_interval),
    )
}

fn center_of_item(session: &MenuSessionManager, item: ItemId) -> Point {
    session.tree().item_bounds(item).unwrap().center()
}

fn items(session: &MenuSessionManager, menu: MenuId) -> Vec<ItemId> {
    session.tree().menu(menu).unwrap().items().to_vec()
}

fn submenu_of(session: &MenuSessionManager, item: ItemId) -> MenuId {
    session.tree().item(item).unwrap().submenu().unwrap()
}

fn move_to(dispatcher: &mut InputDispatcher, session: &mut MenuSessionManager, point: Point, t: u64) {
    dispatcher.pointer_move(session, &PointerEvent::moved(point.x, point.y, t));
}

#[test]
fn test_hover_into_submenu_survives_reconciliation() {
    let (mut session, mut dispatcher) = setup(RecordingHost::new());
    let root = session.spawn_menu(SpawnRequest::new(100.0, 100.0, desktop_menu(Arc::default())));
    let root_items = items(&session, root);
    let view_menu = submenu_of(&session, root_items[0]);

    let point = center_of_item(&session, root_items[0]);
    move_to(&mut dispatcher, &mut session, point, 1);
    assert!(session.tree().is_shown(view_menu));
    assert!(session.tree().item(root_items[0]).unwrap().is_highlighted());

    let target = center_of_item(&session, items(&session, view_menu)[0]);
    move_to(&mut dispatcher, &mut session, target, 2);

    let start = Instant::now();
    assert!(!dispatcher.tick(&mut session, start));
    assert!(!dispatcher.tick(&mut session, start + Duration::from_millis(50)));
    assert!(session.tree().is_shown(view_menu));
    assert!(!session.tree().item(root_items[0]).unwrap().is_highlighted());
}

#[test]
fn test_hover_sibling_swaps_submenus() {
    let (mut session, mut dispatcher) = setup(RecordingHost::new());
    let root = session.spawn_menu(SpawnRequest::new(100.0, 100.0, desktop_menu(Arc::default())));
    let root_items = items(&session, root);
    let view_menu = submenu_of(&session, root_items[0]);
    let sort_menu = submenu_of(&session, root_items[1]);

    let point = center_of_item(&session, root_items[0]);
    move_to(&mut dispatcher, &mut session, point, 1);
    let point = center_of_item(&session, root_items[1]);
    move_to(&mut dispatcher, &mut session, point, 2);

    assert!(!session.tree().is_shown(view_menu));
    assert!(session.tree().is_shown(sort_menu));
    dispatcher.tick(&mut session, Instant::now());
    assert!(session.tree().is_shown(sort_menu));
}

#[test]
fn test_leaving_tree_closes_submenu_on_tick() {
    let host = RecordingHost::new();
    let (mut session, mut dispatcher) = setup(host.clone());
    let root = session.spawn_menu(SpawnRequest::new(100.0, 100.0, desktop_menu(Arc::default())));
    let root_items = items(&session, root);
    let view_menu = submenu_of(&session, root_items[0]);

    let point = center_of_item(&session, root_items[0]);
    move_to(&mut dispatcher, &mut session, point, 1);
    move_to(&mut dispatcher, &mut session, Point::new(1500.0, 900.0), 2);
    // Exit alone does not close it.
    assert!(session.tree().is_shown(view_menu));

    assert!(dispatcher.tick(&mut session, Instant::now()));
    assert!(!session.tree().is_shown(view_menu));
    assert_eq!(session.active_root(), Some(root));
    assert!(host.events().contains(&HostEvent::Visibility(view_menu, false)));
}

#[test]
fn test_click_leaf_in_submenu_collapses_everything() {
    let clicks = Arc::new(AtomicUsize::new(0));
    let host = RecordingHost::new();
    let (mut session, mut dispatcher) = setup(host.clone());
    let root = session.spawn_menu(SpawnRequest::new(100.0, 100.0, desktop_menu(clicks.clone())));
    let root_items = items(&session, root);
    let view_menu = submenu_of(&session, root_items[0]);
    let chain = session.tree().chain(root);

    let point = center_of_item(&session, root_items[0]);
    move_to(&mut dispatcher, &mut session, point, 1);
    let leaf = center_of_item(&session, items(&session, view_menu)[1]);
    move_to(&mut dispatcher, &mut session, leaf, 2);

    let outcome = dispatcher.pointer_down(
        &mut session,
        &PointerEvent::down(leaf.x, leaf.y, PointerButton::Primary, 3),
    );

    assert_eq!(outcome, PointerOutcome::Activated);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert_eq!(session.active_root(), None);
    assert_eq!(session.tree().menu_count(), 0);
    assert_eq!(dispatcher.under_pointer(), None);
    let destroyed = host.destroyed();
    assert_eq!(destroyed.len(), chain.len());
    assert_eq!(destroyed.last(), Some(&root));
}

#[test]
fn test_right_click_elsewhere_dismisses_then_respawns() {
    let (mut session, mut dispatcher) = setup(RecordingHost::new());
    let first = session.spawn_menu(SpawnRequest::new(100.0, 100.0, desktop_menu(Arc::default())));

    let press = PointerEvent::down(800.0, 600.0, PointerButton::Secondary, 10);
    let outcome = dispatcher.pointer_down(&mut session, &press);
    assert_eq!(outcome, PointerOutcome::Dismissed);
    assert!(!outcome.is_consumed());
    assert!(!session.tree().is_alive(first));

    let second = session.spawn_for_event(
        SpawnRequest::new(press.position.x, press.position.y, desktop_menu(Arc::default())),
        press.timestamp,
    );
    assert_eq!(session.active_root(), Some(second));

    // A host that also routes the spawning press to the session listener must not lose the menu.
    assert_eq!(dispatcher.pointer_down(&mut session, &press), PointerOutcome::Ignored);
    assert_eq!(session.active_root(), Some(second));
}

#[test]
fn test_press_on_parent_item_is_inside() {
    let (mut session, mut dispatcher) = setup(RecordingHost::new());
    let root = session.spawn_menu(SpawnRequest::new(100.0, 100.0, desktop_menu(Arc::default())));
    let parent_item = center_of_item(&session, items(&session, root)[0]);

    let outcome = dispatcher.pointer_down(
        &mut session,
        &PointerEvent::down(parent_item.x, parent_item.y, PointerButton::Primary, 1),
    );
    assert_eq!(outcome, PointerOutcome::Inside);
    assert_eq!(session.active_root(), Some(root));
}
