//! End-to-end drag sessions against the public API.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use forky_layout::{
    JsonFileStore, MemoryStore, MoveOutcome, Panel, PanelSizeModel, PanelSizes, PanelSizesPatch,
    Point, Rect, ResizeController, SharedSizes, SizeStore, DEFAULT_STORAGE_KEY,
    DEFAULT_THROTTLE_INTERVAL,
};
use insta::assert_json_snapshot;
use tempfile::TempDir;

const NO_CONTAINER: Option<Rect> = None;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn shared_with(store: Rc<RefCell<MemoryStore>>) -> SharedSizes {
    SharedSizes::new(PanelSizeModel::load(Box::new(store), DEFAULT_STORAGE_KEY))
}

fn controller_with(store: Rc<RefCell<MemoryStore>>) -> ResizeController {
    ResizeController::new(shared_with(store), DEFAULT_THROTTLE_INTERVAL)
}

#[test]
fn sidebar_clamps_to_minimum() {
    let t0 = Instant::now();
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut controller = controller_with(store.clone());

    controller.start(Panel::Sidebar, t0).unwrap();
    let outcome = controller.pointer_move(Point::new(50.0, 200.0), t0, &NO_CONTAINER);
    assert!(matches!(outcome, MoveOutcome::Scheduled(_)));

    let sizes = controller.on_frame(t0 + ms(16), &NO_CONTAINER).unwrap();
    assert_eq!(sizes.sidebar_width, 180.0);

    let stored = store.borrow().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(stored["sidebarWidth"], 180.0);
}

#[test]
fn sidebar_clamps_to_maximum() {
    let t0 = Instant::now();
    let mut controller = controller_with(Rc::new(RefCell::new(MemoryStore::new())));

    controller.start(Panel::Sidebar, t0).unwrap();
    let outcome = controller.pointer_move(Point::new(9999.0, 0.0), t0 + ms(16), &NO_CONTAINER);
    let MoveOutcome::Applied(sizes) = outcome else {
        panic!("expected an applied update, got {outcome:?}");
    };
    assert_eq!(sizes.sidebar_width, 500.0);
}

#[test]
fn hundred_samples_in_one_interval_apply_once() {
    let t0 = Instant::now();
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut controller = controller_with(store.clone());
    controller.start(Panel::Sidebar, t0).unwrap();

    let mut last_x = 0.0;
    for i in 0..100u32 {
        last_x = 200.0 + f64::from(i);
        let at = t0 + Duration::from_micros(u64::from(i) * 150);
        let outcome = controller.pointer_move(Point::new(last_x, 10.0), at, &NO_CONTAINER);
        assert!(!matches!(outcome, MoveOutcome::Applied(_)));
    }

    let sizes = controller.on_frame(t0 + ms(16), &NO_CONTAINER).unwrap();
    assert_eq!(sizes.sidebar_width, last_x);
    assert_eq!(controller.sizes().revision(), 1);
    assert_eq!(store.borrow().writes(), 1);

    // Nothing newer: the next frame is a no-op
    assert_eq!(controller.on_frame(t0 + ms(32), &NO_CONTAINER), None);
    assert_eq!(controller.sizes().revision(), 1);
}

#[test]
fn stop_before_frame_applies_nothing() {
    let t0 = Instant::now();
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut controller = controller_with(store.clone());
    controller.start(Panel::Sidebar, t0).unwrap();

    let outcome = controller.pointer_move(Point::new(420.0, 0.0), t0 + ms(2), &NO_CONTAINER);
    let MoveOutcome::Scheduled(ticket) = outcome else {
        panic!("expected a scheduled frame, got {outcome:?}");
    };
    controller.stop();

    assert_eq!(controller.fire(ticket, t0 + ms(16), &NO_CONTAINER), None);
    assert_eq!(controller.on_frame(t0 + ms(16), &NO_CONTAINER), None);
    assert_eq!(controller.sizes().revision(), 0);
    assert_eq!(store.borrow().writes(), 0);
}

#[test]
fn diff_sidebar_subtracts_live_sidebar_width() {
    let t0 = Instant::now();
    let sizes = shared_with(Rc::new(RefCell::new(MemoryStore::new())));
    sizes.set(PanelSizesPatch::for_panel(Panel::Sidebar, 300.0));

    let mut controller = ResizeController::new(sizes.clone(), DEFAULT_THROTTLE_INTERVAL);
    controller.start(Panel::DiffSidebar, t0).unwrap();
    controller.pointer_move(Point::new(700.0, 0.0), t0 + ms(1), &NO_CONTAINER);

    // Sidebar changes between sample and frame; the frame reads the live value
    sizes.set(PanelSizesPatch::for_panel(Panel::Sidebar, 250.0));
    let applied = controller.on_frame(t0 + ms(16), &NO_CONTAINER).unwrap();
    assert_eq!(applied.diff_sidebar_width, 450.0);

    controller.stop();
    sizes.set(PanelSizesPatch::for_panel(Panel::Sidebar, 300.0));
    controller.start(Panel::DiffSidebar, t0 + ms(100)).unwrap();
    let outcome = controller.pointer_move(Point::new(700.0, 0.0), t0 + ms(116), &NO_CONTAINER);
    assert_eq!(
        outcome,
        MoveOutcome::Applied(PanelSizes {
            sidebar_width: 300.0,
            commit_panel_height: 50.0,
            diff_sidebar_width: 400.0,
        })
    );
}

#[test]
fn commit_panel_measures_container_at_application() {
    let t0 = Instant::now();
    let mut controller = controller_with(Rc::new(RefCell::new(MemoryStore::new())));
    controller.start(Panel::CommitPanel, t0).unwrap();

    let before = Rect::new(0.0, 0.0, 800.0, 1000.0);
    controller.pointer_move(Point::new(0.0, 400.0), t0 + ms(1), &before);

    // Window resized before the frame
    let after = Rect::new(0.0, 0.0, 800.0, 500.0);
    let sizes = controller.on_frame(t0 + ms(16), &after).unwrap();
    assert_eq!(sizes.commit_panel_height, 80.0);
}

#[test]
fn sizes_stay_in_bounds_for_arbitrary_sequences() {
    // Small LCG so the sequence is reproducible
    let mut seed: u64 = 0x5eed_1234;
    let mut next = move || {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        seed >> 33
    };

    let t0 = Instant::now();
    let container = Rect::new(0.0, 120.0, 900.0, 640.0);
    let mut controller = controller_with(Rc::new(RefCell::new(MemoryStore::new())));
    let mut clock = 0u64;

    for _ in 0..2_000 {
        clock += next() % 12;
        let now = t0 + ms(clock);
        match next() % 6 {
            0 => {
                let panel = Panel::ALL[usize::try_from(next() % 3).unwrap()];
                let _ = controller.start(panel, now);
            }
            1 => controller.stop(),
            2 => {
                controller.on_frame(now, &container);
            }
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let point = Point::new(
                    next() as f64 % 3000.0 - 1000.0,
                    next() as f64 % 3000.0 - 1000.0,
                );
                controller.pointer_move(point, now, &container);
            }
        }
        assert!(
            controller.sizes().get().is_within_bounds(),
            "{:?}",
            controller.sizes().get()
        );
    }
}

#[test]
fn unset_key_loads_defaults_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let store = JsonFileStore::new(&path);
    assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());

    let sizes = SharedSizes::new(PanelSizeModel::load(Box::new(store), DEFAULT_STORAGE_KEY));
    assert_eq!(sizes.get(), PanelSizes::default());

    sizes.set(PanelSizesPatch {
        sidebar_width: Some(333.0),
        commit_panel_height: Some(44.0),
        diff_sidebar_width: None,
    });

    let reopened = PanelSizeModel::load(Box::new(JsonFileStore::new(&path)), DEFAULT_STORAGE_KEY);
    assert_eq!(reopened.get(), sizes.get());
}

#[test]
fn persisted_record_format() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let sizes = shared_with(store.clone());
    sizes.reset();

    let stored = store.borrow().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_json_snapshot!(stored, @r#"
    {
      "commitPanelHeight": 50.0,
      "diffSidebarWidth": 300.0,
      "sidebarWidth": 260.0
    }
    "#);
}
