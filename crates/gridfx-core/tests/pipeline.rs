//! Drives the open/close pipelines against a scripted surface.
//!
//! The surface parks every wait (animation frame, transition end, image
//! load) until the test fires it, so each step of a cycle can be inspected.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use gridfx_core::{
    GridController, GridError, GridHooks, GridItem, GridOptions, GridState, GridSurface,
    ImagePosition, Phase, PreviewClass, Rect, RequestOutcome, Size, Transform,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MockImage(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wait {
    Frame,
    Transition(MockImage),
    ImageReady(MockImage),
}

#[derive(Default)]
struct MockSurface {
    log: RefCell<Vec<String>>,
    pending: RefCell<Vec<(Wait, oneshot::Sender<()>)>>,
    next_id: Cell<u32>,
    attached: RefCell<BTreeSet<u32>>,
    preview_classes: RefCell<BTreeSet<&'static str>>,
    current_items: RefCell<BTreeSet<usize>>,
    fail_clone: Cell<bool>,
    zero_thumbnail: Cell<bool>,
}

impl MockSurface {
    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }

    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn new_image(&self) -> MockImage {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.attached.borrow_mut().insert(id);
        MockImage(id)
    }

    /// Resolve the oldest pending wait matching `wait`.
    fn fire(&self, wait: Wait) -> bool {
        let mut pending = self.pending.borrow_mut();
        let Some(pos) = pending.iter().position(|(w, _)| *w == wait) else {
            return false;
        };
        let (_, tx) = pending.remove(pos);
        tx.send(()).is_ok()
    }

    fn pending_waits(&self) -> Vec<Wait> {
        self.pending.borrow().iter().map(|(w, _)| *w).collect()
    }

    fn has_preview_class(&self, class: PreviewClass) -> bool {
        self.preview_classes.borrow().contains(class.as_str())
    }

    async fn park(&self, wait: Wait) {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((wait, tx));
        let _ = rx.await;
    }
}

impl GridSurface for MockSurface {
    type Image = MockImage;

    fn viewport(&self) -> Size {
        Size::new(1000.0, 800.0)
    }

    fn thumbnail_rect(&self, index: usize) -> Rect {
        let left = 100.0 + index as f64 * 150.0;
        if self.zero_thumbnail.get() {
            return Rect::new(left, 50.0, 0.0, 0.0);
        }
        Rect::new(left, 50.0, 120.0, 90.0)
    }

    fn thumbnail_layout(&self, index: usize) -> Rect {
        self.thumbnail_rect(index)
    }

    fn create_clone(&self, index: usize, layout: Rect) -> Result<MockImage, GridError> {
        if self.fail_clone.get() {
            return Err(GridError::Dom("createElement failed".into()));
        }
        let image = self.new_image();
        self.record(format!(
            "create_clone item={index} at {},{} {}x{} -> image#{}",
            layout.left, layout.top, layout.width, layout.height, image.0
        ));
        Ok(image)
    }

    fn create_original(&self, src: &str) -> Result<MockImage, GridError> {
        let image = self.new_image();
        self.record(format!("create_original {src} -> image#{}", image.0));
        Ok(image)
    }

    fn set_transform(&self, image: &MockImage, transform: &Transform) {
        self.record(format!("transform image#{} {}", image.0, transform.to_css()));
    }

    fn set_opacity(&self, image: &MockImage, opacity: f64) {
        self.record(format!("opacity image#{} {opacity}", image.0));
    }

    fn detach(&self, image: MockImage) {
        self.attached.borrow_mut().remove(&image.0);
        self.record(format!("detach image#{}", image.0));
    }

    fn set_item_current(&self, index: usize, current: bool) {
        if current {
            self.current_items.borrow_mut().insert(index);
        } else {
            self.current_items.borrow_mut().remove(&index);
        }
        self.record(format!("item {index} current={current}"));
    }

    fn set_preview_class(&self, class: PreviewClass, on: bool) {
        if on {
            self.preview_classes.borrow_mut().insert(class.as_str());
        } else {
            self.preview_classes.borrow_mut().remove(class.as_str());
        }
        self.record(format!("preview {}={on}", class.as_str()));
    }

    fn show_description(&self, index: usize) {
        self.record(format!("description {index}"));
    }

    fn clear_description(&self) {
        self.record("clear_description".to_string());
    }

    async fn next_frame(&self) {
        self.record("wait frame".to_string());
        self.park(Wait::Frame).await;
    }

    async fn transition_end(&self, image: &MockImage) {
        self.record(format!("wait transition image#{}", image.0));
        self.park(Wait::Transition(*image)).await;
    }

    async fn image_ready(&self, image: &MockImage) {
        self.record(format!("wait image_ready image#{}", image.0));
        self.park(Wait::ImageReady(*image)).await;
    }
}

#[derive(Default)]
struct RecordingHooks {
    calls: RefCell<Vec<String>>,
}

impl RecordingHooks {
    fn push(&self, name: &str, state: GridState) {
        self.calls
            .borrow_mut()
            .push(format!("{name} {:?} {:?}", state.phase(), state.current()));
    }
}

impl GridHooks for RecordingHooks {
    fn on_init(&self, state: GridState) -> bool {
        self.push("on_init", state);
        true
    }

    fn on_resize(&self, state: GridState) -> bool {
        self.push("on_resize", state);
        true
    }

    fn on_open_item(&self, state: GridState, _index: usize) -> bool {
        self.push("on_open_item", state);
        // Returning false must not stop the open.
        false
    }

    fn on_close_item(&self, state: GridState, _index: usize) -> bool {
        self.push("on_close_item", state);
        true
    }

    fn on_expand(&self, state: GridState) -> bool {
        self.push("on_expand", state);
        true
    }
}

type TestGrid = GridController<MockSurface, RecordingHooks>;

fn make_grid() -> Rc<TestGrid> {
    let items = (0..4)
        .map(|i| GridItem::new(format!("img/large/{i}.jpg"), Size::new(600.0, 400.0)))
        .collect();
    let options = GridOptions {
        page_margin: 20.0,
        image_position: ImagePosition::new(0.3, -0.2),
    };
    let grid = GridController::new(
        MockSurface::default(),
        RecordingHooks::default(),
        options,
        items,
    )
    .unwrap();
    Rc::new(grid)
}

type Outcome = Rc<RefCell<Option<Result<RequestOutcome, GridError>>>>;

fn spawn_open(pool: &LocalPool, grid: &Rc<TestGrid>, index: usize) -> Outcome {
    let outcome: Outcome = Rc::new(RefCell::new(None));
    let (grid, slot) = (grid.clone(), outcome.clone());
    pool.spawner()
        .spawn_local(async move {
            let result = grid.open_item(index).await;
            *slot.borrow_mut() = Some(result);
        })
        .unwrap();
    outcome
}

fn spawn_close(pool: &LocalPool, grid: &Rc<TestGrid>) -> Outcome {
    let outcome: Outcome = Rc::new(RefCell::new(None));
    let (grid, slot) = (grid.clone(), outcome.clone());
    pool.spawner()
        .spawn_local(async move {
            let result = grid.close_item().await;
            *slot.borrow_mut() = Some(result);
        })
        .unwrap();
    outcome
}

/// Open `index` all the way to `Phase::Open`.
fn open_fully(pool: &mut LocalPool, grid: &Rc<TestGrid>, index: usize) {
    let outcome = spawn_open(pool, grid, index);
    pool.run_until_stalled();
    let surface = grid.surface();
    assert!(surface.fire(Wait::Frame));
    pool.run_until_stalled();
    assert!(surface.fire(Wait::Transition(MockImage(1))));
    pool.run_until_stalled();
    assert!(surface.fire(Wait::ImageReady(MockImage(0))));
    pool.run_until_stalled();
    assert!(surface.fire(Wait::Transition(MockImage(0))));
    pool.run_until_stalled();
    assert_eq!(*outcome.borrow(), Some(Ok(RequestOutcome::Completed)));
}

#[test]
fn test_full_open_close_cycle() {
    let mut pool = LocalPool::new();
    let grid = make_grid();
    let surface = grid.surface();

    let open = spawn_open(&pool, &grid, 2);
    pool.run_until_stalled();

    assert_eq!(grid.state().phase(), Phase::Opening);
    assert_eq!(grid.state().current(), Some(2));
    assert!(grid.state().is_expanded());
    assert!(grid.state().is_animating());
    assert!(!surface.has_preview_class(PreviewClass::Open));
    assert_eq!(surface.pending_waits(), vec![Wait::Frame]);

    assert!(surface.fire(Wait::Frame));
    pool.run_until_stalled();
    assert!(surface.has_preview_class(PreviewClass::Open));
    assert_eq!(
        surface.pending_waits(),
        vec![Wait::Transition(MockImage(1))]
    );

    // Transform transition end always comes before the image-load wait.
    assert!(surface.fire(Wait::Transition(MockImage(1))));
    pool.run_until_stalled();
    assert_eq!(surface.pending_waits(), vec![Wait::ImageReady(MockImage(0))]);
    assert!(!surface.has_preview_class(PreviewClass::ImageLoaded));

    assert!(surface.fire(Wait::ImageReady(MockImage(0))));
    pool.run_until_stalled();
    assert!(surface.has_preview_class(PreviewClass::ImageLoaded));
    assert_eq!(grid.state().phase(), Phase::Opening);

    assert!(surface.fire(Wait::Transition(MockImage(0))));
    pool.run_until_stalled();

    assert_eq!(*open.borrow(), Some(Ok(RequestOutcome::Completed)));
    assert_eq!(grid.state().phase(), Phase::Open);
    assert_eq!(grid.state().current(), Some(2));
    assert!(!grid.state().is_animating());
    assert!(surface.has_preview_class(PreviewClass::Open));
    assert!(surface.has_preview_class(PreviewClass::ImageLoaded));
    assert!(surface.current_items.borrow().contains(&2));
    // The clone is hidden once the full image has faded in.
    assert_eq!(
        surface.log().last().map(String::as_str),
        Some("opacity image#1 0")
    );

    let close = spawn_close(&pool, &grid);
    pool.run_until_stalled();
    assert_eq!(grid.state().phase(), Phase::Closing);
    assert!(!surface.has_preview_class(PreviewClass::Open));
    assert!(!surface.has_preview_class(PreviewClass::ImageLoaded));
    assert!(surface.current_items.borrow().is_empty());

    assert!(surface.fire(Wait::Frame));
    pool.run_until_stalled();
    assert!(surface.fire(Wait::Transition(MockImage(1))));
    pool.run_until_stalled();

    assert_eq!(*close.borrow(), Some(Ok(RequestOutcome::Completed)));
    assert_eq!(grid.state(), GridState::default());
    assert_eq!(grid.state().current(), None);
    assert!(!grid.has_clone());
    assert!(!grid.has_original());
    assert!(surface.attached.borrow().is_empty());
    assert!(surface.pending_waits().is_empty());

    insta::assert_snapshot!("open_close_cycle", surface.log().join("\n"));
}

#[test]
fn test_requests_ignored_while_opening() {
    let mut pool = LocalPool::new();
    let grid = make_grid();

    let first = spawn_open(&pool, &grid, 0);
    pool.run_until_stalled();
    assert!(grid.state().is_animating());

    let second = spawn_open(&pool, &grid, 1);
    let close = spawn_close(&pool, &grid);
    pool.run_until_stalled();

    assert_eq!(*second.borrow(), Some(Ok(RequestOutcome::Ignored)));
    assert_eq!(*close.borrow(), Some(Ok(RequestOutcome::Ignored)));
    assert_eq!(grid.state().current(), Some(0));
    assert_eq!(grid.state().phase(), Phase::Opening);
    assert!(first.borrow().is_none());
}

#[test]
fn test_open_ignored_while_open() {
    let mut pool = LocalPool::new();
    let grid = make_grid();
    open_fully(&mut pool, &grid, 1);

    let log_len = grid.surface().log().len();
    let again = spawn_open(&pool, &grid, 3);
    pool.run_until_stalled();

    assert_eq!(*again.borrow(), Some(Ok(RequestOutcome::Ignored)));
    assert_eq!(grid.state().current(), Some(1));
    assert_eq!(grid.state().phase(), Phase::Open);
    assert_eq!(grid.surface().log().len(), log_len);
}

#[test]
fn test_close_ignored_while_closing_and_when_closed() {
    let mut pool = LocalPool::new();
    let grid = make_grid();

    let idle = spawn_close(&pool, &grid);
    pool.run_until_stalled();
    assert_eq!(*idle.borrow(), Some(Ok(RequestOutcome::Ignored)));

    open_fully(&mut pool, &grid, 0);
    let first = spawn_close(&pool, &grid);
    pool.run_until_stalled();
    let second = spawn_close(&pool, &grid);
    pool.run_until_stalled();

    assert_eq!(*second.borrow(), Some(Ok(RequestOutcome::Ignored)));
    assert!(first.borrow().is_none());
    assert_eq!(grid.state().phase(), Phase::Closing);
}

#[test]
fn test_hooks_fire_in_order_and_do_not_gate() {
    let mut pool = LocalPool::new();
    let grid = make_grid();
    grid.init();
    open_fully(&mut pool, &grid, 2);

    spawn_close(&pool, &grid);
    pool.run_until_stalled();
    grid.surface().fire(Wait::Frame);
    pool.run_until_stalled();
    grid.surface().fire(Wait::Transition(MockImage(1)));
    pool.run_until_stalled();

    assert_eq!(
        *grid.hooks().calls.borrow(),
        vec![
            "on_init Closed None",
            "on_open_item Opening Some(2)",
            "on_expand Opening Some(2)",
            "on_close_item Closing Some(2)",
        ]
    );
}

#[test]
fn test_open_out_of_range() {
    let mut pool = LocalPool::new();
    let grid = make_grid();
    let outcome = spawn_open(&pool, &grid, 9);
    pool.run_until_stalled();
    assert_eq!(
        *outcome.borrow(),
        Some(Err(GridError::ItemOutOfRange { index: 9, len: 4 }))
    );
    assert_eq!(grid.state(), GridState::default());
}

#[test]
fn test_failed_clone_restores_closed_state() {
    let mut pool = LocalPool::new();
    let grid = make_grid();
    grid.surface().fail_clone.set(true);

    let outcome = spawn_open(&pool, &grid, 1);
    pool.run_until_stalled();

    assert!(matches!(*outcome.borrow(), Some(Err(GridError::Dom(_)))));
    assert_eq!(grid.state(), GridState::default());
    assert!(!grid.has_clone());
    assert!(!grid.has_original());
    assert!(grid.surface().attached.borrow().is_empty());
}

#[test]
fn test_zero_size_thumbnail_aborts_open() {
    let mut pool = LocalPool::new();
    let grid = make_grid();
    grid.surface().zero_thumbnail.set(true);

    let outcome = spawn_open(&pool, &grid, 1);
    pool.run_until_stalled();

    assert_eq!(
        *outcome.borrow(),
        Some(Err(GridError::DegenerateThumbnail {
            index: 1,
            width: 0.0,
            height: 0.0,
        }))
    );
    assert_eq!(grid.state(), GridState::default());
    assert!(!grid.has_clone());
    assert!(!grid.has_original());
    assert!(grid.surface().pending_waits().is_empty());
    assert!(
        !grid
            .surface()
            .log()
            .iter()
            .any(|entry| entry.starts_with("transform") || entry.starts_with("create_"))
    );

    // Once the thumbnail is laid out the grid opens normally.
    grid.surface().zero_thumbnail.set(false);
    open_fully(&mut pool, &grid, 1);
    assert_eq!(grid.state().phase(), Phase::Open);
}

#[test]
fn test_resize_throttled() {
    use std::time::Duration;
    use web_time::Instant;

    let grid = make_grid();
    let start = Instant::now();

    let fired = (0..5)
        .filter(|i| grid.handle_resize_at(start + Duration::from_millis(*i * 2)))
        .count();
    assert_eq!(fired, 1);
    assert!(grid.handle_resize_at(start + Duration::from_millis(11)));

    assert_eq!(
        *grid.hooks().calls.borrow(),
        vec!["on_resize Closed None", "on_resize Closed None"]
    );
}

#[test]
fn test_construction_rejects_empty_grid() {
    let result: Result<GridController<MockSurface>, _> = GridController::new(
        MockSurface::default(),
        gridfx_core::NoHooks,
        GridOptions::default(),
        Vec::new(),
    );
    assert!(matches!(result, Err(GridError::NoItems)));
}
