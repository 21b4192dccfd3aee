//! End-to-end animation through the public API with the reference timer
//! engine and frame queue standing in for the host UI loop.

use std::cell::RefCell;
use std::rc::Rc;

use glide_animation::{
    AnimatedView, AnimatorConfig, AnimatorError, Easing, FallbackAnimator, FrameQueue, Property,
    PropertyAnimator, PropertySet, PropertyValues, TimerEvent, TimerId, Timers, ViewProperties,
    ViewPropertyAnimator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Host {
    view: Rc<RefCell<ViewProperties>>,
    timers: Timers,
    queue: FrameQueue,
}

impl Host {
    fn new(view: ViewProperties) -> Self {
        init_tracing();
        Self {
            view: Rc::new(RefCell::new(view)),
            timers: Timers::new(),
            queue: FrameQueue::new(),
        }
    }

    fn animator(&self) -> Animator {
        let mut animator = ViewPropertyAnimator::fallback(
            self.view.clone(),
            self.timers.clone(),
            self.queue.clone(),
        );
        animator
            .set_duration(100)
            .unwrap()
            .set_interpolator(Easing::Linear);
        animator
    }

    /// One UI frame: deferred tasks first, then timers.
    fn frame(&self, dt_ms: f32) {
        self.queue.run_pending();
        self.timers.tick(dt_ms);
    }

    fn get(&self, property: Property) -> f32 {
        self.view.borrow().property(property)
    }
}

type Animator = ViewPropertyAnimator<FallbackAnimator<ViewProperties>>;

fn record(animator: &mut Animator) -> Rc<RefCell<Vec<(TimerId, TimerEvent)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    animator.set_listener(Some(Rc::new(move |timer: TimerId, event: TimerEvent| {
        sink.borrow_mut().push((timer, event));
    })));
    log
}

#[test]
fn move_and_fade_share_one_timer() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();
    let log = record(&mut animator);

    animator.x(100.0).alpha(0.0);
    assert_eq!(host.timers.timer_count(), 0);

    host.queue.run_pending();
    assert_eq!(host.timers.timer_count(), 1);
    let timer = log.borrow()[0].0;
    let bundle = animator.backend().bundle(timer).unwrap();
    assert_eq!(
        bundle.values(),
        &[
            PropertyValues::new(Property::X, 0.0, 100.0),
            PropertyValues::new(Property::Alpha, 1.0, -1.0),
        ]
    );

    host.timers.tick(50.0);
    assert_eq!(host.get(Property::X), 50.0);
    assert_eq!(host.get(Property::Alpha), 0.5);

    host.timers.tick(50.0);
    assert_eq!(host.get(Property::X), 100.0);
    assert_eq!(host.get(Property::Alpha), 0.0);
    assert!(animator.backend().bundle(timer).is_none());
    assert_eq!(
        *log.borrow(),
        vec![(timer, TimerEvent::Start), (timer, TimerEvent::End)]
    );
}

#[test]
fn many_requests_before_tick_make_one_timer() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();

    animator
        .translation_x(10.0)
        .translation_y(10.0)
        .scale_x(2.0)
        .scale_y(2.0)
        .rotation(45.0)
        .rotation_x(10.0)
        .rotation_y(10.0)
        .alpha(0.2);

    host.frame(0.0);
    assert_eq!(host.timers.timer_count(), 1);
    assert_eq!(animator.backend().active_animation_count(), 1);
    assert_eq!(animator.backend().animated_properties().properties().count(), 8);
}

#[test]
fn later_request_supersedes_only_its_property() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();

    animator.y(200.0).rotation(90.0);
    host.frame(0.0);
    host.frame(50.0);
    assert_eq!(host.get(Property::Y), 100.0);

    animator.y_by(-100.0);
    assert_eq!(animator.backend().animated_properties(), PropertySet::ROTATION);

    host.frame(0.0);
    host.frame(50.0);
    // Rotation finishes on its original schedule; Y restarted from 100.
    assert_eq!(host.get(Property::Rotation), 90.0);
    assert_eq!(host.get(Property::Y), 50.0);
    assert_eq!(animator.backend().animated_properties(), PropertySet::Y);

    host.frame(50.0);
    assert_eq!(host.get(Property::Y), 0.0);
    assert_eq!(animator.backend().active_animation_count(), 0);
}

#[test]
fn relative_and_absolute_from_same_start() {
    let host = Host::new(ViewProperties::at(10.0, 0.0));
    let mut animator = host.animator();

    animator.x_by(5.0);
    assert_eq!(
        animator.backend().pending_values(),
        vec![PropertyValues::new(Property::X, 10.0, 5.0)]
    );
    animator.cancel();

    animator.x(5.0);
    assert_eq!(
        animator.backend().pending_values(),
        vec![PropertyValues::new(Property::X, 10.0, -5.0)]
    );
}

#[test]
fn opacity_only_skips_geometry_invalidation() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();

    animator.alpha(0.0);
    host.frame(0.0);
    let before = host.view.borrow().invalidation_count();
    host.timers.tick(10.0);
    assert_eq!(host.view.borrow().invalidation_count() - before, 1);

    animator.rotation(30.0);
    host.queue.run_pending();
    let before = host.view.borrow().invalidation_count();
    host.timers.tick(10.0);
    // One for the alpha timer, two for the rotation timer.
    assert_eq!(host.view.borrow().invalidation_count() - before, 3);
}

#[test]
fn cancel_with_nothing_running_changes_nothing() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();
    let log = record(&mut animator);

    animator.cancel();

    assert!(log.borrow().is_empty());
    assert_eq!(animator.duration(), 100);
    assert_eq!(animator.start_delay(), 0);
    assert_eq!(host.queue.pending_count(), 0);
    assert_eq!(host.timers.timer_count(), 0);
    assert_eq!(*host.view.borrow(), ViewProperties::new());
}

#[test]
fn cancel_mid_flight_keeps_last_frame() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();
    let log = record(&mut animator);

    animator.scale_x(3.0);
    host.frame(0.0);
    host.frame(50.0);
    animator.cancel();

    assert_eq!(host.get(Property::ScaleX), 2.0);
    host.frame(50.0);
    assert_eq!(host.get(Property::ScaleX), 2.0);

    let events: Vec<_> = log.borrow().iter().map(|(_, e)| *e).collect();
    assert_eq!(
        events,
        vec![TimerEvent::Start, TimerEvent::Cancel, TimerEvent::End]
    );
}

#[test]
fn negative_timing_rejected() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();
    animator.set_start_delay(15).unwrap();

    assert!(matches!(
        animator.set_duration(-1),
        Err(AnimatorError::NegativeDuration(-1))
    ));
    assert!(matches!(
        animator.set_start_delay(-1),
        Err(AnimatorError::NegativeStartDelay(-1))
    ));
    assert_eq!(animator.duration(), 100);
    assert_eq!(animator.start_delay(), 15);
}

#[test]
fn repeat_events_reach_listener() {
    let host = Host::new(ViewProperties::new());
    let mut animator = host.animator();
    let log = record(&mut animator);

    animator.translation_x(10.0);
    host.queue.run_pending();
    let timer = log.borrow()[0].0;
    host.timers.set_repeat_count(timer, 1);

    host.timers.tick(150.0);
    assert_eq!(host.get(Property::TranslationX), 5.0);
    host.timers.tick(50.0);

    let events: Vec<_> = log.borrow().iter().map(|(_, e)| *e).collect();
    assert_eq!(
        events,
        vec![TimerEvent::Start, TimerEvent::Repeat, TimerEvent::End]
    );
    assert_eq!(host.get(Property::TranslationX), 10.0);
}

#[test]
fn config_file_seeds_animator() {
    let host = Host::new(ViewProperties::new());
    let config = AnimatorConfig::from_toml_str(
        r#"
        duration_ms = 200
        start_delay_ms = 20
        interpolator = "linear"
        "#,
    )
    .unwrap();

    let mut animator = ViewPropertyAnimator::fallback_with_config(
        host.view.clone(),
        host.timers.clone(),
        host.queue.clone(),
        config,
    );
    assert_eq!(animator.duration(), 200);
    assert_eq!(animator.start_delay(), 20);

    animator.alpha(0.0);
    host.frame(10.0);
    assert_eq!(host.get(Property::Alpha), 1.0);
    // 20 ms of delay, then 100 of 200 ms.
    host.frame(110.0);
    assert_eq!(host.get(Property::Alpha), 0.5);
}

#[test]
fn backend_selected_once() {
    let host = Host::new(ViewProperties::new());
    let view = host.view.clone();
    let timers = host.timers.clone();
    let queue = host.queue.clone();

    let mut animator = ViewPropertyAnimator::select(None, move || {
        Box::new(FallbackAnimator::new(view, timers, queue)) as Box<dyn PropertyAnimator>
    });
    animator.set_interpolator(Easing::Linear);
    animator.set_duration(100).unwrap().alpha(0.0);

    host.frame(0.0);
    host.frame(100.0);
    assert_eq!(host.get(Property::Alpha), 0.0);
}
