//! End-to-end transition behavior: cold starts, sibling hand-offs,
//! destruction mid-animation, and the enable kill switch.

use patina_animation::{
    AnimationConfig, AnimationMode, Animations, Category, CategoryConfig, Point, Rect,
    TransitionEngine, WidgetEvent, WidgetHandle,
};

fn w(raw: u64) -> WidgetHandle {
    WidgetHandle::from_raw(raw)
}

fn item_rect(index: i32) -> Rect {
    Rect::new(index * 40, 0, 36, 24)
}

fn menu_engine() -> TransitionEngine {
    let mut engine = TransitionEngine::new();
    engine.register(w(1), item_rect(0));
    engine.register(w(2), item_rect(1));
    engine.set_highlighted(w(1), true);
    engine
}

#[test]
fn scenario_a_cold_start_then_fade_out() {
    let mut engine = menu_engine();

    assert!(engine.update_state(w(1), true, 0));
    assert_eq!(engine.current().widget(), Some(w(1)));
    assert!(engine.is_animated(w(1)), "fresh cold start animates");

    engine.tick(500); // let the fade-in finish

    assert!(engine.update_state(w(1), false, 500));
    assert_eq!(engine.current().widget(), None);
    assert_eq!(engine.previous().widget(), Some(w(1)));
    assert!(
        engine.previous().timeline().is_running(),
        "fade-out runs for a widget that was highlighted"
    );
}

#[test]
fn scenario_b_sibling_handoff_swaps_instantly() {
    let mut engine = menu_engine();
    engine.update_state(w(1), true, 0);
    engine.tick(500);

    assert!(engine.update_state(w(2), true, 500));
    assert_eq!(engine.previous().widget(), Some(w(1)));
    assert_eq!(engine.current().widget(), Some(w(2)));
    assert!(
        !engine.current().timeline().is_running(),
        "hand-off between siblings must not re-trigger the fade-in"
    );
}

#[test]
fn scenario_c_destroy_current_mid_animation() {
    let mut animations = Animations::new();
    animations.register_widget(w(1));
    animations
        .engine_mut(Category::MenuItem)
        .register(w(1), item_rect(0));
    animations
        .engine_mut(Category::MenuItem)
        .update_state(w(1), true, 0);
    animations.tick(50); // mid-fade

    animations.on_destroy(w(1));

    let engine = animations.engine_mut(Category::MenuItem);
    assert!(!engine.is_animated(w(1)));
    assert!(
        !engine.dirty_rect().is_valid(),
        "a destroyed widget's rect must not appear in redraw queries"
    );
}

#[test]
fn dispatch_enter_leave_drives_full_fade_cycle() {
    // a host talking only to `dispatch` must get the fade-in too, not just
    // the fade-out
    let mut animations = Animations::new();
    let bounds = Rect::new(0, 0, 50, 20);
    animations.track_hover(w(1), Category::Hover, bounds, Point::new(500, 10));

    animations.dispatch(w(1), WidgetEvent::PointerEnter, 0);
    assert_eq!(
        animations.engine(Category::Hover).current().widget(),
        Some(w(1))
    );
    animations.tick(75);
    assert!(animations.is_animated(w(1), Category::Hover));

    animations.dispatch(w(1), WidgetEvent::PointerLeave, 150);
    let engine = animations.engine(Category::Hover);
    assert_eq!(engine.current().widget(), None);
    assert_eq!(engine.previous().widget(), Some(w(1)));
    assert!(engine.previous().timeline().is_running());
}

#[test]
fn scenario_d_composite_cross_invalidation() {
    let mut animations = Animations::new();
    let (combo, button, entry) = (w(10), w(11), w(12));
    animations.combo_mut().register(combo);
    animations.combo_mut().add_child(combo, button);
    animations.combo_mut().add_child(combo, entry);
    animations.drain_redraws();

    animations.combo_mut().set_child_hovered(combo, button, true);
    let redraws = animations.drain_redraws();
    assert!(
        redraws.iter().any(|request| request.widget == entry),
        "hovering the button must repaint the entry"
    );
}

#[test]
fn p2_at_most_one_current() {
    let mut engine = menu_engine();
    for raw in 3..8 {
        engine.register(w(raw), item_rect(raw as i32));
    }

    let mut now = 0;
    for raw in 1..8 {
        engine.update_state(w(raw), true, now);
        now += 20;
        engine.tick(now);

        // exactly one current, and previous never aliases it
        let current = engine.current().widget();
        assert_eq!(current, Some(w(raw)));
        assert_ne!(engine.previous().widget(), current);
    }
}

#[test]
fn p4_zero_duration_is_immediate() {
    let mut engine = TransitionEngine::with_config(&CategoryConfig {
        duration_ms: 0,
        mode: AnimationMode::Fade,
        fade_out_on_handoff: false,
    });
    engine.register(w(1), item_rect(0));

    engine.update_state(w(1), true, 0);
    assert!(!engine.is_animated(w(1)), "zero duration never hangs");
    assert_eq!(engine.opacity(w(1)), 1.0);
}

#[test]
fn p6_disable_clears_in_flight_immediately() {
    let mut animations = Animations::new();
    for (index, raw) in (1..4).enumerate() {
        animations
            .engine_mut(Category::Hover)
            .register(w(raw), item_rect(index as i32));
    }
    animations.engine_mut(Category::Hover).update_state(w(1), true, 0);
    animations.tick(50);
    assert!(animations.is_animated(w(1), Category::Hover));

    animations.set_enabled(false);
    for raw in 1..4 {
        assert!(
            !animations.is_animated(w(raw), Category::Hover),
            "disable must clear in-flight animations, not merely future starts"
        );
    }
}

#[test]
fn opacity_ramps_and_settles() {
    let mut engine = menu_engine();
    engine.update_state(w(1), true, 0);

    engine.tick(75); // half of the default 150 ms
    let mid = engine.opacity(w(1));
    assert!(mid > 0.0 && mid < 1.0);

    engine.tick(150);
    assert_eq!(engine.opacity(w(1)), 1.0);
    assert!(!engine.is_animated(w(1)));
}

#[test]
fn follow_mouse_menu_bar_sweep() {
    let mut config = AnimationConfig::default();
    config.set_mode(Category::MenuItem, AnimationMode::FollowMouse);
    config.set_duration(Category::MenuItem, 40);
    let mut animations = Animations::with_config(config);

    let container = w(100);
    for raw in 1..4 {
        animations
            .engine_mut(Category::MenuItem)
            .register(w(raw), item_rect(raw as i32 - 1));
    }

    // sweep the pointer across the three items
    animations.on_pointer_motion(container, 10, 10, 0);
    assert_eq!(
        animations.engine(Category::MenuItem).current().widget(),
        Some(w(1))
    );
    animations.tick(100); // settle

    animations.on_pointer_motion(container, 50, 10, 100);
    assert_eq!(
        animations.engine(Category::MenuItem).current().widget(),
        Some(w(2))
    );
    animations.tick(120);
    let animated = animations
        .animated_rect(w(2), Category::MenuItem)
        .expect("hand-off under follow-mouse interpolates the rect");
    assert!(animated.x > item_rect(0).x);
    assert!(animated.x < item_rect(1).x + item_rect(1).width);
}

#[test]
fn hover_seeding_avoids_one_event_lag() {
    let mut animations = Animations::new();
    let bounds = Rect::new(0, 0, 50, 20);

    // pointer already inside the widget when it is connected
    animations.track_hover(w(1), Category::Hover, bounds, Point::new(25, 10));
    assert!(animations.hover().hovered(w(1)));

    // pointer outside
    animations.track_hover(w(2), Category::Hover, bounds, Point::new(500, 10));
    assert!(!animations.hover().hovered(w(2)));
}

#[test]
fn redraw_requests_carry_inflated_regions() {
    let mut engine = menu_engine();
    engine.update_state(w(1), true, 0);
    engine.tick(75);

    let redraws = engine.pop_redraws();
    assert!(!redraws.is_empty());
    let request = redraws.last().unwrap();
    assert_eq!(request.widget, w(1));
    let region = request.region.expect("transition repaints carry a region");
    assert!(region.width >= item_rect(0).width);
}
