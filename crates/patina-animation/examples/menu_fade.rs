//! Menu Fade Example
//!
//! Simulates a pointer sweeping across a menu bar and prints the opacity the
//! drawing layer would apply to each item, frame by frame. There is no real
//! toolkit here; widget handles and pointer events are synthesized.
//!
//! Run with: cargo run -p patina-animation --example menu_fade

use patina_animation::{
    AnimationConfig, AnimationMode, Animations, Category, Rect, WidgetHandle,
};
use patina_core::logging;

const ITEM_COUNT: u64 = 4;
const FRAME_MS: u64 = 16;

fn main() {
    logging::init();

    let mut config = AnimationConfig::default();
    config.set_duration(Category::MenuItem, 150);
    config.set_mode(Category::MenuItem, AnimationMode::Fade);
    let mut animations = Animations::with_config(config);

    let container = WidgetHandle::from_raw(100);
    for raw in 1..=ITEM_COUNT {
        let index = (raw - 1) as i32;
        animations
            .engine_mut(Category::MenuItem)
            .register(WidgetHandle::from_raw(raw), Rect::new(index * 60, 0, 56, 24));
    }

    // sweep the pointer left to right across the bar, one item per 10 frames
    let mut now = 0u64;
    for frame in 0..(ITEM_COUNT * 10 + 20) {
        let x = (frame * 6) as i32;
        animations.on_pointer_motion(container, x, 12, now);
        let running = animations.tick(now);

        let opacities: Vec<String> = (1..=ITEM_COUNT)
            .map(|raw| {
                let opacity =
                    animations.opacity(WidgetHandle::from_raw(raw), Category::MenuItem);
                format!("item{raw}={opacity:.2}")
            })
            .collect();
        println!("t={now:4}ms  {}  running={running}", opacities.join("  "));

        for request in animations.drain_redraws() {
            println!("          redraw {} region={:?}", request.widget, request.region);
        }
        now += FRAME_MS;
    }
}
