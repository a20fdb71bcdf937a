// Example: how far and how long a fling travels for a few release velocities.
use navigation_toolbar::{FlingCalculator, Scroller};

fn main() {
    let calc = FlingCalculator::new(0.015, 1.0);
    for velocity in [500.0f32, 1_000.0, 2_500.0, 5_000.0, 10_000.0] {
        println!(
            "velocity={velocity} distance={:.0}px duration={}ms",
            calc.distance(velocity),
            calc.duration_ms(velocity)
        );
    }

    // A clamped fling stops early at the bound.
    let mut scroller = Scroller::new(0.015, 1.0);
    scroller.fling(0, -5_000.0, -1_500, 0, 0);
    let mut now_ms = 0u64;
    while scroller.compute_scroll_offset(now_ms) {
        if now_ms % 64 == 0 {
            println!("t={now_ms} x={}", scroller.current());
        }
        now_ms += 16;
    }
    println!("done: x={} after {now_ms}ms", scroller.current());
}
