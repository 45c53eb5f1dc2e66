// Example: drive an animated scroll-to-item from a simulated frame loop.
use windower::{Align, EngineOptions, SizeSpec, Viewport};
use windower_adapter::{Controller, ScrollToItemOptions};

fn main() {
    let options = EngineOptions::new(100_000, SizeSpec::fixed(40.0))
        .with_initial_viewport(Viewport::new(400.0, 600.0));
    let mut controller = Controller::new(options).unwrap();

    let target = ScrollToItemOptions::new(5_000)
        .with_align(Align::Center)
        .with_smooth(true);
    controller
        .scroll_to_item(target, 0.0, Some(Box::new(|| println!("arrived"))))
        .unwrap();

    // 16 ms frames, as a 60 Hz host would deliver them.
    let mut now = 0.0;
    for _ in 0..60 {
        now += 16.0;
        if let Some(offset) = controller.tick(now).unwrap() {
            println!("t={now:>4}ms offset={offset:.1}");
        }
    }
    println!("final offset={}", controller.engine().scroll_offset());
}
