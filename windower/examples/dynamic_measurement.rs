// Example: correct estimated sizes with observed measurements.
//
// Items above the viewport that change size shift the scroll offset so the
// content on screen stays put.
use windower::{Engine, EngineOptions, EventFlags, SizeChange, SizeSpec, Viewport};

fn main() {
    let options = EngineOptions::new(10_000, SizeSpec::fixed(50.0))
        .with_initial_viewport(Viewport::new(400.0, 300.0));
    let mut engine = Engine::new(options).unwrap();
    engine.update(500.0, EventFlags::SCROLL).unwrap();

    // The host measured items 3 and 7 after painting them.
    for (index, size) in [(3, 78.0), (7, 64.0)] {
        match engine.apply_size_event(index, size).unwrap() {
            SizeChange::Compensated { scroll_offset, delta } => {
                println!("item {index}: grew {delta}, move scroll to {scroll_offset}")
            }
            change => println!("item {index}: {change:?}"),
        }
    }

    println!("stale from: {:?}", engine.pending_remeasure());
    engine
        .update(engine.scroll_offset(), EventFlags::empty())
        .unwrap();
    println!("item 8 now starts at {}", engine.measure_of(8).unwrap().start);
    println!("total size {}", engine.scroll_size());
}
