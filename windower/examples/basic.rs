// Example: window a million-item list and jump around in it.
use windower::{Align, Engine, EngineOptions, EventFlags, SizeSpec, Viewport};

fn main() {
    let options = EngineOptions::new(1_000_000, SizeSpec::fixed(50.0))
        .with_initial_viewport(Viewport::new(400.0, 500.0));
    let mut engine = Engine::new(options).unwrap();

    let state = engine.state();
    println!("frame={:?}", state.frame);
    println!("rendered={} items", state.items.len());
    println!("first={:?}", state.items.first());

    engine.update(123_456.0, EventFlags::SCROLL).unwrap();
    println!("after scroll: first={:?}", engine.state().items.first());

    let offset = engine
        .scroll_target_for(999_999, Align::End)
        .unwrap()
        .unwrap();
    engine.update(offset, EventFlags::SCROLL).unwrap();
    println!("at the end: offset={}", engine.scroll_offset());
}
