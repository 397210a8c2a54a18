//! Browser-side facade checks: `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use thermofluid_engine::World;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn world_steps_and_exposes_buffers() {
    let mut world = World::new(64, 64).unwrap();
    world.add_particle(10.0, 10.0, 0.0, 0.0, 273.0, "water".to_string()).unwrap();
    assert_eq!(world.advance(40.0), 1);
    assert_eq!(world.tick(), 1);
    assert_eq!(world.extract_particles(), 1);
    assert_eq!(world.extract_grid_colors(), 64);
}

#[wasm_bindgen_test]
fn bad_config_surfaces_as_js_error() {
    assert!(World::from_config_json("{ \"friction\": 2 }".to_string()).is_err());
    assert!(World::new(1, 1).is_err());
}
