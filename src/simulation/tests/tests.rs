use super::*;
use crate::core::Vec2;
use crate::domain::config::SimConfig;
use crate::domain::fluids::{FLUID_OIL, FLUID_STEAM, FLUID_WATER};
use crate::error::SimError;
use crate::systems::temperature::color_for;

fn sim_from(json: &str) -> SimulationCore {
    SimulationCore::from_json(json).unwrap()
}

/// Two fluids that always split under tension
const ELASTIC_CATALOG: &str = r#"
    "fluids": { "fluids": [
        { "key": "a", "naturalDistance": 10, "strength": 0.02, "maxStress": 12, "elasticity": 1,
          "heatTransferRate": 0, "boilingPoint": 1000000, "vaporizes": true,
          "color": [10, 20, 30], "pairedState": "b" },
        { "key": "b", "naturalDistance": 10, "strength": 0.02, "maxStress": 12,
          "heatTransferRate": 0, "boilingPoint": 1000000, "vaporizes": false,
          "color": [30, 20, 10], "pairedState": "a" }
    ] }
"#;

#[test]
fn pair_beyond_max_stress_stays_stationary() {
    // oil: natural distance 20, max stress 5; 40 apart is far past the cutoff
    let mut sim = sim_from(
        r#"{ "width": 200, "height": 200, "gravity": 0,
             "seedParticles": [ { "fluid": "oil", "points": [ { "x": 80, "y": 100 }, { "x": 120, "y": 100 } ] } ] }"#,
    );
    let before: Vec<_> = sim.particles().iter().map(|p| p.position).collect();

    sim.step_n(100);

    assert_eq!(sim.tick(), 100);
    assert_eq!(sim.particle_count(), 2);
    for (p, start) in sim.particles().iter().zip(&before) {
        assert_eq!(p.position, *start);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.fluid, FLUID_OIL);
    }
}

#[test]
fn hot_water_turns_to_steam_after_one_tick() {
    let mut sim = sim_from(r#"{ "width": 64, "height": 64, "initialTemperature": 400 }"#);
    sim.add_particle(30.0, 30.0, 0.0, 0.0, 400.0, "water").unwrap();
    assert_eq!(sim.particles()[0].fluid, FLUID_WATER);

    sim.step();

    assert_eq!(sim.particles()[0].fluid, FLUID_STEAM);
    assert_eq!(sim.get_perf_stats().phase_changes(), 1);
}

#[test]
fn water_below_boiling_stays_water() {
    let mut sim = sim_from(r#"{ "width": 64, "height": 64, "initialTemperature": 300 }"#);
    sim.add_particle(30.0, 30.0, 0.0, 0.0, 300.0, "water").unwrap();
    sim.step_n(5);
    assert_eq!(sim.particles()[0].fluid, FLUID_WATER);
    assert_eq!(sim.get_perf_stats().phase_changes(), 0);
}

#[test]
fn water_flips_just_above_boiling_point() {
    let hot = 373.0 + 1e-9;
    let mut sim = SimulationCore::new(SimConfig {
        width: 64,
        height: 64,
        initial_temperature: hot,
        ..SimConfig::default()
    })
    .unwrap();
    sim.add_particle(30.0, 30.0, 0.0, 0.0, hot, "water").unwrap();

    sim.step();

    assert_eq!(sim.particles()[0].fluid, FLUID_STEAM);
}

#[test]
fn water_holds_just_below_boiling_point() {
    let cool = 373.0 - 1e-9;
    let mut sim = SimulationCore::new(SimConfig {
        width: 64,
        height: 64,
        initial_temperature: cool,
        ..SimConfig::default()
    })
    .unwrap();
    sim.add_particle(30.0, 30.0, 0.0, 0.0, cool, "water").unwrap();

    sim.step();

    assert_eq!(sim.particles()[0].fluid, FLUID_WATER);
    assert_eq!(sim.get_perf_stats().phase_changes(), 0);
}

#[test]
fn particles_outside_the_domain_are_refused() {
    let mut sim = SimulationCore::with_size(100, 100).unwrap();
    assert!(matches!(
        sim.add_particle(5000.0, 50.0, 0.0, 0.0, 273.0, "water"),
        Err(SimError::InvalidParticle(_))
    ));
    assert!(sim.add_particle(99.5, 50.0, 0.0, 0.0, 273.0, "water").is_err());

    let seeded = SimulationCore::from_json(
        r#"{ "width": 100, "height": 100,
             "seedParticles": [ { "fluid": "water", "points": [ { "x": 5000, "y": 50 } ] } ] }"#,
    );
    assert!(matches!(seeded.err(), Some(SimError::InvalidConfig(_))));
}

#[test]
fn fast_particles_never_leave_the_domain() {
    let mut sim = SimulationCore::with_size(100, 100).unwrap();
    sim.set_gravity(0.0);
    sim.add_particle(98.0, 50.0, 49.0, 0.0, 273.0, "oil").unwrap();
    sim.add_particle(1.0, 1.0, -40.0, -40.0, 273.0, "oil").unwrap();

    for _ in 0..20 {
        sim.step();
        for p in sim.particles() {
            assert!((0.0..=99.0).contains(&p.position.x), "x = {}", p.position.x);
            assert!((0.0..=99.0).contains(&p.position.y), "y = {}", p.position.y);
        }
    }
}

#[test]
fn default_random_fill_starts_inside_bounds() {
    let sim = sim_from(r#"{ "width": 60, "height": 60, "seedParticles": [ { "fluid": "oil", "count": 400 } ] }"#);
    for p in sim.particles() {
        assert!(p.position.x <= 59.0 && p.position.y <= 59.0);
    }
}

#[test]
fn spawns_are_merged_after_the_pass_up_to_the_cap() {
    let json = format!(
        r#"{{ "width": 200, "height": 200, "gravity": 0, "maxParticles": 3,
              "seedParticles": [ {{ "fluid": "a", "points": [ {{ "x": 100, "y": 100 }}, {{ "x": 115, "y": 100 }} ] }} ],
              {ELASTIC_CATALOG} }}"#
    );
    let mut sim = sim_from(&json);

    sim.step();

    // both sources split once; only one fits
    assert_eq!(sim.particle_count(), 3);
    assert_eq!(sim.spawns_dropped_total(), 1);
    let stats = sim.get_perf_stats();
    assert_eq!(stats.spawned(), 1);
    assert_eq!(stats.spawns_dropped(), 1);

    // first source's child sits at natural distance towards the second
    let child = &sim.particles()[2];
    assert!((child.position.x - 110.0).abs() < 1e-9);
    assert!((child.position.y - 100.0).abs() < 1e-9);

    sim.step();
    assert_eq!(sim.particle_count(), 3);
}

#[test]
fn spawning_is_repeatable_for_a_seed() {
    let json = format!(
        r#"{{ "width": 300, "height": 300, "gravity": 0, "seed": 42, "maxParticles": 200,
              "seedParticles": [ {{ "fluid": "a", "count": 12, "region": {{ "x": 100, "y": 100, "w": 30, "h": 30 }} }} ],
              {ELASTIC_CATALOG} }}"#
    );
    let mut a = sim_from(&json);
    let mut b = sim_from(&json);
    a.step_n(3);
    b.step_n(3);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn random_seeding_stays_inside_region() {
    let sim = sim_from(
        r#"{ "width": 300, "height": 300,
             "seedParticles": [ { "fluid": "water", "count": 50, "region": { "x": 10, "y": 20, "w": 40, "h": 30 } } ] }"#,
    );
    assert_eq!(sim.particle_count(), 50);
    for p in sim.particles() {
        assert!(p.position.x >= 10.0 && p.position.x < 50.0);
        assert!(p.position.y >= 20.0 && p.position.y < 50.0);
        assert_eq!(p.color, sim.fluids().fluid(FLUID_WATER).color);
    }
}

#[test]
fn unknown_seed_fluid_is_rejected() {
    let err = SimulationCore::from_json(r#"{ "seedParticles": [ { "fluid": "mercury", "count": 1 } ] }"#)
        .err()
        .unwrap();
    assert!(matches!(err, SimError::UnknownFluid(ref k) if k == "mercury"));
}

#[test]
fn toggle_heat_display_recolours_immediately() {
    let mut sim = SimulationCore::with_size(64, 64).unwrap();
    let idx = sim.add_particle(10.0, 10.0, 0.0, 0.0, 350.0, "water").unwrap();
    let material = sim.fluids().fluid(FLUID_WATER).color;
    assert_eq!(sim.particles()[idx].color, material);

    sim.toggle_heat_display();
    assert!(sim.heat_display());
    assert_eq!(sim.particles()[idx].color, color_for(350.0));

    sim.apply_command(Command::ToggleHeatDisplay);
    assert_eq!(sim.particles()[idx].color, material);
}

#[test]
fn heat_command_clamps_at_ceiling() {
    let mut sim = sim_from(r#"{ "width": 64, "height": 64, "initialTemperature": 9500 }"#);
    sim.heat_domain();
    assert!(sim.grid().cells().iter().all(|&t| t == 10_000.0));
    sim.cool_domain();
    assert!(sim.grid().cells().iter().all(|&t| (t - 9_000.0).abs() < 1e-9));
}

#[test]
fn anchored_particle_ignores_gravity() {
    let mut sim = SimulationCore::with_size(100, 100).unwrap();
    let idx = sim.add_particle(50.0, 50.0, 2.0, 0.0, 273.0, "oil").unwrap();
    assert!(sim.set_anchored(idx, true));
    assert!(!sim.set_anchored(99, true));

    sim.step_n(10);

    assert_eq!(sim.particles()[idx].position, Vec2::new(50.0, 50.0));
    assert_eq!(sim.particles()[idx].velocity, Vec2::ZERO);
}

#[test]
fn gravity_pulls_towards_y_zero_and_floor_reflects() {
    let mut sim = SimulationCore::with_size(100, 100).unwrap();
    sim.add_particle(50.0, 3.0, 0.0, 0.0, 273.0, "oil").unwrap();
    sim.step_n(60);
    let p = &sim.particles()[0];
    assert!(p.position.y >= 0.0 && p.position.y <= 99.0);
    assert!(p.position.y < 3.0);
}

#[test]
fn add_particle_rejects_bad_input() {
    let mut sim = SimulationCore::with_size(64, 64).unwrap();
    assert!(matches!(
        sim.add_particle(1.0, 1.0, 0.0, 0.0, 273.0, "lava"),
        Err(SimError::UnknownFluid(_))
    ));
    assert!(matches!(
        sim.add_particle(f64::NAN, 1.0, 0.0, 0.0, 273.0, "water"),
        Err(SimError::InvalidParticle(_))
    ));
    assert_eq!(sim.particle_count(), 0);
}

#[test]
fn clear_resets_particles_and_grid() {
    let mut sim = SimulationCore::with_size(64, 64).unwrap();
    sim.add_particle(10.0, 10.0, 0.0, 0.0, 1000.0, "water").unwrap();
    sim.heat_domain();
    sim.step();
    sim.apply_command(Command::Clear);
    assert_eq!(sim.particle_count(), 0);
    assert!(sim.grid().cells().iter().all(|&t| t == 273.0));
}

#[test]
fn render_buffers_follow_particles_and_grid() {
    let mut sim = SimulationCore::with_size(64, 32).unwrap();
    sim.add_particle(1.5, 2.5, 0.0, 0.0, 273.0, "water").unwrap();
    sim.add_particle(10.0, 20.0, 0.0, 0.0, 273.0, "oil").unwrap();

    assert_eq!(sim.extract_particles(), 2);
    assert_eq!(sim.particle_positions(), &[1.5, 2.5, 10.0, 20.0]);
    assert_eq!(sim.particle_colors()[1], sim.fluids().fluid(FLUID_OIL).color);

    assert_eq!(sim.extract_grid_colors(), 8 * 4);
    let expected = crate::systems::temperature::shaded(color_for(273.0));
    assert!(sim.grid_colors().iter().all(|&c| c == expected));
}

#[test]
fn perf_timings_only_when_enabled() {
    let mut sim = SimulationCore::with_size(64, 64).unwrap();
    sim.add_particle(10.0, 10.0, 0.0, 0.0, 273.0, "water").unwrap();

    sim.step();
    let stats = sim.get_perf_stats();
    assert_eq!(stats.step_ms(), 0.0);
    assert_eq!(stats.particle_count(), 1);
    assert_eq!(stats.grid_size(), 64);

    sim.enable_perf_metrics(true);
    sim.step();
    let stats = sim.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.total_heat() > 0.0);
}

#[test]
fn frame_view_reflects_state() {
    let mut sim = SimulationCore::with_size(64, 64).unwrap();
    sim.add_particle(10.0, 10.0, 0.0, 0.0, 273.0, "water").unwrap();
    sim.step();
    let view = sim.frame_view();
    assert_eq!(view.tick, 1);
    assert_eq!(view.particles.len(), 1);
    assert!(!view.heat_display);
    assert_eq!(view.grid.size(), 64);
}
