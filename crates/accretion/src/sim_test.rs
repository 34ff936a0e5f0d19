use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::Spin;
use crate::config::{InstabilityPolicy, SimConfig};
use crate::error::Error;
use crate::sim::Simulation;
use crate::state::SystemState;

fn quiet_config() -> SimConfig {
    // Static bodies: only the collision pass runs.
    SimConfig {
        updates_enabled: false,
        ..SimConfig::default()
    }
}

#[test]
fn test_invalid_config_rejected_at_init() {
    let config = SimConfig {
        dt: -1.0,
        ..SimConfig::default()
    };

    assert!(matches!(
        Simulation::new(config, 5, 42),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_from_state_rejects_bad_bodies() {
    let mut coincident = SystemState::new();
    coincident.add_body(1.0, 1.0, Point3::origin(), Vector3::zeros());
    coincident.add_body(1.0, 1.0, Point3::origin(), Vector3::zeros());
    assert!(Simulation::from_state(SimConfig::default(), coincident).is_err());

    let mut massless = SystemState::new();
    massless.add_body(0.0, 1.0, Point3::origin(), Vector3::zeros());
    assert!(Simulation::from_state(SimConfig::default(), massless).is_err());

    let mut nan_velocity = SystemState::new();
    nan_velocity.add_body(
        1.0,
        1.0,
        Point3::origin(),
        Vector3::new(f64::NAN, 0.0, 0.0),
    );
    assert!(Simulation::from_state(SimConfig::default(), nan_velocity).is_err());
}

#[test]
fn test_two_body_merge_scenario() {
    // Masses 10 and 20, radii 1 and 1, 0.5 apart, at rest. One step with
    // collisions enabled leaves one body: mass 30, velocity ~0 (momentum
    // was zero), radius (1³+1³)^(1/3).
    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(20.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(SimConfig::default(), state).unwrap();
    let snapshot = sim.step().unwrap();

    assert_eq!(snapshot.bodies.len(), 1);
    assert_relative_eq!(snapshot.total_mass, 30.0, max_relative = 1e-12);

    let merged = &snapshot.bodies[0];
    assert_relative_eq!(merged.radius, 2.0_f64.cbrt(), max_relative = 1e-12);

    let speed = (merged.velocity[0].powi(2)
        + merged.velocity[1].powi(2)
        + merged.velocity[2].powi(2))
    .sqrt();
    assert!(speed < 1e-9, "merged body should be at rest, speed {speed:e}");
}

#[test]
fn test_isolated_body_drifts_by_v_dt() {
    let mut state = SystemState::new();
    state.add_body(
        1.0e24,
        1.0e6,
        Point3::origin(),
        Vector3::new(5.0, 0.0, 0.0),
    );

    let mut sim = Simulation::from_state(SimConfig::default(), state).unwrap();
    let snapshot = sim.step().unwrap();

    // dt = 150 s, no force source: exactly v·dt, velocity unchanged.
    assert_eq!(snapshot.bodies[0].position, [750.0, 0.0, 0.0]);
    assert_eq!(snapshot.bodies[0].velocity, [5.0, 0.0, 0.0]);
}

#[test]
fn test_disabled_toggles_freeze_everything() {
    let config = SimConfig {
        updates_enabled: false,
        collisions_enabled: false,
        ..SimConfig::default()
    };

    // Overlapping pair: with collisions off they simply coexist.
    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::new(1.0, 2.0, 3.0));
    state.add_body(20.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(config.clone(), state).unwrap();
    let before = sim.snapshot();

    for _ in 0..5 {
        sim.step().unwrap();
    }
    let after = sim.snapshot();

    assert_eq!(after.bodies.len(), before.bodies.len());
    for (a, b) in before.bodies.iter().zip(after.bodies.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
        assert_eq!(a.mass, b.mass);
        assert_eq!(a.radius, b.radius);
    }
    assert_relative_eq!(after.time, 5.0 * config.dt, max_relative = 1e-12);
    assert_eq!(after.step, 5);
}

#[test]
fn test_exact_contact_does_not_merge() {
    // Radii sum exactly to the separation; strict comparison leaves the
    // pair untouched.
    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(10.0, 1.0, Point3::new(2.0, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(quiet_config(), state).unwrap();
    let snapshot = sim.step().unwrap();

    assert_eq!(snapshot.bodies.len(), 2);
}

#[test]
fn test_just_inside_contact_merges() {
    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(10.0, 1.0, Point3::new(2.0 - 1.0e-9, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(quiet_config(), state).unwrap();
    let snapshot = sim.step().unwrap();

    assert_eq!(snapshot.bodies.len(), 1);
}

#[test]
fn test_positive_proximity_merges_before_contact() {
    let config = SimConfig {
        max_proximity: 0.5,
        ..quiet_config()
    };

    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(10.0, 1.0, Point3::new(2.3, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(config, state).unwrap();
    let snapshot = sim.step().unwrap();

    assert_eq!(snapshot.bodies.len(), 1);
}

#[test]
fn test_negative_proximity_requires_overlap() {
    let config = SimConfig {
        max_proximity: -0.5,
        ..quiet_config()
    };

    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(10.0, 1.0, Point3::new(1.8, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(config, state).unwrap();
    let snapshot = sim.step().unwrap();

    assert_eq!(snapshot.bodies.len(), 2);
}

#[test]
fn test_instability_halt_rejects_step_atomically() {
    let config = SimConfig {
        g_constant: 1.0e300,
        ..SimConfig::default()
    };

    let mut state = SystemState::new();
    state.add_body(1.0e30, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(1.0e30, 1.0, Point3::new(1.0e3, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(config, state).unwrap();
    let before = sim.snapshot();

    let err = sim.step().unwrap_err();
    assert!(matches!(err, Error::NumericInstability { step: 1, .. }));

    // Nothing committed: same state, same counters.
    assert_eq!(sim.steps_taken(), 0);
    let after = sim.snapshot();
    assert_eq!(after.step, 0);
    assert_eq!(after.time, before.time);
    for (a, b) in before.bodies.iter().zip(after.bodies.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}

#[test]
fn test_instability_clamp_and_continue() {
    let config = SimConfig {
        g_constant: 1.0e300,
        collisions_enabled: false,
        instability_policy: InstabilityPolicy::ClampAndContinue,
        ..SimConfig::default()
    };

    let mut state = SystemState::new();
    state.add_body(1.0e30, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(1.0e30, 1.0, Point3::new(1.0e3, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(config.clone(), state).unwrap();
    let snapshot = sim.step().unwrap();

    // The offending bodies fall back to their pre-step kinematics; time
    // still advances and the run keeps going.
    assert_eq!(snapshot.step, 1);
    assert_relative_eq!(snapshot.time, config.dt, max_relative = 1e-12);
    assert_eq!(snapshot.bodies[0].position, [0.0, 0.0, 0.0]);
    assert_eq!(snapshot.bodies[0].velocity, [0.0, 0.0, 0.0]);
}

#[test]
fn test_seeded_runs_are_deterministic() {
    let config = SimConfig::default();

    let mut sim_a = Simulation::new(config.clone(), 12, 1234).unwrap();
    let mut sim_b = Simulation::new(config, 12, 1234).unwrap();

    for _ in 0..10 {
        sim_a.step().unwrap();
        sim_b.step().unwrap();
    }

    let snap_a = sim_a.snapshot();
    let snap_b = sim_b.snapshot();
    assert_eq!(snap_a.bodies.len(), snap_b.bodies.len());
    for (a, b) in snap_a.bodies.iter().zip(snap_b.bodies.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
        assert_eq!(a.mass, b.mass);
    }
}

#[test]
fn test_snapshot_reflects_state() {
    let mut state = SystemState::new();
    state.add_body(
        1.0e24,
        2.0e6,
        Point3::new(1.0, 2.0, 3.0),
        Vector3::new(4.0, 5.0, 6.0),
    );

    let sim = Simulation::from_state(SimConfig::default(), state).unwrap();
    let snapshot = sim.snapshot();

    assert_eq!(snapshot.step, 0);
    assert_eq!(snapshot.time, 0.0);
    assert_eq!(snapshot.bodies.len(), 1);

    let body = &snapshot.bodies[0];
    assert_eq!(body.mass, 1.0e24);
    assert_eq!(body.radius, 2.0e6);
    assert_eq!(body.position, [1.0, 2.0, 3.0]);
    assert_eq!(body.velocity, [4.0, 5.0, 6.0]);
    assert_eq!(body.spin_angle, None);
    assert!(!body.flash);
}

#[test]
fn test_mass_conserved_over_merging_run() {
    let mut sim = Simulation::new(SimConfig::default(), 20, 7).unwrap();
    let initial_mass = sim.snapshot().total_mass;

    for _ in 0..50 {
        sim.step().unwrap();
    }

    let final_snapshot = sim.snapshot();
    assert!(final_snapshot.bodies.len() <= 20);
    assert_relative_eq!(final_snapshot.total_mass, initial_mass, max_relative = 1e-9);
}

#[test]
fn test_flash_set_on_merge_then_cleared() {
    let config = SimConfig {
        color_on_impact: true,
        ..quiet_config()
    };

    let mut state = SystemState::new();
    state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
    state.add_body(20.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros());

    let mut sim = Simulation::from_state(config, state).unwrap();

    let after_merge = sim.step().unwrap();
    assert_eq!(after_merge.bodies.len(), 1);
    assert!(after_merge.bodies[0].flash);

    // No collision on the next step: the tint clears.
    let next = sim.step().unwrap();
    assert!(!next.bodies[0].flash);
}

#[test]
fn test_spin_advances_each_step() {
    let mut state = SystemState::new();
    let id = state.add_body(1.0e24, 1.0e6, Point3::origin(), Vector3::zeros());
    state.get_body_mut(id).unwrap().spin = Some(Spin {
        angle: 0.0,
        rate: 0.01,
    });

    let mut sim = Simulation::from_state(quiet_config(), state).unwrap();
    let snapshot = sim.step().unwrap();

    // dt = 150 s at 0.01 rad/s.
    assert_relative_eq!(snapshot.bodies[0].spin_angle.unwrap(), 1.5, max_relative = 1e-12);
}

#[test]
fn test_step_counter_and_time_advance() {
    let mut sim = Simulation::new(SimConfig::default(), 3, 11).unwrap();

    assert_eq!(sim.steps_taken(), 0);
    assert_eq!(sim.time(), 0.0);

    sim.step().unwrap();
    sim.step().unwrap();

    assert_eq!(sim.steps_taken(), 2);
    assert_relative_eq!(sim.time(), 300.0, max_relative = 1e-12);
}
