//! Two planets falling together until they merge.
//!
//! Run with: cargo run --package accretion --example two_body_merge

use accretion::config::SimConfig;
use accretion::sim::Simulation;
use accretion::state::SystemState;
use nalgebra::{Point3, Vector3};

fn main() {
    let config = SimConfig::default();

    // Two Earth-like planets approaching head-on.
    let mut state = SystemState::new();
    state.add_body(
        5.97e24,
        6.37e6,
        Point3::new(-5.0e7, 0.0, 0.0),
        Vector3::new(50.0, 0.0, 0.0),
    );
    state.add_body(
        5.97e24,
        6.37e6,
        Point3::new(5.0e7, 0.0, 0.0),
        Vector3::new(-50.0, 0.0, 0.0),
    );

    let mut sim = match Simulation::from_state(config, state) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("failed to initialize: {err}");
            return;
        }
    };

    println!("Two-body merge demo");
    println!("{}", "=".repeat(60));

    let max_steps = 50_000;
    loop {
        let snapshot = match sim.step() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                eprintln!("step failed: {err}");
                return;
            }
        };

        if snapshot.bodies.len() == 1 {
            let merged = &snapshot.bodies[0];
            println!(
                "Merged after {} steps ({:.0} s of simulated time).",
                snapshot.step, snapshot.time
            );
            println!("  Mass: {:.4e} kg", merged.mass);
            println!("  Radius: {:.4e} m", merged.radius);
            println!(
                "  Velocity: ({:.3e}, {:.3e}, {:.3e}) m/s",
                merged.velocity[0], merged.velocity[1], merged.velocity[2]
            );
            break;
        }

        if snapshot.step % 1_000 == 0 {
            let a = &snapshot.bodies[0];
            let b = &snapshot.bodies[1];
            let gap = ((a.position[0] - b.position[0]).powi(2)
                + (a.position[1] - b.position[1]).powi(2)
                + (a.position[2] - b.position[2]).powi(2))
            .sqrt();
            println!(
                "step {:>6}: separation {:.3e} m",
                snapshot.step, gap
            );
        }

        if snapshot.step >= max_steps {
            println!("No merge within {max_steps} steps.");
            break;
        }
    }
}
