//! Accretion demo: a random planet cloud collapsing under gravity.
//!
//! Spawns a seeded cloud of planets and steps the simulation, reporting
//! every merge as the population shrinks.
//!
//! Run with: cargo run --package accretion --example collision_demo

use accretion::config::SimConfig;
use accretion::sim::Simulation;

fn main() {
    println!("Accretion Demo: random planet cloud\n");
    println!("{}", "=".repeat(60));

    let config = SimConfig {
        // Pull the spawn volume in so encounters happen within the demo.
        init_max_position: 5.0e9,
        max_proximity: 1.0e6,
        ..SimConfig::default()
    };

    let body_count = 64;
    let seed = 42;
    let total_steps = 20_000;
    let report_every = 2_000;

    let mut sim = match Simulation::new(config, body_count, seed) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("failed to initialize: {err}");
            return;
        }
    };

    let initial = sim.snapshot();
    println!("\nInitial cloud:");
    println!("  Bodies: {}", initial.bodies.len());
    println!("  Total mass: {:.3e} kg", initial.total_mass);
    println!("  Kinetic energy: {:.3e} J", initial.kinetic_energy);

    println!("\n{}", "=".repeat(60));
    println!("Stepping...\n");

    let mut last_count = initial.bodies.len();

    for step in 1..=total_steps {
        let snapshot = match sim.step() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                eprintln!("step {step} failed: {err}");
                break;
            }
        };

        if snapshot.bodies.len() < last_count {
            println!(
                "t={:>12.0} s: {} -> {} bodies (total mass {:.3e} kg)",
                snapshot.time,
                last_count,
                snapshot.bodies.len(),
                snapshot.total_mass
            );
            last_count = snapshot.bodies.len();
        }

        if step % report_every == 0 {
            println!(
                "t={:>12.0} s: {} bodies, KE {:.3e} J",
                snapshot.time,
                snapshot.bodies.len(),
                snapshot.kinetic_energy
            );
        }
    }

    let final_snapshot = sim.snapshot();
    println!("\n{}", "=".repeat(60));
    println!("Done after {} steps.\n", sim.steps_taken());
    println!("  Bodies remaining: {}", final_snapshot.bodies.len());
    println!(
        "  Mergers: {}",
        initial.bodies.len() - final_snapshot.bodies.len()
    );
    println!("  Total mass: {:.3e} kg", final_snapshot.total_mass);

    let mut heaviest: Vec<_> = final_snapshot.bodies.iter().collect();
    heaviest.sort_by(|a, b| b.mass.partial_cmp(&a.mass).unwrap());
    println!("\nHeaviest survivors:");
    for body in heaviest.iter().take(5) {
        println!(
            "  Body {:>3}: mass {:.3e} kg, radius {:.3e} m",
            body.id, body.mass, body.radius
        );
    }
}
