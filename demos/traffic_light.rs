//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - No final state: every state has an outgoing edge
//! - Wildcard entry watcher observing every change
//!
//! Run with: cargo run --example traffic_light

use flowstate::{create_machine, StateDecl};

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut machine = create_machine("traffic-light", || {
        vec![
            StateDecl::new("red").on("TIMER", "green"),
            StateDecl::new("green").on("TIMER", "yellow"),
            StateDecl::new("yellow").on("TIMER", "red"),
        ]
    })
    .unwrap();

    println!("Initial state: {}\n", machine.current());

    machine.watch_entry("*", |notice, _outbox| {
        println!("  light is now {}", notice.state);
        Ok(())
    });

    println!("Two full cycles:");
    for _ in 0..6 {
        machine.transition("TIMER", None).unwrap();
    }

    println!("\nBack at: {}", machine.current());
    println!("Transitions taken: {}", machine.history().len());

    println!("\n=== Example Complete ===");
}
