//! Editor Workflow
//!
//! This example drives the classic idle → editing → saving flow.
//!
//! Key concepts:
//! - Declaring states with the `states!` macro
//! - Entry/exit watchers and the wildcard watcher
//! - Per-state context with clear-on-exit
//! - Follow-up transitions queued from a watcher
//!
//! Run with: RUST_LOG=flowstate=debug cargo run --example editor_flow

use flowstate::{bind, create_machine_with, states, InvalidTransitionPolicy, MachineOptions};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,flowstate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    println!("=== Editor Workflow ===\n");

    let options = MachineOptions {
        invalid_transitions: InvalidTransitionPolicy::Warn,
        ..MachineOptions::default()
    };
    let mut machine = create_machine_with("editor", options, || {
        states! {
            idle { EDIT => editing },
            editing { SAVE => saving, CANCEL => idle },
            saving (clear_on_exit = true) {
                SUCCESS => idle,
                FAILURE => editing,
            },
        }
    })
    .unwrap();

    let _ = machine.set_global_only(json!({"document": "README.md"}));
    let binding = bind(&mut machine);

    machine.watch_exit("editing", |notice, _outbox| {
        println!("  [exit]  leaving editing with {:?}", notice.context);
        Ok(())
    });

    // Pretend the save finishes immediately; a real host would do this
    // asynchronously and call transition("SUCCESS") itself.
    machine.watch_entry("saving", |notice, outbox| {
        println!("  [entry] saving {:?}", notice.context);
        outbox.send("SUCCESS");
        Ok(())
    });

    println!("Can save from idle? {}", machine.can("idle", "SAVE"));
    machine.transition("SAVE", None).unwrap();
    println!("Still in: {}\n", machine.current());

    machine
        .transition("EDIT", Some(json!({"text": "Hello"})))
        .unwrap();
    println!("Now in: {}", machine.current());

    machine.transition("SAVE", Some(json!({"attempt": 1}))).unwrap();
    println!("After save: {}", machine.current());
    println!("Saving context cleared: {}", machine.get_context("saving").is_none());

    let view = binding.current();
    println!("\nUI view: state={} global={:?}", view.state, view.global);

    println!("\nVisited:");
    for record in machine.history().records() {
        println!("  {} --{}--> {}", record.from, record.event, record.to);
    }

    println!("\nXState export:");
    println!("{}", machine.to_xstate().to_string_pretty().unwrap());

    println!("\n=== Example Complete ===");
}
