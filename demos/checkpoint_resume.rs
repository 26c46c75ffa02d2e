//! Checkpoint and Resume
//!
//! This example demonstrates persisting a machine mid-flow and resuming it
//! in a fresh instance built from the same definition.
//!
//! Key concepts:
//! - Typed private and global contexts
//! - JSON checkpoints for readability, binary for compactness
//! - Atomic writes to prevent corruption
//!
//! Run with: cargo run --example checkpoint_resume

use flowstate::{Checkpoint, Machine, MachineBuilder, StateDecl};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Batch {
    items_processed: usize,
    total_items: usize,
}

fn pipeline() -> Machine<Batch, String> {
    MachineBuilder::new("batch-pipeline")
        .state(StateDecl::new("initializing").on("START", "mapping"))
        .state(StateDecl::new("mapping").on("MAPPED", "reducing"))
        .state(StateDecl::new("reducing").on("REDUCED", "complete"))
        .state(StateDecl::new("complete"))
        .build()
        .unwrap()
}

fn main() {
    println!("=== Checkpoint and Resume ===\n");

    let dir = std::env::temp_dir().join("flowstate-checkpoints");
    fs::create_dir_all(&dir).unwrap();

    let mut machine = pipeline();
    let _ = machine.set_global_only("run-2024-01".to_string());
    machine
        .transition(
            "START",
            Some(Batch {
                items_processed: 0,
                total_items: 100,
            }),
        )
        .unwrap();
    machine
        .transition(
            "MAPPED",
            Some(Batch {
                items_processed: 100,
                total_items: 100,
            }),
        )
        .unwrap();
    println!("Interrupted in: {}", machine.current());

    let checkpoint = machine.checkpoint();
    let path = dir.join(format!("{}.json", checkpoint.id));
    let temp = path.with_extension("tmp");
    fs::write(&temp, checkpoint.to_json().unwrap()).unwrap();
    fs::rename(&temp, &path).unwrap();
    println!("  [Checkpoint] Saved to {}", path.display());

    let binary = checkpoint.to_binary().unwrap();
    println!("  [Checkpoint] Binary size: {} bytes", binary.len());

    // Later, in a new process...
    let json = fs::read_to_string(&path).unwrap();
    let mut resumed = pipeline();
    resumed
        .restore(Checkpoint::from_json(&json).unwrap())
        .unwrap();
    println!("\nResumed in: {}", resumed.current());
    println!("Run: {:?}", resumed.global_context());
    println!("Reducing context: {:?}", resumed.current_context());

    resumed.transition("REDUCED", None).unwrap();
    println!("Finished in: {}", resumed.current());

    fs::remove_file(&path).ok();
    println!("\n=== Example Complete ===");
}
