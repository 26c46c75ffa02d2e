//! End-to-end editor workflow, driven the way a UI host would drive it.

use flowstate::{
    bind, create_machine, states, Machine, MachineBuilder, Outcome, StateDecl,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

fn editor() -> Machine {
    create_machine("editor", || {
        states! {
            idle { EDIT => editing },
            editing { SAVE => saving },
            saving (clear_on_exit = true) {
                SUCCESS => idle,
                FAILURE => editing,
            },
        }
    })
    .unwrap()
}

#[test]
fn editor_round_trip() {
    let mut machine = editor();

    assert!(!machine.can("idle", "SAVE"));
    assert!(machine.can("idle", "EDIT"));

    machine.transition("EDIT", None).unwrap();
    assert_eq!(machine.current(), "editing");

    machine.transition("SAVE", None).unwrap();
    assert_eq!(machine.current(), "saving");

    machine.transition("SUCCESS", None).unwrap();
    assert_eq!(machine.current(), "idle");

    let path: Vec<&str> = machine.history().path().iter().map(|s| s.as_str()).collect();
    assert_eq!(path, vec!["idle", "editing", "saving", "idle"]);
}

#[test]
fn failed_save_returns_to_editing_with_error_context() {
    let mut machine = editor();
    machine.transition("EDIT", Some(json!({"text": "hello"}))).unwrap();
    machine.transition("SAVE", Some(json!({"attempt": 1}))).unwrap();

    machine
        .transition("FAILURE", Some(json!({"text": "hello", "error": "offline"})))
        .unwrap();

    assert_eq!(machine.current(), "editing");
    assert_eq!(
        machine.get_context("editing"),
        Some(&json!({"text": "hello", "error": "offline"}))
    );
    assert!(machine.get_context("saving").is_none());
}

#[test]
fn binding_tracks_the_whole_flow() {
    let mut machine = editor();
    let _ = machine.set_global_only(json!({"document": 42}));
    let binding = bind(&mut machine);

    machine.transition("EDIT", Some(json!("draft"))).unwrap();
    assert_eq!(binding.current().state, "editing");
    assert_eq!(binding.current().context, Some(json!("draft")));
    assert_eq!(binding.current().global, Some(json!({"document": 42})));

    machine.transition("SAVE", None).unwrap();
    machine.transition("SUCCESS", None).unwrap();
    assert_eq!(binding.current().state, "idle");
}

#[test]
fn export_matches_two_state_example() {
    let machine = create_machine("pair", || {
        vec![
            StateDecl::new("s1").on("e1", "s2"),
            StateDecl::new("s2").on("e2", "s1"),
        ]
    })
    .unwrap();

    assert_eq!(
        machine.to_xstate_json(),
        json!({
            "id": "pair",
            "initial": "s1",
            "states": {
                "s1": { "on": { "e1": "s2" } },
                "s2": { "on": { "e2": "s1" } },
            }
        })
    );
}

#[test]
fn instances_do_not_share_state() {
    let mut first = editor();
    let second = editor();
    let _ = first.set_global_only(json!("only-first"));
    first.set_clear_context_on_exit("EDIT", true);
    first.watch_entry("*", |_notice, _outbox| Ok(()));
    first.transition("EDIT", Some(json!(1))).unwrap();

    assert_eq!(second.current(), "idle");
    assert!(second.global_context().is_none());
    assert!(second.get_context("editing").is_none());
    assert_eq!(second.watcher_count(), 0);
}

/// The save itself is asynchronous host work: the watcher only signals it,
/// and the result comes back through a later, separate transition.
#[tokio::test]
async fn async_save_feeds_back_through_transition() {
    let (requests, mut pending) = mpsc::unbounded_channel::<Value>();
    let machine = Arc::new(Mutex::new(editor()));

    machine
        .lock()
        .unwrap()
        .watch_entry("saving", move |notice, _outbox| {
            let payload = notice.context.cloned().unwrap_or(Value::Null);
            let _ = requests.send(payload);
            Ok(())
        });

    {
        let mut guard = machine.lock().unwrap();
        guard.transition("EDIT", None).unwrap();
        guard.transition("SAVE", Some(json!({"text": "hello"}))).unwrap();
        assert_eq!(guard.current(), "saving");
    }

    let payload = pending.recv().await.unwrap();
    let shared = Arc::clone(&machine);
    let outcome = tokio::spawn(async move {
        let saved = payload["text"] == "hello";
        let event = if saved { "SUCCESS" } else { "FAILURE" };
        shared.lock().unwrap().transition(event, None)
    })
    .await
    .unwrap()
    .unwrap();

    assert!(matches!(outcome, Outcome::Moved { ref to, .. } if to == "idle"));
    assert_eq!(machine.lock().unwrap().current(), "idle");
}

#[test]
fn typed_contexts_work_through_builder() {
    #[derive(Clone, Debug, PartialEq)]
    struct Draft {
        text: String,
    }

    let mut machine: Machine<Draft, u64> = MachineBuilder::new("typed")
        .states(vec![
            StateDecl::new("idle").on("EDIT", "editing"),
            StateDecl::new("editing"),
        ])
        .build()
        .unwrap();

    let _ = machine.set_global_only(7);
    machine
        .transition(
            "EDIT",
            Some(Draft {
                text: "typed".to_string(),
            }),
        )
        .unwrap();

    assert_eq!(machine.global_context(), Some(&7));
    assert_eq!(machine.current_context().unwrap().text, "typed");
}
