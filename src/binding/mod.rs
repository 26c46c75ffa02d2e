//! Reactive binding for UI layers.
//!
//! A [`Binding`] is the one wildcard-entry subscriber of a machine. On every
//! state entry it publishes the machine's `(state, context, global)` triple
//! into a `tokio::sync::watch` channel, which UI code observes without
//! touching the machine itself.

use crate::core::StateName;
use crate::engine::{Machine, WatchHandle, WatchTarget};
use std::sync::Arc;
use tokio::sync::watch;

/// What the UI sees: the current state and its data.
#[derive(Clone, Debug, PartialEq)]
pub struct MachineView<C, G> {
    pub state: StateName,
    pub context: Option<C>,
    pub global: Option<G>,
}

/// Live mirror of one machine's view.
pub struct Binding<C, G> {
    handle: WatchHandle,
    sender: Arc<watch::Sender<MachineView<C, G>>>,
}

/// Attach a binding to `machine`, seeded with its current view.
pub fn bind<C, G>(machine: &mut Machine<C, G>) -> Binding<C, G>
where
    C: Clone + Send + Sync + 'static,
    G: Clone + Send + Sync + 'static,
{
    let initial = MachineView {
        state: machine.current().clone(),
        context: machine.current_context().cloned(),
        global: machine.global_context().cloned(),
    };
    let (sender, _) = watch::channel(initial);
    let sender = Arc::new(sender);

    let publisher = Arc::clone(&sender);
    let handle = machine.watch_entry(WatchTarget::AnyState, move |notice, _outbox| {
        publisher.send_replace(MachineView {
            state: notice.state.clone(),
            context: notice.context.cloned(),
            global: notice.global.cloned(),
        });
        Ok(())
    });

    Binding { handle, sender }
}

impl<C: Clone, G: Clone> Binding<C, G> {
    /// Latest published view.
    pub fn current(&self) -> MachineView<C, G> {
        self.sender.borrow().clone()
    }

    /// A receiver that is notified on every state entry.
    pub fn subscribe(&self) -> watch::Receiver<MachineView<C, G>> {
        self.sender.subscribe()
    }

    /// Stop mirroring. Existing receivers keep the last view.
    pub fn detach(self, machine: &mut Machine<C, G>) -> bool {
        machine.unwatch(&self.handle)
    }
}
