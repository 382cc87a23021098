//! Process-wide selection broadcast.
//!
//! A single owned mutable cell behind one setter; every widget observes
//! by subscription callback in stable registration order instead of
//! polling a shared reference. The cross-boundary frame port lives here
//! too: it is an explicit inbound/outbound port with a fixed message
//! schema, not an ambient global listener.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Callback invoked with the new selection on every change.
pub type SelectionCallback = Box<dyn FnMut(Option<usize>)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// Broadcast channel for the selected dive index.
///
/// Single-threaded by design: one logical thread services frames and
/// input events, so interior mutability via `Cell`/`RefCell` is enough
/// and `set_selection` takes `&self` (the bus is shared as `Rc`).
#[derive(Default)]
pub struct SelectionBus {
    selected: Cell<Option<usize>>,
    subscribers: RefCell<Vec<(SubscriberId, SelectionCallback)>>,
    pending_subs: RefCell<Vec<(SubscriberId, SelectionCallback)>>,
    pending_unsubs: RefCell<Vec<SubscriberId>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
}

impl SelectionBus {
    /// New bus with no selection and no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection (0-based), without waiting for a notification.
    pub fn selection(&self) -> Option<usize> {
        self.selected.get()
    }

    /// Register a callback. It fires on every future change, after all
    /// previously registered subscribers. Safe to call from inside a
    /// notification; the new subscriber joins after the current cycle.
    pub fn subscribe(&self, cb: SelectionCallback) -> SubscriberId {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        if self.notifying.get() {
            self.pending_subs.borrow_mut().push((id, cb));
        } else {
            self.subscribers.borrow_mut().push((id, cb));
        }
        id
    }

    /// Remove a previously registered callback. Takes effect after the
    /// current notification cycle if one is running.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.notifying.get() {
            self.pending_unsubs.borrow_mut().push(id);
        } else {
            self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Update the selection and synchronously notify every subscriber in
    /// registration order, exactly once each.
    ///
    /// Setting the value already held is a no-op (this also breaks
    /// cross-boundary echo loops). A re-entrant call with a different
    /// value from inside a subscriber is rejected and logged: a veto or
    /// transform must happen before this entry point, never during
    /// notification, or the notification order would become ambiguous.
    pub fn set_selection(&self, index: Option<usize>) {
        if self.selected.get() == index {
            return;
        }
        if self.notifying.get() {
            log::warn!("[bus] re-entrant set_selection({index:?}) ignored during notification");
            return;
        }
        self.selected.set(index);
        self.notifying.set(true);
        {
            let mut subs = self.subscribers.borrow_mut();
            for (_, cb) in subs.iter_mut() {
                cb(index);
            }
        }
        self.notifying.set(false);
        self.apply_pending();
    }

    fn apply_pending(&self) {
        let added = std::mem::take(&mut *self.pending_subs.borrow_mut());
        let removed = std::mem::take(&mut *self.pending_unsubs.borrow_mut());
        let mut subs = self.subscribers.borrow_mut();
        subs.extend(added);
        if !removed.is_empty() {
            subs.retain(|(sid, _)| !removed.contains(sid));
        }
    }
}

/// Cross-boundary message schema shared with any embedded frame.
///
/// Serialized form: `{"type": "diveSelected", "diveNumber": 7}` with a
/// 1-based dive number, matching the widget contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FrameMessage {
    /// A dive was selected, on either side of the boundary.
    #[serde(rename = "diveSelected", rename_all = "camelCase")]
    DiveSelected {
        /// 1-based dive number as exposed to widgets and frames.
        dive_number: u32,
    },
}

/// Inbound/outbound port linking the bus to an out-of-process frame.
///
/// Inbound messages are translated to 0-based indices and republished on
/// the bus so every in-process subscriber stays consistent; every
/// in-process change is queued outward in the same schema for the host
/// to drain and deliver over its message channel.
pub struct FramePort {
    outbox: Rc<RefCell<VecDeque<FrameMessage>>>,
    sub: SubscriberId,
}

impl FramePort {
    /// Attach a port to the bus, registering its outbound subscriber.
    pub fn attach(bus: &Rc<SelectionBus>) -> Self {
        let outbox: Rc<RefCell<VecDeque<FrameMessage>>> = Rc::default();
        let ob = Rc::clone(&outbox);
        let sub = bus.subscribe(Box::new(move |sel| {
            if let Some(i) = sel {
                ob.borrow_mut().push_back(FrameMessage::DiveSelected {
                    dive_number: i as u32 + 1,
                });
            }
        }));
        Self { outbox, sub }
    }

    /// Handle one inbound frame message: translate the 1-based dive
    /// number to the internal 0-based index and republish on the bus.
    pub fn handle_inbound(&self, bus: &SelectionBus, msg: FrameMessage) {
        match msg {
            FrameMessage::DiveSelected { dive_number } => {
                if dive_number == 0 {
                    log::warn!("[frame] inbound diveSelected with diveNumber 0 ignored");
                    return;
                }
                bus.set_selection(Some(dive_number as usize - 1));
            }
        }
    }

    /// Parse and handle one inbound JSON message.
    pub fn handle_inbound_json(
        &self,
        bus: &SelectionBus,
        raw: &str,
    ) -> Result<(), serde_json::Error> {
        let msg: FrameMessage = serde_json::from_str(raw)?;
        self.handle_inbound(bus, msg);
        Ok(())
    }

    /// Drain messages queued for delivery to the embedded frame.
    pub fn drain_outbound(&self) -> Vec<FrameMessage> {
        self.outbox.borrow_mut().drain(..).collect()
    }

    /// Subscriber id of the outbound half, for detaching.
    pub fn subscriber(&self) -> SubscriberId {
        self.sub
    }
}
