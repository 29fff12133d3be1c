//! Downstream sink for triggered payloads.

use {
    log::info,
    parking_lot::Mutex,
    serde::{Deserialize, Serialize},
};

/// Fixed name every emitted event is tagged with.
pub const EVENT_NAME: &str = "BasefeeAlert";

/// One republished payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub data: Vec<u8>,
}

impl Event {
    pub fn new(data: &[u8]) -> Self {
        Self {
            name: EVENT_NAME.to_string(),
            data: data.to_vec(),
        }
    }
}

/// Fire-and-forget republishing of a payload. No filtering, no validation.
pub trait Emitter {
    fn emit_signal(&self, data: &[u8]);
}

impl<E: Emitter + ?Sized> Emitter for &E {
    fn emit_signal(&self, data: &[u8]) {
        (**self).emit_signal(data)
    }
}

/// Forward a `should_respond` result to `emitter` when it triggered.
///
/// Returns whether an event was emitted.
pub fn forward<E: Emitter + ?Sized>(emitter: &E, triggered: bool, payload: &[u8]) -> bool {
    if triggered {
        emitter.emit_signal(payload);
    }
    triggered
}

/// Publishes each payload as an `info` log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmitter;

impl Emitter for LogEmitter {
    fn emit_signal(&self, data: &[u8]) {
        info!("{EVENT_NAME}: 0x{}", hex::encode(data));
    }
}

/// Keeps every emitted event in memory.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<Event>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drain all recorded events.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl Emitter for RecordingEmitter {
    fn emit_signal(&self, data: &[u8]) {
        self.events.lock().push(Event::new(data));
    }
}

/// Fans each payload out to two emitters.
#[derive(Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: Emitter, B: Emitter> Emitter for Tee<A, B> {
    fn emit_signal(&self, data: &[u8]) {
        self.0.emit_signal(data);
        self.1.emit_signal(data);
    }
}
