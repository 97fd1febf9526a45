//! Shared host bridge for integration tests.
//!
//! The recording host keeps its event log behind an `Arc` so tests can
//! inspect it after the host has been moved into a type-erased instance.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tether::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SignalInlet,
    Outlet(OutletKind),
    Bang(OutletId),
    List(OutletId, Vec<Atom>),
    Warning(String),
    Error(String),
}

/// Shared view of everything a host object was asked to do.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Warning(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn outlets(&self) -> Vec<OutletKind> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Outlet(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn lists(&self) -> Vec<Vec<Atom>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::List(_, atoms) => Some(atoms),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

pub struct RecordingHost {
    log: EventLog,
    store: Option<Arc<MemoryStore>>,
    outlets: usize,
}

impl RecordingHost {
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        let host = Self {
            log: log.clone(),
            store: None,
            outlets: 0,
        };
        (host, log)
    }

    pub fn with_store(store: Arc<MemoryStore>) -> (Self, EventLog) {
        let (mut host, log) = Self::new();
        host.store = Some(store);
        (host, log)
    }
}

impl HostObject for RecordingHost {
    fn signal_inlet_new(&mut self) {
        self.log.push(Event::SignalInlet);
    }

    fn outlet_new(&mut self, kind: OutletKind) -> OutletId {
        self.log.push(Event::Outlet(kind));
        self.outlets += 1;
        OutletId(self.outlets - 1)
    }

    fn outlet_bang(&mut self, outlet: OutletId) {
        self.log.push(Event::Bang(outlet));
    }

    fn outlet_list(&mut self, outlet: OutletId, atoms: &[Atom]) {
        self.log.push(Event::List(outlet, atoms.to_vec()));
    }

    fn post_warning(&mut self, message: &str) {
        self.log.push(Event::Warning(message.to_string()));
    }

    fn post_error(&mut self, message: &str) {
        self.log.push(Event::Error(message.to_string()));
    }

    fn buffer_store(&self) -> Option<Arc<dyn BufferStore>> {
        self.store.clone().map(|s| s as Arc<dyn BufferStore>)
    }
}

/// Single-channel named buffers.
#[derive(Default)]
pub struct MemoryStore {
    buffers: Mutex<HashMap<String, Vec<Sample>>>,
}

impl MemoryStore {
    pub fn insert(&self, name: &str, data: Vec<Sample>) {
        self.buffers.lock().unwrap().insert(name.to_string(), data);
    }

    pub fn get(&self, name: &str) -> Option<Vec<Sample>> {
        self.buffers.lock().unwrap().get(name).cloned()
    }
}

impl BufferStore for MemoryStore {
    fn contains(&self, name: &str) -> bool {
        self.buffers.lock().unwrap().contains_key(name)
    }

    fn frames(&self, name: &str) -> Option<usize> {
        self.buffers.lock().unwrap().get(name).map(Vec::len)
    }

    fn channels(&self, name: &str) -> Option<usize> {
        self.contains(name).then_some(1)
    }

    fn read(&self, name: &str, channel: usize) -> Option<Vec<Sample>> {
        if channel != 0 {
            return None;
        }
        self.get(name)
    }

    fn write(&self, name: &str, channel: usize, data: &[Sample]) -> bool {
        if channel != 0 || !self.contains(name) {
            return false;
        }
        self.insert(name, data.to_vec());
        true
    }
}

/// Scheduler that queues tasks until the test drains them.
#[derive(Default)]
pub struct QueueScheduler {
    tasks: Mutex<Vec<Deferred>>,
}

impl QueueScheduler {
    pub fn take(&self) -> Vec<Deferred> {
        std::mem::take(&mut *self.tasks.lock().unwrap())
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&self, task: Deferred) {
        self.tasks.lock().unwrap().push(task);
    }
}

/// Hand every queued task back to the instance, as a host timer would.
pub fn drain(instance: &mut dyn Instance, scheduler: &QueueScheduler) {
    for task in scheduler.take() {
        instance.run_deferred(task).unwrap();
    }
}

pub fn floats(values: &[f64]) -> Vec<Atom> {
    values.iter().map(|v| Atom::Float(*v)).collect()
}

pub fn numbers(atoms: &[Atom]) -> Vec<f64> {
    atoms.iter().map(Atom::as_float).collect()
}
