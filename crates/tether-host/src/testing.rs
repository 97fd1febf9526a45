//! Recording host, queue scheduler and small clients for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tether_core::{
    Atom, Block, Buffer, BufferStore, Client, Constraint, Float, Long, NonRealTimeOnly,
    OfflineClient, Outcome, ParamKey, ParameterDescriptor, ParameterSet, Parameters,
    RealTimeAndNonRealTime, RealTimeClient, RealTimeOnly, Sample,
};

use crate::host::{Deferred, HostObject, OutletId, OutletKind, Scheduler};

// =============================================================================
// Host
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SignalInlet,
    Outlet(OutletKind),
    Bang(OutletId),
    List(OutletId, Vec<Atom>),
    Warning(String),
    Error(String),
}

#[derive(Default)]
pub struct MockHost {
    pub events: Vec<Event>,
    pub store: Option<Arc<MemoryStore>>,
    outlets: usize,
}

impl MockHost {
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Warning(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn outlets(&self) -> Vec<OutletKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Outlet(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

impl HostObject for MockHost {
    fn signal_inlet_new(&mut self) {
        self.events.push(Event::SignalInlet);
    }

    fn outlet_new(&mut self, kind: OutletKind) -> OutletId {
        self.events.push(Event::Outlet(kind));
        self.outlets += 1;
        OutletId(self.outlets - 1)
    }

    fn outlet_bang(&mut self, outlet: OutletId) {
        self.events.push(Event::Bang(outlet));
    }

    fn outlet_list(&mut self, outlet: OutletId, atoms: &[Atom]) {
        self.events.push(Event::List(outlet, atoms.to_vec()));
    }

    fn post_warning(&mut self, message: &str) {
        self.events.push(Event::Warning(message.to_string()));
    }

    fn post_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_string()));
    }

    fn buffer_store(&self) -> Option<Arc<dyn BufferStore>> {
        self.store.clone().map(|s| s as Arc<dyn BufferStore>)
    }
}

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

// =============================================================================
// Clients
// =============================================================================

/// Multichannel gain.
pub struct Gain {
    channels: usize,
    pub sample_rate: f64,
}

pub struct GainParameters;

impl GainParameters {
    pub const CHANNELS: ParamKey<Long> = ParamKey::new(0);
    pub const GAIN: ParamKey<Float> = ParamKey::new(1);
}

static GAIN_DESCRIPTORS: [ParameterDescriptor; 2] = [
    ParameterDescriptor::long("Channels", 1)
        .fixed()
        .with_constraints(&[Constraint::Min(1.0), Constraint::Max(8.0)]),
    ParameterDescriptor::float("Gain", 1.0).with_constraints(&[Constraint::Min(0.0), Constraint::Max(4.0)]),
];

impl Parameters for GainParameters {
    fn descriptors() -> &'static [ParameterDescriptor] {
        &GAIN_DESCRIPTORS
    }
}

impl Client for Gain {
    type Parameters = GainParameters;
    type Capability = RealTimeOnly;

    fn new(params: &ParameterSet) -> Self {
        Self {
            channels: params.get(GainParameters::CHANNELS) as usize,
            sample_rate: 0.0,
        }
    }

    fn audio_channels_in(&self) -> usize {
        self.channels
    }

    fn audio_channels_out(&self) -> usize {
        self.channels
    }
}

impl RealTimeClient for Gain {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }

    fn process(&mut self, params: &ParameterSet, block: &mut Block<'_>) {
        let gain = params.get(GainParameters::GAIN) as Sample;
        for (input, output) in block.zip_channels() {
            for (i, o) in input.iter().zip(output.iter_mut()) {
                *o = *i * gain;
            }
        }
    }
}

/// Control-rate peak and block length.
pub struct Meter;

impl Client for Meter {
    type Parameters = tether_core::NoParameters;
    type Capability = RealTimeOnly;

    fn new(_params: &ParameterSet) -> Self {
        Self
    }

    fn audio_channels_in(&self) -> usize {
        1
    }

    fn control_channels_out(&self) -> usize {
        2
    }
}

impl RealTimeClient for Meter {
    fn process(&mut self, _params: &ParameterSet, block: &mut Block<'_>) {
        let peak = block.input(0).iter().fold(0.0, |acc: Sample, x| acc.max(x.abs()));
        let length = block.num_samples() as Sample;
        block.output(0)[0] = peak;
        block.output(1)[0] = length;
    }
}

/// Declares both audio and control outputs.
pub struct Broken;

impl Client for Broken {
    type Parameters = tether_core::NoParameters;
    type Capability = RealTimeOnly;

    fn new(_params: &ParameterSet) -> Self {
        Self
    }

    fn audio_channels_out(&self) -> usize {
        1
    }

    fn control_channels_out(&self) -> usize {
        1
    }
}

impl RealTimeClient for Broken {
    fn process(&mut self, _params: &ParameterSet, _block: &mut Block<'_>) {}
}

/// Offline peak normalisation of a named buffer.
pub struct Normalize {
    pub runs: usize,
}

pub struct NormalizeParameters;

impl NormalizeParameters {
    pub const SOURCE: ParamKey<Buffer> = ParamKey::new(0);
    pub const LEVEL: ParamKey<Float> = ParamKey::new(1);
}

static NORMALIZE_DESCRIPTORS: [ParameterDescriptor; 2] = [
    ParameterDescriptor::buffer("Source"),
    ParameterDescriptor::float("Level", 1.0),
];

impl Parameters for NormalizeParameters {
    fn descriptors() -> &'static [ParameterDescriptor] {
        &NORMALIZE_DESCRIPTORS
    }
}

impl Client for Normalize {
    type Parameters = NormalizeParameters;
    type Capability = NonRealTimeOnly;

    fn new(_params: &ParameterSet) -> Self {
        Self { runs: 0 }
    }
}

impl OfflineClient for Normalize {
    fn process_offline(&mut self, params: &ParameterSet) -> Outcome {
        self.runs += 1;
        let Some(source) = params.get(NormalizeParameters::SOURCE) else {
            return Outcome::error("no source buffer");
        };
        let Some(mut data) = source.read(0) else {
            return Outcome::error(format!("buffer {} not found", source.name()));
        };
        let peak = data.iter().fold(0.0, |acc: Sample, x| acc.max(x.abs()));
        if peak == 0.0 {
            return Outcome::warning("source is silent");
        }
        let scale = params.get(NormalizeParameters::LEVEL) as Sample / peak;
        data.iter_mut().for_each(|x| *x *= scale);
        source.write(0, &data);
        Outcome::ok()
    }
}

/// Real-time gain that can also be triggered offline.
pub struct Recorder {
    pub exports: usize,
}

impl Client for Recorder {
    type Parameters = tether_core::NoParameters;
    type Capability = RealTimeAndNonRealTime;

    fn new(_params: &ParameterSet) -> Self {
        Self { exports: 0 }
    }

    fn audio_channels_in(&self) -> usize {
        1
    }

    fn control_channels_out(&self) -> usize {
        1
    }
}

impl RealTimeClient for Recorder {
    fn process(&mut self, _params: &ParameterSet, block: &mut Block<'_>) {
        let sum: Sample = block.input(0).iter().sum();
        block.output(0)[0] = sum;
    }
}

impl OfflineClient for Recorder {
    fn process_offline(&mut self, _params: &ParameterSet) -> Outcome {
        self.exports += 1;
        Outcome::ok()
    }
}

/// Band splitter with a two-element fixed range.
pub struct Crossover {
    channels: usize,
}

pub struct CrossoverParameters;

impl CrossoverParameters {
    pub const CHANNELS: ParamKey<Long> = ParamKey::new(1);
}

static CROSSOVER_DESCRIPTORS: [ParameterDescriptor; 2] = [
    ParameterDescriptor::floats("Range", [0.0, 1.0])
        .fixed()
        .with_constraints(&[Constraint::Ascending]),
    ParameterDescriptor::long("Channels", 1)
        .fixed()
        .with_constraints(&[Constraint::Min(1.0), Constraint::Max(8.0)]),
];

impl Parameters for CrossoverParameters {
    fn descriptors() -> &'static [ParameterDescriptor] {
        &CROSSOVER_DESCRIPTORS
    }
}

impl Client for Crossover {
    type Parameters = CrossoverParameters;
    type Capability = RealTimeOnly;

    fn new(params: &ParameterSet) -> Self {
        Self {
            channels: params.get(CrossoverParameters::CHANNELS) as usize,
        }
    }

    fn audio_channels_in(&self) -> usize {
        self.channels
    }

    fn audio_channels_out(&self) -> usize {
        self.channels
    }
}

impl RealTimeClient for Crossover {
    fn process(&mut self, _params: &ParameterSet, block: &mut Block<'_>) {
        block.clear_outputs();
    }
}

/// Passes audio through with no bands, reports one value per band otherwise.
pub struct Spectrum {
    bands: usize,
}

pub struct SpectrumParameters;

impl SpectrumParameters {
    pub const BANDS: ParamKey<Long> = ParamKey::new(0);
}

static SPECTRUM_DESCRIPTORS: [ParameterDescriptor; 1] =
    [ParameterDescriptor::long("Bands", 0).with_constraints(&[Constraint::Min(0.0)])];

impl Parameters for SpectrumParameters {
    fn descriptors() -> &'static [ParameterDescriptor] {
        &SPECTRUM_DESCRIPTORS
    }
}

impl Client for Spectrum {
    type Parameters = SpectrumParameters;
    type Capability = RealTimeOnly;

    fn new(params: &ParameterSet) -> Self {
        Self {
            bands: params.get(SpectrumParameters::BANDS) as usize,
        }
    }

    fn audio_channels_in(&self) -> usize {
        1
    }

    fn audio_channels_out(&self) -> usize {
        usize::from(self.bands == 0)
    }

    fn control_channels_out(&self) -> usize {
        self.bands
    }
}

impl RealTimeClient for Spectrum {
    fn process(&mut self, _params: &ParameterSet, block: &mut Block<'_>) {
        block.outputs_mut().for_each(|output| output.fill(1.0));
    }
}
