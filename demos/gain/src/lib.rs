//! Tether Gain - example multichannel gain client.
//!
//! Shows how to:
//! 1. Declare parameters with `#[derive(Parameters)]`
//! 2. Take the channel count as a fixed creation argument
//! 3. Implement a real-time client against `Block`
//! 4. Register the class with a host bridge's registry

use tether::prelude::*;

// =============================================================================
// Class Configuration
// =============================================================================

/// Host-facing class metadata.
pub static CONFIG: ClassConfig = ClassConfig::new("gain~").with_help("tether-gain");

// =============================================================================
// Parameters
// =============================================================================

/// Parameter schema for the gain client.
///
/// `gain~ 2 @gain -6` creates a stereo instance at -6 dB; the gain can be
/// changed later with the `gain` message.
#[derive(Parameters)]
pub struct GainParameters {
    #[parameter(name = "Channels", default = 1, min = 1, max = 16, fixed)]
    pub channels: Long,

    /// Level in decibels.
    #[parameter(name = "Gain", default = 0.0, min = -60.0, max = 12.0)]
    pub gain: Float,
}

impl GainParameters {
    /// Linear multiplier for a level in decibels.
    ///
    /// ```text
    /// linear = 10^(dB / 20)
    /// ```
    #[inline]
    pub fn linear(db: f64) -> Sample {
        10f64.powf(db / 20.0) as Sample
    }
}

// =============================================================================
// Client
// =============================================================================

/// Multichannel gain.
pub struct Gain {
    channels: usize,
}

impl Client for Gain {
    type Parameters = GainParameters;
    type Capability = RealTimeOnly;

    fn new(params: &ParameterSet) -> Self {
        Self {
            channels: params.get(GainParameters::CHANNELS) as usize,
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
        log::debug!("gain~: {} channels at {} Hz", self.channels, sample_rate);
    }

    fn process(&mut self, params: &ParameterSet, block: &mut Block<'_>) {
        let gain = GainParameters::linear(params.get(GainParameters::GAIN));
        for (input, output) in block.zip_channels() {
            for (i, o) in input.iter().zip(output.iter_mut()) {
                *o = *i * gain;
            }
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Register the `gain~` class with a host bridge.
pub fn register<H: HostObject>(registry: &mut ClassRegistry<H>) -> AdapterResult<&ClassSpec> {
    registry.register::<Gain>(&CONFIG)
}
