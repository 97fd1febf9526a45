//! Per-block channel views.
//!
//! A [`Block`] is the set of non-owning channel windows handed to a
//! real-time client for one processing call. It is rebuilt for every block
//! from host-owned sample storage and never outlives the call.
//!
//! # Real-Time Safety
//!
//! Channel slots are fixed-size arrays, so building a block performs no heap
//! allocation.
//!
//! # Example: Gain
//!
//! ```ignore
//! fn process(&mut self, params: &ParameterSet, block: &mut Block) {
//!     let gain = params.get(GainParameters::GAIN) as f32;
//!     for (input, output) in block.zip_channels() {
//!         for (i, o) in input.iter().zip(output.iter_mut()) {
//!             *o = *i * gain;
//!         }
//!     }
//! }
//! ```

use crate::types::{Sample, MAX_CHANNELS};

/// Input and output channel views for one processing block.
///
/// Every view addresses exactly [`Block::num_samples`] samples, whatever the
/// length of the underlying storage or of previous blocks.
pub struct Block<'a> {
    /// Input channel views (host audio, read-only)
    inputs: [Option<&'a [Sample]>; MAX_CHANNELS],
    /// Output channel views (host audio or staged control values)
    outputs: [Option<&'a mut [Sample]>; MAX_CHANNELS],
    num_input_channels: usize,
    num_output_channels: usize,
    num_samples: usize,
}

impl<'a> Block<'a> {
    /// Bind channel views to host storage for a block of `num_samples`.
    ///
    /// Channels beyond [`MAX_CHANNELS`] are ignored.
    ///
    /// # Panics
    ///
    /// Panics if any channel slice is shorter than `num_samples`.
    pub fn new(
        inputs: impl IntoIterator<Item = &'a [Sample]>,
        outputs: impl IntoIterator<Item = &'a mut [Sample]>,
        num_samples: usize,
    ) -> Self {
        let mut input_arr: [Option<&'a [Sample]>; MAX_CHANNELS] = [None; MAX_CHANNELS];
        let mut num_input_channels = 0;
        for (i, slice) in inputs.into_iter().take(MAX_CHANNELS).enumerate() {
            input_arr[i] = Some(&slice[..num_samples]);
            num_input_channels = i + 1;
        }

        // Can't use [None; N] for &mut because it's not Copy
        let mut output_arr: [Option<&'a mut [Sample]>; MAX_CHANNELS] = std::array::from_fn(|_| None);
        let mut num_output_channels = 0;
        for (i, slice) in outputs.into_iter().take(MAX_CHANNELS).enumerate() {
            output_arr[i] = Some(&mut slice[..num_samples]);
            num_output_channels = i + 1;
        }

        Self {
            inputs: input_arr,
            outputs: output_arr,
            num_input_channels,
            num_output_channels,
            num_samples,
        }
    }

    /// Bind input views for a block of `num_samples` and one-sample control
    /// output slots.
    ///
    /// Control outputs are not block-relative: each slot holds the single
    /// value a control-rate client produces per block.
    ///
    /// # Panics
    ///
    /// Panics if any input slice is shorter than `num_samples` or any
    /// control slot is empty.
    pub fn with_control_outputs(
        inputs: impl IntoIterator<Item = &'a [Sample]>,
        controls: impl IntoIterator<Item = &'a mut [Sample]>,
        num_samples: usize,
    ) -> Self {
        let mut block = Self::new(inputs, std::iter::empty::<&'a mut [Sample]>(), num_samples);
        for (i, slot) in controls.into_iter().take(MAX_CHANNELS).enumerate() {
            block.outputs[i] = Some(&mut slot[..1]);
            block.num_output_channels = i + 1;
        }
        block
    }

    /// Number of samples addressable in every view of this block.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    #[inline]
    pub fn num_input_channels(&self) -> usize {
        self.num_input_channels
    }

    #[inline]
    pub fn num_output_channels(&self) -> usize {
        self.num_output_channels
    }

    /// Input channel by index, or an empty slice if it doesn't exist.
    #[inline]
    pub fn input(&self, channel: usize) -> &[Sample] {
        self.inputs
            .get(channel)
            .and_then(|opt| opt.as_deref())
            .unwrap_or(&[])
    }

    /// Mutable output channel by index.
    ///
    /// # Panics
    ///
    /// Panics if the channel index is out of bounds.
    #[inline]
    pub fn output(&mut self, channel: usize) -> &mut [Sample] {
        self.outputs[channel]
            .as_deref_mut()
            .expect("output channel out of bounds")
    }

    /// Mutable output channel by index, `None` if it doesn't exist.
    #[inline]
    pub fn output_checked(&mut self, channel: usize) -> Option<&mut [Sample]> {
        self.outputs.get_mut(channel).and_then(|opt| opt.as_deref_mut())
    }

    /// Iterate over all input channels.
    pub fn inputs(&self) -> impl Iterator<Item = &[Sample]> + '_ {
        self.inputs[..self.num_input_channels]
            .iter()
            .filter_map(|opt| opt.as_deref())
    }

    /// Iterate over all output channels mutably.
    pub fn outputs_mut(&mut self) -> impl Iterator<Item = &mut [Sample]> + use<'_, 'a> {
        self.outputs[..self.num_output_channels]
            .iter_mut()
            .filter_map(|opt| opt.as_deref_mut())
    }

    /// Iterate over paired (input, output) channels.
    ///
    /// Only yields channels that exist in both directions.
    pub fn zip_channels(&mut self) -> impl Iterator<Item = (&[Sample], &mut [Sample])> + use<'_, 'a> {
        let num_pairs = self.num_input_channels.min(self.num_output_channels);
        self.inputs[..num_pairs]
            .iter()
            .zip(self.outputs[..num_pairs].iter_mut())
            .filter_map(|(i, o)| match (i.as_deref(), o.as_deref_mut()) {
                (Some(i), Some(o)) => Some((i, o)),
                _ => None,
            })
    }

    /// Clear all output channels to silence.
    pub fn clear_outputs(&mut self) {
        for output in self.outputs_mut() {
            output.fill(0.0);
        }
    }
}
