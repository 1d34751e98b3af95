//! Periodic-sampling button debouncer.
//!
//! Provides [`Debouncer`], which turns raw, possibly bouncing input levels into
//! stable per-channel levels. It is sampled on a fixed tick; a channel's
//! stable level only flips after the raw level has disagreed with it for
//! `threshold` consecutive samples. Channels are independent and may flip in
//! the same tick.

/// An identifier for a channel within a debouncer.
///
/// A plain wrapper around `usize` so channel numbers cannot be mixed up with
/// other indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(pub usize);

impl From<usize> for ChannelId {
    fn from(id: usize) -> Self {
        ChannelId(id)
    }
}

impl From<ChannelId> for usize {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

/// A change of a channel's stable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// The stable level went from low to high.
    Rising,

    /// The stable level went from high to low.
    Falling,
}

/// Errors that can occur during debouncer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceError {
    /// The channel does not exist.
    InvalidChannel {
        /// The requested channel.
        id: ChannelId,
        /// Number of channels the debouncer has.
        channels: usize,
    },

    /// A threshold of zero samples was requested.
    ZeroThreshold,
}

impl core::fmt::Display for DebounceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DebounceError::InvalidChannel { id, channels } => {
                write!(
                    f,
                    "channel {} does not exist, debouncer has {} channels",
                    id.0, channels
                )
            }
            DebounceError::ZeroThreshold => {
                write!(f, "debounce threshold must be at least one sample")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DebounceError {}

/// Source of raw input levels, polled once per tick.
///
/// Implement this for your GPIO or ADC hardware. Report whatever level the
/// hardware reads; floating inputs are not special-cased.
pub trait InputPins {
    /// Returns the raw level of `channel`.
    fn raw_level(&mut self, channel: ChannelId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Channel {
    stable: bool,
    run: u8,
}

impl Channel {
    fn sample(&mut self, raw: bool, threshold: u8) -> Option<Edge> {
        if raw == self.stable {
            self.run = 0;
            return None;
        }

        self.run = self.run.saturating_add(1);
        if self.run < threshold {
            return None;
        }

        self.run = 0;
        self.stable = raw;
        Some(if raw { Edge::Rising } else { Edge::Falling })
    }
}

/// Debounces a fixed number of input channels.
///
/// # Type Parameters
/// * `CHANNELS` - Number of channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<const CHANNELS: usize> {
    channels: [Channel; CHANNELS],
    threshold: u8,
}

impl<const CHANNELS: usize> Debouncer<CHANNELS> {
    /// Creates a debouncer with every channel stable at low.
    ///
    /// # Arguments
    /// * `threshold` - Consecutive disagreeing samples needed to flip a channel
    ///
    /// # Errors
    /// * `ZeroThreshold` - `threshold` is zero
    pub fn new(threshold: u8) -> Result<Self, DebounceError> {
        if threshold == 0 {
            return Err(DebounceError::ZeroThreshold);
        }

        Ok(Self {
            channels: [Channel::default(); CHANNELS],
            threshold,
        })
    }

    /// Feeds one raw sample into `channel`.
    ///
    /// # Returns
    /// * `Ok(Some(edge))` - The stable level flipped on this sample
    /// * `Ok(None)` - The stable level is unchanged
    ///
    /// # Errors
    /// * `InvalidChannel` - The channel does not exist
    pub fn sample(&mut self, channel: ChannelId, raw: bool) -> Result<Option<Edge>, DebounceError> {
        let threshold = self.threshold;
        Ok(self.channel_mut(channel)?.sample(raw, threshold))
    }

    /// Polls every channel of `pins` once and feeds the levels in.
    pub fn sample_all<P: InputPins>(&mut self, pins: &mut P) {
        for (idx, channel) in self.channels.iter_mut().enumerate() {
            let raw = pins.raw_level(ChannelId(idx));
            if let Some(edge) = channel.sample(raw, self.threshold) {
                trace!("debounce channel {} edge {:?}", idx, edge);
            }
        }
    }

    /// Returns the debounced level of `channel`.
    ///
    /// # Errors
    /// * `InvalidChannel` - The channel does not exist
    pub fn is_stable(&self, channel: ChannelId) -> Result<bool, DebounceError> {
        self.channels
            .get(channel.0)
            .map(|c| c.stable)
            .ok_or(DebounceError::InvalidChannel {
                id: channel,
                channels: CHANNELS,
            })
    }

    /// Returns the debounced level of every channel.
    pub fn levels(&self) -> [bool; CHANNELS] {
        core::array::from_fn(|idx| self.channels[idx].stable)
    }

    /// Returns the number of consecutive samples needed to flip a channel.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    fn channel_mut(&mut self, channel: ChannelId) -> Result<&mut Channel, DebounceError> {
        self.channels
            .get_mut(channel.0)
            .ok_or(DebounceError::InvalidChannel {
                id: channel,
                channels: CHANNELS,
            })
    }
}
