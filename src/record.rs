//! History record types: [`Record`] and [`ChannelReading`].
//!
//! A [`Record`] is one 84-byte entry of a history file: an optional timestamp
//! and the readings of the nine channels, internal sensor first.

use std::fmt;

use chrono::NaiveDateTime;

use crate::types::CHANNEL_COUNT;

/// Temperature and humidity of a single channel.
///
/// `None` means the sensor was not connected or the reading was invalid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelReading {
    /// Temperature in °C.
    pub temperature: Option<f32>,
    /// Relative humidity in %.
    pub humidity: Option<f32>,
}

impl ChannelReading {
    pub fn new(temperature: Option<f32>, humidity: Option<f32>) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    /// A channel with both readings present.
    pub fn connected(temperature: f32, humidity: f32) -> Self {
        Self::new(Some(temperature), Some(humidity))
    }

    /// True if neither temperature nor humidity is present.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }
}

impl From<(Option<f32>, Option<f32>)> for ChannelReading {
    fn from((temperature, humidity): (Option<f32>, Option<f32>)) -> Self {
        Self::new(temperature, humidity)
    }
}

impl fmt::Display for ChannelReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature {
            Some(t) => write!(f, "{t:.1}°C")?,
            None => write!(f, "--")?,
        }
        match self.humidity {
            Some(h) => write!(f, "/{h:.0}%"),
            None => write!(f, "/--"),
        }
    }
}

/// A decoded history entry.
///
/// `channels` should hold exactly [`CHANNEL_COUNT`] readings. It is a `Vec`
/// rather than an array so that a wrong count is reported by
/// [`encode`](crate::encode()) instead of being repaired silently.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// `None` marks an entry whose stored timestamp was illegal.
    pub timestamp: Option<NaiveDateTime>,
    pub channels: Vec<ChannelReading>,
}

impl Record {
    /// Create a record with nine empty channels.
    pub fn new(timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            timestamp,
            channels: vec![ChannelReading::default(); CHANNEL_COUNT],
        }
    }

    /// Set the reading of channel `index` (0 = internal sensor).
    ///
    /// Indices past the end grow the channel list with empty readings.
    pub fn with_channel(mut self, index: usize, reading: ChannelReading) -> Self {
        if index >= self.channels.len() {
            self.channels.resize(index + 1, ChannelReading::default());
        }
        self.channels[index] = reading;
        self
    }

    /// Replace all channel readings.
    pub fn with_channels(mut self, channels: Vec<ChannelReading>) -> Self {
        self.channels = channels;
        self
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelReading> {
        self.channels.get(index)
    }

    /// The internal sensor (channel 0).
    pub fn internal(&self) -> Option<&ChannelReading> {
        self.channel(0)
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(t) => write!(f, "{t}")?,
            None => write!(f, "<no timestamp>")?,
        }
        for (i, ch) in self.channels.iter().enumerate() {
            let sep = if i == 0 { " | " } else { " " };
            write!(f, "{sep}{ch}")?;
        }
        Ok(())
    }
}
