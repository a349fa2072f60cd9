use crate::{
    area::widest_integration_end,
    error::{ConfigError, ParseError, WindowKind},
};
use clap::Args;
use pmt_calibration_common::{Channel, NUM_CHANNELS, SAMPLES_PER_RECORD};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
    ops::Range,
    str::FromStr,
};

/// A half-open range `[start, end)` of sample indices within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct SampleWindow {
    pub start: usize,
    pub end: usize,
}

impl SampleWindow {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Restricts the window to the first `len` samples, the way slicing past the end
    /// of a waveform yields only the samples that exist.
    pub(crate) fn clamped(&self, len: usize) -> Range<usize> {
        let end = self.end.min(len);
        self.start.min(end)..end
    }

    fn check_order(&self, kind: WindowKind) -> Result<(), ConfigError> {
        if self.start > self.end {
            Err(ConfigError::ReversedWindow { kind, window: *self })
        } else {
            Ok(())
        }
    }

    fn check_bounds(&self, kind: WindowKind) -> Result<(), ConfigError> {
        if self.end > SAMPLES_PER_RECORD {
            Err(ConfigError::WindowOutOfBounds { kind, window: *self })
        } else {
            Ok(())
        }
    }
}

impl From<(usize, usize)> for SampleWindow {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<SampleWindow> for (usize, usize) {
    fn from(window: SampleWindow) -> Self {
        (window.start, window.end)
    }
}

impl Display for SampleWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

impl FromStr for SampleWindow {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vals: Vec<_> = s
            .trim_matches(|c: char| c == '(' || c == ')')
            .split(',')
            .map(str::trim)
            .collect();
        match vals.as_slice() {
            [start, end] => Ok(SampleWindow::new(start.parse()?, end.parse()?)),
            _ => Err(ParseError::WindowPattern(s.to_owned())),
        }
    }
}

/// The set of PMT channels whose records are calibrated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<Channel>", into = "Vec<Channel>")]
pub struct ChannelList(BTreeSet<Channel>);

impl ChannelList {
    pub fn contains(&self, channel: Channel) -> bool {
        self.0.contains(&channel)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.0.iter().copied()
    }
}

/// Every PMT channel of the detector.
impl Default for ChannelList {
    fn default() -> Self {
        (0..NUM_CHANNELS).collect()
    }
}

impl FromIterator<Channel> for ChannelList {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Channel>> for ChannelList {
    fn from(channels: Vec<Channel>) -> Self {
        channels.into_iter().collect()
    }
}

impl From<ChannelList> for Vec<Channel> {
    fn from(channels: ChannelList) -> Self {
        channels.0.into_iter().collect()
    }
}

/// Accepts `all`, or a comma separated list of channel ids and `first..last` ranges
/// (last exclusive), e.g. `0,4,10..20`.
impl FromStr for ChannelList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::default());
        }
        let mut channels = BTreeSet::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once("..") {
                Some((first, last)) => {
                    let first: Channel = first.trim().parse()?;
                    let last: Channel = last.trim().parse()?;
                    if first > last {
                        return Err(ParseError::ChannelRange(token.to_owned()));
                    }
                    channels.extend(first..last);
                }
                None => {
                    channels.insert(token.parse()?);
                }
            }
        }
        Ok(Self(channels))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Args, Deserialize, Serialize)]
#[serde(default)]
pub struct CalibrationParameters {
    /// Window (samples) for baseline calculation, as "start,end".
    #[clap(long, default_value = "0,40")]
    pub baseline_window: SampleWindow,

    /// Window (samples) where the signal is expected in LED calibration, as "start,end".
    #[clap(long, default_value = "75,105")]
    pub led_window: SampleWindow,

    /// Window (samples) used to measure the noise, as "start,end".
    #[clap(long, default_value = "20,55")]
    pub noise_window: SampleWindow,

    /// PMT channels to calibrate: "all", or ids and ranges such as "0,4,10..20".
    #[clap(long, default_value = "all")]
    pub channel_list: ChannelList,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            baseline_window: SampleWindow::new(0, 40),
            led_window: SampleWindow::new(75, 105),
            noise_window: SampleWindow::new(20, 55),
            channel_list: ChannelList::default(),
        }
    }
}

impl CalibrationParameters {
    /// Checks every window against the record geometry, so that per-record
    /// processing never has to.
    ///
    /// The noise window only needs to lie within the record: a reversed or empty
    /// noise window measures an amplitude of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.baseline_window.check_order(WindowKind::Baseline)?;
        self.baseline_window.check_bounds(WindowKind::Baseline)?;
        if self.baseline_window.is_empty() {
            return Err(ConfigError::EmptyBaselineWindow(self.baseline_window));
        }

        self.led_window.check_order(WindowKind::Led)?;
        self.led_window.check_bounds(WindowKind::Led)?;
        let required = widest_integration_end(self.led_window);
        if required > SAMPLES_PER_RECORD {
            return Err(ConfigError::IntegrationOutOfBounds {
                window: self.led_window,
                required,
            });
        }

        self.noise_window.check_bounds(WindowKind::Noise)
    }
}
