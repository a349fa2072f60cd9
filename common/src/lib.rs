pub mod metrics;
pub mod tracer;

/// Raw ADC count as delivered by the digitiser.
pub type Sample = i16;
/// Detector (PMT) channel identifier.
pub type Channel = i16;
/// Start time of a record in nanoseconds since the unix epoch.
pub type Time = i64;
/// Width of a single sample in nanoseconds.
pub type SampleWidth = i16;
/// Number of samples in a record or pulse.
pub type Length = i32;
/// Index of a fragment within its pulse.
pub type FragmentIndex = i16;

/// Number of sample slots in every record, regardless of how many are valid.
pub const SAMPLES_PER_RECORD: usize = 600;

/// Number of PMT channels read out by the detector.
pub const NUM_CHANNELS: Channel = 494;
