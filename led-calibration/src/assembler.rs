use crate::{
    amplitude::Amplitudes,
    record::{CalibrationEntry, RecordHeader, WindowMetric},
};
use itertools::izip;

/// Packages the metrics of each record with its identity fields.
/// All inputs are index aligned, one element per selected record.
pub fn assemble(
    headers: &[RecordHeader],
    amplitudes: &Amplitudes,
    area: &[WindowMetric],
) -> Vec<CalibrationEntry> {
    debug_assert_eq!(headers.len(), amplitudes.led.len());
    debug_assert_eq!(headers.len(), amplitudes.noise.len());
    debug_assert_eq!(headers.len(), area.len());

    izip!(headers, &amplitudes.led, &amplitudes.noise, area)
        .map(|(header, led, noise, area)| CalibrationEntry {
            area: area.value,
            amplitude_led: led.value,
            amplitude_noise: noise.value,
            channel: header.channel,
            time: header.time,
            dt: header.dt,
            length: header.length,
        })
        .collect()
}
