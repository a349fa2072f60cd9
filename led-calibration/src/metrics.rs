use crate::selection::SelectionSummary;
use metrics::counter;
use pmt_calibration_common::metrics::{
    dropped::{self, DropReason},
    names::{ENTRIES_PRODUCED, RECORDS_DROPPED, RECORDS_RECEIVED},
};

pub(crate) fn record_selection(summary: &SelectionSummary) {
    counter!(RECORDS_RECEIVED).increment(summary.received as u64);
    for reason in [
        DropReason::ChannelNotSelected,
        DropReason::ContinuationFragment,
        DropReason::IncompleteRecord,
    ] {
        let count = summary.dropped_by(reason);
        if count > 0 {
            counter!(RECORDS_DROPPED, &[dropped::get_label(reason)]).increment(count as u64);
        }
    }
}

pub(crate) fn record_entries(num_entries: usize) {
    counter!(ENTRIES_PRODUCED).increment(num_entries as u64);
}
