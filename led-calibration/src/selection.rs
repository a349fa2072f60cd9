use crate::{parameters::ChannelList, record::RawRecord};
use pmt_calibration_common::metrics::dropped::DropReason;

/// How many records of a batch survived selection, and why the rest did not.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub received: usize,
    pub channel_not_selected: usize,
    pub continuation_fragments: usize,
    pub incomplete_records: usize,
    pub selected: usize,
}

impl SelectionSummary {
    pub fn dropped(&self) -> usize {
        self.received - self.selected
    }

    pub fn dropped_by(&self, reason: DropReason) -> usize {
        match reason {
            DropReason::ChannelNotSelected => self.channel_not_selected,
            DropReason::ContinuationFragment => self.continuation_fragments,
            DropReason::IncompleteRecord => self.incomplete_records,
        }
    }
}

/// Keeps the records recorded on one of `channels`, in their original order.
pub fn filter_channels<'a, I>(records: I, channels: &ChannelList) -> Vec<&'a RawRecord>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .filter(|record| channels.contains(record.channel))
        .collect()
}

/// Keeps the first fragment of each pulse, and only when it fills the whole record.
pub fn select_pulses<'a, I>(records: I) -> Vec<&'a RawRecord>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .filter(|record| rejection(record).is_none())
        .collect()
}

fn rejection(record: &RawRecord) -> Option<DropReason> {
    if !record.is_first_fragment() {
        Some(DropReason::ContinuationFragment)
    } else if !record.is_full_length() {
        Some(DropReason::IncompleteRecord)
    } else {
        None
    }
}

/// Applies the channel filter then the pulse selection, counting what each drops.
#[tracing::instrument(skip_all, fields(num_records = records.len(), num_selected))]
pub fn select<'a>(
    records: &'a [RawRecord],
    channels: &ChannelList,
) -> (Vec<&'a RawRecord>, SelectionSummary) {
    let mut summary = SelectionSummary {
        received: records.len(),
        ..Default::default()
    };

    let on_channel = filter_channels(records, channels);
    summary.channel_not_selected = records.len() - on_channel.len();

    let selected: Vec<_> = on_channel
        .into_iter()
        .filter(|record| match rejection(record) {
            Some(DropReason::ContinuationFragment) => {
                summary.continuation_fragments += 1;
                false
            }
            Some(DropReason::IncompleteRecord) => {
                summary.incomplete_records += 1;
                false
            }
            Some(DropReason::ChannelNotSelected) | None => true,
        })
        .collect();
    summary.selected = selected.len();

    tracing::Span::current().record("num_selected", selected.len());
    (selected, summary)
}
