//! Pipeline — one flush worth of records through the group state machine and
//! the record builder.
//!
//! The group state is a local of [`process_batch`]; nothing carries over from
//! one batch to the next.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::metrics::FlushMetrics;
use crate::group::{GroupState, Step};
use crate::record::{RecordBuilder, StructuredRecord};
use crate::value::DynamicMap;

/// Convert an ordered batch. Group markers update the context and produce
/// no output; every other record yields exactly one [`StructuredRecord`].
pub fn process_batch<I>(
    builder: &RecordBuilder,
    entries: I,
    metrics: Option<&FlushMetrics>,
) -> Vec<StructuredRecord>
where
    I: IntoIterator<Item = (DateTime<Utc>, DynamicMap)>,
{
    let mut state = GroupState::new();
    let mut out = Vec::new();

    for (timestamp, record) in entries {
        match state.step(&record) {
            Step::Started => {
                let ctx = state.context();
                debug!(
                    resource = ctx.resource.is_some(),
                    scope = ctx.scope.is_some(),
                    "Record group started"
                );
                if let Some(m) = metrics {
                    m.record_group_start();
                }
            }
            Step::Ended => {
                debug!("Record group ended");
                if let Some(m) = metrics {
                    m.record_group_end();
                }
            }
            Step::Forward => out.push(builder.build(timestamp, &record, state.context())),
        }
    }

    out
}
