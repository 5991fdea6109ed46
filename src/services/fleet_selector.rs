use tracing::warn;

use crate::errors::PipelineError;
use crate::models::{Fleet, StationSnapshot};
use crate::services::time_codec::{to_local, to_utc_normalized};

/// Selects the allow-listed stations and derives the local "last update" label.
///
/// The label comes from the first row of the whole fleet, in feed order, that
/// has every field populated. Selected stations are returned in allow-list
/// order with blank numeric cells filled with zero. The fleet is not modified.
///
/// # Arguments
///
/// * 'fleet' - the fleet-wide snapshot
/// * 'allow_list' - station ids to show, in display order
/// * 'reference_zone' - IANA zone the label is rendered in
pub fn select(
    fleet: &Fleet,
    allow_list: &[String],
    reference_zone: &str,
) -> Result<(Vec<StationSnapshot>, String), PipelineError> {
    if fleet.is_empty() {
        return Err(PipelineError::EmptyFleet);
    }

    let as_of_raw = fleet
        .rows()
        .iter()
        .find(|row| row.is_complete())
        .and_then(|row| row.as_of.as_deref())
        .ok_or_else(|| {
            warn!("Fleet of {} stations has no fully populated row", fleet.len());
            PipelineError::EmptyFleet
        })?;

    let as_of_local = to_local(&to_utc_normalized(as_of_raw)?, reference_zone)?;

    let selected = allow_list
        .iter()
        .map(|id| {
            fleet
                .get(id)
                .map(StationSnapshot::filled_from)
                .ok_or_else(|| PipelineError::MissingStation(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((selected, as_of_local))
}
