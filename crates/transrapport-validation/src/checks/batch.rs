//! Checks across a marker batch.

use transrapport_core::{MarkerEvent, ValidationError};

/// Time-adjacent markers from the same speaker whose ranges overlap.
pub fn speaker_overlaps(markers: &[MarkerEvent]) -> Vec<ValidationError> {
    let mut sorted: Vec<&MarkerEvent> = markers.iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    sorted
        .windows(2)
        .filter(|pair| pair[0].end_time > pair[1].start_time && pair[0].speaker == pair[1].speaker)
        .map(|pair| ValidationError::SpeakerOverlap {
            first_id: pair[0].id.clone(),
            second_id: pair[1].id.clone(),
        })
        .collect()
}

/// Markers that start before their predecessor.
pub fn ordering(markers: &[MarkerEvent]) -> Vec<ValidationError> {
    markers
        .windows(2)
        .filter(|pair| pair[1].start_time < pair[0].start_time)
        .map(|pair| ValidationError::MarkerOrder {
            marker_id: pair[1].id.clone(),
        })
        .collect()
}
