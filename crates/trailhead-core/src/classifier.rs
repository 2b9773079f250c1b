use crate::profile::AttractionPick;
use crate::types::Course;

/// Map the onboarding answers to a course variant. The four combinations
/// are exhaustive and mutually exclusive.
pub fn classify(has_attractions: bool, vr_room: bool) -> Course {
    match (has_attractions, vr_room) {
        (true, true) => Course::AttractionsAndVr,
        (true, false) => Course::AttractionsOnly,
        (false, true) => Course::VrOnly,
        (false, false) => Course::Base,
    }
}

/// True iff at least one attraction was picked.
pub fn has_selected(picks: &[AttractionPick]) -> bool {
    picks.iter().any(|p| p.selected)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
