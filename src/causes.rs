//! Static cause-code exclusion lookup.
//!
//! Grade-crossing and other out-of-scope cause codes whose incidents
//! are tracked elsewhere. Labels document what each code means; the
//! pipeline consumes only the key set.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cause codes excluded from the export, with their descriptive labels.
pub static EXCLUDED_CAUSES: &[(&str, &str)] = &[
    ("M301", "Highway user impact with train at highway-rail crossing"),
    ("M302", "Rail equipment struck by highway vehicle at crossing"),
    ("M303", "Rail equipment struck highway vehicle at crossing"),
    ("M304", "Pedestrian struck at highway-rail crossing"),
    ("M305", "Crossing warning device malfunction"),
    ("M306", "Crossing obstructed by stopped highway traffic"),
    ("M399", "Other highway-rail grade crossing incident"),
    ("M401", "Emergency brake application to avoid crossing collision"),
    ("M402", "Object dragged from crossing onto track"),
    ("M404", "Unauthorized motorized vehicle on right of way"),
    ("M405", "Interference with railroad operations by outside party"),
    ("M599", "Incident of undetermined cause"),
];

/// Membership set over the excluded codes, built once.
pub static EXCLUDED_CODE_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    EXCLUDED_CAUSES
        .iter()
        .map(|(code, _)| (*code).to_string())
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_set_covers_every_entry_without_duplicates() {
        assert_eq!(EXCLUDED_CODE_SET.len(), EXCLUDED_CAUSES.len());
        assert!(EXCLUDED_CODE_SET.contains("M301"));
        assert!(!EXCLUDED_CODE_SET.contains("T109"));
    }
}
