//! Error taxonomy for generation and aggregation.

use thiserror::Error;

use crate::record::Mood;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommuteError {
    #[error("invalid sample size {requested}: at least one record is required")]
    InvalidSampleSize { requested: usize },
    #[error("cannot compute statistics over an empty dataset")]
    EmptyDataset,
    #[error("no records in group `{group}`")]
    EmptyGroup { group: String },
    #[error("mood `{mood}` does not match a duration of {duration_min} minutes")]
    InconsistentMood { duration_min: u32, mood: Mood },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = CommuteError::InvalidSampleSize { requested: 0 };
        assert!(err.to_string().contains('0'));

        let err = CommuteError::EmptyGroup {
            group: "weather=rainy".into(),
        };
        assert_eq!(err.to_string(), "no records in group `weather=rainy`");

        let err = CommuteError::InconsistentMood {
            duration_min: 85,
            mood: Mood::Happy,
        };
        assert_eq!(
            err.to_string(),
            "mood `happy` does not match a duration of 85 minutes"
        );
    }
}
