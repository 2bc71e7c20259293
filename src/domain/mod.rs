//! Domain types for timestamp display.
//! Defines the timestamp shapes the backend sends and the labels they render as.

pub mod error;
pub mod label;
pub mod timestamp;

pub use error::*;
pub use label::*;
pub use timestamp::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TimestampError::InvalidDate {
            year: 2025,
            month: 2,
            day: 30,
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert_eq!(
            err.to_string(),
            "Not a calendar date: 2025-02-30 00:00:00"
        );
        assert_eq!(
            TimestampError::Unparseable("x".into()).to_string(),
            "Unparseable timestamp text: \"x\""
        );
    }

    #[test]
    fn test_labels_are_fixed_strings() {
        assert_eq!(DateLabel::Unknown.to_string(), UNKNOWN_DATE_LABEL);
        assert_eq!(DateLabel::Recently.to_string(), RECENTLY_LABEL);
        assert!(!DateLabel::Recently.is_date());
    }
}
