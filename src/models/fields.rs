// src/models/fields.rs

//! Seat-level aggregate fields and their row labels.

/// Seat-level total reported in the second results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateField {
    ValidVotes,
    RejectedVotes,
    TotalPolled,
    TotalElectors,
}

/// Row label on the results page → canonical field.
const AGGREGATE_LABELS: [(&str, AggregateField); 4] = [
    ("Valid Votes", AggregateField::ValidVotes),
    ("Rejected Votes", AggregateField::RejectedVotes),
    ("Total Polled", AggregateField::TotalPolled),
    ("Total Electors", AggregateField::TotalElectors),
];

impl AggregateField {
    /// All fields in output column order.
    pub const ALL: [AggregateField; 4] = [
        AggregateField::ValidVotes,
        AggregateField::RejectedVotes,
        AggregateField::TotalPolled,
        AggregateField::TotalElectors,
    ];

    /// Map a trimmed row label to its field. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        AGGREGATE_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, field)| *field)
    }

    /// Column header used in the output dataset.
    pub fn column_name(self) -> &'static str {
        match self {
            AggregateField::ValidVotes => "Valid_votes_in_seat",
            AggregateField::RejectedVotes => "Rejected_votes_in_seat",
            AggregateField::TotalPolled => "Total_polled_in_seat",
            AggregateField::TotalElectors => "Total_electors_in_seat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(
            AggregateField::from_label("Valid Votes"),
            Some(AggregateField::ValidVotes)
        );
        assert_eq!(
            AggregateField::from_label("Total Electors"),
            Some(AggregateField::TotalElectors)
        );
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(AggregateField::from_label("Turnout"), None);
        assert_eq!(AggregateField::from_label("valid votes"), None);
    }

    #[test]
    fn test_every_field_has_a_label() {
        for field in AggregateField::ALL {
            assert!(AGGREGATE_LABELS.iter().any(|(_, f)| *f == field));
        }
    }
}
