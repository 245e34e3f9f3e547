//! Seat result records.

use url::Url;

use super::fields::AggregateField;

/// District and seat names carried in a seat page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatReference {
    pub district: String,
    pub seat: String,
}

impl SeatReference {
    /// Read `district` and `pd_division` from the query string.
    ///
    /// Never fails: a missing or blank parameter, or a URL that does not
    /// parse at all, yields an empty string.
    pub fn from_url(url: &str) -> Self {
        let Ok(parsed) = Url::parse(url) else {
            return Self::default();
        };

        let param = |name: &str| {
            parsed
                .query_pairs()
                .find(|(key, value)| key == name && !value.is_empty())
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default()
        };

        Self {
            district: param("district"),
            seat: param("pd_division"),
        }
    }
}

/// One row of the candidate table.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub district: String,
    pub seat: String,
    pub release_date: String,
    pub candidate_name: String,
    pub party_abbreviation: String,
    pub votes_received: u64,
    pub percentage: f64,
}

impl CandidateRecord {
    /// Attach the seat totals to this candidate.
    pub fn merge(self, aggregate: &AggregateRecord) -> CombinedRecord {
        CombinedRecord {
            district: aggregate.district.clone(),
            seat: aggregate.seat.clone(),
            release_date: aggregate.release_date.clone(),
            candidate_name: self.candidate_name,
            party_abbreviation: self.party_abbreviation,
            votes_received: self.votes_received,
            percentage: self.percentage,
            valid_votes_in_seat: aggregate.valid_votes_in_seat,
            rejected_votes_in_seat: aggregate.rejected_votes_in_seat,
            total_polled_in_seat: aggregate.total_polled_in_seat,
            total_electors_in_seat: aggregate.total_electors_in_seat,
        }
    }
}

/// Seat-level totals. A field is `None` when its row was not on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateRecord {
    pub district: String,
    pub seat: String,
    pub release_date: String,
    pub valid_votes_in_seat: Option<u64>,
    pub rejected_votes_in_seat: Option<u64>,
    pub total_polled_in_seat: Option<u64>,
    pub total_electors_in_seat: Option<u64>,
}

impl AggregateRecord {
    pub fn new(seat_ref: &SeatReference, release_date: impl Into<String>) -> Self {
        Self {
            district: seat_ref.district.clone(),
            seat: seat_ref.seat.clone(),
            release_date: release_date.into(),
            ..Self::default()
        }
    }

    /// Store a value; a repeated label overwrites the earlier one.
    pub fn set(&mut self, field: AggregateField, value: u64) {
        *self.slot(field) = Some(value);
    }

    pub fn get(&self, field: AggregateField) -> Option<u64> {
        match field {
            AggregateField::ValidVotes => self.valid_votes_in_seat,
            AggregateField::RejectedVotes => self.rejected_votes_in_seat,
            AggregateField::TotalPolled => self.total_polled_in_seat,
            AggregateField::TotalElectors => self.total_electors_in_seat,
        }
    }

    fn slot(&mut self, field: AggregateField) -> &mut Option<u64> {
        match field {
            AggregateField::ValidVotes => &mut self.valid_votes_in_seat,
            AggregateField::RejectedVotes => &mut self.rejected_votes_in_seat,
            AggregateField::TotalPolled => &mut self.total_polled_in_seat,
            AggregateField::TotalElectors => &mut self.total_electors_in_seat,
        }
    }
}

/// A candidate row with its seat totals: one line of the output dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    pub district: String,
    pub seat: String,
    pub release_date: String,
    pub candidate_name: String,
    pub party_abbreviation: String,
    pub votes_received: u64,
    pub percentage: f64,
    pub valid_votes_in_seat: Option<u64>,
    pub rejected_votes_in_seat: Option<u64>,
    pub total_polled_in_seat: Option<u64>,
    pub total_electors_in_seat: Option<u64>,
}

impl CombinedRecord {
    pub fn aggregate(&self, field: AggregateField) -> Option<u64> {
        match field {
            AggregateField::ValidVotes => self.valid_votes_in_seat,
            AggregateField::RejectedVotes => self.rejected_votes_in_seat,
            AggregateField::TotalPolled => self.total_polled_in_seat,
            AggregateField::TotalElectors => self.total_electors_in_seat,
        }
    }
}
