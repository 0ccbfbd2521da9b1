//! Reservation status vocabulary
//!
//! Canonical status enum plus the synonym table accepted at the wire
//! boundary. Internal logic switches on [`ReservationStatus`] only; the
//! legacy tokens accumulated over time (`en_attente`, `nouveau`, accented
//! French display forms, the old `payment_*` family) are normalized here,
//! in one place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    ProofUploaded,
    ProofInvalid,
    Confirmed,
    Rejected,
    Cancelled,
}

impl ReservationStatus {
    /// Wire-level string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Accepted => "accepted",
            ReservationStatus::ProofUploaded => "proof_uploaded",
            ReservationStatus::ProofInvalid => "proof_invalid",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a wire-level status string, accepting every known synonym.
    ///
    /// The empty string counts as `Pending` (rows predating the status
    /// column default). Unrecognized non-empty tokens return `None` so the
    /// caller decides whether that is an error or a "neither" bucket.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        match s.as_str() {
            "" | "pending" | "en_attente" | "nouveau" | "new" | "requested" | "demande"
            | "submitted" => Some(ReservationStatus::Pending),
            // payment_requested/payment_pending: the owner asked for payment,
            // which in the current lifecycle is the accepted stage
            "accepted" | "accept" | "approved" | "payment_requested" | "payment_pending" => {
                Some(ReservationStatus::Accepted)
            }
            "proof_uploaded" | "payment_received" => Some(ReservationStatus::ProofUploaded),
            "proof_invalid" => Some(ReservationStatus::ProofInvalid),
            "confirmed" | "confirm" | "confirmée" | "confirmé" => {
                Some(ReservationStatus::Confirmed)
            }
            "rejected" | "reject" | "refused" => Some(ReservationStatus::Rejected),
            "cancelled" | "canceled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether this status ends the lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed
                | ReservationStatus::Rejected
                | ReservationStatus::Cancelled
        )
    }

    /// Calendar bucket for this status.
    pub fn bucket(&self) -> AvailabilityBucket {
        match self {
            ReservationStatus::Confirmed => AvailabilityBucket::Reserved,
            ReservationStatus::Rejected | ReservationStatus::Cancelled => {
                AvailabilityBucket::Neither
            }
            // every pre-confirmation state holds the date as pending
            _ => AvailabilityBucket::Pending,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which calendar bucket a status string falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityBucket {
    /// Confirmed occupancy; the date is taken.
    Reserved,
    /// A request is in flight; the date is provisionally held.
    Pending,
    /// The reservation does not hold the date (rejected/cancelled/unknown).
    Neither,
}

/// Classify a raw wire-level status string into its calendar bucket.
///
/// Unknown tokens land in `Neither`: a status nobody recognizes must not
/// block a calendar date.
pub fn classify_status(raw: &str) -> AvailabilityBucket {
    match ReservationStatus::parse(raw) {
        Some(status) => status.bucket(),
        None => AvailabilityBucket::Neither,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_vocabulary() {
        for (raw, expected) in [
            ("pending", ReservationStatus::Pending),
            ("accepted", ReservationStatus::Accepted),
            ("proof_uploaded", ReservationStatus::ProofUploaded),
            ("proof_invalid", ReservationStatus::ProofInvalid),
            ("confirmed", ReservationStatus::Confirmed),
            ("rejected", ReservationStatus::Rejected),
            ("cancelled", ReservationStatus::Cancelled),
        ] {
            assert_eq!(ReservationStatus::parse(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn parses_pending_synonym_family() {
        for raw in ["en_attente", "nouveau", "new", "requested", "demande", "submitted", ""] {
            assert_eq!(
                ReservationStatus::parse(raw),
                Some(ReservationStatus::Pending),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn parses_accented_display_forms() {
        assert_eq!(
            ReservationStatus::parse("Confirmée"),
            Some(ReservationStatus::Confirmed)
        );
        assert_eq!(
            ReservationStatus::parse("  CONFIRMED "),
            Some(ReservationStatus::Confirmed)
        );
    }

    #[test]
    fn unknown_tokens_do_not_parse() {
        assert_eq!(ReservationStatus::parse("archived"), None);
        assert_eq!(ReservationStatus::parse("garbage"), None);
    }

    #[test]
    fn every_vocabulary_token_classifies_into_exactly_one_bucket() {
        let reserved = ["confirmed", "confirm", "Confirmée", "confirmé"];
        let pending = [
            "pending",
            "en_attente",
            "nouveau",
            "new",
            "requested",
            "demande",
            "submitted",
            "",
            "accepted",
            "approved",
            "proof_uploaded",
            "proof_invalid",
            "payment_requested",
            "payment_pending",
            "payment_received",
        ];
        let neither = ["rejected", "refused", "cancelled", "canceled", "whatever"];

        for raw in reserved {
            assert_eq!(classify_status(raw), AvailabilityBucket::Reserved, "{raw}");
        }
        for raw in pending {
            assert_eq!(classify_status(raw), AvailabilityBucket::Pending, "{raw:?}");
        }
        for raw in neither {
            assert_eq!(classify_status(raw), AvailabilityBucket::Neither, "{raw}");
        }
    }

    #[test]
    fn terminal_states() {
        assert!(ReservationStatus::Confirmed.is_terminal());
        assert!(ReservationStatus::Rejected.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::ProofUploaded.is_terminal());
    }

    #[test]
    fn wire_roundtrip_through_serde() {
        let json = serde_json::to_string(&ReservationStatus::ProofUploaded).unwrap();
        assert_eq!(json, "\"proof_uploaded\"");
        let back: ReservationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReservationStatus::ProofUploaded);
    }
}
