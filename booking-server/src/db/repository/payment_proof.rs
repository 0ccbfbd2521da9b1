//! Payment Proof Repository
//!
//! Append-only evidence list; the newest row per reservation is the current
//! proof.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::PaymentProof;
use crate::utils::time::now_micros;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "payment_proof";

#[derive(Clone)]
pub struct PaymentProofRepository {
    base: BaseRepository,
}

impl PaymentProofRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a proof entry
    pub async fn create(&self, reservation: RecordId, path: String) -> RepoResult<PaymentProof> {
        let proof = PaymentProof {
            id: None,
            reservation,
            path,
            uploaded_at: now_micros(),
        };

        let created: Option<PaymentProof> = self.base.db().create(TABLE).content(proof).await?;
        created.ok_or_else(|| RepoError::Database("Failed to store payment proof".to_string()))
    }

    /// Proofs for one reservation, newest first
    pub async fn find_by_reservation(
        &self,
        reservation_id: &str,
    ) -> RepoResult<Vec<PaymentProof>> {
        let rows: Vec<PaymentProof> = self
            .base
            .db()
            .query(
                "SELECT * FROM payment_proof WHERE reservation = $reservation \
                 ORDER BY uploaded_at DESC",
            )
            .bind(("reservation", reservation_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Proofs for every reservation of a set of reservations (a room's
    /// reservations), newest first
    pub async fn find_by_reservations(
        &self,
        reservation_ids: Vec<String>,
    ) -> RepoResult<Vec<PaymentProof>> {
        if reservation_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<PaymentProof> = self
            .base
            .db()
            .query(
                "SELECT * FROM payment_proof WHERE reservation IN $reservations \
                 ORDER BY uploaded_at DESC",
            )
            .bind(("reservations", reservation_ids))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
