//! Reservation lifecycle service
//!
//! Owns the authoritative status of every reservation: creation (with
//! capacity check and owner auto-confirmation), owner transitions, and
//! client proof uploads. Every transition appends one status-history row;
//! secondary effects (history, account linkage, counterparty notification,
//! sync publish) are best-effort and reported as warnings, never as
//! failures.

use chrono::{NaiveDate, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use shared::message::{CalendarUpdate, actions};
use shared::ReservationStatus;

use crate::auth::{AuthManager, OwnershipGuard};
use crate::db::models::{Account, Reservation, SenderKind, StatusHistoryEntry};
use crate::db::repository::reservation::ReservationInsert;
use crate::db::repository::{
    AccountRepository, MessageRepository, PaymentProofRepository, ReservationRepository,
    RoomRepository, StatusHistoryRepository,
};
use crate::sync::SyncBus;
use crate::utils::{AppError, AppResult};

use super::action::{TransitionAction, proof_upload_allowed_from};
use super::outcome::{AccountSummary, CreateOutcome, ProofOutcome, TransitionOutcome};

/// History comment written on owner auto-confirmation
const AUTO_CONFIRM_COMMENT: &str = "Auto-confirmation par le gestionnaire lors de la création";

/// Payment-proof mime types the platform accepts
const ALLOWED_PROOF_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Fields required to create a reservation
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub room_id: String,
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date: NaiveDate,
    pub event_type: String,
    pub guests: u32,
    /// Used to open the requester's client account
    pub password: String,
}

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    history: StatusHistoryRepository,
    proofs: PaymentProofRepository,
    accounts: AccountRepository,
    messages: MessageRepository,
    rooms: RoomRepository,
    guard: OwnershipGuard,
    bus: SyncBus,
}

impl ReservationService {
    pub fn new(db: Surreal<Db>, bus: SyncBus) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            history: StatusHistoryRepository::new(db.clone()),
            proofs: PaymentProofRepository::new(db.clone()),
            accounts: AccountRepository::new(db.clone()),
            messages: MessageRepository::new(db.clone()),
            rooms: RoomRepository::new(db.clone()),
            guard: OwnershipGuard::new(db),
            bus,
        }
    }

    /// Create a reservation.
    ///
    /// Validation and the capacity check run before any write. When the
    /// creator is the authenticated owner of the room, the reservation is
    /// confirmed at birth with one synthesized `pending → confirmed` history
    /// row; everyone else enters at `pending` with no history.
    pub async fn create(
        &self,
        req: CreateReservation,
        actor: Option<&AuthManager>,
    ) -> AppResult<CreateOutcome> {
        for (value, field) in [
            (&req.last_name, "last_name"),
            (&req.first_name, "first_name"),
            (&req.phone, "phone"),
            (&req.event_type, "event_type"),
            (&req.password, "password"),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Missing required field: {field}"
                )));
            }
        }

        let room = self
            .rooms
            .find_by_id(&req.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", req.room_id)))?;

        // Capacity check before anything is written. Soft-enforced at
        // creation only: later capacity changes do not retroactively
        // invalidate existing reservations.
        if req.guests > room.capacity {
            return Err(AppError::CapacityExceeded {
                requested: req.guests,
                capacity: room.capacity,
            });
        }

        let owner_created = actor
            .map(|a| a.id == room.manager.to_string())
            .unwrap_or(false);
        let initial_status = if owner_created {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Pending
        };

        let email = req.email.map(|e| e.trim().to_string()).unwrap_or_default();
        let room_record = room
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("room has no id".to_string()))?;

        // Primary write
        let reservation = self
            .reservations
            .create(ReservationInsert {
                room: room_record,
                last_name: req.last_name,
                first_name: req.first_name,
                email: email.clone(),
                phone: req.phone.clone(),
                date: req.date,
                event_type: req.event_type,
                guests: req.guests,
                status: initial_status.as_str().to_string(),
            })
            .await?;

        let mut warnings = Vec::new();
        let reservation_id = reservation
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("created reservation has no id".to_string()))?;

        // Secondary: the synthesized auto-confirm audit row
        if owner_created {
            let changed_by = actor.and_then(|a| a.id.parse().ok());
            if let Err(e) = self
                .history
                .append(
                    reservation_id.clone(),
                    Some(ReservationStatus::Pending.as_str()),
                    ReservationStatus::Confirmed.as_str(),
                    changed_by,
                    Some(AUTO_CONFIRM_COMMENT.to_string()),
                )
                .await
            {
                tracing::warn!(error = %e, "auto-confirm history insert failed");
                warnings.push("history entry could not be recorded".to_string());
            }
        }

        // Secondary: opportunistic client account linkage
        let account = match self
            .link_account(&reservation, &email, &req.phone, &req.password)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "account linkage failed");
                warnings.push("client account could not be linked".to_string());
                None
            }
        };

        self.bus.publish(
            CalendarUpdate::new(reservation.room.to_string(), actions::RESERVATION_CREATED)
                .with_reservation(reservation_id.to_string()),
        );

        Ok(CreateOutcome {
            reservation,
            account,
            warnings,
        })
    }

    /// Find or create the requester's client account: by email when one was
    /// given, by phone otherwise.
    async fn link_account(
        &self,
        reservation: &Reservation,
        email: &str,
        phone: &str,
        password: &str,
    ) -> AppResult<Option<AccountSummary>> {
        let existing = if !email.is_empty() {
            self.accounts.find_by_email(email).await?
        } else {
            self.accounts.find_by_phone(phone).await?
        };

        if let Some(account) = existing {
            return Ok(Some(AccountSummary {
                id: account
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                email: account.email,
                created: false,
            }));
        }

        let hash = Account::hash_password(password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
        let account = self
            .accounts
            .create(
                reservation.last_name.clone(),
                reservation.first_name.clone(),
                (!email.is_empty()).then(|| email.to_string()),
                phone.to_string(),
                hash,
            )
            .await?;

        Ok(Some(AccountSummary {
            id: account.id.map(|id| id.to_string()).unwrap_or_default(),
            email: account.email,
            created: true,
        }))
    }

    /// Apply an owner action to a reservation.
    ///
    /// Ownership is verified against current persisted state before any
    /// write; the status update is the primary effect, the history row and
    /// counterparty notification are best-effort secondaries.
    pub async fn transition(
        &self,
        reservation_id: &str,
        action_token: &str,
        comment: Option<String>,
        actor: &AuthManager,
    ) -> AppResult<TransitionOutcome> {
        let action = TransitionAction::parse(action_token)?;

        let reservation = self
            .reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;

        // Authorization before any write
        self.guard
            .ensure_room_owner(&reservation.room.to_string(), &actor.id)
            .await?;

        let old_status_raw = reservation.status.clone();
        let current = ReservationStatus::parse(&old_status_raw).ok_or_else(|| {
            AppError::InvalidTransition {
                from: old_status_raw.clone(),
                action: action_token.to_string(),
            }
        })?;

        if !action.allowed_from(current) {
            return Err(AppError::InvalidTransition {
                from: current.as_str().to_string(),
                action: action_token.to_string(),
            });
        }

        let new_status = action.target();

        // Primary write
        self.reservations
            .update_status(reservation_id, new_status.as_str())
            .await?;

        let mut warnings = Vec::new();

        // Secondary: audit row
        if let Err(e) = self
            .history
            .append(
                reservation.id.clone().ok_or_else(|| {
                    AppError::Internal("reservation has no id".to_string())
                })?,
                Some(old_status_raw.as_str()),
                new_status.as_str(),
                actor.id.parse().ok(),
                comment,
            )
            .await
        {
            tracing::warn!(error = %e, reservation = %reservation_id, "history insert failed");
            warnings.push("history entry could not be recorded".to_string());
        }

        // Secondary: tell the requester their proof was refused
        if action == TransitionAction::InvalidateProof {
            if let Err(e) = self
                .messages
                .create(
                    reservation.id.clone(),
                    Some(reservation.room.clone()),
                    SenderKind::Manager,
                    actor.id.parse().ok(),
                    "Preuve de paiement invalide".to_string(),
                    format!(
                        "La preuve de paiement de la réservation #{} a été refusée. \
                         Merci d'en envoyer une nouvelle.",
                        reservation_id
                    ),
                )
                .await
            {
                tracing::warn!(error = %e, "proof-invalid notification failed");
                warnings.push("counterparty notification failed".to_string());
            }
        }

        self.bus.publish(
            CalendarUpdate::new(reservation.room.to_string(), actions::STATUS_CHANGED)
                .with_reservation(reservation_id.to_string()),
        );

        let mut updated = reservation;
        updated.status = new_status.as_str().to_string();

        Ok(TransitionOutcome {
            reservation: updated,
            old_status: old_status_raw,
            new_status,
            warnings,
        })
    }

    /// Record a client's payment proof.
    ///
    /// Not an owner action: the requester uploads from `accepted` or
    /// `proof_invalid`, the reservation moves to `proof_uploaded`, and the
    /// room manager is notified fire-and-forget.
    pub async fn upload_proof(
        &self,
        reservation_id: &str,
        file_name: &str,
    ) -> AppResult<ProofOutcome> {
        let reservation = self
            .reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;

        let current = ReservationStatus::parse(&reservation.status).ok_or_else(|| {
            AppError::InvalidTransition {
                from: reservation.status.clone(),
                action: "upload_proof".to_string(),
            }
        })?;
        if !proof_upload_allowed_from(current) {
            return Err(AppError::InvalidTransition {
                from: current.as_str().to_string(),
                action: "upload_proof".to_string(),
            });
        }

        let path = build_proof_path(file_name)?;

        // Primary writes: the proof row and the status move
        let proof = self
            .proofs
            .create(
                reservation.id.clone().ok_or_else(|| {
                    AppError::Internal("reservation has no id".to_string())
                })?,
                path,
            )
            .await?;
        self.reservations
            .update_status(reservation_id, ReservationStatus::ProofUploaded.as_str())
            .await?;

        let mut warnings = Vec::new();

        // Secondary: audit row (client action, no manager id)
        if let Err(e) = self
            .history
            .append(
                proof.reservation.clone(),
                Some(reservation.status.as_str()),
                ReservationStatus::ProofUploaded.as_str(),
                None,
                None,
            )
            .await
        {
            tracing::warn!(error = %e, reservation = %reservation_id, "history insert failed");
            warnings.push("history entry could not be recorded".to_string());
        }

        // Secondary: surface the proof to the manager
        if let Err(e) = self
            .messages
            .create(
                reservation.id.clone(),
                Some(reservation.room.clone()),
                SenderKind::Client,
                None,
                "Preuve de paiement envoyée".to_string(),
                format!(
                    "Le demandeur a envoyé une preuve de paiement pour la réservation #{}.",
                    reservation_id
                ),
            )
            .await
        {
            tracing::warn!(error = %e, "proof-upload notification failed");
            warnings.push("counterparty notification failed".to_string());
        }

        self.bus.publish(
            CalendarUpdate::new(reservation.room.to_string(), actions::PROOF_UPLOADED)
                .with_reservation(reservation_id.to_string()),
        );

        let mut updated = reservation;
        updated.status = ReservationStatus::ProofUploaded.as_str().to_string();

        Ok(ProofOutcome {
            reservation: updated,
            proof,
            warnings,
        })
    }

    /// Full status history of a reservation, oldest first
    pub async fn status_history(
        &self,
        reservation_id: &str,
    ) -> AppResult<Vec<StatusHistoryEntry>> {
        Ok(self.history.find_by_reservation(reservation_id).await?)
    }
}

/// Build the stored file reference for an uploaded proof: sanitized stem,
/// upload timestamp, random suffix. Rejects anything that is not an image
/// type the platform accepts.
fn build_proof_path(file_name: &str) -> AppResult<String> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    if !ALLOWED_PROOF_TYPES.contains(&mime.essence_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported proof file type: {}",
            mime.essence_str()
        )));
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext.to_lowercase()),
        None => (file_name, String::new()),
    };
    let safe: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    Ok(format!(
        "uploads/payments/{}_{}_{}.{}",
        safe,
        Utc::now().timestamp(),
        Uuid::new_v4().simple(),
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityIndex;
    use crate::db::models::RoomCreate;
    use crate::db::test_db;
    use surrealdb::RecordId;

    const OWNER: &str = "manager:owner1";

    struct Fixture {
        db: Surreal<Db>,
        bus: SyncBus,
        service: ReservationService,
        room_id: String,
    }

    async fn setup() -> Fixture {
        let db = test_db().await;
        let bus = SyncBus::new();
        let service = ReservationService::new(db.clone(), bus.clone());

        let room = RoomRepository::new(db.clone())
            .create(RoomCreate {
                name: "Salle des fêtes".to_string(),
                address: Some("12 rue des Lilas".to_string()),
                manager: RecordId::from_table_key("manager", "owner1"),
                capacity: 100,
                description: None,
                tarifs: Vec::new(),
                services: Vec::new(),
            })
            .await
            .unwrap();

        Fixture {
            db,
            bus,
            service,
            room_id: room.id.unwrap().to_string(),
        }
    }

    fn owner() -> AuthManager {
        AuthManager {
            id: OWNER.to_string(),
            name: "Owner".to_string(),
        }
    }

    fn stranger() -> AuthManager {
        AuthManager {
            id: "manager:intruder".to_string(),
            name: "Intruder".to_string(),
        }
    }

    fn request(room_id: &str) -> CreateReservation {
        CreateReservation {
            room_id: room_id.to_string(),
            last_name: "Martin".to_string(),
            first_name: "Claire".to_string(),
            email: Some("claire@example.com".to_string()),
            phone: "0601020304".to_string(),
            date: "2026-09-12".parse().unwrap(),
            event_type: "mariage".to_string(),
            guests: 80,
            password: "motdepasse".to_string(),
        }
    }

    // ========== Creation ==========

    #[tokio::test]
    async fn client_creation_enters_at_pending_with_no_history() {
        let fx = setup().await;
        let outcome = fx.service.create(request(&fx.room_id), None).await.unwrap();

        assert_eq!(outcome.reservation.status, "pending");
        let id = outcome.reservation.id.unwrap().to_string();
        let history = fx.service.status_history(&id).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn owner_creation_is_auto_confirmed_with_one_history_row() {
        let fx = setup().await;
        let outcome = fx
            .service
            .create(request(&fx.room_id), Some(&owner()))
            .await
            .unwrap();

        assert_eq!(outcome.reservation.status, "confirmed");
        let id = outcome.reservation.id.unwrap().to_string();
        let history = fx.service.status_history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].old_status.as_deref(), Some("pending"));
        assert_eq!(history[0].new_status, "confirmed");
        assert_eq!(history[0].comment.as_deref(), Some(AUTO_CONFIRM_COMMENT));
    }

    #[tokio::test]
    async fn foreign_manager_creation_stays_pending() {
        let fx = setup().await;
        let outcome = fx
            .service
            .create(request(&fx.room_id), Some(&stranger()))
            .await
            .unwrap();
        assert_eq!(outcome.reservation.status, "pending");
    }

    #[tokio::test]
    async fn guests_at_capacity_is_accepted() {
        let fx = setup().await;
        let mut req = request(&fx.room_id);
        req.guests = 100;
        assert!(fx.service.create(req, None).await.is_ok());
    }

    #[tokio::test]
    async fn guests_over_capacity_writes_nothing() {
        let fx = setup().await;
        let mut req = request(&fx.room_id);
        req.guests = 101;
        let err = fx.service.create(req, None).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::CapacityExceeded {
                requested: 101,
                capacity: 100
            }
        ));

        let rows = ReservationRepository::new(fx.db.clone())
            .find_by_room(&fx.room_id)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected_before_write() {
        let fx = setup().await;
        let mut req = request(&fx.room_id);
        req.phone = "  ".to_string();
        let err = fx.service.create(req, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let fx = setup().await;
        let err = fx
            .service
            .create(request("room:does_not_exist"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // ========== Account linkage ==========

    #[tokio::test]
    async fn creation_opens_a_client_account() {
        let fx = setup().await;
        let outcome = fx.service.create(request(&fx.room_id), None).await.unwrap();
        let account = outcome.account.unwrap();
        assert!(account.created);
        assert_eq!(account.email.as_deref(), Some("claire@example.com"));

        let stored = AccountRepository::new(fx.db.clone())
            .find_by_email("claire@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "motdepasse");
        assert!(stored.verify_password("motdepasse").unwrap());
    }

    #[tokio::test]
    async fn second_reservation_reuses_the_account_by_email() {
        let fx = setup().await;
        let first = fx.service.create(request(&fx.room_id), None).await.unwrap();
        let second = fx.service.create(request(&fx.room_id), None).await.unwrap();

        let a = first.account.unwrap();
        let b = second.account.unwrap();
        assert!(a.created);
        assert!(!b.created);
        assert_eq!(a.id, b.id);
    }

    #[tokio::test]
    async fn account_falls_back_to_phone_when_email_is_absent() {
        let fx = setup().await;
        let mut req = request(&fx.room_id);
        req.email = None;
        let first = fx.service.create(req.clone(), None).await.unwrap();
        let second = fx.service.create(req, None).await.unwrap();

        assert!(first.account.unwrap().created);
        assert!(!second.account.unwrap().created);
    }

    // ========== Transitions ==========

    async fn create_pending(fx: &Fixture) -> String {
        let outcome = fx.service.create(request(&fx.room_id), None).await.unwrap();
        outcome.reservation.id.unwrap().to_string()
    }

    #[tokio::test]
    async fn unknown_action_tokens_are_rejected() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        let err = fx
            .service
            .transition(&id, "archive", None, &owner())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAction(_)));
    }

    #[tokio::test]
    async fn every_transition_is_denied_to_non_owners() {
        let fx = setup().await;
        let id = create_pending(&fx).await;

        for token in ["accept", "reject", "cancel", "pending", "confirm", "confirm_payment"] {
            let err = fx
                .service
                .transition(&id, token, None, &stranger())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)), "{token}");
        }

        // no state change, no history rows
        let reservation = ReservationRepository::new(fx.db.clone())
            .find_by_id(&id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reservation.status, "pending");
        assert!(fx.service.status_history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn accept_moves_pending_to_accepted_and_logs_it() {
        let fx = setup().await;
        let id = create_pending(&fx).await;

        let outcome = fx
            .service
            .transition(&id, "accept", Some("merci de payer".to_string()), &owner())
            .await
            .unwrap();
        assert_eq!(outcome.old_status, "pending");
        assert_eq!(outcome.new_status, ReservationStatus::Accepted);
        assert!(outcome.warnings.is_empty());

        let history = fx.service.status_history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].comment.as_deref(), Some("merci de payer"));
    }

    #[tokio::test]
    async fn illegal_from_states_are_rejected_without_a_write() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        fx.service
            .transition(&id, "reject", None, &owner())
            .await
            .unwrap();

        // terminal state: nothing else applies
        let err = fx
            .service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
        assert_eq!(fx.service.status_history(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reset_returns_an_in_flight_reservation_to_pending() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        fx.service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap();
        let outcome = fx
            .service
            .transition(&id, "pending", None, &owner())
            .await
            .unwrap();
        assert_eq!(outcome.new_status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn transitions_are_legal_from_legacy_status_tokens() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        ReservationRepository::new(fx.db.clone())
            .update_status(&id, "en_attente")
            .await
            .unwrap();

        let outcome = fx
            .service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap();
        assert_eq!(outcome.old_status, "en_attente");
        assert_eq!(outcome.new_status, ReservationStatus::Accepted);
    }

    // ========== Proof uploads ==========

    #[tokio::test]
    async fn proof_upload_requires_acceptance_first() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        let err = fx
            .service
            .upload_proof(&id, "virement.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn proof_upload_rejects_non_image_files() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        fx.service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap();
        let err = fx
            .service
            .upload_proof(&id, "virement.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn proof_upload_moves_to_proof_uploaded_and_notifies_the_manager() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        fx.service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap();

        let outcome = fx.service.upload_proof(&id, "virement.png").await.unwrap();
        assert_eq!(outcome.reservation.status, "proof_uploaded");
        assert!(outcome.proof.path.starts_with("uploads/payments/virement_"));
        assert!(outcome.proof.path.ends_with(".png"));

        let messages = MessageRepository::new(fx.db.clone())
            .find_by_reservation(&id)
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].subject, "Preuve de paiement envoyée");
    }

    // ========== Full lifecycle ==========

    #[tokio::test]
    async fn round_trip_through_the_proof_cycle() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        let index = AvailabilityIndex::new(fx.db.clone());
        let date: NaiveDate = "2026-09-12".parse().unwrap();

        fx.service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap();
        fx.service.upload_proof(&id, "preuve.jpg").await.unwrap();
        fx.service
            .transition(&id, "invalidate_proof", None, &owner())
            .await
            .unwrap();

        // before confirmation the date is held as pending, never reserved
        let set = index.for_room(&fx.room_id).await;
        assert!(set.pending.contains(&date));
        assert!(!set.reserved.contains(&date));

        fx.service.upload_proof(&id, "preuve2.jpg").await.unwrap();
        fx.service
            .transition(&id, "confirm_payment", None, &owner())
            .await
            .unwrap();

        let reservation = ReservationRepository::new(fx.db.clone())
            .find_by_id(&id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reservation.status, "confirmed");

        let history = fx.service.status_history(&id).await.unwrap();
        let transitions: Vec<(&str, &str)> = history
            .iter()
            .map(|h| (h.old_status.as_deref().unwrap_or(""), h.new_status.as_str()))
            .collect();
        assert_eq!(
            transitions,
            vec![
                ("pending", "accepted"),
                ("accepted", "proof_uploaded"),
                ("proof_uploaded", "proof_invalid"),
                ("proof_invalid", "proof_uploaded"),
                ("proof_uploaded", "confirmed"),
            ]
        );

        // append-only log with non-decreasing timestamps
        for pair in history.windows(2) {
            assert!(pair[0].changed_at <= pair[1].changed_at);
        }

        let set = index.for_room(&fx.room_id).await;
        assert!(set.reserved.contains(&date));
        assert!(!set.pending.contains(&date));

        // two proofs accumulated, newest first
        let proofs = PaymentProofRepository::new(fx.db.clone())
            .find_by_reservation(&id)
            .await
            .unwrap();
        assert_eq!(proofs.len(), 2);
        assert!(proofs[0].uploaded_at >= proofs[1].uploaded_at);
    }

    #[tokio::test]
    async fn transitions_publish_room_scoped_sync_updates() {
        let fx = setup().await;
        let id = create_pending(&fx).await;
        let mut sub = fx.bus.subscribe_room(&fx.room_id);

        fx.service
            .transition(&id, "accept", None, &owner())
            .await
            .unwrap();

        let update = sub.recv().await.unwrap();
        assert_eq!(update.room_id, fx.room_id);
        assert_eq!(update.action, actions::STATUS_CHANGED);
        assert_eq!(update.reservation_id.as_deref(), Some(id.as_str()));
    }
}
