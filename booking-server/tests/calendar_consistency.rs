//! Calendar-consistency tests: the sync bus and the availability index
//! working together across rooms and views.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use booking_server::db::models::RoomCreate;
use booking_server::db::repository::RoomRepository;
use booking_server::reservations::service::CreateReservation;
use booking_server::{AuthManager, AvailabilityIndex, ReservationService, SyncBus};

async fn setup_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("in-memory db");
    db.use_ns("booking").use_db("main").await.expect("namespace");
    booking_server::db::define_tables(&db).await.expect("schema");
    db
}

async fn seed_room(db: &Surreal<Db>, manager_key: &str) -> String {
    RoomRepository::new(db.clone())
        .create(RoomCreate {
            name: format!("Salle de {manager_key}"),
            address: None,
            manager: RecordId::from_table_key("manager", manager_key),
            capacity: 80,
            description: None,
            tarifs: Vec::new(),
            services: Vec::new(),
        })
        .await
        .expect("seed room")
        .id
        .unwrap()
        .to_string()
}

fn request(room_id: &str, date: &str) -> CreateReservation {
    CreateReservation {
        room_id: room_id.to_string(),
        last_name: "Durand".to_string(),
        first_name: "Paul".to_string(),
        email: None,
        phone: "0707070707".to_string(),
        date: date.parse().unwrap(),
        event_type: "anniversaire".to_string(),
        guests: 25,
        password: "secret123".to_string(),
    }
}

#[tokio::test]
async fn a_view_for_one_room_never_sees_another_rooms_updates() {
    let db = setup_db().await;
    let bus = SyncBus::new();
    let service = ReservationService::new(db.clone(), bus.clone());

    let room_a = seed_room(&db, "alice").await;
    let room_b = seed_room(&db, "bob").await;

    let mut view_a = bus.subscribe_room(&room_a);

    // activity on room B first, then room A
    service.create(request(&room_b, "2026-11-02"), None).await.unwrap();
    service.create(request(&room_a, "2026-11-03"), None).await.unwrap();

    let update = view_a.recv().await.unwrap();
    assert_eq!(update.room_id, room_a);

    // and the fallback keeps per-room payloads separate
    assert_eq!(bus.latest(&room_a).unwrap().room_id, room_a);
    assert_eq!(bus.latest(&room_b).unwrap().room_id, room_b);
}

#[tokio::test]
async fn every_lifecycle_step_invalidates_the_calendar() {
    let db = setup_db().await;
    let bus = SyncBus::new();
    let service = ReservationService::new(db.clone(), bus.clone());
    let owner = AuthManager {
        id: "manager:alice".to_string(),
        name: "Alice".to_string(),
    };

    let room = seed_room(&db, "alice").await;
    let mut view = bus.subscribe_room(&room);

    let created = service.create(request(&room, "2026-11-05"), None).await.unwrap();
    let id = created.reservation.id.unwrap().to_string();
    assert_eq!(view.recv().await.unwrap().action, "reservation_created");

    service.transition(&id, "accept", None, &owner).await.unwrap();
    assert_eq!(view.recv().await.unwrap().action, "status_changed");

    service.upload_proof(&id, "preuve.webp").await.unwrap();
    assert_eq!(view.recv().await.unwrap().action, "proof_uploaded");

    service
        .transition(&id, "confirm_payment", None, &owner)
        .await
        .unwrap();
    assert_eq!(view.recv().await.unwrap().action, "status_changed");
}

#[tokio::test]
async fn a_refreshing_view_converges_on_the_authoritative_sets() {
    let db = setup_db().await;
    let bus = SyncBus::new();
    let service = ReservationService::new(db.clone(), bus.clone());
    let index = AvailabilityIndex::new(db.clone());
    let owner = AuthManager {
        id: "manager:alice".to_string(),
        name: "Alice".to_string(),
    };

    let room = seed_room(&db, "alice").await;
    let date: chrono::NaiveDate = "2026-11-07".parse().unwrap();

    // simulate a consumer that re-queries on every received hint
    let mut view = bus.subscribe_room(&room);

    let created = service.create(request(&room, "2026-11-07"), None).await.unwrap();
    let id = created.reservation.id.unwrap().to_string();
    view.recv().await.unwrap();
    let set = index.for_room(&room).await;
    assert!(set.pending.contains(&date));

    service.transition(&id, "confirm", None, &owner).await.unwrap();
    view.recv().await.unwrap();
    let set = index.for_room(&room).await;
    assert!(set.reserved.contains(&date));
    assert!(!set.pending.contains(&date));

    // a consumer that missed every broadcast still finds the last hint by
    // polling the fallback channel
    let latest = bus.latest(&room).unwrap();
    assert_eq!(latest.reservation_id.as_deref(), Some(id.as_str()));
}
