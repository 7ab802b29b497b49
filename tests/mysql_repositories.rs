//! Repository tests against a real MySQL server.
//!
//! Docker must be running; run with `cargo test -- --ignored`.

use chrono::NaiveDate;
use hotelier::{
    application::{BackOffice, ServiceError},
    domain::{
        core::{AvailabilityQuery, ClientForm, ReservationForm, RoomForm},
        Entity,
    },
    infrastructure, Database,
};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mysql::Mysql;

async fn setup() -> (ContainerAsync<Mysql>, BackOffice) {
    let container = Mysql::default()
        .start()
        .await
        .expect("Failed to start mysql container");
    let port = container
        .get_host_port_ipv4(3306)
        .await
        .expect("Failed to get mysql port");
    let database = Database {
        host: "127.0.0.1".to_owned(),
        port,
        user: "root".to_owned(),
        password: String::new(),
        database: "test".to_owned(),
        charset: "utf8mb4".to_owned(),
        max_connections: 5,
        migrate: true,
    };

    let mut retries = 0;
    let pool = loop {
        match infrastructure::connect(&database).await {
            Ok(pool) => break pool,
            Err(e) => {
                assert!(retries < 60, "Failed to connect after 60 retries: {e}");
                retries += 1;
                tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
            }
        }
    };
    infrastructure::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    (container, BackOffice::mysql(pool))
}

fn room_form(number: &str, capacity: &str, price: &str) -> RoomForm {
    RoomForm {
        number: number.to_owned(),
        capacity: capacity.to_owned(),
        kind: "Double".to_owned(),
        price: price.to_owned(),
        available: Some("on".to_owned()),
    }
}

fn client_form(email: &str) -> ClientForm {
    ClientForm {
        name: "Dupont".to_owned(),
        email: email.to_owned(),
        phone: String::new(),
        party_size: "2".to_owned(),
    }
}

fn reservation_form(client: u64, room: u64, arrival: &str, departure: &str) -> ReservationForm {
    ReservationForm {
        client_id: client.to_string(),
        room_id: room.to_string(),
        arrival: arrival.to_owned(),
        departure: departure.to_owned(),
    }
}

#[tokio::test]
#[ignore = "needs docker"]
async fn test_room_round_trip() {
    let (_container, office) = setup().await;
    let room = office
        .rooms
        .create(&room_form("101", "2", "89.90"))
        .await
        .unwrap();
    let found = office.rooms.get(room.id()).await.unwrap();
    assert_eq!(found, room);
    assert_eq!(found.price().map(|p| p.cents()), Some(8990));

    let updated = office
        .rooms
        .update(room.id(), &room_form("101", "3", ""))
        .await
        .unwrap();
    assert_eq!(updated.capacity(), 3);
    assert_eq!(updated.price(), None);

    assert!(matches!(
        office.rooms.create(&room_form("101", "1", "")).await,
        Err(ServiceError::Duplicate(_))
    ));
}

#[tokio::test]
#[ignore = "needs docker"]
async fn test_client_email_is_unique() {
    let (_container, office) = setup().await;
    let client = office
        .clients
        .create(&client_form("dupont@example.com"))
        .await
        .unwrap();
    assert_eq!(office.clients.get(client.id()).await.unwrap(), client);
    assert!(matches!(
        office.clients.create(&client_form("Dupont@Example.com")).await,
        Err(ServiceError::Duplicate(_))
    ));
}

#[tokio::test]
#[ignore = "needs docker"]
async fn test_booking_rules() {
    let (_container, office) = setup().await;
    let room = *office
        .rooms
        .create(&room_form("7", "2", ""))
        .await
        .unwrap()
        .id();
    let client = *office
        .clients
        .create(&client_form("dupont@example.com"))
        .await
        .unwrap()
        .id();

    let first = office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();
    assert!(matches!(
        office
            .reservations
            .create(&reservation_form(client, room, "2024-06-03", "2024-06-08"))
            .await,
        Err(ServiceError::Unavailable)
    ));
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-05", "2024-06-07"))
        .await
        .unwrap();
    office
        .reservations
        .update(
            first.id(),
            &reservation_form(client, room, "2024-05-30", "2024-06-05"),
        )
        .await
        .unwrap();

    let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    assert!(office
        .reservations
        .is_available(first.room_id(), date("2024-06-07"), date("2024-06-09"), None)
        .await
        .unwrap());
    let free = office
        .rooms
        .available_rooms(&AvailabilityQuery {
            arrival: "2024-06-04".to_owned(),
            departure: "2024-06-06".to_owned(),
            min_capacity: String::new(),
        })
        .await
        .unwrap();
    assert!(free.is_empty());

    assert!(matches!(
        office.rooms.delete(first.room_id()).await,
        Err(ServiceError::ReferentialIntegrity { reservations: 2, .. })
    ));
    assert_eq!(office.reservations.list().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "needs docker"]
async fn test_concurrent_bookings_are_serialized() {
    let (_container, office) = setup().await;
    let room = *office
        .rooms
        .create(&room_form("9", "2", ""))
        .await
        .unwrap()
        .id();
    let client = *office
        .clients
        .create(&client_form("dupont@example.com"))
        .await
        .unwrap()
        .id();

    let tasks = (1..=5)
        .map(|day| {
            let office = office.clone();
            let form = reservation_form(client, room, &format!("2024-08-0{day}"), "2024-08-20");
            tokio::spawn(async move { office.reservations.create(&form).await })
        })
        .collect::<Vec<_>>();
    let mut booked = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            booked += 1;
        }
    }
    assert_eq!(booked, 1);
}
