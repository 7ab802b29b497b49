use async_trait::async_trait;
use chrono::NaiveDate;
use hotelier::{
    application::{BackOffice, ReservationService, ServiceError},
    domain::{
        core::{
            AvailabilityQuery, BookingOutcome, ClientError, ClientForm, ClientId, EmployeeForm,
            Reservation, ReservationDetails, ReservationDraft, ReservationError, ReservationForm,
            ReservationId, ReservationRepository, RoomError, RoomForm, RoomId, StayError,
        },
        DataAccessError, Entity,
    },
    infrastructure::memory::MemoryStore,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn room_form(number: &str, capacity: u32) -> RoomForm {
    RoomForm {
        number: number.to_owned(),
        capacity: capacity.to_string(),
        kind: "Double".to_owned(),
        price: "89,90".to_owned(),
        available: Some("on".to_owned()),
    }
}

fn client_form(name: &str, email: &str) -> ClientForm {
    ClientForm {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: "06 12 34 56 78".to_owned(),
        party_size: "2".to_owned(),
    }
}

fn reservation_form(
    client: ClientId,
    room: RoomId,
    arrival: &str,
    departure: &str,
) -> ReservationForm {
    ReservationForm {
        client_id: client.to_string(),
        room_id: room.to_string(),
        arrival: arrival.to_owned(),
        departure: departure.to_owned(),
    }
}

/// A back office with room 7 and one client.
async fn hotel() -> (BackOffice, RoomId, ClientId) {
    let office = MemoryStore::new().back_office();
    let room = office.rooms.create(&room_form("7", 2)).await.unwrap();
    let client = office
        .clients
        .create(&client_form("Dupont", "dupont@example.com"))
        .await
        .unwrap();
    (office, room.id(), client.id())
}

fn form_errors(error: ServiceError) -> Vec<String> {
    error.into_form_errors().unwrap().messages().to_vec()
}

#[tokio::test]
async fn test_created_client_is_retrievable() {
    let office = MemoryStore::new().back_office();
    let client = office
        .clients
        .create(&client_form("Martin", "Martin@Example.com"))
        .await
        .unwrap();
    let found = office.clients.get(client.id()).await.unwrap();
    assert_eq!(found, client);
    assert_eq!(found.email(), "martin@example.com");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let office = MemoryStore::new().back_office();
    let first = office
        .clients
        .create(&client_form("Martin", "martin@example.com"))
        .await
        .unwrap();

    let error = office
        .clients
        .create(&client_form("Martine", "MARTIN@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(error, ServiceError::Duplicate(_)));
    assert_eq!(form_errors(error), [ClientError::DuplicateEmail.to_string()]);

    let other = office
        .clients
        .create(&client_form("Durand", "durand@example.com"))
        .await
        .unwrap();
    assert_ne!(other.id(), first.id());
    assert!(office
        .clients
        .email_taken("durand@example.com", None)
        .await
        .unwrap());
    assert!(!office
        .clients
        .email_taken("durand@example.com", Some(other.id()))
        .await
        .unwrap());

    let error = office
        .clients
        .update(other.id(), &client_form("Durand", "martin@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(error, ServiceError::Duplicate(_)));
}

#[tokio::test]
async fn test_duplicate_room_number_is_rejected() {
    let (office, room, _) = hotel().await;
    let error = office.rooms.create(&room_form("7", 3)).await.unwrap_err();
    assert_eq!(form_errors(error), [RoomError::DuplicateNumber.to_string()]);

    // Keeping its own number is not a conflict.
    let updated = office.rooms.update(room, &room_form("7", 3)).await.unwrap();
    assert_eq!(updated.capacity(), 3);
    assert_eq!(office.rooms.get(room).await.unwrap(), updated);
}

#[tokio::test]
async fn test_referenced_room_and_client_cannot_be_deleted() {
    let (office, room, client) = hotel().await;
    let reservation = office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();

    assert!(matches!(
        office.rooms.delete(room).await,
        Err(ServiceError::ReferentialIntegrity { reservations: 1, .. })
    ));
    assert!(matches!(
        office.clients.delete(client).await,
        Err(ServiceError::ReferentialIntegrity { reservations: 1, .. })
    ));

    office.reservations.delete(reservation.id()).await.unwrap();
    office.rooms.delete(room).await.unwrap();
    office.clients.delete(client).await.unwrap();
    assert!(matches!(
        office.rooms.get(room).await,
        Err(ServiceError::NotFound { entity: "chambre", .. })
    ));
    assert!(matches!(
        office.clients.delete(client).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let (office, room, client) = hotel().await;
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();

    assert!(!office
        .reservations
        .is_available(room, date("2024-06-03"), date("2024-06-08"), None)
        .await
        .unwrap());
    let error = office
        .reservations
        .create(&reservation_form(client, room, "2024-06-03", "2024-06-08"))
        .await
        .unwrap_err();
    assert!(matches!(error, ServiceError::Unavailable));
    assert_eq!(form_errors(error), [ReservationError::Unavailable.to_string()]);
}

#[tokio::test]
async fn test_same_day_turnover_is_booked() {
    let (office, room, client) = hotel().await;
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-05", "2024-06-10"))
        .await
        .unwrap();
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-10", "2024-06-12"))
        .await
        .unwrap();
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();
    assert_eq!(office.rooms.reservations(room).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_edited_reservation_does_not_conflict_with_itself() {
    let (office, room, client) = hotel().await;
    let reservation = office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();

    assert!(office
        .reservations
        .is_available(
            room,
            date("2024-06-01"),
            date("2024-06-05"),
            Some(reservation.id())
        )
        .await
        .unwrap());
    let updated = office
        .reservations
        .update(
            reservation.id(),
            &reservation_form(client, room, "2024-06-02", "2024-06-06"),
        )
        .await
        .unwrap();
    assert_eq!(updated.id(), reservation.id());
    assert_eq!(updated.stay().arrival(), date("2024-06-02"));
}

#[tokio::test]
async fn test_booking_unknown_room_or_client() {
    let (office, room, client) = hotel().await;
    let error = office
        .reservations
        .create(&reservation_form(client, RoomId::from(99), "2024-06-01", "2024-06-05"))
        .await
        .unwrap_err();
    assert_eq!(form_errors(error), [ReservationError::RoomNotFound.to_string()]);

    let error = office
        .reservations
        .create(&reservation_form(ClientId::from(99), room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap_err();
    assert_eq!(form_errors(error), [ReservationError::ClientNotFound.to_string()]);

    assert!(matches!(
        office
            .reservations
            .update(
                ReservationId::from(99),
                &reservation_form(client, room, "2024-06-01", "2024-06-05"),
            )
            .await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_of_one_room() {
    let (office, room, client) = hotel().await;
    let tasks = (0..8)
        .map(|day| {
            let office = office.clone();
            let form = reservation_form(
                client,
                room,
                &format!("2024-07-0{}", day + 1),
                "2024-07-15",
            );
            tokio::spawn(async move { office.reservations.create(&form).await })
        })
        .collect::<Vec<_>>();

    let mut booked = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => booked += 1,
            Err(ServiceError::Unavailable) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(booked, 1);
    assert_eq!(office.reservations.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_available_rooms() {
    let (office, room, client) = hotel().await;
    let suite = office.rooms.create(&room_form("12", 4)).await.unwrap();
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();

    let query = |arrival: &str, departure: &str, min_capacity: &str| AvailabilityQuery {
        arrival: arrival.to_owned(),
        departure: departure.to_owned(),
        min_capacity: min_capacity.to_owned(),
    };
    let numbers = |rooms: Vec<hotelier::domain::core::Room>| {
        rooms
            .iter()
            .map(|r| r.number().to_owned())
            .collect::<Vec<_>>()
    };

    let free = office
        .rooms
        .available_rooms(&query("2024-06-03", "2024-06-04", ""))
        .await
        .unwrap();
    assert_eq!(numbers(free), ["12"]);

    let free = office
        .rooms
        .available_rooms(&query("2024-06-05", "2024-06-07", ""))
        .await
        .unwrap();
    assert_eq!(numbers(free), ["12", "7"]);

    let free = office
        .rooms
        .available_rooms(&query("2024-06-05", "2024-06-07", "3"))
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id(), suite.id());

    assert!(matches!(
        office
            .rooms
            .available_rooms(&query("2024-06-07", "2024-06-05", ""))
            .await,
        Err(ServiceError::Validation(_))
    ));
}

#[tokio::test]
async fn test_reservation_listings() {
    let (office, room, client) = hotel().await;
    let other = office
        .clients
        .create(&client_form("Albert", "albert@example.com"))
        .await
        .unwrap();
    office
        .reservations
        .create(&reservation_form(client, room, "2024-06-01", "2024-06-05"))
        .await
        .unwrap();
    office
        .reservations
        .create(&reservation_form(other.id(), room, "2024-07-01", "2024-07-05"))
        .await
        .unwrap();

    let all = office.reservations.list().await.unwrap();
    let names = all.iter().map(|d| d.client_name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Albert", "Dupont"]);

    let by_room = office.rooms.reservations(room).await.unwrap();
    assert_eq!(by_room[0].reservation.stay().arrival(), date("2024-07-01"));
    assert_eq!(by_room[0].room_number, "7");

    let by_client = office.clients.reservations(client).await.unwrap();
    assert_eq!(by_client.len(), 1);
    assert_eq!(by_client[0].client_email, "dupont@example.com");

    let choices = office.reservations.choices().await.unwrap();
    assert_eq!(choices.rooms.len(), 1);
    assert_eq!(
        choices.clients.iter().map(|c| c.name()).collect::<Vec<_>>(),
        ["Albert", "Dupont"]
    );
}

#[tokio::test]
async fn test_employees() {
    let office = MemoryStore::new().back_office();
    let form = EmployeeForm {
        name: "Lefèvre".to_owned(),
        age: "41".to_owned(),
        hired_on: "2019-03-18".to_owned(),
        authorized: None,
    };
    let employee = office.employees.create(&form).await.unwrap();
    assert!(!employee.authorized());

    let updated = office
        .employees
        .update(
            employee.id(),
            &EmployeeForm {
                authorized: Some("on".to_owned()),
                ..form.clone()
            },
        )
        .await
        .unwrap();
    assert!(updated.authorized());
    assert_eq!(office.employees.list().await.unwrap(), [updated]);

    assert!(matches!(
        office
            .employees
            .create(&EmployeeForm {
                age: "15".to_owned(),
                ..form
            })
            .await,
        Err(ServiceError::Validation(_))
    ));

    office.employees.delete(employee.id()).await.unwrap();
    assert!(matches!(
        office.employees.delete(employee.id()).await,
        Err(ServiceError::NotFound { .. })
    ));
}

/// Fails the test if the service reaches storage.
struct Unreachable;

#[async_trait]
impl ReservationRepository for Unreachable {
    async fn find_all(&self) -> Result<Vec<ReservationDetails>, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn find_by_id(&self, _: ReservationId) -> Result<Option<Reservation>, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn find_by_room(&self, _: RoomId) -> Result<Vec<ReservationDetails>, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn find_by_client(
        &self,
        _: ClientId,
    ) -> Result<Vec<ReservationDetails>, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn count_by_room(&self, _: RoomId) -> Result<u64, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn count_by_client(&self, _: ClientId) -> Result<u64, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn book(&self, _: &ReservationDraft) -> Result<BookingOutcome, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn rebook(
        &self,
        _: ReservationId,
        _: &ReservationDraft,
    ) -> Result<BookingOutcome, DataAccessError> {
        unreachable!("storage queried")
    }

    async fn delete(&self, _: ReservationId) -> Result<bool, DataAccessError> {
        unreachable!("storage queried")
    }
}

#[tokio::test]
async fn test_invalid_dates_never_reach_storage() {
    let store = MemoryStore::new();
    let service = ReservationService::new(
        std::sync::Arc::new(Unreachable),
        store.clone(),
        store.clone(),
    );

    for (arrival, departure) in [("2024-06-05", "2024-06-05"), ("2024-06-05", "2024-06-01")] {
        let error = service
            .create(&reservation_form(
                ClientId::from(1),
                RoomId::from(7),
                arrival,
                departure,
            ))
            .await
            .unwrap_err();
        assert_eq!(
            form_errors(error),
            [StayError::DepartureNotAfterArrival.to_string()]
        );

        let error = service
            .is_available(RoomId::from(7), date(arrival), date(departure), None)
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::Validation(_)));
    }

    let error = service
        .update(
            ReservationId::from(1),
            &reservation_form(ClientId::from(1), RoomId::from(7), "2024-06-05", "2024-06-01"),
        )
        .await
        .unwrap_err();
    assert!(matches!(error, ServiceError::Validation(_)));

    let error = service
        .is_available(RoomId::from(0), date("2024-06-01"), date("2024-06-05"), None)
        .await
        .unwrap_err();
    assert!(matches!(error, ServiceError::Validation(_)));
}
