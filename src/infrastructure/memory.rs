//! In-process storage with the same constraints as the MySQL schema.
//!
//! Every operation runs under a single lock, which makes a booking's checks
//! and its write one atomic step just like the transaction on MySQL.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    application::BackOffice,
    domain::{
        core::{
            is_available, BookingOutcome, Client, ClientDraft, ClientId, ClientRepository,
            Employee, EmployeeDraft, EmployeeId, EmployeeRepository, Reservation,
            ReservationDetails, ReservationDraft, ReservationId, ReservationRepository, Room,
            RoomDraft, RoomId, RoomRepository, Stay,
        },
        DataAccessError, Entity,
    },
};

#[derive(Error, Debug)]
pub enum ConstraintViolation {
    #[error("duplicate {column} `{value}`")]
    Unique { column: &'static str, value: String },
    #[error("{entity} {id} is referenced by {count} reservation(s)")]
    ForeignKey {
        entity: &'static str,
        id: u64,
        count: usize,
    },
}

#[derive(Default)]
struct Tables {
    rooms: BTreeMap<RoomId, Room>,
    clients: BTreeMap<ClientId, Client>,
    employees: BTreeMap<EmployeeId, Employee>,
    reservations: BTreeMap<ReservationId, Reservation>,
    last_id: u64,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn room_number_taken(&self, number: &str, except: Option<RoomId>) -> bool {
        self.rooms
            .values()
            .any(|room| room.number() == number && Some(room.id()) != except)
    }

    fn email_taken(&self, email: &str, except: Option<ClientId>) -> bool {
        self.clients
            .values()
            .any(|client| client.email().eq_ignore_ascii_case(email) && Some(client.id()) != except)
    }

    fn details(&self, reservation: &Reservation) -> ReservationDetails {
        let room = self.rooms.get(&reservation.room_id());
        let client = self.clients.get(&reservation.client_id());
        ReservationDetails {
            reservation: reservation.clone(),
            room_number: room.map(|r| r.number().to_owned()).unwrap_or_default(),
            client_name: client.map(|c| c.name().to_owned()).unwrap_or_default(),
            client_email: client.map(|c| c.email().to_owned()).unwrap_or_default(),
        }
    }

    /// Reservations matching `filter`, most recent arrival first.
    fn recent_details<F>(&self, filter: F) -> Vec<ReservationDetails>
    where
        F: Fn(&Reservation) -> bool,
    {
        let mut details = self
            .reservations
            .values()
            .filter(|r| filter(r))
            .map(|r| self.details(r))
            .collect::<Vec<_>>();
        details.sort_by(|a, b| {
            b.reservation
                .stay()
                .arrival()
                .cmp(&a.reservation.stay().arrival())
        });
        details
    }

    fn check_booking(
        &self,
        draft: &ReservationDraft,
        exclude: Option<ReservationId>,
    ) -> Option<BookingOutcome> {
        if !self.rooms.contains_key(&draft.room_id) {
            Some(BookingOutcome::RoomNotFound)
        } else if !self.clients.contains_key(&draft.client_id) {
            Some(BookingOutcome::ClientNotFound)
        } else if !is_available(
            draft.room_id,
            &draft.stay,
            exclude,
            self.reservations.values(),
        ) {
            Some(BookingOutcome::Unavailable)
        } else {
            None
        }
    }
}

fn unique(column: &'static str, value: &str) -> DataAccessError {
    DataAccessError::UniqueViolation(Box::new(ConstraintViolation::Unique {
        column,
        value: value.to_owned(),
    }))
}

fn referenced<E: Entity>(id: u64, count: usize) -> DataAccessError {
    DataAccessError::ForeignKeyViolation(Box::new(ConstraintViolation::ForeignKey {
        entity: E::ENTITY_NAME,
        id,
        count,
    }))
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A back office whose four repositories are this store.
    pub fn back_office(self: &Arc<Self>) -> BackOffice {
        BackOffice::new(self.clone(), self.clone(), self.clone(), self.clone())
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Room>, DataAccessError> {
        let tables = self.tables.lock().await;
        let mut rooms = tables.rooms.values().cloned().collect::<Vec<_>>();
        rooms.sort_by(|a, b| a.number().cmp(b.number()));
        Ok(rooms)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DataAccessError> {
        Ok(self.tables.lock().await.rooms.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Room>, DataAccessError> {
        let tables = self.tables.lock().await;
        Ok(tables.rooms.values().find(|r| r.number() == number).cloned())
    }

    async fn find_available(
        &self,
        stay: &Stay,
        min_capacity: Option<u32>,
    ) -> Result<Vec<Room>, DataAccessError> {
        let tables = self.tables.lock().await;
        let mut rooms = tables
            .rooms
            .values()
            .filter(|room| min_capacity.map_or(true, |min| room.capacity() >= min))
            .filter(|room| is_available(room.id(), stay, None, tables.reservations.values()))
            .cloned()
            .collect::<Vec<_>>();
        rooms.sort_by(|a, b| a.number().cmp(b.number()));
        Ok(rooms)
    }

    async fn insert(&self, draft: &RoomDraft) -> Result<Room, DataAccessError> {
        let mut tables = self.tables.lock().await;
        if tables.room_number_taken(&draft.number, None) {
            return Err(unique("numero", &draft.number));
        }
        let room = Room::new(RoomId::from(tables.next_id()), draft.clone());
        tables.rooms.insert(room.id(), room.clone());
        Ok(room)
    }

    async fn update(&self, id: RoomId, draft: &RoomDraft) -> Result<Option<Room>, DataAccessError> {
        let mut tables = self.tables.lock().await;
        if !tables.rooms.contains_key(&id) {
            return Ok(None);
        }
        if tables.room_number_taken(&draft.number, Some(id)) {
            return Err(unique("numero", &draft.number));
        }
        let room = Room::new(id, draft.clone());
        tables.rooms.insert(id, room.clone());
        Ok(Some(room))
    }

    async fn delete(&self, id: RoomId) -> Result<bool, DataAccessError> {
        let mut tables = self.tables.lock().await;
        let count = tables
            .reservations
            .values()
            .filter(|r| r.room_id() == id)
            .count();
        if count > 0 {
            return Err(referenced::<Room>(*id, count));
        }
        Ok(tables.rooms.remove(&id).is_some())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Client>, DataAccessError> {
        let tables = self.tables.lock().await;
        let mut clients = tables.clients.values().cloned().collect::<Vec<_>>();
        clients.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(clients)
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DataAccessError> {
        Ok(self.tables.lock().await.clients.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DataAccessError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .clients
            .values()
            .find(|c| c.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, draft: &ClientDraft) -> Result<Client, DataAccessError> {
        let mut tables = self.tables.lock().await;
        if tables.email_taken(&draft.email, None) {
            return Err(unique("email", &draft.email));
        }
        let client = Client::new(ClientId::from(tables.next_id()), draft.clone());
        tables.clients.insert(client.id(), client.clone());
        Ok(client)
    }

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
    ) -> Result<Option<Client>, DataAccessError> {
        let mut tables = self.tables.lock().await;
        if !tables.clients.contains_key(&id) {
            return Ok(None);
        }
        if tables.email_taken(&draft.email, Some(id)) {
            return Err(unique("email", &draft.email));
        }
        let client = Client::new(id, draft.clone());
        tables.clients.insert(id, client.clone());
        Ok(Some(client))
    }

    async fn delete(&self, id: ClientId) -> Result<bool, DataAccessError> {
        let mut tables = self.tables.lock().await;
        let count = tables
            .reservations
            .values()
            .filter(|r| r.client_id() == id)
            .count();
        if count > 0 {
            return Err(referenced::<Client>(*id, count));
        }
        Ok(tables.clients.remove(&id).is_some())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Employee>, DataAccessError> {
        Ok(self.tables.lock().await.employees.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DataAccessError> {
        Ok(self.tables.lock().await.employees.get(&id).cloned())
    }

    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, DataAccessError> {
        let mut tables = self.tables.lock().await;
        let employee = Employee::new(EmployeeId::from(tables.next_id()), draft.clone());
        tables.employees.insert(employee.id(), employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, DataAccessError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.employees.get_mut(&id).map(|employee| {
            *employee = Employee::new(id, draft.clone());
            employee.clone()
        }))
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, DataAccessError> {
        Ok(self.tables.lock().await.employees.remove(&id).is_some())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<ReservationDetails>, DataAccessError> {
        let tables = self.tables.lock().await;
        let mut details = tables
            .reservations
            .values()
            .map(|r| tables.details(r))
            .collect::<Vec<_>>();
        details.sort_by(|a, b| {
            a.room_number
                .cmp(&b.room_number)
                .then_with(|| a.client_name.cmp(&b.client_name))
                .then_with(|| a.reservation.stay().arrival().cmp(&b.reservation.stay().arrival()))
        });
        Ok(details)
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError> {
        Ok(self.tables.lock().await.reservations.get(&id).cloned())
    }

    async fn find_by_room(&self, room: RoomId) -> Result<Vec<ReservationDetails>, DataAccessError> {
        let tables = self.tables.lock().await;
        Ok(tables.recent_details(|r| r.room_id() == room))
    }

    async fn find_by_client(
        &self,
        client: ClientId,
    ) -> Result<Vec<ReservationDetails>, DataAccessError> {
        let tables = self.tables.lock().await;
        Ok(tables.recent_details(|r| r.client_id() == client))
    }

    async fn count_by_room(&self, room: RoomId) -> Result<u64, DataAccessError> {
        let tables = self.tables.lock().await;
        Ok(tables.reservations.values().filter(|r| r.room_id() == room).count() as u64)
    }

    async fn count_by_client(&self, client: ClientId) -> Result<u64, DataAccessError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| r.client_id() == client)
            .count() as u64)
    }

    async fn book(&self, draft: &ReservationDraft) -> Result<BookingOutcome, DataAccessError> {
        let mut tables = self.tables.lock().await;
        if let Some(rejected) = tables.check_booking(draft, None) {
            return Ok(rejected);
        }
        let reservation = Reservation::new(ReservationId::from(tables.next_id()), draft.clone());
        tables
            .reservations
            .insert(reservation.id(), reservation.clone());
        Ok(BookingOutcome::Booked(reservation))
    }

    async fn rebook(
        &self,
        id: ReservationId,
        draft: &ReservationDraft,
    ) -> Result<BookingOutcome, DataAccessError> {
        let mut tables = self.tables.lock().await;
        if !tables.reservations.contains_key(&id) {
            return Ok(BookingOutcome::ReservationNotFound);
        }
        if let Some(rejected) = tables.check_booking(draft, Some(id)) {
            return Ok(rejected);
        }
        let reservation = Reservation::new(id, draft.clone());
        tables.reservations.insert(id, reservation.clone());
        Ok(BookingOutcome::Booked(reservation))
    }

    async fn delete(&self, id: ReservationId) -> Result<bool, DataAccessError> {
        Ok(self.tables.lock().await.reservations.remove(&id).is_some())
    }
}
