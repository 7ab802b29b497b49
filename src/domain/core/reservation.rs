use async_trait::async_trait;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validation::{self, ValidationErrors},
    DataAccessError, Entity, Id,
};

use super::{ClientId, RoomId, Stay};

/// Reservation repository
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Every reservation, ordered by room then client
    async fn find_all(&self) -> Result<Vec<ReservationDetails>, DataAccessError>;
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError>;
    /// Reservations of a room, most recent arrival first
    async fn find_by_room(&self, room: RoomId) -> Result<Vec<ReservationDetails>, DataAccessError>;
    /// Reservations of a client, most recent arrival first
    async fn find_by_client(
        &self,
        client: ClientId,
    ) -> Result<Vec<ReservationDetails>, DataAccessError>;
    async fn count_by_room(&self, room: RoomId) -> Result<u64, DataAccessError>;
    async fn count_by_client(&self, client: ClientId) -> Result<u64, DataAccessError>;
    /// Checks the room and the client exist and the stay is free, then inserts,
    /// all as one atomic step.
    async fn book(&self, draft: &ReservationDraft) -> Result<BookingOutcome, DataAccessError>;
    /// Same as [`ReservationRepository::book`] for an existing reservation,
    /// which never conflicts with itself.
    async fn rebook(
        &self,
        id: ReservationId,
        draft: &ReservationDraft,
    ) -> Result<BookingOutcome, DataAccessError>;
    async fn delete(&self, id: ReservationId) -> Result<bool, DataAccessError>;
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
    Deref,
    Default,
)]
pub struct ReservationId(u64);

impl Id for ReservationId {
    type Inner = u64;
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    client_id: ClientId,
    room_id: RoomId,
    stay: Stay,
}

impl Reservation {
    pub fn new(id: ReservationId, draft: ReservationDraft) -> Self {
        Self {
            id,
            client_id: draft.client_id,
            room_id: draft.room_id,
            stay: draft.stay,
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn stay(&self) -> &Stay {
        &self.stay
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    const ENTITY_NAME: &'static str = "réservation";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A reservation with the labels the back office displays next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub room_number: String,
    pub client_name: String,
    pub client_email: String,
}

/// Result of an atomic availability check and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked(Reservation),
    Unavailable,
    RoomNotFound,
    ClientNotFound,
    ReservationNotFound,
}

/// Validated reservation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub client_id: ClientId,
    pub room_id: RoomId,
    pub stay: Stay,
}

/// Reservation fields as submitted by the back-office form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationForm {
    #[serde(default)]
    pub client_id: String,
    #[serde(rename = "chambre_id", default)]
    pub room_id: String,
    #[serde(rename = "date_arrivee", default)]
    pub arrival: String,
    #[serde(rename = "date_depart", default)]
    pub departure: String,
}

impl ReservationForm {
    pub fn validate(&self) -> Result<ReservationDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let client_id = validation::positive_id(&self.client_id).map(ClientId::from);
        if client_id.is_none() {
            errors.push(ReservationError::InvalidClient);
        }
        let room_id = validation::positive_id(&self.room_id).map(RoomId::from);
        if room_id.is_none() {
            errors.push(ReservationError::InvalidRoom);
        }
        let arrival = validation::iso_date(&self.arrival);
        if arrival.is_none() {
            errors.push(ReservationError::InvalidArrival);
        }
        let departure = validation::iso_date(&self.departure);
        if departure.is_none() {
            errors.push(ReservationError::InvalidDeparture);
        }
        let stay = match (arrival, departure) {
            (Some(arrival), Some(departure)) => errors.check(Stay::new(arrival, departure)),
            _ => None,
        };

        match (client_id, room_id, stay) {
            (Some(client_id), Some(room_id), Some(stay)) if errors.is_empty() => {
                Ok(ReservationDraft {
                    client_id,
                    room_id,
                    stay,
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&Reservation> for ReservationForm {
    fn from(reservation: &Reservation) -> Self {
        Self {
            client_id: reservation.client_id.to_string(),
            room_id: reservation.room_id.to_string(),
            arrival: reservation.stay.arrival().format("%Y-%m-%d").to_string(),
            departure: reservation.stay.departure().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Reservation validation messages
#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum ReservationError {
    #[display(fmt = "L'id du client doit être un nombre positif")]
    InvalidClient,
    #[display(fmt = "L'id de la chambre doit être un nombre positif")]
    InvalidRoom,
    #[display(fmt = "La date d'arrivée doit être une date valide (AAAA-MM-JJ)")]
    InvalidArrival,
    #[display(fmt = "La date de départ doit être une date valide (AAAA-MM-JJ)")]
    InvalidDeparture,
    #[display(fmt = "Le client sélectionné n'existe pas")]
    ClientNotFound,
    #[display(fmt = "La chambre sélectionnée n'existe pas")]
    RoomNotFound,
    #[display(fmt = "La chambre n'est plus disponible pour ces dates")]
    Unavailable,
}
