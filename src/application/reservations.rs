use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{
    core::{
        self, AvailabilityError, BookingOutcome, Client, ClientRepository, Reservation,
        ReservationDetails, ReservationError, ReservationForm, ReservationId,
        ReservationRepository, Room, RoomId, RoomRepository, Stay,
    },
    ValidationErrors,
};

use super::ServiceError;

/// Rooms and clients offered by the reservation form.
#[derive(Debug, Clone, Default)]
pub struct ReservationChoices {
    pub clients: Vec<Client>,
    pub rooms: Vec<Room>,
}

#[derive(Clone)]
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    rooms: Arc<dyn RoomRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        rooms: Arc<dyn RoomRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            reservations,
            rooms,
            clients,
        }
    }

    pub async fn list(&self) -> Result<Vec<ReservationDetails>, ServiceError> {
        Ok(self.reservations.find_all().await?)
    }

    pub async fn get(&self, id: ReservationId) -> Result<Reservation, ServiceError> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found::<Reservation>(id))
    }

    pub async fn choices(&self) -> Result<ReservationChoices, ServiceError> {
        Ok(ReservationChoices {
            clients: self.clients.find_all().await?,
            rooms: self.rooms.find_all().await?,
        })
    }

    /// Whether `room` is free from `arrival` to `departure`, ignoring the
    /// reservation `exclude` when one is being edited.
    ///
    /// Arguments are checked before storage is queried.
    pub async fn is_available(
        &self,
        room: RoomId,
        arrival: NaiveDate,
        departure: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> Result<bool, ServiceError> {
        let mut errors = ValidationErrors::new();
        if *room == 0 {
            errors.push(AvailabilityError::InvalidRoom);
        }
        let stay = errors.check(Stay::new(arrival, departure));
        let stay = match stay {
            Some(stay) if errors.is_empty() => stay,
            _ => return Err(errors.into()),
        };
        let existing = self.reservations.find_by_room(room).await?;
        Ok(core::is_available(
            room,
            &stay,
            exclude,
            existing.iter().map(|details| &details.reservation),
        ))
    }

    pub async fn create(&self, form: &ReservationForm) -> Result<Reservation, ServiceError> {
        let draft = form.validate()?;
        let outcome = self.reservations.book(&draft).await?;
        let reservation = settle(outcome, None)?;
        info!(
            "booked room {} for client {} from {} to {}",
            draft.room_id,
            draft.client_id,
            draft.stay.arrival(),
            draft.stay.departure()
        );
        Ok(reservation)
    }

    pub async fn update(
        &self,
        id: ReservationId,
        form: &ReservationForm,
    ) -> Result<Reservation, ServiceError> {
        let draft = form.validate()?;
        let outcome = self.reservations.rebook(id, &draft).await?;
        let reservation = settle(outcome, Some(id))?;
        info!("updated reservation {}", id);
        Ok(reservation)
    }

    pub async fn delete(&self, id: ReservationId) -> Result<(), ServiceError> {
        if !self.reservations.delete(id).await? {
            return Err(ServiceError::not_found::<Reservation>(id));
        }
        info!("deleted reservation {}", id);
        Ok(())
    }
}

fn settle(
    outcome: BookingOutcome,
    id: Option<ReservationId>,
) -> Result<Reservation, ServiceError> {
    match outcome {
        BookingOutcome::Booked(reservation) => Ok(reservation),
        BookingOutcome::Unavailable => {
            warn!("booking rejected, room already taken");
            Err(ServiceError::Unavailable)
        }
        BookingOutcome::RoomNotFound => {
            Err(ValidationErrors::single(ReservationError::RoomNotFound).into())
        }
        BookingOutcome::ClientNotFound => {
            Err(ValidationErrors::single(ReservationError::ClientNotFound).into())
        }
        BookingOutcome::ReservationNotFound => Err(ServiceError::not_found::<Reservation>(
            id.unwrap_or_default(),
        )),
    }
}
