use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    core::{
        AvailabilityQuery, ReservationDetails, ReservationRepository, Room, RoomError, RoomForm,
        RoomId, RoomRepository,
    },
    DataAccessError, Entity,
};

use super::{duplicate_or, ServiceError};

#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl RoomService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            rooms,
            reservations,
        }
    }

    pub async fn list(&self) -> Result<Vec<Room>, ServiceError> {
        Ok(self.rooms.find_all().await?)
    }

    pub async fn get(&self, id: RoomId) -> Result<Room, ServiceError> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found::<Room>(id))
    }

    pub async fn create(&self, form: &RoomForm) -> Result<Room, ServiceError> {
        let draft = form.validate()?;
        if self.rooms.find_by_number(&draft.number).await?.is_some() {
            warn!("room number {} already exists", draft.number);
            return Err(ServiceError::Duplicate(RoomError::DuplicateNumber.to_string()));
        }
        let room = self
            .rooms
            .insert(&draft)
            .await
            .map_err(|e| duplicate_or(e, RoomError::DuplicateNumber))?;
        info!("created room {} ({})", room.id(), room.number());
        Ok(room)
    }

    pub async fn update(&self, id: RoomId, form: &RoomForm) -> Result<Room, ServiceError> {
        let draft = form.validate()?;
        if let Some(other) = self.rooms.find_by_number(&draft.number).await? {
            if other.id() != id {
                warn!("room number {} already used by room {}", draft.number, other.id());
                return Err(ServiceError::Duplicate(RoomError::DuplicateNumber.to_string()));
            }
        }
        let room = self
            .rooms
            .update(id, &draft)
            .await
            .map_err(|e| duplicate_or(e, RoomError::DuplicateNumber))?
            .ok_or_else(|| ServiceError::not_found::<Room>(id))?;
        info!("updated room {}", id);
        Ok(room)
    }

    /// Deletes a room that no reservation references.
    pub async fn delete(&self, id: RoomId) -> Result<(), ServiceError> {
        let room = self.get(id).await?;
        let reservations = self.reservations.count_by_room(id).await?;
        if reservations > 0 {
            warn!("room {} still has {} reservation(s)", id, reservations);
            return Err(ServiceError::ReferentialIntegrity {
                entity: Room::ENTITY_NAME,
                id: *id,
                reservations,
            });
        }
        match self.rooms.delete(id).await {
            Ok(true) => {
                info!("deleted room {} ({})", id, room.number());
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found::<Room>(id)),
            Err(DataAccessError::ForeignKeyViolation(_)) => {
                warn!("room {} was booked while being deleted", id);
                Err(ServiceError::ReferentialIntegrity {
                    entity: Room::ENTITY_NAME,
                    id: *id,
                    reservations: self.reservations.count_by_room(id).await?,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rooms with no reservation overlapping the requested stay.
    pub async fn available_rooms(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Room>, ServiceError> {
        let (stay, min_capacity) = query.validate()?;
        Ok(self.rooms.find_available(&stay, min_capacity).await?)
    }

    pub async fn reservations(&self, id: RoomId) -> Result<Vec<ReservationDetails>, ServiceError> {
        Ok(self.reservations.find_by_room(id).await?)
    }
}
