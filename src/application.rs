//! Use cases of the back office, one service per entity.
//!
//! Services validate submitted forms, guard deletions against dangling
//! reservations and translate storage failures into [`ServiceError`].

mod clients;
mod employees;
mod reservations;
mod rooms;

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    core::{
        ClientRepository, EmployeeRepository, ReservationError, ReservationRepository,
        RoomRepository,
    },
    DataAccessError, Entity, Id, ValidationErrors,
};

pub use self::clients::ClientService;
pub use self::employees::EmployeeService;
pub use self::reservations::{ReservationChoices, ReservationService};
pub use self::rooms::RoomService;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("{entity} {id} introuvable")]
    NotFound { entity: &'static str, id: u64 },
    #[error("Impossible de supprimer {entity} {id} : {reservations} réservation(s) associée(s)")]
    ReferentialIntegrity {
        entity: &'static str,
        id: u64,
        reservations: u64,
    },
    #[error("{0}")]
    Duplicate(String),
    #[error("La chambre n'est plus disponible pour ces dates")]
    Unavailable,
    #[error("Erreur d'accès aux données: {0}")]
    DataAccess(#[from] DataAccessError),
}

impl ServiceError {
    pub(crate) fn not_found<E>(id: E::Id) -> Self
    where
        E: Entity,
        E::Id: Id<Inner = u64>,
    {
        Self::NotFound {
            entity: E::ENTITY_NAME,
            id: *id,
        }
    }

    /// Splits off the failures a form can display next to the submitted values.
    pub fn into_form_errors(self) -> Result<ValidationErrors, ServiceError> {
        match self {
            Self::Validation(errors) => Ok(errors),
            Self::Duplicate(message) => Ok(ValidationErrors::single(message)),
            Self::Unavailable => Ok(ValidationErrors::single(ReservationError::Unavailable)),
            other => Err(other),
        }
    }
}

/// Maps a storage uniqueness failure onto the message the form shows.
fn duplicate_or<M: ToString>(error: DataAccessError, message: M) -> ServiceError {
    match error {
        DataAccessError::UniqueViolation(_) => ServiceError::Duplicate(message.to_string()),
        other => ServiceError::DataAccess(other),
    }
}

/// Every service of the back office, sharing one set of repositories.
#[derive(Clone)]
pub struct BackOffice {
    pub rooms: RoomService,
    pub clients: ClientService,
    pub employees: EmployeeService,
    pub reservations: ReservationService,
}

impl BackOffice {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        clients: Arc<dyn ClientRepository>,
        employees: Arc<dyn EmployeeRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            rooms: RoomService::new(rooms.clone(), reservations.clone()),
            clients: ClientService::new(clients.clone(), reservations.clone()),
            employees: EmployeeService::new(employees),
            reservations: ReservationService::new(reservations, rooms, clients),
        }
    }
}
