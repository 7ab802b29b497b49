use async_trait::async_trait;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validation::{self, ValidationErrors},
    DataAccessError, Entity, Id,
};

use super::{Price, PriceError, Stay};

pub const ROOM_NUMBER_MAX_LEN: usize = 10;
pub const ROOM_CAPACITY_MAX: u32 = 20;
pub const ROOM_KIND_MAX_LEN: usize = 50;

/// Room repository
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// All rooms ordered by number
    async fn find_all(&self) -> Result<Vec<Room>, DataAccessError>;
    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DataAccessError>;
    async fn find_by_number(&self, number: &str) -> Result<Option<Room>, DataAccessError>;
    /// Rooms with no reservation overlapping `stay`, ordered by number
    async fn find_available(
        &self,
        stay: &Stay,
        min_capacity: Option<u32>,
    ) -> Result<Vec<Room>, DataAccessError>;
    async fn insert(&self, draft: &RoomDraft) -> Result<Room, DataAccessError>;
    /// Replaces every field; `None` when the room does not exist
    async fn update(&self, id: RoomId, draft: &RoomDraft) -> Result<Option<Room>, DataAccessError>;
    async fn delete(&self, id: RoomId) -> Result<bool, DataAccessError>;
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
pub struct RoomId(u64);

impl Id for RoomId {
    type Inner = u64;
}

/// Room entity
///
/// `available` is a manually maintained flag shown to staff. Whether a room
/// can be booked for given dates is derived from reservations only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    number: String,
    capacity: u32,
    kind: Option<String>,
    price: Option<Price>,
    available: bool,
}

impl Room {
    pub fn new(id: RoomId, draft: RoomDraft) -> Self {
        Self {
            id,
            number: draft.number,
            capacity: draft.capacity,
            kind: draft.kind,
            price: draft.price,
            available: draft.available,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn price(&self) -> Option<Price> {
        self.price
    }

    pub fn available(&self) -> bool {
        self.available
    }
}

impl Entity for Room {
    type Id = RoomId;

    const ENTITY_NAME: &'static str = "chambre";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validated room fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    pub number: String,
    pub capacity: u32,
    pub kind: Option<String>,
    pub price: Option<Price>,
    pub available: bool,
}

/// Room fields as submitted by the back-office form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomForm {
    #[serde(rename = "numero", default)]
    pub number: String,
    #[serde(rename = "capacite", default)]
    pub capacity: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "prix", default)]
    pub price: String,
    #[serde(rename = "disponible", default)]
    pub available: Option<String>,
}

impl RoomForm {
    pub fn validate(&self) -> Result<RoomDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let number = self.number.trim().to_owned();
        if number.is_empty() {
            errors.push(RoomError::NumberRequired);
        } else if number.chars().count() > ROOM_NUMBER_MAX_LEN {
            errors.push(RoomError::NumberTooLong);
        }

        let capacity = validation::integer_in(&self.capacity, 1, ROOM_CAPACITY_MAX);
        if capacity.is_none() {
            errors.push(RoomError::InvalidCapacity);
        }

        let kind = validation::optional_text(&self.kind);
        if kind
            .as_ref()
            .is_some_and(|k| k.chars().count() > ROOM_KIND_MAX_LEN)
        {
            errors.push(RoomError::KindTooLong);
        }

        let price = match validation::optional_text(&self.price) {
            Some(price) => errors.check(price.parse::<Price>().map_err(|e| match e {
                PriceError::TooHigh => RoomError::PriceTooHigh,
                e => RoomError::InvalidPrice(e),
            })),
            None => None,
        };

        match capacity {
            Some(capacity) if errors.is_empty() => Ok(RoomDraft {
                number,
                capacity,
                kind,
                price,
                available: validation::checkbox(&self.available),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Room> for RoomForm {
    fn from(room: &Room) -> Self {
        Self {
            number: room.number.clone(),
            capacity: room.capacity.to_string(),
            kind: room.kind.clone().unwrap_or_default(),
            price: room
                .price
                .map(|p| p.to_decimal_string())
                .unwrap_or_default(),
            available: room.available.then(|| "on".to_owned()),
        }
    }
}

/// Room validation messages
#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum RoomError {
    #[display(fmt = "Le numéro de chambre est requis")]
    NumberRequired,
    #[display(fmt = "Le numéro de chambre ne doit pas dépasser 10 caractères")]
    NumberTooLong,
    #[display(fmt = "La capacité doit être un nombre entre 1 et 20")]
    InvalidCapacity,
    #[display(fmt = "Le type de chambre ne doit pas dépasser 50 caractères")]
    KindTooLong,
    #[display(fmt = "Le prix doit être un nombre positif (deux décimales au plus)")]
    InvalidPrice(#[error(source)] PriceError),
    #[display(fmt = "Le prix ne doit pas dépasser 99 999 999,99 €")]
    PriceTooHigh,
    #[display(fmt = "Cette chambre existe déjà")]
    DuplicateNumber,
}
