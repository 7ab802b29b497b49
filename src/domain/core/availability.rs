use chrono::NaiveDate;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validation::{self, ValidationErrors},
    Entity,
};

use super::{Reservation, ReservationId, RoomId, ROOM_CAPACITY_MAX};

/// Half-open stay interval `[arrival, departure)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stay {
    arrival: NaiveDate,
    departure: NaiveDate,
}

impl Stay {
    pub fn new(arrival: NaiveDate, departure: NaiveDate) -> Result<Self, StayError> {
        if departure <= arrival {
            return Err(StayError::DepartureNotAfterArrival);
        }
        Ok(Self { arrival, departure })
    }

    pub fn arrival(&self) -> NaiveDate {
        self.arrival
    }

    pub fn departure(&self) -> NaiveDate {
        self.departure
    }

    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days()
    }

    /// Strict on both bounds, so a departure and an arrival on the same day
    /// do not collide.
    pub fn overlaps(&self, other: &Stay) -> bool {
        self.arrival < other.departure && other.arrival < self.departure
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.arrival <= date && date < self.departure
    }
}

#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum StayError {
    #[display(fmt = "La date de départ doit être postérieure à la date d'arrivée")]
    DepartureNotAfterArrival,
}

/// Whether `room` is free for `stay` given a snapshot of existing reservations.
///
/// Reservations on other rooms and the one named by `exclude` are ignored.
pub fn is_available<'a, I>(
    room: RoomId,
    stay: &Stay,
    exclude: Option<ReservationId>,
    existing: I,
) -> bool
where
    I: IntoIterator<Item = &'a Reservation>,
{
    !existing
        .into_iter()
        .filter(|r| r.room_id() == room)
        .filter(|r| Some(r.id()) != exclude)
        .any(|r| r.stay().overlaps(stay))
}

/// Search for rooms free over a stay, as typed into the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(rename = "date_arrivee", default)]
    pub arrival: String,
    #[serde(rename = "date_depart", default)]
    pub departure: String,
    #[serde(rename = "capacite_min", default)]
    pub min_capacity: String,
}

impl AvailabilityQuery {
    pub fn is_blank(&self) -> bool {
        self.arrival.trim().is_empty() && self.departure.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(Stay, Option<u32>), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let arrival = validation::iso_date(&self.arrival);
        if arrival.is_none() {
            errors.push(AvailabilityError::InvalidArrival);
        }
        let departure = validation::iso_date(&self.departure);
        if departure.is_none() {
            errors.push(AvailabilityError::InvalidDeparture);
        }
        let stay = match (arrival, departure) {
            (Some(arrival), Some(departure)) => errors.check(Stay::new(arrival, departure)),
            _ => None,
        };
        let min_capacity = match validation::optional_text(&self.min_capacity) {
            Some(value) => {
                let capacity = validation::integer_in(&value, 1, ROOM_CAPACITY_MAX);
                if capacity.is_none() {
                    errors.push(AvailabilityError::InvalidCapacity);
                }
                capacity
            }
            None => None,
        };
        match stay {
            Some(stay) if errors.is_empty() => Ok((stay, min_capacity)),
            _ => Err(errors),
        }
    }
}

#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum AvailabilityError {
    #[display(fmt = "La date d'arrivée doit être une date valide (AAAA-MM-JJ)")]
    InvalidArrival,
    #[display(fmt = "La date de départ doit être une date valide (AAAA-MM-JJ)")]
    InvalidDeparture,
    #[display(fmt = "La capacité minimale doit être un nombre entre 1 et 20")]
    InvalidCapacity,
    #[display(fmt = "L'id de la chambre doit être un nombre positif")]
    InvalidRoom,
}
