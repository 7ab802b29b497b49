use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySqlConnection, MySqlPool};
use tracing::debug;

use crate::domain::{
    core::{
        BookingOutcome, ClientId, Reservation, ReservationDetails, ReservationDraft,
        ReservationId, ReservationRepository, RoomId, Stay,
    },
    DataAccessError,
};

const SELECT_DETAILS: &str = "SELECT r.id, r.client_id, r.chambre_id, r.date_arrivee, \
    r.date_depart, c.numero AS room_number, cl.nom AS client_name, cl.email AS client_email \
    FROM reservations r \
    JOIN chambres c ON c.id = r.chambre_id \
    JOIN clients cl ON cl.id = r.client_id";

#[derive(Clone)]
pub struct MySqlReservationRepository {
    pool: MySqlPool,
}

impl MySqlReservationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Joined listing, optionally restricted to one value of `column`.
    async fn details(
        &self,
        filter: Option<(&str, u64)>,
        order: &str,
    ) -> Result<Vec<ReservationDetails>, DataAccessError> {
        let sql = match filter {
            Some((column, _)) => format!("{SELECT_DETAILS} WHERE {column} = ? ORDER BY {order}"),
            None => format!("{SELECT_DETAILS} ORDER BY {order}"),
        };
        let mut query = sqlx::query_as::<_, DetailsRow>(&sql);
        if let Some((_, value)) = filter {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(ReservationDetails::try_from).collect()
    }
}

#[derive(FromRow)]
struct ReservationRow {
    id: u64,
    client_id: u64,
    chambre_id: u64,
    date_arrivee: NaiveDate,
    date_depart: NaiveDate,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DataAccessError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let stay = Stay::new(row.date_arrivee, row.date_depart)
            .map_err(|e| DataAccessError::ReadError(Box::new(e)))?;
        Ok(Reservation::new(
            ReservationId::from(row.id),
            ReservationDraft {
                client_id: ClientId::from(row.client_id),
                room_id: RoomId::from(row.chambre_id),
                stay,
            },
        ))
    }
}

#[derive(FromRow)]
struct DetailsRow {
    #[sqlx(flatten)]
    reservation: ReservationRow,
    room_number: String,
    client_name: String,
    client_email: String,
}

impl TryFrom<DetailsRow> for ReservationDetails {
    type Error = DataAccessError;

    fn try_from(row: DetailsRow) -> Result<Self, Self::Error> {
        Ok(ReservationDetails {
            reservation: Reservation::try_from(row.reservation)?,
            room_number: row.room_number,
            client_name: row.client_name,
            client_email: row.client_email,
        })
    }
}

/// Locks the room row for the rest of the transaction, so that bookings of
/// one room are serialized.
async fn lock_room(conn: &mut MySqlConnection, room: RoomId) -> Result<bool, DataAccessError> {
    let row: Option<(u64,)> = sqlx::query_as("SELECT id FROM chambres WHERE id = ? FOR UPDATE")
        .bind(*room)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

async fn client_exists(conn: &mut MySqlConnection, client: ClientId) -> Result<bool, DataAccessError> {
    let row: Option<(u64,)> = sqlx::query_as("SELECT id FROM clients WHERE id = ?")
        .bind(*client)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Counts reservations of `room` sharing at least one night with `stay`.
async fn conflicts(
    conn: &mut MySqlConnection,
    room: RoomId,
    stay: &Stay,
    exclude: Option<ReservationId>,
) -> Result<i64, DataAccessError> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations \
        WHERE chambre_id = ? AND date_arrivee < ? AND ? < date_depart \
        AND (? IS NULL OR id <> ?)",
    )
    .bind(*room)
    .bind(stay.departure())
    .bind(stay.arrival())
    .bind(exclude.map(|id| *id))
    .bind(exclude.map(|id| *id))
    .fetch_one(conn)
    .await?;
    Ok(count)
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn find_all(&self) -> Result<Vec<ReservationDetails>, DataAccessError> {
        self.details(None, "c.numero, cl.nom, r.date_arrivee").await
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError> {
        sqlx::query_as::<_, ReservationRow>(
            "SELECT id, client_id, chambre_id, date_arrivee, date_depart \
            FROM reservations WHERE id = ?",
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await?
        .map(Reservation::try_from)
        .transpose()
    }

    async fn find_by_room(&self, room: RoomId) -> Result<Vec<ReservationDetails>, DataAccessError> {
        self.details(Some(("r.chambre_id", *room)), "r.date_arrivee DESC")
            .await
    }

    async fn find_by_client(
        &self,
        client: ClientId,
    ) -> Result<Vec<ReservationDetails>, DataAccessError> {
        self.details(Some(("r.client_id", *client)), "r.date_arrivee DESC")
            .await
    }

    async fn count_by_room(&self, room: RoomId) -> Result<u64, DataAccessError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE chambre_id = ?")
            .bind(*room)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unsigned_abs())
    }

    async fn count_by_client(&self, client: ClientId) -> Result<u64, DataAccessError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE client_id = ?")
            .bind(*client)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unsigned_abs())
    }

    async fn book(&self, draft: &ReservationDraft) -> Result<BookingOutcome, DataAccessError> {
        let mut tx = self.pool.begin().await?;
        if !lock_room(&mut tx, draft.room_id).await? {
            return Ok(BookingOutcome::RoomNotFound);
        }
        if !client_exists(&mut tx, draft.client_id).await? {
            return Ok(BookingOutcome::ClientNotFound);
        }
        if conflicts(&mut tx, draft.room_id, &draft.stay, None).await? > 0 {
            debug!("room {} is taken over {:?}", draft.room_id, draft.stay);
            return Ok(BookingOutcome::Unavailable);
        }
        let id = sqlx::query(
            "INSERT INTO reservations (client_id, chambre_id, date_arrivee, date_depart) \
            VALUES (?, ?, ?, ?)",
        )
        .bind(*draft.client_id)
        .bind(*draft.room_id)
        .bind(draft.stay.arrival())
        .bind(draft.stay.departure())
        .execute(&mut *tx)
        .await?
        .last_insert_id();
        tx.commit().await?;
        Ok(BookingOutcome::Booked(Reservation::new(
            ReservationId::from(id),
            draft.clone(),
        )))
    }

    async fn rebook(
        &self,
        id: ReservationId,
        draft: &ReservationDraft,
    ) -> Result<BookingOutcome, DataAccessError> {
        let mut tx = self.pool.begin().await?;
        if !lock_room(&mut tx, draft.room_id).await? {
            return Ok(BookingOutcome::RoomNotFound);
        }
        let existing: Option<(u64,)> =
            sqlx::query_as("SELECT id FROM reservations WHERE id = ? FOR UPDATE")
                .bind(*id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_none() {
            return Ok(BookingOutcome::ReservationNotFound);
        }
        if !client_exists(&mut tx, draft.client_id).await? {
            return Ok(BookingOutcome::ClientNotFound);
        }
        if conflicts(&mut tx, draft.room_id, &draft.stay, Some(id)).await? > 0 {
            debug!("room {} is taken over {:?}", draft.room_id, draft.stay);
            return Ok(BookingOutcome::Unavailable);
        }
        sqlx::query(
            "UPDATE reservations SET client_id = ?, chambre_id = ?, date_arrivee = ?, \
            date_depart = ? WHERE id = ?",
        )
        .bind(*draft.client_id)
        .bind(*draft.room_id)
        .bind(draft.stay.arrival())
        .bind(draft.stay.departure())
        .bind(*id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(BookingOutcome::Booked(Reservation::new(id, draft.clone())))
    }

    async fn delete(&self, id: ReservationId) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(*id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
