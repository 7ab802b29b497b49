use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use crate::domain::{
    core::{Price, Room, RoomDraft, RoomId, RoomRepository, Stay},
    DataAccessError,
};

const SELECT_ROOM: &str = "SELECT id, numero, capacite, type AS kind, \
    CAST(ROUND(prix * 100) AS SIGNED) AS price_cents, disponible FROM chambres";

#[derive(Clone)]
pub struct MySqlRoomRepository {
    pool: MySqlPool,
}

impl MySqlRoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RoomRow {
    id: u64,
    numero: String,
    capacite: u32,
    kind: Option<String>,
    price_cents: Option<i64>,
    disponible: bool,
}

impl TryFrom<RoomRow> for Room {
    type Error = DataAccessError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let price = row
            .price_cents
            .map(|cents| {
                u64::try_from(cents)
                    .map_err(|e| DataAccessError::ReadError(Box::new(e)))
                    .and_then(|cents| {
                        Price::from_cents(cents).map_err(|e| DataAccessError::ReadError(Box::new(e)))
                    })
            })
            .transpose()?;
        Ok(Room::new(
            RoomId::from(row.id),
            RoomDraft {
                number: row.numero,
                capacity: row.capacite,
                kind: row.kind,
                price,
                available: row.disponible,
            },
        ))
    }
}

fn into_rooms(rows: Vec<RoomRow>) -> Result<Vec<Room>, DataAccessError> {
    rows.into_iter().map(Room::try_from).collect()
}

#[async_trait]
impl RoomRepository for MySqlRoomRepository {
    async fn find_all(&self) -> Result<Vec<Room>, DataAccessError> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!("{SELECT_ROOM} ORDER BY numero"))
            .fetch_all(&self.pool)
            .await?;
        into_rooms(rows)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DataAccessError> {
        sqlx::query_as::<_, RoomRow>(&format!("{SELECT_ROOM} WHERE id = ?"))
            .bind(*id)
            .fetch_optional(&self.pool)
            .await?
            .map(Room::try_from)
            .transpose()
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Room>, DataAccessError> {
        sqlx::query_as::<_, RoomRow>(&format!("{SELECT_ROOM} WHERE numero = ?"))
            .bind(number)
            .fetch_optional(&self.pool)
            .await?
            .map(Room::try_from)
            .transpose()
    }

    async fn find_available(
        &self,
        stay: &Stay,
        min_capacity: Option<u32>,
    ) -> Result<Vec<Room>, DataAccessError> {
        debug!("searching rooms free over {:?}", stay);
        let sql = format!(
            "{SELECT_ROOM} c WHERE (? IS NULL OR c.capacite >= ?) AND NOT EXISTS (\
                SELECT 1 FROM reservations r WHERE r.chambre_id = c.id \
                AND r.date_arrivee < ? AND ? < r.date_depart) \
            ORDER BY c.numero"
        );
        let rows = sqlx::query_as::<_, RoomRow>(&sql)
            .bind(min_capacity)
            .bind(min_capacity)
            .bind(stay.departure())
            .bind(stay.arrival())
            .fetch_all(&self.pool)
            .await?;
        into_rooms(rows)
    }

    async fn insert(&self, draft: &RoomDraft) -> Result<Room, DataAccessError> {
        let id = sqlx::query(
            "INSERT INTO chambres (numero, capacite, type, prix, disponible) \
            VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.number)
        .bind(draft.capacity)
        .bind(&draft.kind)
        .bind(draft.price.map(|p| p.to_decimal_string()))
        .bind(draft.available)
        .execute(&self.pool)
        .await?
        .last_insert_id();
        Ok(Room::new(RoomId::from(id), draft.clone()))
    }

    async fn update(&self, id: RoomId, draft: &RoomDraft) -> Result<Option<Room>, DataAccessError> {
        sqlx::query(
            "UPDATE chambres SET numero = ?, capacite = ?, type = ?, prix = ?, disponible = ? \
            WHERE id = ?",
        )
        .bind(&draft.number)
        .bind(draft.capacity)
        .bind(&draft.kind)
        .bind(draft.price.map(|p| p.to_decimal_string()))
        .bind(draft.available)
        .bind(*id)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id).await
    }

    async fn delete(&self, id: RoomId) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM chambres WHERE id = ?")
            .bind(*id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
