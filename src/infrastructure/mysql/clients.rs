use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};

use crate::domain::{
    core::{Client, ClientDraft, ClientId, ClientRepository},
    DataAccessError,
};

const SELECT_CLIENT: &str =
    "SELECT id, nom, email, telephone, nombre_personnes FROM clients";

#[derive(Clone)]
pub struct MySqlClientRepository {
    pool: MySqlPool,
}

impl MySqlClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ClientRow {
    id: u64,
    nom: String,
    email: String,
    telephone: Option<String>,
    nombre_personnes: u32,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client::new(
            ClientId::from(row.id),
            ClientDraft {
                name: row.nom,
                email: row.email,
                phone: row.telephone,
                party_size: row.nombre_personnes,
            },
        )
    }
}

#[async_trait]
impl ClientRepository for MySqlClientRepository {
    async fn find_all(&self) -> Result<Vec<Client>, DataAccessError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!("{SELECT_CLIENT} ORDER BY nom, id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DataAccessError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!("{SELECT_CLIENT} WHERE id = ?"))
            .bind(*id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Client::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DataAccessError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!("{SELECT_CLIENT} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Client::from))
    }

    async fn insert(&self, draft: &ClientDraft) -> Result<Client, DataAccessError> {
        let id = sqlx::query(
            "INSERT INTO clients (nom, email, telephone, nombre_personnes) VALUES (?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.party_size)
        .execute(&self.pool)
        .await?
        .last_insert_id();
        Ok(Client::new(ClientId::from(id), draft.clone()))
    }

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
    ) -> Result<Option<Client>, DataAccessError> {
        sqlx::query(
            "UPDATE clients SET nom = ?, email = ?, telephone = ?, nombre_personnes = ? \
            WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.party_size)
        .bind(*id)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id).await
    }

    async fn delete(&self, id: ClientId) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(*id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
