use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySqlPool};

use crate::domain::{
    core::{Employee, EmployeeDraft, EmployeeId, EmployeeRepository},
    DataAccessError,
};

const SELECT_EMPLOYEE: &str =
    "SELECT id, nom, age, date_recrutement, autorisation FROM employes";

#[derive(Clone)]
pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EmployeeRow {
    id: u64,
    nom: String,
    age: u32,
    date_recrutement: NaiveDate,
    autorisation: bool,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee::new(
            EmployeeId::from(row.id),
            EmployeeDraft {
                name: row.nom,
                age: row.age,
                hired_on: row.date_recrutement,
                authorized: row.autorisation,
            },
        )
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, DataAccessError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_EMPLOYEE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DataAccessError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_EMPLOYEE} WHERE id = ?"))
            .bind(*id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, DataAccessError> {
        let id = sqlx::query(
            "INSERT INTO employes (nom, age, date_recrutement, autorisation) VALUES (?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(draft.age)
        .bind(draft.hired_on)
        .bind(draft.authorized)
        .execute(&self.pool)
        .await?
        .last_insert_id();
        Ok(Employee::new(EmployeeId::from(id), draft.clone()))
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, DataAccessError> {
        sqlx::query(
            "UPDATE employes SET nom = ?, age = ?, date_recrutement = ?, autorisation = ? \
            WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(draft.age)
        .bind(draft.hired_on)
        .bind(draft.authorized)
        .bind(*id)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id).await
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM employes WHERE id = ?")
            .bind(*id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
