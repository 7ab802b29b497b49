use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validation::{self, ValidationErrors},
    DataAccessError, Entity, Id,
};

pub const EMPLOYEE_NAME_MAX_LEN: usize = 100;
pub const EMPLOYEE_MIN_AGE: u32 = 16;
pub const EMPLOYEE_MAX_AGE: u32 = 100;

/// Employee repository
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees ordered by id
    async fn find_all(&self) -> Result<Vec<Employee>, DataAccessError>;
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DataAccessError>;
    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, DataAccessError>;
    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, DataAccessError>;
    async fn delete(&self, id: EmployeeId) -> Result<bool, DataAccessError>;
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
pub struct EmployeeId(u64);

impl Id for EmployeeId {
    type Inner = u64;
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    age: u32,
    hired_on: NaiveDate,
    authorized: bool,
}

impl Employee {
    pub fn new(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            hired_on: draft.hired_on,
            authorized: draft.authorized,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn hired_on(&self) -> NaiveDate {
        self.hired_on
    }

    pub fn authorized(&self) -> bool {
        self.authorized
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    const ENTITY_NAME: &'static str = "employé";

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub age: u32,
    pub hired_on: NaiveDate,
    pub authorized: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(rename = "date_recrutement", default)]
    pub hired_on: String,
    #[serde(rename = "autorisation", default)]
    pub authorized: Option<String>,
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<EmployeeDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim().to_owned();
        if name.is_empty() {
            errors.push(EmployeeError::NameRequired);
        } else if name.chars().count() > EMPLOYEE_NAME_MAX_LEN {
            errors.push(EmployeeError::NameTooLong);
        }
        let age = validation::integer_in(&self.age, EMPLOYEE_MIN_AGE, EMPLOYEE_MAX_AGE);
        if age.is_none() {
            errors.push(EmployeeError::InvalidAge);
        }
        let hired_on = validation::iso_date(&self.hired_on);
        if hired_on.is_none() {
            errors.push(EmployeeError::InvalidHireDate);
        }

        match (age, hired_on) {
            (Some(age), Some(hired_on)) if errors.is_empty() => Ok(EmployeeDraft {
                name,
                age,
                hired_on,
                authorized: validation::checkbox(&self.authorized),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            age: employee.age.to_string(),
            hired_on: employee.hired_on.format("%Y-%m-%d").to_string(),
            authorized: employee.authorized.then(|| "on".to_owned()),
        }
    }
}

/// Employee validation messages
#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum EmployeeError {
    #[display(fmt = "Le nom est requis")]
    NameRequired,
    #[display(fmt = "Le nom ne doit pas dépasser 100 caractères")]
    NameTooLong,
    #[display(fmt = "L'âge doit être un nombre entre 16 et 100")]
    InvalidAge,
    #[display(fmt = "La date de recrutement doit être une date valide (AAAA-MM-JJ)")]
    InvalidHireDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_employee() {
        let draft = EmployeeForm {
            name: "Martin".to_owned(),
            age: "34".to_owned(),
            hired_on: "2021-09-01".to_owned(),
            authorized: Some("on".to_owned()),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.age, 34);
        assert_eq!(draft.hired_on, NaiveDate::from_ymd_opt(2021, 9, 1).unwrap());
        assert!(draft.authorized);
    }

    #[test]
    fn test_name_length_is_limited() {
        let form = |name: String| EmployeeForm {
            name,
            age: "30".to_owned(),
            hired_on: "2022-01-10".to_owned(),
            authorized: None,
        };
        assert!(form("é".repeat(EMPLOYEE_NAME_MAX_LEN)).validate().is_ok());
        let errors = form("é".repeat(EMPLOYEE_NAME_MAX_LEN + 1))
            .validate()
            .unwrap_err();
        assert_eq!(errors.messages(), [EmployeeError::NameTooLong.to_string()]);
    }

    #[test]
    fn test_invalid_employee() {
        let errors = EmployeeForm {
            name: " ".to_owned(),
            age: "12".to_owned(),
            hired_on: "hier".to_owned(),
            authorized: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                EmployeeError::NameRequired.to_string(),
                EmployeeError::InvalidAge.to_string(),
                EmployeeError::InvalidHireDate.to_string(),
            ]
        );
    }
}
