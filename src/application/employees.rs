use std::sync::Arc;

use tracing::info;

use crate::domain::{
    core::{Employee, EmployeeForm, EmployeeId, EmployeeRepository},
    Entity,
};

use super::ServiceError;

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.find_all().await?)
    }

    pub async fn get(&self, id: EmployeeId) -> Result<Employee, ServiceError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found::<Employee>(id))
    }

    pub async fn create(&self, form: &EmployeeForm) -> Result<Employee, ServiceError> {
        let draft = form.validate()?;
        let employee = self.employees.insert(&draft).await?;
        info!("created employee {}", employee.id());
        Ok(employee)
    }

    pub async fn update(
        &self,
        id: EmployeeId,
        form: &EmployeeForm,
    ) -> Result<Employee, ServiceError> {
        let draft = form.validate()?;
        let employee = self
            .employees
            .update(id, &draft)
            .await?
            .ok_or_else(|| ServiceError::not_found::<Employee>(id))?;
        info!("updated employee {}", id);
        Ok(employee)
    }

    pub async fn delete(&self, id: EmployeeId) -> Result<(), ServiceError> {
        if !self.employees.delete(id).await? {
            return Err(ServiceError::not_found::<Employee>(id));
        }
        info!("deleted employee {}", id);
        Ok(())
    }
}
