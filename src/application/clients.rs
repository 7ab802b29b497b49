use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    core::{
        Client, ClientError, ClientForm, ClientId, ClientRepository, ReservationDetails,
        ReservationRepository,
    },
    DataAccessError, Entity,
};

use super::{duplicate_or, ServiceError};

#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl ClientService {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            clients,
            reservations,
        }
    }

    pub async fn list(&self) -> Result<Vec<Client>, ServiceError> {
        Ok(self.clients.find_all().await?)
    }

    pub async fn get(&self, id: ClientId) -> Result<Client, ServiceError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found::<Client>(id))
    }

    /// Whether another client than `except` already uses `email`.
    pub async fn email_taken(
        &self,
        email: &str,
        except: Option<ClientId>,
    ) -> Result<bool, ServiceError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .clients
            .find_by_email(&email)
            .await?
            .is_some_and(|client| Some(client.id()) != except))
    }

    pub async fn create(&self, form: &ClientForm) -> Result<Client, ServiceError> {
        let draft = form.validate()?;
        if self.email_taken(&draft.email, None).await? {
            warn!("client email {} already exists", draft.email);
            return Err(ServiceError::Duplicate(ClientError::DuplicateEmail.to_string()));
        }
        let client = self
            .clients
            .insert(&draft)
            .await
            .map_err(|e| duplicate_or(e, ClientError::DuplicateEmail))?;
        info!("created client {}", client.id());
        Ok(client)
    }

    pub async fn update(&self, id: ClientId, form: &ClientForm) -> Result<Client, ServiceError> {
        let draft = form.validate()?;
        if self.email_taken(&draft.email, Some(id)).await? {
            warn!("client email {} already used by another client", draft.email);
            return Err(ServiceError::Duplicate(ClientError::DuplicateEmail.to_string()));
        }
        let client = self
            .clients
            .update(id, &draft)
            .await
            .map_err(|e| duplicate_or(e, ClientError::DuplicateEmail))?
            .ok_or_else(|| ServiceError::not_found::<Client>(id))?;
        info!("updated client {}", id);
        Ok(client)
    }

    /// Deletes a client that no reservation references.
    pub async fn delete(&self, id: ClientId) -> Result<(), ServiceError> {
        self.get(id).await?;
        let reservations = self.reservations.count_by_client(id).await?;
        if reservations > 0 {
            warn!("client {} still has {} reservation(s)", id, reservations);
            return Err(ServiceError::ReferentialIntegrity {
                entity: Client::ENTITY_NAME,
                id: *id,
                reservations,
            });
        }
        match self.clients.delete(id).await {
            Ok(true) => {
                info!("deleted client {}", id);
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found::<Client>(id)),
            Err(DataAccessError::ForeignKeyViolation(_)) => Err(ServiceError::ReferentialIntegrity {
                entity: Client::ENTITY_NAME,
                id: *id,
                reservations: self.reservations.count_by_client(id).await?,
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn reservations(
        &self,
        id: ClientId,
    ) -> Result<Vec<ReservationDetails>, ServiceError> {
        Ok(self.reservations.find_by_client(id).await?)
    }
}
