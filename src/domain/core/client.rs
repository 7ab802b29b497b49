use async_trait::async_trait;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validation::{self, ValidationErrors},
    DataAccessError, Entity, Id,
};

pub const CLIENT_NAME_MAX_LEN: usize = 100;
pub const CLIENT_EMAIL_MAX_LEN: usize = 255;
pub const PARTY_SIZE_MAX: u32 = 20;

/// Client repository
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// All clients ordered by name
    async fn find_all(&self) -> Result<Vec<Client>, DataAccessError>;
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DataAccessError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DataAccessError>;
    async fn insert(&self, draft: &ClientDraft) -> Result<Client, DataAccessError>;
    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
    ) -> Result<Option<Client>, DataAccessError>;
    async fn delete(&self, id: ClientId) -> Result<bool, DataAccessError>;
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
pub struct ClientId(u64);

impl Id for ClientId {
    type Inner = u64;
}

/// Client entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    email: String,
    phone: Option<String>,
    party_size: u32,
}

impl Client {
    pub fn new(id: ClientId, draft: ClientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            party_size: draft.party_size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }
}

impl Entity for Client {
    type Id = ClientId;

    const ENTITY_NAME: &'static str = "client";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validated client fields. The email is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub party_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientForm {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telephone", default)]
    pub phone: String,
    #[serde(rename = "nombre_personnes", default)]
    pub party_size: String,
}

impl ClientForm {
    pub fn validate(&self) -> Result<ClientDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim().to_owned();
        if name.is_empty() {
            errors.push(ClientError::NameRequired);
        } else if name.chars().count() > CLIENT_NAME_MAX_LEN {
            errors.push(ClientError::NameTooLong);
        }

        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            errors.push(ClientError::EmailRequired);
        } else if email.chars().count() > CLIENT_EMAIL_MAX_LEN {
            errors.push(ClientError::EmailTooLong);
        } else if !validation::is_email(&email) {
            errors.push(ClientError::InvalidEmail);
        }

        let phone = validation::optional_text(&self.phone);
        if phone.as_deref().is_some_and(|p| !validation::is_phone(p)) {
            errors.push(ClientError::InvalidPhone);
        }

        let party_size = validation::integer_in(&self.party_size, 1, PARTY_SIZE_MAX);
        if party_size.is_none() {
            errors.push(ClientError::InvalidPartySize);
        }

        match party_size {
            Some(party_size) if errors.is_empty() => Ok(ClientDraft {
                name,
                email,
                phone,
                party_size,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Client> for ClientForm {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone().unwrap_or_default(),
            party_size: client.party_size.to_string(),
        }
    }
}

/// Client validation messages
#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum ClientError {
    #[display(fmt = "Le nom est requis")]
    NameRequired,
    #[display(fmt = "Le nom ne doit pas dépasser 100 caractères")]
    NameTooLong,
    #[display(fmt = "L'email est requis")]
    EmailRequired,
    #[display(fmt = "L'email n'est pas valide")]
    InvalidEmail,
    #[display(fmt = "L'email ne doit pas dépasser 255 caractères")]
    EmailTooLong,
    #[display(fmt = "Le numéro de téléphone n'est pas valide")]
    InvalidPhone,
    #[display(fmt = "Le nombre de personnes doit être compris entre 1 et 20")]
    InvalidPartySize,
    #[display(fmt = "Un client utilise déjà cet email")]
    DuplicateEmail,
}
