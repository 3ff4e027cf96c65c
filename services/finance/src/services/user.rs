//! Registration and authentication

use common::error::DatabaseError;
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewUser, Registration, User};
use crate::password::{hash_password, verify_password};
use crate::repositories::UserRepository;
use crate::validation::{validate_email, validate_name};

pub const USER_NOT_FOUND: &str = "Usuário não encontrado.";
pub const INVALID_PASSWORD: &str = "Senha inválida.";
pub const EMAIL_ALREADY_REGISTERED: &str = "Já existe um usuário cadastrado com este email.";

/// User service
#[derive(Clone)]
pub struct UserService<R> {
    repository: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Look up the user by email and check the password against its hash.
    ///
    /// Unknown email and wrong password are both `Authentication` errors and
    /// differ only in message.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<User> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            warn!("Authentication failed, unknown email: {}", email);
            return Err(ServiceError::Authentication(USER_NOT_FOUND.to_string()));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Authentication failed, wrong password for user: {}", user.id);
            return Err(ServiceError::Authentication(INVALID_PASSWORD.to_string()));
        }

        info!("User authenticated: {}", user.id);
        Ok(user)
    }

    /// Register a new user, storing a salted hash of the password
    pub async fn register(&self, registration: Registration) -> ServiceResult<User> {
        validate_name(&registration.name).map_err(ServiceError::business)?;
        validate_email(&registration.email).map_err(ServiceError::business)?;
        self.validate_email(&registration.email).await?;

        let new_user = NewUser {
            name: registration.name,
            email: registration.email,
            password_hash: hash_password(&registration.password)?,
        };

        // a concurrent registration can still win the race to the unique index
        let user = self
            .repository
            .save(&new_user)
            .await
            .map_err(|e| match e {
                DatabaseError::Conflict(_) => ServiceError::business(EMAIL_ALREADY_REGISTERED),
                other => other.into(),
            })?;

        info!("User registered: {}", user.id);
        Ok(user)
    }

    /// Fail when a user with this email already exists
    pub async fn validate_email(&self, email: &str) -> ServiceResult<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(ServiceError::business(EMAIL_ALREADY_REGISTERED));
        }

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.repository.find_by_email(email).await?)
    }
}
