use std::sync::Arc;

use tracing::info;

use super::policy::{require_admin, require_self};
use crate::auth::{hash_password, Identity, TokenService};
use crate::db::{
    CreateUserRequest, LoginRequest, RoleId, UpdateUserRequest, UpsertUser, UserResponse,
};
use crate::error::{AppError, AppResult};
use crate::repository::UserRepository;

/// Account registration, self-service profile management and login
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn add_user(&self, req: CreateUserRequest) -> AppResult<UserResponse> {
        let password_hash = hash(&req.password)?;
        let user = self
            .repo
            .save(UpsertUser {
                id: None,
                email: req.email,
                password_hash,
                role_id: RoleId::or_default(req.role_id),
            })
            .await?;

        info!(user_id = user.id, role_id = %user.role_id, "User registered");
        Ok(user.into())
    }

    pub async fn list_users(&self, identity: &Identity) -> AppResult<Vec<UserResponse>> {
        require_admin(identity)?;
        self.repo.find_all().await
    }

    pub async fn get_user(&self, identity: &Identity, id: i64) -> AppResult<UserResponse> {
        require_self(identity, id)?;
        Ok(self.repo.find_by_id(id).await?.into())
    }

    /// Merge the non-empty fields of `req` into the stored user
    pub async fn update_user(
        &self,
        identity: &Identity,
        id: i64,
        req: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        require_self(identity, id)?;

        let mut user = self.repo.find_by_id(id).await?;
        if let Some(email) = req.email.filter(|e| !e.is_empty()) {
            user.email = email;
        }
        if let Some(password) = req.password.filter(|p| !p.is_empty()) {
            user.password_hash = hash(&password)?;
        }

        let saved = self.repo.save(user.into()).await?;
        info!(user_id = saved.id, "User updated");
        Ok(saved.into())
    }

    pub async fn delete_user(&self, identity: &Identity, id: i64) -> AppResult<()> {
        require_self(identity, id)?;
        self.repo.delete_by_id(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, req: LoginRequest) -> AppResult<String> {
        let user = self.repo.verify(&req.email, &req.password).await?;
        let token = self.tokens.issue(&user)?;
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}
