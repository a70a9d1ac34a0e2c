use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::roles::Role;
use crate::database::models::user::User;
use crate::database::StoreError;

/// Account store: registration, credential verification, and role lookup.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, first_name, last_name, password_hash, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// `None` on an unknown username or a wrong password; callers cannot
    /// tell which.
    pub async fn verify_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        let valid = password::verify_password(password, &user.password_hash)
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

        Ok(valid.then_some(user))
    }

    /// Create an account and grant it `role`. The user row and its role
    /// association commit together.
    pub async fn register(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        role: Role,
    ) -> Result<User, StoreError> {
        let password_hash = password::hash_password(password)
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, first_name, last_name, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, username, first_name, last_name, password_hash, created_at",
        )
        .bind(id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return StoreError::DuplicateUsername(username.to_string());
                }
            }
            StoreError::Sqlx(e)
        })?;

        sqlx::query("INSERT INTO user_roles (user_id, role_id) SELECT $1, id FROM roles WHERE name = $2")
            .bind(id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = role.as_str(), "Account registered");
        Ok(user)
    }

    pub async fn roles_of(&self, user_id: Uuid) -> Result<Vec<String>, StoreError> {
        let roles = sqlx::query_scalar::<_, String>(
            "SELECT r.name
             FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }
}
