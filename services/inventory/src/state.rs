use std::sync::Arc;

use sea_orm::DatabaseConnection;

use stockroom_auth_types::session::SessionManager;

use crate::infra::db::{DbAccountRepository, DbMovementRepository, DbProductRepository};
use crate::infra::password::Argon2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn movement_repo(&self) -> DbMovementRepository {
        DbMovementRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }
}
