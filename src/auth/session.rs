//! Session store operations over the `sessions` table.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::session;

/// How long a freshly created session stays valid.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Create a session record for `username` and return it.
pub async fn create_session(
    db: &DatabaseConnection,
    username: &str,
) -> Result<session::Model, AppError> {
    let now = Utc::now().naive_utc();

    let model = session::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(username.to_string()),
        expires_at: Set(now + Duration::hours(SESSION_TTL_HOURS)),
        created_at: Set(now),
    };

    Ok(model.insert(db).await?)
}

/// Load a session by id. Absent or expired records both read as `None`.
pub async fn load_session(
    db: &DatabaseConnection,
    session_id: &str,
) -> Result<Option<session::Model>, AppError> {
    let Some(record) = session::Entity::find_by_id(session_id.to_string())
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    if record.expires_at < Utc::now().naive_utc() {
        return Ok(None);
    }

    Ok(Some(record))
}

/// Destroy a session (logout). Destroying a missing session is not an error.
pub async fn destroy_session(db: &DatabaseConnection, session_id: &str) -> Result<(), AppError> {
    session::Entity::delete_by_id(session_id.to_string())
        .exec(db)
        .await?;
    Ok(())
}

/// Delete every expired session record; returns how many were removed.
pub async fn purge_expired(db: &DatabaseConnection) -> Result<u64, AppError> {
    let result = session::Entity::delete_many()
        .filter(session::Column::ExpiresAt.lt(Utc::now().naive_utc()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
