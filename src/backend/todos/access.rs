//! Ownership checks.
//!
//! Every single-todo operation (read, update, delete) goes through
//! `load_owned`, and `load_owned` goes through `authorize`. There is no other
//! path to a todo by id.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::types::{NOT_OWNER, TODO_NOT_FOUND};
use crate::backend::error::BackendError;
use crate::backend::todos::db::{get_todo, TodoRow};

/// The requester may act on the todo only if they own it
pub fn authorize(todo: &TodoRow, requester: Uuid) -> Result<(), BackendError> {
    if todo.user_id == requester {
        Ok(())
    } else {
        Err(BackendError::forbidden(NOT_OWNER))
    }
}

/// Load a todo by its path id for `requester`.
///
/// Missing and malformed ids are both `NotFound`; an existing todo owned by
/// someone else is `Forbidden`.
pub async fn load_owned(
    pool: &SqlitePool,
    raw_id: &str,
    requester: Uuid,
) -> Result<TodoRow, BackendError> {
    let Ok(id) = Uuid::parse_str(raw_id) else {
        return Err(BackendError::not_found(TODO_NOT_FOUND));
    };

    let todo = get_todo(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(TODO_NOT_FOUND))?;

    authorize(&todo, requester).inspect_err(|_| {
        tracing::warn!(todo_id = %id, %requester, "Rejected access to another user's todo");
    })?;

    Ok(todo)
}
