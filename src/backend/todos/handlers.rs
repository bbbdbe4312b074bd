/**
 * Todo Handlers
 *
 * HTTP handlers for `/api/todos`. Every handler sits behind the auth gate and
 * receives the requester through `AuthUser`.
 *
 * # Attachment Ordering
 *
 * Create and update store incoming files first, then write the record, then
 * remove whatever the record no longer references. If the record write fails
 * the freshly stored files are removed again. A crash between the record
 * write and the removal can leave an orphan file behind, never a dangling
 * reference.
 */

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::types::Json as SqlJson;

use crate::backend::error::types::TODO_NOT_FOUND;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::todos::access::load_owned;
use crate::backend::todos::db::{self, InsertTodo, ListFilter};
use crate::backend::todos::form::TodoSubmission;
use crate::backend::todos::query::ListQuery;
use crate::backend::uploads::{IncomingFile, UploadStore};
use crate::shared::{DeletedTodo, Pagination, Todo, TodoPage};

/// Stored names of files written for the current request
#[derive(Debug, Default)]
struct StoredAttachments {
    image: Option<String>,
    file: Option<String>,
}

impl StoredAttachments {
    async fn store(
        uploads: &UploadStore,
        image: Option<IncomingFile>,
        file: Option<IncomingFile>,
    ) -> Result<Self, BackendError> {
        let mut stored = Self::default();

        if let Some(image) = image {
            stored.image = Some(uploads.store(&image).await?);
        }
        if let Some(file) = file {
            match uploads.store(&file).await {
                Ok(name) => stored.file = Some(name),
                Err(e) => {
                    stored.discard(uploads).await;
                    return Err(e);
                }
            }
        }

        Ok(stored)
    }

    async fn discard(self, uploads: &UploadStore) {
        uploads.discard(self.image.as_deref()).await;
        uploads.discard(self.file.as_deref()).await;
    }
}

/// GET /api/todos
///
/// Query: `page`, `limit`, `search`, `tag`. Always scoped to the requester.
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<TodoPage>, BackendError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let (page, limit) = (query.page(), query.limit());

    let filter = ListFilter {
        user_id: user.user_id,
        search: query.search(),
        tag: query.tag(),
    };

    let total_count = db::count_todos(&state.db_pool, &filter).await?;
    let rows = db::list_todos(&state.db_pool, &filter, limit, query.offset()).await?;

    Ok(Json(TodoPage {
        todos: rows.into_iter().map(Todo::from).collect(),
        pagination: Pagination::new(page, limit, total_count),
    }))
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    TodoSubmission(form): TodoSubmission,
) -> Result<(StatusCode, Json<Todo>), BackendError> {
    let new = form.into_new().inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected todo");
    })?;

    let stored = StoredAttachments::store(&state.uploads, new.image, new.file).await?;

    let insert = InsertTodo {
        user_id: user.user_id,
        title: new.title,
        description: new.description,
        completed: new.completed,
        tags: new.tags,
        image_path: stored.image.clone(),
        file_path: stored.file.clone(),
    };

    let row = match db::insert_todo(&state.db_pool, insert).await {
        Ok(row) => row,
        Err(e) => {
            stored.discard(&state.uploads).await;
            return Err(e.into());
        }
    };

    tracing::info!(todo_id = %row.id, user_id = %user.user_id, "Todo created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Todo>, BackendError> {
    let row = load_owned(&state.db_pool, &id, user.user_id).await?;
    Ok(Json(row.into()))
}

/// PUT /api/todos/{id}
///
/// Partial update. Ownership is checked before the body is looked at, so a
/// foreign todo is `403` whatever the payload.
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    submission: Result<TodoSubmission, BackendError>,
) -> Result<Json<Todo>, BackendError> {
    let mut row = load_owned(&state.db_pool, &id, user.user_id).await?;

    let TodoSubmission(form) = submission?;
    let changes = form.into_changes().inspect_err(|e| {
        tracing::warn!(error = %e, todo_id = %row.id, "Rejected todo update");
    })?;

    if let Some(title) = changes.title {
        row.title = title;
    }
    if let Some(description) = changes.description {
        row.description = description;
    }
    if let Some(completed) = changes.completed {
        row.completed = completed;
    }
    if let Some(tags) = changes.tags {
        row.tags = SqlJson(tags);
    }

    let stored = StoredAttachments::store(&state.uploads, changes.image, changes.file).await?;
    let mut replaced = StoredAttachments::default();
    if let Some(image) = &stored.image {
        replaced.image = row.image_path.replace(image.clone());
    }
    if let Some(file) = &stored.file {
        replaced.file = row.file_path.replace(file.clone());
    }

    let updated = match db::update_todo(&state.db_pool, &row).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            stored.discard(&state.uploads).await;
            return Err(BackendError::not_found(TODO_NOT_FOUND));
        }
        Err(e) => {
            stored.discard(&state.uploads).await;
            return Err(e.into());
        }
    };

    replaced.discard(&state.uploads).await;

    tracing::info!(todo_id = %updated.id, "Todo updated");
    Ok(Json(updated.into()))
}

/// DELETE /api/todos/{id}
///
/// Removes the record, then its image and file.
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedTodo>, BackendError> {
    let row = load_owned(&state.db_pool, &id, user.user_id).await?;

    if !db::delete_todo(&state.db_pool, row.id).await? {
        return Err(BackendError::not_found(TODO_NOT_FOUND));
    }

    StoredAttachments {
        image: row.image_path,
        file: row.file_path,
    }
    .discard(&state.uploads)
    .await;

    tracing::info!(todo_id = %row.id, "Todo deleted");
    Ok(Json(DeletedTodo { id: row.id }))
}
