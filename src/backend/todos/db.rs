/**
 * Todo Database Operations
 *
 * All queries against the `todos` table. Tags are a JSON array column;
 * list filtering uses SQLite's `json_each` for the tag match.
 *
 * Search runs against `title_folded` and `description_folded`, lowercased
 * copies written on every insert and update. SQLite's own `LOWER()` leaves
 * non-ASCII letters alone, so folding happens here with full Unicode rules.
 *
 * Every list/count query is scoped to one user. Nothing here checks
 * ownership for single-record operations; that lives in `todos::access`.
 */

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::Todo;

const COLUMNS: &str =
    "id, user_id, title, description, completed, tags, image_path, file_path, created_at, updated_at";

/// A row of the `todos` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub tags: Json<Vec<String>>,
    pub image_path: Option<String>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            tags: row.tags.0,
            image_path: row.image_path,
            file_path: row.file_path,
            user: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Values for a new row
#[derive(Debug, Clone)]
pub struct InsertTodo {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub tags: Vec<String>,
    pub image_path: Option<String>,
    pub file_path: Option<String>,
}

/// Filter for one page of a user's todos
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub user_id: Uuid,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    /// Exact tag
    pub tag: Option<String>,
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Lowercase form stored in the search columns and used for search terms
fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ListFilter) {
    builder.push(" WHERE user_id = ").push_bind(filter.user_id);

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(&fold(search)));
        builder
            .push(" AND (title_folded LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR description_folded LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }

    if let Some(tag) = &filter.tag {
        builder
            .push(" AND EXISTS (SELECT 1 FROM json_each(todos.tags) WHERE json_each.value = ")
            .push_bind(tag.clone())
            .push(")");
    }
}

/// One page of a user's todos, newest first
pub async fn list_todos(
    pool: &SqlitePool,
    filter: &ListFilter,
    limit: u32,
    offset: u64,
) -> Result<Vec<TodoRow>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM todos"));
    push_filter(&mut builder, filter);
    builder
        .push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
        .push_bind(i64::from(limit))
        .push(" OFFSET ")
        .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

    builder.build_query_as::<TodoRow>().fetch_all(pool).await
}

/// Number of todos matching the filter
pub async fn count_todos(pool: &SqlitePool, filter: &ListFilter) -> Result<u64, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM todos");
    push_filter(&mut builder, filter);

    let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;
    Ok(u64::try_from(count).unwrap_or_default())
}

pub async fn get_todo(pool: &SqlitePool, id: Uuid) -> Result<Option<TodoRow>, sqlx::Error> {
    sqlx::query_as::<_, TodoRow>(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_todo(pool: &SqlitePool, todo: InsertTodo) -> Result<TodoRow, sqlx::Error> {
    let now = Utc::now();
    let title_folded = fold(&todo.title);
    let description_folded = fold(todo.description.as_deref().unwrap_or_default());

    sqlx::query_as::<_, TodoRow>(&format!(
        r#"
        INSERT INTO todos (id, user_id, title, description, completed, tags, image_path, file_path, created_at, updated_at, title_folded, description_folded)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(todo.user_id)
    .bind(todo.title)
    .bind(todo.description)
    .bind(todo.completed)
    .bind(Json(todo.tags))
    .bind(todo.image_path)
    .bind(todo.file_path)
    .bind(now)
    .bind(now)
    .bind(title_folded)
    .bind(description_folded)
    .fetch_one(pool)
    .await
}

/// Write every mutable column of `row` back, bumping `updated_at`. The owner
/// and creation time are never touched.
pub async fn update_todo(pool: &SqlitePool, row: &TodoRow) -> Result<Option<TodoRow>, sqlx::Error> {
    sqlx::query_as::<_, TodoRow>(&format!(
        r#"
        UPDATE todos
        SET title = ?, description = ?, completed = ?, tags = ?, image_path = ?, file_path = ?, updated_at = ?,
            title_folded = ?, description_folded = ?
        WHERE id = ?
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&row.title)
    .bind(&row.description)
    .bind(row.completed)
    .bind(&row.tags)
    .bind(&row.image_path)
    .bind(&row.file_path)
    .bind(Utc::now())
    .bind(fold(&row.title))
    .bind(fold(row.description.as_deref().unwrap_or_default()))
    .bind(row.id)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was deleted
pub async fn delete_todo(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
