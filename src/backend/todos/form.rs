/**
 * Todo Request Bodies
 *
 * Create and update accept either `multipart/form-data` (with optional
 * `image` and `file` parts) or a JSON object. Both are normalized once, here,
 * into a `TodoForm`; handlers only ever see `NewTodo` or `TodoChanges`.
 *
 * # Accepted Fields
 *
 * - `title`, `description` - text
 * - `completed` - `true`/`false`, as a JSON bool or a string in any case
 * - `tags` or `tags[]` - one value, a repeated field, or a JSON array
 * - `image` - at most one; jpg, jpeg, png or gif
 * - `file` - at most one; any type
 *
 * A file part with no file name but some bytes is still stored, under a name
 * with no extension. An empty part with no file name is an unselected file
 * input and is treated as absent.
 *
 * Both files are capped at the upload store's per-file limit while the part
 * is streamed, before anything is written to disk.
 */

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request,
    },
    http::header::CONTENT_TYPE,
};
use bytes::{Bytes, BytesMut};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{is_allowed_image, IncomingFile};
use crate::shared::todo::{normalize_tags, parse_completed, validate_title};

pub const IMAGE_TYPES_ONLY: &str = "Images only! (jpg, jpeg, png, gif)";
pub const ONE_IMAGE_ONLY: &str = "Only one image may be uploaded";
pub const ONE_FILE_ONLY: &str = "Only one file may be uploaded";

/// Raw, loosely typed todo input
#[derive(Debug, Default)]
pub struct TodoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<String>,
    /// `Some(vec![])` means tags were sent and are empty, which clears them
    pub tags: Option<Vec<String>>,
    pub image: Option<IncomingFile>,
    pub file: Option<IncomingFile>,
}

/// Validated input for a new todo
#[derive(Debug)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub tags: Vec<String>,
    pub image: Option<IncomingFile>,
    pub file: Option<IncomingFile>,
}

/// Validated partial update. `None` leaves the stored value alone.
#[derive(Debug, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub image: Option<IncomingFile>,
    pub file: Option<IncomingFile>,
}

impl TodoForm {
    /// Validate as a create request. Title first, then the completed flag.
    pub fn into_new(self) -> Result<NewTodo, BackendError> {
        let title = validate_title(self.title.as_deref())?;
        let completed = self
            .completed
            .as_deref()
            .map(parse_completed)
            .transpose()?
            .unwrap_or(false);

        Ok(NewTodo {
            title,
            description: self.description.and_then(non_blank),
            completed,
            tags: self.tags.map(normalize_tags).unwrap_or_default(),
            image: self.image,
            file: self.file,
        })
    }

    /// Validate as an update. Only supplied fields are checked.
    pub fn into_changes(self) -> Result<TodoChanges, BackendError> {
        let title = match self.title {
            Some(raw) => Some(validate_title(Some(&raw))?),
            None => None,
        };
        let completed = self.completed.as_deref().map(parse_completed).transpose()?;

        Ok(TodoChanges {
            title,
            description: self.description.map(non_blank),
            completed,
            tags: self.tags.map(normalize_tags),
            image: self.image,
            file: self.file,
        })
    }

    async fn from_multipart(
        mut multipart: Multipart,
        max_file_bytes: u64,
    ) -> Result<Self, BackendError> {
        let mut form = Self::default();

        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
                "description" => {
                    form.description = Some(field.text().await.map_err(multipart_error)?)
                }
                "completed" => form.completed = Some(field.text().await.map_err(multipart_error)?),
                "tags" | "tags[]" => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.tags.get_or_insert_with(Vec::new).push(value);
                }
                "image" => {
                    let Some(image) = read_file(&mut field, max_file_bytes).await? else {
                        continue;
                    };
                    if form.image.is_some() {
                        return Err(BackendError::invalid_input(ONE_IMAGE_ONLY));
                    }
                    if !is_allowed_image(&image.original_name) {
                        return Err(BackendError::invalid_input(IMAGE_TYPES_ONLY));
                    }
                    form.image = Some(image);
                }
                "file" => {
                    let Some(file) = read_file(&mut field, max_file_bytes).await? else {
                        continue;
                    };
                    if form.file.is_some() {
                        return Err(BackendError::invalid_input(ONE_FILE_ONLY));
                    }
                    form.file = Some(file);
                }
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn multipart_error(error: MultipartError) -> BackendError {
    BackendError::invalid_input(error.body_text())
}

/// Buffer one file part, enforcing the cap chunk by chunk. An empty part with
/// no file name is an unselected file input and reads as absent.
async fn read_file(
    field: &mut Field<'_>,
    max_file_bytes: u64,
) -> Result<Option<IncomingFile>, BackendError> {
    let original_name = field.file_name().unwrap_or_default().to_string();

    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buffer.len() + chunk.len()) as u64 > max_file_bytes {
            return Err(BackendError::invalid_input(format!(
                "File too large, limit is {max_file_bytes} bytes"
            )));
        }
        buffer.extend_from_slice(&chunk);
    }

    if original_name.is_empty() && buffer.is_empty() {
        return Ok(None);
    }

    Ok(Some(IncomingFile {
        original_name,
        bytes: buffer.freeze(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// JSON flavour of the todo body
#[derive(Debug, Default, Deserialize)]
struct JsonTodoBody {
    title: Option<String>,
    description: Option<String>,
    completed: Option<BoolOrString>,
    #[serde(alias = "tags[]")]
    tags: Option<OneOrMany>,
}

impl From<JsonTodoBody> for TodoForm {
    fn from(body: JsonTodoBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            completed: body.completed.map(|value| match value {
                BoolOrString::Bool(flag) => flag.to_string(),
                BoolOrString::Text(text) => text,
            }),
            tags: body.tags.map(|value| match value {
                OneOrMany::One(tag) => vec![tag],
                OneOrMany::Many(tags) => tags,
            }),
            image: None,
            file: None,
        }
    }
}

/// Extractor producing a `TodoForm` from either body encoding
#[derive(Debug)]
pub struct TodoSubmission(pub TodoForm);

impl FromRequest<AppState> for TodoSubmission {
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| BackendError::invalid_input(rejection.body_text()))?;
            let form = TodoForm::from_multipart(multipart, state.uploads.max_file_bytes()).await?;
            return Ok(Self(form));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| BackendError::invalid_input(rejection.body_text()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(TodoForm::default()));
        }

        let json: JsonTodoBody = serde_json::from_slice(&body)
            .map_err(|e| BackendError::invalid_input(format!("Invalid JSON body: {e}")))?;
        Ok(Self(json.into()))
    }
}
