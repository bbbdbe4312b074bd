/**
 * API Client
 *
 * Typed async calls for every todoboard endpoint. The client reads the bearer
 * token from its `SessionStore` for each gated call, saves the session on
 * register/login and clears it on logout or when the server answers 401.
 *
 * Titles are checked locally with the same rules the server applies, so an
 * obviously bad todo never leaves the process.
 */

use std::path::Path;

use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::session::{Session, SessionStore};
use crate::shared::todo::{validate_title, TodoQuery};
use crate::shared::{
    AuthResponse, DeletedTodo, LoginRequest, RegisterRequest, Todo, TodoPage, UserResponse,
};

/// A file to upload with a todo
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk, keeping its file name
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<multipart::Part, ClientError> {
        let part = multipart::Part::bytes(self.bytes).file_name(self.file_name);
        Ok(match self.mime {
            Some(mime) => part.mime_str(&mime)?,
            None => part,
        })
    }
}

/// A new todo
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub tags: Vec<String>,
    pub image: Option<Attachment>,
    pub file: Option<Attachment>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A partial update. `None` fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    pub completed: Option<bool>,
    /// An empty list clears the tags
    pub tags: Option<Vec<String>>,
    pub image: Option<Attachment>,
    pub file: Option<Attachment>,
}

/// JSON body for todo requests that carry no files
#[derive(Debug, Serialize)]
struct TodoBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
}

enum TodoPayload {
    Json(serde_json::Value),
    Multipart(multipart::Form),
}

impl TodoPayload {
    /// Multipart when there is a file to send, JSON otherwise
    fn build(
        title: Option<&str>,
        description: Option<&str>,
        completed: Option<bool>,
        tags: Option<&[String]>,
        image: Option<Attachment>,
        file: Option<Attachment>,
    ) -> Result<Self, ClientError> {
        if image.is_none() && file.is_none() {
            let body = TodoBody {
                title,
                description,
                completed,
                tags,
            };
            return Ok(Self::Json(serde_json::to_value(body)?));
        }

        let mut form = multipart::Form::new();
        if let Some(title) = title {
            form = form.text("title", title.to_string());
        }
        if let Some(description) = description {
            form = form.text("description", description.to_string());
        }
        if let Some(completed) = completed {
            form = form.text("completed", completed.to_string());
        }
        if let Some(tags) = tags {
            if tags.is_empty() {
                // A lone blank value is how multipart says "no tags".
                form = form.text("tags[]", String::new());
            }
            for tag in tags {
                form = form.text("tags[]", tag.clone());
            }
        }
        if let Some(image) = image {
            form = form.part("image", image.into_part()?);
        }
        if let Some(file) = file {
            form = form.part("file", file.into_part()?);
        }
        Ok(Self::Multipart(form))
    }

    fn attach(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Json(body) => request.json(&body),
            Self::Multipart(form) => request.multipart(form),
        }
    }
}

/// Client for the todoboard REST API
pub struct ApiClient<S: SessionStore> {
    http: Client,
    config: ClientConfig,
    sessions: S,
}

impl<S: SessionStore> ApiClient<S> {
    pub fn new(config: ClientConfig, sessions: S) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("todoboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            config,
            sessions,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The stored session, if signed in
    pub fn session(&self) -> Result<Option<Session>, ClientError> {
        self.sessions.load()
    }

    pub fn is_signed_in(&self) -> Result<bool, ClientError> {
        Ok(self.sessions.load()?.is_some())
    }

    /// Create an account and sign in as it
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let request = RegisterRequest::new(name, email, password);
        request.validate()?;

        let response = self
            .http
            .post(self.config.api_url("/users"))
            .json(&request)
            .send()
            .await?;
        let auth: AuthResponse = parse(response).await?;
        self.start_session(auth)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let request = LoginRequest::new(email, password);
        request.validate()?;

        let response = self
            .http
            .post(self.config.api_url("/users/login"))
            .json(&request)
            .send()
            .await?;
        let auth: AuthResponse = parse(response).await?;
        self.start_session(auth)
    }

    /// Forget the stored session. Tokens are not revoked server-side.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.sessions.clear()
    }

    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        let request = self.authorized(self.http.get(self.config.api_url("/users/me")))?;
        self.send(request).await
    }

    pub async fn list_todos(&self, query: &TodoQuery) -> Result<TodoPage, ClientError> {
        let request = self.authorized(self.http.get(self.config.api_url("/todos")).query(query))?;
        self.send(request).await
    }

    pub async fn get_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        let request = self.authorized(self.http.get(self.todo_url(id)))?;
        self.send(request).await
    }

    pub async fn create_todo(&self, draft: TodoDraft) -> Result<Todo, ClientError> {
        let title = validate_title(Some(&draft.title))?;

        let payload = TodoPayload::build(
            Some(title.as_str()),
            draft.description.as_deref(),
            draft.completed,
            Some(draft.tags.as_slice()),
            draft.image,
            draft.file,
        )?;
        let request = self.authorized(self.http.post(self.config.api_url("/todos")))?;
        self.send(payload.attach(request)).await
    }

    pub async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> Result<Todo, ClientError> {
        let title = patch
            .title
            .as_deref()
            .map(|title| validate_title(Some(title)))
            .transpose()?;

        let payload = TodoPayload::build(
            title.as_deref(),
            patch.description.as_deref(),
            patch.completed,
            patch.tags.as_deref(),
            patch.image,
            patch.file,
        )?;
        let request = self.authorized(self.http.put(self.todo_url(id)))?;
        self.send(payload.attach(request)).await
    }

    pub async fn delete_todo(&self, id: Uuid) -> Result<DeletedTodo, ClientError> {
        let request = self.authorized(self.http.delete(self.todo_url(id)))?;
        self.send(request).await
    }

    /// URL of a stored attachment, as referenced by `imagePath`/`filePath`
    pub fn upload_url(&self, stored_name: &str) -> String {
        let base = self.config.api_base();
        let origin = base.strip_suffix("/api").unwrap_or(base);
        format!("{origin}/uploads/{stored_name}")
    }

    fn todo_url(&self, id: Uuid) -> String {
        self.config.api_url(&format!("/todos/{id}"))
    }

    fn start_session(&self, auth: AuthResponse) -> Result<Session, ClientError> {
        let session = Session::from(auth);
        self.sessions.save(&session)?;
        tracing::debug!(user_id = %session.user_id, "Session stored");
        Ok(session)
    }

    /// Attach the stored token, or fail without sending anything
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let session = self.sessions.load()?.ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(session.token))
    }

    /// Send a gated request. A 401 means the stored token is no longer any
    /// good, so the session is dropped.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let result = parse(request.send().await?).await;
        if let Err(err) = &result {
            if err.is_unauthorized() {
                tracing::info!("Server rejected the stored token, clearing session");
                self.sessions.clear()?;
            }
        }
        result
    }
}

/// Decode a success body, or turn the error body into `ClientError::Api`
async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text
            }
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
