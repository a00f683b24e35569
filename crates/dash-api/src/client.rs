//! Project API seam and its reqwest-backed implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

use crate::error::{ApiError, Result};
use crate::types::{CreateProjectRequest, Project, ProjectList};

/// Remote operations the dashboard needs from the backend.
///
/// Implemented over HTTP by [`HttpProjectApi`]; tests substitute in-memory
/// fakes.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Create a project owned by the authenticated user
    async fn create_project(&self, name: &str) -> Result<Project>;

    /// List the projects visible to `user_id`
    async fn get_projects(&self, user_id: i64) -> Result<ProjectList>;
}

/// HTTP client for the dashboard backend
#[derive(Debug, Clone)]
pub struct HttpProjectApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpProjectApi {
    /// Build a client rooted at `base_url` with no request timeout
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, token, None)
    }

    /// Build a client rooted at `base_url`
    pub fn with_timeout(
        base_url: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl ProjectApi for HttpProjectApi {
    async fn create_project(&self, name: &str) -> Result<Project> {
        let url = self.endpoint("api/projects")?;
        tracing::debug!(%url, name, "Creating project");

        let request = self.client.post(url).json(&CreateProjectRequest {
            name: name.to_string(),
        });
        let body = Self::read_body(self.authorize(request).send().await?).await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_projects(&self, user_id: i64) -> Result<ProjectList> {
        let url = self.endpoint(&format!("api/users/{}/projects", user_id))?;
        tracing::debug!(%url, user_id, "Listing projects");

        let request = self.client.get(url);
        let body = Self::read_body(self.authorize(request).send().await?).await?;

        Ok(ProjectList::from_json(&body)?)
    }
}
