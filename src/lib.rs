/*!
 * Clusterdash - cluster dashboard client
 *
 * Routing for the cluster dashboard views and the project-creation flow of
 * the provisioner, written against injected collaborators so the same code
 * drives the CLI and the tests.
 */

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod provisioner;
pub mod routes;

pub use clusterdash_api::{ApiError, HttpProjectApi, Project, ProjectApi, ProjectList};
pub use config::{DashConfig, LogLevel};
pub use context::{AppContext, BrowserLocation, Navigator, ProjectStore};
pub use error::{DashError, Result};
pub use provisioner::{
    create_and_select, is_alphanumeric, ButtonStatus, CreateProjectError, CreateProjectOutcome,
    ExistingClusterSection,
};
pub use routes::{DashboardRoute, DashboardRouter};

/// Build the HTTP API client described by `config`
pub fn api_client(config: &DashConfig) -> Result<HttpProjectApi> {
    Ok(HttpProjectApi::with_timeout(
        &config.api_url,
        config.token.clone(),
        config.request_timeout(),
    )?)
}
