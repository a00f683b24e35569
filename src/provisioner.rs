//! Project creation from the provisioner's "existing cluster" section
//!
//! The section creates a project, refreshes the user's project list, selects
//! the new project as current and sends the user to the dashboard overview.
//! Every submission settles the button into either [`ButtonStatus::Succeeded`]
//! or [`ButtonStatus::Failed`].

use std::fmt;

use clusterdash_api::{ApiError, Project, ProjectApi};
use thiserror::Error;

use crate::context::{Navigator, ProjectStore, PROJECT_ID_PARAM};

/// Where the user lands after a project is created
pub const DASHBOARD_OVERVIEW: &str = "dashboard?tab=overview";

pub const PLACEHOLDER_TEXT: &str =
    "You can manually link to an existing cluster once this project has been created.";
pub const SUBMIT_TEXT: &str = "Submit";
pub const SUBMIT_HELPER: &str = "Note: Provisioning can take up to 15 minutes";

/// Project names must be non-empty ASCII letters and digits
pub fn is_alphanumeric(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// State of the submit control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ButtonStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Succeeded,
}

impl ButtonStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ButtonStatus::Loading)
    }

    /// Text shown next to the button
    pub fn label(&self) -> &str {
        match self {
            ButtonStatus::Idle => "",
            ButtonStatus::Loading => "loading",
            ButtonStatus::Failed(reason) => reason,
            ButtonStatus::Succeeded => "successful",
        }
    }
}

/// Network stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Create,
    List,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Create => f.write_str("create"),
            Stage::List => f.write_str("list"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CreateProjectError {
    #[error("Project name must be alphanumeric: {0:?}")]
    InvalidName(String),

    #[error("Failed to create project")]
    Create(#[source] ApiError),

    #[error("Failed to list projects")]
    List(#[source] ApiError),
}

impl CreateProjectError {
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CreateProjectError::InvalidName(_) => None,
            CreateProjectError::Create(_) => Some(Stage::Create),
            CreateProjectError::List(_) => Some(Stage::List),
        }
    }

    /// This error followed by its sources, joined with ": "
    pub fn reason(&self) -> String {
        let mut reason = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            reason.push_str(": ");
            reason.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        reason
    }
}

/// What a successful submission did to the shared context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateProjectOutcome {
    /// The new project was found, selected and navigated to
    Selected(Project),

    /// The list had entries but none with the submitted name; the current
    /// project was cleared and navigation still happened
    NoMatch,

    /// The list came back empty; nothing was selected
    EmptyList,

    /// The list response carried no data; the context is untouched
    NoData,
}

/// Create `name`, refresh the project list and select the new project.
///
/// With duplicate names in the returned list the first entry wins.
pub async fn create_and_select<A, S, N>(
    api: &A,
    store: &S,
    navigator: &N,
    name: &str,
) -> Result<CreateProjectOutcome, CreateProjectError>
where
    A: ProjectApi + ?Sized,
    S: ProjectStore + ?Sized,
    N: Navigator + ?Sized,
{
    if !is_alphanumeric(name) {
        return Err(CreateProjectError::InvalidName(name.to_string()));
    }

    let created = api
        .create_project(name)
        .await
        .map_err(CreateProjectError::Create)?;
    tracing::info!(id = created.id, name = %created.name, "Project created");

    let list = api
        .get_projects(store.current_user_id())
        .await
        .map_err(CreateProjectError::List)?;

    let Some(projects) = list.data else {
        tracing::warn!("Project list response carried no data");
        return Ok(CreateProjectOutcome::NoData);
    };

    let selected = projects.iter().find(|p| p.name == name).cloned();
    let empty = projects.is_empty();
    store.set_projects(projects);
    if empty {
        return Ok(CreateProjectOutcome::EmptyList);
    }

    select_project(store, navigator, selected.clone());
    navigator.push_filtered(DASHBOARD_OVERVIEW, &[PROJECT_ID_PARAM]);

    Ok(match selected {
        Some(project) => CreateProjectOutcome::Selected(project),
        None => {
            tracing::warn!(name, "Created project missing from project list");
            CreateProjectOutcome::NoMatch
        }
    })
}

/// Set the current project and mirror its id into the query string
pub fn select_project<S, N>(store: &S, navigator: &N, project: Option<Project>)
where
    S: ProjectStore + ?Sized,
    N: Navigator + ?Sized,
{
    let id = project.as_ref().map(|p| p.id.to_string());
    store.set_current_project(project);
    if let Some(id) = id {
        navigator.push_query_params(&[(PROJECT_ID_PARAM, id.as_str())]);
    }
}

/// Body rendered between the placeholder and the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Children(Vec<String>),
    Padding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveButtonView {
    pub text: &'static str,
    pub disabled: bool,
    pub status: ButtonStatus,
    pub make_flush: bool,
    pub helper: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub placeholder: &'static str,
    pub body: SectionBody,
    pub submit: SaveButtonView,
}

/// Form that creates a project for a cluster the user links later
pub struct ExistingClusterSection<A, S, N> {
    api: A,
    store: S,
    navigator: N,
    project_name: String,
    children: Vec<String>,
    status: ButtonStatus,
}

impl<A, S, N> ExistingClusterSection<A, S, N>
where
    A: ProjectApi,
    S: ProjectStore,
    N: Navigator,
{
    pub fn new(api: A, store: S, navigator: N, project_name: impl Into<String>) -> Self {
        Self {
            api,
            store,
            navigator,
            project_name: project_name.into(),
            children: Vec::new(),
            status: ButtonStatus::Idle,
        }
    }

    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn status(&self) -> &ButtonStatus {
        &self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn can_submit(&self) -> bool {
        is_alphanumeric(&self.project_name)
    }

    pub fn view(&self) -> SectionView {
        let body = if self.children.is_empty() {
            SectionBody::Padding
        } else {
            SectionBody::Children(self.children.clone())
        };

        SectionView {
            placeholder: PLACEHOLDER_TEXT,
            body,
            submit: SaveButtonView {
                text: SUBMIT_TEXT,
                disabled: !self.can_submit(),
                status: self.status.clone(),
                make_flush: true,
                helper: SUBMIT_HELPER,
            },
        }
    }

    /// Submit handler.
    ///
    /// An invalid name is rejected before the status changes. Otherwise the
    /// status is `Loading` for the duration of the call and settles to
    /// `Succeeded` or `Failed`; dropping the future settles it to
    /// `Failed("cancelled")`.
    pub async fn on_create_project(&mut self) -> Result<CreateProjectOutcome, CreateProjectError> {
        if !self.can_submit() {
            return Err(CreateProjectError::InvalidName(self.project_name.clone()));
        }

        let Self {
            api,
            store,
            navigator,
            project_name,
            status,
            ..
        } = self;

        let guard = LoadingGuard::enter(status);
        let result = create_and_select(&*api, &*store, &*navigator, project_name.as_str()).await;

        match &result {
            Ok(outcome) => {
                tracing::debug!(?outcome, "Project creation finished");
                guard.settle(ButtonStatus::Succeeded);
            }
            Err(e) => {
                let stage = e.stage().map(|s| s.to_string()).unwrap_or_default();
                let reason = e.reason();
                tracing::error!(stage = %stage, error = %reason, "Project creation failed");
                guard.settle(ButtonStatus::Failed(reason));
            }
        }

        result
    }
}

/// Holds the status at `Loading` until settled; an unsettled drop means the
/// submission future was cancelled.
struct LoadingGuard<'a> {
    status: &'a mut ButtonStatus,
    settled: bool,
}

impl<'a> LoadingGuard<'a> {
    fn enter(status: &'a mut ButtonStatus) -> Self {
        *status = ButtonStatus::Loading;
        Self {
            status,
            settled: false,
        }
    }

    fn settle(mut self, next: ButtonStatus) {
        *self.status = next;
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Project creation cancelled");
            *self.status = ButtonStatus::Failed("cancelled".to_string());
        }
    }
}
