//! Shared application context and navigation collaborators
//!
//! The project-creation pipeline never reaches for global state; it is handed
//! a [`ProjectStore`] and a [`Navigator`]. [`AppContext`] and
//! [`BrowserLocation`] are the in-process implementations used by the CLI and
//! the tests.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use clusterdash_api::Project;
use url::form_urlencoded;

/// Query parameter that mirrors the current project into the URL
pub const PROJECT_ID_PARAM: &str = "project_id";

/// Application-wide project state
pub trait ProjectStore: Send + Sync {
    fn set_current_project(&self, project: Option<Project>);
    fn set_projects(&self, projects: Vec<Project>);
    fn current_user_id(&self) -> i64;
    fn current_project(&self) -> Option<Project>;
    fn projects(&self) -> Vec<Project>;
}

/// Query-string aware navigation
pub trait Navigator: Send + Sync {
    /// Add or overwrite query parameters on the current location
    fn push_query_params(&self, params: &[(&str, &str)]);

    /// Navigate to `target` (which may carry its own query), dropping the
    /// `excluded` parameters from the current query
    fn push_filtered(&self, target: &str, excluded: &[&str]);

    /// Current location as `path?query`
    fn location(&self) -> String;
}

#[derive(Debug, Default)]
struct ContextInner {
    user_id: i64,
    current_project: Option<Project>,
    projects: Vec<Project>,
}

/// In-memory [`ProjectStore`]; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    inner: Arc<RwLock<ContextInner>>,
}

impl AppContext {
    pub fn new(user_id: i64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ContextInner {
                user_id,
                ..Default::default()
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ContextInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ContextInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProjectStore for AppContext {
    fn set_current_project(&self, project: Option<Project>) {
        tracing::debug!(project = ?project, "Setting current project");
        self.write().current_project = project;
    }

    fn set_projects(&self, projects: Vec<Project>) {
        tracing::debug!(count = projects.len(), "Replacing project list");
        self.write().projects = projects;
    }

    fn current_user_id(&self) -> i64 {
        self.read().user_id
    }

    fn current_project(&self) -> Option<Project> {
        self.read().current_project.clone()
    }

    fn projects(&self) -> Vec<Project> {
        self.read().projects.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    fn parse(raw: &str) -> Self {
        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        Self {
            path: path.to_string(),
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.query.push((key.to_string(), value.to_string())),
        }
    }

    fn render(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// In-memory [`Navigator`] holding a single location and its history
#[derive(Debug, Clone, Default)]
pub struct BrowserLocation {
    inner: Arc<RwLock<Vec<Location>>>,
}

impl BrowserLocation {
    pub fn new(initial: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vec![Location::parse(initial)])),
        }
    }

    pub fn path(&self) -> String {
        self.current().path
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.current()
            .query
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Every location visited, oldest first
    pub fn history(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(Location::render)
            .collect()
    }

    fn current(&self) -> Location {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
            .unwrap_or_default()
    }

    fn push(&self, location: Location) {
        tracing::debug!(location = %location.render(), "Navigating");
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(location);
    }
}

impl Navigator for BrowserLocation {
    fn push_query_params(&self, params: &[(&str, &str)]) {
        let mut next = self.current();
        for (key, value) in params {
            next.set(key, value);
        }
        self.push(next);
    }

    fn push_filtered(&self, target: &str, excluded: &[&str]) {
        let current = self.current();
        let mut next = Location::parse(target);
        for (key, value) in current.query {
            let explicit = next.query.iter().any(|(k, _)| *k == key);
            if !explicit && !excluded.contains(&key.as_str()) {
                next.query.push((key, value));
            }
        }
        self.push(next);
    }

    fn location(&self) -> String {
        self.current().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_context_clones_share_state() {
        let ctx = AppContext::new(7);
        let other = ctx.clone();

        ctx.set_projects(vec![Project::new(1, "a")]);
        ctx.set_current_project(Some(Project::new(1, "a")));

        assert_eq!(other.current_user_id(), 7);
        assert_eq!(other.projects(), vec![Project::new(1, "a")]);
        assert_eq!(other.current_project(), Some(Project::new(1, "a")));

        other.set_current_project(None);
        assert_eq!(ctx.current_project(), None);
    }

    #[test]
    fn test_push_query_params_sets_in_place() {
        let nav = BrowserLocation::new("/dashboard?cluster=c1&project_id=1");
        nav.push_query_params(&[("project_id", "9"), ("tab", "nodes")]);

        assert_eq!(nav.location(), "/dashboard?cluster=c1&project_id=9&tab=nodes");
        assert_eq!(nav.query_param("project_id"), Some("9".to_string()));
    }

    #[test]
    fn test_push_filtered_drops_excluded() {
        let nav = BrowserLocation::new("/new-project?project_id=4&cluster=c1");
        nav.push_filtered("dashboard?tab=overview", &["project_id"]);

        assert_eq!(nav.path(), "dashboard");
        assert_eq!(nav.location(), "dashboard?tab=overview&cluster=c1");
        assert_eq!(nav.query_param("project_id"), None);
    }

    #[test]
    fn test_push_filtered_target_wins() {
        let nav = BrowserLocation::new("/x?tab=settings");
        nav.push_filtered("dashboard?tab=overview", &[]);
        assert_eq!(nav.location(), "dashboard?tab=overview");
    }

    #[test]
    fn test_fragment_is_not_part_of_query() {
        let nav = BrowserLocation::new("/dashboard?tab=nodes#pods");
        assert_eq!(nav.query_param("tab"), Some("nodes".to_string()));
        assert_eq!(nav.location(), "/dashboard?tab=nodes");

        let nav = BrowserLocation::new("/dashboard#top");
        assert_eq!(nav.path(), "/dashboard");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let nav = BrowserLocation::new("/p");
        nav.push_query_params(&[("q", "a b&c")]);
        assert_eq!(nav.location(), "/p?q=a+b%26c");
        assert_eq!(nav.query_param("q"), Some("a b&c".to_string()));
    }

    #[test]
    fn test_history_records_each_navigation() {
        let nav = BrowserLocation::new("/start");
        nav.push_query_params(&[("project_id", "1")]);
        nav.push_filtered("dashboard?tab=overview", &["project_id"]);

        assert_eq!(
            nav.history(),
            vec![
                "/start".to_string(),
                "/start?project_id=1".to_string(),
                "dashboard?tab=overview".to_string(),
            ]
        );
    }
}
