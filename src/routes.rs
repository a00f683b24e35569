/*!
 * Cluster dashboard routing
 *
 * Maps paths under the dashboard mount point to one of three views. Routes
 * are tried in order and match by prefix, so the bare mount absorbs every
 * path the first two do not claim.
 */

use std::fmt;

const NODE_VIEW: &str = "node-view";
const ENV_DETAIL: &str = "pr-env-detail";

/// A view reachable under the dashboard mount
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DashboardRoute {
    /// `{base}/node-view/:nodeId`
    NodeView { node_id: String },

    /// `{base}/pr-env-detail/:repoId`
    EnvironmentDetail { repo_id: String },

    /// `{base}/` and everything else under the mount
    Dashboard,
}

impl DashboardRoute {
    /// Resolve `path` against the mount point `base`.
    ///
    /// Returns `None` only when `path` is not under `base` at all.
    pub fn resolve(base: &str, path: &str) -> Option<Self> {
        let rest = strip_mount(normalize_base(base), strip_query(path))?;

        // `rest` is empty or starts with '/'
        let segments: Vec<&str> = rest.split('/').skip(1).collect();

        // Literals match case-insensitively; parameters keep their case
        let route = match segments.as_slice() {
            [literal, node_id, ..]
                if literal.eq_ignore_ascii_case(NODE_VIEW) && !node_id.is_empty() =>
            {
                DashboardRoute::NodeView {
                    node_id: (*node_id).to_string(),
                }
            }
            [literal, repo_id, ..]
                if literal.eq_ignore_ascii_case(ENV_DETAIL) && !repo_id.is_empty() =>
            {
                DashboardRoute::EnvironmentDetail {
                    repo_id: (*repo_id).to_string(),
                }
            }
            _ => DashboardRoute::Dashboard,
        };

        Some(route)
    }

    /// Canonical path for this route under `base`
    pub fn to_path(&self, base: &str) -> String {
        let base = normalize_base(base);
        match self {
            DashboardRoute::NodeView { node_id } => format!("{}/{}/{}", base, NODE_VIEW, node_id),
            DashboardRoute::EnvironmentDetail { repo_id } => {
                format!("{}/{}/{}", base, ENV_DETAIL, repo_id)
            }
            DashboardRoute::Dashboard => format!("{}/", base),
        }
    }

    /// Name of the view this route renders
    pub fn view_name(&self) -> &'static str {
        match self {
            DashboardRoute::NodeView { .. } => "expanded-node-view",
            DashboardRoute::EnvironmentDetail { .. } => "environment-detail",
            DashboardRoute::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for DashboardRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardRoute::NodeView { node_id } => {
                write!(f, "{} (nodeId={})", self.view_name(), node_id)
            }
            DashboardRoute::EnvironmentDetail { repo_id } => {
                write!(f, "{} (repoId={})", self.view_name(), repo_id)
            }
            DashboardRoute::Dashboard => f.write_str(self.view_name()),
        }
    }
}

/// Router bound to a single mount point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRouter {
    base: String,
}

impl DashboardRouter {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: normalize_base(&base).to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resolve(&self, path: &str) -> Option<DashboardRoute> {
        DashboardRoute::resolve(&self.base, path)
    }

    pub fn link(&self, route: &DashboardRoute) -> String {
        route.to_path(&self.base)
    }
}

fn normalize_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn strip_mount<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    let mount = path.get(..base.len())?;
    if !mount.eq_ignore_ascii_case(base) {
        return None;
    }
    let rest = &path[base.len()..];
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
