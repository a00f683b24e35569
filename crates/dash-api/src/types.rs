//! Wire types shared by the API client and its callers

use serde::{Deserialize, Serialize};

/// A named cluster-management workspace owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

impl Project {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Body of `POST /api/projects`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// Response of the project listing endpoint.
///
/// `data` is `None` when the server omits the field or sends `null`,
/// which callers treat differently from an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub data: Option<Vec<Project>>,
}

impl ProjectList {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            data: Some(projects),
        }
    }

    /// Parse either `{"data": [...]}` or a bare `[...]` array
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Bare(Vec<Project>),
            Wrapped(ProjectList),
        }

        Ok(match serde_json::from_str::<Shape>(body)? {
            Shape::Bare(projects) => ProjectList::new(projects),
            Shape::Wrapped(list) => list,
        })
    }
}
