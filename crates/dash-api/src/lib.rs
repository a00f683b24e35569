//! Clusterdash API: typed client for the dashboard backend
//!
//! Exposes the [`ProjectApi`] trait that the dashboard pipeline is written
//! against, and [`HttpProjectApi`], which talks to the real backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use clusterdash_api::{HttpProjectApi, ProjectApi};
//!
//! async fn example() -> Result<(), clusterdash_api::ApiError> {
//!     let api = HttpProjectApi::new("http://localhost:8080", Some("token".into()))?;
//!     let created = api.create_project("staging").await?;
//!     let list = api.get_projects(1).await?;
//!     println!("{} -> {:?}", created.name, list.data);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpProjectApi, ProjectApi};
pub use error::ApiError;
pub use types::{CreateProjectRequest, Project, ProjectList};
