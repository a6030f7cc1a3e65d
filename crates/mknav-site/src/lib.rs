//! Site configuration output for mknav.
//!
//! Ties navigation expansion to repositories on disk:
//!
//! - [`SiteWriter`] merges a [`NavTree`](mknav_nav::NavTree) into a template
//!   and writes the result atomically
//! - [`RepositoryBuilder`] locates one repository and builds it
//! - [`BatchRunner`] builds every configured repository

mod batch;
mod error;
mod repository;
mod writer;

pub use batch::{BatchEntry, BatchReport, BatchRunner};
pub use error::SiteError;
pub use repository::{Repository, RepositoryBuilder};
pub use writer::{SiteIdentity, SiteWriter};
