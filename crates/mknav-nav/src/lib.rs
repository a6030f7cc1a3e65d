//! Navigation tree assembly for mknav.
//!
//! Every directory of a content tree may hold a fragment file listing the
//! entries it exposes. Entries are either content files (leaves) or
//! sub-directories (branches) with fragments of their own. This crate splices
//! those fragments into a single [`NavTree`].
//!
//! # Architecture
//!
//! - [`NavTree`] with path-addressed insertion ([`NavPath`], first-match labels)
//! - [`Expander`]: depth-first fragment expansion with leaf verification
//! - [`ContentSource`] trait, [`FsSource`] for the filesystem and
//!   an in-memory source for unit tests
//! - [`scan_tree`]: directory-mirroring builder that ignores fragments
//!
//! # Example
//!
//! ```ignore
//! use mknav_nav::{ExpandOptions, FsSource, build_nav};
//!
//! let source = FsSource::new("docs");
//! let tree = build_nav(&source, &ExpandOptions::default())?;
//! for (path, file) in tree.leaves() {
//!     println!("{path}: {file}");
//! }
//! ```

mod error;
mod expander;
mod fragment;
#[cfg(test)]
mod mock;
mod path;
mod scanner;
mod source;
mod tree;

pub use error::NavError;
pub use expander::{ExpandOptions, Expander, build_nav};
pub use fragment::NAV_KEY;
pub use path::{NavPath, ROOT_LABEL, join_location, parent_dir};
pub use scanner::scan_tree;
pub use source::{ContentSource, FsSource, SourceError};
pub use tree::{NavEntry, NavNode, NavTree, TreeError};
