//! Navigation build errors.

use crate::path::NavPath;
use crate::source::SourceError;
use crate::tree::TreeError;

/// Error returned while expanding fragments.
///
/// Every variant is fatal for the repository being built. Locations and
/// content paths are relative to the content root.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// No fragment file at the referenced location.
    #[error("Fragment not found: {location} (referenced from {nav_path})")]
    FragmentMissing {
        /// Attempted fragment location.
        location: String,
        /// Navigation path the fragment was expected to fill.
        nav_path: NavPath,
    },
    /// Fragment exists but does not have the expected shape.
    #[error("Malformed fragment {location}: {reason}")]
    MalformedFragment {
        /// Fragment location.
        location: String,
        /// What was wrong.
        reason: String,
    },
    /// Fragment has no top-level navigation key.
    #[error("Fragment {location} has no `{key}` section")]
    NoNavSection {
        /// Fragment location.
        location: String,
        /// Expected key.
        key: &'static str,
    },
    /// Declared content file does not exist.
    #[error("Content file not found: {path} (declared at {nav_path})")]
    DanglingLeaf {
        /// Resolved content path.
        path: String,
        /// Navigation path of the entry.
        nav_path: NavPath,
    },
    /// Reference is empty, absolute, or climbs above the content root.
    #[error("Invalid reference '{value}' in {location}")]
    InvalidReference {
        /// Fragment location.
        location: String,
        /// Raw value.
        value: String,
    },
    /// Fragment is reached again while it is still being expanded.
    #[error("Fragment {location} includes itself (at {nav_path})")]
    CyclicFragment {
        /// Fragment location.
        location: String,
        /// Navigation path where the cycle closed.
        nav_path: NavPath,
    },
    /// Fragment nesting is deeper than the configured limit.
    #[error("Fragment nesting exceeds {limit} levels at {location}")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
        /// Fragment location that would exceed it.
        location: String,
    },
    /// Fragment file could not be read.
    #[error("Failed to read fragment: {0}")]
    Source(#[from] SourceError),
    /// Tree insertion failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
