//! Navigation discovery by filesystem walking.
//!
//! An alternative to fragment expansion: builds a [`NavTree`] that mirrors
//! the raw directory layout. Useful for bootstrapping fragments in a content
//! tree that has none yet. The expander does not use it.

use std::fs;
use std::io;
use std::path::Path;

use crate::tree::{NavEntry, NavNode, NavTree};

/// Build a tree mirroring the directory layout under `root`.
///
/// - Sub-directories become branches labelled by directory name.
/// - Files ending in `suffix` become leaves labelled by file stem.
/// - Hidden entries are skipped, as are directories without content files.
/// - Directories come first, then files, each sorted by name.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn scan_tree(root: &Path, suffix: &str) -> io::Result<NavTree> {
    let entries = scan_directory(root, "", suffix)?;
    Ok(NavTree::from_entries(entries))
}

fn scan_directory(dir_path: &Path, url_prefix: &str, suffix: &str) -> io::Result<Vec<NavEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir_path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_dir() {
            dirs.push(name);
        } else if name.len() > suffix.len() && name.ends_with(suffix) {
            files.push(name);
        }
    }
    dirs.sort();
    files.sort();

    let mut nav = Vec::with_capacity(dirs.len() + files.len());
    for name in dirs {
        let child_prefix = join_prefix(url_prefix, &name);
        let children = scan_directory(&dir_path.join(&name), &child_prefix, suffix)?;
        if !children.is_empty() {
            nav.push(NavEntry {
                label: name,
                node: NavNode::Branch(children),
            });
        }
    }
    for name in files {
        let label = name[..name.len() - suffix.len()].to_owned();
        nav.push(NavEntry::leaf(label, join_prefix(url_prefix, &name)));
    }

    Ok(nav)
}

fn join_prefix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
