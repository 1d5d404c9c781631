//! Depth-first concatenation of a directory tree under a byte budget.

use crate::binary::is_binary;
use crate::rules::{IgnoreRules, IGNORE_FILE};
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, trace};

/// Marker emitted in place of binary file content
pub const BINARY_MARKER: &str = "[BINARY FILE SKIPPED]\n";

/// Running byte count for one traversal.
///
/// Once `limit_reached` latches, nothing more is appended for the rest of the
/// run. The committed counter never decreases. Bytes reserved for a folder
/// header count against the budget until they are committed or released.
#[derive(Debug)]
pub struct Accumulator {
    current_size: usize,
    pending: usize,
    max_size: usize,
    limit_reached: bool,
}

impl Accumulator {
    pub fn new(max_size: usize) -> Self {
        Self {
            current_size: 0,
            pending: 0,
            max_size,
            limit_reached: false,
        }
    }

    /// Whether `bytes` more would stay within the budget.
    ///
    /// An overflow latches the limit; later calls always return false.
    pub fn fits(&mut self, bytes: usize) -> bool {
        if self.limit_reached {
            return false;
        }
        let used = self.current_size + self.pending;
        if used.saturating_add(bytes) > self.max_size {
            debug!(
                current = self.current_size,
                pending = self.pending,
                requested = bytes,
                max = self.max_size,
                "size limit reached"
            );
            self.limit_reached = true;
            return false;
        }
        true
    }

    pub fn commit(&mut self, bytes: usize) {
        self.current_size += bytes;
    }

    /// Hold `bytes` against the budget without committing them.
    pub fn reserve(&mut self, bytes: usize) {
        self.pending += bytes;
    }

    /// Drop a reservation that will not be emitted.
    pub fn release(&mut self, bytes: usize) {
        self.pending -= bytes;
    }

    /// Turn a reservation into committed bytes.
    pub fn commit_reserved(&mut self, bytes: usize) {
        self.pending -= bytes;
        self.current_size += bytes;
    }

    pub fn current_size(&self) -> usize {
        self.current_size
    }

    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }
}

/// Counts of what a traversal emitted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub files: usize,
    pub binary_files: usize,
    pub folders: usize,
}

pub fn root_header(name: &str) -> String {
    format!("--- Root Directory: {} ---\n", name)
}

pub fn folder_header(relative: &str) -> String {
    format!("\n--- Folder: {} ---\n", relative)
}

pub fn file_header(relative: &str) -> String {
    format!("\n--- File: {} ---\n", relative)
}

/// Render a relative path with `/` separators regardless of platform
fn display_relative(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != IGNORE_FILE
}

/// Walks `dir` depth-first and returns the concatenated text of its subtree.
///
/// Paths in headers and rule matching are relative to `cwd`. Unreadable
/// directories and files are treated as absent. Entries are visited sorted by
/// file name.
pub fn walk_directory(
    dir: &Path,
    cwd: &Path,
    rules: &IgnoreRules,
    acc: &mut Accumulator,
    stats: &mut WalkStats,
) -> String {
    let mut output = String::new();

    let mut entries: Vec<fs::DirEntry> = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir.filter_map(|entry| entry.ok()).collect(),
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "cannot list directory");
            return output;
        }
    };
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if acc.limit_reached() {
            break;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if is_hidden(&name) {
            trace!(name = %name, "skipping hidden entry");
            continue;
        }

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                debug!(name = %name, error = %e, "cannot stat entry");
                continue;
            }
        };
        if file_type.is_symlink() {
            trace!(name = %name, "skipping symlink");
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(cwd).unwrap_or(path.as_path());
        if rules.is_ignored(relative, file_type.is_dir()) {
            trace!(path = %relative.display(), "ignored by rules");
            continue;
        }
        let relative = display_relative(relative);

        if file_type.is_dir() {
            let header = folder_header(&relative);
            if !acc.fits(header.len()) {
                break;
            }
            acc.reserve(header.len());
            let subtree = walk_directory(&path, cwd, rules, acc, stats);
            if subtree.is_empty() {
                acc.release(header.len());
            } else {
                output.push_str(&header);
                output.push_str(&subtree);
                acc.commit_reserved(header.len());
                stats.folders += 1;
            }
        } else if file_type.is_file() {
            let header = file_header(&relative);
            if !acc.fits(header.len()) {
                break;
            }

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(path = %relative, error = %e, "cannot read file");
                    continue;
                }
            };

            let binary = is_binary(&bytes, &path);
            let body = if binary {
                trace!(path = %relative, "binary file");
                BINARY_MARKER.to_string()
            } else {
                String::from_utf8_lossy(&bytes).into_owned()
            };

            let size = header.len() + body.len();
            if !acc.fits(size) {
                break;
            }
            output.push_str(&header);
            output.push_str(&body);
            acc.commit(size);
            if binary {
                stats.binary_files += 1;
            } else {
                stats.files += 1;
            }
        }
    }

    output
}
