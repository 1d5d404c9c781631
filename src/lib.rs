//! # Codeclip
//!
//! Concatenates every text file under a directory into one buffer, with
//! path headers, ready to paste into another tool.
//!
//! ## Features
//!
//! - Honors `.gitignore` files from the working directory up to the repository root
//! - Skips dotfiles (except `.gitignore`) and symbolic links
//! - Replaces binary files with a `[BINARY FILE SKIPPED]` marker
//! - Stops at a byte budget without ever emitting a partial file
//!
//! ## Example
//!
//! ```no_run
//! use codeclip::{collect, copy_to_clipboard, CollectOptions, IgnoreRules};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let rules = IgnoreRules::load(&cwd, &cwd);
//! let collected = collect(&cwd, &rules, &CollectOptions::default());
//! copy_to_clipboard(&collected.text).unwrap();
//! ```

pub mod binary;
pub mod clipboard;
pub mod error;
pub mod logger;
pub mod repo;
pub mod rules;
pub mod walker;

pub use binary::is_binary;
pub use clipboard::{copy_to_clipboard, deliver, Clipboard, SystemClipboard};
pub use error::{CodeclipError, Result};
pub use repo::{find_repo_root, walk_ancestors};
pub use rules::IgnoreRules;
pub use walker::{walk_directory, Accumulator, WalkStats};

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Default byte budget: 5 MiB
pub const DEFAULT_MAX_SIZE: usize = 5 * 1024 * 1024;

/// Question asked when no repository encloses the working directory
pub const CONFIRM_PROMPT: &str = "No git repository found. Continue anyway? (y/N) ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    pub max_size: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Result of one traversal
#[derive(Debug, Clone)]
pub struct Collected {
    pub text: String,
    pub truncated: bool,
    /// Bytes counted against the budget
    pub bytes: usize,
    pub stats: WalkStats,
}

/// Writes the root header for `cwd` and concatenates everything below it.
pub fn collect(cwd: &Path, rules: &IgnoreRules, options: &CollectOptions) -> Collected {
    let mut acc = Accumulator::new(options.max_size);
    let mut stats = WalkStats::default();

    let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cwd.display().to_string());
    let header = walker::root_header(&name);

    let mut text = String::new();
    if acc.fits(header.len()) {
        acc.commit(header.len());
        text.push_str(&header);
        text.push_str(&walk_directory(cwd, cwd, rules, &mut acc, &mut stats));
    }

    Collected {
        text,
        truncated: acc.limit_reached(),
        bytes: acc.current_size(),
        stats,
    }
}

/// Ask whether to continue outside a repository.
///
/// Only a case-insensitive `y` counts as yes; end of input counts as no.
pub fn confirm<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> io::Result<bool> {
    write!(writer, "{}", CONFIRM_PROMPT)?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
