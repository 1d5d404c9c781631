use std::ffi::OsStr;
use std::path::Path;

/// Number of leading bytes inspected for control characters
pub const SAMPLE_SIZE: usize = 8000;

/// Share of control characters in the sample above which content is binary
pub const CONTROL_RATIO: f64 = 0.3;

/// Extensions that are always treated as binary, whatever their content
pub const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "tiff", "tif", "webp", "heic", "heif", "psd",
    // audio
    "mp3", "wav", "flac", "ogg", "aac", "m4a", "wma",
    // video
    "mp4", "avi", "mov", "mkv", "wmv", "flv", "webm",
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "zst",
    // executables and libraries
    "exe", "dll", "so", "dylib", "bin", "o", "a", "lib", "class", "jar", "wasm", "pyc",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // databases
    "db", "sqlite", "sqlite3", "mdb",
];

/// Check if a path carries one of the known binary extensions
pub fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Classifies file content as binary or text.
///
/// Rules are applied in order and the first match wins:
/// 1. the extension is in [`BINARY_EXTENSIONS`]
/// 2. the buffer contains a null byte
/// 3. more than [`CONTROL_RATIO`] of the first [`SAMPLE_SIZE`] bytes are
///    control characters other than tab, newline and carriage return
///
/// This is a heuristic; misclassification is tolerated.
pub fn is_binary(bytes: &[u8], path: &Path) -> bool {
    if has_binary_extension(path) {
        return true;
    }

    if bytes.contains(&0) {
        return true;
    }

    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    let control = sample
        .iter()
        .filter(|&&b| b < 32 && !matches!(b, b'\t' | b'\n' | b'\r'))
        .count();

    control as f64 > sample.len() as f64 * CONTROL_RATIO
}
