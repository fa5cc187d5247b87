/*!
 * Utility functions and compiled-in defaults for projcat
 */

use std::path::{Component, Path};

use once_cell::sync::Lazy;

/// Default name of the directory tree artifact
pub const DEFAULT_TREE_FILE: &str = "00arbre_directoris.txt";

/// Default name of the concatenation artifact
pub const DEFAULT_CONCAT_FILE: &str = "00_projecte_concatenat.txt";

/// Placeholder used in headers when the branch cannot be determined
pub const DEFAULT_FALLBACK_BRANCH: &str = "?";

/// Four spaces per tree level
pub const INDENT_UNIT: &str = "    ";

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Express `path` relative to `root` using `/` separators.
///
/// Falls back to the full path (still slash-joined) when `path` is not
/// below `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Final component of a path as an owned string
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Lowercased extension without the leading dot.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn lowercase_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Indentation for the given tree depth
pub fn indent(depth: usize) -> String {
    INDENT_UNIT.repeat(depth)
}

/// Root-level files copied into the concatenation, in this order
pub static DEFAULT_ROOT_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "package.json",
        "package-lock.json",
        "vite.config.ts",
        "tailwind.config.cjs",
        "postcss.config.cjs",
        "tsconfig.json",
        "main.cjs",
        "preload.cjs",
        "index.html",
        "README.md",
        "DEVELOPING.md",
        "LICENSE",
        ".gitattributes",
        ".gitignore",
        "metadata.json",
    ]
});

/// Directories (relative to the scan root) walked for concatenation
pub static DEFAULT_INCLUDE_DIRS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["src", ".github", "examples json"]);

/// Directory names never descended into while concatenating
pub static DEFAULT_EXCLUDE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "0_CONTEXT_i_eines",
        "node_modules",
        "dist",
        ".git",
        "chekpoints",
    ]
});

/// File names never concatenated. The output artifacts and the running
/// executable are added at configuration time.
pub static DEFAULT_EXCLUDE_FILES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["google-credentials.json", ".env.local"]);

/// Extensions (lowercase, no dot) never concatenated
pub static DEFAULT_EXCLUDE_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Images
        "png", "jpg", "jpeg", "gif", "bmp", "svg", "ico", "webp",
        // Video
        "mp4", "mov", "avi", "mkv", "webm",
        // Fonts
        "woff", "woff2", "ttf", "eot", "otf",
        // Documents & binaries
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
        "zip", "rar", "7z", "gz", "tar",
        "exe", "dll", "so", "dylib", "pyc",
    ]
});

/// Names dropped from the tree at the scan root only
pub static DEFAULT_TREE_TOP_LEVEL_EXCLUDES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["0_CONTEXT_i_eines", "imatges i recursos"]);

/// Directories shown one level deep in the tree and never recursed into
pub static DEFAULT_SPECIAL_DIRS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["node_modules", ".git"]);

/// Hidden directories that still count as project code
pub static DEFAULT_HIDDEN_PRIMARY: Lazy<Vec<&'static str>> = Lazy::new(|| vec![".github"]);

/// Case-insensitive substrings marking a directory as secondary
pub static DEFAULT_SECONDARY_PATTERNS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version control & editors
        "node_modules",
        ".git",
        ".github",
        ".vscode",
        ".idea",
        // Build output
        "dist",
        "build",
        "out",
        "target",
        "bin",
        "obj",
        // Examples & docs
        "examples",
        "exemple",
        "exemples",
        "docs",
        "documentation",
        // Assets
        "images",
        "img",
        "assets",
        "static",
        "public",
        // Tests & caches
        "test",
        "tests",
        "__pycache__",
        ".pytest_cache",
        "coverage",
        ".coverage",
        "logs",
        "tmp",
        "temp",
        // Third party
        "vendor",
        "third_party",
        "external",
        "lib",
        "libs",
        // Backups
        "chekpoints",
        "checkpoints",
        "backup",
        "backups",
        "0_CONTEXT_i_eines",
    ]
});
