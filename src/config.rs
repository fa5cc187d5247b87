/*!
 * Configuration handling for projcat
 */

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::types::SkipReason;
use crate::utils::{
    base_name, lowercase_extension, DEFAULT_CONCAT_FILE, DEFAULT_EXCLUDE_DIRS,
    DEFAULT_EXCLUDE_EXTENSIONS, DEFAULT_EXCLUDE_FILES, DEFAULT_FALLBACK_BRANCH,
    DEFAULT_HIDDEN_PRIMARY, DEFAULT_INCLUDE_DIRS, DEFAULT_ROOT_FILES,
    DEFAULT_SECONDARY_PATTERNS, DEFAULT_SPECIAL_DIRS, DEFAULT_TREE_FILE,
    DEFAULT_TREE_TOP_LEVEL_EXCLUDES,
};
use crate::{ensure, error};

/// Command-line arguments for projcat
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projcat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Render a project's directory tree and concatenate its relevant sources",
    long_about = "Writes a directory tree listing and a single concatenated dump of the project's relevant files. Run without arguments from a tool directory placed directly under the project root."
)]
pub struct Args {
    /// Project root to scan (default: parent of the executable's directory)
    #[clap(long)]
    pub root: Option<PathBuf>,

    /// Directory receiving both outputs (default: the executable's directory)
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// File name of the directory tree output
    #[clap(long, default_value = DEFAULT_TREE_FILE)]
    pub tree_file: String,

    /// File name of the concatenation output
    #[clap(long, default_value = DEFAULT_CONCAT_FILE)]
    pub concat_file: String,

    /// Branch shown in headers when git cannot report one
    #[clap(long, default_value = DEFAULT_FALLBACK_BRANCH)]
    pub fallback_branch: String,

    /// Exit without waiting for ENTER
    #[clap(long)]
    pub no_wait: bool,

    /// Never show a desktop dialog on failure
    #[clap(long)]
    pub no_notify: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Which files the concatenation pass picks up
#[derive(Clone, Debug)]
pub struct InclusionRules {
    /// Root-level file names, written in this order
    pub root_files: Vec<String>,
    /// Directories relative to the scan root, walked recursively
    pub include_dirs: Vec<String>,
    /// Directory names pruned anywhere inside an include directory
    pub exclude_dirs: HashSet<String>,
    /// File names never written
    pub exclude_files: HashSet<String>,
    /// Lowercase extensions without the dot
    pub exclude_extensions: HashSet<String>,
}

impl Default for InclusionRules {
    fn default() -> Self {
        let mut rules = Self {
            root_files: DEFAULT_ROOT_FILES.iter().map(|s| s.to_string()).collect(),
            include_dirs: DEFAULT_INCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude_files: DEFAULT_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
            exclude_extensions: HashSet::new(),
        };
        for ext in DEFAULT_EXCLUDE_EXTENSIONS.iter() {
            rules.exclude_extension(ext);
        }

        rules
    }
}

impl InclusionRules {
    /// Add an extension to the exclusion set, normalizing case and dot
    pub fn exclude_extension(&mut self, ext: &str) {
        self.exclude_extensions
            .insert(ext.trim_start_matches('.').to_lowercase());
    }

    /// Check whether a file name is filtered out, and why.
    ///
    /// The name check wins over the extension check.
    pub fn skip_reason(&self, file_name: &str) -> Option<SkipReason> {
        if self.exclude_files.contains(file_name) {
            return Some(SkipReason::ExcludedName);
        }

        match lowercase_extension(file_name) {
            Some(ext) if self.exclude_extensions.contains(&ext) => {
                Some(SkipReason::ExcludedExtension)
            }
            _ => None,
        }
    }

    /// Check if a directory name is pruned from the concatenation walk
    pub fn is_dir_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.contains(dir_name)
    }
}

/// How the directory tree is grouped and cut
#[derive(Clone, Debug)]
pub struct TreeRules {
    /// Names removed from descent at the scan root only
    pub top_level_excludes: HashSet<String>,
    /// Directories listed one level deep and never recursed into
    pub special_dirs: HashSet<String>,
    /// Case-insensitive substrings that mark a directory as secondary
    pub secondary_patterns: Vec<String>,
    /// Dot-prefixed names that are not secondary by virtue of the dot
    pub hidden_primary: HashSet<String>,
}

impl Default for TreeRules {
    fn default() -> Self {
        Self {
            top_level_excludes: DEFAULT_TREE_TOP_LEVEL_EXCLUDES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            special_dirs: DEFAULT_SPECIAL_DIRS.iter().map(|s| s.to_string()).collect(),
            secondary_patterns: DEFAULT_SECONDARY_PATTERNS
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            hidden_primary: DEFAULT_HIDDEN_PRIMARY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Application configuration, built once and shared read-only
#[derive(Clone, Debug)]
pub struct Config {
    /// Scan root
    pub root: PathBuf,

    /// Directory receiving the outputs
    pub output_dir: PathBuf,

    /// Tree output file name
    pub tree_file: String,

    /// Concatenation output file name
    pub concat_file: String,

    /// Branch placeholder when git is unavailable
    pub fallback_branch: String,

    /// Concatenation filters
    pub inclusion: InclusionRules,

    /// Tree grouping rules
    pub tree: TreeRules,

    /// Wait for ENTER before exiting
    pub wait_for_key: bool,

    /// Show a desktop dialog on fatal errors
    pub notify_on_error: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// Without `--root`/`--output-dir` the executable is assumed to live in a
    /// tool directory directly below the project root.
    pub fn from_args(args: Args) -> Result<Self> {
        let exe = env::current_exe()?;
        let exe_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| error!(Config, "Cannot locate executable directory"))?;

        let output_dir = args.output_dir.unwrap_or_else(|| exe_dir.clone());
        let root = match args.root {
            Some(root) => root,
            None => exe_dir
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| error!(Config, "Executable directory has no parent"))?,
        };

        let mut config = Self::new(root, output_dir)?;
        config.tree_file = args.tree_file;
        config.concat_file = args.concat_file;
        config.fallback_branch = args.fallback_branch;
        config.wait_for_key = !args.no_wait;
        config.notify_on_error = !args.no_notify;
        config.inclusion.exclude_files.insert(base_name(&exe));
        config.finish();

        Ok(config)
    }

    /// Configuration with the compiled-in defaults for the given directories
    pub fn new(root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let root = absolutize(root.into())?;
        let output_dir = absolutize(output_dir.into())?;

        let mut config = Self {
            root,
            output_dir,
            tree_file: DEFAULT_TREE_FILE.to_string(),
            concat_file: DEFAULT_CONCAT_FILE.to_string(),
            fallback_branch: DEFAULT_FALLBACK_BRANCH.to_string(),
            inclusion: InclusionRules::default(),
            tree: TreeRules::default(),
            wait_for_key: true,
            notify_on_error: true,
        };
        config.finish();

        Ok(config)
    }

    /// Derive the exclusions that depend on the other settings
    fn finish(&mut self) {
        self.inclusion.exclude_files.insert(self.tree_file.clone());
        self.inclusion.exclude_files.insert(self.concat_file.clone());

        // The tool directory itself never shows up in its own tree
        if self.output_dir.parent() == Some(self.root.as_path()) {
            self.tree
                .top_level_excludes
                .insert(base_name(&self.output_dir));
        }
    }

    /// Full path of the tree output
    pub fn tree_path(&self) -> PathBuf {
        self.output_dir.join(&self.tree_file)
    }

    /// Full path of the concatenation output
    pub fn concat_path(&self) -> PathBuf {
        self.output_dir.join(&self.concat_file)
    }

    /// Project name shown in banners and headers
    pub fn project_name(&self) -> String {
        base_name(&self.root)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root.is_dir(),
            PathNotFound,
            "Scan root not found: {}",
            self.root.display()
        );
        ensure!(
            self.output_dir.is_dir(),
            PathNotFound,
            "Output directory not found: {}",
            self.output_dir.display()
        );
        ensure!(
            !self.tree_file.is_empty() && !self.concat_file.is_empty(),
            Config,
            "Output file names must not be empty"
        );
        ensure!(
            self.tree_file != self.concat_file,
            Config,
            "Tree and concatenation outputs share the name '{}'",
            self.tree_file
        );

        Ok(())
    }
}

/// Make a path absolute without resolving symlinks, dropping `.` and `..`
fn absolutize(path: PathBuf) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path
    } else {
        env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized)
}
