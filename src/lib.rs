/*!
 * projcat - Snapshot a project for human or LLM reading
 *
 * Produces two artifacts from a project root: an indented directory tree and
 * a single file concatenating the project's relevant sources, each wrapped in
 * delimiters carrying its relative path and the current git branch.
 */

pub mod classify;
pub mod concat;
pub mod config;
pub mod error;
pub mod git;
pub mod notify;
pub mod report;
pub mod tree;
pub mod types;
pub mod utils;


use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Instant;

use log::info;

// Re-export main components for easier access
pub use concat::Concatenator;
pub use config::{Args, Config, InclusionRules, TreeRules};
pub use error::{ProjcatError, Result};
pub use git::{BranchLookup, CachedBranch, GitCli};
pub use notify::{Notifier, NoopNotifier, ZenityNotifier};
pub use report::{ConcatReport, ReportFormat, Reporter, RunReport};
pub use tree::TreeRenderer;
pub use types::{DirClass, FileRead, SkipReason};

use error::ResultExt;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Write both artifacts, asking the `git` executable for the branch
pub fn run(config: &Config) -> Result<RunReport> {
    run_with_lookup(config, GitCli::default())
}

/// Write both artifacts using a custom branch lookup
pub fn run_with_lookup<L: BranchLookup>(config: &Config, lookup: L) -> Result<RunReport> {
    config.validate()?;
    let start_time = Instant::now();

    let tree_path = config.tree_path();
    info!("Rendering tree of {} into {}", config.root.display(), tree_path.display());
    {
        let file = File::create(&tree_path)
            .with_context(|| format!("Failed to create {}", tree_path.display()))?;
        let mut out = BufWriter::new(file);
        TreeRenderer::new(config).render(&config.root, &mut out)?;
        out.flush()?;
    }
    println!("Directory tree written to: {}", tree_path.display());
    println!("Scanned directory: {}", config.root.display());

    let concat_path = config.concat_path();
    info!("Concatenating into {}", concat_path.display());
    println!("Starting full project concatenation...");
    let branch = CachedBranch::new(lookup, config.root.clone(), config.fallback_branch.as_str());
    let concat = {
        let file = File::create(&concat_path)
            .with_context(|| format!("Failed to create {}", concat_path.display()))?;
        let mut out = BufWriter::new(file);
        let concat = Concatenator::new(config, &branch).concatenate(&mut out)?;
        out.flush()?;
        concat
    };
    println!("Project concatenation written to: {}", concat_path.display());

    Ok(RunReport {
        tree_file: tree_path.display().to_string(),
        concat_file: concat_path.display().to_string(),
        concat_size: fs::metadata(&concat_path)?.len(),
        duration: start_time.elapsed(),
        concat,
    })
}
