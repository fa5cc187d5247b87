/*!
 * Error types for Git operations
 */

use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while asking git for the current branch
#[derive(Error, Debug)]
pub enum GitError {
    /// The git executable could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// git ran but reported failure (e.g. not a repository)
    #[error("git exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// git succeeded without printing a branch
    #[error("git reported an empty branch name")]
    EmptyBranch,
}

/// Specialized Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;
