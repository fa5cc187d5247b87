/*!
 * Current branch lookup through the git command line
 */

mod error;

pub use error::{GitError, GitResult};

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;
use once_cell::unsync::OnceCell;

/// Something that can report the checked-out branch of a directory
pub trait BranchLookup {
    /// Name of the branch checked out in `dir`
    fn current_branch(&self, dir: &Path) -> GitResult<String>;
}

/// Runs `git rev-parse --abbrev-ref HEAD`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    /// Use a specific git executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl BranchLookup for GitCli {
    fn current_branch(&self, dir: &Path) -> GitResult<String> {
        let output = Command::new(&self.program)
            .args(["rev-parse", "--abbrev-ref", "HEAD"])
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if branch.is_empty() {
            return Err(GitError::EmptyBranch);
        }

        Ok(branch)
    }
}

/// Branch name resolved at most once and reused for the rest of the run
pub struct CachedBranch<L: BranchLookup = GitCli> {
    lookup: L,
    dir: PathBuf,
    fallback: String,
    cell: OnceCell<String>,
}

impl<L: BranchLookup> CachedBranch<L> {
    /// Resolve the branch of `dir` lazily, falling back to `fallback`
    pub fn new(lookup: L, dir: impl Into<PathBuf>, fallback: impl Into<String>) -> Self {
        Self {
            lookup,
            dir: dir.into(),
            fallback: fallback.into(),
            cell: OnceCell::new(),
        }
    }

    /// The branch name, or the fallback if git could not provide one
    pub fn get(&self) -> &str {
        self.cell.get_or_init(|| match self.lookup.current_branch(&self.dir) {
            Ok(branch) => {
                debug!("Current branch: {}", branch);
                branch
            }
            Err(e) => {
                debug!("Branch lookup failed, using '{}': {}", self.fallback, e);
                self.fallback.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingLookup {
        calls: Cell<usize>,
        result: Option<&'static str>,
    }

    impl BranchLookup for CountingLookup {
        fn current_branch(&self, _dir: &Path) -> GitResult<String> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .map(str::to_string)
                .ok_or(GitError::EmptyBranch)
        }
    }

    #[test]
    fn test_lookup_runs_once() {
        let cached = CachedBranch::new(
            CountingLookup {
                calls: Cell::new(0),
                result: Some("main"),
            },
            "/tmp",
            "?",
        );

        assert_eq!(cached.get(), "main");
        assert_eq!(cached.get(), "main");
        assert_eq!(cached.lookup.calls.get(), 1);
    }

    #[test]
    fn test_failure_uses_fallback_once() {
        let cached = CachedBranch::new(
            CountingLookup {
                calls: Cell::new(0),
                result: None,
            },
            "/tmp",
            "?",
        );

        assert_eq!(cached.get(), "?");
        assert_eq!(cached.get(), "?");
        assert_eq!(cached.lookup.calls.get(), 1);
    }

    #[test]
    fn test_missing_git_binary() {
        let git = GitCli::new("projcat-no-such-git-binary");
        let err = git.current_branch(Path::new(".")).unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));

        let cached = CachedBranch::new(git, ".", "?");
        assert_eq!(cached.get(), "?");
    }

    #[test]
    fn test_git_error_display() {
        assert_eq!(
            GitError::EmptyBranch.to_string(),
            "git reported an empty branch name"
        );
    }
}
