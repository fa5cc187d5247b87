/*!
 * Project concatenation
 *
 * Writes the configured root files and the contents of the included
 * directories into one stream, each wrapped in start/end delimiters that
 * carry the project-relative path and the current branch. A file that cannot
 * be read never stops the run: its block holds an error marker instead.
 */

use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::git::{BranchLookup, CachedBranch, GitCli};
use crate::report::ConcatReport;
use crate::types::{FileRead, SkipReason};
use crate::utils::relative_slash_path;

/// Payload written for blank files
pub const EMPTY_FILE_MARKER: &str = "[Fitxer buit]";

/// Read a file for concatenation, never failing.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn read_file(path: &Path) -> FileRead {
    match fs::read(path) {
        Ok(bytes) => FileRead::Content(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileRead::NotFound,
        Err(e) => FileRead::Failed(e.to_string()),
    }
}

/// Header text shared by the start and end delimiters
pub fn block_header(project_name: &str, rel_path: &str, branch: &str) -> String {
    format!("../{}/{} -- branca {}", project_name, rel_path, branch)
}

/// Write one content block
pub fn write_block<W: Write>(out: &mut W, header: &str, read: &FileRead) -> io::Result<()> {
    writeln!(out, "--- START OF FILE: {} ---", header)?;

    match read {
        FileRead::Content(content) if content.trim().is_empty() => {
            writeln!(out, "{}", EMPTY_FILE_MARKER)?;
        }
        FileRead::Content(content) => out.write_all(content.as_bytes())?,
        FileRead::NotFound => writeln!(out, "[Error llegint el fitxer: file not found]")?,
        FileRead::Failed(message) => writeln!(out, "[Error llegint el fitxer: {}]", message)?,
    }

    write!(out, "\n--- END OF FILE: {} ---\n\n", header)
}

/// Concatenates the relevant files of a project
pub struct Concatenator<'a, L: BranchLookup = GitCli> {
    config: &'a Config,
    branch: &'a CachedBranch<L>,
    project_name: String,
}

impl<'a, L: BranchLookup> Concatenator<'a, L> {
    /// Create a concatenator for the scan root of `config`
    pub fn new(config: &'a Config, branch: &'a CachedBranch<L>) -> Self {
        Self {
            config,
            branch,
            project_name: config.project_name(),
        }
    }

    /// Write the banner and every selected file to `out`
    ///
    /// Only failures to write `out` are returned as errors.
    pub fn concatenate<W: Write>(&self, out: &mut W) -> io::Result<ConcatReport> {
        let mut report = ConcatReport {
            project_name: self.project_name.clone(),
            branch: self.branch.get().to_string(),
            ..ConcatReport::default()
        };

        println!("Project: {}", report.project_name);
        println!("Branch: {}", report.branch);

        self.write_banner(out, &report.branch)?;

        info!("Concatenating root files of {}", self.config.root.display());
        println!("Processing root configuration files...");
        for file_name in &self.config.inclusion.root_files {
            self.process_root_file(file_name, out, &mut report)?;
        }

        for dir in &self.config.inclusion.include_dirs {
            self.process_directory(dir, out, &mut report)?;
        }

        Ok(report)
    }

    fn write_banner<W: Write>(&self, out: &mut W, branch: &str) -> io::Result<()> {
        writeln!(out, "=== PROJECTE CONCATENAT ===")?;
        writeln!(out, "Projecte: {}", self.project_name)?;
        writeln!(out, "Branca: {}", branch)?;
        writeln!(
            out,
            "Generat el: {}",
            Local::now().format("%a %b %e %H:%M:%S %Z %Y")
        )?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out)
    }

    fn process_root_file<W: Write>(
        &self,
        file_name: &str,
        out: &mut W,
        report: &mut ConcatReport,
    ) -> io::Result<()> {
        match self.config.inclusion.skip_reason(file_name) {
            Some(SkipReason::ExcludedName) => {
                debug!("Skipping excluded root file {}", file_name);
                report.skipped_by_name.push(file_name.to_string());
                return Ok(());
            }
            Some(SkipReason::ExcludedExtension) => {
                println!("  -> Skipping (extension): {}", file_name);
                report.skipped_by_extension.push(file_name.to_string());
                return Ok(());
            }
            None => {}
        }

        let path = self.config.root.join(file_name);
        if path.is_file() {
            println!("  -> Adding: {}", file_name);
            self.write_file(&path, out, report)
        } else {
            println!("Warning: root file '{}' not found.", file_name);
            warn!("Root file {} not found", path.display());
            report.missing_root_files.push(file_name.to_string());
            Ok(())
        }
    }

    fn process_directory<W: Write>(
        &self,
        dir: &str,
        out: &mut W,
        report: &mut ConcatReport,
    ) -> io::Result<()> {
        let dir_path = self.config.root.join(dir);
        if !dir_path.is_dir() {
            println!("Warning: directory '{}' does not exist.", dir);
            warn!("Include directory {} not found", dir_path.display());
            report.missing_dirs.push(dir.to_string());
            return Ok(());
        }

        println!("Processing directory: '{}'...", dir);
        let rules = &self.config.inclusion;
        let walker = WalkDir::new(&dir_path)
            .sort_by(files_before_dirs)
            .into_iter()
            .filter_entry(|e| {
                let pruned = e.depth() > 0
                    && e.file_type().is_dir()
                    && rules.is_dir_excluded(&e.file_name().to_string_lossy());
                if pruned {
                    debug!("Pruning {}", e.path().display());
                }
                !pruned
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking {}: {}", dir_path.display(), e);
                    report.walk_errors.push(e.to_string());
                    continue;
                }
            };

            // Symlinked directories are not followed
            if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let reason = rules.skip_reason(&file_name);
            if let Some(reason) = reason {
                debug!("Skipping {} (excluded {})", entry.path().display(), reason);
            }

            match reason {
                Some(SkipReason::ExcludedName) => {
                    report.skipped_by_name.push(self.relative(entry.path()));
                }
                Some(SkipReason::ExcludedExtension) => {
                    println!("  -> Skipping (extension): {}", entry.path().display());
                    report.skipped_by_extension.push(self.relative(entry.path()));
                }
                None => {
                    println!("  -> Adding: {}", entry.path().display());
                    self.write_file(entry.path(), out, report)?;
                }
            }
        }

        Ok(())
    }

    fn write_file<W: Write>(
        &self,
        path: &Path,
        out: &mut W,
        report: &mut ConcatReport,
    ) -> io::Result<()> {
        let rel_path = self.relative(path);
        let header = block_header(&self.project_name, &rel_path, self.branch.get());
        let read = read_file(path);

        match &read {
            FileRead::Content(content) if content.trim().is_empty() => {
                report.empty_files.push(rel_path.clone());
            }
            FileRead::Content(_) => {}
            FileRead::NotFound => {
                warn!("{} disappeared before it could be read", path.display());
                report
                    .read_errors
                    .push((rel_path.clone(), "file not found".to_string()));
            }
            FileRead::Failed(message) => {
                warn!("Failed to read {}: {}", path.display(), message);
                report.read_errors.push((rel_path.clone(), message.clone()));
            }
        }

        write_block(out, &header, &read)?;
        report.written.push(rel_path);

        Ok(())
    }

    fn relative(&self, path: &Path) -> String {
        relative_slash_path(&self.config.root, path)
    }
}

/// Directory listing order: files first, then subdirectories, each by name
fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
