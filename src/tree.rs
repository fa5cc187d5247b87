/*!
 * Directory tree rendering
 *
 * Produces an indented, directory-first listing of the scan root. Files of a
 * directory come first, then its primary subdirectories, then its secondary
 * ones. Version control and dependency directories are only shown one level
 * deep.
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::classify::partition;
use crate::config::{Config, TreeRules};
use crate::utils::{base_name, indent};

/// Annotation printed after the scan root's name
pub const ROOT_ANNOTATION: &str = "(directori arrel de l'escaneig)";

/// Renders the directory tree of a scan root
pub struct TreeRenderer<'a> {
    rules: &'a TreeRules,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer using the tree rules of `config`
    pub fn new(config: &'a Config) -> Self {
        Self::with_rules(&config.tree)
    }

    /// Create a renderer from explicit rules
    pub fn with_rules(rules: &'a TreeRules) -> Self {
        Self { rules }
    }

    /// Write the whole tree of `root` to `out`
    pub fn render<W: Write>(&self, root: &Path, out: &mut W) -> io::Result<()> {
        writeln!(out, "Arbre del directori: {}", root.display())?;
        writeln!(out)?;

        self.render_directory(root, 0, out)
    }

    fn render_directory<W: Write>(&self, dir: &Path, depth: usize, out: &mut W) -> io::Result<()> {
        let name = base_name(dir);
        let pad = indent(depth);

        if self.rules.special_dirs.contains(&name) {
            debug!("Listing special directory {} one level deep", dir.display());
            writeln!(out, "{}{}/", pad, name)?;

            let child_pad = indent(depth + 1);
            for child in list_child_dirs(dir) {
                writeln!(out, "{}{}/", child_pad, child)?;
            }
            return Ok(());
        }

        let (mut dirs, mut files) = read_entries(dir)?;
        if depth == 0 {
            dirs.retain(|d| {
                let keep = !self.rules.top_level_excludes.contains(d);
                if !keep {
                    debug!("Excluding top-level directory {}", d);
                }
                keep
            });
        }
        let (primary, secondary) = partition(dirs, self.rules);
        files.sort();

        if depth == 0 {
            writeln!(out, "{}/ {}", name, ROOT_ANNOTATION)?;
        } else {
            writeln!(out, "{}{}/", pad, name)?;
        }

        let file_pad = indent(depth + 1);
        for file in &files {
            writeln!(out, "{}{}", file_pad, file)?;
        }

        let has_subdirs = !primary.is_empty() || !secondary.is_empty();
        if !files.is_empty() && has_subdirs {
            writeln!(out)?;
        }

        for sub in &primary {
            self.render_directory(&dir.join(sub), depth + 1, out)?;
        }

        if depth == 0 && !primary.is_empty() && !secondary.is_empty() {
            writeln!(out)?;
        }

        for sub in &secondary {
            self.render_directory(&dir.join(sub), depth + 1, out)?;
        }

        Ok(())
    }
}

/// Immediate entries of `dir`, split into directory names and other names
fn read_entries(dir: &Path) -> io::Result<(Vec<String>, Vec<String>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let entry_name = entry.file_name().to_string_lossy().to_string();

        // Symlinked directories are neither listed nor followed
        if entry.path_is_symlink() && entry.path().is_dir() {
            debug!("Skipping symlinked directory {}", entry.path().display());
            continue;
        }

        if entry.file_type().is_dir() {
            dirs.push(entry_name);
        } else {
            files.push(entry_name);
        }
    }

    Ok((dirs, files))
}

/// Sorted names of the directories directly inside `dir`; empty if unreadable
fn list_child_dirs(dir: &Path) -> Vec<String> {
    let mut children: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            Vec::new()
        }
    };

    children.sort();
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    use tempfile::tempdir;

    fn render(root: &Path) -> String {
        let rules = TreeRules::default();
        let mut out = Vec::new();
        TreeRenderer::with_rules(&rules)
            .render(root, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_exact_layout() -> io::Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("src").join("ui"))?;
        fs::create_dir_all(root.join("docs"))?;
        File::create(root.join("package.json"))?;
        File::create(root.join("README.md"))?;
        File::create(root.join("src").join("main.ts"))?;
        File::create(root.join("src").join("ui").join("App.tsx"))?;
        File::create(root.join("docs").join("guide.md"))?;

        let expected = format!(
            "Arbre del directori: {}\n\
             \n\
             proj/ (directori arrel de l'escaneig)\n\
             \x20   README.md\n\
             \x20   package.json\n\
             \n\
             \x20   src/\n\
             \x20       main.ts\n\
             \n\
             \x20       ui/\n\
             \x20           App.tsx\n\
             \n\
             \x20   docs/\n\
             \x20       guide.md\n",
            root.display()
        );
        assert_eq!(render(&root), expected);

        Ok(())
    }

    #[test]
    fn test_special_dirs_listed_one_level() -> io::Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("node_modules").join("react").join("cjs"))?;
        fs::create_dir_all(root.join("node_modules").join("lodash"))?;
        File::create(root.join("node_modules").join("react").join("index.js"))?;
        File::create(root.join("node_modules").join(".package-lock.json"))?;

        let output = render(root);
        assert!(output.contains("\n    node_modules/\n        lodash/\n        react/\n"));
        assert!(!output.contains("index.js"));
        assert!(!output.contains("cjs"));
        assert!(!output.contains(".package-lock.json"));

        Ok(())
    }

    #[test]
    fn test_top_level_excludes_only_at_root() -> io::Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("imatges i recursos"))?;
        fs::create_dir_all(root.join("src").join("imatges i recursos"))?;

        let output = render(root);
        assert_eq!(output.matches("imatges i recursos/").count(), 1);
        assert!(output.contains("\n        imatges i recursos/\n"));

        Ok(())
    }

    #[test]
    fn test_indent_matches_depth() -> io::Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("a").join("b").join("c"))?;
        File::create(root.join("a").join("b").join("c").join("deep.txt"))?;

        let output = render(root);
        assert!(output.contains("\n    a/\n"));
        assert!(output.contains("\n        b/\n"));
        assert!(output.contains("\n            c/\n"));
        assert!(output.contains("\n                deep.txt\n"));

        Ok(())
    }

    #[test]
    fn test_no_group_separator_without_secondary() -> io::Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("api"))?;
        fs::create_dir_all(root.join("web"))?;

        let output = render(root);
        assert!(output.ends_with("\n    api/\n    web/\n"));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_not_listed() -> io::Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("real"))?;
        File::create(root.join("real").join("inner.txt"))?;
        File::create(root.join("top.txt"))?;
        std::os::unix::fs::symlink(root.join("real"), root.join("alias"))?;
        std::os::unix::fs::symlink(root.join("top.txt"), root.join("link.txt"))?;

        let output = render(root);
        assert!(!output.contains("alias"));
        assert!(output.contains("\n    link.txt\n"));
        assert!(output.contains("\n    real/\n        inner.txt\n"));
        assert_eq!(output.matches("inner.txt").count(), 1);

        Ok(())
    }
}
