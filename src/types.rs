/*!
 * Core types shared by the tree and concatenation passes
 */

use strum::Display;

/// Presentation group of a directory in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DirClass {
    /// Project code, listed first
    Primary,
    /// Support, config, artifacts, listed after primary directories
    Secondary,
}

/// Outcome of reading one file for concatenation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRead {
    /// File was read; invalid UTF-8 has already been replaced
    Content(String),
    /// File vanished between discovery and read
    NotFound,
    /// Open or read failed with the given message
    Failed(String),
}

/// Why a candidate file was left out of the concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SkipReason {
    /// File name is in the exclusion list
    #[strum(serialize = "name")]
    ExcludedName,
    /// Extension is in the exclusion list
    #[strum(serialize = "extension")]
    ExcludedExtension,
}
