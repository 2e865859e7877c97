//! Version parsing and version sources.
//!
//! Parsing is delegated to the `semver` crate. A name that does not parse is
//! simply "not a version"; callers get `None`, never an error.

use std::fs;
use std::path::{Path, PathBuf};

pub use semver::Version;

use crate::error::{Result, SemverTagError};
use crate::git::Reference;

/// Parses a tag or reference name as a semantic version.
///
/// Accepts one optional leading 'v' or 'V', followed by a complete
/// `major.minor.patch[-pre][+build]` version.
///
/// # Example
/// ```
/// # use git_semver_tag::version::parse_version;
/// assert_eq!(parse_version("v1.2.3").unwrap().to_string(), "1.2.3");
/// assert_eq!(parse_version("1.0.0-rc.1").unwrap().to_string(), "1.0.0-rc.1");
/// assert!(parse_version("legacy-marker").is_none());
/// assert!(parse_version("v1.2").is_none());
/// ```
pub fn parse_version(name: &str) -> Option<Version> {
    let bare = name.strip_prefix(|c: char| c == 'v' || c == 'V').unwrap_or(name);
    Version::parse(bare).ok()
}

/// Produces the version string to tag the current tip with.
///
/// How the version is derived (declared, bumped, computed) is up to the
/// implementation; the tagger only consumes the resulting string.
pub trait VersionSource {
    fn read_version(&self, tip: &Reference) -> Result<String>;
}

impl<S: VersionSource + ?Sized> VersionSource for Box<S> {
    fn read_version(&self, tip: &Reference) -> Result<String> {
        (**self).read_version(tip)
    }
}

/// A version given up front, e.g. on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVersion {
    version: String,
}

impl FixedVersion {
    pub fn new(version: impl Into<String>) -> Self {
        FixedVersion {
            version: version.into(),
        }
    }
}

impl VersionSource for FixedVersion {
    fn read_version(&self, _tip: &Reference) -> Result<String> {
        let version = parse_version(self.version.trim()).ok_or_else(|| {
            SemverTagError::version_source(format!(
                "'{}' is not a valid semantic version",
                self.version
            ))
        })?;
        Ok(version.to_string())
    }
}

/// Reads the version declared in a file such as `VERSION`
///
/// The file holds a single version, optionally prefixed with 'v', surrounded
/// by any amount of whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFile {
    path: PathBuf,
}

impl VersionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VersionFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionSource for VersionFile {
    fn read_version(&self, tip: &Reference) -> Result<String> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SemverTagError::version_source(format!(
                "cannot read version file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let declared = contents.trim();
        let version = parse_version(declared).ok_or_else(|| {
            SemverTagError::version_source(format!(
                "version file '{}' does not contain a semantic version: '{}'",
                self.path.display(),
                declared
            ))
        })?;

        tracing::debug!(
            file = %self.path.display(),
            %version,
            tip = %tip.short_hash(),
            "read declared version"
        );
        Ok(version.to_string())
    }
}
