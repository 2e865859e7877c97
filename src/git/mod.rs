//! Version-control backend abstraction
//!
//! This module provides a trait-based abstraction over the repository
//! operations the tagger needs, allowing for a real `git2` implementation
//! and an in-memory mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. Implementations:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Enumerations ([Repository::tag_objects], [Repository::tags]) return an
//! owned snapshot taken once per call. Any backend iterator used to build the
//! snapshot is dropped before the call returns, on success and on error.
//!
//! ```rust
//! # use git_semver_tag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tip = repo.head()?;
//! for reference in repo.tags()? {
//!     if reference.hash == tip.hash {
//!         println!("{} points at HEAD", reference.short_name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use chrono::{DateTime, FixedOffset};
use git2::Oid;

const SHORT_ID_LEN: usize = 7;

/// A named pointer into the object store
///
/// `hash` is what the reference itself points at: a commit for branches and
/// lightweight tags, a tag object for annotated tags. It is never peeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Full reference name (e.g. "refs/tags/v1.2.3")
    pub name: String,
    pub hash: Oid,
}

impl Reference {
    pub fn new(name: impl Into<String>, hash: Oid) -> Self {
        Reference {
            name: name.into(),
            hash,
        }
    }

    /// Reference name without its namespace ("refs/tags/v1.2.3" -> "v1.2.3")
    pub fn short_name(&self) -> &str {
        ["refs/tags/", "refs/heads/", "refs/remotes/", "refs/"]
            .iter()
            .find_map(|prefix| self.name.strip_prefix(prefix))
            .unwrap_or(self.name.as_str())
    }

    /// Abbreviated hash, as shown to users
    pub fn short_hash(&self) -> String {
        short_id(self.hash)
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.hash, self.name)
    }
}

/// First seven hex digits of an object id
pub fn short_id(oid: Oid) -> String {
    let mut hex = oid.to_string();
    hex.truncate(SHORT_ID_LEN);
    hex
}

/// Author identity plus timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: DateTime<FixedOffset>,
}

/// An annotated tag record stored in the object database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagObject {
    /// Identity of the tag object itself
    pub hash: Oid,
    /// Object the tag annotates, usually a commit
    pub target: Oid,
    pub name: String,
    pub message: String,
    pub tagger: Option<Signature>,
}

impl TagObject {
    /// True when this tag object is, or annotates, the given object
    pub fn covers(&self, oid: Oid) -> bool {
        self.hash == oid || self.target == oid
    }
}

/// Payload for a new annotated tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    pub message: String,
    pub tagger: Signature,
}

/// Repository operations required by the tagger
///
/// All methods read live repository state; nothing is cached between calls.
/// Implementations map backend failures to
/// [SemverTagError::Repository](crate::error::SemverTagError::Repository).
pub trait Repository {
    /// Resolve the currently checked out tip (HEAD)
    ///
    /// # Returns
    /// * `Ok(Reference)` - HEAD's reference name and the commit it resolves to
    /// * `Err` - Unborn branch or any other unresolvable HEAD
    fn head(&self) -> Result<Reference>;

    /// Every annotated tag object in the repository
    ///
    /// Includes tag objects that no reference points at. Order is
    /// backend-defined.
    fn tag_objects(&self) -> Result<Vec<TagObject>>;

    /// Every reference in the tag namespace, unpeeled
    fn tags(&self) -> Result<Vec<Reference>>;

    /// Create an annotated tag `name` at `target`
    ///
    /// # Returns
    /// * `Ok(Reference)` - The new tag reference, pointing at the new tag object
    /// * `Err` - If the name already exists, the target is missing, or the write fails
    fn create_tag(&self, name: &str, target: Oid, options: &TagOptions) -> Result<Reference>;
}
