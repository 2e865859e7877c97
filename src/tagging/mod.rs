//! Tags the checked out tip with its semantic version.
//!
//! [tag] is the entry point: it resolves HEAD, asks the [resolver] whether a
//! version tag already covers it, applies the force policy, reads the version
//! from a [VersionSource] and writes one annotated tag `v<version>`.
//! Nothing is written on any failure path.

pub mod resolver;

pub use resolver::{resolve_candidates, resolve_tag, TagCandidate};

use chrono::{DateTime, FixedOffset, Local};

use crate::error::{Result, SemverTagError};
use crate::git::{short_id, Reference, Repository, Signature, TagOptions};
use crate::version::VersionSource;

/// Name of the tag recording `version`
pub fn tag_name(version: &str) -> String {
    format!("v{}", version)
}

/// Message stored in the tag object recording `version`
pub fn tag_message(version: &str) -> String {
    format!("semver(tag): {}", version)
}

/// Identity stamped on created tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagger {
    pub name: String,
    pub email: String,
}

impl Tagger {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Tagger {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Signature for this identity at `when`
    pub fn sign(&self, when: DateTime<FixedOffset>) -> Signature {
        Signature {
            name: self.name.clone(),
            email: self.email.clone(),
            when,
        }
    }
}

/// Policy inputs for one tagging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    /// Tag even when a version tag already covers the tip
    pub force: bool,
    /// Run every check and compute the tag, but write nothing
    pub dry_run: bool,
    pub tagger: Tagger,
}

impl TagRequest {
    pub fn new(tagger: Tagger) -> Self {
        TagRequest {
            force: false,
            dry_run: false,
            tagger,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a successful tagging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    /// The tip that was tagged
    pub tip: Reference,
    /// The created tag reference; `None` for a dry run
    pub reference: Option<Reference>,
    pub tag_name: String,
    pub version: String,
    /// Version tag that already covered the tip when force was used
    pub replaced: Option<Reference>,
}

/// Tag the current HEAD with the version read from `source`
///
/// # Returns
/// * `Ok(TagOutcome)` - The tag was created (or, for a dry run, would be)
/// * `Err(AlreadyTagged)` - A version tag covers the tip and force is off
/// * `Err(Repository)` - HEAD, enumeration or the tag write failed
/// * `Err(VersionSource)` - The version source failed
pub fn tag<R, S>(repo: &R, source: &S, request: &TagRequest) -> Result<TagOutcome>
where
    R: Repository + ?Sized,
    S: VersionSource + ?Sized,
{
    let tip = repo.head()?;
    tracing::info!(head = %tip.name, commit = %short_id(tip.hash), "resolved tip");

    let existing = resolve_tag(repo, &tip)?;
    tracing::debug!(force = request.force, existing = ?existing, "already tagged check");

    if let Some(existing) = &existing {
        if !request.force {
            return Err(SemverTagError::AlreadyTagged {
                commit: short_id(tip.hash),
                tag: existing.short_name().to_string(),
            });
        }
        tracing::info!(tag = existing.short_name(), "tip already tagged, forcing a new tag");
    }

    let version = source.read_version(&tip)?;
    let name = tag_name(&version);
    let options = TagOptions {
        message: tag_message(&version),
        tagger: request.tagger.sign(Local::now().into()),
    };

    let reference = if request.dry_run {
        tracing::info!(tag = %name, "dry run, not creating tag");
        None
    } else {
        let created = repo.create_tag(&name, tip.hash, &options)?;
        tracing::info!(tag = %name, hash = %created.hash, "created tag");
        Some(created)
    };

    Ok(TagOutcome {
        tip,
        reference,
        tag_name: name,
        version,
        replaced: existing,
    })
}
