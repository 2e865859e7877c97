//! Finds the version tag, if any, that already covers the tip commit.
//!
//! A tag reference can cover the tip in two shapes:
//!
//! - **Direct**: the reference points straight at the tip commit
//!   (lightweight tag).
//! - **Annotated**: the reference points at a tag object which is, or
//!   annotates, the tip.
//!
//! Only references whose own short name parses as a semantic version count.
//! Each reference is classified once against a snapshot of the tag objects,
//! so a reference whose hash merely collides with an unrelated tag object's
//! target is never mistaken for an annotated match.

use git2::Oid;
use std::collections::HashMap;

use crate::error::Result;
use crate::git::{short_id, Reference, Repository, TagObject};
use crate::version::{parse_version, Version};

/// A tag reference paired with what it points at
#[derive(Debug, Clone, PartialEq)]
pub enum TagCandidate<'a> {
    Direct(Reference),
    Annotated {
        reference: Reference,
        object: &'a TagObject,
    },
}

impl<'a> TagCandidate<'a> {
    /// Classify a reference against the tag objects, keyed by their own hash
    pub fn classify(reference: Reference, objects: &'a HashMap<Oid, TagObject>) -> Self {
        match objects.get(&reference.hash) {
            Some(object) => TagCandidate::Annotated { reference, object },
            None => TagCandidate::Direct(reference),
        }
    }

    pub fn reference(&self) -> &Reference {
        match self {
            TagCandidate::Direct(reference) => reference,
            TagCandidate::Annotated { reference, .. } => reference,
        }
    }

    /// True when the candidate, through at most one tag object, denotes `tip`
    pub fn covers(&self, tip: Oid) -> bool {
        match self {
            TagCandidate::Direct(reference) => reference.hash == tip,
            TagCandidate::Annotated { object, .. } => object.covers(tip),
        }
    }

    /// The candidate's version, if it covers `tip` and its name parses
    pub fn version_for(&self, tip: Oid) -> Option<Version> {
        if !self.covers(tip) {
            return None;
        }
        parse_version(self.reference().short_name())
    }
}

/// Every tag reference that is a valid version tag for the tip
///
/// Sorted ascending by version, then by reference name, so the last entry is
/// the preferred match.
pub fn resolve_candidates<R: Repository + ?Sized>(
    repo: &R,
    tip: &Reference,
) -> Result<Vec<(Version, Reference)>> {
    let objects: HashMap<Oid, TagObject> = repo
        .tag_objects()?
        .into_iter()
        .map(|object| (object.hash, object))
        .collect();

    for object in objects.values().filter(|object| object.covers(tip.hash)) {
        tracing::debug!(
            hash = %object.hash,
            target = %object.target,
            name = %object.name,
            "tag object covers tip"
        );
    }

    let mut matches = Vec::new();
    for reference in repo.tags()? {
        tracing::debug!(hash = %reference.hash, name = %reference.name, "tag reference");

        let candidate = TagCandidate::classify(reference, &objects);
        let Some(version) = candidate.version_for(tip.hash) else {
            continue;
        };
        matches.push((version, candidate.reference().clone()));
    }

    matches.sort_by(|(va, ra), (vb, rb)| va.cmp(vb).then_with(|| ra.name.cmp(&rb.name)));
    Ok(matches)
}

/// Find the version tag covering the tip, if there is one
///
/// When several references qualify, the greatest version wins (ties broken
/// by the greatest reference name) and a warning lists all of them.
pub fn resolve_tag<R: Repository + ?Sized>(repo: &R, tip: &Reference) -> Result<Option<Reference>> {
    let mut matches = resolve_candidates(repo, tip)?;

    if matches.len() > 1 {
        let names: Vec<&str> = matches.iter().map(|(_, r)| r.short_name()).collect();
        tracing::warn!(
            commit = %short_id(tip.hash),
            tags = ?names,
            "multiple version tags cover the tip; using the greatest"
        );
    }

    Ok(matches.pop().map(|(_, reference)| reference))
}
