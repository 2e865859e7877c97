use crate::error::{Result, SemverTagError};
use crate::git::{Reference, Signature, TagObject, TagOptions};
use chrono::{FixedOffset, TimeZone};
use git2::{ObjectType, Oid, Repository as Git2Repo};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository at exactly `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)?;

        Ok(Git2Repository { repo })
    }

    /// Discover a repository at `path` or any of its parents
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree, `None` for bare repositories
    pub fn workdir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    /// Borrow the underlying git2 handle
    pub fn inner(&self) -> &Git2Repo {
        &self.repo
    }
}

fn signature_from_git2(signature: &git2::Signature<'_>) -> Option<Signature> {
    let time = signature.when();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    let when = offset.timestamp_opt(time.seconds(), 0).single()?;

    Some(Signature {
        name: signature.name().unwrap_or("unknown").to_string(),
        email: signature.email().unwrap_or("").to_string(),
        when,
    })
}

fn signature_to_git2(signature: &Signature) -> Result<git2::Signature<'static>> {
    let when = git2::Time::new(
        signature.when.timestamp(),
        signature.when.offset().local_minus_utc() / 60,
    );

    Ok(git2::Signature::new(
        &signature.name,
        &signature.email,
        &when,
    )?)
}

impl super::Repository for Git2Repository {
    fn head(&self) -> Result<Reference> {
        let head = self.repo.head()?;
        let name = head.name().unwrap_or("HEAD").to_string();
        let hash = head
            .target()
            .ok_or_else(|| SemverTagError::repository(format!("HEAD ({}) has no target", name)))?;

        Ok(Reference::new(name, hash))
    }

    fn tag_objects(&self) -> Result<Vec<TagObject>> {
        let odb = self.repo.odb()?;

        // The same object may live in several packs; collect ids once.
        let mut oids = BTreeSet::new();
        odb.foreach(|oid| {
            oids.insert(*oid);
            true
        })?;

        let mut objects = Vec::new();
        for oid in oids {
            let (_, kind) = odb.read_header(oid)?;
            if kind != ObjectType::Tag {
                continue;
            }

            let tag = self.repo.find_tag(oid)?;
            objects.push(TagObject {
                hash: tag.id(),
                target: tag.target_id(),
                name: tag.name().unwrap_or("").to_string(),
                message: tag.message().unwrap_or("").to_string(),
                tagger: tag.tagger().as_ref().and_then(signature_from_git2),
            });
        }

        Ok(objects)
    }

    fn tags(&self) -> Result<Vec<Reference>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                tracing::debug!("skipping tag reference with a non UTF-8 name");
                continue;
            };

            let hash = match reference.target() {
                Some(oid) => oid,
                None => match reference.resolve()?.target() {
                    Some(oid) => oid,
                    None => continue,
                },
            };

            tags.push(Reference::new(name, hash));
        }

        Ok(tags)
    }

    fn create_tag(&self, name: &str, target: Oid, options: &TagOptions) -> Result<Reference> {
        let object = self.repo.find_object(target, None)?;
        let tagger = signature_to_git2(&options.tagger)?;

        tracing::debug!(tag = name, at = %options.tagger.when, "writing tag object");
        let tag_oid = self
            .repo
            .tag(name, &object, &tagger, &options.message, false)?;

        Ok(Reference::new(format!("refs/tags/{}", name), tag_oid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use tempfile::TempDir;

    fn init_with_commit() -> (TempDir, Git2Repository, Oid) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let commit = {
            let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap()
        };
        (dir, Git2Repository::from_git2(repo), commit)
    }

    #[test]
    fn test_head_on_unborn_branch_fails() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(dir.path()).unwrap());
        assert!(matches!(
            repo.head(),
            Err(SemverTagError::Repository(_))
        ));
    }

    #[test]
    fn test_head_resolves_commit() {
        let (_dir, repo, commit) = init_with_commit();
        let head = repo.head().unwrap();
        assert_eq!(head.hash, commit);
        assert!(head.name.starts_with("refs/heads/"));
    }

    #[test]
    fn test_tags_are_not_peeled() {
        let (_dir, repo, commit) = init_with_commit();
        let sig = git2::Signature::now("Tagger", "tagger@example.com").unwrap();
        let object = repo.inner().find_object(commit, None).unwrap();
        let tag_oid = repo
            .inner()
            .tag("v1.0.0", &object, &sig, "release", false)
            .unwrap();
        repo.inner().tag_lightweight("light", &object, false).unwrap();

        let mut tags = repo.tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            tags,
            vec![
                Reference::new("refs/tags/light", commit),
                Reference::new("refs/tags/v1.0.0", tag_oid),
            ]
        );

        let objects = repo.tag_objects().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].hash, tag_oid);
        assert_eq!(objects[0].target, commit);
        assert_eq!(objects[0].name, "v1.0.0");
        assert_eq!(
            objects[0].tagger.as_ref().map(|t| t.name.as_str()),
            Some("Tagger")
        );
    }

    #[test]
    fn test_create_tag_rejects_existing_name() {
        let (_dir, repo, commit) = init_with_commit();
        let options = TagOptions {
            message: "semver(tag): 1.0.0".to_string(),
            tagger: Signature {
                name: "Tagger".to_string(),
                email: "tagger@example.com".to_string(),
                when: FixedOffset::east_opt(3600)
                    .unwrap()
                    .timestamp_opt(1_700_000_000, 0)
                    .unwrap(),
            },
        };

        let created = repo.create_tag("v1.0.0", commit, &options).unwrap();
        assert_eq!(created.name, "refs/tags/v1.0.0");

        let stored = repo.inner().find_tag(created.hash).unwrap();
        assert_eq!(stored.target_id(), commit);
        assert_eq!(stored.tagger().unwrap().when().offset_minutes(), 60);

        assert!(repo.create_tag("v1.0.0", commit, &options).is_err());
        assert_eq!(repo.tag_objects().unwrap().len(), 1);
    }

    #[test]
    fn test_tag_objects_include_unreferenced() {
        let (_dir, repo, commit) = init_with_commit();
        let sig = git2::Signature::now("Tagger", "tagger@example.com").unwrap();
        let object = repo.inner().find_object(commit, None).unwrap();
        let release = repo
            .inner()
            .tag("v2.0.0", &object, &sig, "release", false)
            .unwrap();
        let orphan = repo
            .inner()
            .tag("orphan", &object, &sig, "orphan", false)
            .unwrap();
        repo.inner().tag_delete("orphan").unwrap();

        let mut hashes: Vec<Oid> = repo
            .tag_objects()
            .unwrap()
            .iter()
            .map(|object| object.hash)
            .collect();
        hashes.sort();
        let mut expected = vec![release, orphan];
        expected.sort();
        assert_eq!(hashes, expected);
        assert_eq!(
            repo.tags().unwrap(),
            vec![Reference::new("refs/tags/v2.0.0", release)]
        );

        let tip = repo.head().unwrap();
        let found = crate::tagging::resolve_tag(&repo, &tip).unwrap();
        assert_eq!(found, Some(Reference::new("refs/tags/v2.0.0", release)));
    }
}
