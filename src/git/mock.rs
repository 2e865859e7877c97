use crate::error::{Result, SemverTagError};
use crate::git::{Reference, Repository, TagObject, TagOptions};
use git2::{ObjectType, Oid};
use std::cell::{RefCell, RefMut};

/// In-memory repository for testing without actual git operations
///
/// Tag objects and references are kept in insertion order, which is also the
/// enumeration order. Created tags are appended to both lists.
pub struct MockRepository {
    head: Option<Reference>,
    state: RefCell<MockState>,
    fail_tag_objects: bool,
    fail_tags: bool,
    fail_create: bool,
}

#[derive(Default)]
struct MockState {
    tag_objects: Vec<TagObject>,
    tags: Vec<Reference>,
    created: Vec<Reference>,
}

impl MockRepository {
    /// Create a new mock repository with an unborn HEAD
    pub fn new() -> Self {
        MockRepository {
            head: None,
            state: RefCell::new(MockState::default()),
            fail_tag_objects: false,
            fail_tags: false,
            fail_create: false,
        }
    }

    /// Point HEAD at a commit
    pub fn set_head(&mut self, branch: &str, oid: Oid) {
        self.head = Some(Reference::new(format!("refs/heads/{}", branch), oid));
    }

    /// Add a lightweight tag pointing directly at an OID
    pub fn add_lightweight_tag(&mut self, name: &str, oid: Oid) {
        self.state_mut()
            .tags
            .push(Reference::new(format!("refs/tags/{}", name), oid));
    }

    /// Add an annotated tag object plus a reference to it; returns the tag object's OID
    pub fn add_annotated_tag(&mut self, name: &str, target: Oid) -> Oid {
        let hash = self.add_tag_object(name, target);
        self.state_mut()
            .tags
            .push(Reference::new(format!("refs/tags/{}", name), hash));
        hash
    }

    /// Add a tag object that no reference points at
    pub fn add_tag_object(&mut self, name: &str, target: Oid) -> Oid {
        let hash = synthetic_tag_oid(name, target);
        self.state_mut().tag_objects.push(TagObject {
            hash,
            target,
            name: name.to_string(),
            message: format!("tag {}", name),
            tagger: None,
        });
        hash
    }

    /// Add a tag reference with an arbitrary target
    pub fn add_reference(&mut self, name: &str, oid: Oid) {
        self.state_mut().tags.push(Reference::new(name, oid));
    }

    /// Make `tag_objects()` fail
    pub fn fail_tag_objects(&mut self) {
        self.fail_tag_objects = true;
    }

    /// Make `tags()` fail
    pub fn fail_tags(&mut self) {
        self.fail_tags = true;
    }

    /// Make `create_tag()` fail
    pub fn fail_create(&mut self) {
        self.fail_create = true;
    }

    /// Tags written through `create_tag`, in creation order
    pub fn created_tags(&self) -> Vec<Reference> {
        self.lock().created.clone()
    }

    /// Look up a tag object by its own OID
    pub fn find_tag_object(&self, hash: Oid) -> Option<TagObject> {
        self.lock()
            .tag_objects
            .iter()
            .find(|object| object.hash == hash)
            .cloned()
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state.get_mut()
    }

    fn lock(&self) -> RefMut<'_, MockState> {
        self.state.borrow_mut()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn synthetic_tag_oid(name: &str, target: Oid) -> Oid {
    let payload = format!("object {}\ntype commit\ntag {}\n", target, name);
    Oid::hash_object(ObjectType::Tag, payload.as_bytes()).unwrap_or_else(|_| Oid::zero())
}

impl Repository for MockRepository {
    fn head(&self) -> Result<Reference> {
        self.head
            .clone()
            .ok_or_else(|| SemverTagError::repository("reference 'refs/heads/main' not found"))
    }

    fn tag_objects(&self) -> Result<Vec<TagObject>> {
        if self.fail_tag_objects {
            return Err(SemverTagError::repository("object store is corrupted"));
        }
        Ok(self.lock().tag_objects.clone())
    }

    fn tags(&self) -> Result<Vec<Reference>> {
        if self.fail_tags {
            return Err(SemverTagError::repository("cannot read refs/tags"));
        }
        Ok(self.lock().tags.clone())
    }

    fn create_tag(&self, name: &str, target: Oid, options: &TagOptions) -> Result<Reference> {
        if self.fail_create {
            return Err(SemverTagError::repository("failed to write tag object"));
        }

        let ref_name = format!("refs/tags/{}", name);
        let mut state = self.lock();
        if state.tags.iter().any(|r| r.name == ref_name) {
            return Err(SemverTagError::repository(format!(
                "tag '{}' already exists",
                name
            )));
        }

        let hash = synthetic_tag_oid(name, target);
        state.tag_objects.push(TagObject {
            hash,
            target,
            name: name.to_string(),
            message: options.message.clone(),
            tagger: Some(options.tagger.clone()),
        });

        let reference = Reference::new(ref_name, hash);
        state.tags.push(reference.clone());
        state.created.push(reference.clone());
        Ok(reference)
    }
}
