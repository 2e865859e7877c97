use thiserror::Error;

/// Unified error type for git-semver-tag operations
#[derive(Error, Debug)]
pub enum SemverTagError {
    #[error("Repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error("{commit} is already tagged: {tag}")]
    AlreadyTagged { commit: String, tag: String },

    #[error("Version source error: {0}")]
    VersionSource(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in git-semver-tag
pub type Result<T> = std::result::Result<T, SemverTagError>;

impl SemverTagError {
    /// Create a repository error from a plain message
    pub fn repository(msg: impl AsRef<str>) -> Self {
        SemverTagError::Repository(git2::Error::from_str(msg.as_ref()))
    }

    /// Create a version source error with context
    pub fn version_source(msg: impl Into<String>) -> Self {
        SemverTagError::VersionSource(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverTagError::Config(msg.into())
    }

    /// True when the tip already carries a version tag and force was not requested
    pub fn is_already_tagged(&self) -> bool {
        matches!(self, SemverTagError::AlreadyTagged { .. })
    }
}
