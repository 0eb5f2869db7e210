//! Positional argument validators
//!
//! These run as clap value parsers, so a bad argument aborts parsing before
//! any configuration is built or request is sent.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParamError;

/// Distribution repository name: `/`-separated lowercase components joined
/// by `.`, `_`, `__` or runs of `-`.
static REPO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*(?:/[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*)*$",
    )
    .expect("repository name pattern compiles")
});

/// Whether `name` is a well-formed repository name.
pub fn is_repo_name(name: &str) -> bool {
    REPO_NAME.is_match(name)
}

/// Image reference given as `repo:tag` or `repo@digest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repo: String,
    pub reference: Reference,
}

/// Tag or digest half of an [`ImageRef`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Tag(String),
    Digest(String),
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Reference::Tag(tag) => write!(f, "{}:{}", self.repo, tag),
            Reference::Digest(digest) => write!(f, "{}@{}", self.repo, digest),
        }
    }
}

/// Validate a `cve list` image argument.
pub fn image_ref(value: &str) -> Result<ImageRef, ParamError> {
    let invalid = || ParamError::InvalidImageRef(value.to_string());

    let (repo, reference) = if let Some((repo, digest)) = value.split_once('@') {
        let (algorithm, hex) = digest.split_once(':').ok_or_else(invalid)?;
        if algorithm.is_empty() || hex.is_empty() {
            return Err(invalid());
        }
        (repo, Reference::Digest(digest.to_string()))
    } else {
        let (repo, tag) = value.rsplit_once(':').ok_or_else(invalid)?;
        if tag.is_empty() || tag.contains('/') {
            return Err(invalid());
        }
        (repo, Reference::Tag(tag.to_string()))
    };

    if !is_repo_name(repo) {
        return Err(invalid());
    }

    Ok(ImageRef {
        repo: repo.to_string(),
        reference,
    })
}

/// Validate a `cve affected` CVE id argument.
///
/// Only the literal `CVE` prefix is checked; the server owns the full
/// identifier grammar.
pub fn cve_id(value: &str) -> Result<String, ParamError> {
    if !value.starts_with("CVE") {
        return Err(ParamError::InvalidCliParameter(format!(
            "expected a cve id 'CVE-...' got '{value}'"
        )));
    }
    Ok(value.to_string())
}

/// Validate a `cve fixed` repository argument.
pub fn repo_name(value: &str) -> Result<String, ParamError> {
    if !is_repo_name(value) {
        return Err(ParamError::InvalidCliParameter(format!(
            "expected a valid repo name for first argument '{value}'"
        )));
    }
    Ok(value.to_string())
}
