use thiserror::Error;

const GITHUB_PREFIX: &str = "https://github.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a GitHub repository URL")]
    Empty,
    #[error("Please enter a valid GitHub repository URL (https://github.com/owner/repo)")]
    NotGithubRepo,
}

/// A repository URL that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    url: String,
    owner: String,
    name: String,
}

impl RepoUrl {
    /// The trimmed URL exactly as it will be sent to the backend.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_string(self) -> String {
        self.url
    }
}

/// Accepts `https://github.com/<owner>/<repo>` with an optional trailing slash.
pub fn validate_repo_url(raw: &str) -> Result<RepoUrl, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let rest = trimmed
        .strip_prefix(GITHUB_PREFIX)
        .ok_or(ValidationError::NotGithubRepo)?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);

    let mut segments = rest.split('/');
    let (Some(owner), Some(name), None) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(ValidationError::NotGithubRepo);
    };
    if !is_valid_segment(owner) || !is_valid_segment(name) {
        return Err(ValidationError::NotGithubRepo);
    }

    Ok(RepoUrl {
        url: trimmed.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
}
