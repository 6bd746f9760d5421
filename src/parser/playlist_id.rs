use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::errors::ValidationIssue;

pub const PLAYLIST_ID_FIELD: &str = "collectionId";
const PLAYLIST_ID_LEN: usize = 22;
const PLAYLIST_HOST: &str = "open.spotify.com";

static PLAYLIST_ID_RE: OnceLock<Regex> = OnceLock::new();
static PLAYLIST_PATH_RE: OnceLock<Regex> = OnceLock::new();

fn playlist_id_re() -> &'static Regex {
    PLAYLIST_ID_RE.get_or_init(|| Regex::new(r"^[0-9A-Za-z]{22}$").expect("static regex"))
}

fn playlist_path_re() -> &'static Regex {
    PLAYLIST_PATH_RE.get_or_init(|| Regex::new(r"^/playlist/([0-9A-Za-z]{22})/?$").expect("static regex"))
}

/// A 22-character base62 playlist identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Accepts a bare id, or a `https://open.spotify.com/playlist/<id>` URL.
    pub fn parse(input: &str) -> Result<Self, Vec<ValidationIssue>> {
        if playlist_id_re().is_match(input) {
            return Ok(Self(input.to_owned()));
        }
        if let Some(id) = id_from_url(input) {
            return Ok(Self(id));
        }
        Err(issues_for(input))
    }

    /// Validate the optional query value.
    pub fn from_query(value: Option<&str>) -> Result<Self, Vec<ValidationIssue>> {
        match value {
            Some(v) if !v.trim().is_empty() => Self::parse(v),
            _ => Err(vec![ValidationIssue::new(
                "required",
                PLAYLIST_ID_FIELD,
                "collectionId is required",
            )]),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn id_from_url(input: &str) -> Option<String> {
    // Url::parse strips surrounding whitespace on its own
    if input.trim() != input {
        return None;
    }
    let url = Url::parse(input).ok()?;
    if url.scheme() != "https" || url.host_str() != Some(PLAYLIST_HOST) {
        return None;
    }
    playlist_path_re()
        .captures(url.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// One issue per violated constraint.
fn issues_for(input: &str) -> Vec<ValidationIssue> {
    if input.contains("://") {
        return vec![ValidationIssue::new(
            "invalid_url",
            PLAYLIST_ID_FIELD,
            "Must be a Spotify playlist URL like https://open.spotify.com/playlist/{id}",
        )];
    }

    let mut issues = Vec::new();
    let len = input.chars().count();
    if len != PLAYLIST_ID_LEN {
        issues.push(ValidationIssue::new(
            "invalid_length",
            PLAYLIST_ID_FIELD,
            &format!("Playlist ID must be exactly {} characters, got {}", PLAYLIST_ID_LEN, len),
        ));
    }
    if !input.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push(ValidationIssue::new(
            "invalid_characters",
            PLAYLIST_ID_FIELD,
            "Playlist ID may only contain characters 0-9, A-Z and a-z",
        ));
    }
    issues
}
