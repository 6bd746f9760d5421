//! Shared constants and invariants

/// Seconds subtracted from the upstream-declared token lifetime.
pub const TOKEN_LEEWAY_SECONDS: u64 = 30;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Fixed page size requested from paginated collection endpoints.
pub const PAGE_SIZE: u32 = 100;
pub const PLAYLIST_INFO_FIELDS: &str = "description,name,owner(display_name),tracks(total),images";
pub const PLAYLIST_ITEMS_FIELDS: &str = "items(track(name,artists(name))),next";

pub const BEARER_SCHEME: &str = "Bearer";
pub const CLIENT_CREDENTIALS_BODY: &str = "grant_type=client_credentials";

// Upstream endpoint labels
pub const ENDPOINT_TOKEN: &str = "token";
pub const ENDPOINT_PLAYLIST: &str = "playlist";
pub const ENDPOINT_PLAYLIST_ITEMS: &str = "playlist_items";
