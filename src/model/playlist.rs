use serde::{Deserialize, Serialize};

// -------------------------------
// Upstream shapes
// -------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<UpstreamArtist>,
}

/// Raw playlist item; `track` is null for removed or unavailable entries.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPlaylistItem {
    #[serde(default)]
    pub track: Option<UpstreamTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamTotal {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPlaylist {
    pub description: Option<String>,
    pub name: String,
    pub owner: UpstreamOwner,
    pub tracks: UpstreamTotal,
    #[serde(default)]
    pub images: Option<Vec<PlaylistImage>>,
}

// -------------------------------
// Proxy shapes
// -------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLine {
    pub artist: String,
    pub song: String,
}

impl From<UpstreamTrack> for TrackLine {
    fn from(track: UpstreamTrack) -> Self {
        let artist = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self { artist, song: track.name }
    }
}

impl TrackLine {
    /// Extractor for playlist pages: skips items without a track.
    pub fn from_item(item: UpstreamPlaylistItem) -> Option<Self> {
        item.track.map(TrackLine::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistImage {
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub description: Option<String>,
    pub name: String,
    pub owner: PlaylistOwner,
    pub item_count: u64,
    pub images: Vec<PlaylistImage>,
}

impl From<UpstreamPlaylist> for PlaylistInfo {
    fn from(p: UpstreamPlaylist) -> Self {
        Self {
            description: p.description,
            name: p.name,
            owner: PlaylistOwner { display_name: p.owner.display_name },
            item_count: p.tracks.total,
            images: p.images.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub tracks: Vec<TrackLine>,
}
