use std::sync::Arc;

use reqwest::Client;
use url::Url;

use crate::cache::token_cache::TokenCache;
use crate::config::upstream::ConfigProvider;
use crate::errors::Failure;
use crate::model::playlist::{PlaylistInfo, TrackLine, UpstreamPlaylist, UpstreamPlaylistItem};
use crate::observability::logger::Logger;
use crate::parser::playlist_id::PlaylistId;
use crate::sources::fetch::get_json;
use crate::sources::pager::PageFetcher;
use crate::sources::token_exchange::TokenManager;
use crate::utils::constants::{
    ENDPOINT_PLAYLIST, ENDPOINT_PLAYLIST_ITEMS, PAGE_SIZE, PLAYLIST_INFO_FIELDS, PLAYLIST_ITEMS_FIELDS,
};

/// Playlist reads against the upstream catalog API.
#[derive(Clone)]
pub struct PlaylistSource {
    client: Client,
    config: Arc<dyn ConfigProvider>,
    tokens: TokenManager,
    pager: PageFetcher,
}

impl PlaylistSource {
    pub fn new(
        client: Client,
        config: Arc<dyn ConfigProvider>,
        cache: Arc<TokenCache>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let tokens = TokenManager::new(client.clone(), config.clone(), cache, logger.clone());
        let pager = PageFetcher::new(client.clone(), logger, ENDPOINT_PLAYLIST_ITEMS);
        Self { client, config, tokens, pager }
    }

    pub async fn playlist_info(&self, id: &PlaylistId) -> Result<PlaylistInfo, Failure> {
        let token = self.tokens.acquire().await?;
        let url = self.upstream_url(&format!("playlists/{}", id), &[("fields", PLAYLIST_INFO_FIELDS)])?;

        let playlist: UpstreamPlaylist = get_json(&self.client, &url, &token, ENDPOINT_PLAYLIST).await?;
        Ok(PlaylistInfo::from(playlist))
    }

    pub async fn playlist_tracks(&self, id: &PlaylistId) -> Result<Vec<TrackLine>, Failure> {
        let token = self.tokens.acquire().await?;
        let limit = PAGE_SIZE.to_string();
        let url = self.upstream_url(
            &format!("playlists/{}/tracks", id),
            &[("fields", PLAYLIST_ITEMS_FIELDS), ("limit", limit.as_str())],
        )?;

        self.pager
            .fetch_all::<UpstreamPlaylistItem, _, _>(&url, &token, TrackLine::from_item)
            .await
    }

    fn upstream_url(&self, path: &str, query: &[(&str, &str)]) -> Result<String, Failure> {
        let raw = self.config.get_config().api_url(path);
        let mut url = Url::parse(&raw)
            .map_err(|e| Failure::Generic(format!("invalid upstream url '{}': {}", raw, e)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url.into())
    }
}
