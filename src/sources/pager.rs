use std::collections::HashSet;
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::errors::Failure;
use crate::model::page::CollectionPage;
use crate::observability::logger::{log_context, Logger};
use crate::observability::metrics::get_metrics;
use crate::sources::fetch::get_json;

/// Follows `next` cursors of a paginated collection, one request at a time.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    logger: Arc<dyn Logger>,
    endpoint: &'static str,
}

impl PageFetcher {
    pub fn new(client: Client, logger: Arc<dyn Logger>, endpoint: &'static str) -> Self {
        Self { client, logger, endpoint }
    }

    /// Fetch every page starting at `first_url` and collect what `extract`
    /// keeps, in upstream order. Null items never reach `extract`.
    ///
    /// Any failing page aborts the whole aggregation; nothing partial is returned.
    pub async fn fetch_all<I, T, F>(&self, first_url: &str, token: &str, mut extract: F) -> Result<Vec<T>, Failure>
    where
        I: DeserializeOwned,
        F: FnMut(I) -> Option<T>,
    {
        let metrics = get_metrics().await;
        let mut accumulated = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next_url = Some(first_url.to_owned());
        let mut pages = 0usize;

        while let Some(url) = next_url.take() {
            if !visited.insert(url.clone()) {
                self.logger.warning(
                    "pagination cursor repeated",
                    Some(&log_context([("url", json!(url)), ("pages", json!(pages))])),
                );
                return Err(Failure::Generic(format!(
                    "upstream pagination repeated cursor {} after {} page(s)",
                    url, pages
                )));
            }

            let page: CollectionPage<I> = get_json(&self.client, &url, token, self.endpoint)
                .await
                .inspect_err(|e| {
                    self.logger.warning(
                        "page fetch failed, discarding aggregation",
                        Some(&log_context([
                            ("url", json!(url)),
                            ("pages", json!(pages)),
                            ("error", json!(e.to_string())),
                        ])),
                    );
                })?;
            pages += 1;
            metrics.pages_fetched.inc();

            accumulated.extend(page.items.into_iter().flatten().filter_map(&mut extract));
            next_url = page.next.filter(|next| !next.is_empty());
        }

        self.logger.info(
            "collection aggregated",
            Some(&log_context([("pages", json!(pages)), ("items", json!(accumulated.len()))])),
        );
        Ok(accumulated)
    }
}
