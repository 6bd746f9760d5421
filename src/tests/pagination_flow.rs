#[cfg(test)]
mod test {
    use std::sync::Arc;

    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::Value;

    use crate::errors::Failure;
    use crate::model::playlist::{TrackLine, UpstreamPlaylistItem};
    use crate::sources::pager::PageFetcher;
    use crate::tests::common::{build_reqwest_client, json, LogLevelTag, MemoryLogger};

    fn track(name: &str, artists: &[&str]) -> Value {
        let artists: Vec<Value> = artists.iter().map(|a| json!({ "name": a })).collect();
        json!({ "track": { "name": name, "artists": artists } })
    }

    fn line(artist: &str, song: &str) -> TrackLine {
        TrackLine { artist: artist.into(), song: song.into() }
    }

    fn pager(logger: Arc<MemoryLogger>) -> PageFetcher {
        PageFetcher::new(build_reqwest_client(), logger, "test_items")
    }

    #[tokio::test]
    async fn follows_cursor_until_null() {
        let server = MockServer::start_async().await;
        let page1 = server
            .mock_async(|when, then| {
                when.method(GET).path("/page/1").header("authorization", "Bearer tok");
                then.status(200).json_body(json!({
                    "items": [track("One", &["A"]), track("Two", &["B", "C"])],
                    "next": server.url("/page/2")
                }));
            })
            .await;
        let page2 = server
            .mock_async(|when, then| {
                when.method(GET).path("/page/2");
                then.status(200).json_body(json!({
                    "items": [track("Three", &["D"])],
                    "next": server.url("/page/3")
                }));
            })
            .await;
        let page3 = server
            .mock_async(|when, then| {
                when.method(GET).path("/page/3");
                then.status(200).json_body(json!({ "items": [track("Four", &["E"])], "next": null }));
            })
            .await;

        let logger = MemoryLogger::new();
        let tracks = pager(logger.clone())
            .fetch_all(&server.url("/page/1"), "tok", TrackLine::from_item)
            .await
            .unwrap();

        assert_eq!(
            tracks,
            vec![line("A", "One"), line("B, C", "Two"), line("D", "Three"), line("E", "Four")]
        );
        page1.assert_calls_async(1).await;
        page2.assert_calls_async(1).await;
        page3.assert_calls_async(1).await;

        let entries = logger.entries();
        let summary = entries.last().unwrap();
        assert_eq!(summary.0, LogLevelTag::Info);
        assert_eq!(summary.2.as_ref().unwrap()["pages"], json!(3));
    }

    #[tokio::test]
    async fn null_items_and_removed_tracks_are_skipped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page/1");
                then.status(200).json_body(json!({
                    "items": [
                        { "track": null },
                        track("Kept", &["A"]),
                        null,
                        {},
                        track("Also kept", &["B"])
                    ],
                    "next": null
                }));
            })
            .await;

        let tracks = pager(MemoryLogger::new())
            .fetch_all::<UpstreamPlaylistItem, _, _>(&server.url("/page/1"), "tok", TrackLine::from_item)
            .await
            .unwrap();

        assert_eq!(tracks, vec![line("A", "Kept"), line("B", "Also kept")]);
    }

    #[tokio::test]
    async fn failing_page_discards_everything() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page/1");
                then.status(200).json_body(json!({
                    "items": [track("One", &["A"])],
                    "next": server.url("/page/2")
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page/2");
                then.status(503)
                    .json_body(json!({ "error": { "status": 503, "message": "Service unavailable" } }));
            })
            .await;
        let page3 = server
            .mock_async(|when, then| {
                when.method(GET).path("/page/3");
                then.status(200).json_body(json!({ "items": [], "next": null }));
            })
            .await;

        let logger = MemoryLogger::new();
        let result = pager(logger.clone())
            .fetch_all(&server.url("/page/1"), "tok", TrackLine::from_item)
            .await;

        assert!(matches!(result, Err(Failure::Upstream { status: 503, .. })));
        page3.assert_calls_async(0).await;
        assert!(logger.entries().iter().any(|(level, _, _)| *level == LogLevelTag::Warning));
    }

    #[tokio::test]
    async fn repeated_cursor_is_rejected() {
        let server = MockServer::start_async().await;
        let page1 = server
            .mock_async(|when, then| {
                when.method(GET).path("/page/1");
                then.status(200).json_body(json!({ "items": [track("One", &["A"])], "next": server.url("/page/2") }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page/2");
                then.status(200).json_body(json!({ "items": [track("Two", &["B"])], "next": server.url("/page/1") }));
            })
            .await;

        let result = pager(MemoryLogger::new())
            .fetch_all(&server.url("/page/1"), "tok", TrackLine::from_item)
            .await;

        match result {
            Err(Failure::Generic(message)) => assert!(message.contains("repeated cursor"), "{message}"),
            other => panic!("expected protocol violation, got {other:?}"),
        }
        page1.assert_calls_async(1).await;
    }

    #[tokio::test]
    async fn malformed_page_is_generic_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page/1");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let result = pager(MemoryLogger::new())
            .fetch_all(&server.url("/page/1"), "tok", TrackLine::from_item)
            .await;

        assert!(matches!(result, Err(Failure::Generic(_))));
    }
}
