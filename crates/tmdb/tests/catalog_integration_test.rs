//! Integration tests for the endpoint catalog against a mocked TMDb API

use cinefeed_core::TmdbConfig;
use cinefeed_tmdb::{ErrorKind, QueryParams, TimeWindow, TmdbClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TmdbClient {
    let config = TmdbConfig::new("test_key")
        .unwrap()
        .with_base_url(format!("{}/3", server.uri()));
    TmdbClient::new(config).unwrap()
}

fn movie_page() -> serde_json::Value {
    json!({
        "page": 1,
        "results": [
            {"id": 603, "title": "The Matrix", "overview": "A hacker learns the truth.", "backdrop_path": "/m.jpg"},
            {"id": 604, "title": "The Matrix Reloaded", "overview": null, "backdrop_path": null}
        ],
        "total_pages": 1,
        "total_results": 2
    })
}

#[tokio::test]
async fn test_trending_sends_credential_and_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/trending/movie/day"))
        .and(query_param("api_key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .trending(TimeWindow::Day)
        .await
        .unwrap();

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].display_title(), Some("The Matrix"));
    assert_eq!(page.results[1].overview, "");
    assert!(page.results[1].backdrop_path.is_none());
}

#[tokio::test]
async fn test_search_sends_query_and_default_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "the matrix"))
        .and(query_param("page", "1"))
        .and(query_param("api_key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_movies("the matrix", None)
        .await
        .unwrap();
    assert_eq!(page.total_results, 2);
}

#[tokio::test]
async fn test_movies_by_genre_sends_genre() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("with_genres", "878"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .movies_by_genre(878, Some(2))
        .await
        .unwrap();
    assert_eq!(page.results[0].id, 603);
}

#[tokio::test]
async fn test_movie_videos_and_credits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/603/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "results": [
                {"key": "vKQi3bBA1y8", "type": "Trailer", "site": "YouTube", "name": "Official Trailer", "official": true},
                {"key": "xyz", "type": "Featurette", "site": "YouTube"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/movie/603/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "cast": [{"id": 6384, "name": "Keanu Reeves", "character": "Neo", "order": 0}],
            "crew": [{"id": 9339, "name": "Lilly Wachowski", "job": "Director", "department": "Directing"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let videos = client.movie_videos(603).await.unwrap();
    assert_eq!(videos.results.len(), 2);
    assert_eq!(videos.results[0].name.as_deref(), Some("Official Trailer"));

    let credits = client.movie_credits(603).await.unwrap();
    assert_eq!(credits.directors().count(), 1);
    assert_eq!(credits.top_cast(5)[0].character.as_deref(), Some("Neo"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_upstream_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key.",
            "success": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).popular().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamStatus);
    assert_eq!(err.to_string(), "API Error: 401 - Unauthorized");
}

#[tokio::test]
async fn test_malformed_body_on_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/genre/movie/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).movie_genres().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedBody);
}

#[tokio::test]
async fn test_get_json_returns_raw_payload() {
    let server = MockServer::start().await;
    let body = json!({"id": 603, "imdb_id": "tt0133093", "belongs_to_collection": {"id": 2344}});

    Mock::given(method("GET"))
        .and(path("/3/movie/603/external_ids"))
        .and(query_param("api_key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server)
        .get_json("/movie/603/external_ids", QueryParams::new())
        .await
        .unwrap();
    assert_eq!(value, body);
}

#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/upcoming"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(movie_page())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = TmdbConfig::new("test_key")
        .unwrap()
        .with_base_url(format!("{}/3", server.uri()))
        .with_timeout(Duration::from_millis(200));
    let client = TmdbClient::new(config).unwrap();

    let err = client.upcoming().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let config = TmdbConfig::new("test_key")
        .unwrap()
        .with_base_url("http://127.0.0.1:1/3");
    let client = TmdbClient::new(config).unwrap();

    let err = client.top_rated().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut messages = vec![err.to_string(), format!("{:?}", err)];
    let mut source = err.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        messages.push(format!("{:?}", cause));
        source = cause.source();
    }
    messages
}

#[tokio::test]
async fn test_transport_failure_hides_credential() {
    let secret = "super-secret-key";

    let config = TmdbConfig::new(secret)
        .unwrap()
        .with_base_url("http://127.0.0.1:1/3");
    let client = TmdbClient::new(config).unwrap();
    let refused = client.featured_movie().await.unwrap_err();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let config = TmdbConfig::new(secret)
        .unwrap()
        .with_base_url(format!("{}/3", server.uri()))
        .with_timeout(Duration::from_millis(200));
    let timed_out = TmdbClient::new(config).unwrap().popular().await.unwrap_err();

    for err in [refused, timed_out] {
        assert_eq!(err.kind(), ErrorKind::Transport);
        let messages = error_chain(&err);
        assert!(messages.len() > 2);
        for message in messages {
            assert!(!message.contains(secret), "credential in error: {}", message);
        }
    }
}
