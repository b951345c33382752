//! Tests for the Music Book client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use musicbook_client::{
    ClientConfig, ClientError, ErrorKind, FileCredentialStore, MusicBookClient, NewReview, Rating,
    Session,
};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MusicBookClient {
    MusicBookClient::new(
        ClientConfig::new(server.uri()),
        Arc::new(Session::in_memory()),
    )
    .unwrap()
}

async fn logged_in_client(server: &MockServer, token: &str) -> MusicBookClient {
    let client = client_for(server);
    client.session().set(token).await.unwrap();
    client
}

fn album_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "artists": [{"id": "art1", "name": "The Beatles"}],
        "images": [{"url": format!("https://img.example/{id}.jpg"), "width": 640, "height": 640}],
        "release_date": "1969-09-26",
        "total_tracks": 17
    })
}

fn review_json(id: i64, user: &str, rating: u8, comment: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "album": {"id": 1, "title": "Abbey Road", "spotify_id": "abc"},
        "user": user,
        "rating": rating,
        "comment": comment,
        "created_at": "2024-05-01T12:00:00Z"
    })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let result = MusicBookClient::new(ClientConfig::new(""), Arc::new(Session::in_memory()));

        match result.unwrap_err() {
            ClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = MusicBookClient::new(
            ClientConfig::new("example.com/api"),
            Arc::new(Session::in_memory()),
        );

        match result.unwrap_err() {
            ClientError::InvalidUrl(msg) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_url_is_validation_kind() {
        let err = MusicBookClient::new(ClientConfig::new(""), Arc::new(Session::in_memory()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_token_and_authorizes_later_requests() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token/"))
            .and(body_json(serde_json::json!({
                "username": "alice",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access": "tok123",
                "refresh": "refresh456"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/reviews/"))
            .and(header("Authorization", "Bearer tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tokens = client.login("alice", "secret").await.unwrap();

        assert_eq!(tokens.access, "tok123");
        assert_eq!(tokens.refresh.as_deref(), Some("refresh456"));
        assert_eq!(client.session().get().await.as_deref(), Some("tok123"));

        let reviews = client.reviews().mine().await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": "No active account found with the given credentials"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.login("alice", "wrong").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_without_access_field_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "wrong-shape"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        match client.login("alice", "secret").await.unwrap_err() {
            ClientError::Parse(_) => {}
            e => panic!("Expected Parse error, got: {:?}", e),
        }
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_is_local_and_idempotent() {
        let mock_server = MockServer::start().await;

        // Logout must never reach the backend
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        client.logout().await.unwrap();
        assert!(!client.session().is_authenticated().await);

        client.logout().await.unwrap();
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let mock_server = MockServer::start().await;

        Mock::given(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .with_priority(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spotify/search/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "albums": {"items": []}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let albums = client.catalog().search_albums("anything").await.unwrap();
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn test_token_persisted_to_file_store() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("access_token");

        Mock::given(method("POST"))
            .and(path("/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access": "persisted"
            })))
            .mount(&mock_server)
            .await;

        let session = Session::load(FileCredentialStore::new(&token_path))
            .await
            .unwrap();
        let client =
            MusicBookClient::new(ClientConfig::new(mock_server.uri()), Arc::new(session)).unwrap();
        client.login("alice", "secret").await.unwrap();

        // A fresh session over the same file sees the token
        let restored = Session::load(FileCredentialStore::new(&token_path))
            .await
            .unwrap();
        assert_eq!(restored.get().await.as_deref(), Some("persisted"));

        client.logout().await.unwrap();
        assert!(!token_path.exists());
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_search_albums_sends_query_and_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/search/"))
            .and(query_param("q", "Abbey Road"))
            .and(query_param("type", "album"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "albums": {
                    "items": [
                        album_json("0ETF", "Abbey Road"),
                        album_json("1XYZ", "Abbey Road (Remastered)")
                    ]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let albums = client.catalog().search_albums("Abbey Road").await.unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].id, "0ETF");
        assert_eq!(albums[0].artist_names(), "The Beatles");
        assert_eq!(
            albums[0].cover().map(|i| i.url.as_str()),
            Some("https://img.example/0ETF.jpg")
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_still_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/search/"))
            .and(query_param("q", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "albums": {"items": []}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(client.catalog().search_albums("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_album_details_combines_metadata_and_reviews() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/album-details/abc/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spotify_details": {
                    "id": "abc",
                    "name": "Abbey Road",
                    "artists": [{"name": "The Beatles"}],
                    "images": [{"url": "https://img.example/abc.jpg"}],
                    "genres": ["rock"],
                    "label": "Apple Records"
                },
                "local_reviews": [
                    review_json(2, "bob", 5, "Masterpiece"),
                    review_json(1, "carol", 3, "Fine")
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let details = client.catalog().album_details("abc").await.unwrap();

        assert_eq!(details.spotify_details.name, "Abbey Road");
        assert_eq!(details.spotify_details.genres, vec!["rock".to_string()]);
        assert_eq!(details.local_reviews.len(), 2);
        assert_eq!(details.local_reviews[0].user, "bob");
    }

    #[tokio::test]
    async fn test_new_releases() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/browse/new-releases/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "albums": {"items": [album_json("new1", "Fresh")]}
            })))
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let albums = client.catalog().new_releases().await.unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].name, "Fresh");
    }

    #[tokio::test]
    async fn test_artist_albums() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/artists/art1/albums/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [album_json("a", "One"), album_json("b", "Two")]
            })))
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let albums = client.catalog().artist_albums("art1").await.unwrap();
        let names: Vec<_> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }
}

// =============================================================================
// Review Tests
// =============================================================================

mod reviews {
    use super::*;

    #[tokio::test]
    async fn test_create_review_posts_exact_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reviews/"))
            .and(header("Authorization", "Bearer tok"))
            .and(body_json(serde_json::json!({
                "spotify_album_id": "abc",
                "rating": 4,
                "comment": "Great record"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(review_json(42, "alice", 4, "Great record")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let created = client
            .reviews()
            .create(&NewReview {
                spotify_album_id: "abc".into(),
                rating: Rating::new(4).unwrap(),
                comment: "Great record".into(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.rating, 4);
        assert_eq!(created.spotify_album_id(), Some("abc"));
    }

    #[tokio::test]
    async fn test_create_review_validation_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reviews/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([
                "Could not fetch or create album from Spotify"
            ])))
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let err = client
            .reviews()
            .create(&NewReview {
                spotify_album_id: "missing".into(),
                rating: Rating::default(),
                comment: String::new(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Validation { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("Could not fetch"));
            }
            e => panic!("Expected Validation error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_my_reviews_uses_user_me() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reviews/"))
            .and(query_param("user", "me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                review_json(1, "alice", 5, "Loved it")
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        let reviews = client.reviews().mine().await.unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].comment, "Loved it");
    }
}

// =============================================================================
// Error Classification Tests
// =============================================================================

mod errors {
    use super::*;

    async fn status_error(status: u16) -> ClientError {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reviews/"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "stale").await;
        client.reviews().mine().await.unwrap_err()
    }

    #[tokio::test]
    async fn test_expired_token_is_auth_kind() {
        let err = status_error(401).await;
        assert_eq!(err.kind(), ErrorKind::Auth);
        match err {
            ClientError::Unauthorized { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "nope");
            }
            e => panic!("Expected Unauthorized, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_forbidden_is_auth_kind() {
        assert_eq!(status_error(403).await.kind(), ErrorKind::Auth);
    }

    #[tokio::test]
    async fn test_server_failure_is_server_kind() {
        let err = status_error(500).await;
        match err {
            ClientError::Server { status, .. } => assert_eq!(status, 500),
            e => panic!("Expected Server error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_not_found_is_server_kind() {
        assert_eq!(status_error(404).await.kind(), ErrorKind::Server);
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reviews/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = logged_in_client(&mock_server, "tok").await;
        match client.reviews().mine().await.unwrap_err() {
            ClientError::Parse(_) => {}
            e => panic!("Expected Parse error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_kind() {
        // Bind then drop a listener to get a port nobody is serving
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = MusicBookClient::new(
            ClientConfig::new(format!("http://127.0.0.1:{port}/api")),
            Arc::new(Session::in_memory()),
        )
        .unwrap();

        let err = client.catalog().search_albums("x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
