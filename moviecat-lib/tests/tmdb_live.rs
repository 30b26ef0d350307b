//! Live tests against the real TMDB API.
//!
//! These tests need a TMDB API key and are ignored by default. To run them,
//! create a `.env` file in the moviecat-lib directory with:
//!
//! ```env
//! TMDB_API_KEY=your-v3-api-key
//! ```
//!
//! Then run: `cargo test -p moviecat-lib -- --ignored`

use std::env;

use moviecat_lib::TmdbClient;
use moviecat_lib::api::MovieApi;
use moviecat_lib::model::TimeWindow;

fn load_api_key() -> Option<String> {
    let _ = dotenvy::dotenv();
    env::var("TMDB_API_KEY").ok()
}

fn client() -> TmdbClient {
    let key = load_api_key().expect("Missing TMDB_API_KEY. See module docs.");
    TmdbClient::builder().api_key(key).build().unwrap()
}

#[tokio::test]
#[ignore = "requires TMDB_API_KEY in .env file"]
async fn test_fetch_trending() {
    for window in TimeWindow::ALL {
        let page = client().fetch_trending(window, "en-US").await.unwrap();
        assert_eq!(page.page, 1);
        assert!(!page.results.is_empty());
    }
}

#[tokio::test]
#[ignore = "requires TMDB_API_KEY in .env file"]
async fn test_fetch_details() {
    let details = client().fetch_details(550).await.unwrap();
    assert_eq!(details.id, 550);
    assert_eq!(details.title, "Fight Club");
    assert!(details.runtime.is_some());
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_bad_key_is_unauthorized() {
    let client = TmdbClient::builder().api_key("invalid").build().unwrap();
    let err = client.fetch_details(550).await.unwrap_err();
    assert!(err.is_unauthorized(), "got {:?}", err);
}
