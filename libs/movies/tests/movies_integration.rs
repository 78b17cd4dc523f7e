//! Integration tests for the movie client, list view and form flows
//!
//! The movies and upload APIs are served by a mock server.

use std::sync::Arc;

use auth::{SessionManager, SessionScope, models::Session};
use common::{
    ClientConfig, ClientError, HttpClient, KeyValueStore, MemoryNavigator, MemoryStore, Navigator,
    Route,
};
use movies::{
    DeleteOutcome, MovieBrowser, MovieClient, MovieEditor, MovieForm, MovieInput, MovieQuery,
    validation::current_year,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use upload::UploadClient;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

struct Harness {
    movies: MovieClient,
    editor: MovieEditor,
    navigator: Arc<MemoryNavigator>,
    durable: Arc<MemoryStore>,
    session: Arc<MemoryStore>,
}

fn harness(server: &MockServer, route: Route) -> Harness {
    let durable = Arc::new(MemoryStore::new());
    let session = Arc::new(MemoryStore::new());
    let sessions = Arc::new(SessionManager::new(durable.clone(), session.clone()));
    sessions
        .persist(&sample_session(), SessionScope::Durable)
        .unwrap();

    let navigator = Arc::new(MemoryNavigator::new(&route));
    let config = ClientConfig::with_base_url(&server.uri()).unwrap();
    let http = HttpClient::new(&config, sessions.clone(), navigator.clone()).unwrap();
    let upload_http =
        HttpClient::with_base_url(&config.upload_url, &config, sessions, navigator.clone())
            .unwrap();

    let movies = MovieClient::new(http);
    let editor = MovieEditor::new(
        movies.clone(),
        UploadClient::new(upload_http, config.max_upload_bytes),
    );

    Harness {
        movies,
        editor,
        navigator,
        durable,
        session,
    }
}

fn sample_session() -> Session {
    serde_json::from_value(json!({
        "accessToken": "t1",
        "user": {
            "id": "u1",
            "email": "jane@example.com",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }
    }))
    .unwrap()
}

fn movie(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "publishYear": 1979,
        "imageURL": format!("http://img.example.com/{}.png", id),
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

fn input(year: i32) -> MovieInput {
    MovieInput {
        title: "Alien".to_string(),
        publish_year: year,
        image_url: "http://img.example.com/m1.png".to_string(),
    }
}

#[tokio::test]
async fn test_create_rejects_out_of_range_years_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/movies"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"movie": movie("m1", "Alien")})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(&server, Route::CreateMovie);
    let latest = current_year() + 1;

    for year in [0, 1066, 1887, latest + 1, latest + 50] {
        let err = h.movies.create(&input(year)).await.unwrap_err();
        let errors = err.validation().unwrap();
        assert!(errors.get("publishYear").is_some(), "year {}", year);
    }

    for year in [1888, latest] {
        let created = h.movies.create(&input(year)).await.unwrap();
        assert_eq!(created.id, "m1");
    }
}

#[tokio::test]
async fn test_update_rejects_out_of_range_years_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/movies/m1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"movie": movie("m1", "Alien")})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(&server, Route::EditMovie("m1".to_string()));
    let latest = current_year() + 1;

    for year in [0, 1066, 1887, latest + 1, latest + 50] {
        let err = h.movies.update("m1", &input(year)).await.unwrap_err();
        let errors = err.validation().unwrap();
        assert!(errors.get("publishYear").is_some(), "year {}", year);
    }

    for year in [1888, latest] {
        let updated = h.movies.update("m1", &input(year)).await.unwrap();
        assert_eq!(updated.id, "m1");
    }
}

#[tokio::test]
async fn test_get_one_wrapped_and_flat_are_identical() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "statusCode": 200,
            "message": "Movie fetched",
            "data": {"movie": movie("m1", "Alien"), "message": "x"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movies/m2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"movie": movie("m1", "Alien"), "message": "x"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let wrapped = h.movies.get_one("m1").await.unwrap();
    let flat = h.movies.get_one("m2").await.unwrap();

    assert_eq!(wrapped, flat);
    assert_eq!(wrapped.movie.title, "Alien");
    assert_eq!(wrapped.message.as_deref(), Some("x"));
}

#[tokio::test]
async fn test_list_sends_query_and_derives_total_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "8"))
        .and(query_param("search", "alien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m9", "Aliens")],
            "total": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let query = MovieQuery::new(2, 8).with_search(Some("alien".to_string()));
    let page = h.movies.list(&query).await.unwrap();

    assert_eq!(page.movies.len(), 1);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_browser_ignores_pages_out_of_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m1", "Alien"), movie("m2", "Aliens")],
            "total": 2,
            "page": 1,
            "limit": 8,
            "totalPages": 1
        })))
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let mut browser = MovieBrowser::new(h.movies.clone(), 8);
    browser.load().await.unwrap();

    assert!(!browser.go_to_page(0).await.unwrap());
    assert!(!browser.go_to_page(2).await.unwrap());
    assert!(!browser.next().await.unwrap());
    assert!(!browser.previous().await.unwrap());

    assert_eq!(browser.pagination().page, 1);
    assert_eq!(browser.movies().len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_refetches_and_decrements_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m1", "Alien"), movie("m2", "Aliens")],
            "total": 2
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m2", "Aliens")],
            "total": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/movies/m1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Movie deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let mut browser = MovieBrowser::new(h.movies.clone(), 8);
    browser.load().await.unwrap();
    assert_eq!(browser.pagination().total, 2);

    let message = browser.delete("m1").await.unwrap();

    assert_eq!(message.as_deref(), Some("Movie deleted"));
    assert_eq!(browser.pagination().total, 1);
    assert!(browser.movies().iter().all(|m| m.id != "m1"));
}

#[tokio::test]
async fn test_delete_steps_back_from_emptied_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m9", "Last")],
            "total": 9
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"movies": [], "total": 8})),
        )
        .mount(&server)
        .await;

    let first_page: Vec<Value> = (1..=8).map(|i| movie(&format!("m{}", i), "Movie")).collect();
    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"movies": first_page, "total": 8})),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/movies/m9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let mut browser = MovieBrowser::new(h.movies.clone(), 8);
    browser.open(2).await.unwrap();
    assert_eq!(browser.pagination().total_pages(), 2);

    let message = browser.delete("m9").await.unwrap();

    assert_eq!(message, None);
    assert_eq!(browser.pagination().page, 1);
    assert_eq!(browser.pagination().total_pages(), 1);
    assert_eq!(browser.movies().len(), 8);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m1", "Alien")],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/movies/m1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let mut browser = MovieBrowser::new(h.movies.clone(), 8);
    browser.load().await.unwrap();

    let mut asked = None;
    let outcome = browser
        .delete_with_confirmation("m1", |movie| {
            asked = Some(movie.title.clone());
            false
        })
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(asked.as_deref(), Some("Alien"));
    assert_eq!(browser.movies().len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_of_movie_off_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies/m7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"movie": movie("m7", "Heat")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/movies/m7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Movie deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movies": [], "total": 0})))
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let mut browser = MovieBrowser::new(h.movies.clone(), 8);

    let outcome = browser
        .delete_with_confirmation("m7", |movie| movie.title == "Heat")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            title: "Heat".to_string(),
            message: Some("Movie deleted".to_string()),
        }
    );
    assert_eq!(browser.pagination().total, 0);
}

#[tokio::test]
async fn test_next_on_last_possible_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [movie("m1", "Alien")],
            "total": u64::MAX,
            "page": u32::MAX,
            "limit": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let mut browser = MovieBrowser::new(h.movies.clone(), 1);
    browser.load().await.unwrap();

    assert_eq!(browser.pagination().page, u32::MAX);
    assert!(!browser.next().await.unwrap());
}

#[tokio::test]
async fn test_unauthorized_on_movies_clears_storage_and_redirects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, Route::Movies);
    let err = h.movies.list(&MovieQuery::new(1, 8)).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert_eq!(h.durable.get("accessToken").unwrap(), None);
    assert_eq!(h.durable.get("user").unwrap(), None);
    assert_eq!(h.session.get("accessToken").unwrap(), None);
    assert_eq!(h.navigator.current_path(), "/login");
}

#[tokio::test]
async fn test_update_without_new_image_keeps_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movie": movie("m1", "Alien")})))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/movies/m1"))
        .and(body_json(json!({
            "title": "Alien: Director's Cut",
            "publishYear": 1979,
            "imageURL": "http://img.example.com/m1.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"movie": movie("m1", "Alien: Director's Cut")}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/upload/image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imageURL": "/x.png"})))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, Route::EditMovie("m1".to_string()));
    let (_, mut form) = h.editor.open("m1").await.unwrap();
    form.title = "Alien: Director's Cut".to_string();

    let updated = h.editor.update("m1", form, None).await.unwrap();
    assert_eq!(updated.title, "Alien: Director's Cut");
}

#[tokio::test]
async fn test_create_uploads_image_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/image"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"imageURL": "/uploads/poster.png"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/movies"))
        .and(body_json(json!({
            "title": "Alien",
            "publishYear": 1979,
            "imageURL": format!("{}/uploads/poster.png", server.uri())
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"movie": movie("m1", "Alien")})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("poster.png");
    std::fs::write(&file, PNG).unwrap();

    let h = harness(&server, Route::CreateMovie);
    let form = MovieForm {
        title: "Alien".to_string(),
        publish_year: "1979".to_string(),
        image_url: None,
    };

    let created = h.editor.create(form, Some(&file)).await.unwrap();
    assert_eq!(created.id, "m1");
}

#[tokio::test]
async fn test_create_with_bad_details_skips_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imageURL": "/x.png"})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("poster.png");
    std::fs::write(&file, PNG).unwrap();

    let h = harness(&server, Route::CreateMovie);
    let form = MovieForm {
        title: String::new(),
        publish_year: "1700".to_string(),
        image_url: None,
    };

    let err = h.editor.create(form, Some(&file)).await.unwrap_err();
    let errors = err.validation().unwrap();
    assert!(errors.get("title").is_some());
    assert!(errors.get("publishYear").is_some());
}
