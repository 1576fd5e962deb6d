use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::future::IntoFuture;
use std::sync::Arc;

use moodflix_api::models::{Movie, MovieId, NO_RECOMMENDATIONS};
use moodflix_api::routes::{create_router, AppState};
use moodflix_api::services::{Catalog, CategoryTable, Recommender};

fn movie(id: i64, overview: &str, genres: &str, release_date: &str) -> Movie {
    Movie::new(
        MovieId(id),
        format!("Movie {}", id),
        overview.to_string(),
        genres.to_string(),
        String::new(),
        String::new(),
        release_date.to_string(),
    )
}

fn create_test_server() -> TestServer {
    create_seeded_server(7)
}

fn create_seeded_server(seed: u64) -> TestServer {
    let primary = Catalog::from_movies(vec![
        movie(1, "A Secret Agent on a mission", "Action|Thriller", "2022-05-01"),
        movie(2, "Two friends on a road trip", "Comedy|Adventure", "2019-01-01"),
        movie(3, "An Astronaut lost in deep space", "Drama|Science Fiction", "2015-10-02"),
        movie(4, "A love letter", "Romance|Drama", "2003-02-14"),
        movie(5, "A family of bears", "Family|Animation", "2021-07-30"),
    ]);
    let top_rated = Catalog::from_movies(vec![
        movie(278, "Two imprisoned men bond", "Drama|Crime", "1994-09-23"),
        movie(238, "The aging patriarch", "Drama|Crime", "1972-03-14"),
    ]);
    let recommender = Recommender::new(primary, top_rated, CategoryTable::builtin().unwrap());

    let state = Arc::new(AppState::new(recommender, 30, Some(seed)));
    TestServer::new(create_router(state)).unwrap()
}

fn ids(body: &Value) -> HashSet<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_empty_body_returns_whole_catalog() {
    let server = create_test_server();
    let response = server.post("/recommend").json(&json!({})).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), HashSet::from([1, 2, 3, 4, 5]));
}

#[tokio::test]
async fn test_questionnaire_filters() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({
            "mood": "Happy",
            "genre": ["Comedy", "Family"],
            "occasion": "",
            "age": "Published in the last 5 years",
            "category": []
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), HashSet::from([2, 5]));
}

#[tokio::test]
async fn test_category_as_string() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "category": "Spy Movies" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), HashSet::from([1]));
}

#[tokio::test]
async fn test_top_rated_category_uses_second_catalog() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "category": ["IMDb Top 250 Movies"], "mood": "Sad" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), HashSet::from([278, 238]));
}

#[tokio::test]
async fn test_no_match_returns_sentinel() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "genre": ["Western"] }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([NO_RECOMMENDATIONS]));
}

#[tokio::test]
async fn test_num_recommendations_limits_sample() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "num_recommendations": 2 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body).len(), 2);
}

#[tokio::test]
async fn test_null_fields_are_ignored() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "mood": null, "genre": null, "category": null }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body).len(), 5);
}

#[tokio::test]
async fn test_non_list_genre_is_server_error() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "genre": "Comedy" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_json_body_is_server_error() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .text("mood=Happy")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let request_id = "5f0c6e2e-8a51-4b8e-9a3c-3a1f4f3f9b10";
    let response = server
        .post("/recommend")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .json(&json!({}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.headers().get("x-request-id").unwrap(), request_id);
}

#[tokio::test]
async fn test_list_categories() {
    let server = create_test_server();
    let response = server.get("/categories").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["top_rated"], "IMDb Top 250 Movies");
    let names: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(names.contains(&"Heist Movies"));
    assert!(names.contains(&"Spy Movies and Cop Movies"));
}

#[tokio::test]
async fn test_seeded_servers_answer_alike() {
    let first = create_seeded_server(42);
    let second = create_seeded_server(42);

    for _ in 0..3 {
        let a: Value = first
            .post("/recommend")
            .json(&json!({ "num_recommendations": 2 }))
            .await
            .json();
        let b: Value = second
            .post("/recommend")
            .json(&json!({ "num_recommendations": 2 }))
            .await
            .json();
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn test_concurrent_requests_all_succeed() {
    let server = create_test_server();

    let (a, b) = tokio::join!(
        server
            .post("/recommend")
            .json(&json!({ "mood": "Happy" }))
            .into_future(),
        server
            .post("/recommend")
            .json(&json!({ "mood": "Sad" }))
            .into_future(),
    );

    a.assert_status_ok();
    b.assert_status_ok();
    assert_eq!(ids(&a.json()), HashSet::from([2, 5]));
    assert_eq!(ids(&b.json()), HashSet::from([3, 4]));
}
