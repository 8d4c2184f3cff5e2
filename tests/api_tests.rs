use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use showmatch_api::{
    db::InMemoryCatalog,
    models::{Genre, PersonRole, Show},
    routes::{create_router, AppState},
};

fn genre(id: i64, name: &str) -> Genre {
    Genre {
        id,
        name: name.to_string(),
    }
}

fn lead(person_id: i64, name: &str) -> PersonRole {
    PersonRole {
        person_id,
        name: name.to_string(),
        role: "cast".to_string(),
        character_name: None,
        main_cast: true,
        image_medium: None,
    }
}

fn show(id: i64, name: &str, genres: Vec<Genre>, people: Vec<PersonRole>) -> Show {
    Show {
        id,
        name: name.to_string(),
        show_type: Some("Scripted".to_string()),
        language: Some("English".to_string()),
        status: Some("Ended".to_string()),
        rating: Some(8.0),
        weight: Some(90.0 - id as f64),
        genres,
        people,
        ..Default::default()
    }
}

fn catalog() -> InMemoryCatalog {
    let drama = genre(1, "Drama");
    let crime = genre(2, "Crime");
    let comedy = genre(3, "Comedy");

    InMemoryCatalog::new(vec![
        show(
            1,
            "Breaking Bad",
            vec![drama.clone(), crime.clone()],
            vec![lead(100, "Bryan Cranston")],
        ),
        show(2, "The Wire", vec![drama.clone(), crime.clone()], vec![]),
        show(3, "Malcolm in the Middle", vec![comedy.clone()], vec![lead(100, "Bryan Cranston")]),
        show(4, "Parks and Recreation", vec![comedy], vec![]),
        show(5, "Mad Men", vec![drama.clone()], vec![]),
        show(6, "Ozark", vec![drama.clone(), crime.clone()], vec![]),
        show(7, "Narcos", vec![crime.clone()], vec![]),
        show(8, "Fargo", vec![drama.clone(), crime], vec![]),
        show(9, "The Crown", vec![drama], vec![]),
    ])
}

fn create_test_server() -> TestServer {
    let state = AppState::new(Arc::new(catalog()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn ids(body: &Value) -> Vec<i64> {
    body["shows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|show| show["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_returns_matching_shows() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/shows/search")
        .add_query_param("query", "the")
        .await;

    response.assert_status_ok();
    let shows: Vec<Value> = response.json();
    let names: Vec<&str> = shows.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Malcolm in the Middle", "The Crown", "The Wire"]);
    assert_eq!(shows[2]["genres"], json!(["Drama", "Crime"]));
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/shows/search")
        .add_query_param("query", "  ")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_recommendations_response_shape() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [1], "limit": 3 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["hasMore"], true);

    let shows = body["shows"].as_array().unwrap();
    assert_eq!(shows.len(), 3);
    for show in shows {
        assert!(show["match_score"].as_u64().unwrap() <= 100);
        assert!(show["recommendation_reasons"].is_array());
        let criteria = show["criteria_scores"].as_object().unwrap();
        assert_eq!(criteria.len(), 9);
    }

    let scores: Vec<u64> = shows
        .iter()
        .map(|s| s["match_score"].as_u64().unwrap())
        .collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);
}

#[tokio::test]
async fn test_recommendations_exclude_seeds_and_unrelated_shows() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [1, 2], "limit": 24 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let ids = ids(&body);
    assert!(!ids.contains(&1));
    assert!(!ids.contains(&2));
    // Parks and Recreation shares neither a genre nor a person with the seeds
    assert!(!ids.contains(&4));
    // Malcolm in the Middle is reached through the shared lead actor
    assert!(ids.contains(&3));
    assert_eq!(ids.len(), 6);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_recommendations_paginate_without_overlap() {
    let server = create_test_server();

    let first: Value = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [1], "limit": 4, "page": 1 }))
        .await
        .json();
    let second: Value = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [1], "limit": 4, "page": 2 }))
        .await
        .json();

    assert_eq!(first["hasMore"], true);
    assert_eq!(second["hasMore"], false);
    assert_eq!(second["page"], 2);

    let first_ids = ids(&first);
    let second_ids = ids(&second);
    assert_eq!(first_ids.len(), 4);
    assert_eq!(second_ids.len(), 3);
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
}

#[tokio::test]
async fn test_recommendations_are_deterministic() {
    let server = create_test_server();
    let request = json!({ "shows": [1, 3] });

    let a: Value = server
        .post("/api/v1/shows/recommendations")
        .json(&request)
        .await
        .json();
    let b: Value = server
        .post("/api/v1/shows/recommendations")
        .json(&request)
        .await
        .json();

    assert_eq!(a, b);
}

#[tokio::test]
async fn test_recommendations_reject_empty_selection() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_reject_oversized_limit() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [1], "limit": 500 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_seeds_yield_empty_page() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/shows/recommendations")
        .json(&json!({ "shows": [999] }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["shows"], json!([]));
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c1a52-4a4e-4d59-9c3e-2a4e7e9f0b11";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server();

    let response = server.get("/health").await;

    let header = response.header("x-request-id");
    assert_eq!(header.to_str().unwrap().len(), 36);
}
