mod common;

use common::{ADMIN, ALICE};
use serde_json::{json, Value};

#[tokio::test]
async fn list_returns_seeded_catalog_by_name() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.get("/api/technologies?page=1&page_size=3", None).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let page = &body["item"];
    assert_eq!(page["total_count"], 10);
    assert_eq!(page["total_pages"], 4);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Angular", "Django", "Docker"]);
}

#[tokio::test]
async fn list_filters_by_search_and_rejects_bad_paging() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.get("/api/technologies?search=javascript", None).await;
    let body: Value = response.json().await.unwrap();
    // matched on description
    assert_eq!(body["item"]["total_count"], 4);

    let response = app.get("/api/technologies?page=0", None).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.get("/api/technologies?page_size=101", None).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .get("/api/technologies?page=9223372036854775807&page_size=100", None)
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn malformed_query_gets_json_error() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    for route in ["/api/technologies?page=abc", "/api/stacks?only_public=maybe"] {
        let response = app.get(route, None).await;
        assert_eq!(response.status().as_u16(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "Error");
        assert_eq!(body["code"], 400);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));
    }
}

#[tokio::test]
async fn suggest_ranks_prefix_matches() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app
        .post("/api/technologies", Some(ADMIN), &json!({"name": "react-native"}))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app
        .post("/api/technologies/suggest", None, &json!({"name": "Reac", "max_results": 10}))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let list = body["list"].as_array().unwrap();
    let names: Vec<&str> = list.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["React", "react-native"]);
    assert!(list.len() <= 10);
    assert!(list.iter().all(|s| s["score"].as_u64().unwrap() >= 60));
}

#[tokio::test]
async fn suggest_validates_query() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app
        .post("/api/technologies/suggest", None, &json!({"name": "R"}))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post("/api/technologies/suggest", None, &json!({"name": "React", "max_results": 0}))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn admin_path_requires_role_and_rejects_duplicates() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let body = json!({"name": "Svelte", "description": "Compiler-based UI framework"});

    let response = app.post("/api/technologies", None, &body).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.post("/api/technologies", Some(ALICE), &body).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.post("/api/technologies", Some(ADMIN), &body).await;
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["item"]["is_pre_registered"], true);

    let response = app
        .post("/api/technologies", Some(ADMIN), &json!({"name": "svelte"}))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn admin_path_reactivates_inactive_entry() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let django = app.technology_id("Django").await;
    sqlx::query("UPDATE technology SET is_active = FALSE, is_pre_registered = FALSE WHERE id = $1")
        .bind(django)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .post(
            "/api/technologies",
            Some(ADMIN),
            &json!({"name": "DJANGO", "description": "Batteries included"}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["id"], django.to_string());
    assert_eq!(body["item"]["name"], "Django");
    assert_eq!(body["item"]["description"], "Batteries included");
    assert_eq!(body["item"]["is_pre_registered"], true);
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.get("/api/technologies", Some("unknown-token")).await;
    assert_eq!(response.status().as_u16(), 401);
}
