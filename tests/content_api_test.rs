mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{delete, get, login, post, put, test_app};
use hotel_backend::repository::document_store::DocumentStore;

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let resp = get(&app.router, "/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!("OK"));
}

#[tokio::test]
async fn test_banner_orders_are_sequential() {
    let app = test_app();
    let token = login(&app.router).await;
    for expected in 1..=3 {
        let resp = post(&app.router, "/api/banners", Some(&token), json!({ "title": format!("Banner {expected}"), "image": "/b.jpg" })).await;
        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(resp.body["order"], json!(expected));
    }

    let list = get(&app.router, "/api/banners", None).await;
    let orders: Vec<i64> = list.body.as_array().unwrap().iter().map(|b| b["order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_banner_defaults() {
    let app = test_app();
    let token = login(&app.router).await;
    let resp = post(&app.router, "/api/banners", Some(&token), json!({ "title": "Monsoon", "image": "/m.jpg" })).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["subtitle"], "");
    assert_eq!(resp.body["buttonText"], "Learn More");
    assert_eq!(resp.body["isActive"], true);
    assert_eq!(resp.body["page"], "home");
    assert_eq!(resp.body["images"], json!(["/m.jpg"]));
    assert!(resp.body["_id"].as_str().is_some_and(|id| id.len() == 24));
}

#[tokio::test]
async fn test_banner_without_any_image_is_rejected() {
    let app = test_app();
    let token = login(&app.router).await;
    let resp = post(&app.router, "/api/banners", Some(&token), json!({ "title": "Empty" })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["error"].is_string());
}

#[tokio::test]
async fn test_update_keeps_omitted_fields_and_created_at() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(
        &app.router,
        "/api/banners",
        Some(&token),
        json!({ "title": "Lobby", "subtitle": "Welcome", "image": "/l.jpg" }),
    )
    .await;
    let id = created.body["_id"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = put(
        &app.router,
        &format!("/api/banners/{id}"),
        Some(&token),
        json!({ "title": "Grand Lobby", "_id": "000000000000000000000000", "createdAt": "1999-01-01T00:00:00Z" }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["_id"], id.as_str());
    assert_eq!(updated.body["title"], "Grand Lobby");
    assert_eq!(updated.body["subtitle"], "Welcome");
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);
    assert_ne!(updated.body["updatedAt"], created.body["updatedAt"]);
}

#[tokio::test]
async fn test_delete_missing_banner_is_not_found() {
    let app = test_app();
    let token = login(&app.router).await;
    post(&app.router, "/api/banners", Some(&token), json!({ "title": "Keep", "image": "/k.jpg" })).await;

    let resp = delete(&app.router, "/api/banners/65f000000000000000000000", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.count("banners").await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_returns_message() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(&app.router, "/api/banners", Some(&token), json!({ "title": "Gone", "image": "/g.jpg" })).await;
    let id = created.body["_id"].as_str().unwrap();

    let resp = delete(&app.router, &format!("/api/banners/{id}"), Some(&token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["success"], true);
    assert_eq!(app.store.count("banners").await.unwrap(), 0);
    assert_eq!(get(&app.router, &format!("/api/banners/{id}"), None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_testimonial_defaults() {
    let app = test_app();
    let token = login(&app.router).await;
    let resp = post(&app.router, "/api/testimonials", Some(&token), json!({ "name": "Asha", "quote": "Lovely stay" })).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["role"], "");
    assert_eq!(resp.body["rating"], 5);
    assert_eq!(resp.body["isActive"], true);
    assert_eq!(resp.body["order"], 1);
}

#[tokio::test]
async fn test_testimonial_update_acknowledges() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(&app.router, "/api/testimonials", Some(&token), json!({ "name": "Asha", "quote": "Lovely" })).await;
    let id = created.body["_id"].as_str().unwrap();

    let resp = put(&app.router, &format!("/api/testimonials/{id}"), Some(&token), json!({ "isActive": false })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["success"], true);

    let active = get(&app.router, "/api/testimonials?active=true", None).await;
    assert_eq!(active.body, json!([]));
}

#[tokio::test]
async fn test_malformed_ids_are_bad_requests() {
    let app = test_app();
    let token = login(&app.router).await;
    for base in ["/api/testimonials", "/api/proposals", "/api/banquet-gallery"] {
        let resp = get(&app.router, &format!("{base}/not-an-id"), Some(&token)).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{base}");
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = test_app();
    let token = login(&app.router).await;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/testimonials")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ \"name\": "))
        .unwrap();
    let resp = common::send(&app.router, req).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_malformed_query_is_a_bad_request() {
    let app = test_app();
    for uri in ["/api/banners?page=contact", "/api/testimonials?active=yes", "/api/banquet-gallery?active=1x"] {
        let resp = get(&app.router, uri, None).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(resp.body["error"], "Invalid query string", "{uri}");
    }
}

#[tokio::test]
async fn test_blog_sections_are_sanitised() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(
        &app.router,
        "/api/blog",
        Some(&token),
        json!({ "title": "Monsoon menu", "author": "Chef", "category": "Food" }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["status"], "draft");
    let id = created.body["_id"].as_str().unwrap();

    let updated = put(
        &app.router,
        &format!("/api/blog/{id}"),
        Some(&token),
        json!({ "sections": [{ "title": "A", "descriptions": ["x", 5, "y"] }] }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["sections"], json!([{ "title": "A", "descriptions": ["x", "y"] }]));
    assert_eq!(updated.body["author"], "Chef");
}

#[tokio::test]
async fn test_blog_list_filters_by_status() {
    let app = test_app();
    let token = login(&app.router).await;
    for status in ["published", "draft"] {
        post(
            &app.router,
            "/api/blog",
            Some(&token),
            json!({ "title": status, "author": "A", "category": "News", "status": status }),
        )
        .await;
    }
    let published = get(&app.router, "/api/blog?status=published", None).await;
    let titles: Vec<&str> = published.body.as_array().unwrap().iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["published"]);
}

#[tokio::test]
async fn test_gallery_crud() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(&app.router, "/api/banquet-gallery", Some(&token), json!({ "image": "/hall.jpg" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["order"], 1);
    assert_eq!(created.body["title"], "");
    let id = created.body["_id"].as_str().unwrap();

    let resp = put(&app.router, &format!("/api/banquet-gallery/{id}"), Some(&token), json!({ "title": "Main hall" })).await;
    assert_eq!(resp.status, StatusCode::OK);
    let fetched = get(&app.router, &format!("/api/banquet-gallery/{id}"), None).await;
    assert_eq!(fetched.body["title"], "Main hall");
    assert_eq!(fetched.body["image"], "/hall.jpg");
}

#[tokio::test]
async fn test_proposal_submission_is_public_and_pending() {
    let app = test_app();
    let resp = post(
        &app.router,
        "/api/proposals",
        None,
        json!({
            "firstName": "Ravi", "lastName": "Kumar", "email": "ravi@example.com", "phone": "98200",
            "eventType": "Wedding", "guestCount": 200, "status": "confirmed"
        }),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["status"], "pending");
    assert_eq!(resp.body["alcoholRequired"], "No");

    assert_eq!(get(&app.router, "/api/proposals", None).await.status, StatusCode::UNAUTHORIZED);
    let token = login(&app.router).await;
    let list = get(&app.router, "/api/proposals", Some(&token)).await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}
