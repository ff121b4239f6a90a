mod common;

use axum::http::StatusCode;
use bson::{doc, oid::ObjectId};
use serde_json::json;

use common::{get, login, post, put, test_app};

#[tokio::test]
async fn test_restaurant_lookup_by_number_and_slug() {
    let app = test_app();
    let token = login(&app.router).await;
    post(&app.router, "/api/restaurants", Some(&token), json!({ "name": "Sea Salt", "cuisine": "Coastal" })).await;
    let created = post(&app.router, "/api/restaurants", Some(&token), json!({ "name": "Urban Dhaba", "cuisine": "North Indian" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], 2);
    assert_eq!(created.body["slug"], "urban-dhaba");

    let by_number = get(&app.router, "/api/restaurants/2", None).await;
    assert_eq!(by_number.status, StatusCode::OK);
    assert_eq!(by_number.body["name"], "Urban Dhaba");

    let by_slug = get(&app.router, "/api/restaurants/urban-dhaba", None).await;
    assert_eq!(by_slug.body["id"], 2);

    assert_eq!(get(&app.router, "/api/restaurants/nowhere", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restaurant_numeric_key_falls_back_to_store_id() {
    let app = test_app();
    app.store
        .seed("restaurants", doc! { "_id": "2", "name": "Legacy Grill", "slug": "legacy-grill", "cuisine": "Grill" })
        .await;
    let resp = get(&app.router, "/api/restaurants/2", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Legacy Grill");
}

#[tokio::test]
async fn test_restaurant_menu_is_sanitised() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(
        &app.router,
        "/api/restaurants",
        Some(&token),
        json!({
            "name": "Urban Dhaba", "cuisine": "North Indian",
            "menu": {
                "Mains": [{ "name": "Dal Makhani", "price": 320, "isVeg": true }, { "price": 10 }],
                "Drinks": "not a list"
            }
        }),
    )
    .await;
    assert_eq!(created.body["menu"], json!({ "Mains": [{ "name": "Dal Makhani", "price": 320.0, "isVeg": true }] }));
}

#[tokio::test]
async fn test_duplicate_restaurant_slug_is_rejected() {
    let app = test_app();
    let token = login(&app.router).await;
    post(&app.router, "/api/restaurants", Some(&token), json!({ "name": "Urban Dhaba", "cuisine": "x" })).await;
    let again = post(&app.router, "/api/restaurants", Some(&token), json!({ "name": "Urban Dhaba", "cuisine": "y" })).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_room_lookup_by_app_id_and_store_id() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(&app.router, "/api/rooms", Some(&token), json!({ "id": "3", "title": "Deluxe", "view": "sea" })).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let by_id = get(&app.router, "/api/rooms/3", None).await;
    assert_eq!(by_id.status, StatusCode::OK);
    assert_eq!(by_id.body["title"], "Deluxe");
    assert_eq!(by_id.body["view"], "sea");

    let legacy = ObjectId::new();
    app.store.seed("rooms", doc! { "_id": legacy, "title": "Old Wing" }).await;
    let by_store_id = get(&app.router, &format!("/api/rooms/{}", legacy.to_hex()), None).await;
    assert_eq!(by_store_id.status, StatusCode::OK);
    assert_eq!(by_store_id.body["title"], "Old Wing");
}

#[tokio::test]
async fn test_room_guests_may_be_a_number() {
    let app = test_app();
    let token = login(&app.router).await;
    let created = post(&app.router, "/api/rooms", Some(&token), json!({ "id": "5", "title": "Family Suite", "guests": 4 })).await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["guests"], "4");

    let updated = put(&app.router, "/api/rooms/5", Some(&token), json!({ "guests": 6 })).await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.body["guests"], "6");
}

#[tokio::test]
async fn test_room_update_keeps_legacy_fields() {
    let app = test_app();
    let token = login(&app.router).await;
    app.store
        .seed("rooms", doc! { "_id": "legacy-7", "title": "Old Wing", "floor": 2, "createdAt": "2020-01-01" })
        .await;

    let resp = put(&app.router, "/api/rooms/legacy-7", Some(&token), json!({ "title": "Heritage Wing", "id": "other" })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["title"], "Heritage Wing");
    assert_eq!(resp.body["floor"], 2);
    assert_eq!(resp.body["createdAt"], "2020-01-01");
    assert!(resp.body.get("id").is_none());
}
