mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{delete, get, login, post, put, test_app};

#[tokio::test]
async fn test_guest_booking_flow() {
    let app = test_app();
    let created = post(
        &app.router,
        "/api/bookings",
        None,
        json!({
            "roomId": 3, "roomName": "Deluxe", "firstName": "Arjun", "email": "arjun@example.com",
            "checkIn": "2024-03-01", "checkOut": "2024-03-03", "guests": 2, "arrivalNote": "late"
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["roomId"], "3");
    assert_eq!(created.body["status"], "pending");
    assert_eq!(created.body["arrivalNote"], "late");
    let id = created.body["_id"].as_str().unwrap().to_string();

    assert_eq!(get(&app.router, "/api/bookings", None).await.status, StatusCode::UNAUTHORIZED);

    let token = login(&app.router).await;
    let updated = put(&app.router, &format!("/api/bookings/{id}"), Some(&token), json!({ "status": "confirmed" })).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["status"], "confirmed");
    assert_eq!(updated.body["firstName"], "Arjun");

    let confirmed = get(&app.router, "/api/bookings?status=confirmed", Some(&token)).await;
    assert_eq!(confirmed.body.as_array().unwrap().len(), 1);

    assert_eq!(delete(&app.router, &format!("/api/bookings/{id}"), Some(&token)).await.status, StatusCode::OK);
    assert_eq!(get(&app.router, "/api/bookings/not-an-id", Some(&token)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_requires_contact_fields() {
    let app = test_app();
    let resp = post(&app.router, "/api/bookings", None, json!({ "roomId": "3", "email": "not-an-email" })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_restaurant_booking_flow() {
    let app = test_app();
    let created = post(
        &app.router,
        "/api/restaurant-bookings",
        None,
        json!({
            "restaurantId": "1", "restaurantName": "Urban Dhaba", "restaurantSlug": "urban-dhaba",
            "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "2024-03-01", "time": "19:30", "guests": 4
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["date"], "2024-03-01T00:00:00Z");
    let id = created.body["_id"].as_str().unwrap().to_string();

    let token = login(&app.router).await;
    let ack = put(
        &app.router,
        &format!("/api/restaurant-bookings/{id}"),
        Some(&token),
        json!({ "status": "cancelled", "date": "2024-03-02" }),
    )
    .await;
    assert_eq!(ack.status, StatusCode::OK);
    assert_eq!(ack.body["success"], true);

    let fetched = get(&app.router, &format!("/api/restaurant-bookings/{id}"), Some(&token)).await;
    assert_eq!(fetched.body["status"], "cancelled");
    assert_eq!(fetched.body["date"], "2024-03-02T00:00:00Z");
    assert_eq!(fetched.body["guests"], 4);
}

#[tokio::test]
async fn test_restaurant_booking_needs_guests() {
    let app = test_app();
    let resp = post(
        &app.router,
        "/api/restaurant-bookings",
        None,
        json!({
            "restaurantId": "1", "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "2024-03-01", "time": "19:30"
        }),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_bookings_always_start_pending() {
    let app = test_app();
    let room = post(
        &app.router,
        "/api/bookings",
        None,
        json!({ "roomId": "3", "firstName": "Arjun", "email": "arjun@example.com", "status": "confirmed" }),
    )
    .await;
    assert_eq!(room.status, StatusCode::CREATED, "{}", room.body);
    assert_eq!(room.body["status"], "pending");

    let table = post(
        &app.router,
        "/api/restaurant-bookings",
        None,
        json!({
            "restaurantId": "1", "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "2024-03-01", "time": "19:30", "guests": 2, "status": "confirmed"
        }),
    )
    .await;
    assert_eq!(table.status, StatusCode::CREATED, "{}", table.body);
    assert_eq!(table.body["status"], "pending");

    let token = login(&app.router).await;
    let confirmed = get(&app.router, "/api/bookings?status=confirmed", Some(&token)).await;
    assert_eq!(confirmed.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_booking_accepts_numbers_sent_as_text() {
    let app = test_app();
    let created = post(
        &app.router,
        "/api/bookings",
        None,
        json!({
            "roomId": "3", "firstName": "Arjun", "email": "arjun@example.com",
            "guests": "2", "totalAmount": "4500"
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["guests"], 2);
    assert_eq!(created.body["totalAmount"], 4500.0);

    let table = post(
        &app.router,
        "/api/restaurant-bookings",
        None,
        json!({
            "restaurantId": "1", "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "2024-03-01", "time": "19:30", "guests": "4"
        }),
    )
    .await;
    assert_eq!(table.status, StatusCode::CREATED, "{}", table.body);
    assert_eq!(table.body["guests"], 4);
}

#[tokio::test]
async fn test_bad_status_filter_uses_error_body() {
    let app = test_app();
    let token = login(&app.router).await;
    let resp = get(&app.router, "/api/bookings?status=maybe", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "Invalid query string");
    assert!(resp.body["details"].is_string());
}
