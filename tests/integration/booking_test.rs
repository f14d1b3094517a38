//! Integration tests for the booking and seat endpoints.

mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use boxoffice_database::store::MemoryResourceStore;
use boxoffice_entity::booking::Booking;
use boxoffice_entity::seat::{Seat, SeatStatus};

#[tokio::test]
async fn test_book_available_seat() {
    let app = helpers::TestApp::with_seats(3).await;

    let response = app.book(2, 42).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["seat_id"], 2);
    assert_eq!(response.body["data"]["user_id"], 42);
    assert_eq!(app.store.booking_count(), 1);
}

#[tokio::test]
async fn test_second_requester_is_contended() {
    let app = helpers::TestApp::with_seats(1).await;

    assert_eq!(app.book(1, 1).await.status, StatusCode::CREATED);
    let response = app.book(1, 2).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONTENDED");
    assert_eq!(response.body["retryable"], false);
    assert_eq!(app.store.booking_count(), 1);
}

#[tokio::test]
async fn test_booked_seat_without_claim_is_conflict() {
    let seat = Seat {
        id: 7,
        row_number: "C".to_string(),
        seat_number: 7,
        status: SeatStatus::Booked,
        price: 2000,
    };
    let booking = Booking {
        id: 1,
        seat_id: 7,
        user_id: 99,
        created_at: Utc::now(),
    };
    let app =
        helpers::TestApp::with_store(MemoryResourceStore::restore(vec![seat], vec![booking])).await;

    let response = app.book(7, 5).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(app.store.booking_count(), 1);
}

#[tokio::test]
async fn test_unknown_seat() {
    let app = helpers::TestApp::with_seats(1).await;

    let response = app.book(404, 1).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_concurrent_requests_single_winner() {
    let app = helpers::TestApp::with_seats(1).await;

    let attempts = (1..=20).map(|user_id| app.book(1, user_id));
    let responses = futures::future::join_all(attempts).await;

    let created = responses
        .iter()
        .filter(|r| r.status == StatusCode::CREATED)
        .count();
    let refused = responses
        .iter()
        .filter(|r| r.status == StatusCode::CONFLICT)
        .count();
    assert_eq!(created, 1);
    assert_eq!(refused, 19);
    assert_eq!(app.store.booking_count(), 1);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = helpers::TestApp::with_seats(1).await;

    let response = app
        .request("POST", "/api/bookings", Some(json!({ "seat_id": 1 })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_bad_tokens_are_unauthorized() {
    let app = helpers::TestApp::with_seats(1).await;
    let wrong_secret = helpers::sign(
        json!({ "user_id": 1, "exp": helpers::now() + 3600 }),
        "some-other-secret",
    );
    let expired = helpers::sign(
        json!({ "user_id": 1, "exp": helpers::now() - 3600 }),
        helpers::JWT_SECRET,
    );
    let no_user = helpers::sign(json!({ "exp": helpers::now() + 3600 }), helpers::JWT_SECRET);

    for token in [wrong_secret.as_str(), expired.as_str(), no_user.as_str(), "garbage"] {
        let response = app
            .request("POST", "/api/bookings", Some(json!({ "seat_id": 1 })), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "token {token}");
    }
    assert_eq!(app.store.booking_count(), 0);
}

#[tokio::test]
async fn test_invalid_seat_id_is_rejected() {
    let app = helpers::TestApp::with_seats(1).await;
    let token = helpers::token_for(1);

    let response = app
        .request("POST", "/api/bookings", Some(json!({ "seat_id": 0 })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("POST", "/api/bookings", Some(json!({ "seat": 1 })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_seats_reflects_booking() {
    let app = helpers::TestApp::with_seats(3).await;
    app.book(3, 8).await;

    let response = app.request("GET", "/api/seats", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let seats = response.body["data"].as_array().expect("seat list");
    assert_eq!(seats.len(), 3);
    let numbers: Vec<i64> = seats
        .iter()
        .filter_map(|s| s["seat_number"].as_i64())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(seats[0]["status"], "available");
    assert_eq!(seats[2]["status"], "booked");
}

#[tokio::test]
async fn test_get_seat() {
    let app = helpers::TestApp::with_seats(2).await;

    let found = app.request("GET", "/api/seats/2", None, None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["seat_number"], 2);

    let missing = app.request("GET", "/api/seats/99", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_seat() {
    let app = helpers::TestApp::new().await;
    let token = helpers::token_for(1);
    let body = json!({ "row_number": "B", "seat_number": 4, "price": 1200 });

    let anonymous = app.request("POST", "/api/seats", Some(body.clone()), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let created = app
        .request("POST", "/api/seats", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["status"], "available");

    let duplicate = app.request("POST", "/api/seats", Some(body), Some(&token)).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let negative = app
        .request(
            "POST",
            "/api/seats",
            Some(json!({ "row_number": "B", "seat_number": 5, "price": -1 })),
            Some(&token),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_my_bookings() {
    let app = helpers::TestApp::with_seats(3).await;
    app.book(1, 5).await;
    app.book(3, 5).await;
    app.book(2, 6).await;

    let token = helpers::token_for(5);
    let response = app.request("GET", "/api/bookings/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let bookings = response.body["data"].as_array().expect("booking list");
    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b["user_id"] == 5));
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["data"]["status"], "ok");
    assert_eq!(detailed.body["data"]["store"]["status"], "up");
    assert_eq!(detailed.body["data"]["gate"]["backend"], "memory");
    assert_eq!(detailed.body["data"]["hub"]["subscribers_active"], 0);
}
