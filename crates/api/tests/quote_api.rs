//! Integration tests for the public quote endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, valid_submission};
use serde_json::json;
use sqlx::PgPool;

use ermel_core::order_id::is_valid_order_id;
use ermel_core::phone::hash_phone;
use ermel_core::submission::WIDTH_INVALID;

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_quote_stores_record(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/quotes", valid_submission()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "5");
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let id = json["id"].as_str().unwrap();
    assert!(is_valid_order_id(id), "unexpected id {id}");

    let (dimensions, estimated_cost, phone, phone_hash, status): (String, f64, String, String, String) =
        sqlx::query_as(
            "SELECT dimensions, estimated_cost, phone, phone_hash, status FROM quotes WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(dimensions, "120cm × 150cm");
    // 1.2m x 1.5m at the sliding window rate.
    assert_eq!(estimated_cost, 2_160.0);
    assert_eq!(phone, "09171234567");
    assert_eq!(phone_hash, hash_phone("09171234567"));
    assert_eq!(status, "inquiry");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_estimate_is_ignored(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut body = valid_submission();
    body["estimatedCost"] = json!(1);

    let response = post_json(app, "/api/quotes", body).await;
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let (estimated_cost,): (f64,) = sqlx::query_as("SELECT estimated_cost FROM quotes WHERE id = $1")
        .bind(&id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(estimated_cost, 2_160.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_quote_reports_all_errors(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/quotes", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    for expected in [
        "Project category is required.",
        "Glass type is required.",
        "Frame material is required.",
        "Width must be a positive number (max 100m).",
        "Height must be a positive number (max 100m).",
        "Customer name is required.",
        "Email is required.",
    ] {
        assert!(message.contains(expected), "missing '{expected}' in '{message}'");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_quote_rejects_bad_phone(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = valid_submission();
    body["phone"] = json!("12345");

    let response = post_json(app, "/api/quotes", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("09"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_quote_rejects_oversized_dimensions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = valid_submission();
    body["measurementUnit"] = json!("m");
    body["width"] = json!("150");

    let response = post_json(app, "/api/quotes", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Width must be a positive number (max 100m)."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sixth_submission_in_an_hour_is_rate_limited(pool: PgPool) {
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let response = post_json(app.clone(), "/api/quotes", valid_submission()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_json(app, "/api/quotes", valid_submission()).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().get("retry-after").is_some());
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Too many quote requests. Please try again later."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_submissions_count_toward_the_limit(pool: PgPool) {
    let mut config = common::test_config();
    config.quote_rate_limit_per_hour = 1;
    let app = common::build_test_app_with_config(pool, config);

    let first = post_json(app.clone(), "/api/quotes", json!({})).await;
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);

    let second = post_json(app, "/api/quotes", valid_submission()).await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn estimate_does_not_persist(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/quotes/estimate",
        json!({
            "project": "Storefront",
            "glassType": "Tempered Glass",
            "material": "Steel Frame",
            "measurementUnit": "m",
            "width": "2",
            "height": 2.5
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["unit"], "m");
    assert_eq!(data["width"]["cm"], 200.0);
    assert_eq!(data["area_sqm"], 5.0);
    // 5 sqm * 1800 * 1.6 * 1.3
    assert_eq!(data["estimated_cost"], 18_720.0);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn estimate_rejects_missing_dimensions(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/quotes/estimate", json!({ "project": "Storefront" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn estimate_treats_non_numeric_width_as_invalid(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/quotes/estimate",
        json!({ "width": true, "height": 100 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], WIDTH_INVALID);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn estimate_is_not_rate_limited(pool: PgPool) {
    let mut config = common::test_config();
    config.quote_rate_limit_per_hour = 1;
    let app = common::build_test_app_with_config(pool, config);

    for _ in 0..3 {
        let response = post_json(
            app.clone(),
            "/api/quotes/estimate",
            json!({ "width": 100, "height": 100 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
