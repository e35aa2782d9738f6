#![allow(dead_code)]

use snaplink::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "https://sho.rt";

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO links (code, url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn get_clicks(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT clicks FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), TEST_BASE_URL)
}
