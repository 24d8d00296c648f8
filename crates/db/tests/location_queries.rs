//! Repository-level tests for the location history queries: the grouped
//! newest-per-device query, range bounds, and date derivation.

use sqlx::PgPool;
use waypost_core::types::DbId;
use waypost_db::models::device::CreateDevice;
use waypost_db::models::location::CreateLocation;
use waypost_db::models::user::CreateUser;
use waypost_db::repositories::location_repo::DateRange;
use waypost_db::repositories::{DeviceRepo, LocationRepo, UserRepo};

async fn make_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        password_hash: "unused".to_string(),
        admin: false,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn make_device(pool: &PgPool, user_id: DbId, name: &str) -> DbId {
    let input = CreateDevice {
        user_id,
        name: name.to_string(),
        icon: None,
    };
    DeviceRepo::create(pool, &input).await.unwrap().id
}

/// Insert a location with an explicit timestamp.
async fn insert_at(pool: &PgPool, device_id: DbId, latitude: f64, stamp: &str) {
    sqlx::query(
        "INSERT INTO locations (device_id, latitude, longitude, created_at, updated_at)
         VALUES ($1, $2, 0, $3::timestamptz, $3::timestamptz)",
    )
    .bind(device_id)
    .bind(latitude)
    .bind(stamp)
    .execute(pool)
    .await
    .unwrap();
}

/// One query returns the newest row per device, scoped to the owner.
#[sqlx::test(migrations = "./migrations")]
async fn latest_per_device_returns_newest_rows(pool: PgPool) {
    let alice = make_user(&pool, "alice").await;
    let bob = make_user(&pool, "bob").await;
    let phone = make_device(&pool, alice, "phone").await;
    let watch = make_device(&pool, alice, "watch").await;
    let foreign = make_device(&pool, bob, "foreign").await;

    insert_at(&pool, phone, 1.0, "2026-01-01 10:00:00+00").await;
    insert_at(&pool, phone, 2.0, "2026-01-02 10:00:00+00").await;
    insert_at(&pool, watch, 9.0, "2026-01-01 10:00:00+00").await;
    insert_at(&pool, foreign, 5.0, "2026-01-03 10:00:00+00").await;

    let mut latest = LocationRepo::latest_per_device(&pool, alice).await.unwrap();
    latest.sort_by_key(|l| l.device_id);

    assert_eq!(latest.len(), 2, "one row per owned device, none foreign");
    let phone_row = latest.iter().find(|l| l.device_id == phone).unwrap();
    assert_eq!(phone_row.latitude, 2.0, "newest row wins");
}

/// Range bounds are inclusive at both ends.
#[sqlx::test(migrations = "./migrations")]
async fn date_range_is_inclusive(pool: PgPool) {
    let alice = make_user(&pool, "alice").await;
    let phone = make_device(&pool, alice, "phone").await;

    insert_at(&pool, phone, 1.0, "2026-01-01 00:00:00+00").await;
    insert_at(&pool, phone, 2.0, "2026-01-02 00:00:00+00").await;
    insert_at(&pool, phone, 3.0, "2026-01-03 00:00:00+00").await;

    let range = DateRange {
        start: Some("2026-01-01T00:00:00Z".parse().unwrap()),
        end: Some("2026-01-03T00:00:00Z".parse().unwrap()),
    };
    let rows = LocationRepo::list_for_device(&pool, phone, range)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3, "both boundary rows are included");

    let narrowed = DateRange {
        start: Some("2026-01-01T12:00:00Z".parse().unwrap()),
        end: Some("2026-01-02T12:00:00Z".parse().unwrap()),
    };
    let rows = LocationRepo::list_for_device(&pool, phone, narrowed)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].latitude, 2.0);

    // Half-open usage: only a lower bound.
    let open_end = DateRange {
        start: Some("2026-01-02T00:00:00Z".parse().unwrap()),
        end: None,
    };
    let rows = LocationRepo::list_for_device(&pool, phone, open_end)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

/// `latest_for_device` is descending-then-take-one.
#[sqlx::test(migrations = "./migrations")]
async fn latest_for_device_takes_newest(pool: PgPool) {
    let alice = make_user(&pool, "alice").await;
    let phone = make_device(&pool, alice, "phone").await;

    insert_at(&pool, phone, 1.0, "2026-01-01 10:00:00+00").await;
    insert_at(&pool, phone, 2.0, "2026-01-05 10:00:00+00").await;
    insert_at(&pool, phone, 1.5, "2026-01-03 10:00:00+00").await;

    let latest = LocationRepo::latest_for_device(&pool, phone, DateRange::default())
        .await
        .unwrap()
        .expect("a row should exist");
    assert_eq!(latest.latitude, 2.0);

    let none = LocationRepo::latest_for_device(
        &pool,
        phone,
        DateRange {
            start: Some("2030-01-01T00:00:00Z".parse().unwrap()),
            end: None,
        },
    )
    .await
    .unwrap();
    assert!(none.is_none());
}

/// Calendar dates are distinct, UTC-derived, and sorted.
#[sqlx::test(migrations = "./migrations")]
async fn distinct_dates_deduplicates_and_sorts(pool: PgPool) {
    let alice = make_user(&pool, "alice").await;
    let phone = make_device(&pool, alice, "phone").await;

    insert_at(&pool, phone, 0.0, "2026-02-10 23:30:00+00").await;
    insert_at(&pool, phone, 0.0, "2026-02-10 08:00:00+00").await;
    // 01:00 CET on Feb 12 is Feb 11 in UTC -- dates derive from UTC.
    insert_at(&pool, phone, 0.0, "2026-02-12 01:00:00+01").await;

    let dates = LocationRepo::distinct_dates(&pool, phone).await.unwrap();
    let rendered: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
    assert_eq!(rendered, vec!["2026-02-10", "2026-02-11"]);
}
