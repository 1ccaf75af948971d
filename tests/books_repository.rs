mod common;

use bookstore_app::modules::books::models::NewBook;
use bookstore_app::modules::books::repository;
use bookstore_app::App;

use common::memory_settings;

fn new_book(title: &str, price: f64, quantity: i64) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Some Author".to_string(),
        price,
        quantity,
    }
}

async fn prepared_app() -> App {
    App::bootstrap(memory_settings(false)).await.unwrap()
}

#[tokio::test]
async fn insert_then_get_returns_same_fields() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    let input = new_book("Programming Rust", 59.0, 2);
    let created = repository::insert(&mut conn, &input).await.unwrap();
    assert_eq!(created.fields(), input);

    let fetched = repository::get_by_id(&mut conn, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_all_is_ordered_by_id() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    for title in ["Bravo", "Alpha", "Charlie"] {
        repository::insert(&mut conn, &new_book(title, 1.0, 1))
            .await
            .unwrap();
    }

    let titles: Vec<String> = repository::list_all(&mut conn)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, vec!["Bravo", "Alpha", "Charlie"]);
}

#[tokio::test]
async fn update_and_delete_report_missing_rows() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    let updated = repository::update_by_id(&mut conn, 42, &new_book("Nothing", 1.0, 1))
        .await
        .unwrap();
    assert!(updated.is_none());
    assert!(!repository::delete_by_id(&mut conn, 42).await.unwrap());
}

#[tokio::test]
async fn update_is_a_full_replace() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    let created = repository::insert(&mut conn, &new_book("Before", 10.0, 8))
        .await
        .unwrap();
    let replacement = NewBook {
        title: "After".to_string(),
        author: "Other Author".to_string(),
        price: 11.0,
        quantity: 0,
    };

    let updated = repository::update_by_id(&mut conn, created.id, &replacement)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields(), replacement);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    let first = repository::insert(&mut conn, &new_book("First", 1.0, 1))
        .await
        .unwrap();
    assert!(repository::delete_by_id(&mut conn, first.id).await.unwrap());

    let second = repository::insert(&mut conn, &new_book("Second", 1.0, 1))
        .await
        .unwrap();
    assert!(second.id > first.id);
    assert!(repository::get_by_id(&mut conn, first.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn search_matches_substrings_ignoring_case() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    for title in ["Python Basics", "Advanced PYTHON", "Rust Book", "under_score"] {
        repository::insert(&mut conn, &new_book(title, 1.0, 1))
            .await
            .unwrap();
    }

    let found: Vec<String> = repository::search_by_title(&mut conn, "pYtHoN")
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(found, vec!["Python Basics", "Advanced PYTHON"]);

    // `_` is a literal, not a single-character wildcard
    let found = repository::search_by_title(&mut conn, "t_b").await.unwrap();
    assert!(found.is_empty());
    let found = repository::search_by_title(&mut conn, "r_sc").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "under_score");

    let all = repository::search_by_title(&mut conn, "").await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn store_constraints_back_up_validation() {
    let app = prepared_app().await;
    let mut conn = app.pool().acquire().await.unwrap();

    assert!(repository::insert(&mut conn, &new_book("Ok", 0.0, 1))
        .await
        .is_err());
    assert!(repository::insert(&mut conn, &new_book("Ok", 1.0, -1))
        .await
        .is_err());
    assert!(repository::list_all(&mut conn).await.unwrap().is_empty());
}
