//! In-memory store operation tests

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use voter_sheets::models::{Coordinate, PointInput};
use voter_sheets::store::{Backend, StoreError};

use crate::common::{fresh_store, logging, test_data};

#[tokio::test]
async fn sheet_crud_operations() {
    logging::init_test_logging();
    logging::log_test_step("Testing sheet CRUD operations");

    let store = fresh_store();

    let created = store
        .create_sheet(test_data::sheet_input("House A", "Ward 1", "2"))
        .await
        .expect("Failed to create sheet");
    assert!(!created.id.is_empty(), "Sheet id should be generated");
    assert_eq!(created.voters.len(), 2);

    let second = store
        .create_sheet(test_data::sheet_input("House B", "Ward 2", "1"))
        .await
        .expect("Failed to create second sheet");
    assert_ne!(created.id, second.id, "Generated ids should be unique");

    // Listing preserves insertion order
    let names: Vec<String> = store
        .list_sheets()
        .await
        .expect("Failed to list sheets")
        .into_iter()
        .map(|s| s.house_name)
        .collect();
    assert_eq!(names, vec!["House A".to_string(), "House B".to_string()]);

    // Update replaces the payload but keeps id and created_at
    let updated = store
        .update_sheet(&created.id, test_data::sheet_input("House A2", "Ward 1", "3"))
        .await
        .expect("Failed to update sheet");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.house_name, "House A2");
    assert_eq!(updated.voters.len(), 3);

    store
        .delete_sheet(&second.id)
        .await
        .expect("Failed to delete sheet");
    assert_eq!(store.list_sheets().await.unwrap().len(), 1);

    logging::log_test_step("Sheet CRUD operations completed successfully");
}

#[tokio::test]
async fn update_of_unknown_sheet_reports_not_found() {
    let store = fresh_store();
    let result = store
        .update_sheet("missing", test_data::sheet_input("X", "Y", "0"))
        .await;
    assert_matches!(result, Err(StoreError::NotFound { .. }));
}

#[tokio::test]
async fn delete_of_unknown_id_leaves_the_list_unchanged() {
    let store = fresh_store();
    store
        .create_sheet(test_data::sheet_input("House A", "Ward 1", "1"))
        .await
        .unwrap();
    store
        .create_sheet(test_data::sheet_input("House B", "Ward 2", "2"))
        .await
        .unwrap();
    let before = store.list_sheets().await.unwrap();

    let result = store.delete_sheet("does-not-exist").await;
    assert_matches!(result, Err(StoreError::NotFound { .. }));
    assert_eq!(store.list_sheets().await.unwrap(), before);
}

#[tokio::test]
async fn point_lifecycle() {
    logging::init_test_logging();
    let store = fresh_store();

    let point = store
        .create_point(PointInput {
            location: Coordinate::new(12.9716, 77.5946),
        })
        .await
        .expect("Failed to create point");
    assert!(!point.id.is_empty());

    let listed = store.list_points().await.unwrap();
    assert_eq!(listed, vec![point.clone()]);

    let moved = store
        .update_point(
            &point.id,
            PointInput {
                location: Coordinate::new(13.0, 77.6),
            },
        )
        .await
        .expect("Failed to update point");
    assert_eq!(moved.id, point.id);
    assert_eq!(moved.location, Coordinate::new(13.0, 77.6));

    store.delete_point(&point.id).await.unwrap();
    assert!(store.list_points().await.unwrap().is_empty());

    assert_matches!(
        store.delete_point(&point.id).await,
        Err(StoreError::NotFound { .. })
    );
}
