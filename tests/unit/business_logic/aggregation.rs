//! Aggregation and CSV export tests over store-backed data

use pretty_assertions::assert_eq;
use voter_sheets::export::{export_filename, sheets_to_csv, totals};
use voter_sheets::models::{Coordinate, PointInput};
use voter_sheets::store::Backend;

use crate::common::{fresh_store, test_data};

#[tokio::test]
async fn totals_parse_counts_and_default_to_zero() {
    let store = fresh_store();
    for count in ["3", "5", ""] {
        store
            .create_sheet(test_data::sheet_input("House", "Ward", count))
            .await
            .unwrap();
    }
    store
        .create_point(PointInput {
            location: Coordinate::new(1.0, 2.0),
        })
        .await
        .unwrap();

    let sheets = store.list_sheets().await.unwrap();
    let points = store.list_points().await.unwrap();
    let totals = totals(&sheets, &points);

    assert_eq!(totals.total_sheets, 3);
    assert_eq!(totals.total_voters, 8);
    assert_eq!(totals.total_points, 1);
}

#[tokio::test]
async fn exported_row_matches_the_stored_sheet() {
    let store = fresh_store();
    store
        .create_sheet(test_data::located_sheet_input("A", "X", "2", 1.5, 2.5))
        .await
        .unwrap();

    let sheets = store.list_sheets().await.unwrap();
    let csv = sheets_to_csv(&sheets).unwrap();
    let row = csv.lines().nth(1).expect("one data row");

    assert!(
        row.contains(",A,red,X,2,1.5,2.5,"),
        "unexpected row: {}",
        row
    );
}

#[tokio::test]
async fn export_covers_every_sheet_once() {
    let store = fresh_store();
    for i in 0..4 {
        store
            .create_sheet(test_data::sheet_input(&format!("House {}", i), "Ward", "1"))
            .await
            .unwrap();
    }

    let sheets = store.list_sheets().await.unwrap();
    let csv = sheets_to_csv(&sheets).unwrap();
    // header + one row per sheet
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn filename_embeds_the_current_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    assert_eq!(export_filename(date), "voter-data-2025-01-31.csv");
}
