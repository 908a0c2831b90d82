//! End-to-end workflow: session gate, editor drafts, store mutations,
//! point capture and CSV export working together

use pretty_assertions::assert_eq;
use voter_sheets::editor::SheetForm;
use voter_sheets::export::{export_sheets, totals};
use voter_sheets::geo::{LocationProvider, SimulatedGps};
use voter_sheets::models::{ColourRound, Coordinate, PointInput};
use voter_sheets::session::{SessionManager, DEMO_PASSWORD, DEMO_USERNAME};
use voter_sheets::store::Backend;

use crate::common::{fresh_store, logging};

#[tokio::test]
async fn full_sheet_workflow() {
    logging::init_test_logging();
    logging::log_test_step("Starting full sheet workflow");

    let dir = tempfile::tempdir().unwrap();
    let mut sessions = SessionManager::new(dir.path().join("auth_token"));
    sessions
        .login(DEMO_USERNAME, DEMO_PASSWORD)
        .expect("demo login should succeed");

    let store = fresh_store();

    // Fill the form the way the editor view does
    let mut form = SheetForm::new();
    form.house_name = "Rao House".to_string();
    form.colour_round = Some(ColourRound::Saffron);
    form.community = "Ward 7".to_string();
    form.set_no_of_voters("2");
    form.voters[0].name = "Asha".to_string();
    form.voters[0].age = "34".to_string();
    form.location = Some(Coordinate::new(28.61, 77.21));

    let sheet = store
        .create_sheet(form.validate().expect("complete draft validates"))
        .await
        .expect("create should succeed");

    // An invalid draft never reaches the store
    assert!(SheetForm::new().validate().is_err());
    assert_eq!(store.list_sheets().await.unwrap().len(), 1);

    logging::log_test_step("Editing the sheet");

    // Edit: shrinking the count truncates but keeps the first entry
    let mut edit = SheetForm::for_sheet(&sheet);
    edit.set_no_of_voters("1");
    assert_eq!(edit.voters[0].name, "Asha");
    let updated = store
        .update_sheet(&sheet.id, edit.validate().unwrap())
        .await
        .expect("update should succeed");
    assert_eq!(updated.id, sheet.id);
    assert_eq!(updated.voters.len(), 1);

    logging::log_test_step("Capturing a point");

    let gps = SimulatedGps::new(Coordinate::new(28.6139, 77.2090));
    let fix = gps.current_location().await.expect("simulated fix");
    store
        .create_point(PointInput { location: fix })
        .await
        .expect("point create should succeed");

    logging::log_test_step("Aggregating and exporting");

    let sheets = store.list_sheets().await.unwrap();
    let points = store.list_points().await.unwrap();
    let totals = totals(&sheets, &points);
    assert_eq!(totals.total_sheets, 1);
    assert_eq!(totals.total_voters, 1);
    assert_eq!(totals.total_points, 1);

    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
    let path = export_sheets(&sheets, dir.path(), date).expect("export should succeed");
    assert!(path.ends_with("voter-data-2026-08-07.csv"));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Rao House"));
    assert!(contents.starts_with("ID,House Name,Colour Round,Community,No. of Voters"));

    logging::log_test_step("Cleaning up");

    store.delete_sheet(&sheet.id).await.unwrap();
    assert!(store.list_sheets().await.unwrap().is_empty());

    sessions.logout();
    assert!(sessions.current().is_none());
}
