//! Record editor derived-list and validation tests

use pretty_assertions::assert_eq;
use test_log::test;
use voter_sheets::editor::{EditorError, SheetForm};
use voter_sheets::models::{ColourRound, Coordinate, Sheet, Voter};

use crate::common::logging;

#[test]
fn resizing_preserves_the_prefix_for_every_count() {
    logging::init_test_logging();

    for old in 0..6usize {
        for new in 0..6usize {
            let mut form = SheetForm::new();
            form.set_no_of_voters(old.to_string());
            for (i, voter) in form.voters.iter_mut().enumerate() {
                voter.name = format!("v{}", i);
            }

            form.set_no_of_voters(new.to_string());
            assert_eq!(form.voters.len(), new, "old={} new={}", old, new);
            for i in 0..old.min(new) {
                assert_eq!(form.voters[i].name, format!("v{}", i));
            }
            for i in old.min(new)..new {
                assert_eq!(form.voters[i], Voter::default());
            }
        }
    }
}

#[test]
fn a_draft_missing_community_is_rejected() {
    let mut form = SheetForm::new();
    form.house_name = "A".to_string();
    form.colour_round = Some(ColourRound::Red);
    form.set_no_of_voters("2");

    assert_eq!(form.validate(), Err(EditorError::MissingFields));
}

#[test]
fn a_complete_draft_validates_into_a_store_payload() {
    let mut form = SheetForm::new();
    form.house_name = "A".to_string();
    form.colour_round = Some(ColourRound::Red);
    form.community = "X".to_string();
    form.set_no_of_voters("2");
    form.voters[0].name = "Asha".to_string();
    form.location = Some(Coordinate::new(1.5, 2.5));

    let input = form.validate().expect("draft should validate");
    assert_eq!(input.no_of_voters, "2");
    assert_eq!(input.voters.len(), 2);
    assert_eq!(input.voters[0].name, "Asha");
    assert_eq!(input.location, Some(Coordinate::new(1.5, 2.5)));
}

#[test]
fn prefilling_from_a_sheet_keeps_its_identity() {
    let sheet = Sheet {
        id: "sheet-1".to_string(),
        house_name: "A".to_string(),
        colour_round: ColourRound::Yellow,
        community: "X".to_string(),
        no_of_voters: "1".to_string(),
        location: None,
        voters: vec![Voter {
            name: "Ravi".to_string(),
            age: "41".to_string(),
            colour_round: None,
        }],
        created_at: chrono::Utc::now(),
    };

    let form = SheetForm::for_sheet(&sheet);
    assert!(form.is_editing());
    assert_eq!(form.editing_id(), Some("sheet-1"));
    assert_eq!(form.voters[0].name, "Ravi");

    let fresh = SheetForm::new();
    assert!(!fresh.is_editing());
}
