use thiserror::Error;

use crate::models::{ColourRound, Coordinate, Sheet, SheetInput, Voter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("please fill all required fields")]
    MissingFields,
}

/// Draft state behind the sheet form.
///
/// The voter list is derived from the count field: changing the count
/// recomputes the list to the new parsed length, preserving existing entries
/// by index and default-initializing new ones.
#[derive(Debug, Clone, Default)]
pub struct SheetForm {
    pub house_name: String,
    pub colour_round: Option<ColourRound>,
    pub community: String,
    pub no_of_voters: String,
    pub location: Option<Coordinate>,
    pub voters: Vec<Voter>,
    editing_id: Option<String>,
}

impl SheetForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill the form from an existing sheet for editing
    pub fn for_sheet(sheet: &Sheet) -> Self {
        Self {
            house_name: sheet.house_name.clone(),
            colour_round: Some(sheet.colour_round),
            community: sheet.community.clone(),
            no_of_voters: sheet.no_of_voters.clone(),
            location: sheet.location,
            voters: sheet.voters.clone(),
            editing_id: Some(sheet.id.clone()),
        }
    }

    /// Id of the sheet being edited, or None when creating
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Count parsed from the raw field, 0 on parse failure
    pub fn parsed_count(&self) -> usize {
        self.no_of_voters.trim().parse().unwrap_or(0)
    }

    /// Replace the count field and resize the derived voter list
    pub fn set_no_of_voters(&mut self, raw: impl Into<String>) {
        self.no_of_voters = raw.into();
        let count = self.parsed_count();
        self.voters.resize_with(count, Voter::default);
    }

    pub fn voter_mut(&mut self, index: usize) -> Option<&mut Voter> {
        self.voters.get_mut(index)
    }

    /// Validate the draft and produce the store payload.
    ///
    /// House name, colour round, community and the count field must all be
    /// non-empty; otherwise nothing is saved.
    pub fn validate(&self) -> Result<SheetInput, EditorError> {
        let colour_round = match self.colour_round {
            Some(c) => c,
            None => return Err(EditorError::MissingFields),
        };
        if self.house_name.is_empty() || self.community.is_empty() || self.no_of_voters.is_empty()
        {
            return Err(EditorError::MissingFields);
        }

        Ok(SheetInput {
            house_name: self.house_name.clone(),
            colour_round,
            community: self.community.clone(),
            no_of_voters: self.no_of_voters.clone(),
            location: self.location,
            voters: self.voters.clone(),
        })
    }
}
