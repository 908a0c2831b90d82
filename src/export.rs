use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{Point, Sheet};

/// Fixed CSV header row for sheet exports
pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "House Name",
    "Colour Round",
    "Community",
    "No. of Voters",
    "Latitude",
    "Longitude",
    "Created At",
];

/// Dashboard counters shown on the admin view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub total_sheets: usize,
    pub total_voters: u64,
    pub total_points: usize,
}

/// Simple counts over the full record set. Voter counts are parsed from the
/// raw field, treating non-numeric values as 0.
pub fn totals(sheets: &[Sheet], points: &[Point]) -> Totals {
    Totals {
        total_sheets: sheets.len(),
        total_voters: sheets.iter().map(|s| u64::from(s.voter_count())).sum(),
        total_points: points.len(),
    }
}

fn sheet_row(sheet: &Sheet) -> [String; 8] {
    let (lat, lng) = match sheet.location {
        Some(loc) => (loc.lat.to_string(), loc.lng.to_string()),
        None => (String::new(), String::new()),
    };
    [
        sheet.id.clone(),
        sheet.house_name.clone(),
        sheet.colour_round.value().to_string(),
        sheet.community.clone(),
        sheet.no_of_voters.clone(),
        lat,
        lng,
        sheet.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}

/// Serialize all sheets as CSV, one row per sheet.
///
/// Fields with embedded delimiters are quoted by the writer.
pub fn sheets_to_csv(sheets: &[Sheet]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for sheet in sheets {
        writer.write_record(sheet_row(sheet))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV writer: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Date-stamped export filename
pub fn export_filename(date: NaiveDate) -> String {
    format!("voter-data-{}.csv", date.format("%Y-%m-%d"))
}

/// Write the CSV document into `dir` and return its path
pub fn export_sheets(sheets: &[Sheet], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(date));
    std::fs::write(&path, sheets_to_csv(sheets)?)?;
    info!("exported {} sheets to {}", sheets.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColourRound, Coordinate};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sheet_with_count(count: &str) -> Sheet {
        Sheet {
            id: "id".to_string(),
            house_name: "House".to_string(),
            colour_round: ColourRound::Blue,
            community: "Ward 4".to_string(),
            no_of_voters: count.to_string(),
            location: None,
            voters: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn totals_treat_non_numeric_counts_as_zero() {
        let sheets = vec![
            sheet_with_count("3"),
            sheet_with_count("5"),
            sheet_with_count(""),
        ];
        let totals = totals(&sheets, &[]);
        assert_eq!(totals.total_sheets, 3);
        assert_eq!(totals.total_voters, 8);
        assert_eq!(totals.total_points, 0);
    }

    #[test]
    fn csv_row_carries_fields_in_header_order() {
        let sheet = Sheet {
            id: "abc".to_string(),
            house_name: "A".to_string(),
            colour_round: ColourRound::Red,
            community: "X".to_string(),
            no_of_voters: "2".to_string(),
            location: Some(Coordinate::new(1.5, 2.5)),
            voters: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };

        let csv = sheets_to_csv(&[sheet]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,House Name,Colour Round,Community,No. of Voters,Latitude,Longitude,Created At"
        );
        assert_eq!(
            lines.next().unwrap(),
            "abc,A,red,X,2,1.5,2.5,2024-06-01 12:00:00"
        );
    }

    #[test]
    fn missing_location_renders_as_empty_fields() {
        let csv = sheets_to_csv(&[sheet_with_count("1")]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",Ward 4,1,,,"));
    }

    #[test]
    fn embedded_commas_are_quoted() {
        let mut sheet = sheet_with_count("1");
        sheet.house_name = "Rao, House".to_string();
        let csv = sheets_to_csv(&[sheet]).unwrap();
        assert!(csv.contains("\"Rao, House\""));
    }

    #[test]
    fn filename_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(export_filename(date), "voter-data-2026-08-07.csv");
    }
}
