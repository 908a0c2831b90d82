//! Common test utilities and helpers

use voter_sheets::store::MemoryBackend;

/// Fresh in-memory store for a test
pub fn fresh_store() -> MemoryBackend {
    MemoryBackend::new()
}

/// Test data utilities
pub mod test_data {
    use voter_sheets::models::{ColourRound, Coordinate, SheetInput, Voter};

    /// Create a sheet input with a matching derived voter list
    pub fn sheet_input(house_name: &str, community: &str, count: &str) -> SheetInput {
        SheetInput {
            house_name: house_name.to_string(),
            colour_round: ColourRound::Red,
            community: community.to_string(),
            no_of_voters: count.to_string(),
            location: None,
            voters: voters(count.parse().unwrap_or(0)),
        }
    }

    /// Same, with a coordinate attached
    pub fn located_sheet_input(
        house_name: &str,
        community: &str,
        count: &str,
        lat: f64,
        lng: f64,
    ) -> SheetInput {
        let mut input = sheet_input(house_name, community, count);
        input.location = Some(Coordinate::new(lat, lng));
        input
    }

    /// A voter list with recognizable names
    pub fn voters(count: usize) -> Vec<Voter> {
        (0..count)
            .map(|i| Voter {
                name: format!("Voter {}", i + 1),
                age: "30".to_string(),
                colour_round: Some(ColourRound::Blue),
            })
            .collect()
    }
}

/// Test logging utilities
pub mod logging {
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn init_test_logging() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });
    }

    pub fn log_test_step(step: &str) {
        tracing::info!("STEP: {}", step);
    }
}
