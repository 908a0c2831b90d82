use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

use super::{Backend, StoreError, StoreResult};
use crate::models::{Point, PointInput, Sheet, SheetInput};

/// In-memory store of record; nothing survives process exit
#[derive(Clone, Default)]
pub struct MemoryBackend {
    sheets: Arc<Mutex<Vec<Sheet>>>,
    points: Arc<Mutex<Vec<Point>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_sheets(&self) -> StoreResult<Vec<Sheet>> {
        Ok(self.sheets.lock().unwrap().clone())
    }

    async fn create_sheet(&self, input: SheetInput) -> StoreResult<Sheet> {
        let sheet = Sheet {
            id: Uuid::new_v4().to_string(),
            house_name: input.house_name,
            colour_round: input.colour_round,
            community: input.community,
            no_of_voters: input.no_of_voters,
            location: input.location,
            voters: input.voters,
            created_at: Utc::now(),
        };
        self.sheets.lock().unwrap().push(sheet.clone());
        debug!("created sheet {}", sheet.id);
        Ok(sheet)
    }

    async fn update_sheet(&self, id: &str, input: SheetInput) -> StoreResult<Sheet> {
        let mut sheets = self.sheets.lock().unwrap();
        let sheet = sheets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        sheet.house_name = input.house_name;
        sheet.colour_round = input.colour_round;
        sheet.community = input.community;
        sheet.no_of_voters = input.no_of_voters;
        sheet.location = input.location;
        sheet.voters = input.voters;
        debug!("updated sheet {}", id);
        Ok(sheet.clone())
    }

    async fn delete_sheet(&self, id: &str) -> StoreResult<()> {
        let mut sheets = self.sheets.lock().unwrap();
        let before = sheets.len();
        sheets.retain(|s| s.id != id);
        if sheets.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        debug!("deleted sheet {}", id);
        Ok(())
    }

    async fn list_points(&self) -> StoreResult<Vec<Point>> {
        Ok(self.points.lock().unwrap().clone())
    }

    async fn create_point(&self, input: PointInput) -> StoreResult<Point> {
        let point = Point {
            id: Uuid::new_v4().to_string(),
            location: input.location,
            created_at: Utc::now(),
        };
        self.points.lock().unwrap().push(point.clone());
        debug!("created point {}", point.id);
        Ok(point)
    }

    async fn update_point(&self, id: &str, input: PointInput) -> StoreResult<Point> {
        let mut points = self.points.lock().unwrap();
        let point = points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        point.location = input.location;
        Ok(point.clone())
    }

    async fn delete_point(&self, id: &str) -> StoreResult<()> {
        let mut points = self.points.lock().unwrap();
        let before = points.len();
        points.retain(|p| p.id != id);
        if points.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        debug!("deleted point {}", id);
        Ok(())
    }
}
