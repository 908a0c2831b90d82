use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Point, PointInput, Sheet, SheetInput};

mod memory;
pub use memory::MemoryBackend;

/// Data store failures surfaced at the view boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {id}")]
    NotFound { id: String },
    #[error("save failed: {0}")]
    SaveFailure(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage contract for sheets and points.
///
/// Every operation is awaited by the caller; the in-memory backend resolves
/// immediately, but a real persistence layer slots in behind the same trait
/// without changes on the caller side. `list` returns records in insertion
/// order.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_sheets(&self) -> StoreResult<Vec<Sheet>>;
    async fn create_sheet(&self, input: SheetInput) -> StoreResult<Sheet>;
    async fn update_sheet(&self, id: &str, input: SheetInput) -> StoreResult<Sheet>;
    async fn delete_sheet(&self, id: &str) -> StoreResult<()>;

    async fn list_points(&self) -> StoreResult<Vec<Point>>;
    async fn create_point(&self, input: PointInput) -> StoreResult<Point>;
    async fn update_point(&self, id: &str, input: PointInput) -> StoreResult<Point>;
    async fn delete_point(&self, id: &str) -> StoreResult<()>;
}
