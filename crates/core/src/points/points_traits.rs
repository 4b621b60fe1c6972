use async_trait::async_trait;

use super::points_model::{NewPoint, Point, PointUpdate};
use crate::errors::Result;

#[async_trait]
pub trait PointRepositoryTrait: Send + Sync {
    /// `new_point.sequence` is always set by the service.
    async fn create(&self, new_point: NewPoint) -> Result<Point>;
    async fn update(&self, point_update: PointUpdate) -> Result<Point>;
    async fn delete(&self, point_id: &str) -> Result<usize>;
    /// Rewrites the sequence of every listed point in one transaction.
    async fn update_sequences(&self, project_id: &str, sequences: Vec<(String, i32)>) -> Result<usize>;
    fn get_by_id(&self, point_id: &str) -> Result<Point>;
    /// Ordered by sequence.
    fn list_by_project(&self, project_id: &str) -> Result<Vec<Point>>;
}

#[async_trait]
pub trait PointServiceTrait: Send + Sync {
    async fn add_point(&self, new_point: NewPoint) -> Result<Point>;
    async fn update_point(&self, point_update: PointUpdate) -> Result<Point>;
    async fn delete_point(&self, point_id: &str) -> Result<()>;
    /// Assigns sequences 1..n following `ordered_ids`, which must list every
    /// point of the project exactly once.
    async fn reorder_points(&self, project_id: &str, ordered_ids: Vec<String>) -> Result<Vec<Point>>;
    fn get_point(&self, point_id: &str) -> Result<Point>;
    fn list_points(&self, project_id: &str) -> Result<Vec<Point>>;
}
