use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use gridbudget_core::points::{NewPoint, Point, PointRepositoryTrait, PointUpdate};
use gridbudget_core::Result;

use super::model::PointDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::points;
use crate::utils::now;

pub struct PointRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PointRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PointRepositoryTrait for PointRepository {
    async fn create(&self, new_point: NewPoint) -> Result<Point> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Point> {
                let row: PointDB = new_point.into();
                diesel::insert_into(points::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Point::try_from(row)
            })
            .await
    }

    async fn update(&self, point_update: PointUpdate) -> Result<Point> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Point> {
                let existing = points::table
                    .find(&point_update.id)
                    .select(PointDB::as_select())
                    .first::<PointDB>(conn)
                    .map_err(StorageError::from)?;

                let row = PointDB {
                    name: point_update.name,
                    latitude: point_update.latitude,
                    longitude: point_update.longitude,
                    span_length_m: point_update.span_length_m.to_string(),
                    utility_pole_id: point_update.utility_pole_id,
                    medium_tension_group_id: point_update.medium_tension_group_id,
                    low_tension_group_id: point_update.low_tension_group_id,
                    medium_tension_cable_id: point_update.medium_tension_cable_id,
                    low_tension_cable_id: point_update.low_tension_cable_id,
                    updated_at: now(),
                    ..existing
                };
                diesel::update(points::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Point::try_from(row)
            })
            .await
    }

    async fn delete(&self, point_id: &str) -> Result<usize> {
        let point_id = point_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(points::table.find(point_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn update_sequences(
        &self,
        project_id: &str,
        sequences: Vec<(String, i32)>,
    ) -> Result<usize> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                debug!(
                    "Rewriting {} point sequences for project {}",
                    sequences.len(),
                    project_id
                );
                // (project_id, sequence) is unique, so every row is parked on
                // a negative slot before taking its final position.
                for (index, (point_id, _)) in sequences.iter().enumerate() {
                    diesel::update(
                        points::table
                            .find(point_id)
                            .filter(points::project_id.eq(&project_id)),
                    )
                    .set(points::sequence.eq(-(index as i32) - 1))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }

                let updated_at = now();
                let mut updated = 0;
                for (point_id, sequence) in &sequences {
                    updated += diesel::update(
                        points::table
                            .find(point_id)
                            .filter(points::project_id.eq(&project_id)),
                    )
                    .set((
                        points::sequence.eq(*sequence),
                        points::updated_at.eq(updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                Ok(updated)
            })
            .await
    }

    fn get_by_id(&self, point_id: &str) -> Result<Point> {
        let mut conn = get_connection(&self.pool)?;
        let row = points::table
            .find(point_id)
            .select(PointDB::as_select())
            .first::<PointDB>(&mut conn)
            .map_err(StorageError::from)?;
        Point::try_from(row)
    }

    fn list_by_project(&self, project_id: &str) -> Result<Vec<Point>> {
        let mut conn = get_connection(&self.pool)?;
        points::table
            .filter(points::project_id.eq(project_id))
            .select(PointDB::as_select())
            .order(points::sequence.asc())
            .load::<PointDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Point::try_from)
            .collect()
    }
}
