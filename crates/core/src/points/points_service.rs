use log::debug;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::points_model::{NewPoint, Point, PointUpdate};
use super::points_traits::{PointRepositoryTrait, PointServiceTrait};
use crate::cables::CableRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::groups::GroupRepositoryTrait;
use crate::projects::{Project, ProjectRepositoryTrait, ProjectStatus};
use crate::tension::TensionLevel;
use crate::utility_poles::UtilityPoleRepositoryTrait;
use crate::utils::validation::{ensure_non_negative, optional_text, require_text};

/// Catalog references carried by a point, normalized.
struct PointReferences {
    utility_pole_id: Option<String>,
    medium_tension_group_id: Option<String>,
    low_tension_group_id: Option<String>,
    medium_tension_cable_id: Option<String>,
    low_tension_cable_id: Option<String>,
}

/// Service for managing the points of a project
pub struct PointService {
    repository: Arc<dyn PointRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    utility_pole_repository: Arc<dyn UtilityPoleRepositoryTrait>,
    group_repository: Arc<dyn GroupRepositoryTrait>,
    cable_repository: Arc<dyn CableRepositoryTrait>,
}

impl PointService {
    pub fn new(
        repository: Arc<dyn PointRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        utility_pole_repository: Arc<dyn UtilityPoleRepositoryTrait>,
        group_repository: Arc<dyn GroupRepositoryTrait>,
        cable_repository: Arc<dyn CableRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            project_repository,
            utility_pole_repository,
            group_repository,
            cable_repository,
        }
    }

    fn editable_project(&self, project_id: &str) -> Result<Project> {
        let project = self.project_repository.get_by_id(project_id)?;
        if project.status == ProjectStatus::Archived {
            return Err(Error::ConstraintViolation(format!(
                "Project '{}' is archived",
                project.name
            )));
        }
        Ok(project)
    }

    fn ensure_same_company(&self, project: &Project, entity: &str, owner: &str) -> Result<()> {
        if owner != project.company_id {
            return Err(ValidationError::InvalidInput(format!(
                "{} belongs to another company",
                entity
            ))
            .into());
        }
        Ok(())
    }

    fn ensure_tension(slot: TensionLevel, actual: TensionLevel, entity: &str, code: &str) -> Result<()> {
        if slot != actual {
            return Err(ValidationError::InvalidInput(format!(
                "{} {} is rated {} but was placed in the {} tension slot",
                entity, code, actual, slot
            ))
            .into());
        }
        Ok(())
    }

    fn validate_references(&self, project: &Project, refs: PointReferences) -> Result<PointReferences> {
        let refs = PointReferences {
            utility_pole_id: optional_text(refs.utility_pole_id),
            medium_tension_group_id: optional_text(refs.medium_tension_group_id),
            low_tension_group_id: optional_text(refs.low_tension_group_id),
            medium_tension_cable_id: optional_text(refs.medium_tension_cable_id),
            low_tension_cable_id: optional_text(refs.low_tension_cable_id),
        };

        if let Some(id) = &refs.utility_pole_id {
            let pole = self.utility_pole_repository.get_by_id(id)?;
            self.ensure_same_company(project, "Utility pole", &pole.company_id)?;
        }

        for (slot, group_id, cable_id) in [
            (
                TensionLevel::Medium,
                &refs.medium_tension_group_id,
                &refs.medium_tension_cable_id,
            ),
            (
                TensionLevel::Low,
                &refs.low_tension_group_id,
                &refs.low_tension_cable_id,
            ),
        ] {
            if let Some(id) = group_id {
                let group = self.group_repository.get_by_id(id)?;
                self.ensure_same_company(project, "Group", &group.company_id)?;
                Self::ensure_tension(slot, group.tension_level, "Group", &group.code)?;
            }
            if let Some(id) = cable_id {
                let cable = self.cable_repository.get_by_id(id)?;
                self.ensure_same_company(project, "Cable", &cable.company_id)?;
                Self::ensure_tension(slot, cable.tension_level, "Cable", &cable.code)?;
            }
        }

        Ok(refs)
    }
}

fn validate_position(latitude: Option<f64>, longitude: Option<f64>, span_length_m: Decimal) -> Result<()> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(
                ValidationError::InvalidInput(format!("Latitude {} is out of range", lat)).into(),
            );
        }
    }
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(
                ValidationError::InvalidInput(format!("Longitude {} is out of range", lon)).into(),
            );
        }
    }
    ensure_non_negative("spanLengthM", span_length_m)
}

#[async_trait::async_trait]
impl PointServiceTrait for PointService {
    async fn add_point(&self, new_point: NewPoint) -> Result<Point> {
        let project = self.editable_project(&new_point.project_id)?;
        validate_position(new_point.latitude, new_point.longitude, new_point.span_length_m)?;
        let refs = self.validate_references(
            &project,
            PointReferences {
                utility_pole_id: new_point.utility_pole_id.clone(),
                medium_tension_group_id: new_point.medium_tension_group_id.clone(),
                low_tension_group_id: new_point.low_tension_group_id.clone(),
                medium_tension_cable_id: new_point.medium_tension_cable_id.clone(),
                low_tension_cable_id: new_point.low_tension_cable_id.clone(),
            },
        )?;

        let existing = self.repository.list_by_project(&project.id)?;
        let sequence = match new_point.sequence {
            Some(sequence) => {
                if sequence < 1 {
                    return Err(ValidationError::InvalidInput(format!(
                        "Sequence must be at least 1 (got {})",
                        sequence
                    ))
                    .into());
                }
                if existing.iter().any(|p| p.sequence == sequence) {
                    return Err(Error::ConstraintViolation(format!(
                        "Sequence {} is already used in project '{}'",
                        sequence, project.name
                    )));
                }
                sequence
            }
            None => existing.iter().map(|p| p.sequence).max().unwrap_or(0) + 1,
        };

        debug!("Adding point #{} to project {}", sequence, project.id);
        self.repository
            .create(NewPoint {
                project_id: project.id,
                sequence: Some(sequence),
                name: require_text("name", &new_point.name)?,
                utility_pole_id: refs.utility_pole_id,
                medium_tension_group_id: refs.medium_tension_group_id,
                low_tension_group_id: refs.low_tension_group_id,
                medium_tension_cable_id: refs.medium_tension_cable_id,
                low_tension_cable_id: refs.low_tension_cable_id,
                ..new_point
            })
            .await
    }

    async fn update_point(&self, point_update: PointUpdate) -> Result<Point> {
        let existing = self.repository.get_by_id(&point_update.id)?;
        let project = self.editable_project(&existing.project_id)?;
        validate_position(
            point_update.latitude,
            point_update.longitude,
            point_update.span_length_m,
        )?;
        let refs = self.validate_references(
            &project,
            PointReferences {
                utility_pole_id: point_update.utility_pole_id.clone(),
                medium_tension_group_id: point_update.medium_tension_group_id.clone(),
                low_tension_group_id: point_update.low_tension_group_id.clone(),
                medium_tension_cable_id: point_update.medium_tension_cable_id.clone(),
                low_tension_cable_id: point_update.low_tension_cable_id.clone(),
            },
        )?;

        self.repository
            .update(PointUpdate {
                name: require_text("name", &point_update.name)?,
                utility_pole_id: refs.utility_pole_id,
                medium_tension_group_id: refs.medium_tension_group_id,
                low_tension_group_id: refs.low_tension_group_id,
                medium_tension_cable_id: refs.medium_tension_cable_id,
                low_tension_cable_id: refs.low_tension_cable_id,
                ..point_update
            })
            .await
    }

    async fn delete_point(&self, point_id: &str) -> Result<()> {
        let existing = self.repository.get_by_id(point_id)?;
        self.editable_project(&existing.project_id)?;
        self.repository.delete(point_id).await?;
        Ok(())
    }

    async fn reorder_points(&self, project_id: &str, ordered_ids: Vec<String>) -> Result<Vec<Point>> {
        let project = self.editable_project(project_id)?;
        let current = self.repository.list_by_project(&project.id)?;

        let current_ids: HashSet<&str> = current.iter().map(|p| p.id.as_str()).collect();
        let requested_ids: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();
        if requested_ids.len() != ordered_ids.len() || requested_ids != current_ids {
            return Err(ValidationError::InvalidInput(format!(
                "Reorder must list each of the {} points of project '{}' exactly once",
                current.len(),
                project.name
            ))
            .into());
        }

        let sequences = ordered_ids
            .into_iter()
            .zip(1..)
            .collect::<Vec<(String, i32)>>();
        self.repository
            .update_sequences(&project.id, sequences)
            .await?;
        self.repository.list_by_project(&project.id)
    }

    fn get_point(&self, point_id: &str) -> Result<Point> {
        self.repository.get_by_id(point_id)
    }

    fn list_points(&self, project_id: &str) -> Result<Vec<Point>> {
        self.repository.list_by_project(project_id)
    }
}
