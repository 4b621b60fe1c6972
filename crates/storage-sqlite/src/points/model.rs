use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::points::{NewPoint, Point};

use crate::utils::{new_id, now, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::points)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct PointDB {
    pub id: String,
    pub project_id: String,
    pub sequence: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub span_length_m: String,
    pub utility_pole_id: Option<String>,
    pub medium_tension_group_id: Option<String>,
    pub low_tension_group_id: Option<String>,
    pub medium_tension_cable_id: Option<String>,
    pub low_tension_cable_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PointDB> for Point {
    type Error = Error;

    fn try_from(db: PointDB) -> Result<Self, Self::Error> {
        Ok(Self {
            span_length_m: parse_decimal(&db.span_length_m, "points.span_length_m")?,
            id: db.id,
            project_id: db.project_id,
            sequence: db.sequence,
            name: db.name,
            latitude: db.latitude,
            longitude: db.longitude,
            utility_pole_id: db.utility_pole_id,
            medium_tension_group_id: db.medium_tension_group_id,
            low_tension_group_id: db.low_tension_group_id,
            medium_tension_cable_id: db.medium_tension_cable_id,
            low_tension_cable_id: db.low_tension_cable_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewPoint> for PointDB {
    fn from(domain: NewPoint) -> Self {
        let now = now();
        Self {
            id: new_id(domain.id),
            project_id: domain.project_id,
            sequence: domain.sequence.unwrap_or(1),
            name: domain.name,
            latitude: domain.latitude,
            longitude: domain.longitude,
            span_length_m: domain.span_length_m.to_string(),
            utility_pole_id: domain.utility_pole_id,
            medium_tension_group_id: domain.medium_tension_group_id,
            low_tension_group_id: domain.low_tension_group_id,
            medium_tension_cable_id: domain.medium_tension_cable_id,
            low_tension_cable_id: domain.low_tension_cable_id,
            created_at: now,
            updated_at: now,
        }
    }
}
