use chrono::NaiveDateTime;
use diesel::prelude::*;

use gridbudget_core::errors::Error;
use gridbudget_core::groups::{Group, GroupItem, NewGroupItem};

use crate::utils::{new_id, parse_decimal, parse_enum};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::network_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GroupDB {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub name: String,
    pub tension_level: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One line of a group. `position` keeps the order the items were given in.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::group_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GroupItemDB {
    pub id: String,
    pub group_id: String,
    pub position: i32,
    pub kind: String,
    pub reference_id: Option<String>,
    pub quantity: String,
    pub scales_with_phases: bool,
}

impl GroupItemDB {
    pub fn from_new(group_id: &str, position: i32, item: NewGroupItem) -> Self {
        Self {
            id: new_id(None),
            group_id: group_id.to_string(),
            position,
            kind: item.kind.as_str().to_string(),
            reference_id: item.reference_id,
            quantity: item.quantity.to_string(),
            scales_with_phases: item.scales_with_phases,
        }
    }
}

impl TryFrom<GroupItemDB> for GroupItem {
    type Error = Error;

    fn try_from(db: GroupItemDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_enum(&db.kind, "group_items.kind")?,
            quantity: parse_decimal(&db.quantity, "group_items.quantity")?,
            id: db.id,
            group_id: db.group_id,
            reference_id: db.reference_id,
            scales_with_phases: db.scales_with_phases,
        })
    }
}

impl GroupDB {
    /// Assembles the domain group from its header and already-ordered items.
    pub fn into_group(self, items: Vec<GroupItemDB>) -> Result<Group, Error> {
        Ok(Group {
            tension_level: parse_enum(&self.tension_level, "network_groups.tension_level")?,
            items: items
                .into_iter()
                .map(GroupItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            id: self.id,
            company_id: self.company_id,
            code: self.code,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
