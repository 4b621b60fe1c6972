use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use gridbudget_core::groups::{
    Group, GroupItemKind, GroupRepositoryTrait, GroupUpdate, NewGroup, NewGroupItem,
};
use gridbudget_core::{Result, TensionLevel};

use super::model::{GroupDB, GroupItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{group_items, network_groups};
use crate::utils::{chunk_for_sqlite, new_id, now};

pub struct GroupRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GroupRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn insert_items(
    conn: &mut SqliteConnection,
    group_id: &str,
    items: Vec<NewGroupItem>,
) -> Result<Vec<GroupItemDB>> {
    let rows: Vec<GroupItemDB> = items
        .into_iter()
        .enumerate()
        .map(|(position, item)| GroupItemDB::from_new(group_id, position as i32, item))
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(group_items::table)
            .values(&rows)
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(rows)
}

fn load_items(conn: &mut SqliteConnection, group_id: &str) -> Result<Vec<GroupItemDB>> {
    Ok(group_items::table
        .filter(group_items::group_id.eq(group_id))
        .select(GroupItemDB::as_select())
        .order(group_items::position.asc())
        .load::<GroupItemDB>(conn)
        .map_err(StorageError::from)?)
}

/// Loads headers' items in bulk and assembles the groups in header order.
fn assemble(conn: &mut SqliteConnection, headers: Vec<GroupDB>) -> Result<Vec<Group>> {
    let ids: Vec<String> = headers.iter().map(|g| g.id.clone()).collect();
    let mut by_group: HashMap<String, Vec<GroupItemDB>> = HashMap::new();

    for chunk in chunk_for_sqlite(&ids) {
        let rows = group_items::table
            .filter(group_items::group_id.eq_any(chunk))
            .select(GroupItemDB::as_select())
            .order((group_items::group_id.asc(), group_items::position.asc()))
            .load::<GroupItemDB>(conn)
            .map_err(StorageError::from)?;
        for row in rows {
            by_group.entry(row.group_id.clone()).or_default().push(row);
        }
    }

    headers
        .into_iter()
        .map(|header| {
            let items = by_group.remove(&header.id).unwrap_or_default();
            header.into_group(items)
        })
        .collect()
}

#[async_trait]
impl GroupRepositoryTrait for GroupRepository {
    async fn create(&self, new_group: NewGroup) -> Result<Group> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Group> {
                let now = now();
                let header = GroupDB {
                    id: new_id(new_group.id),
                    company_id: new_group.company_id,
                    code: new_group.code,
                    name: new_group.name,
                    tension_level: new_group.tension_level.as_str().to_string(),
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(network_groups::table)
                    .values(&header)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let items = insert_items(conn, &header.id, new_group.items)?;
                header.into_group(items)
            })
            .await
    }

    async fn update(&self, group_update: GroupUpdate) -> Result<Group> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Group> {
                let existing = network_groups::table
                    .find(&group_update.id)
                    .select(GroupDB::as_select())
                    .first::<GroupDB>(conn)
                    .map_err(StorageError::from)?;

                let header = GroupDB {
                    code: group_update.code,
                    name: group_update.name,
                    tension_level: group_update.tension_level.as_str().to_string(),
                    updated_at: now(),
                    ..existing
                };
                diesel::update(network_groups::table.find(&header.id))
                    .set(&header)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                diesel::delete(group_items::table.filter(group_items::group_id.eq(&header.id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let items = insert_items(conn, &header.id, group_update.items)?;
                header.into_group(items)
            })
            .await
    }

    async fn delete(&self, group_id: &str) -> Result<usize> {
        let group_id = group_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(network_groups::table.find(group_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, group_id: &str) -> Result<Group> {
        let mut conn = get_connection(&self.pool)?;
        let header = network_groups::table
            .find(group_id)
            .select(GroupDB::as_select())
            .first::<GroupDB>(&mut conn)
            .map_err(StorageError::from)?;
        let items = load_items(&mut conn, &header.id)?;
        header.into_group(items)
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Group>> {
        let mut conn = get_connection(&self.pool)?;
        let header = network_groups::table
            .filter(network_groups::company_id.eq(company_id))
            .filter(network_groups::code.eq(code))
            .select(GroupDB::as_select())
            .first::<GroupDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        match header {
            Some(header) => {
                let items = load_items(&mut conn, &header.id)?;
                header.into_group(items).map(Some)
            }
            None => Ok(None),
        }
    }

    fn find_referencing_codes(
        &self,
        kind: GroupItemKind,
        reference_id: &str,
    ) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(network_groups::table
            .inner_join(group_items::table)
            .filter(group_items::kind.eq(kind.as_str()))
            .filter(group_items::reference_id.eq(reference_id))
            .select(network_groups::code)
            .distinct()
            .order(network_groups::code.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?)
    }

    fn list_by_company(
        &self,
        company_id: &str,
        tension_level: Option<TensionLevel>,
    ) -> Result<Vec<Group>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = network_groups::table
            .filter(network_groups::company_id.eq(company_id))
            .into_boxed();
        if let Some(level) = tension_level {
            query = query.filter(network_groups::tension_level.eq(level.as_str()));
        }
        let headers = query
            .select(GroupDB::as_select())
            .order(network_groups::code.asc())
            .load::<GroupDB>(&mut conn)
            .map_err(StorageError::from)?;
        assemble(&mut conn, headers)
    }
}
