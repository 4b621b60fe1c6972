//! In-memory repositories backing the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::bases::{Base, BaseRepositoryTrait, BaseUpdate, NewBase};
use crate::budgets::{Budget, BudgetRepositoryTrait, BudgetSnapshot, CatalogRepositories};
use crate::cables::{Cable, CableRepositoryTrait, CableUpdate, NewCable};
use crate::companies::{Company, CompanyRepositoryTrait, CompanyUpdate, NewCompany};
use crate::connectors::{Connector, ConnectorRepositoryTrait, ConnectorUpdate, NewConnector};
use crate::errors::{DatabaseError, Error, Result};
use crate::groups::{Group, GroupItem, GroupItemKind, GroupRepositoryTrait, GroupUpdate, NewGroup, NewGroupItem};
use crate::materials::{Material, MaterialRepositoryTrait, MaterialUpdate, NewMaterial};
use crate::notifications::{NewNotification, Notification, NotificationRepositoryTrait};
use crate::points::{NewPoint, Point, PointRepositoryTrait, PointUpdate};
use crate::pole_screws::{NewPoleScrew, PoleScrew, PoleScrewRepositoryTrait, PoleScrewUpdate};
use crate::projects::{NewProject, Project, ProjectRepositoryTrait, ProjectStatus, ProjectUpdate};
use crate::tension::TensionLevel;
use crate::users::{NewUser, Role, User, UserRepositoryTrait, UserUpdate};
use crate::utility_poles::{
    NewUtilityPole, UtilityPole, UtilityPoleRepositoryTrait, UtilityPoleUpdate,
};

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn new_id(id: Option<String>) -> String {
    id.unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn not_found(entity: &str, id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!("{} {}", entity, id)))
}

fn remove_where<T>(rows: &Mutex<Vec<T>>, pred: impl Fn(&T) -> bool) -> usize {
    let mut rows = rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|r| !pred(r));
    before - rows.len()
}

/// Single store implementing every repository trait.
#[derive(Default)]
pub struct InMemoryStore {
    pub companies: Mutex<Vec<Company>>,
    pub bases: Mutex<Vec<Base>>,
    pub users: Mutex<Vec<User>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub materials: Mutex<Vec<Material>>,
    pub cables: Mutex<Vec<Cable>>,
    pub connectors: Mutex<Vec<Connector>>,
    pub pole_screws: Mutex<Vec<PoleScrew>>,
    pub utility_poles: Mutex<Vec<UtilityPole>>,
    pub groups: Mutex<Vec<Group>>,
    pub projects: Mutex<Vec<Project>>,
    pub points: Mutex<Vec<Point>>,
    pub budgets: Mutex<Vec<BudgetSnapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn catalog(self: &Arc<Self>) -> CatalogRepositories {
        CatalogRepositories {
            materials: self.clone(),
            cables: self.clone(),
            connectors: self.clone(),
            pole_screws: self.clone(),
            utility_poles: self.clone(),
            groups: self.clone(),
        }
    }

    // --- seeding helpers -------------------------------------------------

    pub fn seed_company(&self, id: &str) -> Company {
        let company = Company {
            id: id.to_string(),
            name: format!("Company {}", id),
            document: format!("{:0>14}", id.len()),
            is_active: true,
            created_at: now(),
            updated_at: now(),
        };
        self.companies.lock().unwrap().push(company.clone());
        company
    }

    pub fn seed_base(&self, id: &str, company_id: &str) -> Base {
        let base = Base {
            id: id.to_string(),
            company_id: company_id.to_string(),
            name: format!("Base {}", id),
            city: "Campinas".to_string(),
            state: "SP".to_string(),
            created_at: now(),
            updated_at: now(),
        };
        self.bases.lock().unwrap().push(base.clone());
        base
    }

    pub fn seed_user(&self, id: &str, company_id: &str, base_id: Option<&str>, role: Role) -> User {
        let user = User {
            id: id.to_string(),
            company_id: company_id.to_string(),
            base_id: base_id.map(str::to_string),
            name: format!("User {}", id),
            email: format!("{}@example.com", id),
            role,
            avatar_url: None,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn seed_material(&self, id: &str, company_id: &str, unit: &str, price: Decimal) -> Material {
        let material = Material {
            id: id.to_string(),
            company_id: company_id.to_string(),
            code: id.to_uppercase(),
            description: format!("Material {}", id),
            unit: unit.to_string(),
            unit_price: price,
            created_at: now(),
            updated_at: now(),
        };
        self.materials.lock().unwrap().push(material.clone());
        material
    }

    pub fn seed_cable(&self, id: &str, company_id: &str, tension_level: TensionLevel, price: Decimal) -> Cable {
        let cable = Cable {
            id: id.to_string(),
            company_id: company_id.to_string(),
            code: id.to_uppercase(),
            description: format!("Cable {}", id),
            tension_level,
            section_mm2: Decimal::from(35),
            unit_price: price,
            created_at: now(),
            updated_at: now(),
        };
        self.cables.lock().unwrap().push(cable.clone());
        cable
    }

    pub fn seed_connector(&self, id: &str, company_id: &str, price: Decimal) -> Connector {
        let connector = Connector {
            id: id.to_string(),
            company_id: company_id.to_string(),
            code: id.to_uppercase(),
            description: format!("Connector {}", id),
            unit_price: price,
            created_at: now(),
            updated_at: now(),
        };
        self.connectors.lock().unwrap().push(connector.clone());
        connector
    }

    pub fn seed_pole_screw(&self, id: &str, company_id: &str, length_mm: i32, price: Decimal) -> PoleScrew {
        let screw = PoleScrew {
            id: id.to_string(),
            company_id: company_id.to_string(),
            code: id.to_uppercase(),
            description: format!("Pole screw {} mm", length_mm),
            length_mm,
            unit_price: price,
            created_at: now(),
            updated_at: now(),
        };
        self.pole_screws.lock().unwrap().push(screw.clone());
        screw
    }

    pub fn seed_utility_pole(&self, id: &str, company_id: &str, min_screw_length_mm: i32, price: Decimal) -> UtilityPole {
        let pole = UtilityPole {
            id: id.to_string(),
            company_id: company_id.to_string(),
            code: id.to_uppercase(),
            description: format!("Pole {}", id),
            height_m: Decimal::from(11),
            strength_dan: 300,
            min_screw_length_mm,
            unit_price: price,
            created_at: now(),
            updated_at: now(),
        };
        self.utility_poles.lock().unwrap().push(pole.clone());
        pole
    }

    pub fn seed_group(&self, id: &str, company_id: &str, tension_level: TensionLevel, items: Vec<NewGroupItem>) -> Group {
        let group = Group {
            id: id.to_string(),
            company_id: company_id.to_string(),
            code: id.to_uppercase(),
            name: format!("Group {}", id),
            tension_level,
            items: materialize_items(id, items),
            created_at: now(),
            updated_at: now(),
        };
        self.groups.lock().unwrap().push(group.clone());
        group
    }

    pub fn seed_project(&self, id: &str, company_id: &str, mt_phases: i32, lt_phases: i32) -> Project {
        let project = Project {
            id: id.to_string(),
            company_id: company_id.to_string(),
            base_id: None,
            name: format!("Project {}", id),
            description: None,
            city: "Campinas".to_string(),
            medium_tension_phases: mt_phases,
            low_tension_phases: lt_phases,
            status: ProjectStatus::Draft,
            created_at: now(),
            updated_at: now(),
        };
        self.projects.lock().unwrap().push(project.clone());
        project
    }

    pub fn seed_point(&self, point: Point) -> Point {
        self.points.lock().unwrap().push(point.clone());
        point
    }
}

fn materialize_items(group_id: &str, items: Vec<NewGroupItem>) -> Vec<GroupItem> {
    items
        .into_iter()
        .map(|i| GroupItem {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            kind: i.kind,
            reference_id: i.reference_id,
            quantity: i.quantity,
            scales_with_phases: i.scales_with_phases,
        })
        .collect()
}

/// A point with no references, to be customized with struct update syntax.
pub fn blank_point(id: &str, project_id: &str, sequence: i32) -> Point {
    Point {
        id: id.to_string(),
        project_id: project_id.to_string(),
        sequence,
        name: format!("P{}", sequence),
        latitude: None,
        longitude: None,
        span_length_m: Decimal::ZERO,
        utility_pole_id: None,
        medium_tension_group_id: None,
        low_tension_group_id: None,
        medium_tension_cable_id: None,
        low_tension_cable_id: None,
        created_at: now(),
        updated_at: now(),
    }
}

#[async_trait]
impl CompanyRepositoryTrait for InMemoryStore {
    async fn create(&self, new_company: NewCompany) -> Result<Company> {
        let company = Company {
            id: new_id(new_company.id),
            name: new_company.name,
            document: new_company.document,
            is_active: new_company.is_active,
            created_at: now(),
            updated_at: now(),
        };
        self.companies.lock().unwrap().push(company.clone());
        Ok(company)
    }

    async fn update(&self, update: CompanyUpdate) -> Result<Company> {
        let mut rows = self.companies.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| not_found("company", &update.id))?;
        row.name = update.name;
        row.document = update.document;
        row.is_active = update.is_active;
        row.updated_at = now();
        Ok(row.clone())
    }

    async fn delete(&self, company_id: &str) -> Result<usize> {
        Ok(remove_where(&self.companies, |c| c.id == company_id))
    }

    fn get_by_id(&self, company_id: &str) -> Result<Company> {
        self.companies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == company_id)
            .cloned()
            .ok_or_else(|| not_found("company", company_id))
    }

    fn find_by_document(&self, document: &str) -> Result<Option<Company>> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.document == document)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Company>> {
        Ok(self.companies.lock().unwrap().clone())
    }
}

#[async_trait]
impl BaseRepositoryTrait for InMemoryStore {
    async fn create(&self, new_base: NewBase) -> Result<Base> {
        let base = Base {
            id: new_id(new_base.id),
            company_id: new_base.company_id,
            name: new_base.name,
            city: new_base.city,
            state: new_base.state,
            created_at: now(),
            updated_at: now(),
        };
        self.bases.lock().unwrap().push(base.clone());
        Ok(base)
    }

    async fn update(&self, update: BaseUpdate) -> Result<Base> {
        let mut rows = self.bases.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|b| b.id == update.id)
            .ok_or_else(|| not_found("base", &update.id))?;
        row.name = update.name;
        row.city = update.city;
        row.state = update.state;
        row.updated_at = now();
        Ok(row.clone())
    }

    async fn delete(&self, base_id: &str) -> Result<usize> {
        Ok(remove_where(&self.bases, |b| b.id == base_id))
    }

    fn get_by_id(&self, base_id: &str) -> Result<Base> {
        self.bases
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == base_id)
            .cloned()
            .ok_or_else(|| not_found("base", base_id))
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<Base>> {
        Ok(self
            .bases
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let user = User {
            id: new_id(new_user.id),
            company_id: new_user.company_id,
            base_id: new_user.base_id,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            avatar_url: None,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> Result<User> {
        let mut rows = self.users.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| not_found("user", &update.id))?;
        row.base_id = update.base_id;
        row.name = update.name;
        row.email = update.email;
        row.is_active = update.is_active;
        row.updated_at = now();
        Ok(row.clone())
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        Ok(remove_where(&self.users, |u| u.id == user_id))
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<User> {
        let mut rows = self.users.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| not_found("user", user_id))?;
        row.role = role;
        Ok(row.clone())
    }

    async fn update_avatar(&self, user_id: &str, avatar_url: Option<String>) -> Result<User> {
        let mut rows = self.users.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| not_found("user", user_id))?;
        row.avatar_url = avatar_url;
        Ok(row.clone())
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| not_found("user", user_id))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    fn list(&self, company_id: &str, base_id: Option<&str>) -> Result<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.company_id == company_id)
            .filter(|u| base_id.is_none() || u.base_id.as_deref() == base_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationRepositoryTrait for InMemoryStore {
    async fn create(&self, new_notification: NewNotification) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: new_notification.user_id,
            title: new_notification.title,
            message: new_notification.message,
            is_read: false,
            created_at: now(),
            read_at: None,
        };
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification> {
        let mut rows = self.notifications.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| not_found("notification", notification_id))?;
        if !row.is_read {
            row.is_read = true;
            row.read_at = Some(now());
        }
        Ok(row.clone())
    }

    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize> {
        let mut rows = self.notifications.lock().unwrap();
        let mut changed = 0;
        for row in rows.iter_mut().filter(|n| n.user_id == user_id && !n.is_read) {
            row.is_read = true;
            row.read_at = Some(now());
            changed += 1;
        }
        Ok(changed)
    }

    async fn delete(&self, notification_id: &str) -> Result<usize> {
        Ok(remove_where(&self.notifications, |n| n.id == notification_id))
    }

    fn list_for_user(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        let mut rows: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }

    fn count_unread(&self, user_id: &str) -> Result<i64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }
}

#[async_trait]
impl MaterialRepositoryTrait for InMemoryStore {
    async fn create(&self, new_material: NewMaterial) -> Result<Material> {
        let material = Material {
            id: new_id(new_material.id),
            company_id: new_material.company_id,
            code: new_material.code,
            description: new_material.description,
            unit: new_material.unit,
            unit_price: new_material.unit_price,
            created_at: now(),
            updated_at: now(),
        };
        self.materials.lock().unwrap().push(material.clone());
        Ok(material)
    }

    async fn update(&self, update: MaterialUpdate) -> Result<Material> {
        let mut rows = self.materials.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|m| m.id == update.id)
            .ok_or_else(|| not_found("material", &update.id))?;
        row.code = update.code;
        row.description = update.description;
        row.unit = update.unit;
        row.unit_price = update.unit_price;
        Ok(row.clone())
    }

    async fn delete(&self, material_id: &str) -> Result<usize> {
        Ok(remove_where(&self.materials, |m| m.id == material_id))
    }

    fn get_by_id(&self, material_id: &str) -> Result<Material> {
        self.materials
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == material_id)
            .cloned()
            .ok_or_else(|| not_found("material", material_id))
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Material>> {
        Ok(self
            .materials
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.company_id == company_id && m.code == code)
            .cloned())
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<Material>> {
        let mut rows: Vec<Material> = self
            .materials
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.company_id == company_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(rows)
    }
}

#[async_trait]
impl CableRepositoryTrait for InMemoryStore {
    async fn create(&self, new_cable: NewCable) -> Result<Cable> {
        let cable = Cable {
            id: new_id(new_cable.id),
            company_id: new_cable.company_id,
            code: new_cable.code,
            description: new_cable.description,
            tension_level: new_cable.tension_level,
            section_mm2: new_cable.section_mm2,
            unit_price: new_cable.unit_price,
            created_at: now(),
            updated_at: now(),
        };
        self.cables.lock().unwrap().push(cable.clone());
        Ok(cable)
    }

    async fn update(&self, update: CableUpdate) -> Result<Cable> {
        let mut rows = self.cables.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| not_found("cable", &update.id))?;
        row.code = update.code;
        row.description = update.description;
        row.tension_level = update.tension_level;
        row.section_mm2 = update.section_mm2;
        row.unit_price = update.unit_price;
        Ok(row.clone())
    }

    async fn delete(&self, cable_id: &str) -> Result<usize> {
        Ok(remove_where(&self.cables, |c| c.id == cable_id))
    }

    fn get_by_id(&self, cable_id: &str) -> Result<Cable> {
        self.cables
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == cable_id)
            .cloned()
            .ok_or_else(|| not_found("cable", cable_id))
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Cable>> {
        Ok(self
            .cables
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.company_id == company_id && c.code == code)
            .cloned())
    }

    fn list_by_company(&self, company_id: &str, tension_level: Option<TensionLevel>) -> Result<Vec<Cable>> {
        Ok(self
            .cables
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.company_id == company_id)
            .filter(|c| tension_level.map_or(true, |t| c.tension_level == t))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ConnectorRepositoryTrait for InMemoryStore {
    async fn create(&self, new_connector: NewConnector) -> Result<Connector> {
        let connector = Connector {
            id: new_id(new_connector.id),
            company_id: new_connector.company_id,
            code: new_connector.code,
            description: new_connector.description,
            unit_price: new_connector.unit_price,
            created_at: now(),
            updated_at: now(),
        };
        self.connectors.lock().unwrap().push(connector.clone());
        Ok(connector)
    }

    async fn update(&self, update: ConnectorUpdate) -> Result<Connector> {
        let mut rows = self.connectors.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| not_found("connector", &update.id))?;
        row.code = update.code;
        row.description = update.description;
        row.unit_price = update.unit_price;
        Ok(row.clone())
    }

    async fn delete(&self, connector_id: &str) -> Result<usize> {
        Ok(remove_where(&self.connectors, |c| c.id == connector_id))
    }

    fn get_by_id(&self, connector_id: &str) -> Result<Connector> {
        self.connectors
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == connector_id)
            .cloned()
            .ok_or_else(|| not_found("connector", connector_id))
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Connector>> {
        Ok(self
            .connectors
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.company_id == company_id && c.code == code)
            .cloned())
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<Connector>> {
        Ok(self
            .connectors
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PoleScrewRepositoryTrait for InMemoryStore {
    async fn create(&self, new_pole_screw: NewPoleScrew) -> Result<PoleScrew> {
        let screw = PoleScrew {
            id: new_id(new_pole_screw.id),
            company_id: new_pole_screw.company_id,
            code: new_pole_screw.code,
            description: new_pole_screw.description,
            length_mm: new_pole_screw.length_mm,
            unit_price: new_pole_screw.unit_price,
            created_at: now(),
            updated_at: now(),
        };
        self.pole_screws.lock().unwrap().push(screw.clone());
        Ok(screw)
    }

    async fn update(&self, update: PoleScrewUpdate) -> Result<PoleScrew> {
        let mut rows = self.pole_screws.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == update.id)
            .ok_or_else(|| not_found("pole screw", &update.id))?;
        row.code = update.code;
        row.description = update.description;
        row.length_mm = update.length_mm;
        row.unit_price = update.unit_price;
        Ok(row.clone())
    }

    async fn delete(&self, pole_screw_id: &str) -> Result<usize> {
        Ok(remove_where(&self.pole_screws, |s| s.id == pole_screw_id))
    }

    fn get_by_id(&self, pole_screw_id: &str) -> Result<PoleScrew> {
        self.pole_screws
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == pole_screw_id)
            .cloned()
            .ok_or_else(|| not_found("pole screw", pole_screw_id))
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<PoleScrew>> {
        Ok(self
            .pole_screws
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.company_id == company_id && s.code == code)
            .cloned())
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<PoleScrew>> {
        let mut rows: Vec<PoleScrew> = self
            .pole_screws
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.company_id == company_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.length_mm.cmp(&b.length_mm).then_with(|| a.code.cmp(&b.code)));
        Ok(rows)
    }
}

#[async_trait]
impl UtilityPoleRepositoryTrait for InMemoryStore {
    async fn create(&self, new_pole: NewUtilityPole) -> Result<UtilityPole> {
        let pole = UtilityPole {
            id: new_id(new_pole.id),
            company_id: new_pole.company_id,
            code: new_pole.code,
            description: new_pole.description,
            height_m: new_pole.height_m,
            strength_dan: new_pole.strength_dan,
            min_screw_length_mm: new_pole.min_screw_length_mm,
            unit_price: new_pole.unit_price,
            created_at: now(),
            updated_at: now(),
        };
        self.utility_poles.lock().unwrap().push(pole.clone());
        Ok(pole)
    }

    async fn update(&self, update: UtilityPoleUpdate) -> Result<UtilityPole> {
        let mut rows = self.utility_poles.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| not_found("utility pole", &update.id))?;
        row.code = update.code;
        row.description = update.description;
        row.height_m = update.height_m;
        row.strength_dan = update.strength_dan;
        row.min_screw_length_mm = update.min_screw_length_mm;
        row.unit_price = update.unit_price;
        Ok(row.clone())
    }

    async fn delete(&self, pole_id: &str) -> Result<usize> {
        Ok(remove_where(&self.utility_poles, |p| p.id == pole_id))
    }

    fn get_by_id(&self, pole_id: &str) -> Result<UtilityPole> {
        self.utility_poles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == pole_id)
            .cloned()
            .ok_or_else(|| not_found("utility pole", pole_id))
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<UtilityPole>> {
        Ok(self
            .utility_poles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.company_id == company_id && p.code == code)
            .cloned())
    }

    fn list_by_company(&self, company_id: &str) -> Result<Vec<UtilityPole>> {
        Ok(self
            .utility_poles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GroupRepositoryTrait for InMemoryStore {
    async fn create(&self, new_group: NewGroup) -> Result<Group> {
        let id = new_id(new_group.id);
        let group = Group {
            items: materialize_items(&id, new_group.items),
            id,
            company_id: new_group.company_id,
            code: new_group.code,
            name: new_group.name,
            tension_level: new_group.tension_level,
            created_at: now(),
            updated_at: now(),
        };
        self.groups.lock().unwrap().push(group.clone());
        Ok(group)
    }

    async fn update(&self, update: GroupUpdate) -> Result<Group> {
        let mut rows = self.groups.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|g| g.id == update.id)
            .ok_or_else(|| not_found("group", &update.id))?;
        row.code = update.code;
        row.name = update.name;
        row.tension_level = update.tension_level;
        row.items = materialize_items(&update.id, update.items);
        Ok(row.clone())
    }

    async fn delete(&self, group_id: &str) -> Result<usize> {
        Ok(remove_where(&self.groups, |g| g.id == group_id))
    }

    fn get_by_id(&self, group_id: &str) -> Result<Group> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
            .ok_or_else(|| not_found("group", group_id))
    }

    fn find_by_code(&self, company_id: &str, code: &str) -> Result<Option<Group>> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.company_id == company_id && g.code == code)
            .cloned())
    }

    fn list_by_company(&self, company_id: &str, tension_level: Option<TensionLevel>) -> Result<Vec<Group>> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.company_id == company_id)
            .filter(|g| tension_level.map_or(true, |t| g.tension_level == t))
            .cloned()
            .collect())
    }

    fn find_referencing_codes(&self, kind: GroupItemKind, reference_id: &str) -> Result<Vec<String>> {
        let mut codes: Vec<String> = self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|g| {
                g.items
                    .iter()
                    .any(|i| i.kind == kind && i.reference_id.as_deref() == Some(reference_id))
            })
            .map(|g| g.code.clone())
            .collect();
        codes.sort();
        Ok(codes)
    }
}

#[async_trait]
impl ProjectRepositoryTrait for InMemoryStore {
    async fn create(&self, new_project: NewProject) -> Result<Project> {
        let project = Project {
            id: new_id(new_project.id),
            company_id: new_project.company_id,
            base_id: new_project.base_id,
            name: new_project.name,
            description: new_project.description,
            city: new_project.city,
            medium_tension_phases: new_project.medium_tension_phases,
            low_tension_phases: new_project.low_tension_phases,
            status: ProjectStatus::Draft,
            created_at: now(),
            updated_at: now(),
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update(&self, update: ProjectUpdate) -> Result<Project> {
        let mut rows = self.projects.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| not_found("project", &update.id))?;
        row.base_id = update.base_id;
        row.name = update.name;
        row.description = update.description;
        row.city = update.city;
        row.medium_tension_phases = update.medium_tension_phases;
        row.low_tension_phases = update.low_tension_phases;
        Ok(row.clone())
    }

    async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<Project> {
        let mut rows = self.projects.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| not_found("project", project_id))?;
        row.status = status;
        Ok(row.clone())
    }

    async fn delete(&self, project_id: &str) -> Result<usize> {
        Ok(remove_where(&self.projects, |p| p.id == project_id))
    }

    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| not_found("project", project_id))
    }

    fn list(&self, company_id: &str, status: Option<ProjectStatus>) -> Result<Vec<Project>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.company_id == company_id)
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PointRepositoryTrait for InMemoryStore {
    async fn create(&self, new_point: NewPoint) -> Result<Point> {
        let point = Point {
            id: new_id(new_point.id),
            project_id: new_point.project_id,
            sequence: new_point.sequence.unwrap_or(1),
            name: new_point.name,
            latitude: new_point.latitude,
            longitude: new_point.longitude,
            span_length_m: new_point.span_length_m,
            utility_pole_id: new_point.utility_pole_id,
            medium_tension_group_id: new_point.medium_tension_group_id,
            low_tension_group_id: new_point.low_tension_group_id,
            medium_tension_cable_id: new_point.medium_tension_cable_id,
            low_tension_cable_id: new_point.low_tension_cable_id,
            created_at: now(),
            updated_at: now(),
        };
        self.points.lock().unwrap().push(point.clone());
        Ok(point)
    }

    async fn update(&self, update: PointUpdate) -> Result<Point> {
        let mut rows = self.points.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| not_found("point", &update.id))?;
        row.name = update.name;
        row.latitude = update.latitude;
        row.longitude = update.longitude;
        row.span_length_m = update.span_length_m;
        row.utility_pole_id = update.utility_pole_id;
        row.medium_tension_group_id = update.medium_tension_group_id;
        row.low_tension_group_id = update.low_tension_group_id;
        row.medium_tension_cable_id = update.medium_tension_cable_id;
        row.low_tension_cable_id = update.low_tension_cable_id;
        Ok(row.clone())
    }

    async fn delete(&self, point_id: &str) -> Result<usize> {
        Ok(remove_where(&self.points, |p| p.id == point_id))
    }

    async fn update_sequences(&self, project_id: &str, sequences: Vec<(String, i32)>) -> Result<usize> {
        let mut rows = self.points.lock().unwrap();
        let mut changed = 0;
        for (point_id, sequence) in sequences {
            if let Some(row) = rows
                .iter_mut()
                .find(|p| p.id == point_id && p.project_id == project_id)
            {
                row.sequence = sequence;
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn get_by_id(&self, point_id: &str) -> Result<Point> {
        self.points
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == point_id)
            .cloned()
            .ok_or_else(|| not_found("point", point_id))
    }

    fn list_by_project(&self, project_id: &str) -> Result<Vec<Point>> {
        let mut rows: Vec<Point> = self
            .points
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.sequence);
        Ok(rows)
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    async fn save_and_mark_budgeted(&self, budget: Budget) -> Result<BudgetSnapshot> {
        {
            let mut projects = self.projects.lock().unwrap();
            let project = projects
                .iter_mut()
                .find(|p| p.id == budget.project_id)
                .ok_or_else(|| not_found("project", &budget.project_id))?;
            if project.status == ProjectStatus::Draft {
                project.status = ProjectStatus::Budgeted;
                project.updated_at = now();
            }
        }
        let snapshot = BudgetSnapshot {
            id: Uuid::new_v4().to_string(),
            project_id: budget.project_id,
            lines: budget.lines,
            total: budget.total,
            point_count: budget.point_count,
            calculated_at: budget.calculated_at,
        };
        self.budgets.lock().unwrap().push(snapshot.clone());
        Ok(snapshot)
    }

    fn get_by_id(&self, budget_id: &str) -> Result<BudgetSnapshot> {
        self.budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == budget_id)
            .cloned()
            .ok_or_else(|| not_found("budget", budget_id))
    }

    fn get_latest(&self, project_id: &str) -> Result<Option<BudgetSnapshot>> {
        Ok(BudgetRepositoryTrait::list_by_project(self, project_id)?
            .into_iter()
            .next())
    }

    fn list_by_project(&self, project_id: &str) -> Result<Vec<BudgetSnapshot>> {
        let mut rows: Vec<BudgetSnapshot> = self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.project_id == project_id)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }
}
