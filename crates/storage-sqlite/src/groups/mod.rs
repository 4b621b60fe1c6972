//! SQLite storage for network groups and their items.
//!
//! The `groups` name is reserved in SQL, so the header rows live in
//! `network_groups` and the items in `group_items`.

mod model;
mod repository;

pub use model::{GroupDB, GroupItemDB};
pub use repository::GroupRepository;
