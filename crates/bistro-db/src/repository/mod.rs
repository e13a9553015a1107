//! # Repositories
//!
//! Point CRUD and aggregate operations on the four menu collections.
//!
//! Every function takes the executor as an explicit
//! `&mut SqliteConnection` parameter instead of capturing a pool: the
//! menu service owns exactly one transaction per operation and threads
//! it through, so the commit/rollback boundary is visible at every call
//! site. Callers outside a transaction pass a plain acquired connection.

pub mod category;
pub mod customization;
pub mod menu_item;
