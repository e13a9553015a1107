//! # bistro-db: SQLite Persistence and the Menu Service
//!
//! The storage half of the menu reconciliation engine: SQLite pool and
//! migrations, thin repositories over the four menu tables, and the
//! transactional [`MenuService`] that ties them together under the
//! authorization seam.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         bistro-db Modules                               │
//! │                                                                         │
//! │  ┌──────────┐   ┌──────────────────────────────────────────────────┐   │
//! │  │   auth   │──►│                  menu (service)                  │   │
//! │  │ (seam)   │   │   resolver: category by id / by name             │   │
//! │  └──────────┘   │   sync: two-level replace-by-diff                │   │
//! │                 └──────────────┬───────────────────────────────────┘   │
//! │                                │ &mut *tx                               │
//! │  ┌──────────┐   ┌──────────────▼───────────────────────────────────┐   │
//! │  │   pool   │──►│               repository                         │   │
//! │  │migrations│   │   category • menu_item • customization           │   │
//! │  └──────────┘   └──────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Pure algorithm (diff planning, defaults, validation) lives in         │
//! │  bistro-core; this crate only executes it against SQLite.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod error;
pub mod menu;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use auth::{StaticRoleSet, StoreAuthorizer};
pub use error::{DbError, DbResult};
pub use menu::MenuService;
pub use pool::{Database, DbConfig};
