//! # Authorization Seam
//!
//! The menu service never inspects role storage itself; it asks an
//! explicit [`StoreAuthorizer`] capability handed to it at construction.
//! The production implementation (session lookup, role tables, caching)
//! lives outside this workspace.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MenuService::create_menu_item(user, store, dto)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authorizer.check_store_permission(user, store, [Owner, Admin])        │
//! │       │                                                                 │
//! │       ├── Ok(())            → proceed, open transaction                 │
//! │       └── Err(Forbidden)    → surface BEFORE any write                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use bistro_core::{MenuError, MenuResult, Role};

// =============================================================================
// Capability Trait
// =============================================================================

/// Grants or denies a user the right to act on a store.
///
/// Implementations succeed with `Ok(())` or fail with
/// [`MenuError::Forbidden`]; any other error means the check itself
/// broke and surfaces as `Internal`.
#[async_trait]
pub trait StoreAuthorizer: Send + Sync {
    /// Fails with `Forbidden` unless `user_id` holds one of `allowed`
    /// roles for `store_id`.
    async fn check_store_permission(
        &self,
        user_id: &str,
        store_id: &str,
        allowed: &[Role],
    ) -> MenuResult<()>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// A fixed in-memory role table.
///
/// Useful for tests and for embedders that resolve membership up front
/// (e.g. from a session token) and only need the capability shape.
#[derive(Debug, Default, Clone)]
pub struct StaticRoleSet {
    roles: HashMap<(String, String), Role>,
}

impl StaticRoleSet {
    /// Creates an empty role set (denies everyone).
    pub fn new() -> Self {
        StaticRoleSet::default()
    }

    /// Grants `user_id` the given role for `store_id`.
    pub fn grant(&mut self, user_id: impl Into<String>, store_id: impl Into<String>, role: Role) {
        self.roles
            .insert((user_id.into(), store_id.into()), role);
    }

    /// Builder-style [`grant`](Self::grant).
    pub fn with_role(
        mut self,
        user_id: impl Into<String>,
        store_id: impl Into<String>,
        role: Role,
    ) -> Self {
        self.grant(user_id, store_id, role);
        self
    }
}

#[async_trait]
impl StoreAuthorizer for StaticRoleSet {
    async fn check_store_permission(
        &self,
        user_id: &str,
        store_id: &str,
        allowed: &[Role],
    ) -> MenuResult<()> {
        let held = self
            .roles
            .get(&(user_id.to_string(), store_id.to_string()));

        debug!(%user_id, %store_id, ?held, "Checking store permission");

        match held {
            Some(role) if allowed.contains(role) => Ok(()),
            Some(_) => Err(MenuError::forbidden(format!(
                "user {user_id} lacks the required role for store {store_id}"
            ))),
            None => Err(MenuError::forbidden(format!(
                "user {user_id} is not a member of store {store_id}"
            ))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
