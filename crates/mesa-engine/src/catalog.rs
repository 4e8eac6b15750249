//! # Catalog Service
//!
//! Administrator-facing catalog operations plus the read paths every
//! dashboard uses. All mutations are admin-gated here, publish a catalog
//! change on success, and are idempotent for retried duplicates bearing
//! the same resulting value.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use mesa_core::validation::{clamp_stock, validate_item_name, validate_price};
use mesa_core::{Actor, CoreError, MenuItem, Role};
use mesa_db::MenuRepository;
use mesa_sync::{CatalogChange, ChangeEvent, ChangeHub};

use crate::error::{EngineError, EngineResult};

/// Catalog operations for the dashboards.
#[derive(Debug, Clone)]
pub struct CatalogService {
    menu: MenuRepository,
    hub: ChangeHub,
}

impl CatalogService {
    /// Creates a new CatalogService.
    pub fn new(menu: MenuRepository, hub: ChangeHub) -> Self {
        CatalogService { menu, hub }
    }

    fn require_admin(actor: &Actor) -> EngineResult<()> {
        if actor.role != Role::Admin {
            return Err(EngineError::Forbidden {
                role: actor.role,
                action: "manage the catalog",
            });
        }
        Ok(())
    }

    /// Adds a menu item. Negative stock input clamps to zero; an empty
    /// name is a validation error.
    pub async fn add_item(
        &self,
        actor: &Actor,
        name: &str,
        stock: i64,
        price: i64,
    ) -> EngineResult<MenuItem> {
        Self::require_admin(actor)?;

        let name = validate_item_name(name).map_err(CoreError::from)?;
        validate_price(price).map_err(CoreError::from)?;

        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name,
            stock: clamp_stock(stock),
            price,
            created_at: now,
            updated_at: now,
        };

        self.menu.insert(&item).await?;
        info!(id = %item.id, name = %item.name, "Menu item added");

        self.hub
            .publish(ChangeEvent::Catalog(CatalogChange::Upserted(item.clone())));
        Ok(item)
    }

    /// Sets the absolute stock level, clamping negative input to zero.
    pub async fn update_stock(
        &self,
        actor: &Actor,
        item_id: &str,
        new_stock: i64,
    ) -> EngineResult<MenuItem> {
        Self::require_admin(actor)?;

        self.menu.set_stock(item_id, clamp_stock(new_stock)).await?;
        self.publish_updated(item_id).await
    }

    /// Atomically consumes stock, clamping at zero. No-op when the item
    /// is absent.
    pub async fn decrement_stock(&self, actor: &Actor, item_id: &str, qty: i64) -> EngineResult<()> {
        Self::require_admin(actor)?;

        self.menu.decrement_stock(item_id, qty).await?;
        if let Some(item) = self.menu.get_by_id(item_id).await? {
            self.hub
                .publish(ChangeEvent::Catalog(CatalogChange::Upserted(item)));
        }
        Ok(())
    }

    /// Sets the item price. Carts holding the item keep their snapshot.
    pub async fn update_price(
        &self,
        actor: &Actor,
        item_id: &str,
        new_price: i64,
    ) -> EngineResult<MenuItem> {
        Self::require_admin(actor)?;

        validate_price(new_price).map_err(CoreError::from)?;
        self.menu.set_price(item_id, new_price).await?;
        self.publish_updated(item_id).await
    }

    /// Deletes a menu item. Deleting an already-absent item is a
    /// successful no-op, so a retried delete is safe.
    pub async fn delete_item(&self, actor: &Actor, item_id: &str) -> EngineResult<()> {
        Self::require_admin(actor)?;

        if self.menu.delete(item_id).await? {
            info!(id = %item_id, "Menu item deleted");
            self.hub.publish(ChangeEvent::Catalog(CatalogChange::Deleted {
                id: item_id.to_string(),
            }));
        } else {
            debug!(id = %item_id, "Delete of absent menu item ignored");
        }
        Ok(())
    }

    /// Lists the catalog. Open to every role.
    pub async fn list(&self) -> EngineResult<Vec<MenuItem>> {
        Ok(self.menu.list().await?)
    }

    /// Gets one item.
    pub async fn get(&self, item_id: &str) -> EngineResult<MenuItem> {
        self.menu
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()).into())
    }

    async fn publish_updated(&self, item_id: &str) -> EngineResult<MenuItem> {
        let item = self.get(item_id).await?;
        self.hub
            .publish(ChangeEvent::Catalog(CatalogChange::Upserted(item.clone())));
        Ok(item)
    }
}
