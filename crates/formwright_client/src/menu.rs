//! Menu Management Client
//!
//! The navigation tree lives on its own collaborator. Reordering uses
//! the same rank-list pattern as field reorder, applied to siblings
//! within the tree.

use crate::auth::AuthSession;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::transport::Transport;
use formwright_ids::MenuItemId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A node of the role-filtered navigation tree (`GET /menu`).
#[derive(Debug, Clone, Deserialize)]
pub struct MenuNode {
    pub id: MenuItemId,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

/// A flat management-view entry (`GET /management/menu`).
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub icon: String,
    pub parent_id: Option<MenuItemId>,
    /// Position among siblings; lower ranks render first.
    pub rank: u32,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Payload for creating or updating a menu item.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemPayload {
    pub title: String,
    pub path: String,
    pub icon: String,
    pub parent_id: Option<MenuItemId>,
    pub roles: Vec<String>,
}

#[derive(Serialize)]
struct ReorderRequest<'a> {
    /// Sibling ids in their new order; the server assigns ranks 0..n.
    ids: &'a [MenuItemId],
}

/// Client for `/menu` and `/management/menu`.
pub struct MenuClient {
    transport: Transport,
}

impl MenuClient {
    pub fn new(config: ApiConfig, session: Arc<AuthSession>) -> ApiResult<Self> {
        Ok(Self {
            transport: Transport::new(config, session)?,
        })
    }

    /// `GET /menu` - the tree filtered to the signed-in user's roles.
    pub async fn tree(&self) -> ApiResult<Vec<MenuNode>> {
        self.transport.get("/menu").await
    }

    /// `GET /management/menu` - the unfiltered flat list for admins.
    pub async fn manage_list(&self) -> ApiResult<Vec<MenuItem>> {
        self.transport.get("/management/menu").await
    }

    /// `POST /management/menu`
    pub async fn create(&self, payload: &MenuItemPayload) -> ApiResult<MenuItem> {
        self.transport.post("/management/menu", payload).await
    }

    /// `PUT /management/menu/{id}`
    pub async fn update(&self, id: MenuItemId, payload: &MenuItemPayload) -> ApiResult<MenuItem> {
        self.transport
            .put(&format!("/management/menu/{}", id), payload)
            .await
    }

    /// `DELETE /management/menu/{id}`
    pub async fn delete(&self, id: MenuItemId) -> ApiResult<()> {
        self.transport
            .delete(&format!("/management/menu/{}", id))
            .await
    }

    /// `POST /management/menu/reorder` - submit the new sibling order.
    pub async fn reorder(&self, ids: &[MenuItemId]) -> ApiResult<()> {
        let _: serde_json::Value = self
            .transport
            .post("/management/menu/reorder", &ReorderRequest { ids })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_wire_shape() {
        let json = format!(
            r#"[{{
                "id": "{}",
                "title": "Forms",
                "path": "/forms",
                "children": [
                    {{"id": "{}", "title": "Builder", "path": "/forms/new"}}
                ]
            }}]"#,
            MenuItemId::new(),
            MenuItemId::new()
        );

        let tree: Vec<MenuNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].title, "Builder");
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_reorder_payload_is_rank_list() {
        let ids = vec![MenuItemId::new(), MenuItemId::new()];
        let payload = serde_json::to_value(ReorderRequest { ids: &ids }).unwrap();
        let listed = payload["ids"].as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], serde_json::to_value(ids[0]).unwrap());
    }
}
