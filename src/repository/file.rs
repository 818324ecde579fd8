//! File-backed order store.
//!
//! Orders live in memory and are written to a JSON file after every
//! mutation. Writes go to a sibling temp file which is then renamed over
//! the data file, so the file on disk is always a complete snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{sort_newest_first, OrderRepository};
use crate::error::{StoreError, StoreResult};
use crate::models::Order;

/// Order store persisted as a JSON array on disk.
///
/// A mutation whose write fails is rolled back in memory and reported as
/// a store failure, so memory never runs ahead of the file.
#[derive(Debug)]
pub struct FileOrderRepository {
    path: PathBuf,
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl FileOrderRepository {
    /// Opens the store at `path`, loading it if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let orders = if fs::try_exists(&path).await? {
            let contents = fs::read(&path).await?;
            let records: Vec<Order> = if contents.is_empty() {
                Vec::new()
            } else {
                serde_json::from_slice(&contents)?
            };
            info!(count = records.len(), path = ?path, "Loaded orders from data file");
            records.into_iter().map(|order| (order.id, order)).collect()
        } else {
            info!(path = ?path, "Data file not found, starting empty");
            HashMap::new()
        };

        Ok(Self {
            path,
            orders: RwLock::new(orders),
        })
    }

    /// Sibling of the data file named `<file name>.tmp`, never the data file itself.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn persist(&self, orders: &HashMap<Uuid, Order>) -> StoreResult<()> {
        let mut snapshot: Vec<Order> = orders.values().cloned().collect();
        sort_newest_first(&mut snapshot);
        let serialized = serde_json::to_vec_pretty(&snapshot)?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&serialized).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(count = snapshot.len(), "Data file written");
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for FileOrderRepository {
    async fn lookup(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn insert(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id) {
            return Err(StoreError::Duplicate(order.id));
        }

        orders.insert(order.id, order.clone());
        if let Err(err) = self.persist(&orders).await {
            orders.remove(&order.id);
            return Err(err);
        }
        Ok(order)
    }

    async fn update(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        let previous = match orders.get_mut(&order.id) {
            Some(slot) => std::mem::replace(slot, order.clone()),
            None => return Err(StoreError::Missing(order.id)),
        };

        if let Err(err) = self.persist(&orders).await {
            orders.insert(previous.id, previous);
            return Err(err);
        }
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        let Some(removed) = orders.remove(&id) else {
            return Ok(());
        };

        if let Err(err) = self.persist(&orders).await {
            orders.insert(id, removed);
            return Err(err);
        }
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.orders.read().await.contains_key(&id))
    }
}
