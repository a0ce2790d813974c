use serde::Serialize;
use tracing::{debug, info};

use crate::db::{OutreachStorage, SaveSummary};
use crate::error::OutreachError;
use crate::types::ConnectionRequest;

#[derive(Debug, Clone, Serialize)]
pub struct SavedConnections {
    pub summary: SaveSummary,
    pub connections: Vec<ConnectionRequest>,
}

#[derive(Clone)]
pub struct ConnectionService {
    storage: OutreachStorage,
}

impl ConnectionService {
    pub fn new(storage: OutreachStorage) -> Self {
        Self { storage }
    }

    pub async fn load(&self, user_id: &str) -> Result<Vec<ConnectionRequest>, OutreachError> {
        let rows = self.storage.list_connections(user_id).await?;
        debug!(user_id = %user_id, count = rows.len(), "connection requests loaded");
        Ok(rows.into_iter().map(ConnectionRequest::from).collect())
    }

    pub async fn save(
        &self,
        user_id: &str,
        connections: &[ConnectionRequest],
    ) -> Result<SavedConnections, OutreachError> {
        let summary = self.storage.save_connections(user_id, connections).await?;
        info!(
            user_id = %user_id,
            inserted = summary.inserted,
            updated = summary.updated,
            skipped = summary.skipped,
            "connection requests saved"
        );
        Ok(SavedConnections {
            summary,
            connections: self.load(user_id).await?,
        })
    }

    pub async fn delete(&self, user_id: &str, id: i64) -> Result<(), OutreachError> {
        if !self.storage.delete_connection(user_id, id).await? {
            return Err(OutreachError::NotFound("connection request"));
        }
        info!(user_id = %user_id, connection_id = id, "connection request deleted");
        Ok(())
    }
}
