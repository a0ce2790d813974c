use tracing::info;

use crate::api::WorkflowClient;
use crate::error::OutreachError;
use crate::types::{ConnectionRequest, DraftBatch, GeneratedProspect};

#[derive(Clone)]
pub struct ProspectService {
    workflow: WorkflowClient,
}

impl ProspectService {
    pub fn new(workflow: WorkflowClient) -> Self {
        Self { workflow }
    }

    pub async fn generate(
        &self,
        connections: &[ConnectionRequest],
    ) -> Result<DraftBatch<GeneratedProspect>, OutreachError> {
        if connections.is_empty() {
            return Err(OutreachError::Validation(
                "no research requests given".to_string(),
            ));
        }
        let data = self.workflow.generate_connections(connections).await?;
        let prospects = GeneratedProspect::from_workflow(data)?;
        info!(
            requests = connections.len(),
            prospects = prospects.len(),
            "prospects generated"
        );
        Ok(DraftBatch::new(prospects))
    }
}
