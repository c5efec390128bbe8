//! Transport seam for delivering finalize payloads.

use super::errors::TransportError;
use crate::finalize::FinalizePayload;
use async_trait::async_trait;

/// Delivers a finalize payload to whatever persists the results.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, payload: &FinalizePayload) -> Result<(), TransportError>;
}
