//! Finalize submission: a single-flight guard around the transport call.
//!
//! The coordinator moves `Ready -> Submitting -> Ready`. A failed or
//! cancelled submission leaves the error in [`SubmissionCoordinator::last_error`]
//! and can be retried; the arrangement store is only ever read.
//!
//! ## Example
//!
//! ```no_run
//! use podium::{
//!     access::Access,
//!     arrangement::AssignmentStore,
//!     finalize::FinalizePayload,
//!     submission::{SubmissionCoordinator, SubmissionTransport, TransportError},
//! };
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! #[async_trait::async_trait]
//! impl SubmissionTransport for Printer {
//!     async fn submit(&self, payload: &FinalizePayload) -> Result<(), TransportError> {
//!         println!("{}", serde_json::to_string(payload).unwrap_or_default());
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coordinator = SubmissionCoordinator::new(Arc::new(Printer), "t-7", "valorant");
//!     coordinator.on_finalized(|payload| println!("finalized {}", payload.tournament_id));
//!
//!     let store = AssignmentStore::empty(25);
//!     coordinator.submit(&store, Access::editor()).await?;
//!     Ok(())
//! }
//! ```

pub mod coordinator;
pub mod errors;
pub mod transport;

pub use coordinator::{InFlight, SubmissionCoordinator, SubmissionPhase};
pub use errors::{SubmissionError, SubmissionResult, TransportError};
pub use transport::SubmissionTransport;
