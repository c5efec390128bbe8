//! # Podium
//!
//! Final-standings arrangement for tournament organizers.
//!
//! An organizer loads the teams that took part in a tournament, places them
//! into a fixed number of ranked slots (drag-and-drop or a per-team command
//! menu), and submits the resulting ordering once. The arrangement is held
//! in a single [`AssignmentStore`] that guarantees every team sits in
//! exactly one place at all times.
//!
//! ## Core Modules
//!
//! - [`team`]: Team identity and normalization of raw participant records
//! - [`arrangement`]: Pool/slot store, move operations and the standings view
//! - [`gesture`]: Drag-and-drop front-end
//! - [`menu`]: Context-menu front-end
//! - [`finalize`]: Projection of the slots into the submission payload
//! - [`submission`]: Single-flight submission with a pluggable transport
//! - [`tournament`]: Session tying the above together for one tournament
//!
//! ## Example
//!
//! ```
//! use podium::{Access, AssignmentStore, Team};
//!
//! let mut store = AssignmentStore::new(vec![Team::new("t1", "Owls")], 25);
//! let outcome = store.move_to_slot("t1", 0);
//!
//! assert!(outcome.changed());
//! assert!(Access::editor().editable());
//! ```

/// Edit rights and tournament lock.
pub mod access;
pub use access::Access;

/// Pool/slot arrangement and its move operations.
pub mod arrangement;
pub use arrangement::{
    AssignmentStore, DEFAULT_SLOT_COUNT, InvariantViolation, Location, MoveOutcome, NoOp,
    RankRow, StandingsView,
};

/// Finalize payload serialization.
pub mod finalize;
pub use finalize::{FinalizePayload, MAX_RANKS};

pub mod gesture;
pub use gesture::{
    DragState, DropTarget, GestureController, GestureEvent, GestureOutcome, GestureSource,
    QueuedGestures,
};

pub mod menu;
pub use menu::{Anchor, CommandMenuController, MenuCommand, MenuRegion, MenuState};

/// Finalize submission.
pub mod submission;
pub use submission::{
    InFlight, SubmissionCoordinator, SubmissionError, SubmissionPhase, SubmissionResult,
    SubmissionTransport, TransportError,
};

pub mod team;
pub use team::{Normalized, Team, TeamId, TeamRegistry};

/// Tournament ranking sessions.
pub mod tournament;
pub use tournament::{RankingSession, SessionConfig, TournamentId, TournamentStatus};
