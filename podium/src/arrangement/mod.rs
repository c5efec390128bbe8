//! Arrangement state and the move operations that keep it consistent.
//!
//! An arrangement is a pool of unplaced teams plus a fixed number of ranked
//! slots. Each team is always in exactly one of the two regions:
//!
//! - **Pool**: unordered set of teams without a rank (never holds empties)
//! - **Slots**: `slot_count` positions, each empty or holding one team
//!
//! ## Example
//!
//! ```
//! use podium::arrangement::{AssignmentStore, Location};
//! use podium::team::Team;
//!
//! let mut store = AssignmentStore::new(
//!     vec![Team::new("a", "Alpha"), Team::new("b", "Bravo")],
//!     25,
//! );
//! store.move_to_slot("a", 0);
//! store.move_to_slot("b", 0); // Alpha goes back to the pool
//!
//! assert_eq!(store.location_of("b"), Some(Location::Slot(0)));
//! assert_eq!(store.location_of("a"), Some(Location::Pool));
//! ```

pub mod engine;
pub mod store;
pub mod view;

pub use engine::{MoveOutcome, NoOp};
pub use store::{AssignmentStore, DEFAULT_SLOT_COUNT, InvariantViolation, Location};
pub use view::{RankRow, StandingsView};
