//! Tournament ranking sessions.
//!
//! A [`RankingSession`] ties together everything one organizer needs to
//! arrange and finalize standings:
//! - Team normalization from raw participant records
//! - The pool/slot arrangement and its move operations
//! - Drag-and-drop and context-menu front-ends
//! - Payload serialization for the finalize submission
//!
//! ## Example
//!
//! ```
//! use podium::tournament::{RankingSession, SessionConfig, TournamentStatus};
//! use podium::gesture::GestureEvent;
//! use serde_json::json;
//!
//! let mut session = RankingSession::new(
//!     SessionConfig::new("spring-cup", "valorant"),
//!     true,
//!     TournamentStatus::Ongoing,
//! );
//! session.load(&[json!({"teamId": "t1", "teamName": "Owls"})]);
//!
//! session.gesture(GestureEvent::drag_start("t1"));
//! session.gesture(GestureEvent::drag_end("t1", Some("slot-0")));
//!
//! let payload = serde_json::to_value(session.payload()).unwrap();
//! assert_eq!(payload["rank_1"], "t1");
//! ```

pub mod models;
pub mod session;

pub use models::{SessionConfig, TournamentId, TournamentStatus};
pub use session::RankingSession;
