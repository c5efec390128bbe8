//! End-to-end ranking flow through a session.
//!
//! Drives the arrangement with drag gestures and menu commands the way a
//! front-end would and checks the resulting standings and payload.

use podium::{
    Anchor, DropTarget, GestureEvent, GestureOutcome, Location, MenuCommand, MoveOutcome, NoOp,
    QueuedGestures, RankingSession, SessionConfig, TeamId, TournamentStatus,
};
use serde_json::{Value, json};

fn records() -> Vec<Value> {
    vec![
        json!({"teamId": "A", "teamName": "Alpha", "members": ["ana", "ari"]}),
        json!({"team_id": "B", "name": "Bravo"}),
        json!({"team": {"id": "C", "displayName": "Charlie"}}),
    ]
}

fn session() -> RankingSession {
    let mut session = RankingSession::new(
        SessionConfig::new("t-42", "rocket-league"),
        true,
        TournamentStatus::Ongoing,
    );
    session.load(&records());
    session
}

fn pool_ids(session: &RankingSession) -> Vec<String> {
    session
        .store()
        .pool()
        .iter()
        .map(|team| team.id.to_string())
        .collect()
}

fn slot_id(session: &RankingSession, idx: usize) -> Option<String> {
    session.store().slot(idx).map(|team| team.id.to_string())
}

fn drag(session: &mut RankingSession, team: &str, target: Option<&str>) -> GestureOutcome {
    session.gesture(GestureEvent::drag_start(team));
    session.gesture(GestureEvent::drag_end(team, target))
}

fn snapshot(session: &RankingSession) -> Vec<u8> {
    serde_json::to_vec(&session.view()).unwrap()
}

#[test]
fn test_heterogeneous_records_load_into_pool() {
    let session = session();

    assert_eq!(pool_ids(&session), vec!["A", "B", "C"]);
    assert_eq!(session.store().team("C").map(|t| t.name.as_str()), Some("Charlie"));
    assert_eq!(session.store().occupied_count(), 0);
}

#[test]
fn test_pool_to_empty_slot_then_displacement() {
    let mut session = session();

    drag(&mut session, "A", Some("slot-0"));
    assert_eq!(slot_id(&session, 0).as_deref(), Some("A"));
    assert_eq!(pool_ids(&session), vec!["B", "C"]);

    let outcome = drag(&mut session, "B", Some("slot-0"));
    assert!(matches!(
        outcome,
        GestureOutcome::Dropped(MoveOutcome::Displaced { .. })
    ));
    assert_eq!(slot_id(&session, 0).as_deref(), Some("B"));
    assert_eq!(pool_ids(&session), vec!["C", "A"]);
}

#[test]
fn test_slot_to_slot_swap_keeps_pool() {
    let mut session = session();
    drag(&mut session, "A", Some("slot-0"));
    drag(&mut session, "B", Some("slot-1"));

    drag(&mut session, "A", Some("slot-1"));

    assert_eq!(slot_id(&session, 0).as_deref(), Some("B"));
    assert_eq!(slot_id(&session, 1).as_deref(), Some("A"));
    assert_eq!(pool_ids(&session), vec!["C"]);
}

#[test]
fn test_drop_on_pool_and_elsewhere() {
    let mut session = session();
    drag(&mut session, "C", Some("slot-7"));

    let outcome = drag(&mut session, "C", Some("sidebar"));
    assert_eq!(outcome, GestureOutcome::Cancelled);
    assert_eq!(session.store().location_of("C"), Some(Location::Slot(7)));

    drag(&mut session, "C", None);
    assert_eq!(session.store().location_of("C"), Some(Location::Slot(7)));

    drag(&mut session, "C", Some(&DropTarget::Pool.target_id()));
    assert_eq!(slot_id(&session, 7), None);
    assert_eq!(pool_ids(&session), vec!["A", "B", "C"]);
}

#[test]
fn test_self_move_and_out_of_range_are_no_ops() {
    let mut session = session();
    drag(&mut session, "A", Some("slot-3"));
    let before = snapshot(&session);

    assert_eq!(
        drag(&mut session, "A", Some("slot-3")),
        GestureOutcome::Dropped(MoveOutcome::Unchanged(NoOp::SameSlot))
    );
    assert_eq!(
        drag(&mut session, "B", Some("slot-25")),
        GestureOutcome::Dropped(MoveOutcome::Unchanged(NoOp::SlotOutOfRange))
    );
    assert_eq!(
        session.execute(&TeamId::new("ghost"), MenuCommand::MoveToSlot(0)),
        MoveOutcome::Unchanged(NoOp::UnknownTeam)
    );
    assert_eq!(snapshot(&session), before);
}

#[test]
fn test_menu_flow() {
    let mut session = session();

    assert!(session.open_menu(TeamId::new("B"), Anchor::new(4, 4)));
    session.menu_select(MenuCommand::MoveToSlot(2));
    assert!(!session.menu().is_open());
    assert_eq!(slot_id(&session, 2).as_deref(), Some("B"));

    assert!(session.open_menu(TeamId::new("B"), Anchor::new(4, 4)));
    let region = session.menu().region().unwrap();
    let first_row = Anchor::new(region.anchor.x + 1, region.anchor.y + 1);
    assert!(session.menu_click(first_row).is_some_and(|o| o.changed()));
    assert_eq!(session.store().location_of("B"), Some(Location::Pool));

    assert!(session.open_menu(TeamId::new("A"), Anchor::new(4, 4)));
    assert_eq!(session.menu_click(Anchor::new(0, 0)), None);
    assert!(!session.menu().is_open());

    assert!(session.open_menu(TeamId::new("A"), Anchor::new(4, 4)));
    session.menu_cancel();
    assert!(!session.menu().is_open());
}

#[test]
fn test_release_all_restores_full_pool() {
    let mut session = session();
    drag(&mut session, "A", Some("slot-0"));
    drag(&mut session, "C", Some("slot-4"));
    session.execute(&TeamId::new("B"), MenuCommand::MoveToSlot(9));

    assert_eq!(session.release_all(), Ok(3));

    let mut ids = pool_ids(&session);
    ids.sort();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(session.store().occupied_count(), 0);
    assert!(session.store().verify(25).is_ok());
}

#[test]
fn test_payload_is_sparse() {
    let mut session = session();
    drag(&mut session, "A", Some("slot-0"));
    drag(&mut session, "C", Some("slot-2"));

    let payload = serde_json::to_value(session.payload()).unwrap();

    assert_eq!(
        payload,
        json!({"tournament_id": "t-42", "game_category": "rocket-league", "rank_1": "A", "rank_3": "C"})
    );
    assert!(payload.get("rank_2").is_none());
}

#[test]
fn test_read_only_suppresses_every_entry_point() {
    for (has_edit_rights, status) in [
        (false, TournamentStatus::Ongoing),
        (true, TournamentStatus::Ended),
        (true, TournamentStatus::Finalized),
    ] {
        let mut session = session();
        drag(&mut session, "A", Some("slot-0"));
        session.set_edit_rights(has_edit_rights);
        session.set_status(status);
        let before = snapshot(&session);

        assert_eq!(
            drag(&mut session, "A", Some("pool")),
            GestureOutcome::Suppressed
        );
        assert_eq!(
            drag(&mut session, "B", Some("slot-0")),
            GestureOutcome::Suppressed
        );
        assert!(!session.open_menu(TeamId::new("B"), Anchor::new(1, 1)));
        assert!(!session.menu_select(MenuCommand::MoveToSlot(1)).changed());
        assert_eq!(
            session.execute(&TeamId::new("A"), MenuCommand::RemoveToPool),
            MoveOutcome::Unchanged(NoOp::ReadOnly)
        );
        assert!(session.release_all().is_err());

        assert_eq!(snapshot(&session), before);
    }
}

#[test]
fn test_edit_rights_rechecked_between_events() {
    let mut session = session();

    session.gesture(GestureEvent::drag_start("A"));
    session.set_status(TournamentStatus::Ended);
    assert_eq!(
        session.gesture(GestureEvent::drag_end("A", Some("slot-0"))),
        GestureOutcome::Suppressed
    );

    session.set_status(TournamentStatus::Ongoing);
    assert!(matches!(
        drag(&mut session, "A", Some("slot-0")),
        GestureOutcome::Dropped(MoveOutcome::Placed { .. })
    ));
}

#[test]
fn test_pumped_gesture_queue() {
    let mut session = session();
    let mut queue: QueuedGestures = [
        GestureEvent::drag_start("A"),
        GestureEvent::drag_end("A", Some("slot-1")),
        GestureEvent::drag_start("B"),
        GestureEvent::drag_end("B", Some("slot-1")),
    ]
    .into_iter()
    .collect();

    let outcomes = session.pump_gestures(&mut queue);

    assert_eq!(outcomes.len(), 4);
    assert!(queue.is_empty());
    assert_eq!(slot_id(&session, 1).as_deref(), Some("B"));
    assert_eq!(pool_ids(&session), vec!["C", "A"]);
}

#[test]
fn test_duplicate_records_are_reported() {
    let mut session = RankingSession::new(
        SessionConfig::new("t-42", "rocket-league"),
        true,
        TournamentStatus::Ongoing,
    );

    let normalized = session.load(&[
        json!({"teamId": "A", "teamName": "First"}),
        json!({"teamId": "B", "teamName": "Bravo"}),
        json!({"teamId": "A", "teamName": "Second"}),
    ]);

    assert!(normalized.has_duplicates());
    assert_eq!(normalized.duplicates, vec![TeamId::new("A")]);
    assert_eq!(session.store().team_count(), 2);
    assert_eq!(session.store().team("A").map(|t| t.name.as_str()), Some("Second"));
}
