//! Ranking session: the arrangement state and its front-ends for one
//! tournament, owned by whoever drives the UI.

use super::models::{SessionConfig, TournamentStatus};
use crate::{
    access::Access,
    arrangement::{AssignmentStore, MoveOutcome, NoOp, StandingsView},
    finalize::{self, FinalizePayload},
    gesture::{GestureController, GestureEvent, GestureOutcome, GestureSource},
    menu::{Anchor, CommandMenuController, MenuCommand},
    submission::{InFlight, SubmissionCoordinator, SubmissionResult},
    team::{Normalized, TeamId, TeamRegistry},
};
use log::info;
use serde_json::Value;

/// One organizer's (or viewer's) ranking session for a tournament.
///
/// Role and tournament status are supplied from outside and may change at
/// any time; every mutating method derives [`Access`] from their current
/// values at the moment it runs.
pub struct RankingSession {
    config: SessionConfig,
    store: AssignmentStore,
    gestures: GestureController,
    menu: CommandMenuController,
    has_edit_rights: bool,
    status: TournamentStatus,
    loaded: bool,
    last_submitted: Option<FinalizePayload>,
}

impl RankingSession {
    pub fn new(config: SessionConfig, has_edit_rights: bool, status: TournamentStatus) -> Self {
        Self {
            store: AssignmentStore::empty(config.slot_count),
            gestures: GestureController::new(),
            menu: CommandMenuController::new(config.slot_count),
            config,
            has_edit_rights,
            status,
            loaded: false,
            last_submitted: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn access(&self) -> Access {
        Access::new(self.has_edit_rights, self.status.is_locked())
    }

    pub fn editable(&self) -> bool {
        self.access().editable()
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn set_edit_rights(&mut self, has_edit_rights: bool) {
        self.has_edit_rights = has_edit_rights;
        if !self.editable() {
            self.menu.cancel();
        }
    }

    pub fn set_status(&mut self, status: TournamentStatus) {
        self.status = status;
        if !self.editable() {
            self.menu.cancel();
        }
    }

    /// Seed (or reseed after a refetch) from raw participant records.
    ///
    /// Any previous arrangement, drag and open menu are discarded.
    pub fn load(&mut self, records: &[Value]) -> Normalized {
        let normalized = TeamRegistry::normalize(records);
        self.store.reseed(normalized.teams.clone());
        self.gestures.reset();
        self.menu.cancel();
        self.loaded = true;

        info!(
            "loaded {} team(s) for tournament {}",
            self.store.team_count(),
            self.config.tournament_id
        );
        normalized
    }

    /// Whether a participant list has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    /// Read-only projection of the current standings
    pub fn view(&self) -> StandingsView {
        StandingsView::from_store(&self.store)
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn gesture(&mut self, event: GestureEvent) -> GestureOutcome {
        let access = self.access();
        self.gestures.handle(event, &mut self.store, access)
    }

    pub fn pump_gestures<S: GestureSource + ?Sized>(&mut self, source: &mut S) -> Vec<GestureOutcome> {
        let access = self.access();
        self.gestures.pump(source, &mut self.store, access)
    }

    pub fn menu(&self) -> &CommandMenuController {
        &self.menu
    }

    pub fn open_menu(&mut self, team_id: TeamId, anchor: Anchor) -> bool {
        let access = self.access();
        self.menu.open(team_id, anchor, &self.store, access)
    }

    pub fn menu_select(&mut self, command: MenuCommand) -> MoveOutcome {
        let access = self.access();
        self.menu.select(command, &mut self.store, access)
    }

    pub fn menu_select_highlighted(&mut self) -> MoveOutcome {
        let access = self.access();
        self.menu.select_highlighted(&mut self.store, access)
    }

    pub fn menu_click(&mut self, point: Anchor) -> Option<MoveOutcome> {
        let access = self.access();
        self.menu.click(point, &mut self.store, access)
    }

    pub fn menu_highlight_next(&mut self) {
        self.menu.highlight_next();
    }

    pub fn menu_highlight_previous(&mut self) {
        self.menu.highlight_previous();
    }

    pub fn menu_cancel(&mut self) {
        self.menu.cancel();
    }

    /// Run a discrete command on a named team without opening a menu.
    pub fn execute(&mut self, team_id: &TeamId, command: MenuCommand) -> MoveOutcome {
        let access = self.access();
        CommandMenuController::execute(team_id, command, &mut self.store, access)
    }

    /// Return every ranked team to the pool.
    ///
    /// Returns the number released, or `Unchanged(ReadOnly)` when not editable.
    pub fn release_all(&mut self) -> Result<usize, MoveOutcome> {
        if !self.editable() {
            return Err(MoveOutcome::Unchanged(NoOp::ReadOnly));
        }
        Ok(self.store.release_all_to_pool())
    }

    /// Payload the current arrangement would submit
    pub fn payload(&self) -> FinalizePayload {
        finalize::serialize(
            &self.store,
            &self.config.tournament_id,
            &self.config.game_category,
        )
    }

    /// Claim a submission of the current arrangement on `coordinator`.
    ///
    /// # Errors
    ///
    /// See [`SubmissionCoordinator::begin`].
    pub fn begin_submission(&self, coordinator: &SubmissionCoordinator) -> SubmissionResult<InFlight> {
        coordinator.begin(&self.store, self.access())
    }

    /// Record a successful finalize: the tournament is locked and the
    /// editing state is discarded. The submitted standings stay available
    /// through [`RankingSession::last_submitted`].
    pub fn finalized(&mut self, payload: FinalizePayload) {
        self.status = TournamentStatus::Finalized;
        self.gestures.reset();
        self.menu.cancel();
        self.store = AssignmentStore::empty(self.config.slot_count);
        self.loaded = false;
        self.last_submitted = Some(payload);
    }

    pub fn last_submitted(&self) -> Option<&FinalizePayload> {
        self.last_submitted.as_ref()
    }
}
