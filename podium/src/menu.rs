//! Context-menu front-end for the move operations.
//!
//! The menu opens on a team (secondary click or equivalent) at an anchor
//! position and offers discrete commands. It closes after a command runs,
//! on any click outside its region, and on cancel. Only one menu can be
//! open at a time.

use crate::{
    access::Access,
    arrangement::{AssignmentStore, MoveOutcome, NoOp},
    team::TeamId,
};
use log::debug;
use std::fmt;

/// Screen position in front-end units (cells, pixels).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Anchor {
    pub x: u16,
    pub y: u16,
}

impl Anchor {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Rectangle the open menu occupies, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MenuRegion {
    pub anchor: Anchor,
    pub width: u16,
    pub height: u16,
}

impl MenuRegion {
    pub fn contains(&self, point: Anchor) -> bool {
        let right = u32::from(self.anchor.x) + u32::from(self.width);
        let bottom = u32::from(self.anchor.y) + u32::from(self.height);
        point.x >= self.anchor.x
            && u32::from(point.x) < right
            && point.y >= self.anchor.y
            && u32::from(point.y) < bottom
    }
}

/// Commands offered for a single team.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuCommand {
    /// 0-based slot index
    MoveToSlot(usize),
    RemoveToPool,
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveToSlot(idx) => write!(f, "Move to rank {}", idx + 1),
            Self::RemoveToPool => write!(f, "Remove to pool"),
        }
    }
}

/// Menu state
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        anchor: Anchor,
        team_id: TeamId,
        /// Index into [`CommandMenuController::commands`]
        highlighted: usize,
    },
}

#[derive(Debug)]
pub struct CommandMenuController {
    state: MenuState,
    commands: Vec<MenuCommand>,
    width: u16,
}

impl CommandMenuController {
    /// Menu offering "remove to pool" plus a move for each of `slot_count` slots.
    pub fn new(slot_count: usize) -> Self {
        let commands: Vec<MenuCommand> = std::iter::once(MenuCommand::RemoveToPool)
            .chain((0..slot_count).map(MenuCommand::MoveToSlot))
            .collect();
        let width = commands
            .iter()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(0)
            .saturating_add(4);

        Self {
            state: MenuState::Closed,
            commands,
            width: u16::try_from(width).unwrap_or(u16::MAX),
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    pub fn commands(&self) -> &[MenuCommand] {
        &self.commands
    }

    /// Team the open menu acts on
    pub fn target(&self) -> Option<&TeamId> {
        match &self.state {
            MenuState::Open { team_id, .. } => Some(team_id),
            MenuState::Closed => None,
        }
    }

    pub fn highlighted(&self) -> Option<MenuCommand> {
        match &self.state {
            MenuState::Open { highlighted, .. } => self.commands.get(*highlighted).copied(),
            MenuState::Closed => None,
        }
    }

    /// Width and height of the menu, border included
    pub fn dimensions(&self) -> (u16, u16) {
        let height = u16::try_from(self.commands.len() + 2).unwrap_or(u16::MAX);
        (self.width, height)
    }

    /// Region occupied by the open menu
    pub fn region(&self) -> Option<MenuRegion> {
        let (width, height) = self.dimensions();
        match &self.state {
            MenuState::Open { anchor, .. } => Some(MenuRegion {
                anchor: *anchor,
                width,
                height,
            }),
            MenuState::Closed => None,
        }
    }

    /// Open the menu for a team. Refused when the caller cannot edit or the
    /// team is unknown; an already open menu is replaced.
    pub fn open(
        &mut self,
        team_id: TeamId,
        anchor: Anchor,
        store: &AssignmentStore,
        access: Access,
    ) -> bool {
        if !access.editable() || !store.contains(team_id.as_str()) {
            return false;
        }
        self.state = MenuState::Open {
            anchor,
            team_id,
            highlighted: 0,
        };
        true
    }

    pub fn highlight_next(&mut self) {
        let len = self.commands.len();
        if let MenuState::Open { highlighted, .. } = &mut self.state
            && len > 0
        {
            *highlighted = (*highlighted + 1) % len;
        }
    }

    pub fn highlight_previous(&mut self) {
        let len = self.commands.len();
        if let MenuState::Open { highlighted, .. } = &mut self.state
            && len > 0
        {
            *highlighted = (*highlighted + len - 1) % len;
        }
    }

    /// Run `command` on the menu's team, then close the menu.
    pub fn select(
        &mut self,
        command: MenuCommand,
        store: &mut AssignmentStore,
        access: Access,
    ) -> MoveOutcome {
        let MenuState::Open { team_id, .. } = std::mem::take(&mut self.state) else {
            return MoveOutcome::Unchanged(NoOp::UnknownTeam);
        };
        Self::execute(&team_id, command, store, access)
    }

    /// Run the highlighted command, then close the menu.
    pub fn select_highlighted(&mut self, store: &mut AssignmentStore, access: Access) -> MoveOutcome {
        match self.highlighted() {
            Some(command) => self.select(command, store, access),
            None => MoveOutcome::Unchanged(NoOp::UnknownTeam),
        }
    }

    /// Handle a primary click. A click on a command row selects it, a click
    /// elsewhere inside the menu does nothing, a click outside closes it.
    ///
    /// Returns the move outcome when a command was selected.
    pub fn click(
        &mut self,
        point: Anchor,
        store: &mut AssignmentStore,
        access: Access,
    ) -> Option<MoveOutcome> {
        let region = self.region()?;
        if !region.contains(point) {
            self.close();
            return None;
        }

        let row = usize::from(point.y - region.anchor.y);
        let command = row
            .checked_sub(1)
            .and_then(|idx| self.commands.get(idx))
            .copied()?;
        Some(self.select(command, store, access))
    }

    /// Cancel key
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let MenuState::Open { team_id, .. } = &self.state {
            debug!("closing command menu for {team_id}");
        }
        self.state = MenuState::Closed;
    }

    /// Run a command on a named team without going through an open menu.
    ///
    /// Used by keyboard and text front-ends; gated exactly like a menu
    /// selection.
    pub fn execute(
        team_id: &TeamId,
        command: MenuCommand,
        store: &mut AssignmentStore,
        access: Access,
    ) -> MoveOutcome {
        if !access.editable() {
            debug!("command {command} for {team_id} suppressed: read-only");
            return MoveOutcome::Unchanged(NoOp::ReadOnly);
        }
        match command {
            MenuCommand::MoveToSlot(idx) => store.move_to_slot(team_id.as_str(), idx),
            MenuCommand::RemoveToPool => store.remove_to_pool(team_id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arrangement::Location, team::Team};

    fn store() -> AssignmentStore {
        AssignmentStore::new(vec![Team::new("a", "A"), Team::new("b", "B")], 3)
    }

    fn open_menu(menu: &mut CommandMenuController, s: &AssignmentStore, team: &str) {
        assert!(menu.open(TeamId::new(team), Anchor::new(10, 5), s, Access::editor()));
    }

    #[test]
    fn test_commands_list_pool_then_each_slot() {
        let menu = CommandMenuController::new(3);
        assert_eq!(
            menu.commands(),
            &[
                MenuCommand::RemoveToPool,
                MenuCommand::MoveToSlot(0),
                MenuCommand::MoveToSlot(1),
                MenuCommand::MoveToSlot(2),
            ]
        );
    }

    #[test]
    fn test_open_requires_edit_access() {
        let s = store();
        let mut menu = CommandMenuController::new(3);

        assert!(!menu.open(TeamId::new("a"), Anchor::default(), &s, Access::viewer()));
        assert!(!menu.open(TeamId::new("a"), Anchor::default(), &s, Access::new(true, true)));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_open_rejects_unknown_team() {
        let s = store();
        let mut menu = CommandMenuController::new(3);
        assert!(!menu.open(TeamId::new("zz"), Anchor::default(), &s, Access::editor()));
    }

    #[test]
    fn test_only_one_menu_open() {
        let s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");
        open_menu(&mut menu, &s, "b");
        assert_eq!(menu.target(), Some(&TeamId::new("b")));
    }

    #[test]
    fn test_select_runs_command_then_closes() {
        let mut s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");

        let outcome = menu.select(MenuCommand::MoveToSlot(1), &mut s, Access::editor());

        assert!(matches!(outcome, MoveOutcome::Placed { slot: 1, .. }));
        assert_eq!(s.location_of("a"), Some(Location::Slot(1)));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_select_read_only_closes_without_change() {
        let mut s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");

        let outcome = menu.select(MenuCommand::MoveToSlot(0), &mut s, Access::new(true, true));

        assert_eq!(outcome, MoveOutcome::Unchanged(NoOp::ReadOnly));
        assert_eq!(s.occupied_count(), 0);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_highlight_wraps_and_selects() {
        let mut s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "b");

        assert_eq!(menu.highlighted(), Some(MenuCommand::RemoveToPool));
        menu.highlight_previous();
        assert_eq!(menu.highlighted(), Some(MenuCommand::MoveToSlot(2)));
        menu.highlight_next();
        menu.highlight_next();
        assert_eq!(menu.highlighted(), Some(MenuCommand::MoveToSlot(0)));

        menu.select_highlighted(&mut s, Access::editor());
        assert_eq!(s.location_of("b"), Some(Location::Slot(0)));
    }

    #[test]
    fn test_click_outside_closes() {
        let mut s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");

        assert_eq!(menu.click(Anchor::new(0, 0), &mut s, Access::editor()), None);
        assert!(!menu.is_open());
        assert_eq!(s.occupied_count(), 0);
    }

    #[test]
    fn test_click_on_row_selects_command() {
        let mut s = store();
        s.move_to_slot("a", 2);
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");

        // Border row at y=5, first command at y=6
        let outcome = menu.click(Anchor::new(12, 6), &mut s, Access::editor());

        assert!(matches!(outcome, Some(MoveOutcome::Released { slot: 2, .. })));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_click_on_border_keeps_menu_open() {
        let mut s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");

        assert_eq!(menu.click(Anchor::new(12, 5), &mut s, Access::editor()), None);
        assert!(menu.is_open());
    }

    #[test]
    fn test_cancel_closes() {
        let s = store();
        let mut menu = CommandMenuController::new(3);
        open_menu(&mut menu, &s, "a");
        menu.cancel();
        assert_eq!(menu.state(), &MenuState::Closed);
    }

    #[test]
    fn test_execute_without_menu() {
        let mut s = store();
        let outcome = CommandMenuController::execute(
            &TeamId::new("b"),
            MenuCommand::MoveToSlot(0),
            &mut s,
            Access::editor(),
        );
        assert!(outcome.changed());

        let outcome = CommandMenuController::execute(
            &TeamId::new("b"),
            MenuCommand::RemoveToPool,
            &mut s,
            Access::viewer(),
        );
        assert_eq!(outcome, MoveOutcome::Unchanged(NoOp::ReadOnly));
        assert_eq!(s.location_of("b"), Some(Location::Slot(0)));
    }

    #[test]
    fn test_region_contains() {
        let region = MenuRegion {
            anchor: Anchor::new(2, 3),
            width: 4,
            height: 2,
        };
        assert!(region.contains(Anchor::new(2, 3)));
        assert!(region.contains(Anchor::new(5, 4)));
        assert!(!region.contains(Anchor::new(6, 4)));
        assert!(!region.contains(Anchor::new(2, 5)));
        assert!(!region.contains(Anchor::new(1, 3)));
    }
}
