//! TUI application for arranging tournament standings.
//!
//! This module provides a terminal UI using ratatui. Teams are dragged with
//! the mouse from the pool onto the rank grid (and between ranks), a right
//! click opens a per-team command menu, and the command line accepts the
//! same operations as text.

use crate::{
    api_client::ApiClient,
    commands::{ConsoleCommand, parse_command},
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use podium::{
    Anchor, DropTarget, FinalizePayload, GestureEvent, GestureOutcome, MoveOutcome, NoOp,
    QueuedGestures, RankingSession, StandingsView, SubmissionCoordinator, SubmissionError,
    SubmissionResult, TeamId,
};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    layout::{Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Clear, List, ListDirection, ListItem, Padding, Paragraph, Scrollbar,
        ScrollbarOrientation, block,
    },
};
use serde_json::Value;
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};

mod widgets;

use widgets::{ScrollableList, UserInput};

const HELP: &str = "\
mouse
        Drag a team from the pool onto a rank, between ranks, or back onto
        the pool. Right-click a team for a menu of moves.
move <team> <rank>
        Place a team at a rank. A pool team displaces the current occupant
        back to the pool; a ranked team trades places with the occupant.
remove <team>
        Return a ranked team to the pool.
reset
        Return every ranked team to the pool.
finalize
        Submit the current standings. Only one submission runs at a time.
cancel
        Abandon the submission in flight.
reload
        Fetch the participant list again (also F5). Discards the arrangement.
";
const MAX_LOG_RECORDS: usize = 1024;
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Clone)]
enum RecordKind {
    Ack,
    Alert,
    Error,
    Rank,
    You,
}

/// A timestamped terminal message with an importance label to help
/// direct user attention.
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Ack => "ACK".light_blue(),
            RecordKind::Alert => "ALERT".light_magenta(),
            RecordKind::Error => "ERROR".light_red(),
            RecordKind::Rank => "RANK".light_yellow(),
            RecordKind::You => "YOU".light_green(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// What a screen cell maps to, recorded while drawing
#[derive(Clone, Debug, PartialEq)]
enum HitTarget {
    PoolTeam(TeamId),
    Slot { idx: usize, team: Option<TeamId> },
    PoolZone,
}

#[derive(Default)]
struct HitMap {
    cells: Vec<(Rect, HitTarget)>,
    pool_area: Rect,
    screen: Rect,
}

impl HitMap {
    fn clear(&mut self) {
        self.cells.clear();
        self.pool_area = Rect::default();
    }

    fn at(&self, x: u16, y: u16) -> Option<&HitTarget> {
        let position = Position::new(x, y);
        self.cells
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, target)| target)
            .or_else(|| {
                self.pool_area
                    .contains(position)
                    .then_some(&HitTarget::PoolZone)
            })
    }

    /// Team under the cursor, if any
    fn team_at(&self, x: u16, y: u16) -> Option<TeamId> {
        match self.at(x, y)? {
            HitTarget::PoolTeam(team_id) => Some(team_id.clone()),
            HitTarget::Slot { team, .. } => team.clone(),
            HitTarget::PoolZone => None,
        }
    }

    /// Drop target id for a release at the cursor
    fn drop_target_at(&self, x: u16, y: u16) -> Option<String> {
        match self.at(x, y)? {
            HitTarget::PoolTeam(_) | HitTarget::PoolZone => Some(DropTarget::Pool.target_id()),
            HitTarget::Slot { idx, .. } => Some(DropTarget::Slot(*idx).target_id()),
        }
    }
}

fn describe(outcome: &MoveOutcome) -> Option<(RecordKind, String)> {
    match outcome {
        MoveOutcome::Unchanged(NoOp::ReadOnly) => Some((
            RecordKind::Error,
            "Standings are read-only".to_string(),
        )),
        MoveOutcome::Unchanged(NoOp::UnknownTeam) => {
            Some((RecordKind::Error, "No such team".to_string()))
        }
        MoveOutcome::Unchanged(NoOp::SlotOutOfRange) => {
            Some((RecordKind::Error, "No such rank".to_string()))
        }
        MoveOutcome::Unchanged(NoOp::SameSlot | NoOp::AlreadyInPool) => None,
        changed => Some((RecordKind::Rank, changed.to_string())),
    }
}

/// TUI App state
pub struct TuiApp {
    tournament_id: String,
    session: RankingSession,
    coordinator: SubmissionCoordinator,
    api_client: ApiClient,
    /// Whether to display the help menu window
    show_help_menu: bool,
    /// Helps scroll through the help menu window if the terminal is small
    help_handle: ScrollableList,
    /// History of recorded messages
    log_handle: ScrollableList,
    /// Current value of the input box
    user_input: UserInput,
    /// Inline message shown in place of the pool after a failed load
    load_error: Option<String>,
    /// Standings as they were submitted
    results: Option<StandingsView>,
    hit_map: HitMap,
    gestures: QueuedGestures,
    /// Cell under the cursor while a drag is active
    drag_cursor: Option<Position>,
    tx_load: mpsc::UnboundedSender<Result<Vec<Value>, String>>,
    rx_load: mpsc::UnboundedReceiver<Result<Vec<Value>, String>>,
    tx_submission: mpsc::UnboundedSender<SubmissionResult<FinalizePayload>>,
    rx_submission: mpsc::UnboundedReceiver<SubmissionResult<FinalizePayload>>,
    rx_finalized: mpsc::UnboundedReceiver<FinalizePayload>,
    load_task: Option<JoinHandle<()>>,
    submission_task: Option<JoinHandle<()>>,
}

impl TuiApp {
    pub fn new(session: RankingSession, api_client: ApiClient) -> Self {
        let tournament_id = session.config().tournament_id.clone();
        let coordinator = SubmissionCoordinator::new(
            std::sync::Arc::new(api_client.clone()),
            &session.config().tournament_id,
            &session.config().game_category,
        );

        // Finalized notices reach the UI loop through a channel
        let (tx_finalized, rx_finalized) = mpsc::unbounded_channel();
        coordinator.on_finalized(move |payload| {
            let _ = tx_finalized.send(payload.clone());
        });

        let (tx_load, rx_load) = mpsc::unbounded_channel();
        let (tx_submission, rx_submission) = mpsc::unbounded_channel();

        Self {
            tournament_id,
            session,
            coordinator,
            api_client,
            show_help_menu: false,
            help_handle: ScrollableList::from_lines(HELP.lines()),
            log_handle: ScrollableList::new(MAX_LOG_RECORDS),
            user_input: UserInput::new(),
            load_error: None,
            results: None,
            hit_map: HitMap::default(),
            gestures: QueuedGestures::new(),
            drag_cursor: None,
            tx_load,
            rx_load,
            tx_submission,
            rx_submission,
            rx_finalized,
            load_task: None,
            submission_task: None,
        }
    }

    /// Add log message
    fn add_log(&mut self, kind: RecordKind, content: String) {
        let record = Record::new(kind, content);
        self.log_handle.push(record.into());
    }

    fn log_outcome(&mut self, outcome: &MoveOutcome) {
        if let Some((kind, content)) = describe(outcome) {
            self.add_log(kind, content);
        }
    }

    /// Fetch participants in the background
    fn start_load(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        let api_client = self.api_client.clone();
        let tournament_id = self.tournament_id.clone();
        let tx = self.tx_load.clone();
        self.load_task = Some(tokio::spawn(async move {
            let result = api_client
                .fetch_participants(&tournament_id)
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(result);
        }));
        self.add_log(RecordKind::Ack, "Loading participants...".to_string());
    }

    fn on_loaded(&mut self, result: Result<Vec<Value>, String>) {
        match result {
            Ok(records) => {
                self.load_error = None;
                let normalized = self.session.load(&records);
                self.add_log(
                    RecordKind::Ack,
                    format!("Loaded {} team(s)", normalized.teams.len()),
                );
                if normalized.has_duplicates() {
                    let ids: Vec<String> =
                        normalized.duplicates.iter().map(ToString::to_string).collect();
                    self.add_log(
                        RecordKind::Alert,
                        format!(
                            "Duplicate participant records collapsed (kept the last): {}",
                            ids.join(", ")
                        ),
                    );
                }
                if normalized.placeholders > 0 {
                    self.add_log(
                        RecordKind::Alert,
                        format!(
                            "{} participant(s) had no id and were given placeholder ids",
                            normalized.placeholders
                        ),
                    );
                }
            }
            Err(e) => {
                log::error!("participant load failed: {e}");
                self.load_error = Some(format!("Could not load participants: {e}"));
                self.add_log(RecordKind::Error, "Loading participants failed".to_string());
            }
        }
    }

    /// Claim the submission and send it in the background
    fn start_submission(&mut self) {
        match self.session.begin_submission(&self.coordinator) {
            Ok(in_flight) => {
                let ranked = in_flight.payload().ranked_count();
                let tx = self.tx_submission.clone();
                self.submission_task = Some(tokio::spawn(async move {
                    let _ = tx.send(in_flight.send().await);
                }));
                self.add_log(
                    RecordKind::Ack,
                    format!("Submitting {ranked} ranked team(s)..."),
                );
            }
            Err(e) => self.add_log(RecordKind::Error, e.client_message()),
        }
    }

    fn on_submitted(&mut self, result: SubmissionResult<FinalizePayload>) {
        self.submission_task = None;
        match result {
            Ok(payload) => self.add_log(
                RecordKind::Ack,
                format!("Submitted {} rank(s)", payload.ranked_count()),
            ),
            Err(SubmissionError::Cancelled) => {
                self.add_log(RecordKind::Ack, "Submission cancelled".to_string());
            }
            Err(e) => {
                let hint = if e.is_retryable() {
                    " ('finalize' to retry)"
                } else {
                    ""
                };
                self.add_log(RecordKind::Error, format!("{}{hint}", e.client_message()));
            }
        }
    }

    fn on_finalized(&mut self, payload: FinalizePayload) {
        // The arrangement may have changed while the submission was in flight
        self.results = Some(StandingsView::from_payload(&payload, self.session.store()));
        self.session.finalized(payload);
        self.gestures = QueuedGestures::new();
        self.drag_cursor = None;
        self.add_log(
            RecordKind::Alert,
            "Standings finalized. Showing results (read-only)".to_string(),
        );
    }

    /// Handle user input from the command line
    fn handle_command(&mut self, user_input: &str) {
        if user_input.trim().is_empty() {
            return;
        }
        let command = match parse_command(user_input) {
            Ok(command) => command,
            Err(e) => {
                self.add_log(RecordKind::Error, e.to_string());
                return;
            }
        };
        self.add_log(RecordKind::You, user_input.to_string());

        match command {
            ConsoleCommand::Arrange { team_id, command } => {
                let outcome = self.session.execute(&team_id, command);
                self.log_outcome(&outcome);
            }
            ConsoleCommand::Reset => match self.session.release_all() {
                Ok(released) => self.add_log(
                    RecordKind::Rank,
                    format!("{released} team(s) returned to the pool"),
                ),
                Err(outcome) => self.log_outcome(&outcome),
            },
            ConsoleCommand::Finalize => self.start_submission(),
            ConsoleCommand::Cancel => {
                if !self.coordinator.cancel() {
                    self.add_log(RecordKind::Error, "No submission in flight".to_string());
                }
            }
            ConsoleCommand::Reload => self.start_load(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let MouseEvent {
            kind, column, row, ..
        } = mouse;

        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.session.menu().is_open() {
                    if let Some(outcome) = self.session.menu_click(Anchor::new(column, row)) {
                        self.log_outcome(&outcome);
                    }
                    return;
                }
                if self.results.is_none()
                    && let Some(team_id) = self.hit_map.team_at(column, row)
                {
                    self.gestures
                        .push(GestureEvent::drag_start(team_id.as_str()));
                    self.drag_cursor = Some(Position::new(column, row));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.session.gestures().active_team().is_some() || !self.gestures.is_empty() {
                    self.drag_cursor = Some(Position::new(column, row));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(team_id) = self.session.gestures().active_team().cloned() {
                    let target = self.hit_map.drop_target_at(column, row);
                    self.gestures
                        .push(GestureEvent::drag_end(team_id.as_str(), target.as_deref()));
                }
                self.drag_cursor = None;
            }
            MouseEventKind::Down(MouseButton::Right) => self.open_menu_at(column, row),
            _ => {}
        }
    }

    fn open_menu_at(&mut self, column: u16, row: u16) {
        let Some(team_id) = self.hit_map.team_at(column, row) else {
            return;
        };
        if !self.session.editable() {
            self.add_log(RecordKind::Error, "Standings are read-only".to_string());
            return;
        }

        // Keep the menu on screen when there is room for it
        let (width, height) = self.session.menu().dimensions();
        let screen = self.hit_map.screen;
        let x = column.min(screen.right().saturating_sub(width));
        let y = row.min(screen.bottom().saturating_sub(height));
        self.session.open_menu(team_id, Anchor::new(x, y));
    }

    /// Feed queued gestures to the session
    fn pump_gestures(&mut self) {
        let outcomes = self.session.pump_gestures(&mut self.gestures);
        for outcome in outcomes {
            match outcome {
                GestureOutcome::Dropped(outcome) => self.log_outcome(&outcome),
                GestureOutcome::Suppressed => {
                    self.add_log(RecordKind::Error, "Standings are read-only".to_string());
                }
                GestureOutcome::Started(_) | GestureOutcome::Ignored | GestureOutcome::Cancelled => {}
            }
        }
    }

    /// Returns whether the app should exit
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.session.menu().is_open() {
            match code {
                KeyCode::Up => self.session.menu_highlight_previous(),
                KeyCode::Down => self.session.menu_highlight_next(),
                KeyCode::Enter => {
                    let outcome = self.session.menu_select_highlighted();
                    self.log_outcome(&outcome);
                }
                KeyCode::Esc => self.session.menu_cancel(),
                _ => {}
            }
            return false;
        }

        match modifiers {
            KeyModifiers::CONTROL => match code {
                KeyCode::Home => self.log_handle.jump_to_first(),
                KeyCode::End => self.log_handle.jump_to_last(),
                _ => {}
            },
            KeyModifiers::NONE | KeyModifiers::SHIFT => match code {
                KeyCode::Enter => {
                    let user_input = self.user_input.submit();
                    self.handle_command(&user_input);
                }
                KeyCode::Char(to_insert) => self.user_input.input(to_insert),
                KeyCode::Backspace => self.user_input.backspace(),
                KeyCode::Delete => self.user_input.delete(),
                KeyCode::Left => self.user_input.move_left(),
                KeyCode::Right => self.user_input.move_right(),
                KeyCode::Up => {
                    if self.show_help_menu {
                        self.help_handle.move_down();
                    } else {
                        self.log_handle.move_up();
                    }
                }
                KeyCode::Down => {
                    if self.show_help_menu {
                        self.help_handle.move_up();
                    } else {
                        self.log_handle.move_down();
                    }
                }
                KeyCode::Home => self.user_input.jump_to_first(),
                KeyCode::End => self.user_input.jump_to_last(),
                KeyCode::Tab => self.show_help_menu = !self.show_help_menu,
                KeyCode::F(5) => self.start_load(),
                KeyCode::Esc => {
                    if self.show_help_menu {
                        self.show_help_menu = false;
                    } else {
                        return true;
                    }
                }
                _ => {}
            },
            _ => {}
        }
        false
    }

    fn team_style(&self, team_id: &TeamId) -> Style {
        if self.session.gestures().active_team() == Some(team_id) {
            Style::default().bold().reversed()
        } else {
            Style::default()
        }
    }

    /// Render the pool of unranked teams
    fn draw_pool(&mut self, frame: &mut Frame, area: Rect, view: &StandingsView) {
        let title = format!(" pool ({})  ", view.unplaced.len());
        let pool_block = Block::bordered().title(title);
        let inner = pool_block.inner(area);
        frame.render_widget(pool_block, area);
        self.hit_map.pool_area = area;

        if let Some(load_error) = &self.load_error {
            let message = Paragraph::new(vec![
                Line::from(Span::styled(load_error.clone(), Style::default().light_red())),
                Line::from(""),
                Line::from(vec!["press ".into(), "F5".bold().white(), " to reload".into()]),
            ])
            .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(message, inner);
            return;
        }

        if !self.session.is_loaded() && self.results.is_none() {
            frame.render_widget(Paragraph::new("Loading...".dark_gray()), inner);
            return;
        }

        for (i, team) in view.unplaced.iter().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            if offset >= inner.height {
                break;
            }
            let rect = Rect::new(inner.x, inner.y + offset, inner.width, 1);
            let line = Paragraph::new(team.name.clone()).style(self.team_style(&team.id));
            frame.render_widget(line, rect);
            self.hit_map
                .cells
                .push((rect, HitTarget::PoolTeam(team.id.clone())));
        }
    }

    /// Render the rank grid, split into columns when the area is short
    fn draw_ranks(&mut self, frame: &mut Frame, area: Rect, view: &StandingsView) {
        let title = if self.results.is_some() {
            " final standings  "
        } else {
            " ranks  "
        };
        let ranks_block = Block::bordered().padding(Padding::horizontal(1)).title(title);
        let inner = ranks_block.inner(area);
        frame.render_widget(ranks_block, area);

        let rows_per_column = usize::from(inner.height.max(1));
        let columns = view.rows.len().div_ceil(rows_per_column).max(1);
        let column_width = inner.width / u16::try_from(columns).unwrap_or(u16::MAX).max(1);
        let finalized = self.results.is_some();

        for (i, row) in view.rows.iter().enumerate() {
            let (Ok(col), Ok(line)) = (
                u16::try_from(i / rows_per_column),
                u16::try_from(i % rows_per_column),
            ) else {
                break;
            };
            let rect = Rect::new(
                inner.x + col * column_width,
                inner.y + line,
                column_width,
                1,
            );

            let hovered = self
                .drag_cursor
                .is_some_and(|cursor| rect.contains(cursor));
            let rank = Span::styled(format!("#{:<3}", row.rank), Style::default().dark_gray());
            let team = match &row.team {
                Some(team) => Span::styled(team.name.clone(), self.team_style(&team.id)),
                None => Span::styled("-", Style::default().dark_gray()),
            };
            let mut slot_line = Paragraph::new(Line::from(vec![rank, team]));
            if hovered && !finalized {
                slot_line = slot_line.style(Style::default().on_dark_gray());
            }
            frame.render_widget(slot_line, rect);

            if !finalized {
                self.hit_map.cells.push((
                    rect,
                    HitTarget::Slot {
                        idx: row.rank - 1,
                        team: row.team.as_ref().map(|team| team.id.clone()),
                    },
                ));
            }
        }
    }

    /// Render the log/history window with scrollbar
    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let log_records = self.log_handle.list_items.clone();
        let log_records = List::new(log_records)
            .direction(ListDirection::BottomToTop)
            .block(block::Block::bordered().title(" history  "));
        frame.render_stateful_widget(log_records, area, &mut self.log_handle.list_state);

        // Render log window scrollbar
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.log_handle.scroll_state,
        );
    }

    /// Render the user input area
    fn draw_user_input(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " {}/{}  ",
            self.tournament_id,
            self.session.config().game_category
        );
        let user_input = Paragraph::new(self.user_input.value.as_str())
            .style(Style::default())
            .block(block::Block::bordered().title(title.light_green()));
        frame.render_widget(user_input, area);
        let cursor_x = u16::try_from(self.user_input.char_idx).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            area.x.saturating_add(cursor_x).saturating_add(1),
            area.y + 1,
        ));
    }

    /// Render the help/status bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let status_indicator = if self.results.is_some() {
            "● Finalized".light_blue()
        } else if self.coordinator.is_submitting() {
            "● Submitting".yellow()
        } else if self.session.editable() {
            "● Editing".green()
        } else {
            "● Read-only".red()
        };

        let help_message = vec![
            status_indicator,
            " | press ".into(),
            "Tab".bold().white(),
            " to view help, press ".into(),
            "Enter".bold().white(),
            " to record a command, or press ".into(),
            "Esc".bold().white(),
            " to exit".into(),
        ];
        let help_message = Paragraph::new(Line::from(help_message));
        frame.render_widget(help_message, area);
    }

    /// Render the command menu overlay
    fn draw_command_menu(&self, frame: &mut Frame) {
        let Some(region) = self.session.menu().region() else {
            return;
        };
        let area = Rect::new(
            region.anchor.x,
            region.anchor.y,
            region.width,
            region.height,
        )
        .intersection(frame.area());
        frame.render_widget(Clear, area);

        let highlighted = self.session.menu().highlighted();
        let items: Vec<ListItem> = self
            .session
            .menu()
            .commands()
            .iter()
            .map(|command| {
                let item = ListItem::new(format!(" {command}"));
                if Some(*command) == highlighted {
                    item.reversed()
                } else {
                    item
                }
            })
            .collect();
        let title = self
            .session
            .menu()
            .target()
            .map(|team_id| format!(" {team_id} "))
            .unwrap_or_default();
        frame.render_widget(List::new(items).block(Block::bordered().title(title)), area);
    }

    /// Render the help menu overlay
    fn draw_help_menu(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Max(24)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(80)]).flex(Flex::Center);
        let [help_menu_area] = vertical.areas(frame.area());
        let [help_menu_area] = horizontal.areas(help_menu_area);
        frame.render_widget(Clear, help_menu_area);

        // Render help text
        let help_items = self.help_handle.list_items.clone();
        let help_items = List::new(help_items)
            .direction(ListDirection::TopToBottom)
            .block(block::Block::bordered().title(" commands  "));
        frame.render_stateful_widget(
            help_items,
            help_menu_area,
            &mut self.help_handle.list_state,
        );

        // Render help scrollbar
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            help_menu_area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.help_handle.scroll_state,
        );
    }

    /// Main draw function - orchestrates rendering of all UI components
    fn draw(&mut self, frame: &mut Frame) {
        self.hit_map.clear();
        self.hit_map.screen = frame.area();

        let window = Layout::vertical([
            Constraint::Min(8),    // Board
            Constraint::Length(8), // History
            Constraint::Length(3), // User input area
            Constraint::Length(1), // Help bar
        ]);
        let [board_area, log_area, user_input_area, help_area] = window.areas(frame.area());

        let [pool_area, ranks_area] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .areas(board_area);

        let view = self
            .results
            .clone()
            .unwrap_or_else(|| self.session.view());

        self.draw_pool(frame, pool_area, &view);
        self.draw_ranks(frame, ranks_area, &view);
        self.draw_log(frame, log_area);
        self.draw_user_input(frame, user_input_area);
        self.draw_help_bar(frame, help_area);

        if self.session.menu().is_open() {
            self.draw_command_menu(frame);
        }

        // Render help menu overlay if active
        if self.show_help_menu {
            self.draw_help_menu(frame);
        }
    }

    /// Apply results from background tasks
    fn drain_channels(&mut self) {
        while let Ok(result) = self.rx_load.try_recv() {
            self.load_task = None;
            self.on_loaded(result);
        }
        while let Ok(result) = self.rx_submission.try_recv() {
            self.on_submitted(result);
        }
        while let Ok(payload) = self.rx_finalized.try_recv() {
            self.on_finalized(payload);
        }
    }

    fn teardown(&mut self) {
        if self.coordinator.cancel() {
            log::info!("cancelled in-flight submission on exit");
        }
        if let Some(task) = self.submission_task.take() {
            task.abort();
        }
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.start_load();

        // Main UI loop
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            // Check for keyboard and mouse input
            if event::poll(POLL_TIMEOUT)? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        code,
                        modifiers,
                        kind,
                        ..
                    }) if kind == KeyEventKind::Press => {
                        if self.handle_key(code, modifiers) {
                            self.teardown();
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.pump_gestures();
                    }
                    _ => {}
                }
            }

            self.drain_channels();

            // Let spawned tasks make progress between frames
            tokio::task::yield_now().await;
        }
    }
}
