use ratatui::widgets::{ListItem, ListState, ScrollbarState};
use std::collections::VecDeque;

/// A bounded list of items with selection and scrollbar state.
///
/// Newest items are at the front (index 0) so the list reads naturally when
/// rendered bottom-to-top.
pub struct ScrollableList {
    max_items: usize,
    pub list_items: VecDeque<ListItem<'static>>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
}

impl ScrollableList {
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items,
            list_items: VecDeque::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    /// List holding `lines` in the given order, for top-to-bottom rendering
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let list_items: VecDeque<ListItem<'static>> = lines
            .into_iter()
            .map(|line| ListItem::new(line.to_string()))
            .collect();
        let mut list = Self::new(list_items.len());
        list.scroll_state = list.scroll_state.content_length(list_items.len());
        list.list_items = list_items;
        list.jump_to_first();
        list
    }

    pub fn clear(&mut self) {
        self.list_items.clear();
        self.list_state = ListState::default();
        self.scroll_state = ScrollbarState::default();
    }

    pub fn jump_to_first(&mut self) {
        self.list_state.select_first();
        self.scroll_state.first();
    }

    pub fn jump_to_last(&mut self) {
        self.list_state
            .select(Some(self.list_items.len().saturating_sub(1)));
        self.scroll_state.last();
    }

    pub fn move_down(&mut self) {
        self.list_state.select_previous();
        self.scroll_state.prev();
    }

    pub fn move_up(&mut self) {
        self.list_state.select_next();
        self.scroll_state.next();
    }

    pub fn push(&mut self, item: ListItem<'static>) {
        self.list_items.push_front(item);
        self.list_items.truncate(self.max_items);
        self.scroll_state = self.scroll_state.content_length(self.list_items.len());
        self.jump_to_first();
    }

    pub fn len(&self) -> usize {
        self.list_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list_items.is_empty()
    }
}

/// Single-line text input with a character cursor.
#[derive(Default)]
pub struct UserInput {
    pub value: String,
    /// Cursor position in characters
    pub char_idx: usize,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_idx(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.char_idx)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn backspace(&mut self) {
        if self.char_idx == 0 {
            return;
        }
        self.move_left();
        self.delete();
    }

    pub fn delete(&mut self) {
        if self.char_idx < self.char_count() {
            let idx = self.byte_idx();
            self.value.remove(idx);
        }
    }

    pub fn input(&mut self, to_insert: char) {
        let idx = self.byte_idx();
        self.value.insert(idx, to_insert);
        self.move_right();
    }

    pub fn jump_to_first(&mut self) {
        self.char_idx = 0;
    }

    pub fn jump_to_last(&mut self) {
        self.char_idx = self.char_count();
    }

    pub fn move_left(&mut self) {
        self.char_idx = self.char_idx.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.char_idx = (self.char_idx + 1).min(self.char_count());
    }

    /// Take the current value, leaving the input empty
    pub fn submit(&mut self) -> String {
        self.char_idx = 0;
        std::mem::take(&mut self.value)
    }
}
