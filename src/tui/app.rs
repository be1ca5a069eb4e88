//! Explorer state: filter criteria, selection, and fetch status.

use std::time::Instant;

use ratatui::widgets::ListState;

use crate::core::models::{FilterCriteria, ModelRecord, filter};

pub struct App {
    pub(super) criteria: FilterCriteria,
    /// Index into the filtered list.
    pub(super) selected: usize,
    pub(super) list_state: ListState,
    /// Show the detail pane for the selected model.
    pub(super) expanded: bool,
    /// Set while a fetch runs on the background thread.
    pub(super) fetch_started_at: Option<Instant>,
}

impl App {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            selected: 0,
            list_state: ListState::default(),
            expanded: false,
            fetch_started_at: None,
        }
    }

    pub(super) fn is_loading(&self) -> bool {
        self.fetch_started_at.is_some()
    }

    /// Visible records for the current criteria.
    pub(super) fn visible<'a>(&self, records: &'a [ModelRecord]) -> Vec<&'a ModelRecord> {
        filter(records, &self.criteria)
    }

    /// Keep the selection inside a list of `len` items.
    pub(super) fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub(super) fn select_next(&mut self, step: usize, len: usize) {
        self.selected = self.selected.saturating_add(step);
        self.clamp_selection(len);
    }

    pub(super) fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    /// Criteria changed: the old index means nothing in the new list.
    pub(super) fn reset_selection(&mut self) {
        self.selected = 0;
        self.list_state = ListState::default();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
