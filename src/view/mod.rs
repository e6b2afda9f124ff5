//! Map interaction state machine
//!
//! This module handles:
//! - The UI mode cycle (idle / placing / viewing)
//! - Carousel position within a selected group
//! - Register-mode toggling and filter text
//! - Unconditional reset when the spot list is reloaded
//!
//! The machine is pure: derived groups are passed into event dispatch and
//! side effects (persisting spots, reloading the list) belong to the caller.
//! After every transition an immutable [`ViewModel`] snapshot can be taken;
//! rendering is a function of that snapshot alone.

use crate::spot::filter::TagSuggestion;
use crate::spot::group::SpotGroup;
use crate::spot::Coordinates;
use serde::{Deserialize, Serialize};

/// UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Browsing the map, nothing selected
    Idle,
    /// A coordinate is pending and the creation form is open
    Placing,
    /// A group is open in the detail carousel
    Viewing,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Placing => write!(f, "placing"),
            Self::Viewing => write!(f, "viewing"),
        }
    }
}

/// Carousel navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Previous,
    Next,
}

/// An interaction event, as dispatched by the presentation layer
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// The map surface was clicked at a coordinate
    MapClick { lat: f64, lng: f64 },
    /// A marker group was clicked (index into the derived group list)
    MarkerClick { group: usize },
    /// Carousel navigation (button or arrow key)
    Navigate { direction: NavDirection },
    /// The creation form was submitted successfully
    FormSubmitted,
    /// The creation form was cancelled
    FormCancelled,
    /// The detail view was closed
    Close,
    /// Register mode was toggled
    SetRegister { enabled: bool },
    /// In-progress filter input changed
    SetFilterText { text: String },
    /// The typed filter was applied to the map
    ApplyFilter,
}

/// Immutable snapshot of the interaction state plus the derived board
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_coordinate: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_group: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_index: Option<usize>,
    pub register_enabled: bool,
    pub filter_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_filter: Option<String>,
    pub groups: Vec<SpotGroup>,
    pub suggestions: Vec<TagSuggestion>,
}

/// The interaction state machine
///
/// Lifecycle is one browsing session. Exactly one of the pending coordinate
/// and the active group is meaningful at a time, governed by `mode`; the
/// carousel index is always in bounds for the active group while viewing.
#[derive(Debug, Clone)]
pub struct MapView {
    mode: Mode,
    pending: Option<Coordinates>,
    active_group: Option<usize>,
    carousel_index: usize,
    register_enabled: bool,
    filter_text: String,
    active_filter: Option<String>,
    revision: u64,
}

impl MapView {
    /// Create a machine in idle mode, bound to a spot-list revision
    pub fn new(revision: u64) -> Self {
        Self {
            mode: Mode::Idle,
            pending: None,
            active_group: None,
            carousel_index: 0,
            register_enabled: false,
            filter_text: String::new(),
            active_filter: None,
            revision,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether register mode is on
    pub fn register_enabled(&self) -> bool {
        self.register_enabled
    }

    /// The applied filter, if any
    pub fn active_filter(&self) -> Option<&str> {
        self.active_filter.as_deref()
    }

    /// Reconcile with the current spot-list revision
    ///
    /// A reloaded or replaced list shifts derived group identity, so any
    /// pending or active selection is dropped and the machine returns to
    /// idle. Called before every event dispatch and snapshot.
    pub fn sync(&mut self, revision: u64) {
        if revision != self.revision {
            self.revision = revision;
            self.reset_selection();
        }
    }

    /// Map surface clicked at a coordinate
    ///
    /// Enters placing mode only from idle with register mode on; otherwise
    /// the click is ignored.
    pub fn map_clicked(&mut self, at: Coordinates) {
        if self.mode == Mode::Idle && self.register_enabled {
            self.pending = Some(at);
            self.mode = Mode::Placing;
        }
    }

    /// Marker group clicked
    ///
    /// With register mode on, the group's coordinate becomes the pending
    /// placement; otherwise the group opens in the detail carousel at index
    /// zero. Clicks outside idle mode, or with an out-of-range group index,
    /// are ignored.
    pub fn marker_clicked(&mut self, groups: &[SpotGroup], index: usize) {
        if self.mode != Mode::Idle || index >= groups.len() {
            return;
        }
        if self.register_enabled {
            self.pending = Some(groups[index].coordinate);
            self.mode = Mode::Placing;
        } else {
            self.active_group = Some(index);
            self.carousel_index = 0;
            self.mode = Mode::Viewing;
        }
    }

    /// The creation form was submitted successfully
    ///
    /// The caller persists the spot and triggers a list reload; the machine
    /// only returns to idle.
    pub fn form_submitted(&mut self) {
        if self.mode == Mode::Placing {
            self.pending = None;
            self.mode = Mode::Idle;
        }
    }

    /// The creation form was cancelled, discarding the pending coordinate
    pub fn form_cancelled(&mut self) {
        if self.mode == Mode::Placing {
            self.pending = None;
            self.mode = Mode::Idle;
        }
    }

    /// The detail view was closed
    pub fn close_requested(&mut self) {
        if self.mode == Mode::Viewing {
            self.active_group = None;
            self.carousel_index = 0;
            self.mode = Mode::Idle;
        }
    }

    /// Move the carousel, wrapping in both directions
    ///
    /// Only meaningful while viewing a group of more than one spot.
    pub fn navigate(&mut self, groups: &[SpotGroup], direction: NavDirection) {
        if self.mode != Mode::Viewing {
            return;
        }
        let len = match self.active_group.and_then(|i| groups.get(i)) {
            Some(g) => g.len(),
            None => return,
        };
        if len <= 1 {
            return;
        }
        self.carousel_index = match direction {
            NavDirection::Next => (self.carousel_index + 1) % len,
            NavDirection::Previous => (self.carousel_index + len - 1) % len,
        };
    }

    /// Toggle register mode
    ///
    /// Turning it off unconditionally clears any pending or active selection
    /// and returns to idle, regardless of prior mode. The caller is
    /// responsible for only offering the toggle to users with write
    /// capability.
    pub fn set_register(&mut self, enabled: bool) {
        self.register_enabled = enabled;
        if !enabled {
            self.reset_selection();
        }
    }

    /// Update the in-progress filter input (no transition)
    pub fn set_filter_text(&mut self, text: String) {
        self.filter_text = text;
    }

    /// Apply the typed filter to the map
    ///
    /// An empty or whitespace-only input clears the filter. Applying a
    /// filter re-derives the group list, so any selection is dropped the
    /// same way a list reload drops it.
    pub fn apply_filter(&mut self) {
        let trimmed = self.filter_text.trim();
        self.active_filter = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.reset_selection();
    }

    /// Dispatch one event against the current derived group list
    pub fn apply(&mut self, event: ViewEvent, groups: &[SpotGroup]) {
        match event {
            ViewEvent::MapClick { lat, lng } => self.map_clicked(Coordinates::new(lat, lng)),
            ViewEvent::MarkerClick { group } => self.marker_clicked(groups, group),
            ViewEvent::Navigate { direction } => self.navigate(groups, direction),
            ViewEvent::FormSubmitted => self.form_submitted(),
            ViewEvent::FormCancelled => self.form_cancelled(),
            ViewEvent::Close => self.close_requested(),
            ViewEvent::SetRegister { enabled } => self.set_register(enabled),
            ViewEvent::SetFilterText { text } => self.set_filter_text(text),
            ViewEvent::ApplyFilter => self.apply_filter(),
        }
    }

    /// Produce an immutable snapshot for the presentation layer
    pub fn snapshot(
        &self,
        groups: &[SpotGroup],
        suggestions: &[TagSuggestion],
    ) -> ViewModel {
        ViewModel {
            mode: self.mode,
            pending_coordinate: self.pending,
            active_group: self.active_group,
            carousel_index: match self.mode {
                Mode::Viewing => Some(self.carousel_index),
                _ => None,
            },
            register_enabled: self.register_enabled,
            filter_text: self.filter_text.clone(),
            active_filter: self.active_filter.clone(),
            groups: groups.to_vec(),
            suggestions: suggestions.to_vec(),
        }
    }

    fn reset_selection(&mut self) {
        self.pending = None;
        self.active_group = None;
        self.carousel_index = 0;
        self.mode = Mode::Idle;
    }
}
