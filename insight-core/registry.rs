use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::{
  grid::GridCell,
  location::LookupResult,
};

/// Opaque handle identifying one open overlay. Minted by the host when the
/// overlay is opened and used as the registry key thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Per-overlay navigation and placement state.
///
/// Invariant: `current_index < results.len()`. `create` establishes it and
/// the navigation engine is the only writer of `current_index`.
#[derive(Debug, Clone)]
pub struct OverlayState {
  pub current_index: usize,
  pub results:       Vec<LookupResult>,
  pub grid_cell:     GridCell,
}

impl OverlayState {
  pub fn current_result(&self) -> &LookupResult {
    &self.results[self.current_index]
  }

  pub fn total(&self) -> usize {
    self.results.len()
  }
}

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("cannot register an overlay with an empty result set")]
  EmptyResultSet,
}

/// Mapping from overlay handle to overlay state. Owns the overlay lifecycle:
/// created on first display, mutated by the navigation and grid engines,
/// removed on the host's close notification.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
  overlays: HashMap<OverlayId, OverlayState>,
}

impl OverlayRegistry {
  pub fn new() -> Self {
    Self {
      overlays: HashMap::new(),
    }
  }

  /// Register a freshly opened overlay at index 0.
  ///
  /// An empty result set is rejected and nothing is inserted. Registering an
  /// id that is already live replaces its state wholesale (a repeat lookup
  /// reuses the overlay).
  pub fn create(
    &mut self,
    id: OverlayId,
    results: Vec<LookupResult>,
    grid_cell: GridCell,
  ) -> Result<&OverlayState, RegistryError> {
    if results.is_empty() {
      return Err(RegistryError::EmptyResultSet);
    }
    let state = OverlayState {
      current_index: 0,
      results,
      grid_cell,
    };
    self.overlays.insert(id, state);
    Ok(&self.overlays[&id])
  }

  pub fn get(&self, id: OverlayId) -> Option<&OverlayState> {
    self.overlays.get(&id)
  }

  /// Set the current result index. Callers guarantee the new index is in
  /// bounds; unknown ids are ignored.
  pub fn update_index(&mut self, id: OverlayId, index: usize) {
    if let Some(state) = self.overlays.get_mut(&id) {
      state.current_index = index;
    }
  }

  /// Set the logical grid cell. Unknown ids are ignored.
  pub fn update_cell(&mut self, id: OverlayId, cell: GridCell) {
    if let Some(state) = self.overlays.get_mut(&id) {
      state.grid_cell = cell;
    }
  }

  /// Drop an overlay's state. Idempotent: the close notification can race
  /// with state that is already gone, so an absent id is a silent no-op.
  pub fn remove(&mut self, id: OverlayId) {
    self.overlays.remove(&id);
  }

  pub fn len(&self) -> usize {
    self.overlays.len()
  }

  pub fn is_empty(&self) -> bool {
    self.overlays.is_empty()
  }
}
