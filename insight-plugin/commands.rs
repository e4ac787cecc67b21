use insight_core::{
  Direction,
  LookupKind,
  LookupResult,
  OverlayId,
  OverlayRegistry,
  OverlaySize,
  cell_offsets,
  navigation,
};
use serde_json::Value;

use crate::{
  config::{
    InsightConfig,
    RepositionMode,
  },
  host::{
    EditorHost,
    OverlayPlacement,
  },
};

/// The plugin: command handlers wiring user commands to the overlay
/// registry, the navigation engine, and the grid engine, with the host
/// behind the [`EditorHost`] seam.
///
/// Commands run to completion one at a time; the registry is owned here and
/// never shared. No command raises past this boundary: every failure path
/// degrades to a user-visible message and leaves state consistent.
pub struct CodeInsight<H: EditorHost> {
  host:     H,
  config:   InsightConfig,
  registry: OverlayRegistry,
}

impl<H: EditorHost> CodeInsight<H> {
  /// Build the plugin from an optional host-supplied configuration blob.
  /// A missing or invalid blob falls back to viewport-derived defaults.
  pub fn new(host: H, user_config: Option<Value>) -> Self {
    let viewport = host.viewport();
    let config = match user_config {
      Some(value) => match InsightConfig::from_value(value) {
        Ok(config) => config,
        Err(err) => {
          log::warn!("invalid user config, falling back to defaults: {err}");
          InsightConfig::default_for(viewport)
        },
      },
      None => InsightConfig::default_for(viewport),
    };
    Self {
      host,
      config,
      registry: OverlayRegistry::new(),
    }
  }

  pub fn config(&self) -> &InsightConfig {
    &self.config
  }

  pub fn registry(&self) -> &OverlayRegistry {
    &self.registry
  }

  pub fn show_definitions(&mut self) {
    self.show_lookup(LookupKind::Definitions);
  }

  pub fn show_type_definitions(&mut self) {
    self.show_lookup(LookupKind::TypeDefinitions);
  }

  pub fn show_references(&mut self) {
    self.show_lookup(LookupKind::References);
  }

  fn show_lookup(&mut self, kind: LookupKind) {
    let results = match self.host.fetch_results(kind) {
      Ok(results) => results,
      Err(err) => {
        log::error!("{} lookup failed: {err:#}", kind.method());
        self.host.show_message(&format!("No {} found", kind.noun()));
        return;
      },
    };
    if results.is_empty() {
      self.host.show_message(&format!("No {} found", kind.noun()));
      return;
    }

    let total = results.len();
    let title = result_title(&results[0], 0, total);
    let id = match self.host.open_overlay(&results[0], &self.config.opts, &title) {
      Ok(id) => id,
      Err(err) => {
        log::error!("failed to open overlay: {err:#}");
        self.host.show_message("Could not open overlay");
        return;
      },
    };

    if let Err(err) = self.registry.create(id, results, self.config.pos) {
      // Unreachable with a non-empty result list, but never panic over it.
      log::error!("failed to register overlay {id}: {err}");
      return;
    }
    log::debug!("registered overlay {id} with {total} results");
    self
      .host
      .show_message(&format!("Showing [1/{total}] {}", kind.noun()));
  }

  /// Advance to the next result, wrapping at the end.
  pub fn next_result(&mut self, overlay: Option<OverlayId>) {
    self.navigate(overlay, navigation::advance);
  }

  /// Go back to the previous result, wrapping at the start.
  pub fn prev_result(&mut self, overlay: Option<OverlayId>) {
    self.navigate(overlay, navigation::retreat);
  }

  fn navigate(&mut self, overlay: Option<OverlayId>, step: fn(usize, usize) -> Option<usize>) {
    let Some(id) = overlay.or_else(|| self.host.current_overlay()) else {
      self.host.show_message("No overlay focused");
      return;
    };
    let Some(state) = self.registry.get(id) else {
      self
        .host
        .show_message(&format!("No definitions found for {id}"));
      return;
    };

    let total = state.total();
    let Some(target) = step(state.current_index, total) else {
      self.host.show_message("No more definitions found");
      return;
    };
    let result = state.results[target].clone();
    let title = result_title(&result, target, total);

    // Commit the index before the redraw: the redraw is best-effort and a
    // failure must not leave the registry on the old result.
    self.registry.update_index(id, target);
    if let Err(err) = self.host.set_overlay_content(id, &result, &title) {
      log::error!("failed to redraw overlay {id}: {err:#}");
      self.host.show_message("Could not update overlay");
      return;
    }
    self
      .host
      .show_message(&format!("Showing [{}/{total}] definitions", target + 1));
  }

  /// Reposition the focused overlay, parsing the original `h`/`j`/`k`/`l`
  /// command keys. An unrecognized key is a quiet no-op.
  pub fn move_overlay_key(&mut self, key: &str) {
    let Some(direction) = Direction::from_key(key) else {
      log::debug!("unrecognized move key: {key:?}");
      return;
    };
    self.move_overlay(direction);
  }

  /// Reposition the focused overlay in the configured mode.
  pub fn move_overlay(&mut self, direction: Direction) {
    match self.config.mode {
      RepositionMode::Absolute => self.move_absolute(direction),
      RepositionMode::AnchorFlip => self.flip_anchor(direction),
    }
  }

  fn move_absolute(&mut self, direction: Direction) {
    let Some(id) = self.host.current_overlay() else {
      return;
    };
    let Some(geometry) = self.host.overlay_geometry(id) else {
      return;
    };
    if !geometry.floating {
      return;
    }
    let Some(state) = self.registry.get(id) else {
      self.host.show_message("Nothing to move");
      return;
    };

    let cell = state.grid_cell.step(direction);
    let offsets = cell_offsets(cell, self.host.viewport(), OverlaySize {
      width:  geometry.width,
      height: geometry.height,
    });

    self.registry.update_cell(id, cell);
    let placement = OverlayPlacement::Coordinates {
      row: offsets.row,
      col: offsets.col,
    };
    if let Err(err) = self.host.set_overlay_placement(id, placement) {
      log::error!("failed to move overlay {id}: {err:#}");
      self.host.show_message("Could not move overlay");
    }
  }

  fn flip_anchor(&mut self, direction: Direction) {
    let Some(id) = self.host.current_overlay() else {
      return;
    };
    let Some(geometry) = self.host.overlay_geometry(id) else {
      return;
    };
    if !geometry.floating {
      return;
    }
    let Some(anchor) = geometry.anchor.flip(direction) else {
      log::debug!(
        "no anchor flip from {:?} going {:?}",
        geometry.anchor,
        direction
      );
      return;
    };

    if let Err(err) = self
      .host
      .set_overlay_placement(id, OverlayPlacement::Anchor(anchor))
    {
      log::error!("failed to re-anchor overlay {id}: {err:#}");
      self.host.show_message("Could not move overlay");
    }
  }

  /// Host notification that an overlay was closed. Unknown ids are fine;
  /// the notification can race with state that is already gone.
  pub fn on_overlay_closed(&mut self, id: OverlayId) {
    self.registry.remove(id);
  }
}

/// Overlay title: `{basename}[{index+1}/{total}]`.
fn result_title(result: &LookupResult, index: usize, total: usize) -> String {
  format!("{}[{}/{}]", result.basename(), index + 1, total)
}

#[cfg(test)]
mod tests {
  use insight_core::LookupPosition;

  use super::*;

  #[test]
  fn titles_render_basename_and_one_based_index() {
    let result = LookupResult {
      uri:      "file:///src/main.rs".to_string(),
      position: LookupPosition {
        line:      3,
        character: 0,
      },
    };
    assert_eq!(result_title(&result, 0, 4), "main.rs[1/4]");
    assert_eq!(result_title(&result, 3, 4), "main.rs[4/4]");
  }
}
