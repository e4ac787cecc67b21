use anyhow::Result;
use insight_core::{
  AnchorCorner,
  LookupKind,
  LookupResult,
  OverlayId,
  Viewport,
};

use crate::config::OverlayOptions;

/// What the host reports about an existing overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
  pub width:    u16,
  pub height:   u16,
  pub anchor:   AnchorCorner,
  /// Whether the window is currently a floating/overlay presentation.
  /// Reposition commands are no-ops on ordinary windows.
  pub floating: bool,
}

/// A placement instruction for an existing overlay: either absolute screen
/// offsets of the NW corner, or (legacy mode) a new anchor corner with the
/// declared offsets left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPlacement {
  Coordinates { row: u16, col: u16 },
  Anchor(AnchorCorner),
}

/// The editor side of the integration. Every method is a synchronous
/// request/response boundary; failures are reported by the command layer,
/// never retried.
pub trait EditorHost {
  /// Run a lookup through the host's language-server bridge. An empty
  /// result list is a valid, non-error outcome.
  fn fetch_results(&mut self, kind: LookupKind) -> Result<Vec<LookupResult>>;

  /// Current screen dimensions, including the reserved command/status rows.
  fn viewport(&self) -> Viewport;

  /// Open a new overlay showing `result`, returning the handle used as the
  /// registry key thereafter.
  fn open_overlay(
    &mut self,
    result: &LookupResult,
    opts: &OverlayOptions,
    title: &str,
  ) -> Result<OverlayId>;

  /// Switch the displayed content of an open overlay without recreating it.
  fn set_overlay_content(&mut self, id: OverlayId, result: &LookupResult, title: &str)
  -> Result<()>;

  /// Move or re-anchor an open overlay.
  fn set_overlay_placement(&mut self, id: OverlayId, placement: OverlayPlacement) -> Result<()>;

  /// Geometry of an open overlay, or `None` if the host no longer knows it.
  fn overlay_geometry(&self, id: OverlayId) -> Option<OverlayGeometry>;

  /// The overlay that currently has focus, if any.
  fn current_overlay(&self) -> Option<OverlayId>;

  /// Show an informational message to the user.
  fn show_message(&mut self, text: &str);
}
