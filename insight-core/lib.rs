//! Core logic for floating lookup-result overlays: the result data model,
//! the per-overlay navigation state, and the 3×3 grid placement math. The
//! host editor integration lives in `insight-plugin`.

pub mod grid;
pub mod location;
pub mod navigation;
pub mod registry;

pub use grid::{
  AnchorCorner,
  Direction,
  GridCell,
  GridOffsets,
  OverlaySize,
  Viewport,
  cell_offsets,
};
pub use location::{
  LookupKind,
  LookupPosition,
  LookupResult,
  ResultParseError,
  parse_results_response,
};
pub use registry::{
  OverlayId,
  OverlayRegistry,
  OverlayState,
  RegistryError,
};
