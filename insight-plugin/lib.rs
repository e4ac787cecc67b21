//! Command layer for the floating lookup-result overlay: the host-facing
//! [`EditorHost`] seam, the startup configuration surface, and the command
//! handlers that drive `insight-core`.

mod commands;
mod config;
mod host;

pub use commands::CodeInsight;
pub use config::{
  InsightConfig,
  OverlayOptions,
  RepositionMode,
  normalize_flags,
};
pub use host::{
  EditorHost,
  OverlayGeometry,
  OverlayPlacement,
};
