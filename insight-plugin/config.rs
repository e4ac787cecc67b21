use insight_core::{
  AnchorCorner,
  GridCell,
  OverlaySize,
  Viewport,
  cell_offsets,
};
use serde::{
  Deserialize,
  Serialize,
};
use serde_json::{
  Map,
  Value,
};

/// Fraction of the viewport the overlay occupies by default.
const DEFAULT_SIZE_FRACTION: f32 = 0.5;

const DEFAULT_BORDER: [&str; 8] = ["❖", "═", "╗", "║", "⇲", "═", "╚", "║"];
const DEFAULT_TITLE: &str = "CodeInsight";

/// Option keys whose host-native form requires strict booleans; numeric
/// `0`/`1` values are coerced before deserialization.
const FLAG_KEYS: [&str; 2] = ["focusable", "external"];

/// How reposition commands move the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositionMode {
  /// Recompute absolute screen offsets from the 3×3 grid cell.
  #[default]
  Absolute,
  /// Legacy: flip the anchor corner and let the renderer reinterpret the
  /// declared offsets.
  AnchorFlip,
}

/// Window options handed to the host when an overlay is opened. The typed
/// fields are the ones the placement math consults; everything else in the
/// user's blob passes through `extra` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
  pub anchor:    AnchorCorner,
  pub width:     u16,
  pub height:    u16,
  pub row:       u16,
  pub col:       u16,
  pub focusable: bool,
  pub border:    Vec<String>,
  pub title:     String,
  pub zindex:    u32,
  #[serde(flatten)]
  pub extra:     Map<String, Value>,
}

/// Startup configuration: default grid cell, reposition mode, and the
/// overlay options blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
  pub pos:  GridCell,
  #[serde(default)]
  pub mode: RepositionMode,
  pub opts: OverlayOptions,
}

impl InsightConfig {
  /// Defaults derived from the viewport: a half-viewport overlay in the
  /// top-right cell.
  pub fn default_for(viewport: Viewport) -> Self {
    let size = OverlaySize {
      width:  (viewport.columns as f32 * DEFAULT_SIZE_FRACTION) as u16,
      height: (viewport.rows as f32 * DEFAULT_SIZE_FRACTION) as u16,
    };
    let offsets = cell_offsets(GridCell::TOP_RIGHT, viewport, size);
    Self {
      pos:  GridCell::TOP_RIGHT,
      mode: RepositionMode::default(),
      opts: OverlayOptions {
        anchor:    AnchorCorner::NW,
        width:     size.width,
        height:    size.height,
        row:       offsets.row,
        col:       offsets.col,
        focusable: true,
        border:    DEFAULT_BORDER.iter().map(|glyph| glyph.to_string()).collect(),
        title:     DEFAULT_TITLE.to_string(),
        zindex:    1,
        extra:     Map::new(),
      },
    }
  }

  /// Deserialize a host-supplied configuration blob, normalizing `0`/`1`
  /// flag values first.
  pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
    normalize_flags(&mut value);
    serde_json::from_value(value)
  }

}

/// Coerce numeric `0`/`1` values into booleans for the option keys that
/// require them. Other keys are left alone; `row: 0` and `zindex: 1` are
/// legitimate numbers.
pub fn normalize_flags(value: &mut Value) {
  let Some(opts) = value.get_mut("opts").and_then(Value::as_object_mut) else {
    return;
  };
  for key in FLAG_KEYS {
    if let Some(flag) = opts.get_mut(key) {
      match flag.as_u64() {
        Some(0) => *flag = Value::Bool(false),
        Some(1) => *flag = Value::Bool(true),
        _ => {},
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  const VIEWPORT: Viewport = Viewport {
    columns:       100,
    rows:          40,
    reserved_rows: 1,
  };

  #[test]
  fn defaults_derive_from_viewport() {
    let config = InsightConfig::default_for(VIEWPORT);
    assert_eq!(config.pos, GridCell::TOP_RIGHT);
    assert_eq!(config.mode, RepositionMode::Absolute);
    assert_eq!(config.opts.width, 50);
    assert_eq!(config.opts.height, 20);
    assert_eq!(config.opts.row, 0);
    assert_eq!(config.opts.col, 50);
    assert!(config.opts.focusable);
    assert_eq!(config.opts.title, "CodeInsight");
    assert_eq!(config.opts.border.len(), 8);
  }

  fn blob() -> Value {
    json!({
      "pos": "center",
      "mode": "anchor-flip",
      "opts": {
        "anchor": "NW",
        "width": 60,
        "height": 20,
        "row": 0,
        "col": 40,
        "focusable": 1,
        "border": ["+", "-", "+", "|", "+", "-", "+", "|"],
        "title": "CodeInsight",
        "zindex": 1,
        "external": 0,
        "relative": "editor"
      }
    })
  }

  #[test]
  fn parses_blob_and_coerces_flags() {
    let config = InsightConfig::from_value(blob()).expect("config parse");
    assert_eq!(config.pos, GridCell::CENTER);
    assert_eq!(config.mode, RepositionMode::AnchorFlip);
    assert!(config.opts.focusable);
    // Coerced flag lands in the pass-through map as a real boolean.
    assert_eq!(config.opts.extra.get("external"), Some(&json!(false)));
    // Numeric fields are not mistaken for flags.
    assert_eq!(config.opts.row, 0);
    assert_eq!(config.opts.zindex, 1);
  }

  #[test]
  fn passes_unknown_options_through_unchanged() {
    let config = InsightConfig::from_value(blob()).expect("config parse");
    assert_eq!(config.opts.extra.get("relative"), Some(&json!("editor")));
  }

  #[test]
  fn mode_defaults_to_absolute() {
    let mut value = blob();
    value.as_object_mut().expect("object").remove("mode");
    let config = InsightConfig::from_value(value).expect("config parse");
    assert_eq!(config.mode, RepositionMode::Absolute);
  }

  #[test]
  fn unknown_cell_name_falls_back_to_center() {
    let mut value = blob();
    value["pos"] = json!("upper-middle");
    let config = InsightConfig::from_value(value).expect("config parse");
    assert_eq!(config.pos, GridCell::CENTER);
    // The rest of the blob survives the fallback.
    assert_eq!(config.mode, RepositionMode::AnchorFlip);
    assert_eq!(config.opts.width, 60);
  }
}
