use serde::{
  Deserialize,
  Serialize,
};

/// One of the 9 named positions of the 3×3 placement grid. `col` and `row`
/// are both in `0..=2`, with `(0, 0)` the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GridCell {
  pub col: u8,
  pub row: u8,
}

impl GridCell {
  pub const BOTTOM: Self = Self { col: 1, row: 2 };
  pub const BOTTOM_LEFT: Self = Self { col: 0, row: 2 };
  pub const BOTTOM_RIGHT: Self = Self { col: 2, row: 2 };
  pub const CENTER: Self = Self { col: 1, row: 1 };
  pub const LEFT: Self = Self { col: 0, row: 1 };
  pub const RIGHT: Self = Self { col: 2, row: 1 };
  pub const TOP: Self = Self { col: 1, row: 0 };
  pub const TOP_LEFT: Self = Self { col: 0, row: 0 };
  pub const TOP_RIGHT: Self = Self { col: 2, row: 0 };

  pub fn name(self) -> &'static str {
    match (self.col, self.row) {
      (0, 0) => "top-left",
      (1, 0) => "top",
      (2, 0) => "top-right",
      (0, 1) => "left",
      (1, 1) => "center",
      (2, 1) => "right",
      (0, 2) => "bottom-left",
      (1, 2) => "bottom",
      _ => "bottom-right",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    let cell = match name {
      "top-left" => Self::TOP_LEFT,
      "top" => Self::TOP,
      "top-right" => Self::TOP_RIGHT,
      "left" => Self::LEFT,
      "center" => Self::CENTER,
      "right" => Self::RIGHT,
      "bottom-left" => Self::BOTTOM_LEFT,
      "bottom" => Self::BOTTOM,
      "bottom-right" => Self::BOTTOM_RIGHT,
      _ => return None,
    };
    Some(cell)
  }

  /// Move one cell in `direction`, clamped at the grid edges (no wrap).
  pub fn step(self, direction: Direction) -> Self {
    match direction {
      Direction::Left => Self {
        col: self.col.saturating_sub(1),
        row: self.row,
      },
      Direction::Right => Self {
        col: (self.col + 1).min(2),
        row: self.row,
      },
      Direction::Up => Self {
        col: self.col,
        row: self.row.saturating_sub(1),
      },
      Direction::Down => Self {
        col: self.col,
        row: (self.row + 1).min(2),
      },
    }
  }
}

/// Cell names arrive in host-supplied blobs; an unknown name falls back to
/// the center cell rather than rejecting the whole blob.
impl From<String> for GridCell {
  fn from(name: String) -> Self {
    Self::from_name(&name).unwrap_or(Self::CENTER)
  }
}

impl From<GridCell> for String {
  fn from(cell: GridCell) -> Self {
    cell.name().to_string()
  }
}

/// Directional move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Left,
  Down,
  Up,
  Right,
}

impl Direction {
  /// Parse the original `h`/`j`/`k`/`l` command keys.
  pub fn from_key(key: &str) -> Option<Self> {
    match key {
      "h" => Some(Self::Left),
      "j" => Some(Self::Down),
      "k" => Some(Self::Up),
      "l" => Some(Self::Right),
      _ => None,
    }
  }
}

/// Corner of the overlay used as the fixed reference point for its declared
/// row/col offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorCorner {
  NW,
  NE,
  SW,
  SE,
}

impl AnchorCorner {
  /// Legacy repositioning: flip to the opposite corner along `direction`.
  ///
  /// Only the corners affected by the direction flip; for the rest the
  /// table has no entry and the move is a no-op (`None`).
  pub fn flip(self, direction: Direction) -> Option<Self> {
    match (direction, self) {
      (Direction::Left, Self::NE) => Some(Self::NW),
      (Direction::Left, Self::SE) => Some(Self::SW),
      (Direction::Right, Self::NW) => Some(Self::NE),
      (Direction::Right, Self::SW) => Some(Self::SE),
      (Direction::Up, Self::SW) => Some(Self::NW),
      (Direction::Up, Self::SE) => Some(Self::NE),
      (Direction::Down, Self::NW) => Some(Self::SW),
      (Direction::Down, Self::NE) => Some(Self::SE),
      _ => None,
    }
  }
}

/// Screen dimensions the placement math runs against. `reserved_rows` is the
/// command/status area at the bottom of the viewport, excluded from
/// placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
  pub columns:       u16,
  pub rows:          u16,
  pub reserved_rows: u16,
}

/// Overlay dimensions in viewport cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySize {
  pub width:  u16,
  pub height: u16,
}

/// Absolute screen offsets of an overlay's NW corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOffsets {
  pub row: u16,
  pub col: u16,
}

/// Map a grid cell to absolute screen offsets.
///
/// Pure function of its inputs. All divisions floor; an overlay larger than
/// the usable viewport floors at offset 0 rather than going negative.
pub fn cell_offsets(cell: GridCell, viewport: Viewport, size: OverlaySize) -> GridOffsets {
  let free_rows = viewport
    .rows
    .saturating_sub(size.height)
    .saturating_sub(viewport.reserved_rows)
    .saturating_sub(1);
  let free_cols = viewport.columns.saturating_sub(size.width);

  let row = match cell.row {
    0 => 0,
    1 => free_rows / 2,
    _ => free_rows,
  };
  let col = match cell.col {
    0 => 0,
    1 => free_cols / 2,
    _ => free_cols,
  };

  GridOffsets { row, col }
}

#[cfg(test)]
mod tests {
  use super::*;

  const VIEWPORT: Viewport = Viewport {
    columns:       100,
    rows:          40,
    reserved_rows: 1,
  };
  const SIZE: OverlaySize = OverlaySize {
    width:  60,
    height: 20,
  };

  #[test]
  fn step_clamps_at_grid_edges() {
    assert_eq!(GridCell::TOP_LEFT.step(Direction::Left), GridCell::TOP_LEFT);
    assert_eq!(GridCell::TOP_LEFT.step(Direction::Up), GridCell::TOP_LEFT);
    assert_eq!(
      GridCell::BOTTOM_RIGHT.step(Direction::Right),
      GridCell::BOTTOM_RIGHT
    );
    assert_eq!(
      GridCell::BOTTOM_RIGHT.step(Direction::Down),
      GridCell::BOTTOM_RIGHT
    );
  }

  #[test]
  fn step_moves_within_the_grid() {
    assert_eq!(GridCell::TOP_RIGHT.step(Direction::Down), GridCell::RIGHT);
    assert_eq!(GridCell::CENTER.step(Direction::Left), GridCell::LEFT);
    assert_eq!(GridCell::BOTTOM.step(Direction::Up), GridCell::CENTER);
  }

  #[test]
  fn center_offsets_floor() {
    let offsets = cell_offsets(GridCell::CENTER, VIEWPORT, SIZE);
    // row: floor((40 - 20 - 1 - 1) / 2), col: floor((100 - 60) / 2)
    assert_eq!(offsets, GridOffsets { row: 9, col: 20 });
  }

  #[test]
  fn corner_offsets_match_the_table() {
    assert_eq!(cell_offsets(GridCell::TOP_LEFT, VIEWPORT, SIZE), GridOffsets {
      row: 0,
      col: 0,
    });
    assert_eq!(
      cell_offsets(GridCell::TOP_RIGHT, VIEWPORT, SIZE),
      GridOffsets { row: 0, col: 40 }
    );
    assert_eq!(
      cell_offsets(GridCell::BOTTOM_LEFT, VIEWPORT, SIZE),
      GridOffsets { row: 18, col: 0 }
    );
    assert_eq!(
      cell_offsets(GridCell::BOTTOM_RIGHT, VIEWPORT, SIZE),
      GridOffsets { row: 18, col: 40 }
    );
  }

  #[test]
  fn oversized_overlay_floors_at_zero() {
    let tiny = Viewport {
      columns:       30,
      rows:          10,
      reserved_rows: 2,
    };
    let offsets = cell_offsets(GridCell::BOTTOM_RIGHT, tiny, SIZE);
    assert_eq!(offsets, GridOffsets { row: 0, col: 0 });
  }

  #[test]
  fn anchor_flip_swaps_only_affected_corners() {
    assert_eq!(
      AnchorCorner::NE.flip(Direction::Left),
      Some(AnchorCorner::NW)
    );
    assert_eq!(
      AnchorCorner::SE.flip(Direction::Left),
      Some(AnchorCorner::SW)
    );
    // No entry for NW on a leftward move.
    assert_eq!(AnchorCorner::NW.flip(Direction::Left), None);
    assert_eq!(
      AnchorCorner::NW.flip(Direction::Down),
      Some(AnchorCorner::SW)
    );
    assert_eq!(AnchorCorner::SW.flip(Direction::Down), None);
  }

  #[test]
  fn cell_names_round_trip() {
    for cell in [
      GridCell::TOP_LEFT,
      GridCell::TOP,
      GridCell::TOP_RIGHT,
      GridCell::LEFT,
      GridCell::CENTER,
      GridCell::RIGHT,
      GridCell::BOTTOM_LEFT,
      GridCell::BOTTOM,
      GridCell::BOTTOM_RIGHT,
    ] {
      assert_eq!(GridCell::from_name(cell.name()), Some(cell));
    }
    assert_eq!(GridCell::from_name("middle"), None);
  }

  #[test]
  fn unknown_name_deserializes_as_center() {
    let cell: GridCell =
      serde_json::from_value(serde_json::json!("upper-middle")).expect("cell parse");
    assert_eq!(cell, GridCell::CENTER);
  }

  #[test]
  fn direction_keys_parse() {
    assert_eq!(Direction::from_key("h"), Some(Direction::Left));
    assert_eq!(Direction::from_key("j"), Some(Direction::Down));
    assert_eq!(Direction::from_key("k"), Some(Direction::Up));
    assert_eq!(Direction::from_key("l"), Some(Direction::Right));
    assert_eq!(Direction::from_key("x"), None);
  }
}
