//! Index arithmetic for cycling through a result set.
//!
//! Pure functions over `(current, total)`; the registry index is updated by
//! the caller only after one of these returns `Some`.

/// Next index with forward wraparound, or `None` when there is nothing to
/// navigate to (fewer than two results).
pub fn advance(current: usize, total: usize) -> Option<usize> {
  if total < 2 {
    return None;
  }
  if current >= total - 1 {
    Some(0)
  } else {
    Some(current + 1)
  }
}

/// Previous index with backward wraparound, or `None` when there is nothing
/// to navigate to.
pub fn retreat(current: usize, total: usize) -> Option<usize> {
  if total < 2 {
    return None;
  }
  if current == 0 {
    Some(total - 1)
  } else {
    Some(current - 1)
  }
}
