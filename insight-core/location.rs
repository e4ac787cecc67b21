use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// 0-based position within a resource, as delivered by the language server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupPosition {
  pub line:      u32,
  pub character: u32,
}

impl LookupPosition {
  /// Convert to the 1-based `(line, character)` pair expected by hosts whose
  /// cursor API counts lines from 1.
  pub fn to_cursor(self) -> (u32, u32) {
    (self.line + 1, self.character)
  }
}

/// One lookup result: a resource plus the start of the matched range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
  pub uri:      String,
  pub position: LookupPosition,
}

impl LookupResult {
  /// Last path segment of the uri, used for overlay titles.
  pub fn basename(&self) -> &str {
    self.uri.rsplit('/').next().unwrap_or(&self.uri)
  }
}

/// Which lookup the host is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
  Definitions,
  TypeDefinitions,
  References,
}

impl LookupKind {
  /// RPC method name the host forwards to its language-server bridge.
  pub fn method(self) -> &'static str {
    match self {
      Self::Definitions => "definitions",
      Self::TypeDefinitions => "typeDefinitions",
      Self::References => "references",
    }
  }

  /// Noun used in user-facing messages.
  pub fn noun(self) -> &'static str {
    match self {
      Self::Definitions | Self::TypeDefinitions => "definitions",
      Self::References => "references",
    }
  }
}

#[derive(Debug, Error)]
pub enum ResultParseError {
  #[error("invalid lookup result shape")]
  InvalidShape,
  #[error("failed to decode lookup payload: {0}")]
  Decode(#[from] serde_json::Error),
}

/// Decode a raw lookup response into results.
///
/// Accepts the shapes language servers produce for definition/reference
/// queries: a single `Location`, a `Location` array, a `LocationLink` array,
/// or `null`/absent for "nothing found". An empty result is a valid outcome,
/// not an error.
pub fn parse_results_response(
  result: Option<&Value>,
) -> Result<Vec<LookupResult>, ResultParseError> {
  let Some(result) = result else {
    return Ok(Vec::new());
  };
  if result.is_null() {
    return Ok(Vec::new());
  }

  if let Ok(location) = serde_json::from_value::<LocationPayload>(result.clone()) {
    return Ok(vec![location.into_result()]);
  }

  if let Ok(locations) = serde_json::from_value::<Vec<LocationPayload>>(result.clone()) {
    return Ok(
      locations
        .into_iter()
        .map(LocationPayload::into_result)
        .collect(),
    );
  }

  if let Ok(links) = serde_json::from_value::<Vec<LocationLinkPayload>>(result.clone()) {
    return Ok(
      links
        .into_iter()
        .map(LocationLinkPayload::into_result)
        .collect(),
    );
  }

  Err(ResultParseError::InvalidShape)
}

#[derive(Debug, Deserialize)]
struct PositionPayload {
  line:      u32,
  character: u32,
}

impl PositionPayload {
  fn into_position(self) -> LookupPosition {
    LookupPosition {
      line:      self.line,
      character: self.character,
    }
  }
}

#[derive(Debug, Deserialize)]
struct RangePayload {
  start: PositionPayload,
}

#[derive(Debug, Deserialize)]
struct LocationPayload {
  uri:   String,
  range: RangePayload,
}

impl LocationPayload {
  fn into_result(self) -> LookupResult {
    LookupResult {
      uri:      self.uri,
      position: self.range.start.into_position(),
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationLinkPayload {
  target_uri:             String,
  target_selection_range: Option<RangePayload>,
  target_range:           RangePayload,
}

impl LocationLinkPayload {
  fn into_result(self) -> LookupResult {
    let range = self.target_selection_range.unwrap_or(self.target_range);
    LookupResult {
      uri:      self.target_uri,
      position: range.start.into_position(),
    }
  }
}
