//! The joke entity and its unpersisted content.

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of `setup` and `punchline`.
pub const MAX_FIELD_LEN: usize = 512;

/// A joke as returned by the upstream provider, before it has an id.
///
/// Either field may be absent; unknown upstream fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeContent {
  #[serde(default)]
  pub setup:     Option<String>,
  #[serde(default)]
  pub punchline: Option<String>,
}

impl JokeContent {
  pub fn new(setup: impl Into<String>, punchline: impl Into<String>) -> Self {
    Self {
      setup:     Some(setup.into()),
      punchline: Some(punchline.into()),
    }
  }

  /// Returns the name and length of the first field longer than
  /// [`MAX_FIELD_LEN`], if any.
  pub fn oversized_field(&self) -> Option<(&'static str, usize)> {
    [("setup", &self.setup), ("punchline", &self.punchline)]
      .into_iter()
      .filter_map(|(name, value)| value.as_deref().map(|v| (name, v.chars().count())))
      .find(|(_, len)| *len > MAX_FIELD_LEN)
  }

  /// Attach the id assigned by the store.
  pub fn into_joke(self, id: i64) -> Joke {
    Joke {
      id,
      setup: self.setup,
      punchline: self.punchline,
    }
  }
}

/// A persisted joke row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
  pub id:        i64,
  pub setup:     Option<String>,
  pub punchline: Option<String>,
}
