//! CB-009: Addressable selection.
//!
//! The open recipe is addressed by a fragment: its file name without the
//! extension. The fragment lives behind `Navigation` so the shelf never
//! touches process-wide location state directly.

/// Where the current fragment is stored.
pub trait Navigation {
    /// Raw fragment value, possibly with a leading `#` and percent-encoding.
    fn get(&self) -> String;

    /// Replace the fragment.
    fn set(&mut self, value: &str);
}

/// In-process fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryNavigation {
    fragment: String,
}

impl MemoryNavigation {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl Navigation for MemoryNavigation {
    fn get(&self) -> String {
        self.fragment.clone()
    }

    fn set(&mut self, value: &str) {
        self.fragment = encode_fragment(value);
    }
}

/// Decode a fragment: strip a leading `#`, undo percent-encoding.
/// Undecodable input is returned as-is.
pub fn decode_fragment(raw: &str) -> String {
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Percent-encode a recipe name for use as a fragment.
pub fn encode_fragment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
