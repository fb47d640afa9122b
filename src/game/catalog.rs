use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Opaque handle to a picture the presentation layer knows how to show
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A word shown together with its picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub image: ImageRef,
}

impl Card {
    pub fn new(word: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            image: ImageRef::new(image),
        }
    }
}

/// The fixed set every round deals from
pub static CARDS: Lazy<Vec<Card>> = Lazy::new(|| {
    vec![
        Card::new("one", "launcher_background"),
        Card::new("two", "p"),
        Card::new("zebra", "me"),
        Card::new("cow", "lion"),
        Card::new("squat", "moi"),
    ]
});
