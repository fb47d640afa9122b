use rand::Rng;

use super::{
    catalog::{Card, ImageRef},
    deck::Deck,
};
use crate::{config::CyclingMode, error::GameResult};

/// The word/image source behind a round
#[derive(Debug, Clone)]
pub enum Prompts {
    Paired(Deck<Card>),
    Independent {
        words: Deck<String>,
        images: Deck<ImageRef>,
    },
}

impl Prompts {
    pub fn new(mode: CyclingMode, cards: &[Card], rng: &mut impl Rng) -> GameResult<Self> {
        match mode {
            CyclingMode::Paired => Ok(Self::Paired(Deck::new("card", cards.to_vec(), rng)?)),
            CyclingMode::Independent => {
                let words = cards.iter().map(|card| card.word.clone()).collect();
                let images = cards.iter().map(|card| card.image.clone()).collect();
                Ok(Self::Independent {
                    words: Deck::new("word", words, rng)?,
                    images: Deck::new("image", images, rng)?,
                })
            }
        }
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        match self {
            Self::Paired(cards) => cards.reset(rng),
            Self::Independent { words, images } => {
                words.reset(rng);
                images.reset(rng);
            }
        }
    }

    pub fn advance(&mut self, rng: &mut impl Rng) {
        match self {
            Self::Paired(cards) => {
                cards.advance(rng);
            }
            Self::Independent { words, images } => {
                words.advance(rng);
                images.advance(rng);
            }
        }
    }

    pub fn current_word(&self) -> &str {
        match self {
            Self::Paired(cards) => &cards.current().word,
            Self::Independent { words, .. } => words.current(),
        }
    }

    pub fn current_image(&self) -> &ImageRef {
        match self {
            Self::Paired(cards) => &cards.current().image,
            Self::Independent { images, .. } => images.current(),
        }
    }

    pub fn mode(&self) -> CyclingMode {
        match self {
            Self::Paired(_) => CyclingMode::Paired,
            Self::Independent { .. } => CyclingMode::Independent,
        }
    }
}
