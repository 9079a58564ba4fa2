//! Flashcard deck with flip / navigate / shuffle, kept in memory only.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{active, contains_ignore_case, Criteria};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

const SAMPLE: &[(&str, &str)] = &[
    (
        "Photosynthesis",
        "The process by which green plants and some other organisms use sunlight to synthesize foods with the help of chlorophyll pigments.",
    ),
    (
        "Mitochondria",
        "The powerhouse of the cell, responsible for producing energy (ATP) through cellular respiration.",
    ),
    (
        "DNA",
        "Deoxyribonucleic acid, a molecule that carries genetic instructions for the development and function of living things.",
    ),
    (
        "Ecosystem",
        "A biological community of interacting organisms and their physical environment.",
    ),
    (
        "Cell Membrane",
        "A biological membrane that separates the interior of all cells from the outside environment and controls what enters and exits the cell.",
    ),
    (
        "Enzymes",
        "Proteins that catalyze biochemical reactions by lowering the activation energy required for the reaction to occur.",
    ),
    (
        "Homeostasis",
        "The tendency of a system, especially the physiological system of higher animals, to maintain internal stability.",
    ),
    (
        "Genetics",
        "The study of heredity and the variation of inherited characteristics.",
    ),
];

pub fn sample_flashcards() -> Vec<Flashcard> {
    SAMPLE
        .iter()
        .map(|(term, definition)| Flashcard {
            term: term.to_string(),
            definition: definition.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashcardCriteria {
    /// Case-insensitive substring of the term or the definition.
    pub search: Option<String>,
}

impl Criteria<Flashcard> for FlashcardCriteria {
    fn matches(&self, card: &Flashcard) -> bool {
        match active(&self.search) {
            Some(term) => {
                contains_ignore_case(&card.term, term)
                    || contains_ignore_case(&card.definition, term)
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    current: usize,
    face: Face,
    studied: BTreeSet<usize>,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            current: 0,
            face: Face::Front,
            studied: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    pub fn studied_count(&self) -> usize {
        self.studied.len()
    }

    pub fn is_studied(&self, index: usize) -> bool {
        self.studied.contains(&index)
    }

    /// Share of the deck flipped at least once, 0-100.
    pub fn progress_percent(&self) -> f32 {
        if self.cards.is_empty() {
            return 0.0;
        }
        self.studied.len() as f32 / self.cards.len() as f32 * 100.0
    }

    /// Turning a card to its back marks it studied.
    pub fn flip(&mut self) -> Face {
        if self.cards.is_empty() {
            return self.face;
        }
        self.face = match self.face {
            Face::Front => {
                self.studied.insert(self.current);
                Face::Back
            }
            Face::Back => Face::Front,
        };
        self.face
    }

    /// Returns false at the last card.
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.cards.len() {
            return false;
        }
        self.current += 1;
        self.face = Face::Front;
        true
    }

    /// Returns false at the first card.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.face = Face::Front;
        true
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.reset();
    }

    /// Back to the first card, nothing studied; order unchanged.
    pub fn reset(&mut self) {
        self.current = 0;
        self.face = Face::Front;
        self.studied.clear();
    }
}

impl Default for FlashcardDeck {
    fn default() -> Self {
        Self::new(sample_flashcards())
    }
}
