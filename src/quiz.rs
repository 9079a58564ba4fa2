//! Multiple-choice quiz walk: answer each question in turn, then score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::StudyError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; 4],
    pub correct: OptionKey,
}

impl QuizQuestion {
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }
}

pub fn sample_quiz() -> Vec<QuizQuestion> {
    fn q(question: &str, options: [&str; 4], correct: OptionKey) -> QuizQuestion {
        QuizQuestion {
            question: question.to_string(),
            options: options.map(str::to_string),
            correct,
        }
    }

    vec![
        q(
            "What is the process by which plants make their own food using sunlight?",
            ["Respiration", "Photosynthesis", "Digestion", "Fermentation"],
            OptionKey::B,
        ),
        q(
            "Which organelle is known as the 'powerhouse of the cell'?",
            ["Nucleus", "Ribosome", "Mitochondria", "Endoplasmic Reticulum"],
            OptionKey::C,
        ),
        q(
            "What is the chemical symbol for water?",
            ["H2O", "CO2", "NaCl", "O2"],
            OptionKey::A,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    Question(usize),
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
}

impl QuizResults {
    pub fn verdict(&self) -> &'static str {
        if self.percentage >= 70 {
            "Excellent!"
        } else if self.percentage >= 50 {
            "Good Job!"
        } else {
            "Keep Practicing!"
        }
    }
}

#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<OptionKey>,
    answers: BTreeMap<usize, OptionKey>,
    finished: bool,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: 0,
            selected: None,
            answers: BTreeMap::new(),
            finished: false,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn selected(&self) -> Option<OptionKey> {
        self.selected
    }

    pub fn answer(&self, index: usize) -> Option<OptionKey> {
        self.answers.get(&index).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress_percent(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f32 / self.questions.len() as f32 * 100.0
    }

    pub fn select(&mut self, key: OptionKey) -> Result<(), StudyError> {
        if self.finished {
            return Err(StudyError::QuizFinished);
        }
        self.selected = Some(key);
        Ok(())
    }

    /// Records the selected option and moves on; the last question moves to
    /// the results state.
    pub fn next(&mut self) -> Result<QuizStep, StudyError> {
        if self.finished || self.questions.is_empty() {
            return Err(StudyError::QuizFinished);
        }
        let choice = self
            .selected
            .take()
            .ok_or(StudyError::NoAnswerSelected(self.current))?;
        self.answers.insert(self.current, choice);

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            Ok(QuizStep::Question(self.current))
        } else {
            self.finished = true;
            Ok(QuizStep::Finished)
        }
    }

    /// Number of recorded answers equal to the question's correct option.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i) == Some(&q.correct))
            .count()
    }

    pub fn results(&self) -> Option<QuizResults> {
        if !self.finished {
            return None;
        }
        let score = self.score();
        let total = self.questions.len();
        let percentage = (score as f64 / total as f64 * 100.0).round() as u32;
        Some(QuizResults {
            score,
            total,
            percentage,
        })
    }

    pub fn try_again(&mut self) {
        self.current = 0;
        self.selected = None;
        self.answers.clear();
        self.finished = false;
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(sample_quiz())
    }
}
