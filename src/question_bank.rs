//! Past-paper question bank with subject / standard / difficulty / year filters.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::catalog::{self, active, Criteria};
use crate::profile::UserProfile;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InfoPassage {
    pub subject: String,
    pub topic: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionItem {
    pub year: u16,
    pub standard: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question: String,
    pub answer: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionRecord {
    Information(InfoPassage),
    QuestionAnswer(QuestionItem),
}

impl QuestionRecord {
    pub fn subject(&self) -> &str {
        match self {
            Self::Information(p) => &p.subject,
            Self::QuestionAnswer(q) => &q.subject,
        }
    }

    pub fn as_question(&self) -> Option<&QuestionItem> {
        match self {
            Self::QuestionAnswer(q) => Some(q),
            Self::Information(_) => None,
        }
    }
}

fn info(subject: &str, topic: &str, content: &str) -> QuestionRecord {
    QuestionRecord::Information(InfoPassage {
        subject: subject.to_string(),
        topic: topic.to_string(),
        content: content.to_string(),
    })
}

fn qa(
    year: u16,
    standard: &str,
    subject: &str,
    topic: &str,
    difficulty: Difficulty,
    question: &str,
    answer: &str,
) -> QuestionRecord {
    QuestionRecord::QuestionAnswer(QuestionItem {
        year,
        standard: standard.to_string(),
        subject: subject.to_string(),
        topic: topic.to_string(),
        difficulty,
        question: question.to_string(),
        answer: answer.to_string(),
    })
}

static RECORDS: Lazy<Vec<QuestionRecord>> = Lazy::new(|| {
    use Difficulty::*;
    vec![
        info(
            "Physics",
            "Modern Physics",
            "Modern physics refers to the developments in physics from the early 20th century onwards. It departs from classical physics, which describes phenomena at an everyday scale. The two main pillars of modern physics are quantum mechanics and relativity. Quantum mechanics deals with the behavior of matter and energy at the atomic and subatomic levels, introducing concepts like quantization and wave-particle duality. Einstein's theory of relativity revolutionized our understanding of space, time, and gravity.",
        ),
        info(
            "Biology",
            "Core Concepts",
            "High school biology introduces foundational principles of life sciences. Key concepts include cell structure and function, genetics and heredity, evolution by natural selection, and the study of ecosystems which examines the flow of matter and energy between living systems and their environment. Students also explore human physiology, understanding the functions of various body systems. The curriculum emphasizes critical thinking and making sense of the natural world.",
        ),
        qa(
            2018,
            "10th Grade",
            "Science",
            "Chemical Reactions",
            Easy,
            "What change in color is observed when white silver chloride is left exposed to sunlight and what type of chemical reaction is this?",
            "The white silver chloride turns grey. This is a photochemical decomposition reaction.",
        ),
        qa(
            2018,
            "University",
            "Computer Science",
            "Boolean Algebra",
            Medium,
            "Given the Boolean function F(A, B, C, D) = Σ(0, 2, 4, 8, 9, 10, 12, 13), use a Karnaugh map to find the simplified SOP expression.",
            "The simplified Sum of Products (SOP) expression is F(A, B, C, D) = C'D' + A'D' + AB'C'.",
        ),
        qa(
            2019,
            "10th Grade",
            "Science",
            "Heredity and Evolution",
            Medium,
            "A cross between a tall pea plant (TT) and a short pea plant (tt) resulted in progeny that were all tall. What would be the ratio of tall to short plants in the F2 generation if the F1 plants are self-pollinated?",
            "The ratio of tall to short plants in the F2 generation would be 3:1.",
        ),
        qa(
            2019,
            "12th Grade",
            "Physics",
            "Electrostatics",
            Hard,
            "Three capacitors of capacitances 2 pF, 3 pF and 4 pF are connected in parallel. (a) What is the total capacitance of the combination? (b) Determine the charge on each capacitor if the combination is connected to a 100 V supply.",
            "(a) The total capacitance is 9 pF. (b) The charge on the 2 pF capacitor is 200 pC, on the 3 pF capacitor is 300 pC, and on the 4 pF capacitor is 400 pC.",
        ),
        qa(
            2020,
            "10th Grade",
            "Science",
            "Metals and Non-metals",
            Easy,
            "Why is sodium kept immersed in kerosene oil?",
            "Sodium is a highly reactive metal that reacts vigorously with oxygen and moisture in the air. It is kept immersed in kerosene oil to prevent it from coming into contact with air and catching fire.",
        ),
        qa(
            2020,
            "University Entrance (JEE Main)",
            "Chemistry",
            "Chemical Kinetics",
            Hard,
            "The rate of a reaction doubles when its temperature changes from 300K to 310K. The activation energy of such a reaction will be: (R = 8.314 J K⁻¹ mol⁻¹ and log 2 = 0.301)",
            "The activation energy is 53.6 kJ/mol.",
        ),
        qa(
            2021,
            "12th Grade",
            "Mathematics",
            "Probability",
            Medium,
            "Two cards are drawn successively with replacement from a well-shuffled deck of 52 cards. Find the probability distribution of the number of aces.",
            "Let X be the number of aces. P(X=0) = (48/52) * (48/52) = 144/169. P(X=1) = 2 * (4/52) * (48/52) = 24/169. P(X=2) = (4/52) * (4/52) = 1/169.",
        ),
        qa(
            2021,
            "University",
            "Computer Science",
            "Algorithms",
            Hard,
            "What is the time complexity of the Heap Sort algorithm in the worst-case scenario, and is it a stable sort?",
            "The time complexity of Heap Sort in the worst-case scenario is O(n log n). It is not a stable sort because the order of equal elements may not be preserved.",
        ),
        qa(
            2022,
            "10th Grade",
            "Science",
            "Life Processes",
            Easy,
            "What is the role of acid in our stomach?",
            "The hydrochloric acid in our stomach creates an acidic medium which facilitates the action of the enzyme pepsin for digesting proteins. It also kills any germs that may enter the system along with the food.",
        ),
        qa(
            2022,
            "12th Grade",
            "Physics",
            "Semiconductors",
            Medium,
            "Explain the formation of a depletion region and a potential barrier in a p-n junction diode.",
            "In a p-n junction, electrons from the n-side diffuse to the p-side and holes from the p-side diffuse to the n-side. This diffusion creates a layer of immobile positive ions on the n-side and immobile negative ions on the p-side near the junction. This layer, devoid of free charge carriers, is called the depletion region. The potential difference developed across this depletion region, which opposes further diffusion, is called the potential barrier.",
        ),
        qa(
            2022,
            "University Entrance (JEE Main)",
            "Mathematics",
            "Calculus",
            Hard,
            "If the line y = mx + c is a tangent to the circle x² + y² = a², what is the value of c?",
            "The condition for tangency is that the perpendicular distance from the center (0,0) to the line is equal to the radius 'a'. This gives the value of c as c = ±a√(1+m²).",
        ),
        qa(
            2023,
            "University",
            "Computer Science Engineering",
            "Operating Systems",
            Medium,
            "Explain the difference between a process and a thread. Why are threads considered lightweight?",
            "A process is an independent program in execution with its own address space, while a thread is a lightweight unit of execution within a process that shares the process's address space. Threads are considered lightweight because creating and switching between threads requires fewer resources than processes due to shared memory and OS structures.",
        ),
        qa(
            2022,
            "University",
            "Mechanical Engineering",
            "Thermodynamics",
            Medium,
            "State the Second Law of Thermodynamics and explain the concept of entropy with an example.",
            "The Second Law states that the total entropy of an isolated system can never decrease over time. Entropy measures disorder; for example, heat flows spontaneously from a hot body to a cold one, increasing total entropy, and the reverse process requires external work.",
        ),
        qa(
            2021,
            "University",
            "Electrical Engineering",
            "Circuit Theory",
            Easy,
            "For a series RC circuit with R=1kΩ and C=100µF connected to a 10V DC source, what is the time constant and the capacitor voltage at t=τ?",
            "Time constant τ = RC = 1kΩ × 100µF = 0.1 s. The capacitor voltage at t=τ is Vc = V(1 − e^{-1}) ≈ 10 × 0.632 = 6.32 V.",
        ),
        qa(
            2020,
            "University",
            "Civil Engineering",
            "Strength of Materials",
            Medium,
            "Define stress and strain. A steel rod of length 2 m and cross-sectional area 100 mm² is subjected to a tensile force of 20 kN. Find the stress and strain (E = 200 GPa).",
            "Stress = Force/Area = 20,000 N / (100 × 10^{-6} m²) = 200 MPa. Strain = Stress/E = 200 MPa / 200 GPa = 0.001.",
        ),
    ]
});

pub fn all_records() -> &'static [QuestionRecord] {
    &RECORDS
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionCriteria {
    pub subject: Option<String>,
    pub standard: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub year: Option<u16>,
}

impl QuestionCriteria {
    /// Pre-selects the signed-in student's standard.
    pub fn for_profile(profile: Option<&UserProfile>) -> Self {
        Self {
            standard: profile
                .map(|p| p.standard.clone())
                .filter(|s| !s.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Criteria<QuestionRecord> for QuestionCriteria {
    /// Information passages never match; they are shown separately.
    fn matches(&self, record: &QuestionRecord) -> bool {
        let Some(q) = record.as_question() else {
            return false;
        };

        if let Some(subject) = active(&self.subject) {
            if q.subject != subject {
                return false;
            }
        }
        if let Some(standard) = active(&self.standard) {
            if q.standard != standard {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if q.difficulty != difficulty {
                return false;
            }
        }
        if let Some(year) = self.year {
            if q.year != year {
                return false;
            }
        }
        true
    }
}

pub fn filter_questions(criteria: &QuestionCriteria) -> Vec<&'static QuestionItem> {
    catalog::filter(all_records(), criteria)
        .into_iter()
        .filter_map(QuestionRecord::as_question)
        .collect()
}

pub fn info_passages() -> Vec<&'static InfoPassage> {
    RECORDS
        .iter()
        .filter_map(|r| match r {
            QuestionRecord::Information(p) => Some(p),
            QuestionRecord::QuestionAnswer(_) => None,
        })
        .collect()
}

pub fn question_subjects() -> Vec<String> {
    catalog::facet(RECORDS.iter().map(QuestionRecord::subject))
}

pub fn question_standards() -> Vec<String> {
    catalog::facet(
        RECORDS
            .iter()
            .filter_map(QuestionRecord::as_question)
            .map(|q| q.standard.as_str()),
    )
}

/// Distinct years, newest first.
pub fn question_years() -> Vec<u16> {
    let mut years: Vec<u16> = RECORDS
        .iter()
        .filter_map(QuestionRecord::as_question)
        .map(|q| q.year)
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionStats {
    pub count: usize,
    /// Share of easy questions, rounded to a whole percent.
    pub easy_percent: u32,
    pub topics: usize,
}

pub fn question_stats(questions: &[&QuestionItem]) -> Option<QuestionStats> {
    if questions.is_empty() {
        return None;
    }

    let easy = questions
        .iter()
        .filter(|q| q.difficulty == Difficulty::Easy)
        .count();
    let topics: HashSet<&str> = questions.iter().map(|q| q.topic.as_str()).collect();

    Some(QuestionStats {
        count: questions.len(),
        easy_percent: (easy as f64 / questions.len() as f64 * 100.0).round() as u32,
        topics: topics.len(),
    })
}

/// Indices (into the current filtered list) whose answers are shown.
#[derive(Debug, Clone, Default)]
pub struct RevealedAnswers {
    shown: HashSet<usize>,
}

impl RevealedAnswers {
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.shown.remove(&index) {
            self.shown.insert(index);
            return true;
        }
        false
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.shown.contains(&index)
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}
