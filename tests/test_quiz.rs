//! Tests for [`chanakya::quiz`]

use chanakya::quiz::{sample_quiz, OptionKey, Quiz, QuizStep};
use chanakya::StudyError;

fn answer_all(quiz: &mut Quiz, keys: &[OptionKey]) {
    for key in keys {
        quiz.select(*key).unwrap();
        quiz.next().unwrap();
    }
}

/// Test 1: the sample quiz has three questions with known answers.
#[test]
fn test_sample_quiz() {
    let questions = sample_quiz();
    assert_eq!(questions.len(), 3);
    let correct: Vec<OptionKey> = questions.iter().map(|q| q.correct).collect();
    assert_eq!(correct, vec![OptionKey::B, OptionKey::C, OptionKey::A]);
}

/// Test 2: next is refused until an option is selected.
#[test]
fn test_next_requires_selection() {
    let mut quiz = Quiz::default();
    match quiz.next() {
        Err(StudyError::NoAnswerSelected(0)) => {}
        other => panic!("expected NoAnswerSelected(0), got {other:?}"),
    }
    assert_eq!(quiz.position(), 0);
}

/// Test 3: the selection can change before moving on and is cleared after.
#[test]
fn test_selection_changes() {
    let mut quiz = Quiz::default();
    quiz.select(OptionKey::A).unwrap();
    quiz.select(OptionKey::B).unwrap();
    assert_eq!(quiz.next().unwrap(), QuizStep::Question(1));
    assert_eq!(quiz.answer(0), Some(OptionKey::B));
    assert_eq!(quiz.selected(), None);
}

/// Test 4: a perfect run.
#[test]
fn test_perfect_score() {
    let mut quiz = Quiz::default();
    answer_all(&mut quiz, &[OptionKey::B, OptionKey::C, OptionKey::A]);
    assert!(quiz.is_finished());
    assert!(quiz.current().is_none());

    let results = quiz.results().unwrap();
    assert_eq!(results.score, 3);
    assert_eq!(results.percentage, 100);
    assert_eq!(results.verdict(), "Excellent!");
}

/// Test 5: score equals the number of matching answers and is stable.
#[test]
fn test_score_counts_matches() {
    let mut quiz = Quiz::default();
    answer_all(&mut quiz, &[OptionKey::B, OptionKey::A, OptionKey::A]);

    let expected = quiz
        .questions()
        .iter()
        .enumerate()
        .filter(|(i, q)| quiz.answer(*i) == Some(q.correct))
        .count();
    assert_eq!(quiz.score(), expected);
    assert_eq!(quiz.score(), 2);
    assert_eq!(quiz.score(), quiz.score());

    let results = quiz.results().unwrap();
    assert_eq!(results.percentage, 67);
    assert_eq!(results.verdict(), "Good Job!");
}

/// Test 6: verdict thresholds.
#[test]
fn test_verdicts() {
    let mut quiz = Quiz::default();
    answer_all(&mut quiz, &[OptionKey::B, OptionKey::A, OptionKey::B]);
    let results = quiz.results().unwrap();
    assert_eq!(results.percentage, 33);
    assert_eq!(results.verdict(), "Keep Practicing!");

    quiz.try_again();
    answer_all(&mut quiz, &[OptionKey::D, OptionKey::D, OptionKey::D]);
    assert_eq!(quiz.results().unwrap().verdict(), "Keep Practicing!");
}

/// Test 7: no results before the end; nothing accepted after it.
#[test]
fn test_finished_state() {
    let mut quiz = Quiz::default();
    assert!(quiz.results().is_none());
    answer_all(&mut quiz, &[OptionKey::A, OptionKey::A, OptionKey::A]);
    assert!(matches!(quiz.select(OptionKey::A), Err(StudyError::QuizFinished)));
    assert!(matches!(quiz.next(), Err(StudyError::QuizFinished)));
}

/// Test 8: try again clears answers and returns to the first question.
#[test]
fn test_try_again() {
    let mut quiz = Quiz::default();
    answer_all(&mut quiz, &[OptionKey::B, OptionKey::C, OptionKey::A]);
    quiz.try_again();
    assert!(!quiz.is_finished());
    assert_eq!(quiz.position(), 0);
    assert_eq!(quiz.score(), 0);
    assert_eq!(quiz.answer(0), None);
}

/// Test 9: progress counts the current question as reached.
#[test]
fn test_progress() {
    let mut quiz = Quiz::default();
    assert!((quiz.progress_percent() - 100.0 / 3.0).abs() < 1e-3);
    answer_all(&mut quiz, &[OptionKey::B]);
    assert!((quiz.progress_percent() - 200.0 / 3.0).abs() < 1e-3);
}

/// Test 10: an empty quiz cannot advance.
#[test]
fn test_empty_quiz() {
    let mut quiz = Quiz::new(Vec::new());
    assert!(quiz.current().is_none());
    assert_eq!(quiz.progress_percent(), 0.0);
    assert!(matches!(quiz.next(), Err(StudyError::QuizFinished)));
}

/// Test 11: option keys parse case-insensitively.
#[test]
fn test_option_key_parse() {
    assert_eq!(OptionKey::parse("c"), Some(OptionKey::C));
    assert_eq!(OptionKey::parse(" D "), Some(OptionKey::D));
    assert_eq!(OptionKey::parse("e"), None);
}
