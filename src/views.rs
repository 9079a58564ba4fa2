//! Plain-text renderers for each view. Pure string building; the REPL in
//! `main.rs` decides when to print them.

use std::collections::HashSet;

use crate::chat::{ChatMessage, Sender};
use crate::flashcards::{Face, FlashcardDeck};
use crate::mentors::{Mentor, MentorStats, SessionRequest};
use crate::profile::UserProfile;
use crate::question_bank::{QuestionItem, QuestionStats, RevealedAnswers};
use crate::quiz::{OptionKey, Quiz};
use crate::routes::{Route, FEATURES};

pub fn truncate_for_table(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= max_len {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

fn progress_bar(percent: f32, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f32).round() as usize;
    format!("[{}{}] {:.0}%", "#".repeat(filled), "-".repeat(width - filled), percent)
}

pub fn render_home(profile: Option<&UserProfile>) -> String {
    let mut out = String::new();
    match profile {
        Some(p) => out.push_str(&format!("\nWelcome back, {}! ({})\n", p.first_name, p.standard)),
        None => out.push_str("\nWelcome to Chanakya. Type /login to get started.\n"),
    }
    out.push('\n');
    for feature in FEATURES {
        out.push_str(&format!(
            "  {:<20} {:<17} {}\n",
            feature.title,
            feature.route.path(),
            feature.description
        ));
    }
    out
}

pub fn render_not_found(path: &str) -> String {
    format!(
        "\n404: nothing lives at {path:?}. Type {} to go home.\n",
        Route::Home.path()
    )
}

pub fn render_profile(p: &UserProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n[{}] {}\n", p.initials(), p.full_name()));
    out.push_str(&format!("  Email:        {}\n", p.email));
    out.push_str(&format!("  Phone:        {}\n", p.phone));
    out.push_str(&format!("  Born:         {}\n", p.date_of_birth));
    out.push_str(&format!("  Standard:     {}\n", p.standard));
    out.push_str(&format!("  School:       {}\n", p.school));
    out.push_str(&format!("  City:         {}\n", p.city));
    if let Some(e) = &p.parent_email {
        out.push_str(&format!("  Parent email: {e}\n"));
    }
    if let Some(ph) = &p.parent_phone {
        out.push_str(&format!("  Parent phone: {ph}\n"));
    }
    out.push_str(&format!("  Subjects:     {}\n", p.subjects.join(", ")));
    out.push_str(&format!("  Goals:        {}\n", p.learning_goals.join(", ")));
    out.push_str(&format!(
        "  Member since: {}\n",
        p.created_at.format("%Y-%m-%d")
    ));
    out
}

pub fn render_mentor_table(mentors: &[&Mentor], stats: Option<&MentorStats>) -> String {
    if mentors.is_empty() {
        return "\nNo mentors found. Try adjusting your filters to find more mentors.\n"
            .to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("\n{} mentors available\n", mentors.len()));
    out.push_str(&format!(
        "{:<3} | {:<20} | {:<6} | {:<8} | {:<6} | {}\n",
        "ID", "Mentor", "Rating", "Rate/hr", "Tier", "Subjects"
    ));
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for m in mentors {
        let rate = if m.is_free_trial() {
            "Free".to_string()
        } else {
            format!("₹{}", m.hourly_rate)
        };
        out.push_str(&format!(
            "{:<3} | {:<20} | {:<6.1} | {:<8} | {:<6} | {}\n",
            m.id,
            truncate_for_table(&m.name, 20),
            m.rating,
            rate,
            m.tier,
            truncate_for_table(&m.subjects.join(", "), 30),
        ));
    }

    if let Some(s) = stats {
        out.push_str(&format!(
            "\n{} expert mentors | avg rating {:.1} | {} total sessions | {} subjects covered\n",
            s.count, s.average_rating, s.total_sessions, s.subjects_covered
        ));
    }
    out
}

pub fn render_mentor(m: &Mentor) -> String {
    let mut out = String::new();
    let badge = if m.verified { " (verified)" } else { "" };
    out.push_str(&format!("\n{}{badge}\n{}\n", m.name, m.title));
    out.push_str(&format!("  {}\n", m.description));
    out.push_str(&format!(
        "  Rating {:.1} over {} sessions, {} experience\n",
        m.rating, m.total_sessions, m.experience
    ));
    out.push_str(&format!("  {}: {}\n", m.tier, m.tier_description));
    out.push_str(&format!("  Languages:       {}\n", m.languages.join(", ")));
    out.push_str(&format!("  Specializations: {}\n", m.specializations.join(", ")));
    out.push_str(&format!("  Availability:    {}\n", m.availability));
    out
}

pub fn render_session_request(req: &SessionRequest<'_>) -> String {
    format!(
        "\nConnect via {}\nStarting {} session with {}\n  Session rate:       ₹{}/hour\n  Estimated duration: {} minutes\n  {}\n",
        req.kind.title(),
        req.kind.as_str(),
        req.mentor.name,
        req.hourly_rate,
        req.estimated_minutes,
        req.kind.hint(),
    )
}

pub fn render_questions(
    questions: &[&QuestionItem],
    revealed: &RevealedAnswers,
    stats: Option<&QuestionStats>,
) -> String {
    if questions.is_empty() {
        return "\nNo questions match these filters.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("\n{} questions found\n", questions.len()));
    for (i, q) in questions.iter().enumerate() {
        out.push_str(&format!(
            "\n#{} [{} | {} | {} | {} | {}]\n  Q: {}\n",
            i + 1,
            q.year,
            q.standard,
            q.subject,
            q.topic,
            q.difficulty,
            q.question
        ));
        if revealed.is_revealed(i) {
            out.push_str(&format!("  A: {}\n", q.answer));
        }
    }

    if let Some(s) = stats {
        out.push_str(&format!(
            "\n{} questions available | {}% easy questions | {} different topics\n",
            s.count, s.easy_percent, s.topics
        ));
    }
    out
}

pub fn render_flashcard(deck: &FlashcardDeck) -> String {
    let Some(card) = deck.current() else {
        return "\nThis deck is empty.\n".to_string();
    };

    let side = match deck.face() {
        Face::Front => format!("TERM: {}", card.term),
        Face::Back => format!("DEFINITION: {}", card.definition),
    };
    format!(
        "\nCard {} of {} | studied {}/{}\n  {}\n  {side}\n",
        deck.position() + 1,
        deck.len(),
        deck.studied_count(),
        deck.len(),
        progress_bar(deck.progress_percent(), 20),
    )
}

pub fn render_quiz(quiz: &Quiz) -> String {
    if let Some(results) = quiz.results() {
        let mut out = format!(
            "\nQuiz Complete! {}%  {}\nYou scored {} out of {} questions correctly\n",
            results.percentage,
            results.verdict(),
            results.score,
            results.total
        );
        for (i, q) in quiz.questions().iter().enumerate() {
            let given = quiz.answer(i);
            let mark = if given == Some(q.correct) { "✓" } else { "✗" };
            let given = given.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  {mark} {}. {} (yours: {given}, correct: {})\n",
                i + 1,
                q.question,
                q.correct
            ));
        }
        return out;
    }

    let Some(q) = quiz.current() else {
        return "\nThis quiz has no questions.\n".to_string();
    };
    let mut out = format!(
        "\nQuestion {} of {}  {}\n  {}\n",
        quiz.position() + 1,
        quiz.questions().len(),
        progress_bar(quiz.progress_percent(), 20),
        q.question
    );
    for key in OptionKey::ALL {
        let marker = if quiz.selected() == Some(key) { ">" } else { " " };
        out.push_str(&format!("  {marker} {key}) {}\n", q.option(key)));
    }
    out
}

/// Renders only messages whose ids are not in `seen`, and records them.
pub fn render_new_messages(messages: &[ChatMessage], seen: &mut HashSet<u64>) -> String {
    let mut out = String::new();
    for m in messages {
        if !seen.insert(m.id) {
            continue;
        }
        let who = match m.sender {
            Sender::User => "You",
            Sender::Assistant => "Tutor",
        };
        out.push_str(&format!(
            "[{}] {who}: {}\n",
            m.timestamp.format("%H:%M:%S"),
            m.text
        ));
    }
    out
}
