use clap::Parser;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc;

use chanakya::chat::{ChatSession, QUICK_QUESTIONS};
use chanakya::flashcards::{self, FlashcardCriteria, FlashcardDeck};
use chanakya::mentors::{self, ConnectionKind, MentorCriteria};
use chanakya::profile::{
    demo_profile, toggle, ProfileForm, ProfileStore, AVAILABLE_SUBJECTS, LEARNING_GOAL_OPTIONS,
    STANDARDS,
};
use chanakya::question_bank::{self, Difficulty, QuestionCriteria, RevealedAnswers};
use chanakya::quiz::{OptionKey, Quiz, QuizStep};
use chanakya::routes::Route;
use chanakya::settings::{default_base_path, prepare_data_dir, save_settings, Settings};
use chanakya::storage::FileStore;
use chanakya::summary::{SummaryEvent, SummaryGenerator, SAMPLE_TEXT};
use chanakya::views;
use chanakya::StudyError;

#[derive(Parser, Debug)]
#[command(
    name = "chanakya",
    version,
    about = "Chanakya study assistant (local-first, offline)"
)]
struct CliArgs {
    /// Data folder holding config/ and storage/ (defaults to ./data next to the binary)
    #[arg(long)]
    base_path: Option<PathBuf>,
    /// Render one view (e.g. /mentors) and exit instead of starting the shell
    #[arg(long)]
    path: Option<String>,
}

/// Words the shell answers itself before a view sees the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellCommand {
    Exit,
    Help,
    Logout,
}

/// On the tutor view every line is a question for the tutor, so nothing is
/// reserved there; leave it with a `/path` first.
fn shell_command(route: Route, line: &str) -> Option<ShellCommand> {
    if route == Route::AiTutor {
        return None;
    }
    match line.to_ascii_lowercase().as_str() {
        "exit" => Some(ShellCommand::Exit),
        "help" => Some(ShellCommand::Help),
        "logout" => Some(ShellCommand::Logout),
        _ => None,
    }
}

/// Terminal lines, read on their own thread so the shell can wait on input
/// and on tutor/summary timers at the same time.
struct Input {
    lines: mpsc::UnboundedReceiver<String>,
}

impl Input {
    fn from_stdin() -> Self {
        let (tx, lines) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("stopped reading terminal input: {e}");
                        break;
                    }
                }
            }
        });
        Self { lines }
    }

    /// `None` once the terminal is closed.
    async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }
}

/// Per-view state for one run of the shell. Nothing here outlives the
/// process except the profile, which lives in `store`.
struct App {
    store: ProfileStore<FileStore>,
    route: Route,
    mentor_criteria: MentorCriteria,
    question_criteria: QuestionCriteria,
    revealed: RevealedAnswers,
    deck: FlashcardDeck,
    quiz: Quiz,
    chat: ChatSession,
    seen_messages: HashSet<u64>,
    summarizer: SummaryGenerator,
    summary_input: String,
    summary_job: Option<mpsc::UnboundedReceiver<SummaryEvent>>,
}

impl App {
    fn new(base_path: &Path, settings: &Settings) -> Self {
        let store = ProfileStore::load(FileStore::in_base(base_path));
        let mentor_criteria = MentorCriteria::for_profile(store.user());
        let question_criteria = QuestionCriteria::for_profile(store.user());
        Self {
            store,
            route: Route::Home,
            mentor_criteria,
            question_criteria,
            revealed: RevealedAnswers::default(),
            deck: FlashcardDeck::default(),
            quiz: Quiz::default(),
            chat: ChatSession::new(Duration::from_millis(
                settings.simulation.chat_reply_delay_ms,
            )),
            seen_messages: HashSet::new(),
            summarizer: SummaryGenerator::new(Duration::from_millis(
                settings.simulation.summary_tick_ms,
            )),
            summary_input: String::new(),
            summary_job: None,
        }
    }

    fn navigate(&mut self, path: &str) {
        let requested = Route::from_path(path);
        if requested == Route::NotFound {
            print!("{}", views::render_not_found(path));
            return;
        }
        self.route = requested.resolve(self.store.is_authenticated());
        if requested != self.route {
            println!("Please sign in first.");
        }
        self.show();
    }

    fn show(&mut self) {
        match self.route {
            Route::Home | Route::NotFound => print!("{}", views::render_home(self.store.user())),
            Route::Login => {
                println!("\nSign in to Chanakya");
                println!("  demo     use the demo student profile");
                println!("  signup   create your profile");
            }
            Route::Profile => match self.store.user() {
                Some(user) => print!("{}", views::render_profile(user)),
                None => println!("Not signed in."),
            },
            Route::Summary => {
                println!("\nSmart Summaries");
                println!("  sample            load the sample passage");
                println!("  generate [text]   summarize text (or the loaded passage)");
            }
            Route::Quiz => print!("{}", views::render_quiz(&self.quiz)),
            Route::Flashcards => print!("{}", views::render_flashcard(&self.deck)),
            Route::QuestionPapers => {
                let list = question_bank::filter_questions(&self.question_criteria);
                let stats = question_bank::question_stats(&list);
                print!(
                    "{}",
                    views::render_questions(&list, &self.revealed, stats.as_ref())
                );
            }
            Route::Mentors => {
                let list = mentors::filter_mentors(&self.mentor_criteria);
                let stats = mentors::mentor_stats(&list);
                print!("{}", views::render_mentor_table(&list, stats.as_ref()));
            }
            Route::AiTutor => {
                print!("{}", self.unseen_messages());
                println!("Try: {}", QUICK_QUESTIONS.join(" | "));
                println!("Every line here goes to the tutor; type a /path to leave.");
            }
        }
    }

    fn unseen_messages(&mut self) -> String {
        views::render_new_messages(&self.chat.messages(), &mut self.seen_messages)
    }

    fn logout(&mut self) -> Result<(), StudyError> {
        let result = self.store.logout();
        self.mentor_criteria.clear();
        self.question_criteria.clear();
        if result.is_ok() {
            println!("Signed out.");
        }
        self.route = Route::Home;
        self.show();
        result
    }

    async fn handle(&mut self, line: &str, input: &mut Input) -> Result<(), StudyError> {
        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match self.route {
            Route::Login => self.handle_login(cmd, input).await?,
            Route::Profile => self.handle_profile(cmd, input).await?,
            Route::Summary => self.handle_summary(cmd, rest),
            Route::Quiz => self.handle_quiz(cmd)?,
            Route::Flashcards => self.handle_flashcards(cmd, rest),
            Route::QuestionPapers => self.handle_questions(cmd, rest),
            Route::Mentors => self.handle_mentors(cmd, rest),
            Route::AiTutor => self.handle_chat(line),
            Route::Home | Route::NotFound => {
                println!("Type a path like /quiz, or 'help'.");
            }
        }
        Ok(())
    }

    async fn handle_login(&mut self, cmd: &str, input: &mut Input) -> Result<(), StudyError> {
        let profile = match cmd {
            "demo" => demo_profile(),
            "signup" => {
                let form = fill_form(ProfileForm::default(), input).await?;
                if !form.can_submit() {
                    println!(
                        "Cannot create profile, missing: {}",
                        form.missing_required_fields().join(", ")
                    );
                    return Ok(());
                }
                form.into_profile()?
            }
            _ => {
                println!("Unknown command.");
                return Ok(());
            }
        };

        self.mentor_criteria = MentorCriteria::for_profile(Some(&profile));
        self.question_criteria = QuestionCriteria::for_profile(Some(&profile));
        println!("Welcome, {}!", profile.first_name);
        self.store.login(profile)?;
        self.route = Route::Home;
        self.show();
        Ok(())
    }

    async fn handle_profile(&mut self, cmd: &str, input: &mut Input) -> Result<(), StudyError> {
        if cmd != "edit" {
            println!("Commands: edit, logout");
            return Ok(());
        }
        let Some(user) = self.store.user() else {
            return Ok(());
        };

        let form = fill_form(ProfileForm::from_profile(user), input).await?;
        if !form.can_submit() {
            println!(
                "Not saved, missing: {}",
                form.missing_required_fields().join(", ")
            );
            return Ok(());
        }
        self.store.update_profile(form.to_update())?;
        println!("Profile updated.");
        self.show();
        Ok(())
    }

    fn handle_summary(&mut self, cmd: &str, rest: &str) {
        match cmd {
            "sample" => {
                self.summary_input = SAMPLE_TEXT.to_string();
                println!("Loaded sample passage ({} chars).", SAMPLE_TEXT.len());
            }
            "generate" => {
                if self.summary_job.is_some() {
                    println!("Still working on the previous summary.");
                    return;
                }
                if !rest.is_empty() {
                    self.summary_input = rest.to_string();
                }
                match self.summarizer.start(&self.summary_input) {
                    Some(job) => {
                        self.summary_job = Some(job);
                        println!("Generating summary...");
                    }
                    None => println!("Paste some study material first (or type 'sample')."),
                }
            }
            _ => println!("Unknown command."),
        }
    }

    /// Returns whether the prompt needs drawing again.
    fn on_summary_event(&mut self, event: Option<SummaryEvent>) -> bool {
        match event {
            Some(SummaryEvent::Progress(p)) => {
                if self.route == Route::Summary {
                    print!("\rGenerating summary... {p}%");
                    io::stdout().flush().ok();
                }
                false
            }
            Some(SummaryEvent::Ready(text)) => {
                println!("\n\nSummary ready:\n{text}\n");
                true
            }
            None => {
                self.summary_job = None;
                false
            }
        }
    }

    fn handle_quiz(&mut self, cmd: &str) -> Result<(), StudyError> {
        if let Some(key) = OptionKey::parse(cmd) {
            self.quiz.select(key)?;
        } else {
            match cmd {
                "next" => match self.quiz.next() {
                    Ok(QuizStep::Question(_)) | Ok(QuizStep::Finished) => {}
                    Err(StudyError::NoAnswerSelected(_)) => {
                        println!("Pick an option (a-d) first.");
                        return Ok(());
                    }
                    Err(e) => return Err(e),
                },
                "again" => self.quiz.try_again(),
                _ => {
                    println!("Commands: a, b, c, d, next, again");
                    return Ok(());
                }
            }
        }
        self.show();
        Ok(())
    }

    fn handle_flashcards(&mut self, cmd: &str, rest: &str) {
        match cmd {
            "flip" => {
                self.deck.flip();
            }
            "next" => {
                self.deck.next();
            }
            "prev" => {
                self.deck.previous();
            }
            "shuffle" => self.deck.shuffle(),
            "reset" => self.deck.reset(),
            "search" => {
                let criteria = FlashcardCriteria {
                    search: Some(rest.to_string()),
                };
                let all = flashcards::sample_flashcards();
                for card in chanakya::catalog::filter(&all, &criteria) {
                    println!("  {}: {}", card.term, card.definition);
                }
                return;
            }
            _ => {
                println!("Commands: flip, next, prev, shuffle, reset, search <term>");
                return;
            }
        }
        self.show();
    }

    fn handle_questions(&mut self, cmd: &str, rest: &str) {
        let value = (!rest.is_empty()).then(|| rest.to_string());
        match cmd {
            "subject" => self.question_criteria.subject = value,
            "standard" => self.question_criteria.standard = value,
            "difficulty" => match value.as_deref().map(Difficulty::parse) {
                Some(None) => {
                    println!("Difficulty is one of: easy, medium, hard");
                    return;
                }
                parsed => self.question_criteria.difficulty = parsed.flatten(),
            },
            "year" => self.question_criteria.year = rest.parse().ok(),
            "clear" => self.question_criteria.clear(),
            "show" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => {
                    self.revealed.toggle(n - 1);
                }
                _ => {
                    println!("Usage: show <question number>");
                    return;
                }
            },
            "filters" => {
                println!("Subjects:  {}", question_bank::question_subjects().join(", "));
                println!("Standards: {}", question_bank::question_standards().join(", "));
                let years: Vec<String> = question_bank::question_years()
                    .iter()
                    .map(u16::to_string)
                    .collect();
                println!("Years:     {}", years.join(", "));
                return;
            }
            "info" => {
                for passage in question_bank::info_passages() {
                    println!("\n{} / {}\n  {}", passage.subject, passage.topic, passage.content);
                }
                return;
            }
            _ => {
                println!(
                    "Commands: subject|standard|difficulty|year <value>, clear, show <n>, filters, info"
                );
                return;
            }
        }
        if cmd != "show" {
            self.revealed.clear();
        }
        self.show();
    }

    fn handle_mentors(&mut self, cmd: &str, rest: &str) {
        let value = (!rest.is_empty()).then(|| rest.to_string());
        match cmd {
            "subject" => self.mentor_criteria.subject = value,
            "search" => self.mentor_criteria.search = value,
            "clear" => self.mentor_criteria.clear(),
            "subjects" => {
                println!("{}", mentors::mentor_subjects().join(", "));
                return;
            }
            "view" => {
                match mentors::find_mentor(rest) {
                    Some(m) => print!("{}", views::render_mentor(m)),
                    None => println!("No mentor with id {rest:?}."),
                }
                return;
            }
            "connect" => {
                let (id, kind) = rest.split_once(' ').unwrap_or((rest, ""));
                match (mentors::find_mentor(id), ConnectionKind::parse(kind)) {
                    (Some(m), Some(kind)) => {
                        print!("{}", views::render_session_request(&mentors::connect(m, kind)))
                    }
                    _ => println!("Usage: connect <mentor id> <video|voice|chat>"),
                }
                return;
            }
            _ => {
                println!("Commands: subject <name>, search <text>, clear, subjects, view <id>, connect <id> <kind>");
                return;
            }
        }
        self.show();
    }

    /// The reply lands on its own timer; the shell prints it when it does.
    fn handle_chat(&mut self, text: &str) {
        if self.chat.submit(text).is_none() {
            return;
        }
        print!("{}", self.unseen_messages());
        println!("Tutor is typing...");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let base_path = args.base_path.unwrap_or_else(default_base_path);

    let mut settings = match prepare_data_dir(&base_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("chanakya: cannot use data folder {}: {e}", base_path.display());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .init();

    let mut app = App::new(&base_path, &settings);

    if let Some(path) = args.path {
        app.navigate(&path);
        return ExitCode::SUCCESS;
    }

    println!("Chanakya data folder: {}", base_path.display());
    app.navigate(settings.ui.last_route.as_deref().unwrap_or("/"));
    let mut input = Input::from_stdin();
    run_shell(&mut app, &mut input).await;

    settings.ui.last_route = Some(app.route.path().to_string());
    if let Err(e) = save_settings(&settings, &base_path) {
        eprintln!("chanakya: last view not remembered: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// What woke the shell up.
enum Wake {
    Line(Option<String>),
    Reply,
    Summary(Option<SummaryEvent>),
}

async fn next_summary_event(
    job: &mut Option<mpsc::UnboundedReceiver<SummaryEvent>>,
) -> Option<SummaryEvent> {
    match job {
        Some(events) => events.recv().await,
        None => std::future::pending().await,
    }
}

async fn run_shell(app: &mut App, input: &mut Input) {
    println!("Type a path (/quiz, /mentors, ...) to navigate, 'help' for commands, 'exit' to quit.\n");

    let mut draw_prompt = true;
    loop {
        if draw_prompt {
            print!("{}> ", app.route.path());
            io::stdout().flush().ok();
        }
        draw_prompt = true;

        let wake = tokio::select! {
            line = input.next_line() => Wake::Line(line),
            _ = app.chat.reply_arrived() => Wake::Reply,
            event = next_summary_event(&mut app.summary_job) => Wake::Summary(event),
        };

        let line = match wake {
            Wake::Reply => {
                // replies for other views wait until the tutor is opened again
                let unseen = if app.route == Route::AiTutor {
                    app.unseen_messages()
                } else {
                    String::new()
                };
                if unseen.is_empty() {
                    draw_prompt = false;
                } else {
                    print!("\n{unseen}");
                    if app.chat.is_typing() {
                        println!("Tutor is typing...");
                    }
                }
                continue;
            }
            Wake::Summary(event) => {
                draw_prompt = app.on_summary_event(event);
                continue;
            }
            Wake::Line(None) => break,
            Wake::Line(Some(line)) => line,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('/') {
            app.navigate(line);
            continue;
        }

        match shell_command(app.route, line) {
            Some(ShellCommand::Exit) => {
                println!("Goodbye");
                break;
            }
            Some(ShellCommand::Help) => print_help(),
            Some(ShellCommand::Logout) => {
                if let Err(e) = app.logout() {
                    println!("Error: {e}");
                }
            }
            None => {
                if let Err(e) = app.handle(line, input).await {
                    println!("Error: {e}");
                }
            }
        }
    }
}

fn print_help() {
    println!("\nPaths:");
    for route in Route::ALL {
        println!("  {}", route.path());
    }
    println!("Outside the tutor: logout, help, exit");
    println!("Each view lists its own commands when you type something it doesn't know.\n");
}

async fn prompt(input: &mut Input, field: &str, default_val: &str) -> io::Result<String> {
    print!("{} [{}]: ", field, default_val);
    io::stdout().flush()?;
    let line = input
        .next_line()
        .await
        .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(default_val.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Comma-separated names are toggled in or out of `list`; unknown names are
/// skipped.
async fn prompt_toggles(
    input: &mut Input,
    field: &str,
    options: &[&str],
    list: &mut Vec<String>,
) -> io::Result<()> {
    println!("{field} options: {}", options.join(", "));
    let answer = prompt(input, &format!("Toggle {field} (comma-separated)"), "").await?;
    for name in answer.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match options.iter().find(|o| o.eq_ignore_ascii_case(name)) {
            Some(option) => toggle(list, option),
            None => println!("  skipping unknown {field} {name:?}"),
        }
    }
    Ok(())
}

async fn fill_form(mut form: ProfileForm, input: &mut Input) -> io::Result<ProfileForm> {
    println!("Leave blank to keep the value in brackets. * marks required fields.");
    form.first_name = prompt(input, "First name*", &form.first_name).await?;
    form.last_name = prompt(input, "Last name", &form.last_name).await?;
    form.email = prompt(input, "Email*", &form.email).await?;
    form.phone = prompt(input, "Phone", &form.phone).await?;
    form.date_of_birth = prompt(input, "Date of birth (YYYY-MM-DD)", &form.date_of_birth).await?;
    println!("Standards: {}", STANDARDS.join(", "));
    form.standard = prompt(input, "Standard*", &form.standard).await?;
    form.school = prompt(input, "School", &form.school).await?;
    form.city = prompt(input, "City", &form.city).await?;
    form.parent_email = prompt(input, "Parent email", &form.parent_email).await?;
    form.parent_phone = prompt(input, "Parent phone", &form.parent_phone).await?;
    prompt_toggles(input, "subjects", AVAILABLE_SUBJECTS, &mut form.subjects).await?;
    prompt_toggles(input, "goals", LEARNING_GOAL_OPTIONS, &mut form.learning_goals).await?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutor_view_takes_every_word_as_a_question() {
        for word in ["logout", "help", "exit", "Logout"] {
            assert_eq!(shell_command(Route::AiTutor, word), None, "{word}");
        }
    }

    #[test]
    fn shell_words_apply_on_other_views() {
        assert_eq!(shell_command(Route::Home, "logout"), Some(ShellCommand::Logout));
        assert_eq!(shell_command(Route::Quiz, "EXIT"), Some(ShellCommand::Exit));
        assert_eq!(shell_command(Route::Mentors, "help"), Some(ShellCommand::Help));
        assert_eq!(shell_command(Route::Quiz, "next"), None);
    }
}
