//! Named views reachable by path, plus the home page feature cards.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Summary,
    Quiz,
    Flashcards,
    QuestionPapers,
    Mentors,
    AiTutor,
    Login,
    Profile,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Summary,
        Route::Quiz,
        Route::Flashcards,
        Route::QuestionPapers,
        Route::Mentors,
        Route::AiTutor,
        Route::Login,
        Route::Profile,
    ];

    /// Anything that is not a known path resolves to `NotFound`. A trailing
    /// slash and a query string are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "/" => Route::Home,
            "/summary" => Route::Summary,
            "/quiz" => Route::Quiz,
            "/flashcards" => Route::Flashcards,
            "/question-papers" => Route::QuestionPapers,
            "/mentors" => Route::Mentors,
            "/ai-tutor" => Route::AiTutor,
            "/login" => Route::Login,
            "/profile" => Route::Profile,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Summary => "/summary",
            Route::Quiz => "/quiz",
            Route::Flashcards => "/flashcards",
            Route::QuestionPapers => "/question-papers",
            Route::Mentors => "/mentors",
            Route::AiTutor => "/ai-tutor",
            Route::Login => "/login",
            Route::Profile => "/profile",
            Route::NotFound => "*",
        }
    }

    pub fn requires_profile(self) -> bool {
        matches!(self, Route::Profile)
    }

    /// Where navigation actually lands given whether someone is signed in.
    pub fn resolve(self, authenticated: bool) -> Route {
        if self.requires_profile() && !authenticated {
            Route::Login
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Smart Summaries",
        description: "Generate concise, easy-to-understand summaries from any study material",
        route: Route::Summary,
    },
    Feature {
        title: "Interactive Quizzes",
        description: "AI-generated multiple choice quizzes to test your understanding",
        route: Route::Quiz,
    },
    Feature {
        title: "Digital Flashcards",
        description: "Key terms and definitions extracted and formatted for optimal learning",
        route: Route::Flashcards,
    },
    Feature {
        title: "Question Papers",
        description: "Browse thousands of exam questions organized by subject, class, and difficulty",
        route: Route::QuestionPapers,
    },
    Feature {
        title: "Expert Mentors",
        description: "Connect with experienced mentors via video, voice, or chat to solve your doubts",
        route: Route::Mentors,
    },
    Feature {
        title: "AI Tutor",
        description: "Get instant answers to questions based on your uploaded study material",
        route: Route::AiTutor,
    },
];
