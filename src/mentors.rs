//! Mentor directory: the fixed roster, its filters and summary stats.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::catalog::{self, active, contains_ignore_case, Criteria};
use crate::profile::UserProfile;

/// Minutes quoted for every mentor session.
pub const SESSION_MINUTES: u32 = 60;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    #[serde(rename = "Tier 1")]
    One,
    #[serde(rename = "Tier 2")]
    Two,
    #[serde(rename = "Tier 3")]
    Three,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::One => "Tier 1",
            Tier::Two => "Tier 2",
            Tier::Three => "Tier 3",
        };
        f.pad(label)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub subjects: Vec<String>,
    pub rating: f32,
    pub total_sessions: u32,
    pub experience: String,
    pub languages: Vec<String>,
    /// Rupees per hour; zero for the free trial tier.
    pub hourly_rate: u32,
    pub tier: Tier,
    pub tier_description: String,
    pub profile_image: String,
    pub description: String,
    pub specializations: Vec<String>,
    pub availability: String,
    pub verified: bool,
}

impl Mentor {
    pub fn is_free_trial(&self) -> bool {
        self.hourly_rate == 0
    }
}

struct MentorSeed {
    name: &'static str,
    title: &'static str,
    subjects: &'static [&'static str],
    rating: f32,
    total_sessions: u32,
    experience: &'static str,
    languages: &'static [&'static str],
    hourly_rate: u32,
    tier: Tier,
    tier_description: &'static str,
    profile_image: &'static str,
    description: &'static str,
    specializations: &'static [&'static str],
    availability: &'static str,
}

const PHOTO_A: &str =
    "https://images.unsplash.com/photo-1494790108755-2616b612b5c5?w=150&h=150&fit=crop&crop=face";
const PHOTO_B: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face";
const PHOTO_C: &str =
    "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=150&h=150&fit=crop&crop=face";
const PHOTO_D: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face";
const PHOTO_E: &str =
    "https://images.unsplash.com/photo-1580489944761-15a19d654956?w=150&h=150&fit=crop&crop=face";

const SEEDS: &[MentorSeed] = &[
    MentorSeed {
        name: "Dr. Priya Sharma",
        title: "Mathematics Professor",
        subjects: &["Mathematics", "Statistics", "Calculus"],
        rating: 4.9,
        total_sessions: 1250,
        experience: "8 years",
        languages: &["English", "Hindi"],
        hourly_rate: 800,
        tier: Tier::Two,
        tier_description: "Weekly sessions - ₹3,200/week",
        profile_image: PHOTO_A,
        description: "IIT Delhi alumna passionate about making complex mathematical concepts simple. Specialized in helping students overcome math anxiety with traditional Indian methods.",
        specializations: &["Algebra", "Geometry", "Trigonometry", "JEE Math"],
        availability: "Mon-Fri 9AM-6PM",
    },
    MentorSeed {
        name: "Prof. Rajesh Gupta",
        title: "Physics Expert",
        subjects: &["Physics", "Chemistry", "Engineering"],
        rating: 4.8,
        total_sessions: 980,
        experience: "12 years",
        languages: &["English", "Hindi", "Bengali"],
        hourly_rate: 1200,
        tier: Tier::One,
        tier_description: "Permanent mentorship - ₹15,000/month",
        profile_image: PHOTO_B,
        description: "Former ISRO scientist with a passion for teaching. Helps students understand physics through real-world applications and ancient Indian scientific principles.",
        specializations: &["Quantum Physics", "Mechanics", "Thermodynamics", "JEE Physics"],
        availability: "Tue-Sat 2PM-9PM",
    },
    MentorSeed {
        name: "Dr. Sneha Patel",
        title: "Biology Specialist",
        subjects: &["Biology", "Chemistry", "Environmental Science"],
        rating: 4.9,
        total_sessions: 1100,
        experience: "6 years",
        languages: &["English", "Hindi", "Gujarati"],
        hourly_rate: 700,
        tier: Tier::Two,
        tier_description: "Bi-weekly sessions - ₹2,800/2 weeks",
        profile_image: PHOTO_C,
        description: "AIIMS graduate specializing in life sciences. Makes biology fascinating by connecting it to everyday life and Ayurvedic principles.",
        specializations: &["Cell Biology", "Genetics", "Anatomy", "NEET Prep"],
        availability: "Mon-Thu 4PM-10PM",
    },
    MentorSeed {
        name: "Arjun Singh",
        title: "Computer Science Expert",
        subjects: &["Computer Science", "Programming", "Mathematics"],
        rating: 4.7,
        total_sessions: 850,
        experience: "10 years",
        languages: &["English", "Hindi"],
        hourly_rate: 1000,
        tier: Tier::One,
        tier_description: "Permanent coding mentorship - ₹18,000/month",
        profile_image: PHOTO_D,
        description: "Senior software engineer at top Indian tech companies. Helps students master programming and prepare for technical interviews with industry insights.",
        specializations: &["Python", "JavaScript", "Data Structures", "System Design"],
        availability: "Weekends 10AM-8PM",
    },
    MentorSeed {
        name: "Dr. Meera Nair",
        title: "Chemistry Professor",
        subjects: &["Chemistry", "Biochemistry", "Organic Chemistry"],
        rating: 4.8,
        total_sessions: 1300,
        experience: "15 years",
        languages: &["English", "Hindi", "Tamil"],
        hourly_rate: 900,
        tier: Tier::One,
        tier_description: "Complete chemistry mastery - ₹20,000/month",
        profile_image: PHOTO_E,
        description: "IISc professor with extensive research background. Teaches chemistry through interactive experiments and connects concepts to traditional Indian knowledge.",
        specializations: &["Organic Chemistry", "Inorganic Chemistry", "Physical Chemistry", "JEE Chemistry"],
        availability: "Mon-Fri 1PM-7PM",
    },
    MentorSeed {
        name: "Kavita Sharma",
        title: "English Literature Expert",
        subjects: &["English", "Literature", "Writing"],
        rating: 4.6,
        total_sessions: 720,
        experience: "5 years",
        languages: &["English", "Hindi"],
        hourly_rate: 600,
        tier: Tier::Two,
        tier_description: "Weekly language improvement - ₹2,400/week",
        profile_image: PHOTO_E,
        description: "Published author and literature enthusiast. Helps students develop critical thinking and writing skills through engaging discussions.",
        specializations: &["Essay Writing", "Poetry Analysis", "Grammar", "CBSE English"],
        availability: "Daily 6PM-11PM",
    },
    MentorSeed {
        name: "Vikram Reddy",
        title: "Free Trial Mentor",
        subjects: &["Mathematics", "Physics", "Chemistry"],
        rating: 4.5,
        total_sessions: 500,
        experience: "4 years",
        languages: &["English", "Hindi", "Telugu"],
        hourly_rate: 0,
        tier: Tier::Three,
        tier_description: "Free 1-hour trial session",
        profile_image: PHOTO_D,
        description: "Young and energetic tutor helping students get started with their learning journey. Perfect for trying out our mentorship program.",
        specializations: &["Basic Math", "Science Fundamentals", "Study Planning"],
        availability: "Daily 5PM-8PM",
    },
    MentorSeed {
        name: "Dr. Anita Joshi",
        title: "Multi-Subject Expert",
        subjects: &["Mathematics", "Physics", "Chemistry", "Biology"],
        rating: 4.9,
        total_sessions: 2000,
        experience: "20 years",
        languages: &["English", "Hindi", "Marathi"],
        hourly_rate: 1500,
        tier: Tier::One,
        tier_description: "Premium all-subject mentorship - ₹20,000/month",
        profile_image: PHOTO_C,
        description: "Veteran educator with expertise across multiple subjects. Provides comprehensive guidance combining modern teaching with ancient Indian educational wisdom.",
        specializations: &["All Competitive Exams", "Board Exams", "Concept Building", "Career Guidance"],
        availability: "Mon-Sat 8AM-10PM",
    },
    MentorSeed {
        name: "Ravi Kumar",
        title: "Mathematics Specialist",
        subjects: &["Mathematics", "Statistics"],
        rating: 4.7,
        total_sessions: 650,
        experience: "6 years",
        languages: &["English", "Hindi", "Tamil"],
        hourly_rate: 650,
        tier: Tier::Two,
        tier_description: "Weekly math sessions - ₹2,600/week",
        profile_image: PHOTO_B,
        description: "IIT graduate specializing in making mathematics easy and enjoyable. Uses innovative teaching methods inspired by ancient Indian mathematical traditions.",
        specializations: &["Vedic Mathematics", "Competitive Math", "Calculus", "Statistics"],
        availability: "Mon-Fri 7PM-10PM",
    },
    MentorSeed {
        name: "Dr. Sunita Verma",
        title: "Science All-Rounder",
        subjects: &["Physics", "Chemistry", "Biology"],
        rating: 4.8,
        total_sessions: 1500,
        experience: "12 years",
        languages: &["English", "Hindi"],
        hourly_rate: 950,
        tier: Tier::One,
        tier_description: "Comprehensive science mentorship - ₹16,000/month",
        profile_image: PHOTO_C,
        description: "Former DRDO scientist turned educator. Combines practical science knowledge with traditional Indian scientific wisdom for holistic learning.",
        specializations: &["Applied Physics", "Practical Chemistry", "Medical Biology", "Research Methods"],
        availability: "Tue-Sat 3PM-8PM",
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

static MENTORS: Lazy<Vec<Mentor>> = Lazy::new(|| {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, s)| Mentor {
            id: (i + 1).to_string(),
            name: s.name.to_string(),
            title: s.title.to_string(),
            subjects: owned(s.subjects),
            rating: s.rating,
            total_sessions: s.total_sessions,
            experience: s.experience.to_string(),
            languages: owned(s.languages),
            hourly_rate: s.hourly_rate,
            tier: s.tier,
            tier_description: s.tier_description.to_string(),
            profile_image: s.profile_image.to_string(),
            description: s.description.to_string(),
            specializations: owned(s.specializations),
            availability: s.availability.to_string(),
            verified: true,
        })
        .collect()
});

pub fn all_mentors() -> &'static [Mentor] {
    &MENTORS
}

pub fn find_mentor(id: &str) -> Option<&'static Mentor> {
    MENTORS.iter().find(|m| m.id == id)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorCriteria {
    /// Must be one of the mentor's subjects, exactly.
    pub subject: Option<String>,
    /// Case-insensitive substring of the name or of any subject.
    pub search: Option<String>,
}

impl MentorCriteria {
    /// Starts from the student's first subject, like the directory does on
    /// sign-in.
    pub fn for_profile(profile: Option<&UserProfile>) -> Self {
        Self {
            subject: profile.and_then(|p| p.subjects.first().cloned()),
            search: None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Criteria<Mentor> for MentorCriteria {
    fn matches(&self, mentor: &Mentor) -> bool {
        if let Some(subject) = active(&self.subject) {
            if !mentor.subjects.iter().any(|s| s == subject) {
                return false;
            }
        }
        if let Some(term) = active(&self.search) {
            let hit = contains_ignore_case(&mentor.name, term)
                || mentor.subjects.iter().any(|s| contains_ignore_case(s, term));
            if !hit {
                return false;
            }
        }
        true
    }
}

pub fn filter_mentors(criteria: &MentorCriteria) -> Vec<&'static Mentor> {
    catalog::filter(all_mentors(), criteria)
}

pub fn mentor_subjects() -> Vec<String> {
    catalog::facet(
        MENTORS
            .iter()
            .flat_map(|m| m.subjects.iter().map(String::as_str)),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentorStats {
    pub count: usize,
    /// Rounded to one decimal.
    pub average_rating: f32,
    pub total_sessions: u64,
    pub subjects_covered: usize,
}

pub fn mentor_stats(mentors: &[&Mentor]) -> Option<MentorStats> {
    if mentors.is_empty() {
        return None;
    }

    let rating_sum: f32 = mentors.iter().map(|m| m.rating).sum();
    let average = rating_sum / mentors.len() as f32;
    let subjects: HashSet<&str> = mentors
        .iter()
        .flat_map(|m| m.subjects.iter().map(String::as_str))
        .collect();

    Some(MentorStats {
        count: mentors.len(),
        average_rating: (average * 10.0).round() / 10.0,
        total_sessions: mentors.iter().map(|m| u64::from(m.total_sessions)).sum(),
        subjects_covered: subjects.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Video,
    Voice,
    Chat,
}

impl ConnectionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "video" => Some(Self::Video),
            "voice" => Some(Self::Voice),
            "chat" => Some(Self::Chat),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Video => "Video Call",
            Self::Voice => "Voice Call",
            Self::Chat => "Chat Session",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Voice => "voice",
            Self::Chat => "chat",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::Video => {
                "Make sure your camera and microphone are working. You'll be redirected to the video call interface."
            }
            Self::Voice => "You'll receive a call shortly. Please ensure you're in a quiet environment.",
            Self::Chat => {
                "You'll be connected to a real-time chat with your mentor. Type your questions freely!"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest<'a> {
    pub mentor: &'a Mentor,
    pub kind: ConnectionKind,
    pub hourly_rate: u32,
    pub estimated_minutes: u32,
}

pub fn connect(mentor: &Mentor, kind: ConnectionKind) -> SessionRequest<'_> {
    SessionRequest {
        mentor,
        kind,
        hourly_rate: mentor.hourly_rate,
        estimated_minutes: SESSION_MINUTES,
    }
}
