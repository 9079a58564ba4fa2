//! Tests for [`chanakya::mentors`]

use chanakya::catalog::Criteria;
use chanakya::mentors::{
    all_mentors, connect, filter_mentors, find_mentor, mentor_stats, mentor_subjects,
    ConnectionKind, MentorCriteria, Tier, SESSION_MINUTES,
};
use chanakya::profile::demo_profile;

/// Test 1: the directory has ten verified mentors with unique ids.
#[test]
fn test_directory_shape() {
    let mentors = all_mentors();
    assert_eq!(mentors.len(), 10);
    assert!(mentors.iter().all(|m| m.verified));
    let mut ids: Vec<&str> = mentors.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

/// Test 2: no criteria returns everything in source order.
#[test]
fn test_empty_criteria_returns_all() {
    let list = filter_mentors(&MentorCriteria::default());
    assert_eq!(list.len(), all_mentors().len());
    assert_eq!(list[0].id, all_mentors()[0].id);
}

/// Test 3: the filter is exactly the predicate's extension for every
/// subject facet.
#[test]
fn test_filter_matches_predicate_for_each_subject() {
    for subject in mentor_subjects() {
        let criteria = MentorCriteria {
            subject: Some(subject.clone()),
            search: None,
        };
        let got = filter_mentors(&criteria);
        let expected: Vec<_> = all_mentors()
            .iter()
            .filter(|m| m.subjects.contains(&subject))
            .collect();
        assert_eq!(got, expected, "subject {subject}");
        assert!(got.iter().all(|m| criteria.matches(*m)));
    }
}

/// Test 4: search is case-insensitive over name and subjects.
#[test]
fn test_search_name_and_subject() {
    let by_name = filter_mentors(&MentorCriteria {
        subject: None,
        search: Some("PRIYA".to_string()),
    });
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Dr. Priya Sharma");

    let by_subject = filter_mentors(&MentorCriteria {
        subject: None,
        search: Some("chem".to_string()),
    });
    assert!(by_subject
        .iter()
        .all(|m| m.subjects.iter().any(|s| s.to_lowercase().contains("chem"))
            || m.name.to_lowercase().contains("chem")));
    assert!(!by_subject.is_empty());
}

/// Test 5: blank criteria count as unset.
#[test]
fn test_blank_criteria_are_ignored() {
    let list = filter_mentors(&MentorCriteria {
        subject: Some("   ".to_string()),
        search: Some(String::new()),
    });
    assert_eq!(list.len(), all_mentors().len());
}

/// Test 6: a search with no hits returns an empty list and no stats.
#[test]
fn test_no_match() {
    let list = filter_mentors(&MentorCriteria {
        subject: None,
        search: Some("zzzz".to_string()),
    });
    assert!(list.is_empty());
    assert_eq!(mentor_stats(&list), None);
}

/// Test 7: criteria for a profile start from its first subject.
#[test]
fn test_criteria_for_profile() {
    let profile = demo_profile();
    let criteria = MentorCriteria::for_profile(Some(&profile));
    assert_eq!(criteria.subject.as_deref(), Some("Mathematics"));
    assert_eq!(MentorCriteria::for_profile(None), MentorCriteria::default());
}

/// Test 8: stats over a hand-checked subset.
#[test]
fn test_stats() {
    let a = find_mentor("1").unwrap();
    let b = find_mentor("3").unwrap();
    let stats = mentor_stats(&[a, b]).unwrap();
    assert_eq!(stats.count, 2);
    assert!((stats.average_rating - 4.9).abs() < 1e-6);
    assert_eq!(
        stats.total_sessions,
        u64::from(a.total_sessions) + u64::from(b.total_sessions)
    );
    // Mathematics, Statistics, Calculus, Biology, Chemistry, Environmental Science
    assert_eq!(stats.subjects_covered, 6);
}

/// Test 9: lookups by id.
#[test]
fn test_find_mentor() {
    assert_eq!(find_mentor("2").unwrap().name, "Prof. Rajesh Gupta");
    assert_eq!(find_mentor("2").unwrap().tier, Tier::One);
    assert!(find_mentor("99").is_none());
}

/// Test 10: a session request carries the mentor's rate and a one hour
/// estimate.
#[test]
fn test_connect() {
    let mentor = find_mentor("1").unwrap();
    let req = connect(mentor, ConnectionKind::Voice);
    assert_eq!(req.hourly_rate, mentor.hourly_rate);
    assert_eq!(req.estimated_minutes, SESSION_MINUTES);
    assert_eq!(req.kind.title(), "Voice Call");
}

/// Test 11: connection kinds parse loosely.
#[test]
fn test_connection_kind_parse() {
    assert_eq!(ConnectionKind::parse(" Video "), Some(ConnectionKind::Video));
    assert_eq!(ConnectionKind::parse("CHAT"), Some(ConnectionKind::Chat));
    assert_eq!(ConnectionKind::parse("fax"), None);
}

/// Test 12: tiers serialise with their display labels.
#[test]
fn test_tier_serde() {
    assert_eq!(serde_json::to_string(&Tier::Two).unwrap(), "\"Tier 2\"");
    assert_eq!(Tier::Three.to_string(), "Tier 3");
}
