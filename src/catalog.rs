//! Narrowing the fixed reference lists by user-supplied criteria.
//!
//! Every criterion is optional; an unset or blank one matches everything.
//! Filtering keeps the source order.

/// A set of criteria that can be checked against one record.
pub trait Criteria<T> {
    fn matches(&self, record: &T) -> bool;
}

pub fn filter<'a, T, C>(records: &'a [T], criteria: &C) -> Vec<&'a T>
where
    C: Criteria<T>,
{
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Treats `None` and whitespace-only strings alike as "no constraint".
/// Anything else is returned as given, so equality stays exact.
pub fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.trim().is_empty())
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sorted, de-duplicated values, for filter pickers.
pub fn facet<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = values.into_iter().map(str::to_string).collect();
    out.sort();
    out.dedup();
    out
}
