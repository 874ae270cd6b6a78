// Copyright (C) 2026 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Partial name matching for the look/take/drop family of verbs. Custom
//! verb resolution deliberately does not use this; that one is exact and
//! case-sensitive.

/// Outcome of matching a typed name against a set of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<T> {
    /// Nothing matched.
    None,
    /// Exactly one candidate matched.
    One(T),
    /// More than one candidate matched and none was an exact tie-breaker.
    Many(Vec<T>),
}

/// Match `query` against candidates by name, case-insensitive.
///
/// Exact name matches always shadow substring matches, so "key" picks the
/// item named "key" even when a "keyboard" is also present. Among equals the
/// result is ambiguous and the caller is expected to ask the user to be
/// more specific.
pub fn match_name<'a, T, F>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a T>,
    name_of: F,
) -> MatchResult<&'a T>
where
    F: Fn(&T) -> &str,
{
    let query = query.trim();
    if query.is_empty() {
        return MatchResult::None;
    }
    let query_lower = query.to_lowercase();

    let mut exact = vec![];
    let mut partial = vec![];
    for candidate in candidates {
        let name = name_of(candidate).to_lowercase();
        if name == query_lower {
            exact.push(candidate);
        } else if name.contains(&query_lower) {
            partial.push(candidate);
        }
    }

    match (exact.len(), partial.len()) {
        (1, _) => MatchResult::One(exact.remove(0)),
        (0, 1) => MatchResult::One(partial.remove(0)),
        (0, 0) => MatchResult::None,
        (0, _) => MatchResult::Many(partial),
        (_, _) => MatchResult::Many(exact),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_beats_substring() {
        let candidates = names(&["key", "keyboard"]);
        let result = match_name("key", &candidates, |s| s.as_str());
        assert_eq!(result, MatchResult::One(&candidates[0]));
    }

    #[test]
    fn single_substring_match() {
        let candidates = names(&["rusty lantern", "stone"]);
        let result = match_name("lantern", &candidates, |s| s.as_str());
        assert_eq!(result, MatchResult::One(&candidates[0]));
    }

    #[test]
    fn case_insensitive() {
        let candidates = names(&["Rusty Lantern"]);
        let result = match_name("RUSTY lantern", &candidates, |s| s.as_str());
        assert_eq!(result, MatchResult::One(&candidates[0]));
    }

    #[test]
    fn ambiguous_substrings() {
        let candidates = names(&["red door", "red book"]);
        let result = match_name("red", &candidates, |s| s.as_str());
        assert_eq!(
            result,
            MatchResult::Many(vec![&candidates[0], &candidates[1]])
        );
    }

    #[test]
    fn no_match() {
        let candidates = names(&["stone"]);
        let result = match_name("lantern", &candidates, |s| s.as_str());
        assert_eq!(result, MatchResult::None);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let candidates = names(&["stone"]);
        let result = match_name("   ", &candidates, |s| s.as_str());
        assert_eq!(result, MatchResult::None);
    }
}
