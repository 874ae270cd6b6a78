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

/// Split a line into its first word and the rest, with the rest trimmed.
/// The rest is the empty string when the line is a single word.
#[must_use]
pub fn split_first_word(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (line, ""),
    }
}

pub const MAX_USER_NAME_LEN: usize = 26;

/// Whether a string is acceptable as a user name: non-empty, bounded, one
/// word, and made of word-ish characters.
#[must_use]
pub fn valid_user_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_USER_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_single_word() {
        assert_eq!(split_first_word("look"), ("look", ""));
    }

    #[test]
    fn split_with_rest() {
        assert_eq!(
            split_first_word("take rusty lantern"),
            ("take", "rusty lantern")
        );
    }

    #[test]
    fn split_trims_padding() {
        assert_eq!(split_first_word("  go   north  "), ("go", "north"));
    }

    #[test]
    fn name_validation() {
        assert!(valid_user_name("Aziz"));
        assert!(valid_user_name("night_owl-7"));
        assert!(!valid_user_name(""));
        assert!(!valid_user_name("two words"));
        assert!(!valid_user_name("a".repeat(MAX_USER_NAME_LEN + 1).as_str()));
    }
}
