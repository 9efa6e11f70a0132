// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

/// Delimiters excluded from `tchar` besides controls, space and non-ASCII.
const DELIMITERS: &str = "\"(),/:;<=>?@[\\]{}";

/// Whether `c` may appear in an RFC 9110 `token` (field names, codings).
pub fn is_tchar(c: char) -> bool {
    c.is_ascii_graphic() && !DELIMITERS.contains(c)
}

/// Return the first character of `s` that is not a `tchar`, or `None` when
/// `s` is a valid token. An empty string is reported as `Some(' ')` since a
/// token needs at least one character.
pub fn find_invalid_token_char(s: &str) -> Option<char> {
    if s.is_empty() {
        return Some(' ');
    }
    s.chars().find(|&c| !is_tchar(c))
}
