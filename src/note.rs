// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Diagnostic notes and their deferred rendering.
//!
//! A [`Note`] pairs a static [`NoteKind`] with the parameters captured at
//! emission time. Templates are only resolved when [`Note::render`] (or
//! [`Note::summary`] / [`Note::text`]) is called, so emitting a note never
//! fails.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Broad area a note belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Security,
    Conneg,
    Caching,
    Validation,
    Connection,
    Range,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::General => "general",
            Category::Security => "security",
            Category::Conneg => "conneg",
            Category::Caching => "caching",
            Category::Validation => "validation",
            Category::Connection => "connection",
            Category::Range => "range",
        };
        f.write_str(s)
    }
}

/// How good or bad a finding is.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Good,
    Warn,
    Bad,
}

/// Static descriptor for one kind of note.
///
/// `summary` and `text` are templates: `{key}` is replaced by the note's
/// parameter of that name, `{{` and `}}` stand for literal braces.
#[derive(Debug, PartialEq, Eq)]
pub struct NoteKind {
    pub name: &'static str,
    pub category: Category,
    pub level: Level,
    pub summary: &'static str,
    pub text: &'static str,
}

/// Parameters carried by a note. Keys are unique.
pub type NoteParams = BTreeMap<String, String>;

/// Emission callback handed to field handlers.
pub type AddNote<'a> = dyn FnMut(&'static NoteKind, &[(&str, &str)]) + 'a;

/// One emitted diagnostic. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    kind: &'static NoteKind,
    params: NoteParams,
}

/// A note with its templates resolved, ready for a reporter.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub kind: &'static str,
    pub category: Category,
    pub level: Level,
    pub summary: String,
    pub text: String,
}

impl Note {
    pub fn new(kind: &'static NoteKind, params: NoteParams) -> Self {
        Self { kind, params }
    }

    pub fn kind(&self) -> &'static NoteKind {
        self.kind
    }

    pub fn params(&self) -> &NoteParams {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn summary(&self) -> Result<String> {
        self.render_one(self.kind.summary)
    }

    pub fn text(&self) -> Result<String> {
        self.render_one(self.kind.text)
    }

    /// Resolve both templates. Missing keys from either template are
    /// reported together, in order of first appearance.
    pub fn render(&self) -> Result<RenderedNote> {
        let mut missing = Vec::new();
        let summary = expand(self.kind, self.kind.summary, &self.params, &mut missing)?;
        let text = expand(self.kind, self.kind.text, &self.params, &mut missing)?;
        if !missing.is_empty() {
            return Err(Error::MissingParams {
                note: self.kind.name,
                missing,
            });
        }
        Ok(RenderedNote {
            kind: self.kind.name,
            category: self.kind.category,
            level: self.kind.level,
            summary,
            text,
        })
    }

    fn render_one(&self, template: &str) -> Result<String> {
        let mut missing = Vec::new();
        let out = expand(self.kind, template, &self.params, &mut missing)?;
        if missing.is_empty() {
            Ok(out)
        } else {
            Err(Error::MissingParams {
                note: self.kind.name,
                missing,
            })
        }
    }
}

fn expand(
    kind: &'static NoteKind,
    template: &str,
    params: &NoteParams,
    missing: &mut Vec<String>,
) -> Result<String> {
    let unbalanced = || Error::UnbalancedTemplate { note: kind.name };
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => return Err(unbalanced()),
                        Some(k) => key.push(k),
                    }
                }
                match params.get(&key) {
                    Some(v) => out.push_str(v),
                    None => {
                        if !missing.contains(&key) {
                            missing.push(key);
                        }
                    }
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(unbalanced()),
            other => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    static GREETING: NoteKind = NoteKind {
        name: "GREETING",
        category: Category::General,
        level: Level::Info,
        summary: "{message} says {word}.",
        text: "Literal {{braces}} and {word} again, then {extra}.",
    };

    static BROKEN: NoteKind = NoteKind {
        name: "BROKEN",
        category: Category::General,
        level: Level::Warn,
        summary: "dangling {open",
        text: "",
    };

    fn params(pairs: &[(&str, &str)]) -> NoteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_all_placeholders() -> anyhow::Result<()> {
        let note = Note::new(
            &GREETING,
            params(&[("message", "This response"), ("word", "hi"), ("extra", "x")]),
        );
        let r = note.render()?;
        assert_eq!(r.summary, "This response says hi.");
        assert_eq!(r.text, "Literal {braces} and hi again, then x.");
        assert_eq!(r.kind, "GREETING");
        assert_eq!(r.level, Level::Info);
        Ok(())
    }

    #[test]
    fn missing_keys_are_enumerated_once_in_order() {
        let note = Note::new(&GREETING, params(&[("message", "m")]));
        match note.render() {
            Err(Error::MissingParams { note, missing }) => {
                assert_eq!(note, "GREETING");
                assert_eq!(missing, vec!["word".to_string(), "extra".to_string()]);
            }
            other => panic!("expected MissingParams, got {:?}", other),
        }
    }

    #[test]
    fn summary_alone_only_needs_its_own_keys() -> anyhow::Result<()> {
        let note = Note::new(&GREETING, params(&[("message", "m"), ("word", "w")]));
        assert_eq!(note.summary()?, "m says w.");
        assert!(note.text().is_err());
        Ok(())
    }

    #[test]
    fn unbalanced_template_is_an_error() {
        let note = Note::new(&BROKEN, NoteParams::new());
        assert_eq!(
            note.summary(),
            Err(Error::UnbalancedTemplate { note: "BROKEN" })
        );
    }

    #[rstest]
    #[case(Level::Info, Level::Good)]
    #[case(Level::Good, Level::Warn)]
    #[case(Level::Warn, Level::Bad)]
    fn levels_are_ordered(#[case] lower: Level, #[case] higher: Level) {
        assert!(lower < higher);
    }

    #[test]
    fn rendered_note_serializes_lowercase() -> anyhow::Result<()> {
        let note = Note::new(
            &GREETING,
            params(&[("message", "m"), ("word", "w"), ("extra", "e")]),
        );
        let s = serde_json::to_string(&note.render()?)?;
        assert!(s.contains("\"category\":\"general\""));
        assert!(s.contains("\"level\":\"info\""));
        Ok(())
    }
}
