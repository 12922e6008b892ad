//! Name normalization: raw `x-sse-events` entries -> canonical, sorted list.
//!
//! Member names are UpperCamel (`message_start` -> `MessageStart`) and wire
//! names lowerCamel (`message_start` -> `messageStart`). Both conversions are
//! total, deterministic and idempotent.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::spec::EventDescriptor;

/// Split an identifier into words.
///
/// Boundaries are any non-ASCII-alphanumeric character, a lower-to-upper or
/// digit-to-upper transition, a digit-to-letter transition, and the last
/// capital of an acronym run followed by a lowercase letter
/// (`HTTPServer` -> `HTTP`, `Server`).
pub fn split_words(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_alphanumeric() {
            if let Some(from) = start.take() {
                words.push(&s[from..i]);
            }
            continue;
        }

        if let Some(from) = start
            && i > from
        {
            let prev = bytes[i - 1];
            let next = bytes.get(i + 1).copied();
            let boundary = (b.is_ascii_uppercase()
                && (prev.is_ascii_lowercase() || prev.is_ascii_digit()))
                || (b.is_ascii_alphabetic() && prev.is_ascii_digit())
                || (b.is_ascii_uppercase()
                    && prev.is_ascii_uppercase()
                    && next.is_some_and(|n| n.is_ascii_lowercase()));
            if boundary {
                words.push(&s[from..i]);
                start = Some(i);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(from) = start {
        words.push(&s[from..]);
    }
    words
}

/// Capitalize the first letter of a word and lowercase the rest.
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect(),
    }
}

/// Rejoin words, capitalizing each one (all but the first when `lower_first`).
///
/// A capitalized word of one letter followed by another word that is a lone
/// letter or a letter and digits would form an uppercase run, which
/// [`split_words`] reads back as an acronym (`x_y` -> `XY` -> `Xy`). Such a
/// word keeps its first letter lower-case instead, so `x_y` -> `Xy`. This keeps
/// every output a fixed point of the conversion.
fn join_words(words: &[&str], lower_first: bool) -> String {
    let mut joined = String::new();
    for (i, word) in words.iter().enumerate() {
        let after_capital = joined.as_bytes().last().is_some_and(u8::is_ascii_uppercase);
        let extends_run =
            after_capital && !word.as_bytes().get(1).is_some_and(u8::is_ascii_alphabetic);
        if (i == 0 && lower_first) || extends_run {
            joined.push_str(&word.to_ascii_lowercase());
        } else {
            joined.push_str(&capitalize_word(word));
        }
    }
    joined
}

/// Convert to UpperCamel case, e.g. `message_start` -> `MessageStart`.
pub fn to_upper_camel(s: &str) -> String {
    join_words(&split_words(s), false)
}

/// Convert to lowerCamel case, e.g. `message_start` -> `messageStart`.
pub fn to_lower_camel(s: &str) -> String {
    join_words(&split_words(s), true)
}

/// Whether `name` can stand alone as an identifier in every target language.
fn is_member_name(name: &str) -> bool {
    name.as_bytes().first().is_some_and(u8::is_ascii_alphabetic)
}

/// Normalize raw descriptors into the canonical event list.
///
/// Keys become member names, wire names become lowerCamel, and the result is
/// sorted by member name (byte-wise). Two source keys that map to the same
/// member name are rejected with [`Error::DuplicateKey`], and a key whose
/// member name is empty or starts with a digit with [`Error::InvalidKey`].
pub fn normalize_events(raw: Vec<EventDescriptor>) -> Result<Vec<EventDescriptor>> {
    let mut seen: HashMap<String, String> = HashMap::with_capacity(raw.len());
    let mut events = Vec::with_capacity(raw.len());

    for event in raw {
        let key = to_upper_camel(&event.key);
        if !is_member_name(&key) {
            return Err(Error::InvalidKey {
                key: event.key,
                normalized: key,
            });
        }
        if let Some(first) = seen.get(&key) {
            // Report the pair in a stable order regardless of map iteration.
            let (first, second) = if first.as_str() <= event.key.as_str() {
                (first.clone(), event.key)
            } else {
                (event.key, first.clone())
            };
            return Err(Error::DuplicateKey { key, first, second });
        }
        seen.insert(key.clone(), event.key);

        events.push(EventDescriptor {
            key,
            wire_name: to_lower_camel(&event.wire_name),
            description: event.description,
            deprecated: event.deprecated,
        });
    }

    events.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
    debug!(events = events.len(), "Normalized event names.");
    Ok(events)
}
