// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query tokenization and word-boundary detection.
//!
//! Model names are the hard case: `4x-AnimeUndeint-Compact`,
//! `1x-BaldrickVHSFixV0-2`, `2x-SHARP-ANIME-V2`. A plain split on
//! non-alphanumerics leaves `AnimeUndeint` whole and glues `V0` to `Fix`.
//! So tokenization breaks at:
//!
//! - runs of whitespace, punctuation, separators, `_`, `+` and `.`
//! - camel case: before an uppercase letter followed by a lowercase one
//! - around digit runs, and after a `v`/`V` that precedes a digit
//! - around runs of 2+ uppercase letters (acronyms like `VHS`, `ATLA`)
//! - ASCII word boundaries
//!
//! Then known format words (`jpeg`, `png`, `dds`, `dxt`) are cut out of the
//! tokens they hide in, and a repair pass glues version (`v2`) and scale
//! (`4x`) notation back together.
//!
//! # Positions
//!
//! [`is_boundary`] takes a **byte** offset into a `&str`, the same offsets
//! `str::find` hands back to the scorer. Offsets that don't fall on a char
//! boundary are never word boundaries.

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace, Unicode punctuation, Unicode separators, and `_+.`.
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\p{P}\p{Z}_+.]$").expect("separator class is a valid regex")
});

/// Format/container words that show up glued to other words (`MangaJPEGLQ`).
static KNOWN_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("jpeg|png|dds|dxt").expect("known words are a valid regex"));

#[inline]
fn is_separator(c: char) -> bool {
    let mut buf = [0u8; 4];
    SEPARATOR.is_match(c.encode_utf8(&mut buf))
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// TOKENIZE
// =============================================================================

/// Split a free-text query into lowercase tokens.
///
/// Total: any input, including the empty string, gives a (possibly empty)
/// token list. Pure, so calling it twice gives the same tokens.
///
/// # Example
///
/// ```
/// use tagsieve::tokenize;
///
/// assert_eq!(tokenize("fooBar"), vec!["foo", "bar"]);
/// assert_eq!(tokenize("4x-AnimeUndeint-Compact"), vec!["4x", "anime", "undeint", "compact"]);
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    let chars: Vec<char> = query.chars().collect();
    let tokens: Vec<String> = split_pieces(&chars)
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.to_lowercase())
        .flat_map(|token| split_known_words(&token))
        .collect();
    repair_adjacent(tokens)
}

/// A break found at some position: the break ends at `end`, and may keep a
/// captured piece of text as its own token.
struct Break {
    end: usize,
    captured: Option<(usize, usize)>,
}

/// Try each break rule at `q`, in priority order. The first rule that applies wins.
fn break_at(chars: &[char], q: usize) -> Option<Break> {
    let at = |i: usize| chars.get(i).copied();
    let c = at(q)?;

    // separator run, consumed
    if is_separator(c) {
        let end = (q..chars.len())
            .find(|&i| !is_separator(chars[i]))
            .unwrap_or(chars.len());
        return Some(Break {
            end,
            captured: None,
        });
    }

    // camel case: zero-width, before Upper+lower
    if c.is_uppercase() && at(q + 1).is_some_and(char::is_lowercase) {
        return Some(Break {
            end: q,
            captured: None,
        });
    }

    // version prefix: a lone v/V before a digit
    if matches!(c, 'v' | 'V') && at(q + 1).is_some_and(|n| n.is_ascii_digit()) {
        return Some(Break {
            end: q + 1,
            captured: Some((q, q + 1)),
        });
    }

    // digit run
    if c.is_ascii_digit() {
        let end = (q..chars.len())
            .find(|&i| !chars[i].is_ascii_digit())
            .unwrap_or(chars.len());
        return Some(Break {
            end,
            captured: Some((q, end)),
        });
    }

    // acronym: 2+ uppercase letters, stopping before one that starts a word
    if c.is_ascii_uppercase() {
        let mut end = q + 1;
        while at(end).is_some_and(|n| n.is_ascii_uppercase())
            && !at(end + 1).is_some_and(|n| n.is_ascii_lowercase())
        {
            end += 1;
        }
        if end > q + 1 {
            return Some(Break {
                end,
                captured: Some((q, end)),
            });
        }
    }

    // word boundary: zero-width
    let before = q.checked_sub(1).and_then(at).is_some_and(is_ascii_word);
    if before != is_ascii_word(c) {
        return Some(Break {
            end: q,
            captured: None,
        });
    }

    None
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `chars` at every break. Captured text becomes its own piece.
///
/// A zero-width break at the very start of the current piece is skipped,
/// so a piece is never split into "" and itself.
fn split_pieces(chars: &[char]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut p = 0;
    let mut q = 0;

    while q < chars.len() {
        match break_at(chars, q) {
            Some(brk) if brk.end != p => {
                pieces.push(chars[p..q].iter().collect());
                if let Some((start, end)) = brk.captured {
                    pieces.push(chars[start..end].iter().collect());
                }
                p = brk.end;
                q = p;
            }
            _ => q += 1,
        }
    }
    pieces.push(chars[p..].iter().collect());

    pieces
}

/// Cut known words out of `token`, keeping them as tokens of their own.
fn split_known_words(token: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in KNOWN_WORDS.find_iter(token) {
        parts.push(&token[last..m.start()]);
        parts.push(m.as_str());
        last = m.end();
    }
    parts.push(&token[last..]);

    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Single left-to-right pass over adjacent pairs:
///
/// - `dev` `2` → `de` `v` `2` (trailing `v` before a number is a version prefix)
/// - `v` `2` → `v2`
/// - `4` `x` → `4x`
fn repair_adjacent(mut tokens: Vec<String>) -> Vec<String> {
    let mut i = 1;
    while i < tokens.len() {
        let (a, b) = (&tokens[i - 1], &tokens[i]);

        if a.len() > 1 && a.ends_with('v') && is_number(b) {
            let head = a[..a.len() - 1].to_string();
            tokens.splice(i - 1..i, [head, "v".to_string()]);
            // re-examine the new pair (head, "v") without advancing
            continue;
        }

        if (a == "v" && is_number(b)) || (is_number(a) && b == "x") {
            let merged = format!("{a}{b}");
            tokens.splice(i - 1..=i, [merged]);
        }
        i += 1;
    }

    tokens
}

// =============================================================================
// BOUNDARIES
// =============================================================================

/// Is `index` (a byte offset) the natural start of a word in `text`?
///
/// True at the start and end of the string, at a word/non-word transition,
/// right before a separator, and right before an Upper+lower pair. Otherwise
/// the previous code point is examined as well: true if it is a separator,
/// or if it and the character at `index` differ in letter-ness or
/// digit-ness, or if the two form the start of an acronym-to-word
/// transition (`VHSFix` at `F`).
pub fn is_boundary(text: &str, index: usize) -> bool {
    if index == 0 || index == text.len() {
        return true;
    }
    if index > text.len() || !text.is_char_boundary(index) {
        return false;
    }

    let mut ahead = text[index..].chars();
    let Some(current) = ahead.next() else {
        return true;
    };
    let next = ahead.next();
    let Some(previous) = text[..index].chars().next_back() else {
        return true;
    };

    if is_word_char(previous) != is_word_char(current)
        || is_separator(current)
        || (current.is_uppercase() && next.is_some_and(char::is_lowercase))
    {
        return true;
    }

    // one code point back
    is_separator(previous)
        || previous.is_alphabetic() != current.is_alphabetic()
        || previous.is_ascii_digit() != current.is_ascii_digit()
        || (previous.is_ascii_uppercase()
            && current.is_ascii_uppercase()
            && next.is_some_and(|n| n.is_ascii_lowercase()))
}
