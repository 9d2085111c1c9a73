// src/normalize.rs
//! Text cleanup for feed items. Only `content` and `bookDescription` are touched.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::feed::types::BookEntry;

fn re_tags() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // An unterminated trailing tag is removed too.
    RE.get_or_init(|| Regex::new(r"<[^>]*(?:>|$)").unwrap())
}

/// ECMAScript whitespace: includes U+FEFF, excludes U+0085 (unlike Unicode `\s`).
const WS_CLASS: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

fn is_ws(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

fn re_ws_run() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(&format!("{WS_CLASS}{WS_CLASS}+")).unwrap())
}

fn re_edge_quotes() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r#"^["“]+|["”]+$"#).unwrap())
}

fn re_tight_period() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\.([a-zA-Z0-9])").unwrap())
}

/// Remove HTML-like tags.
pub fn strip_markup(s: &str) -> String {
    re_tags().replace_all(s, "").into_owned()
}

/// Newlines become spaces, runs of 2+ whitespace chars collapse to one space, then trim.
pub fn normalize_whitespace(s: &str) -> String {
    let flat = s.replace('\n', " ");
    re_ws_run()
        .replace_all(&flat, " ")
        .trim_matches(is_ws)
        .to_string()
}

/// Drop leading `"`/`“` and trailing `"`/`”` runs.
pub fn trim_quotes(s: &str) -> String {
    re_edge_quotes().replace_all(s, "").into_owned()
}

/// `"etc.Next"` → `"etc. Next"`, everywhere in the string.
pub fn space_after_periods(s: &str) -> String {
    re_tight_period().replace_all(s, ". ${1}").into_owned()
}

pub fn clean_description(s: &str) -> String {
    let out = strip_markup(s);
    let out = normalize_whitespace(&out);
    let out = trim_quotes(&out);
    space_after_periods(&out)
}

/// Pure, total. Fields other than `content` and `book_description` pass through.
pub fn normalize_book(mut book: BookEntry) -> BookEntry {
    if let Some(content) = book.content.as_deref() {
        book.content = Some(normalize_whitespace(content));
    }
    if let Some(desc) = book.book_description.as_deref() {
        book.book_description = Some(clean_description(desc));
    }
    book
}
