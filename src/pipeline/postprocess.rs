//! Post-processing: deterministic cleanup of text-model JSON replies.
//!
//! Even with a schema in the system message, models occasionally wrap their
//! JSON in artefacts that `serde_json` rejects:
//!
//! - a ` ```json ... ``` ` fence around the object
//! - a leading BOM or zero-width space
//! - a sentence of chatter before or after the object
//!
//! The rules below strip those without touching the JSON itself. Nothing here
//! calls a model; a reply that is still not valid JSON afterwards fails the
//! extraction stage.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to a raw reply, in order:
///
/// 1. Strip invisible Unicode (BOM, zero-width characters)
/// 2. Strip an outer code fence
/// 3. Keep only the outermost `{ ... }` span
pub fn clean_json_reply(input: &str) -> String {
    let s = remove_invisible_chars(input);
    let s = strip_code_fence(&s);
    outermost_object(&s).trim().to_string()
}

/// Trim and collapse whitespace runs in free-text replies such as the
/// structure plan.
pub fn clean_text_reply(input: &str) -> String {
    let s = remove_invisible_chars(input);
    let s = strip_code_fence(&s).replace("\r\n", "\n");
    RE_BLANK_LINES.replace_all(s.trim(), "\n\n").to_string()
}

// ── Rule 1: Strip invisible characters ───────────────────────────────────────

static RE_INVISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{FEFF}\x{200B}\x{200C}\x{200D}\x{2060}]").unwrap());

fn remove_invisible_chars(input: &str) -> String {
    RE_INVISIBLE.replace_all(input, "").to_string()
}

// ── Rule 2: Strip outer code fence ───────────────────────────────────────────

static RE_OUTER_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```\s*$").unwrap());

fn strip_code_fence(input: &str) -> String {
    let trimmed = input.trim();
    match RE_OUTER_FENCE.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    }
}

// ── Rule 3: Outermost object ─────────────────────────────────────────────────

fn outermost_object(input: &str) -> &str {
    match (input.find('{'), input.rfind('}')) {
        (Some(start), Some(end)) if start < end => &input[start..=end],
        _ => input,
    }
}

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
