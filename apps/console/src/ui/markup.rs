//! Escaping helpers shared by every render function.
//!
//! Backend payloads are untrusted: every interpolated value goes through
//! `esc`, attribute values included.

use v_htmlescape::escape;

/// Bootstrap contextual color, rendered as the suffix of `bg-*`, `text-*`, `border-*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
    Secondary,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Secondary => "secondary",
        }
    }
}

pub fn esc(text: &str) -> String {
    escape(text).to_string()
}

/// `<li>` per item, escaped.
pub fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", esc(item)))
        .collect()
}
