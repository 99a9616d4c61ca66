//! UI patches: the ordered presentation operations produced by one user action.
//!
//! Handlers never touch the page directly. They record operations on a
//! `UiPatch`, which is serialized back to the shell script and applied in
//! order. Text-bearing operations (`Toast`, `SetText`, `SetValue`) are applied
//! as text by the shell; only `Replace` carries markup, and that markup is
//! produced by the escaping render functions.

pub mod markup;
pub mod shell;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValue {
    pub target: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiOp {
    ShowLoading { message: String },
    HideLoading,
    Toast { level: ToastLevel, message: String },
    Replace { target: String, html: String },
    SetText { target: String, text: String },
    SetValue { target: String, value: String },
    SetProgress { target: String, percent: f64, label: String },
    Show { target: String },
    Hide { target: String },
    OpenModal { target: String, fields: Vec<FieldValue> },
    CloseModal { target: String },
    ResetForm { target: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiPatch {
    pub ops: Vec<UiOp>,
}

impl UiPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_loading(&mut self, message: impl Into<String>) {
        self.ops.push(UiOp::ShowLoading {
            message: message.into(),
        });
    }

    pub fn hide_loading(&mut self) {
        self.ops.push(UiOp::HideLoading);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.ops.push(UiOp::Toast {
            level: ToastLevel::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.ops.push(UiOp::Toast {
            level: ToastLevel::Error,
            message: message.into(),
        });
    }

    pub fn replace(&mut self, target: &str, html: String) {
        self.ops.push(UiOp::Replace {
            target: target.to_string(),
            html,
        });
    }

    pub fn set_text(&mut self, target: &str, text: impl Into<String>) {
        self.ops.push(UiOp::SetText {
            target: target.to_string(),
            text: text.into(),
        });
    }

    pub fn set_value(&mut self, target: &str, value: impl Into<String>) {
        self.ops.push(UiOp::SetValue {
            target: target.to_string(),
            value: value.into(),
        });
    }

    pub fn set_progress(&mut self, target: &str, percent: f64, label: impl Into<String>) {
        self.ops.push(UiOp::SetProgress {
            target: target.to_string(),
            percent,
            label: label.into(),
        });
    }

    pub fn show(&mut self, target: &str) {
        self.ops.push(UiOp::Show {
            target: target.to_string(),
        });
    }

    pub fn hide(&mut self, target: &str) {
        self.ops.push(UiOp::Hide {
            target: target.to_string(),
        });
    }

    pub fn open_modal(&mut self, target: &str, fields: Vec<FieldValue>) {
        self.ops.push(UiOp::OpenModal {
            target: target.to_string(),
            fields,
        });
    }

    pub fn close_modal(&mut self, target: &str) {
        self.ops.push(UiOp::CloseModal {
            target: target.to_string(),
        });
    }

    pub fn reset_form(&mut self, target: &str) {
        self.ops.push(UiOp::ResetForm {
            target: target.to_string(),
        });
    }

    /// Whether any error toast has been recorded.
    pub fn has_error(&self) -> bool {
        self.ops.iter().any(|op| {
            matches!(
                op,
                UiOp::Toast {
                    level: ToastLevel::Error,
                    ..
                }
            )
        })
    }
}

/// Inspection helpers for assertions.
#[cfg(test)]
impl UiPatch {
    /// Messages of every toast at `level`, in order.
    pub fn toasts(&self, level: ToastLevel) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                UiOp::Toast { level: l, message } if *l == level => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Markup of the last `Replace` aimed at `target`.
    pub fn replaced(&self, target: &str) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            UiOp::Replace { target: t, html } if t == target => Some(html.as_str()),
            _ => None,
        })
    }

    pub fn has_replace(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, UiOp::Replace { .. }))
    }
}
