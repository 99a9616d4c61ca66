//! Submitted form fields and required-field validation.

use thiserror::Error;

/// A required field was missing or blank. The message is shown verbatim as a toast.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FormError(pub &'static str);

/// Field values of one submitted form, in submission order.
/// Multi-select inputs contribute one entry per selected option.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// First value for `name`, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Every non-empty value for `name`.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Fails with `message` unless every field in `names` is non-empty.
    pub fn require(&self, names: &[&str], message: &'static str) -> Result<(), FormError> {
        if names.iter().all(|name| !self.get(name).is_empty()) {
            Ok(())
        } else {
            Err(FormError(message))
        }
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(entries: Vec<(String, String)>) -> Self {
        Self::new(entries)
    }
}
