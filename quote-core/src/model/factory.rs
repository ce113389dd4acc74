//! Factory records.

use serde::{Deserialize, Serialize};

/// A supplying factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    #[serde(default)]
    pub id: String,
    /// Short factory code, e.g. `F01`.
    pub code: String,
    pub name: String,
}

impl Factory {
    /// Create a factory without an id; the store assigns one on insert.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            code: code.into(),
            name: name.into(),
        }
    }

    /// Label used on sales orders: `CODE - Name`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let factory = Factory::new("F01", "Jepara Teak Works");
        assert_eq!(factory.label(), "F01 - Jepara Teak Works");
    }
}
