//! Construction options for combined reducers.

use serde::Deserialize;

use crate::graph::ArgumentSlots;

/// Options that control how a combined reducer is built.
///
/// Options can be written by hand or deserialized from a host
/// application's configuration file; missing keys take their defaults.
///
/// ```rust,ignore
/// let options: ReducerOptions = serde_json::from_str(r#"{ "validate": false }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReducerOptions {
    /// Check the configuration before building the graph. On by default;
    /// turn off only for configurations already known to be valid.
    pub validate: bool,

    /// Names for the call-time argument slots, in positional order. When
    /// empty, `@arg` annotations address arguments by index only.
    pub argument_names: Vec<String>,
}

impl Default for ReducerOptions {
    fn default() -> Self {
        Self {
            validate: true,
            argument_names: Vec::new(),
        }
    }
}

impl ReducerOptions {
    pub(crate) fn argument_slots(&self) -> ArgumentSlots {
        if self.argument_names.is_empty() {
            ArgumentSlots::positional()
        } else {
            ArgumentSlots::named(self.argument_names.iter().cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_on_by_default() {
        let options = ReducerOptions::default();
        assert!(options.validate);
        assert!(!options.argument_slots().is_named());
    }

    #[test]
    fn deserializes_with_defaults() {
        let options: ReducerOptions =
            serde_json::from_str(r#"{ "argument_names": ["amount", "rate"] }"#).unwrap();
        assert!(options.validate);
        assert_eq!(options.argument_slots().resolve("rate"), Some(1));

        let options: ReducerOptions = serde_json::from_str(r#"{ "validate": false }"#).unwrap();
        assert!(!options.validate);
    }
}
