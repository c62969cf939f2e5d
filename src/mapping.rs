use std::collections::BTreeMap;

/// Bidirectional lookup between receiver codes and display names
///
/// The reverse table is built once from the configured code → name table.
/// When two codes share a display name the one iterated last (greatest code)
/// wins the reverse lookup.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    by_code: BTreeMap<String, String>,
    by_name: BTreeMap<String, String>,
}

impl NameTable {
    /// Build a table whose reverse lookup yields the configured codes
    pub fn new(by_code: BTreeMap<String, String>) -> Self {
        Self::with_command_codes(by_code, |code| code.to_string())
    }

    /// Build a table whose reverse lookup yields `command(code)` instead of
    /// the raw code
    pub fn with_command_codes(
        by_code: BTreeMap<String, String>,
        command: impl Fn(&str) -> String,
    ) -> Self {
        let mut by_name = BTreeMap::new();
        for (code, name) in &by_code {
            if let Some(previous) = by_name.insert(name.clone(), command(code)) {
                tracing::warn!(
                    "Display name {:?} is mapped by several codes, {:?} replaces {:?}",
                    name,
                    code,
                    previous
                );
            }
        }

        Self { by_code, by_name }
    }

    /// Display name for a code reported by the receiver
    pub fn name(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    /// Command code for a display name
    pub fn code(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// All display names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::sound_mode_command;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_forward_and_reverse_lookup() {
        let names = NameTable::new(table(&[("01", "CD"), ("02", "TUNER")]));
        assert_eq!(names.name("01"), Some("CD"));
        assert_eq!(names.name("99"), None);
        assert_eq!(names.code("TUNER"), Some("02"));
        assert_eq!(names.code("UNKNOWN"), None);
    }

    #[test]
    fn test_command_codes_apply_only_to_reverse() {
        let names = NameTable::with_command_codes(table(&[("05", "STEREO")]), sound_mode_command);
        assert_eq!(names.code("STEREO"), Some("005"));
        assert_eq!(names.name("05"), Some("STEREO"));
        assert_eq!(names.name("005"), None);
    }

    #[test]
    fn test_names_sorted() {
        let names = NameTable::new(table(&[("03", "TV"), ("01", "CD"), ("02", "AUX")]));
        assert_eq!(names.names(), vec!["AUX", "CD", "TV"]);
    }

    #[test]
    fn test_duplicate_name_last_code_wins() {
        let names = NameTable::new(table(&[("02", "CD"), ("01", "CD")]));
        assert_eq!(names.code("CD"), Some("02"));
        assert_eq!(names.names(), vec!["CD"]);
    }
}
