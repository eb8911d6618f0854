use serde::{Deserialize, Serialize};

/// Mandatory and optional field names for one destination.
///
/// Both lists keep first-seen order and never hold the same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequirements {
    mandatory: Vec<String>,
    optional: Vec<String>,
}

impl FieldRequirements {
    pub fn new<M, O, S, T>(mandatory: M, optional: O) -> Self
    where
        M: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut requirements = Self::default();
        for name in mandatory {
            requirements.push_mandatory(name);
        }
        for name in optional {
            requirements.push_optional(name);
        }
        requirements
    }

    pub fn mandatory(&self) -> &[String] {
        &self.mandatory
    }

    pub fn optional(&self) -> &[String] {
        &self.optional
    }

    /// Adds a mandatory field unless it is already listed.
    pub fn push_mandatory(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.mandatory.contains(&name) {
            self.mandatory.push(name);
        }
    }

    pub fn push_optional(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.optional.contains(&name) {
            self.optional.push(name);
        }
    }

    /// Removes a mandatory field, returning whether it was listed.
    pub fn remove_mandatory(&mut self, name: &str) -> bool {
        let before = self.mandatory.len();
        self.mandatory.retain(|field| field != name);
        self.mandatory.len() != before
    }

    pub fn is_mandatory(&self, name: &str) -> bool {
        self.mandatory.iter().any(|field| field == name)
    }

    /// True when the field is listed as mandatory or optional.
    pub fn is_declared(&self, name: &str) -> bool {
        self.is_mandatory(name) || self.optional.iter().any(|field| field == name)
    }

    /// Mandatory followed by optional fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &str> {
        self.mandatory
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_collapsed() {
        let requirements = FieldRequirements::new(["a", "platform", "platform"], ["b", "b"]);
        assert_eq!(requirements.mandatory(), &["a", "platform"]);
        assert_eq!(requirements.optional(), &["b"]);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut requirements = FieldRequirements::new(["collection_date", "host"], ["isolate"]);
        assert!(requirements.remove_mandatory("collection_date"));
        assert!(!requirements.remove_mandatory("collection_date"));
        assert!(!requirements.is_mandatory("collection_date"));
        assert!(requirements.is_declared("isolate"));
    }
}
