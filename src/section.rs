use std::collections::HashMap;

/// Name of the global section. Holds the entries found before the first header, or after a
/// blank `[]` header.
pub const DEFAULT_SECTION: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: HashMap<String, String>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entries: HashMap::with_capacity(16),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SECTION
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over the key/value pairs in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Later writes to the same key replace earlier ones.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }
}

/// A decoded INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: HashMap<String, Section>,
}

impl Config {
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn default_section(&self) -> Option<&Section> {
        self.section(DEFAULT_SECTION)
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Flatten into plain nested maps, keyed by section name and then by key.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, HashMap<String, String>> {
        self.sections
            .into_iter()
            .map(|(name, section)| (name, section.entries))
            .collect()
    }

    /// Return the section called `name`, creating it if this is the first time it is seen.
    ///
    /// Duplicate section names are merged into the same mapping.
    pub(crate) fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections
            .entry(name.to_owned())
            .or_insert_with(|| Section::new(name.to_owned()))
    }
}
