use std::borrow::Cow;
use std::collections::HashMap;

/// Position of a section inside its [`SectionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(usize);

/// A named group of menu entries, declared by `INFO-DIR-SECTION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: Vec<u8>,
    entries: Vec<Vec<u8>>,
}

impl Section {
    fn new(name: &[u8]) -> Self {
        Self {
            name: name.to_vec(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Name for log output; invalid UTF-8 is replaced.
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn entries(&self) -> &[Vec<u8>] {
        &self.entries
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<Vec<u8>>) {
        (self.name, self.entries)
    }
}

/// Sections accumulated across every scanned file.
///
/// Sections keep first-declaration order and entries keep first-seen order.
/// Names are matched byte for byte, so `Foo` and `foo` are distinct.
#[derive(Debug, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    by_name: HashMap<Vec<u8>, SectionId>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a section by name, creating it at the end if it is new.
    pub fn open_section(&mut self, name: &[u8]) -> SectionId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = SectionId(self.sections.len());
        self.sections.push(Section::new(name));
        self.by_name.insert(name.to_vec(), id);
        id
    }

    /// Append an entry line. Duplicates are kept.
    pub fn push_entry(&mut self, id: SectionId, line: &[u8]) {
        self.sections[id.0].entries.push(line.to_vec());
    }

    pub fn get(&self, name: &[u8]) -> Option<&Section> {
        self.by_name.get(name).map(|id| &self.sections[id.0])
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.iter().map(|s| s.entries.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}
