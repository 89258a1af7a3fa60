use crate::models::{Material, Section};

/// A material together with where it sits in the course.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceEntry {
    pub section_id: String,
    pub section_order: i64,
    pub material: Material,
}

/// Every material of a course in walking order: by section `order_number`,
/// then by material `order_num`. Ties keep the order they were encountered.
#[derive(Debug, Clone, Default)]
pub struct MaterialSequence {
    entries: Vec<SequenceEntry>,
}

impl MaterialSequence {
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut entries: Vec<SequenceEntry> = sections
            .iter()
            .flat_map(|section| {
                section.course_materials.iter().map(move |material| SequenceEntry {
                    section_id: section.section_id.clone(),
                    section_order: section.order_number,
                    material: material.clone(),
                })
            })
            .collect();

        // sort_by_key is stable
        entries.sort_by_key(|e| (e.section_order, e.material.order_num));

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.entries.iter().map(|e| &e.material)
    }

    pub fn first(&self) -> Option<&Material> {
        self.entries.first().map(|e| &e.material)
    }

    pub fn last(&self) -> Option<&Material> {
        self.entries.last().map(|e| &e.material)
    }

    pub fn get(&self, material_id: &str) -> Option<&Material> {
        self.position(material_id).map(|i| &self.entries[i].material)
    }

    /// Index of the first material with this id.
    pub fn position(&self, material_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.material.id == material_id)
    }

    /// `None` at the end of the course or when `material_id` is not part of it.
    pub fn next(&self, material_id: &str) -> Option<&Material> {
        let index = self.position(material_id)?;
        self.entries.get(index + 1).map(|e| &e.material)
    }

    /// `None` at the start of the course or when `material_id` is not part of it.
    pub fn previous(&self, material_id: &str) -> Option<&Material> {
        let index = self.position(material_id)?;
        let before = index.checked_sub(1)?;
        self.entries.get(before).map(|e| &e.material)
    }
}

/// The material a viewer is showing, with stepping through the sequence.
#[derive(Debug, Clone)]
pub struct MaterialCursor {
    sequence: MaterialSequence,
    current: Material,
}

impl MaterialCursor {
    pub fn new(sequence: MaterialSequence, current: Material) -> Self {
        Self { sequence, current }
    }

    /// Starts at the first material of the course, if it has any.
    pub fn start(sequence: MaterialSequence) -> Option<Self> {
        let first = sequence.first()?.clone();
        Some(Self::new(sequence, first))
    }

    pub fn current(&self) -> &Material {
        &self.current
    }

    pub fn sequence(&self) -> &MaterialSequence {
        &self.sequence
    }

    pub fn has_next(&self) -> bool {
        self.sequence.next(&self.current.id).is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.sequence.previous(&self.current.id).is_some()
    }

    /// Moves forward; stays put and returns `false` when there is no next.
    pub fn advance(&mut self) -> bool {
        match self.sequence.next(&self.current.id) {
            Some(next) => {
                self.current = next.clone();
                true
            }
            None => false,
        }
    }

    /// Moves back; stays put and returns `false` when there is no previous.
    pub fn retreat(&mut self) -> bool {
        match self.sequence.previous(&self.current.id) {
            Some(previous) => {
                self.current = previous.clone();
                true
            }
            None => false,
        }
    }
}
