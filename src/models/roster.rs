use super::patron::{Patron, PatronId, PatronPatch};

/// Ordered roster of patrons.
/// Order is insertion order (as loaded, then as appended), never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    patrons: Vec<Patron>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Roster {
            patrons: Vec::new(),
        }
    }

    /// Replace the whole roster with freshly fetched records
    pub fn load_all(&mut self, records: Vec<Patron>) {
        log::debug!(
            "Replacing roster of {} with {} fetched patrons",
            self.patrons.len(),
            records.len()
        );
        self.patrons = records;
    }

    /// Add a record to the end.
    /// A record whose id is already present replaces the existing one in place.
    pub fn append(&mut self, record: Patron) {
        if let Some(existing) = self.patrons.iter_mut().find(|p| p.id == record.id) {
            log::warn!(
                "Patron {} already in roster, replacing instead of appending",
                record.id
            );
            *existing = record;
            return;
        }
        self.patrons.push(record);
    }

    /// Remove the record with the given id. Returns false if it was absent.
    pub fn remove_by_id(&mut self, id: PatronId) -> bool {
        if let Some(pos) = self.patrons.iter().position(|p| p.id == id) {
            self.patrons.remove(pos);
            true
        } else {
            false
        }
    }

    /// Merge fields into the record with the given id. Returns false if it was absent.
    pub fn patch_by_id(&mut self, id: PatronId, patch: &PatronPatch) -> bool {
        match self.patrons.iter_mut().find(|p| p.id == id) {
            Some(patron) => {
                patron.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Get a patron by id
    pub fn get(&self, id: PatronId) -> Option<&Patron> {
        self.patrons.iter().find(|p| p.id == id)
    }

    /// All patrons in roster order
    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    /// Patron ids in roster order
    pub fn ids(&self) -> Vec<PatronId> {
        self.patrons.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }
}
