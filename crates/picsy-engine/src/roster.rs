//! Participant roster with id-to-index resolution.

use std::collections::HashMap;

use picsy_core::error::RosterError;
use picsy_core::types::Participant;

/// Ordered, validated participant list.
///
/// Matrix positions are assigned in roster order at construction and stay
/// stable for the engine's lifetime; the roster only changes through a full
/// engine reinitialization.
#[derive(Clone, Debug)]
pub struct Roster {
    participants: Vec<Participant>,
    index_by_id: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster, rejecting empty ids, empty labels, and duplicates.
    pub fn new(participants: Vec<Participant>) -> Result<Self, RosterError> {
        let mut index_by_id = HashMap::with_capacity(participants.len());
        for (index, participant) in participants.iter().enumerate() {
            if participant.id.is_empty() {
                return Err(RosterError::EmptyId);
            }
            if participant.label.is_empty() {
                return Err(RosterError::EmptyLabel(participant.id.clone()));
            }
            if index_by_id.insert(participant.id.clone(), index).is_some() {
                return Err(RosterError::DuplicateId(participant.id.clone()));
            }
        }
        Ok(Self { participants, index_by_id })
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Matrix index for a participant id, if registered.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Participant at a matrix index. Panics when out of range; indices come
    /// from [`index_of`](Self::index_of) and are valid by construction.
    pub fn get(&self, index: usize) -> &Participant {
        &self.participants[index]
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Participant> {
        vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob"),
            Participant::new("c", "Charlie"),
        ]
    }

    #[test]
    fn assigns_indices_in_order() {
        let roster = Roster::new(abc()).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.index_of("a"), Some(0));
        assert_eq!(roster.index_of("c"), Some(2));
        assert_eq!(roster.get(1).label, "Bob");
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let roster = Roster::new(abc()).unwrap();
        assert_eq!(roster.index_of("zed"), None);
    }

    #[test]
    fn empty_roster_allowed() {
        let roster = Roster::new(vec![]).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn rejects_empty_id() {
        let err = Roster::new(vec![Participant::new("", "Nobody")]).unwrap_err();
        assert_eq!(err, RosterError::EmptyId);
    }

    #[test]
    fn rejects_empty_label() {
        let err = Roster::new(vec![Participant::new("a", "")]).unwrap_err();
        assert_eq!(err, RosterError::EmptyLabel("a".into()));
    }

    #[test]
    fn rejects_duplicate_id() {
        let mut list = abc();
        list.push(Participant::new("a", "Alice again"));
        let err = Roster::new(list).unwrap_err();
        assert_eq!(err, RosterError::DuplicateId("a".into()));
    }
}
