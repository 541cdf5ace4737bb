//! Identity generation for nodes and edges.

use uuid::Uuid;

use crate::domain::Identity;

/// Source of fresh identities.
///
/// Implementations must never return the same value twice and must not
/// collide with identities already present in the tree.
pub trait IdentityGenerator {
    fn next_id(&mut self) -> Identity;
}

/// Random v4 UUIDs (122 random bits).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdentityGenerator for UuidGenerator {
    fn next_id(&mut self) -> Identity {
        Identity::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn given_uuid_generator_when_drawing_many_ids_then_all_are_distinct() {
        let mut ids = UuidGenerator;
        let drawn: HashSet<Identity> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(drawn.len(), 1000);
    }

    #[test]
    fn given_uuid_generator_when_drawing_id_then_it_parses_as_uuid() {
        let id = UuidGenerator.next_id();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }
}
