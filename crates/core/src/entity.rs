//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Position of the entity with `id` inside an ordered collection.
pub fn position_of<E: Entity>(items: &[E], id: E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget(u32);

    impl Entity for Widget {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn position_of_finds_first_match_in_order() {
        let items = vec![Widget(7), Widget(3), Widget(9)];
        assert_eq!(position_of(&items, 3), Some(1));
        assert_eq!(position_of(&items, 42), None);
    }
}
