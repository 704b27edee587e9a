use std::collections::HashMap;

use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies an amount already normalised to the home currency.
pub trait HomeAmount {
    fn home_amount(&self) -> f64;
}

/// Associates an entity with the category it is booked against.
pub trait BelongsToCategory {
    fn category_id(&self) -> Uuid;
}

/// Maps each entity id to its display name.
pub fn name_index<T: Identifiable + NamedEntity>(items: &[T]) -> HashMap<Uuid, &str> {
    items.iter().map(|item| (item.id(), item.name())).collect()
}
