//! Identifier generation.

use uuid::Uuid;

use labook_core::ports::IdGenerator;

/// Random UUID v4 identifiers, rendered in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
