//! Identifier generation for notes and tags.

use ulid::Ulid;

/// Produces globally unique string identifiers.
///
/// Ids are opaque to the rest of the crate: stored data may contain ids
/// produced by any generator, and nothing parses them.
pub trait IdGenerator {
    fn new_id(&mut self) -> String;
}

/// Generates ULID strings.
///
/// ULIDs are 26-character Crockford Base32 strings that sort by creation
/// time, which keeps id prefixes short and meaningful on the command line.
///
/// # Examples
///
/// ```
/// use tagnote::domain::{IdGenerator, UlidGenerator};
///
/// let mut ids = UlidGenerator;
/// let id = ids.new_id();
/// assert_eq!(id.len(), 26);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn new_id(&mut self) -> String {
        Ulid::new().to_string()
    }
}

/// Deterministic generator yielding `prefix-1`, `prefix-2`, ...
///
/// Useful for fixtures and tests where ids must be predictable.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn new_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn new_id(&mut self) -> String {
        (**self).new_id()
    }
}
