//! Shared utilities for integration tests.

pub mod harness;

/// A stored `NOTES` document with two notes, the second tagged with a tag
/// that is not in [`SAMPLE_TAGS`].
pub const SAMPLE_NOTES: &str = r#"[{"id":"n1","title":"Plan","markdown":"Do X","tagIds":["t1"]},{"id":"n2","title":"Groceries","markdown":"- milk","tagIds":["t2","gone"]}]"#;

/// A stored `TAGS` document matching [`SAMPLE_NOTES`].
pub const SAMPLE_TAGS: &str = r#"[{"id":"t1","label":"work"},{"id":"t2","label":"home"}]"#;
