//! Core types: Tag, RawNote, HydratedNote, id generation and derivation

mod filter;
mod hydrate;
mod id;
mod note;
mod tag;

pub use filter::NoteFilter;
pub use hydrate::{derive_hydrated, hydrate_note};
pub use id::{IdGenerator, SequentialIdGenerator, UlidGenerator};
pub use note::{HydratedNote, NoteData, RawNote};
pub use tag::Tag;
