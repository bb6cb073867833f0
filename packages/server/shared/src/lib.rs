pub mod dto;
pub mod notes;

pub use notes::{Clock, FixedClock, NoteCalculator, SystemClock, FULL_NOTE, MIN_NOTE};
