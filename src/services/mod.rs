pub mod assembler;
pub mod catalog;
pub mod course_service;
pub mod dispatch;
pub mod sequencer;

pub use assembler::assemble_course;
pub use course_service::{AccessPolicy, CourseLoader, CourseService};
pub use dispatch::{ContentRenderer, ContentView, TextRenderer, render};
pub use sequencer::{MaterialCursor, MaterialSequence, SequenceEntry};
