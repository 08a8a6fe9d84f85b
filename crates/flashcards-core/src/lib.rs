//! # Flashcards Core
//!
//! Text-transformation core of flashcards-llm.
//!
//! ## Modules
//!
//! - [`links`]: expands `![[note]]` / `![[note#heading]]` transclusions into quoted content
//! - [`outline`]: heading outline and section spans used to resolve subpaths
//! - [`kiln`]: note stores (filesystem and in-memory) implementing [`NoteLookup`]
//! - [`markers`]: `#flashcards` tag and generated-section conventions, output assembly
//! - [`pipeline`]: one "generate flashcards" invocation from document to insertion
//!
//! Network access is not part of this crate. The generator is injected through the
//! [`FlashcardGenerator`] trait; `flashcards-llm` provides the HTTP-backed implementation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod kiln;
pub mod links;
pub mod markers;
pub mod outline;
pub mod pipeline;
pub mod traits;

pub use document::{Document, LineRange};
pub use error::{
    GenerationError, GenerationResult, KilnError, KilnResult, PipelineError, PipelineResult,
};
pub use kiln::{FsKiln, MemoryKiln};
pub use links::{LinkResolver, Transclusion};
pub use markers::{MarkerState, FLASHCARDS_TAG, GENERATED_HEADER};
pub use outline::{Heading, SectionSpan};
pub use pipeline::{FlashcardPipeline, Insertion};
pub use traits::{FlashcardGenerator, NoteHandle, NoteLocation, NoteLookup};
