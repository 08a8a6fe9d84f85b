//! One "generate flashcards" invocation
//!
//! Marker presence is checked on the whole document, link resolution and
//! generation run on the active text (selection or whole document), and the
//! result is an [`Insertion`] the caller appends. Nothing is produced unless
//! generation succeeds, so a failed run never leaves a partial edit.

use tracing::{debug, info};

use crate::document::{Document, LineRange};
use crate::error::PipelineResult;
use crate::links::LinkResolver;
use crate::markers::{assemble_block, MarkerState};
use crate::traits::{FlashcardGenerator, NoteLookup};

/// Text to append at the end of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// The block to append, markers included
    pub block: String,
    /// Markers found in the document before insertion
    pub markers: MarkerState,
    /// Number of flashcard lines in the block
    pub cards: usize,
}

impl Insertion {
    /// The document text with the block appended; existing content is kept as is
    pub fn apply(&self, document: &Document) -> String {
        let mut updated = String::with_capacity(document.text().len() + self.block.len());
        updated.push_str(document.text());
        updated.push_str(&self.block);
        updated
    }
}

/// Link resolution followed by generation and output assembly
pub struct FlashcardPipeline<L, G> {
    resolver: LinkResolver<L>,
    generator: G,
}

impl<L, G> FlashcardPipeline<L, G>
where
    L: NoteLookup,
    G: FlashcardGenerator,
{
    /// Create a pipeline over a note store and a generator
    pub fn new(lookup: L, generator: G) -> Self {
        Self {
            resolver: LinkResolver::new(lookup),
            generator,
        }
    }

    /// Run once for `document`, optionally restricted to `selection`
    pub async fn run(
        &self,
        document: &Document,
        selection: Option<LineRange>,
    ) -> PipelineResult<Insertion> {
        let markers = MarkerState::detect(document.text());
        let active = document.active_text(selection)?;
        debug!(
            selection = ?selection.map(|s| s.to_string()),
            chars = active.len(),
            ?markers,
            "starting flashcard generation"
        );

        let expanded = self.resolver.expand(active).await;
        let generated = self.generator.generate(&expanded).await?;

        let block = assemble_block(&generated, markers);
        let cards = generated.lines().filter(|l| !l.trim().is_empty()).count();
        info!(cards, "flashcards generated");

        Ok(Insertion {
            block,
            markers,
            cards,
        })
    }
}
