use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use flashcards_config::{resolve_api_key, ConfigFile};
use flashcards_core::{Document, FlashcardPipeline, FsKiln, LineRange};
use flashcards_llm::LlmFlashcardGenerator;

use crate::output;

/// Arguments of `flashcards generate`
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Note to read and append to
    pub note: PathBuf,
    /// Link resolution root
    pub kiln: Option<PathBuf>,
    /// Restrict the input to these lines
    pub lines: Option<LineRange>,
    /// Print instead of writing
    pub dry_run: bool,
}

/// Execute generate command
pub async fn execute(config_file: &ConfigFile, args: GenerateArgs) -> Result<()> {
    let config = config_file.load().context("Failed to load settings")?;
    let (api_key, source) = resolve_api_key(&config)?;
    debug!(%source, model = %config.model, "resolved API key");

    let text = tokio::fs::read_to_string(&args.note)
        .await
        .with_context(|| format!("Failed to read note {}", args.note.display()))?;
    let document = Document::new(text);

    let kiln_root = args.kiln.clone().unwrap_or_else(|| note_directory(&args.note));
    let kiln = FsKiln::open(&kiln_root)
        .with_context(|| format!("Failed to open kiln at {}", kiln_root.display()))?;

    let generator = LlmFlashcardGenerator::openai(api_key, &config);
    let pipeline = FlashcardPipeline::new(kiln, generator);

    output::notice(output::GENERATING);
    let insertion = match pipeline.run(&document, args.lines).await {
        Ok(insertion) => insertion,
        Err(e) => {
            error!(error = %e, note = %args.note.display(), "flashcard generation failed");
            return Err(anyhow::Error::new(e).context(output::GENERATION_FAILED));
        }
    };

    if args.dry_run {
        print!("{}", insertion.block);
        println!();
        return Ok(());
    }

    append(&args.note, &insertion.block).await?;
    info!(cards = insertion.cards, note = %args.note.display(), "note updated");
    output::success(&format!("{} ({} new)", output::GENERATED, insertion.cards));
    Ok(())
}

/// Directory containing `note`; `.` for a bare file name
fn note_directory(note: &Path) -> PathBuf {
    match note.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Append `block` to the end of the note without touching existing content
async fn append(note: &Path, block: &str) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .open(note)
        .await
        .with_context(|| format!("Failed to open {} for writing", note.display()))?;
    file.write_all(block.as_bytes())
        .await
        .with_context(|| format!("Failed to write to {}", note.display()))?;
    file.flush().await?;
    Ok(())
}
