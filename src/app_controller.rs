use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::script_embedder::{EmbedReport, ScriptEmbedder};
use crate::svg_document::SvgDocument;

// @module: Application controller for standalone SVG generation

/// Result of converting one modular artwork
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Where the standalone artwork was written
    pub output_path: PathBuf,
    /// What happened to its script tags
    pub embed: EmbedReport,
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Run on the configured input directory
    pub fn run_configured(&self) -> Result<RunSummary> {
        let input = self.config.input_dir.clone();
        self.run(&input)
    }

    /// Convert a single SVG file or every SVG file of a directory
    pub fn run(&self, input: &Path) -> Result<RunSummary> {
        if FileManager::dir_exists(input) {
            self.run_folder(input)
        } else if FileManager::file_exists(input) {
            if !FileManager::has_extension(input, "svg") {
                return Err(anyhow!("Input file is not an SVG file: {:?}", input));
            }
            self.create_standalone(input)?;
            Ok(RunSummary { processed: 1, failed: 0 })
        } else {
            Err(anyhow!("Input path does not exist: {:?}", input))
        }
    }

    /// Convert every SVG file directly inside `input_dir`
    pub fn run_folder(&self, input_dir: &Path) -> Result<RunSummary> {
        let files = FileManager::find_files(input_dir, "svg")?;
        let mut summary = RunSummary::default();

        if files.is_empty() {
            warn!("No SVG files found in directory: {:?}", input_dir);
            return Ok(summary);
        }

        info!("Generating {} standalone artwork(s) from {:?}", files.len(), input_dir);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );

        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            match progress.suspend(|| self.create_standalone(file)) {
                Ok(_) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        info!("Finished processing {} files ({} failed)", summary.processed, summary.failed);

        Ok(summary)
    }

    /// Create the standalone counterpart of one modular artwork.
    ///
    /// The artwork is copied first, then patched in place; scripts are looked
    /// up next to the input file. A copy whose scripts can't be embedded is
    /// removed again.
    pub fn create_standalone(&self, input_file: &Path) -> Result<FileReport> {
        let output_name = FileManager::standalone_file_name(input_file, &self.config.output_suffix);
        let output_path = self.config.output_dir.join(&output_name);
        let source_dir = input_file.parent().unwrap_or(Path::new(".")).to_path_buf();

        info!(
            "{} to {}:",
            input_file.file_name().unwrap_or_default().to_string_lossy(),
            output_name
        );

        FileManager::copy_file(input_file, &output_path)?;

        let text = FileManager::read_to_string(&output_path)?;
        let mut document = SvgDocument::parse(&text);
        debug!("Loaded {} lines from {:?}", document.len(), output_path);

        let embedder = ScriptEmbedder::new(source_dir, output_name);
        let embed = match embedder.embed_all(&mut document) {
            Ok(embed) => embed,
            Err(e) => {
                if let Err(cleanup) = FileManager::remove_file(&output_path) {
                    warn!("Could not remove incomplete output {:?}: {:#}", output_path, cleanup);
                }
                return Err(e).with_context(|| format!("Failed to embed scripts into {:?}", output_path));
            }
        };

        FileManager::write_to_file(&output_path, &document.to_text())?;
        debug!(
            "Wrote {:?}: {} script(s) embedded, {} placeholder(s), scan ended with {:?}",
            output_path,
            embed.embedded.len(),
            embed.stubbed,
            embed.end
        );

        Ok(FileReport { output_path, embed })
    }
}
