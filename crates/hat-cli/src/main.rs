//! h-at CLI - Command-line interface
//!
//! Usage:
//!   hat extract notes/turing.txt --wiki "Alan Turing"
//!   hat extract --annotations annotated.json --output records.json
//!   hat evaluate --predicted records.json --gold gold.json

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hat_core::{AppConfig, Annotator, DocumentResult, LoggingConfig};
use hat_extractor::{
    evaluate_documents, HttpAnnotator, Pipeline, PipelineError, PrecomputedAnnotator,
    TemplateEngine,
};
use hat_source::{FileSource, WikipediaSource};

#[derive(Parser)]
#[command(name = "hat")]
#[command(about = "Template-filling information extraction")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); HAT_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract template records from documents
    Extract {
        /// Local text or markdown files
        files: Vec<String>,

        /// Wikipedia article titles
        #[arg(long = "wiki", value_name = "TITLE")]
        wiki: Vec<String>,

        /// Precomputed annotation files used instead of the annotation service
        #[arg(long = "annotations", value_name = "JSON")]
        annotations: Vec<PathBuf>,

        /// Annotation service endpoint
        #[arg(long, value_name = "URL")]
        annotator_url: Option<String>,

        /// Write results here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Evaluate sentences on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// Score extracted records against a gold standard
    Evaluate {
        /// Extraction results (JSON)
        #[arg(long)]
        predicted: PathBuf,

        /// Gold standard results (JSON)
        #[arg(long)]
        gold: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    init_logging(&config.logging);

    match cli.command {
        Commands::Extract {
            files,
            wiki,
            annotations,
            annotator_url,
            output,
            sequential,
        } => {
            let mut config = config;
            if let Some(url) = annotator_url {
                config.annotator.url = url;
            }
            if sequential {
                config.engine.parallel = false;
            }

            let results = extract(&config, files, wiki, &annotations).await?;
            write_json(&results, output.as_deref())?;
        }
        Commands::Evaluate {
            predicted,
            gold,
            json,
        } => {
            let predicted = read_results(&predicted)?;
            let gold = read_results(&gold)?;

            let report = evaluate_documents(&predicted, &gold);
            if json {
                write_json(&report, None)?;
            } else {
                println!("{}", report.summary());
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.level;
        format!("hat={level},hat_core={level},hat_source={level},hat_extractor={level}").into()
    });

    // Records go to stdout, logs to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn extract(
    config: &AppConfig,
    files: Vec<String>,
    wiki: Vec<String>,
    annotation_files: &[PathBuf],
) -> anyhow::Result<Vec<DocumentResult>> {
    let engine = Arc::new(TemplateEngine::from_config(&config.engine));
    info!(templates = ?engine.kinds(), "Engine ready");

    let precomputed = load_annotations(annotation_files)?;

    // Annotations alone: run the engine over every stored document
    if files.is_empty() && wiki.is_empty() {
        let Some(store) = precomputed else {
            bail!("Nothing to extract: pass files, --wiki titles or --annotations");
        };
        return Ok(store
            .titles()
            .into_iter()
            .filter_map(|title| store.get(title))
            .map(|doc| engine.run(doc))
            .collect());
    }

    let annotator: Arc<dyn Annotator> = match precomputed {
        Some(store) => Arc::new(store),
        None => Arc::new(HttpAnnotator::from_config(&config.annotator)?),
    };

    let concurrency = config.source.concurrency;
    let mut results = Vec::new();
    let mut failed = 0;

    if !files.is_empty() {
        let source = Arc::new(FileSource::new());
        let pipeline = Pipeline::new(source, annotator.clone(), engine.clone());
        failed += collect(pipeline.process_batch(files, concurrency).await, &mut results);
    }

    if !wiki.is_empty() {
        let source = WikipediaSource::from_config(&config.source)?;
        let pipeline = Pipeline::new(Arc::new(source), annotator, engine);
        failed += collect(pipeline.process_batch(wiki, concurrency).await, &mut results);
    }

    if results.is_empty() && failed > 0 {
        bail!("All {failed} documents failed");
    }
    if failed > 0 {
        warn!(failed, succeeded = results.len(), "Some documents were skipped");
    }

    Ok(results)
}

/// Keep successes, count failures
fn collect(
    batch: Vec<(String, Result<DocumentResult, PipelineError>)>,
    results: &mut Vec<DocumentResult>,
) -> usize {
    let mut failed = 0;
    for (_, result) in batch {
        match result {
            Ok(doc) => results.push(doc),
            Err(_) => failed += 1,
        }
    }
    failed
}

fn load_annotations(paths: &[PathBuf]) -> anyhow::Result<Option<PrecomputedAnnotator>> {
    if paths.is_empty() {
        return Ok(None);
    }

    let mut store = PrecomputedAnnotator::new();
    for path in paths {
        store.extend(PrecomputedAnnotator::from_json_file(path)?);
    }
    Ok(Some(store))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResultsFile {
    Many(Vec<DocumentResult>),
    One(DocumentResult),
}

fn read_results(path: &Path) -> anyhow::Result<Vec<DocumentResult>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: ResultsFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(match parsed {
        ResultsFile::Many(results) => results,
        ResultsFile::One(result) => vec![result],
    })
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote results");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hat_core::{AnnotatedDocument, ExtractionRecord, TemplateKind};

    #[test]
    fn test_cli_parses_extract() {
        let cli = Cli::parse_from([
            "hat",
            "extract",
            "a.txt",
            "b.md",
            "--wiki",
            "Alan Turing",
            "--annotations",
            "ann.json",
            "--sequential",
        ]);

        match cli.command {
            Commands::Extract {
                files,
                wiki,
                annotations,
                sequential,
                ..
            } => {
                assert_eq!(files, vec!["a.txt", "b.md"]);
                assert_eq!(wiki, vec!["Alan Turing"]);
                assert_eq!(annotations, vec![PathBuf::from("ann.json")]);
                assert!(sequential);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_read_results_single_or_many() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = DocumentResult::new("Disney");
        doc.records.push(ExtractionRecord::new(
            TemplateKind::Acquire,
            0,
            "Disney acquired Pixar in 2006.",
            ["Disney".into(), "Pixar".into(), "2006".into()],
        ));

        let single = dir.path().join("single.json");
        std::fs::write(&single, serde_json::to_string(&doc).unwrap()).unwrap();
        let many = dir.path().join("many.json");
        std::fs::write(&many, serde_json::to_string(&vec![doc.clone(), doc]).unwrap()).unwrap();

        assert_eq!(read_results(&single).unwrap().len(), 1);
        assert_eq!(read_results(&many).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_extract_from_annotations_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ann.json");
        let docs = vec![
            AnnotatedDocument::new("b", Vec::new()),
            AnnotatedDocument::new("a", Vec::new()),
        ];
        std::fs::write(&path, serde_json::to_string(&docs).unwrap()).unwrap();

        let results = extract(&AppConfig::default(), Vec::new(), Vec::new(), &[path])
            .await
            .unwrap();
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_extract_requires_input() {
        let err = extract(&AppConfig::default(), Vec::new(), Vec::new(), &[]).await;
        assert!(err.is_err());
    }
}
