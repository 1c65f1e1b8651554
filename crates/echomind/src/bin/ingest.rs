//! Bulk ingestion into the EchoMind store
//!
//! Run with: cargo run -p echomind --features cli --bin echomind-ingest -- [DIR]

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

use echomind::ingestion::files::{discover_text_files, source_name_for};
use echomind::{EchoConfig, SourceType, WellnessEngine};

struct Sample {
    text: &'static str,
    source_name: &'static str,
    source_type: SourceType,
    source_url: &'static str,
    topics: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        text: include_str!("../../samples/anxiety.md"),
        source_name: "University Mental Health Guide",
        source_type: SourceType::University,
        source_url: "https://counseling.university.edu/anxiety",
        topics: "anxiety, coping strategies, counseling services",
    },
    Sample {
        text: include_str!("../../samples/depression.md"),
        source_name: "NIMH Depression Guide",
        source_type: SourceType::Government,
        source_url: "https://www.nimh.nih.gov/health/topics/depression",
        topics: "depression, professional counseling",
    },
    Sample {
        text: include_str!("../../samples/stress.md"),
        source_name: "Student Wellness Center",
        source_type: SourceType::University,
        source_url: "https://wellness.university.edu/stress-management",
        topics: "stress management, self-care techniques, academic stress",
    },
    Sample {
        text: include_str!("../../samples/crisis.md"),
        source_name: "National Crisis Resources",
        source_type: SourceType::Government,
        source_url: "https://988lifeline.org",
        topics: "crisis support, emergency contacts",
    },
];

#[derive(Parser, Debug)]
#[command(name = "echomind-ingest", version, about = "Ingest wellness documents into the EchoMind store")]
struct Args {
    /// Directory searched recursively for .txt/.md files; the built-in samples are used when omitted
    dir: Option<PathBuf>,

    /// Source type recorded for files read from DIR
    #[arg(long, default_value = "university")]
    source_type: String,

    /// TOML configuration file (overrides ECHOMIND_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON snapshot to write to (overrides the configured storage path)
    #[arg(long)]
    store: Option<PathBuf>,
}

struct Document {
    text: String,
    source_name: String,
    source_type: SourceType,
    source_url: Option<String>,
    metadata: Map<String, Value>,
}

fn base_metadata() -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("language".to_string(), json!("en"));
    metadata
}

fn sample_documents() -> Vec<Document> {
    SAMPLES
        .iter()
        .map(|sample| {
            let mut metadata = base_metadata();
            metadata.insert("topics".to_string(), json!(sample.topics));
            Document {
                text: sample.text.to_string(),
                source_name: sample.source_name.to_string(),
                source_type: sample.source_type,
                source_url: Some(sample.source_url.to_string()),
                metadata,
            }
        })
        .collect()
}

fn directory_documents(dir: &Path, source_type: SourceType) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    discover_text_files(dir)
        .into_iter()
        .map(|path| {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(Document {
                text,
                source_name: source_name_for(&path),
                source_type,
                source_url: None,
                metadata: base_metadata(),
            })
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echomind=warn".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EchoConfig::from_file(path)?,
        None => EchoConfig::load()?,
    };
    if let Some(store) = args.store {
        config.storage.path = Some(store);
    }
    if config.storage.path.is_none() {
        println!("No storage path configured; documents will not outlive this process.");
    }

    let documents = match &args.dir {
        Some(dir) => {
            let Some(source_type) = SourceType::parse(&args.source_type) else {
                bail!("unknown source type '{}'", args.source_type);
            };
            directory_documents(dir, source_type)?
        }
        None => sample_documents(),
    };

    let engine = WellnessEngine::from_config(&config)?;
    let total = documents.len();
    println!("Ingesting {} documents...\n", total);

    let mut failures = 0usize;
    for (idx, doc) in documents.into_iter().enumerate() {
        println!("[{}/{}] {}", idx + 1, total, doc.source_name);
        let result = engine
            .ingest_document(
                &doc.text,
                &doc.source_name,
                doc.source_type,
                doc.source_url.as_deref(),
                doc.metadata,
            )
            .await;

        if result.is_success() {
            println!("    ok: {} chunks", result.chunks_created);
        } else {
            failures += 1;
            println!("    error: {}", result.error.unwrap_or_default());
        }
    }

    let stats = engine.collection_stats();
    println!("\nTotal chunks in store: {}", stats.total_documents);
    println!("Collection status: {}", stats.status.as_str());

    if failures > 0 {
        bail!("{} of {} documents failed to ingest", failures, total);
    }
    Ok(())
}
