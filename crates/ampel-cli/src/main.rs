//! AMPEL360 identifier and dictionary CLI
//!
//! ## Commands
//!
//! - `id`: parse, convert and generate artifact identifiers
//! - `pbs` / `wbs`: parse and build breakdown identifiers
//! - `link`: check a PBS to WBS link file
//! - `dict`: export, query and hash token dictionaries

use ampel_ids::{
    create_pbs_id, create_wbs_id, ArtifactId, IdFormat, IdGenerator, LinkageRegistry,
    ParseOutcome, PbsId, RegistrySpan, SequenceKey, WbsId,
};
use ampel_tdms::{DictionaryRegistry, DictionaryType, DocumentFormat, TdmsConfig, TokenDictionary};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "ampel")]
#[command(author = "AMPEL360 Engineering")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AMPEL360 Q100 identifiers and token dictionaries", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Command output encoding
    #[arg(short, long, global = true, value_enum, default_value_t = Output::Text)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Artifact identifiers
    Id {
        #[command(subcommand)]
        action: IdAction,
    },

    /// Product Breakdown Structure identifiers
    Pbs {
        #[command(subcommand)]
        action: PbsAction,
    },

    /// Work Breakdown Structure identifiers
    Wbs {
        #[command(subcommand)]
        action: WbsAction,
    },

    /// PBS to WBS linkage
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Token dictionaries
    Dict {
        #[command(subcommand)]
        action: DictAction,
    },
}

#[derive(Subcommand)]
enum IdAction {
    /// Parse an identifier in any format and show its fields
    Parse {
        /// Compact, hyphenated or URN identifier
        id: String,
    },

    /// Re-encode an identifier in another format
    Convert {
        id: String,

        /// Target format
        #[arg(long, default_value = "compact")]
        to: IdFormat,
    },

    /// Allocate identifiers for one key
    Generate {
        /// Manufacturer serial number, e.g. MSN001
        #[arg(long)]
        msn: String,

        /// ATA chapter (00-98 or IN)
        #[arg(long)]
        ata: String,

        #[arg(long, default_value = "00")]
        section: String,

        #[arg(long, default_value = "00")]
        subject: String,

        /// Lifecycle phase code, e.g. LC02
        #[arg(long)]
        phase: String,

        /// Artifact type, e.g. REQ
        #[arg(long = "type")]
        artifact_type: String,

        /// Number of consecutive identifiers
        #[arg(short, long, default_value = "1", conflicts_with = "sequence")]
        count: u16,

        /// Use this sequence number instead of allocating
        #[arg(long)]
        sequence: Option<u16>,

        #[arg(long, default_value = "compact")]
        to: IdFormat,
    },
}

#[derive(Subcommand)]
enum PbsAction {
    /// Parse a PBS identifier
    Parse { id: String },

    /// Build a PBS identifier from its fields
    Create {
        #[arg(long)]
        axis: String,
        #[arg(long)]
        subdomain: String,
        #[arg(long)]
        ata: String,
        #[arg(long, default_value = "00")]
        section: String,
        #[arg(long, default_value = "00")]
        subject: String,
        #[arg(long)]
        item: String,
    },
}

#[derive(Subcommand)]
enum WbsAction {
    /// Parse a WBS identifier
    Parse { id: String },

    /// Build a WBS identifier from a lifecycle phase and hierarchy
    Create {
        /// Lifecycle phase code, e.g. LC04
        #[arg(long)]
        phase: String,
        /// Dot-separated hierarchy, e.g. 2.3.1
        #[arg(long)]
        hierarchy: String,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Link every pair in a YAML/JSON map of PBS id to WBS ids
    Check {
        file: PathBuf,

        /// Registry name used in log events and errors
        #[arg(long, default_value = "cli")]
        registry: String,
    },
}

#[derive(Subcommand)]
enum DictAction {
    /// Write the registry's dictionaries to a directory
    Export {
        /// Output directory (default: AMPEL_DICT_DIR or ./dictionaries)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Document format (default: AMPEL_DICT_FORMAT or yaml)
        #[arg(long)]
        format: Option<DocumentFormat>,
    },

    /// Expand a compact id
    Resolve {
        dict_type: DictionaryType,
        id: String,

        #[command(flatten)]
        source: DictSource,
    },

    /// Compact a value to its id
    Compact {
        dict_type: DictionaryType,
        value: String,

        #[command(flatten)]
        source: DictSource,
    },

    /// Show the content hash of one file or of every registered dictionary
    Hash {
        #[command(flatten)]
        source: DictSource,
    },

    /// List registered dictionaries
    List {
        #[command(flatten)]
        source: DictSource,
    },
}

#[derive(clap::Args)]
struct DictSource {
    /// Read dictionaries from this directory instead of AMPEL_DICT_DIR
    #[arg(long, conflicts_with = "file")]
    dir: Option<PathBuf>,

    /// Use a single dictionary file
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    ampel_ids::init_tracing(cli.json, level);

    let output = cli.output;
    match cli.command {
        Commands::Id { action } => match action {
            IdAction::Parse { id } => emit(output, render_id_parse(&id)?),
            IdAction::Convert { id, to } => {
                let parsed = parse_artifact(&id)?;
                println!("{}", parsed.to_format(to));
                Ok(())
            }
            IdAction::Generate {
                msn,
                ata,
                section,
                subject,
                phase,
                artifact_type,
                count,
                sequence,
                to,
            } => {
                let key = SequenceKey::new(&msn, &ata, &section, &subject, &phase, &artifact_type);
                for id in cmd_id_generate(&key, count, sequence)? {
                    println!("{}", id.to_format(to));
                }
                Ok(())
            }
        },
        Commands::Pbs { action } => match action {
            PbsAction::Parse { id } => emit(output, render_pbs_parse(&id)?),
            PbsAction::Create {
                axis,
                subdomain,
                ata,
                section,
                subject,
                item,
            } => {
                let id = create_pbs_id(&axis, &subdomain, &ata, &section, &subject, &item)
                    .context("Failed to build PBS ID")?;
                println!("{id}");
                Ok(())
            }
        },
        Commands::Wbs { action } => match action {
            WbsAction::Parse { id } => emit(output, render_wbs_parse(&id)?),
            WbsAction::Create { phase, hierarchy } => {
                let id = create_wbs_id(&phase, &hierarchy).context("Failed to build WBS ID")?;
                println!("{id}");
                Ok(())
            }
        },
        Commands::Link { action } => match action {
            LinkAction::Check { file, registry } => {
                let report = cmd_link_check(&file, &registry)?;
                emit(output, report.render()?)?;
                if !report.rejected.is_empty() {
                    bail!(
                        "{} of {} link(s) rejected",
                        report.rejected.len(),
                        report.pairs
                    );
                }
                Ok(())
            }
        },
        Commands::Dict { action } => cmd_dict(output, action),
    }
}

/// Rendered command result: a JSON value and its text form.
struct Rendered {
    json: serde_json::Value,
    text: String,
}

fn emit(output: Output, rendered: Rendered) -> Result<()> {
    match output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&rendered.json)?),
        Output::Text => println!("{}", rendered.text),
    }
    Ok(())
}

fn describe_outcome<T>(kind: &str, input: &str, outcome: &ParseOutcome<T>) -> String {
    match outcome {
        ParseOutcome::Parsed(_) => format!("{input} is a valid {kind}"),
        ParseOutcome::Malformed => format!("{input:?} does not have the shape of a {kind}"),
        ParseOutcome::Invalid(err) => format!("{input:?} is not a valid {kind}: {err}"),
    }
}

fn parse_artifact(input: &str) -> Result<ArtifactId> {
    match ampel_ids::check_identifier(input) {
        ParseOutcome::Parsed(id) => Ok(id),
        outcome => bail!(describe_outcome("artifact ID", input, &outcome)),
    }
}

#[derive(Serialize)]
struct ArtifactReport<'a> {
    format: IdFormat,
    #[serde(flatten)]
    id: &'a ArtifactId,
    category: &'static str,
    storage_root: &'static str,
    compact: String,
    hyphenated: String,
    urn: String,
}

fn render_id_parse(input: &str) -> Result<Rendered> {
    let id = parse_artifact(input)?;
    let format = IdFormat::detect(input).context("format detection disagrees with parser")?;
    let report = ArtifactReport {
        format,
        id: &id,
        category: id.phase_category().short_code(),
        storage_root: id.storage_root(),
        compact: id.to_compact(),
        hyphenated: id.to_hyphenated(),
        urn: id.to_urn(),
    };
    let text = format!(
        "Format:       {format}\n\
         MSN:          {}\n\
         ATA:          {}-{}-{}\n\
         Phase:        {} ({})\n\
         Type:         {}\n\
         Sequence:     {}\n\
         Category:     {}\n\
         Storage root: {}",
        id.serial_number(),
        id.ata_chapter(),
        id.section(),
        id.subject(),
        id.lifecycle_phase(),
        id.lifecycle_phase().title(),
        id.artifact_type(),
        id.sequence_str(),
        report.category,
        report.storage_root,
    );
    Ok(Rendered {
        json: serde_json::to_value(&report)?,
        text,
    })
}

fn cmd_id_generate(
    key: &SequenceKey,
    count: u16,
    sequence: Option<u16>,
) -> Result<Vec<ArtifactId>> {
    let _span = RegistrySpan::enter("cli");
    let mut ids = IdGenerator::named("cli");
    if sequence.is_some() {
        return Ok(vec![ids.generate(key, sequence)?]);
    }
    (0..count)
        .map(|_| ids.generate(key, None).map_err(anyhow::Error::from))
        .collect()
}

fn render_pbs_parse(input: &str) -> Result<Rendered> {
    let id = match PbsId::check(input) {
        ParseOutcome::Parsed(id) => id,
        outcome => bail!(describe_outcome("PBS ID", input, &outcome)),
    };
    let json = serde_json::json!({
        "axis": id.axis(),
        "subdomain": id.subdomain(),
        "ata_chapter": id.ata_chapter(),
        "section": id.section(),
        "subject": id.subject(),
        "item_name": id.item_name(),
        "ata_path": id.ata_path(),
        "novel_technology": id.is_novel_technology(),
    });
    let text = format!(
        "Axis:             {}\n\
         Subdomain:        {}\n\
         ATA:              {}\n\
         Item:             {}\n\
         Novel technology: {}",
        id.axis(),
        id.subdomain(),
        id.ata_path(),
        id.item_name(),
        if id.is_novel_technology() { "yes" } else { "no" },
    );
    Ok(Rendered { json, text })
}

fn render_wbs_parse(input: &str) -> Result<Rendered> {
    let id = match WbsId::check(input) {
        ParseOutcome::Parsed(id) => id,
        outcome => bail!(describe_outcome("WBS ID", input, &outcome)),
    };
    let phase = id.lifecycle_phase();
    let parent = id.parent().map(|p| p.to_string());
    let json = serde_json::json!({
        "phase_code": id.phase_code(),
        "hierarchy": id.hierarchy(),
        "level": id.level(),
        "parent": parent,
        "lifecycle_phase": phase,
    });
    let text = format!(
        "Phase:     {}\n\
         Hierarchy: {}\n\
         Level:     {}\n\
         Parent:    {}",
        match phase {
            Some(p) => format!("{} ({p}, {})", id.phase_code(), p.title()),
            None => format!("{} (cross-cutting)", id.phase_code()),
        },
        id.hierarchy(),
        id.level(),
        parent.as_deref().unwrap_or("-"),
    );
    Ok(Rendered { json, text })
}

#[derive(Debug, Serialize)]
struct RejectedLink {
    pbs: String,
    wbs: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct LinkReport {
    registry: String,
    pairs: usize,
    linked_pbs: usize,
    rejected: Vec<RejectedLink>,
}

impl LinkReport {
    fn render(&self) -> Result<Rendered> {
        let mut text = format!(
            "Registry {}: {} pair(s), {} PBS item(s) linked, {} rejected",
            self.registry,
            self.pairs,
            self.linked_pbs,
            self.rejected.len()
        );
        for r in &self.rejected {
            text.push_str(&format!("\n  - {} -> {}: {}", r.pbs, r.wbs, r.error));
        }
        Ok(Rendered {
            json: serde_json::to_value(self)?,
            text,
        })
    }
}

fn cmd_link_check(file: &Path, registry_name: &str) -> Result<LinkReport> {
    let format = DocumentFormat::from_path(file)
        .with_context(|| format!("Cannot tell link file format from {:?}", file))?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read link file: {:?}", file))?;
    let links: IndexMap<String, Vec<String>> = format
        .decode(&content)
        .with_context(|| format!("Invalid link map in {:?}", file))?;

    let _span = RegistrySpan::enter(registry_name);
    let mut registry = LinkageRegistry::new(registry_name);
    let mut report = LinkReport {
        registry: registry_name.to_string(),
        pairs: 0,
        linked_pbs: 0,
        rejected: Vec::new(),
    };
    for (pbs, targets) in &links {
        for wbs in targets {
            report.pairs += 1;
            if let Err(err) = registry.link(pbs, wbs) {
                report.rejected.push(RejectedLink {
                    pbs: pbs.clone(),
                    wbs: wbs.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
    report.linked_pbs = registry.len();
    info!(
        event = "link.check_finished",
        registry = %registry_name,
        pairs = report.pairs,
        rejected = report.rejected.len(),
    );
    Ok(report)
}

fn load_registry(dir: Option<&Path>) -> Result<DictionaryRegistry> {
    let mut config = TdmsConfig::from_env();
    if let Some(dir) = dir {
        config = config.with_dir(dir);
    }
    DictionaryRegistry::from_config(&config)
        .with_context(|| format!("Failed to load dictionaries from {:?}", config.dict_dir()))
}

fn load_dictionary(path: &Path) -> Result<TokenDictionary> {
    TokenDictionary::load(path).with_context(|| format!("Failed to load dictionary: {:?}", path))
}

/// A single file acts as a one-dictionary registry.
fn open_source(source: &DictSource) -> Result<DictionaryRegistry> {
    match &source.file {
        Some(path) => {
            let mut registry = DictionaryRegistry::new();
            registry.register(load_dictionary(path)?);
            Ok(registry)
        }
        None => load_registry(source.dir.as_deref()),
    }
}

fn cmd_dict(output: Output, action: DictAction) -> Result<()> {
    match action {
        DictAction::Export { dir, format } => {
            let mut config = TdmsConfig::from_env();
            if let Some(dir) = dir {
                config = config.with_dir(dir);
            }
            if let Some(format) = format {
                config = config.with_format(format);
            }
            let written = DictionaryRegistry::with_defaults()
                .save_all(config.dict_dir(), config.format)
                .with_context(|| {
                    format!("Failed to export dictionaries to {:?}", config.dict_dir())
                })?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        DictAction::Resolve {
            dict_type,
            id,
            source,
        } => {
            let registry = open_source(&source)?;
            println!("{}", registry.resolve(&id, dict_type)?);
            Ok(())
        }
        DictAction::Compact {
            dict_type,
            value,
            source,
        } => {
            let registry = open_source(&source)?;
            println!("{}", registry.compact(&value, dict_type)?);
            Ok(())
        }
        DictAction::Hash { source } => emit(output, render_dict_hashes(&open_source(&source)?)?),
        DictAction::List { source } => emit(output, render_dict_list(&open_source(&source)?)),
    }
}

fn render_dict_hashes(registry: &DictionaryRegistry) -> Result<Rendered> {
    let mut hashes = IndexMap::new();
    for dict in registry.iter() {
        hashes.insert(dict.dict_type().to_string(), dict.compute_hash()?);
    }
    let text = hashes
        .iter()
        .map(|(t, h)| format!("{h}  {t}"))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Rendered {
        json: serde_json::to_value(&hashes)?,
        text,
    })
}

fn render_dict_list(registry: &DictionaryRegistry) -> Rendered {
    let rows: Vec<serde_json::Value> = registry
        .iter()
        .map(|d| {
            serde_json::json!({
                "type": d.dict_type(),
                "name": d.name(),
                "version": d.version(),
                "entries": d.len(),
            })
        })
        .collect();
    let text = registry
        .iter()
        .map(|d| {
            format!(
                "{:<12} {:<20} v{:<8} {} entries",
                d.dict_type(),
                d.name(),
                d.version(),
                d.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Rendered {
        json: serde_json::Value::Array(rows),
        text,
    }
}
