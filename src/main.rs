use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use a2r_translator::config::TranslatorConfig;
use a2r_translator::export::{export_csv, export_json, write_graph};
use a2r_translator::input::{load_config, load_graph, load_schema, load_stories};
use a2r_translator::locale::Locale;
use a2r_translator::schema::SchemaDocument;
use a2r_translator::walker::Translator;

#[derive(Parser, Debug)]
#[command(name = "a2r")]
#[command(about = "Archicad to Revit translator - reshape an exchanged object graph for Revit")]
#[command(version)]
struct Args {
    /// Path to the retrieved object graph (JSON)
    #[arg(required = true)]
    graph: PathBuf,

    /// Story descriptors of the project (JSON)
    #[arg(long, value_name = "FILE")]
    stories: PathBuf,

    /// Schema template document (defaults to the bundled one)
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Translator configuration (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Language of the exported element properties (en, ua)
    #[arg(long)]
    locale: Option<Locale>,

    /// Only translate these categories
    #[arg(long, value_delimiter = ',')]
    categories: Option<Vec<String>>,

    /// Keep curved slab and roof segments in exported units
    #[arg(long)]
    no_curved_unit_fix: bool,

    /// Abort on the first element that fails to translate
    #[arg(long)]
    strict: bool,

    /// Write the translated graph here instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a CSV translation report
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

impl Args {
    fn translator_config(&self) -> Result<TranslatorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => TranslatorConfig::default(),
        };
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(categories) = &self.categories {
            config.categories = Some(categories.clone());
        }
        if self.no_curved_unit_fix {
            config.curved_unit_fix = false;
        }
        if self.strict {
            config.strict = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = args.translator_config()?;
    let schema = match &args.schema {
        Some(path) => load_schema(path)?,
        None => SchemaDocument::bundled()?,
    };
    let stories = load_stories(&args.stories)?;
    let mut graph = load_graph(&args.graph)?;

    let translator = Translator::new(schema, &stories, config)?;
    let report = translator.translate(&mut graph)?;

    match &args.output {
        Some(path) => {
            export_json(&graph, path)?;
            tracing::info!(path = %path.display(), "translated graph written");
        }
        None => write_graph(&graph, std::io::stdout().lock())?,
    }

    if let Some(path) = &args.report {
        export_csv(&report, path)?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}
