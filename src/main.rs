//! formfill CLI: fill PDF forms with AI-generated synthetic test data.

use std::path::PathBuf;

use clap::Parser;
use miette::Result;

use formfill::classify::classify_field;
use formfill::config::Config;
use formfill::error::FormfillError;
use formfill::form::{self, FieldValues};
use formfill::llm::ChatClient;
use formfill::synthesize::synthesize_value;

#[derive(Parser)]
#[command(
    name = "formfill",
    version,
    about = "Fill a PDF form with synthetic data using AI field detection and generation"
)]
struct Cli {
    /// Path to the fillable PDF form.
    #[arg(long)]
    input_file: PathBuf,

    /// Prefix for the output PDF files.
    #[arg(long, default_value = "filled_document")]
    output_prefix: String,

    /// Number of filled documents to generate.
    #[arg(long, default_value = "1")]
    output_number: u32,

    /// Path to the service configuration file.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run(cli)?;
    Ok(())
}

fn run(cli: Cli) -> std::result::Result<(), FormfillError> {
    let config = Config::load(&cli.config)?;
    let client = ChatClient::new(config.chat_config());
    println!("Using model: {}", client.model());

    if !cli.input_file.exists() {
        return Err(FormfillError::InputNotFound {
            path: cli.input_file.display().to_string(),
        });
    }

    println!("Reading fields from '{}'...", cli.input_file.display());
    let fields = form::read_fields(&cli.input_file)?;
    if fields.is_empty() {
        println!("No fields to fill in the provided PDF.");
        return Ok(());
    }

    println!(
        "Found {} fields. Detecting field types and generating data...",
        fields.len()
    );

    for i in 1..=cli.output_number {
        println!("\n--- Generating document {i} ---");

        // A fresh mapping per document: values are never cached across
        // copies, so repeated synthesis for the same field varies.
        let mut values = FieldValues::new();
        for name in &fields {
            let category = classify_field(&client, name);
            println!("  - Field: '{name}' -> detected type: '{category}'");

            let value = synthesize_value(&client, name, category);
            println!("    - generated value: '{value}'");

            values.insert(name.clone(), value);
        }

        let mut doc = form::render(&cli.input_file, &values)?;
        let output = format!("{}-{i}.pdf", cli.output_prefix);
        form::save(&mut doc, output.as_ref())?;
        println!("\nWrote '{output}'");
    }

    Ok(())
}
