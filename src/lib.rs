pub mod cli;
pub mod processor;
pub mod writer;

use anyhow::Context;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub fn run(args: &cli::Cli) -> anyhow::Result<()> {
    // 1. ── Read ───────────────────────────────────────────────────────
    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    info!("Read {} ({} bytes)", args.input.display(), source.len());

    // 2. ── Process ────────────────────────────────────────────────────
    if args.tokens {
        let tokens = processor::lex(&source);
        let mut out = open_output(args)?;
        writer::json::emit_tokens(&tokens, &mut out).with_context(|| "Writing tokens")?;
        return Ok(());
    }

    let document = processor::run(&source)?;

    // 3. ── Write outputs ──────────────────────────────────────────────
    if args.json || args.output.is_some() {
        let mut out = open_output(args)?;
        writer::json::emit_document(&document, &mut out).with_context(|| "Writing document")?;
    } else {
        info!(
            "Parsed {} metadata pairs and {} scenes",
            document.metadata.len(),
            document.scenes.len()
        );
    }

    Ok(())
}

fn open_output(args: &cli::Cli) -> anyhow::Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Creating {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
