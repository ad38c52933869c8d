use anyhow::{Context, Result};
use tracing::{info, info_span};

use semtpl_core::{convert, route};
use semtpl_ingest::load_sources;
use semtpl_model::ConvertOptions;
use semtpl_output::write_document;

use crate::cli::{ConvertArgs, InspectArgs};
use crate::types::{ConvertResult, InspectResult};

/// Options for the conversion from CLI flags.
///
/// A blank `--only-cube` value means no filter.
pub fn convert_options(args: &ConvertArgs) -> ConvertOptions {
    let only_cube = args
        .only_cube
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    ConvertOptions::new()
        .with_only_cube(only_cube)
        .with_include_unknown(!args.no_include_unknown)
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();

    let sources = load_sources(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let options = convert_options(args);
    let outcome = convert(sources, &options)?;

    let format = args.output_format();
    let output = if args.dry_run {
        info!("Dry run: skipping output");
        None
    } else {
        write_document(&outcome.document, &args.output, format)
            .with_context(|| format!("write {}", args.output.display()))?;
        Some(args.output.clone())
    };

    Ok(ConvertResult {
        input: args.input.clone(),
        output,
        format,
        outcome,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let sources = load_sources(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    Ok(InspectResult {
        input: args.input.clone(),
        routed: route(sources),
    })
}
