//! CLI logic for the Planar drawing flattener.
//!
//! Loads a drawing file, flattens it in one transaction and writes the result
//! back, or with `--count` only reports how many elements the root container
//! holds.

pub mod error_adapter;

mod args;
mod config;
mod prompt;

pub use args::Args;

use std::{
    fs,
    io::{self, BufRead, Write},
};

use log::info;

use planar::{Flattener, PlanarError, drawing::Drawing};

/// Run the Planar CLI application against the process's stdin and stdout.
///
/// # Errors
///
/// Returns `PlanarError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed drawing files
/// - Flatten sessions that were rolled back
pub fn run(args: &Args) -> Result<(), PlanarError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_with(args, &mut input, &mut output)
}

/// Run the CLI with explicit input and output streams.
///
/// `input` is only read when the recursion choice is not fixed by a flag or
/// by the configuration. The result line and any notices go to `output`.
///
/// # Errors
///
/// See [`run`]. The output file is left untouched on any error.
pub fn run_with<R, W>(args: &Args, input: &mut R, output: &mut W) -> Result<(), PlanarError>
where
    R: BufRead,
    W: Write,
{
    let target = args.output.as_deref().unwrap_or(&args.input);
    info!(input_path = args.input, output_path = target; "Processing drawing");

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let drawing: Drawing =
        toml::from_str(&source).map_err(|e| PlanarError::Drawing(e.to_string()))?;
    let mut document = drawing.into_document()?;

    let flattener = Flattener::new(app_config);

    if args.count {
        let count = flattener.count(&document)?;
        let root = flattener.root_of(&document);
        writeln!(output, "Found {count} element(s) in `{root}`.")?;
        return Ok(());
    }

    let recurse = match args
        .recurse_choice()
        .or_else(|| flattener.config().flatten().recurse())
    {
        Some(recurse) => recurse,
        None => prompt::ask_recurse(input, output)?,
    };

    let summary = flattener.flatten(&mut document, recurse)?;
    for notice in summary.notices() {
        writeln!(output, "note: {notice}")?;
    }
    writeln!(
        output,
        "Examined {} element(s); flattened {}.",
        summary.examined(),
        summary.changed()
    )?;

    let flattened = Drawing::from_document(&document)?;
    let text = toml::to_string(&flattened).map_err(|e| PlanarError::Drawing(e.to_string()))?;
    fs::write(target, text)?;

    info!(output_file = target; "Drawing written");

    Ok(())
}
