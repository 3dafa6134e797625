use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use packcircles_rs::circles::build_store;
use packcircles_rs::input::read_records;
use packcircles_rs::layout::{pack_circles, PackConfig};
use packcircles_rs::render::{
    fill_missing_colors, render_document, write_svg, ColorGenerator, ColorSettings, SvgConfig,
};

/// Arrange circles, given by their areas, into a compact packing and print it as SVG.
///
/// Each input line holds an area, optionally followed by a tab-separated CSS
/// fill color and a tab-separated name.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Name of input file
    #[arg(short, long, value_name = "FILENAME")]
    input: PathBuf,

    /// Write the SVG here instead of stdout
    #[arg(short, long, value_name = "FILENAME")]
    output: Option<PathBuf>,

    /// Enable debug output (placement trace on stderr, front chain in the SVG)
    #[arg(short, long)]
    debug: bool,

    /// Generate colors programmatically if not defined in input file
    #[arg(short, long)]
    colors: bool,

    /// Seed for the first generated color, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("packcircles_rs={level}").parse()?),
        )
        .init();

    let records = read_records(&cli.input)
        .with_context(|| format!("failed to load circles from {}", cli.input.display()))?;
    let mut store = build_store(&records);

    if cli.colors {
        let mut generator = ColorGenerator::from_seed(cli.seed, ColorSettings::default());
        fill_missing_colors(&mut store, &mut generator);
    }

    let mut packing = pack_circles(&mut store, &PackConfig::default());
    packing.recenter(&mut store);

    let config = SvgConfig {
        debug_chain: cli.debug,
        ..SvgConfig::default()
    };
    let document = render_document(&store, &packing, &config);

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_svg(&mut out, &document)?;
            out.flush()?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_svg(&mut out, &document)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
