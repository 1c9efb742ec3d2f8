use bendtree::{AnalysisConfig, StoppingRule};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "bendtree", about = "Bend hierarchy and structural beauty of polyline curves")]
struct Cli {
    /// Input curves (JSON array of geometry records, or a GeoJSON FeatureCollection)
    #[arg(short, long)]
    input: PathBuf,

    /// Write classified bends as GeoJSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML preset; explicit flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bend tolerance in curve units
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Head/tail break percentage, in (0, 1]
    #[arg(short, long)]
    break_percentage: Option<f64>,

    /// Stopping rule: 1 = mean threshold, 2 = mean ratio threshold
    #[arg(short, long)]
    rule: Option<u8>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(t) = cli.tolerance {
        config.tolerance = t;
    }
    if let Some(bp) = cli.break_percentage {
        config.classifier.break_percentage = bp;
    }
    if let Some(v) = cli.rule {
        config.classifier.rule = StoppingRule::from_version(v)?;
    }
    config.validate()?;

    let source = bendtree::io::read_curves(BufReader::new(File::open(&cli.input)?))?;
    if source.skipped > 0 {
        tracing::warn!(skipped = source.skipped, "ignored records that are not valid line strings");
    }

    let analysis = bendtree::analyze(&source.curves, &config)?;

    println!();
    println!("  bendtree \u{00b7} {}", cli.input.display());
    println!();
    print!("{}", analysis.metrics);

    if let Some(output) = &cli.output {
        let mut writer = BufWriter::new(File::create(output)?);
        bendtree::io::write_bends(&mut writer, &analysis.bends)?;
        writer.flush()?;
        println!();
        println!("  \u{2713} {}", output.display());
    }
    println!();

    Ok(())
}
