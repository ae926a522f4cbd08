//! sonata-stats — batch statistics over a directory of midicsv sonata dumps.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use sonata_stats::batch::{parse_all_pieces, BatchOptions};
use sonata_stats::config::AnalysisConfig;
use sonata_stats::piece::Piece;
use sonata_stats::plot::{letter_occurrence_chart, save_chart, scale_degree_chart, unique_notes_chart};
use sonata_stats::report::Report;
use sonata_stats::sonata::{group_sonatas, MissingGroupPolicy, Sonata};
use sonata_stats::Result;

#[derive(Parser)]
#[command(
    name = "sonata-stats",
    version,
    about = "Key, tempo and note statistics for piano sonata MIDI dumps"
)]
struct Cli {
    /// Directory of .csv dumps (overrides the config file)
    input_dir: Option<PathBuf>,

    /// Where charts are written (overrides the config file)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Config file (default: ~/.sonata-stats/config.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also group movements into sonatas
    #[arg(long)]
    sonatas: bool,

    /// Save bar charts as PNG
    #[arg(long)]
    plot: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Fail when a sonata number in range has no movements
    #[arg(long)]
    strict_groups: bool,

    /// Skip files that fail to parse
    #[arg(long)]
    skip_failures: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load_from(path)?,
        None => AnalysisConfig::load().unwrap_or_default(),
    };
    if let Some(dir) = &cli.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if cli.skip_failures {
        config.skip_failures = true;
    }
    if cli.strict_groups {
        config.grouping.missing = MissingGroupPolicy::Fail;
    }
    Ok(config)
}

fn file_stem(piece: &Piece) -> String {
    piece
        .source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("sonata_{:02}_{:02}", piece.sonata(), piece.movement()))
}

fn plot_pieces(pieces: &[Piece], dir: &Path) -> Result<()> {
    for piece in pieces {
        let stem = file_stem(piece);
        if let Some(chart) = scale_degree_chart(&piece.title.display, piece) {
            save_chart(&chart, dir, &format!("{stem}_scale"))?;
        }
        let chart = letter_occurrence_chart(&piece.title.display, piece);
        save_chart(&chart, dir, &format!("{stem}_letters"))?;
    }
    Ok(())
}

fn plot_sonatas(sonatas: &[Sonata], dir: &Path) -> Result<()> {
    for sonata in sonatas {
        let name = format!("sonata_{:02}", sonata.title.sonata);
        let title = format!("Sonata No. {}", sonata.title.sonata);
        if let Some(chart) = scale_degree_chart(&title, sonata) {
            save_chart(&chart, dir, &format!("{name}_scale"))?;
        }
        save_chart(&letter_occurrence_chart(&title, sonata), dir, &format!("{name}_letters"))?;
    }
    save_chart(&unique_notes_chart(sonatas), dir, "unique_notes")?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    info!("reading dumps from {}", config.input_dir.display());

    let pieces = parse_all_pieces(&config.input_dir, &BatchOptions::from(&config))?;
    let sonatas = if cli.sonatas {
        group_sonatas(&pieces, &config.grouping)?
    } else {
        Vec::new()
    };

    let report = Report::new(&pieces, &sonatas);
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    if cli.plot {
        if cli.sonatas {
            plot_sonatas(&sonatas, &config.output_dir)?;
        } else {
            plot_pieces(&pieces, &config.output_dir)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
