mod input;
mod logging;
mod report;
#[cfg(test)]
mod tests;

use crate::input::{read_lines, resolve_config};
use crate::logging::{LogFormat, default_log_format, init_logging};
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tilelog_core::conf::TilelogConfig;
use tilelog_core::parse::{BatchParser, ParseReport};
use tilelog_core::render::{OverlayStyle, QuadtreeRenderer, render_ascii};
use tilelog_core::stats::StatsAggregator;

#[derive(Parser, Debug)]
#[command(
    name = "tilelog",
    version,
    about = "Tilelog: tile request analysis for CDN access logs"
)]
struct Cli {
    /// Path to a tilelog.hcl config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (defaults to pretty on a terminal)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Log file to read (stdin when omitted)
    input: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarise requests by zoom, client, tile, cache and status
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,

        /// Length of the top clients and tiles listings
        #[arg(long)]
        top: Option<usize>,
    },

    /// Paint requested cells over a PNG basemap
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Basemap covering the whole tile extent
        #[arg(long)]
        basemap: PathBuf,

        /// Where to write the PNG overlay
        #[arg(long, short)]
        out: PathBuf,

        /// Grid to render; deeper requests are projected onto it
        #[arg(long, allow_negative_numbers = true, required_unless_present = "all_zooms")]
        zoom: Option<i32>,

        /// Only count requests for this layer group id
        #[arg(long)]
        map: Option<String>,

        /// Outline the most requested tiles of --map
        #[arg(long, requires = "map", conflicts_with = "all_zooms")]
        highlight: bool,

        /// One layer per zoom level present instead of a single grid
        #[arg(long)]
        all_zooms: bool,
    },

    /// Print the coverage grid of one zoom level as text
    Ascii {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        zoom: u8,

        #[arg(long)]
        map: Option<String>,
    },

    /// Show how one client moved around the map
    Activity {
        #[command(flatten)]
        input: InputArgs,

        /// Client address to trace
        #[arg(long)]
        ip: String,

        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    if let Err(e) = run(cli) {
        eprintln!("tilelog error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Stats { input, json, top } => {
            let report = parse_input(&cfg, input.input.as_deref())?;
            let summary = StatsAggregator::new(&report.store)
                .summary(top.unwrap_or(cfg.stats.top_tiles));

            if json {
                let out = serde_json::to_string_pretty(&summary)
                    .context("serializing stats summary")?;
                println!("{out}");
            } else {
                print!("{}", report::render_summary(&summary, &report));
            }
        }

        Command::Render {
            input,
            basemap,
            out,
            zoom,
            map,
            highlight,
            all_zooms,
        } => {
            let report = parse_input(&cfg, input.input.as_deref())?;
            let base = image::open(&basemap)
                .with_context(|| format!("loading basemap {}", basemap.display()))?
                .to_rgba8();

            let renderer = QuadtreeRenderer::new(OverlayStyle::from(&cfg.render));
            let map = map.as_deref();

            let image = match zoom {
                _ if all_zooms => renderer.render_all_zooms(&report.store, &base, map)?,
                Some(zoom) => {
                    let highlights = match map {
                        Some(id) if highlight => {
                            StatsAggregator::new(&report.store).hottest_tiles(id)
                        }
                        _ => Vec::new(),
                    };
                    renderer.render_with_highlights(&report.store, &base, zoom, map, &highlights)?
                }
                None => bail!("--zoom is required unless --all-zooms is set"),
            };

            image
                .save(&out)
                .with_context(|| format!("writing overlay {}", out.display()))?;
            tracing::info!(path = %out.display(), "wrote coverage overlay");
        }

        Command::Ascii { input, zoom, map } => {
            let report = parse_input(&cfg, input.input.as_deref())?;
            println!("{}", render_ascii(&report.store, zoom, map.as_deref())?);
        }

        Command::Activity { input, ip, json } => {
            let report = parse_input(&cfg, input.input.as_deref())?;
            let steps = StatsAggregator::new(&report.store).activity(&ip);

            if json {
                let out =
                    serde_json::to_string_pretty(&steps).context("serializing activity trace")?;
                println!("{out}");
            } else {
                print!("{}", report::render_activity(&ip, &steps));
            }
        }
    }

    Ok(())
}

fn parse_input(cfg: &TilelogConfig, path: Option<&Path>) -> Result<ParseReport> {
    let lines = read_lines(path)?;
    let workers = NonZeroUsize::new(cfg.parser.workers).unwrap_or(NonZeroUsize::MIN);

    let report = BatchParser::from_config(&cfg.parser).parse_parallel(&lines, workers);

    if !report.failures.is_empty() {
        tracing::warn!(
            failed = report.failures.len(),
            failure_rate = report.failure_rate(),
            "some lines could not be parsed"
        );
    }

    Ok(report)
}
