use owo_colors::OwoColorize;
use tilelog_core::parse::ParseReport;
use tilelog_core::stats::{ActivityStep, Movement, StatsSummary};

const BAR_WIDTH: f64 = 40.0;

pub fn render_summary(summary: &StatsSummary, report: &ParseReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n\
         =============\n\
         lines: {} | parsed: {} | skipped: {} | failed: {}\n\
         tiles: {} | grids: {} | maps: {} | clients: {}\n\n",
        "Tile requests".bold(),
        report.lines_read,
        report.parsed(),
        report.skipped,
        failed_count(report),
        summary.tiles,
        summary.grids,
        summary.distinct_maps,
        summary.distinct_source_ips
    ));

    if summary.by_zoom.is_empty() {
        out.push_str("Zoom: <no requests>\n");
    } else {
        out.push_str("Zoom:\n");
        for zoom in &summary.by_zoom {
            let pct = zoom.share * 100.0;
            let bars = ((zoom.share * BAR_WIDTH).round() as usize).max(1);
            out.push_str(&format!(
                "  {:>2} {:<40} {:>5.1}% ({})\n",
                zoom.zoom,
                "█".repeat(bars).green(),
                pct,
                zoom.count
            ));
        }
    }

    if !summary.top_source_ips.is_empty() {
        out.push_str("\nTop clients:\n");
        for source in &summary.top_source_ips {
            out.push_str(&format!("  {:<40} {}\n", source.source_ip, source.count));
        }
    }

    if !summary.top_tiles.is_empty() {
        out.push_str("\nTop tiles:\n");
        for tile in &summary.top_tiles {
            out.push_str(&format!("  {:<20} {}\n", tile.coord.to_string(), tile.count));
        }
    }

    let cache = summary.edge_cache;
    out.push_str(&format!(
        "\nEdge cache: hit={} miss={} other={}\n",
        cache.hit.green(),
        cache.miss.yellow(),
        cache.other
    ));

    let status = summary.status;
    out.push_str(&format!(
        "Status: 2xx={} 4xx={} 5xx={} unknown={}\n",
        status.ok,
        status.client_error.yellow(),
        status.server_error.red(),
        status.unknown
    ));

    out
}

fn failed_count(report: &ParseReport) -> String {
    let failed = report.failures.len();
    if failed == 0 {
        failed.to_string()
    } else {
        failed.red().bold().to_string()
    }
}

pub fn render_activity(source_ip: &str, steps: &[ActivityStep]) -> String {
    if steps.is_empty() {
        return format!("no requests from {source_ip}\n");
    }

    let mut out = format!("{} ({} requests)\n", source_ip.bold(), steps.len());
    for step in steps {
        let moves: Vec<&str> = step.movements.iter().map(|m| movement_label(*m)).collect();
        out.push_str(&format!(
            "  {} {:<16} {}\n",
            step.timestamp.format("%Y-%m-%d %H:%M:%S"),
            step.coord.to_string(),
            moves.join(" ").cyan()
        ));
    }

    out
}

fn movement_label(movement: Movement) -> &'static str {
    match movement {
        Movement::ZoomIn => "zoom-in",
        Movement::ZoomOut => "zoom-out",
        Movement::PanLeft => "pan-left",
        Movement::PanRight => "pan-right",
        Movement::PanUp => "pan-up",
        Movement::PanDown => "pan-down",
    }
}
