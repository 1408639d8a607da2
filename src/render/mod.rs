//! Plain-text rendering of simulation results
//!
//! Two views: a sampled table of the alive/throughput series for every
//! population, and a character map of the field showing which nodes are
//! still alive at the end of the run.

use crate::core::types::Vec2;
use crate::metrics::SimulationOutput;
use crate::node::population::PopulationSnapshot;

pub const ALIVE_GLYPH: char = 'o';
pub const DEAD_GLYPH: char = 'x';
pub const SINK_GLYPH: char = 'S';
pub const EMPTY_GLYPH: char = '.';

/// Table with one row every `every` rounds (and always the last round)
pub fn series_table(output: &SimulationOutput, every: u32) -> String {
    let every = every.max(1) as usize;
    let rounds = output
        .populations
        .iter()
        .map(|p| p.alive_count.len())
        .max()
        .unwrap_or(0);

    let mut header = format!("{:>7}", "round");
    for series in &output.populations {
        header.push_str(&format!(
            " | {:>8} {:>12}",
            truncate(&series.name, 8),
            "packets"
        ));
    }
    let mut lines = vec![header.clone(), "-".repeat(header.len())];

    let sampled = (0..rounds).filter(|r| r % every == 0 || r + 1 == rounds);
    for r in sampled {
        let mut line = format!("{:>7}", r);
        for series in &output.populations {
            line.push_str(&format!(
                " | {:>8} {:>12}",
                series.alive_count[r], series.cumulative_throughput[r]
            ));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Character map of a population's final state over a square field of side `size`
pub fn field_map(snapshot: &PopulationSnapshot, sink: Vec2, size: f64, cols: usize, rows: usize) -> String {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let mut grid = vec![vec![EMPTY_GLYPH; cols]; rows];

    for node in &snapshot.nodes {
        let Some((c, r)) = cell(node.x, node.y, size, cols, rows) else {
            continue;
        };
        let glyph = &mut grid[r][c];
        // A live node wins over a dead one in the same cell
        if node.alive {
            *glyph = ALIVE_GLYPH;
        } else if *glyph == EMPTY_GLYPH {
            *glyph = DEAD_GLYPH;
        }
    }

    if let Some((c, r)) = cell(sink.x, sink.y, size, cols, rows) {
        grid[r][c] = SINK_GLYPH;
    }

    let mut lines = vec![format!(
        "{} ({}/{} alive)",
        snapshot.name,
        snapshot.alive_count(),
        snapshot.nodes.len()
    )];
    // Top row is the far edge of the field
    lines.extend(grid.iter().rev().map(|row| row.iter().collect::<String>()));
    lines.join("\n")
}

fn cell(x: f64, y: f64, size: f64, cols: usize, rows: usize) -> Option<(usize, usize)> {
    if !(x >= 0.0 && y >= 0.0 && x <= size && y <= size) {
        return None;
    }
    let c = ((x / size) * cols as f64) as usize;
    let r = ((y / size) * rows as f64) as usize;
    Some((c.min(cols - 1), r.min(rows - 1)))
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}
