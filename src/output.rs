//! CLI output formatting.
//!
//! Output is **information-centric**: every tile is shown by its positional
//! index and id, with geometry on indented context lines underneath.
//!
//! # Output Format
//!
//! ## Layout
//!
//! ```text
//! Layout
//! 3 columns × 306.67px, gap 16px, container 952px
//! 001 1 → column 1
//!     at 0, 0  size 306.67 × 400
//! 002 2 → column 2
//!     at 322.67, 0  size 306.67 × 250
//!
//! Content height: 732px
//! ```
//!
//! ## Breakpoints
//!
//! ```text
//! Breakpoints
//! 001 ≥ 1500px → 5 columns
//! 002 ≥ 1000px → 4 columns
//!     otherwise → 1 column
//!
//! Viewport 1200px → 4 columns
//! ```
//!
//! ## Check
//!
//! ```text
//! Assets
//! 001 hero → images/hero.jpg
//!     600 × 900
//! 002 broken → images/broken.jpg
//!     FAILED: unexpected end of file
//!
//! 2 assets: 1 loaded, 0 remote, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::breakpoints::BreakpointLadder;
use crate::packer::Layout;
use crate::preload::{AssetProbe, ProbeStatus};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pixel value with at most two decimals and no trailing zeros.
fn format_px(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn plural_columns(n: u32) -> String {
    if n == 1 {
        "1 column".to_string()
    } else {
        format!("{} columns", n)
    }
}

// ============================================================================
// layout
// ============================================================================

/// Format a computed layout as display lines.
pub fn format_layout(layout: &Layout) -> Vec<String> {
    let mut lines = vec!["Layout".to_string()];

    if layout.container_width <= 0.0 {
        lines.push(format!("{}container has no width, nothing placed", indent(1)));
        return lines;
    }

    lines.push(format!(
        "{} × {}px, gap {}px, container {}px",
        plural_columns(layout.columns),
        format_px(layout.column_width),
        format_px(layout.gap),
        format_px(layout.container_width)
    ));
    if layout.is_degenerate() {
        lines.push(format!(
            "{}Warning: container too narrow, columns have no width",
            indent(1)
        ));
    }

    for (i, placed) in layout.placements.iter().enumerate() {
        lines.push(format!(
            "{} {} → column {}",
            format_index(i + 1),
            placed.id,
            placed.column + 1
        ));
        lines.push(format!(
            "{}at {}, {}  size {} × {}",
            indent(1),
            format_px(placed.x),
            format_px(placed.y),
            format_px(placed.width),
            format_px(placed.height)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Content height: {}px", format_px(layout.content_height())));
    lines
}

/// Print layout output to stdout.
pub fn print_layout(layout: &Layout) {
    for line in format_layout(layout) {
        println!("{}", line);
    }
}

// ============================================================================
// breakpoints
// ============================================================================

/// Format a breakpoint ladder, optionally resolving one viewport width.
pub fn format_breakpoints(ladder: &BreakpointLadder, viewport: Option<(f64, u32)>) -> Vec<String> {
    let mut lines = vec!["Breakpoints".to_string()];

    for (i, rung) in ladder.ladder.iter().enumerate() {
        lines.push(format!(
            "{} ≥ {}px → {}",
            format_index(i + 1),
            format_px(rung.min_width),
            plural_columns(rung.columns)
        ));
    }
    match ladder.default_columns {
        Some(n) => lines.push(format!("{}otherwise → {}", indent(1), plural_columns(n))),
        None => lines.push(format!("{}otherwise → (no default)", indent(1))),
    }
    if !ladder.is_descending() {
        lines.push(format!(
            "{}Warning: rungs are not widest-first; the first match wins",
            indent(1)
        ));
    }

    if let Some((width, columns)) = viewport {
        lines.push(String::new());
        lines.push(format!(
            "Viewport {}px → {}",
            format_px(width),
            plural_columns(columns)
        ));
    }
    lines
}

/// Print breakpoint output to stdout.
pub fn print_breakpoints(ladder: &BreakpointLadder, viewport: Option<(f64, u32)>) {
    for line in format_breakpoints(ladder, viewport) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format asset probe results as display lines.
pub fn format_check(probes: &[AssetProbe]) -> Vec<String> {
    let mut lines = vec!["Assets".to_string()];
    let (mut loaded, mut remote, mut failed) = (0, 0, 0);

    for (i, probe) in probes.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), probe.id, probe.img));
        let detail = match &probe.status {
            ProbeStatus::Loaded { width, height } => {
                loaded += 1;
                format!("{} × {}", width, height)
            }
            ProbeStatus::Remote => {
                remote += 1;
                "remote, not checked".to_string()
            }
            ProbeStatus::Failed(reason) => {
                failed += 1;
                format!("FAILED: {}", reason)
            }
        };
        lines.push(format!("{}{}", indent(1), detail));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} assets: {} loaded, {} remote, {} failed",
        probes.len(),
        loaded,
        remote,
        failed
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check(probes: &[AssetProbe]) {
    for line in format_check(probes) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
