//! CLI output formatting for both commands.
//!
//! # Output Format
//!
//! ## Compose
//!
//! ```text
//! Grid
//!     Images: 41
//!     Layout: 20 columns x 3 rows (26x26 cells)
//!     Canvas: 520x78
//!     Backend: sharpened (#1 bicubic, sigma 4.5, radius 2)
//!     Output: out/OutputGrid.png
//! ```
//!
//! ## Prune
//!
//! ```text
//! 001 hero.png: kept
//! 002 broken-crop.png: deleted
//! 003 corrupt.png: failed (Failed to decode ...)
//!
//! Deleted 1, kept 1, failed 1
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! do no I/O.

use crate::compose::ComposeSummary;
use crate::imaging::BackendOptions;
use crate::prune::{PruneOutcome, PruneReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One-line description of the rendering backend.
fn backend_line(backend: &BackendOptions) -> String {
    match backend {
        BackendOptions::None => "plain (bicubic)".to_string(),
        BackendOptions::LegacyInterpolation(mode) => format!("legacy ({mode:?})"),
        BackendOptions::SharpenedResample {
            resampler,
            sharpening: Some(s),
        } => format!(
            "sharpened (#{} {}, sigma {}, radius {})",
            resampler.id(),
            resampler.name(),
            s.sigma,
            s.radius
        ),
        BackendOptions::SharpenedResample {
            resampler,
            sharpening: None,
        } => format!(
            "sharpened (#{} {}, no sharpening)",
            resampler.id(),
            resampler.name()
        ),
    }
}

// ============================================================================
// Compose
// ============================================================================

pub fn format_compose_output(summary: &ComposeSummary) -> Vec<String> {
    let layout = &summary.layout;
    vec![
        "Grid".to_string(),
        format!("{}Images: {}", indent(1), summary.image_count),
        format!(
            "{}Layout: {} columns x {} rows ({}x{} cells)",
            indent(1),
            layout.columns,
            layout.rows,
            layout.cell_width,
            layout.cell_height
        ),
        format!(
            "{}Canvas: {}x{}",
            indent(1),
            layout.canvas_width,
            layout.canvas_height
        ),
        format!("{}Backend: {}", indent(1), backend_line(&summary.backend)),
        format!("{}Output: {}", indent(1), summary.output_path.display()),
    ]
}

pub fn print_compose_output(summary: &ComposeSummary) {
    for line in format_compose_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Prune
// ============================================================================

fn outcome_label(outcome: &PruneOutcome) -> String {
    match outcome {
        PruneOutcome::Kept => "kept".to_string(),
        PruneOutcome::Deleted => "deleted".to_string(),
        PruneOutcome::WouldDelete => "would delete".to_string(),
        PruneOutcome::Vanished => "vanished".to_string(),
        PruneOutcome::Failed(reason) => format!("failed ({reason})"),
    }
}

pub fn format_prune_output(report: &PruneReport, dry_run: bool) -> Vec<String> {
    let mut lines: Vec<String> = report
        .entries
        .iter()
        .enumerate()
        .map(|(i, (path, outcome))| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            format!("{} {}: {}", format_index(i + 1), name, outcome_label(outcome))
        })
        .collect();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let verb = if dry_run { "Would delete" } else { "Deleted" };
    lines.push(format!(
        "{} {}, kept {}, failed {}",
        verb,
        report.deleted(),
        report.kept(),
        report.failed()
    ));
    lines
}

pub fn print_prune_output(report: &PruneReport, dry_run: bool) {
    for line in format_prune_output(report, dry_run) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{GridSpec, InterpolationMode, Resampler, Sharpening, compute_layout};
    use std::path::PathBuf;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn backend_line_variants() {
        assert_eq!(backend_line(&BackendOptions::None), "plain (bicubic)");
        assert_eq!(
            backend_line(&BackendOptions::LegacyInterpolation(
                InterpolationMode::Bilinear
            )),
            "legacy (Bilinear)"
        );
        assert_eq!(
            backend_line(&BackendOptions::SharpenedResample {
                resampler: Resampler::Lanczos2,
                sharpening: Some(Sharpening::default()),
            }),
            "sharpened (#5 lanczos2, sigma 4.5, radius 2)"
        );
        assert_eq!(
            backend_line(&BackendOptions::SharpenedResample {
                resampler: Resampler::Welch,
                sharpening: None,
            }),
            "sharpened (#14 welch, no sharpening)"
        );
    }

    #[test]
    fn compose_output_lines() {
        let spec = GridSpec::new(520, 26, 26).unwrap();
        let summary = ComposeSummary {
            output_path: PathBuf::from("out/OutputGrid.png"),
            image_count: 41,
            layout: compute_layout(41, &spec).unwrap(),
            backend: BackendOptions::None,
        };
        let lines = format_compose_output(&summary);
        assert_eq!(lines[0], "Grid");
        assert_eq!(lines[1], "    Images: 41");
        assert_eq!(lines[2], "    Layout: 20 columns x 3 rows (26x26 cells)");
        assert_eq!(lines[3], "    Canvas: 520x78");
        assert_eq!(lines[5], "    Output: out/OutputGrid.png");
    }

    #[test]
    fn prune_output_lists_files_then_totals() {
        let report = PruneReport {
            entries: vec![
                (PathBuf::from("dir/a.png"), PruneOutcome::Kept),
                (PathBuf::from("dir/b.png"), PruneOutcome::Deleted),
                (PathBuf::from("dir/c.png"), PruneOutcome::Failed("bad".into())),
            ],
        };
        let lines = format_prune_output(&report, false);
        assert_eq!(
            lines,
            vec![
                "001 a.png: kept",
                "002 b.png: deleted",
                "003 c.png: failed (bad)",
                "",
                "Deleted 1, kept 1, failed 1",
            ]
        );
    }

    #[test]
    fn prune_output_empty_dry_run() {
        let lines = format_prune_output(&PruneReport::default(), true);
        assert_eq!(lines, vec!["Would delete 0, kept 0, failed 0"]);
    }
}
