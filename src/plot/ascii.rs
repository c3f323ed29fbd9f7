//! ASCII plotting for terminal output.
//!
//! This is a fixed-size grid, optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - 1σ error bars: `|`
//! - fitted line: `-`
//!
//! The header carries the axis ranges and `tau = |tau|` to three decimals.

use crate::domain::{FitResult, SkydipAnalysis};

/// Render the fit of an analysis.
pub fn render_analysis_plot(analysis: &SkydipAnalysis, width: usize, height: usize) -> String {
    render_ascii_plot(
        &analysis.secz(),
        &analysis.log_term(),
        &analysis.err(),
        &analysis.fit,
        width,
        height,
    )
}

/// Render parallel `secz` / `log_term` / `err` arrays with the fitted line.
///
/// Points with a NaN log term are not drawn.
pub fn render_ascii_plot(
    secz: &[f64],
    log_term: &[f64],
    err: &[f64],
    fit: &FitResult,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(f64, f64, f64)> = secz
        .iter()
        .zip(log_term)
        .zip(err)
        .filter(|((x, y), _)| x.is_finite() && y.is_finite())
        .map(|((&x, &y), &e)| (x, y, if e.is_finite() { e.abs() } else { 0.0 }))
        .collect();

    let (x_min, x_max) = x_range(&points).unwrap_or((1.0, 2.0));
    let line = [(x_min, fit.predict(x_min)), (x_max, fit.predict(x_max))];
    let (y_min, y_max) = y_range(&points, &line).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Line first so bars and points overlay it.
    let (lx0, ly0) = (
        map_x(line[0].0, x_min, x_max, width),
        map_y(line[0].1, y_min, y_max, height),
    );
    let (lx1, ly1) = (
        map_x(line[1].0, x_min, x_max, width),
        map_y(line[1].1, y_min, y_max, height),
    );
    draw_line(&mut grid, lx0, ly0, lx1, ly1, '-');

    for &(x, y, e) in &points {
        let col = map_x(x, x_min, x_max, width);
        let top = map_y(y + e, y_min, y_max, height);
        let bottom = map_y(y - e, y_min, y_max, height);
        for row in grid.iter_mut().take(bottom + 1).skip(top) {
            row[col] = '|';
        }
    }
    for &(x, y, _) in &points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: secz=[{x_min:.3}, {x_max:.3}] | log(hot-sky)=[{y_min:.3}, {y_max:.3}] | tau = {}\n",
        fit.tau_label()
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn x_range(points: &[(f64, f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[(f64, f64, f64)], line: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y, e) in points {
        min_y = min_y.min(y - e);
        max_y = max_y.max(y + e);
    }
    for &(_, y) in line.iter().filter(|(_, y)| y.is_finite()) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
