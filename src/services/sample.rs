//! Built-in demo data
//!
//! A run of days, each split into how the day was spent. Values are
//! deterministic so screenshots and tests stay stable.

use crate::model::{Column, Fraction, GraphData};
use chrono::{Datelike, Duration, NaiveDate};
use ratatui::style::Color;

/// Activity categories, bottom of the bar first
const CATEGORIES: [(&str, Option<Color>); 5] = [
    ("Sleep", Some(Color::Rgb(72, 101, 163))),
    ("Work", Some(Color::Rgb(230, 126, 34))),
    ("Exercise", Some(Color::Rgb(46, 204, 113))),
    ("Leisure", Some(Color::Rgb(155, 89, 182))),
    // rendered with the graph's default color
    ("Unlogged", None),
];

/// Longest run of sample days; ten years
pub const MAX_SAMPLE_DAYS: usize = 3650;

/// Sample data for `days` days ending on `today`
///
/// Each column sums to 1.0. Labels are short weekday names and repeat
/// weekly, so the label list only holds one week. `days` is capped at
/// [`MAX_SAMPLE_DAYS`].
pub fn sample_days(days: usize, today: NaiveDate) -> GraphData<String> {
    let days = days.min(MAX_SAMPLE_DAYS);
    let first = today - Duration::days(days.saturating_sub(1) as i64);

    let labels = (0..days.min(7))
        .map(|offset| {
            (first + Duration::days(offset as i64))
                .format("%a")
                .to_string()
        })
        .collect();

    let columns = (0..days)
        .map(|offset| sample_column(offset, first + Duration::days(offset as i64)))
        .collect();

    GraphData::new(columns, labels)
}

fn sample_column(day: usize, date: NaiveDate) -> Column<String> {
    // cheap deterministic variation per day, in hundredths of a day
    let wobble = |seed: usize, spread: usize| ((day * 37 + seed * 11) % spread) as f64 / 100.0;

    let sleep = 0.28 + wobble(1, 8);
    let weekend = date.weekday().number_from_monday() >= 6;
    let work = if weekend { 0.05 } else { 0.30 + wobble(2, 10) };
    let exercise = 0.02 + wobble(3, 6);
    let leisure = 0.10 + wobble(4, 8);
    let unlogged = (1.0 - sleep - work - exercise - leisure).max(0.0);

    [sleep, work, exercise, leisure, unlogged]
        .into_iter()
        .zip(CATEGORIES)
        .map(|(percentage, (name, color))| Fraction {
            payload: Some(name.to_string()),
            color,
            percentage,
        })
        .collect()
}
