//! Console summary report.
//!
//! Each line is computed independently; a failed statistic prints its error
//! in place of the value and the remaining lines still render.

use std::fmt::Display;
use std::fmt::Write;

use crate::analyzers::aggregate::durations_by_weather;
use crate::analyzers::summary::{
    happy_fraction, max_duration, mean_duration, min_duration, most_popular_mode, rain_impact,
    total_count, worst_day,
};
use crate::error::CommuteError;
use crate::record::{CommuteRecordSet, Mood};
use strum::VariantArray;

const TITLE: &str = "📊 LAGOS COMMUTE PULSE - SUMMARY STATISTICS";
const RULE_WIDTH: usize = 50;

/// Renders the summary block printed at the end of a run.
pub fn render_report(records: &CommuteRecordSet) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    line(
        &mut out,
        "📈 Total Commutes Analyzed",
        Ok::<_, CommuteError>(total_count(records)),
    );
    line(
        &mut out,
        "⏱️ Average Commute Time",
        mean_duration(records).map(|m| format!("{m:.1} minutes")),
    );
    line(
        &mut out,
        "😩 Longest Commute",
        max_duration(records).map(|m| format!("{m} minutes")),
    );
    line(
        &mut out,
        "😊 Shortest Commute",
        min_duration(records).map(|m| format!("{m} minutes")),
    );
    line(
        &mut out,
        "🌧️ Rain Delay Impact",
        rain_impact(records).map(|d| format!("{d:+.1} minutes")),
    );
    line(
        &mut out,
        "🚌 Most Popular Transport",
        most_popular_mode(records).map(|m| m.title()),
    );
    line(&mut out, "📅 Worst Commute Day", worst_day(records));
    line(
        &mut out,
        "🎯 Commuter Satisfaction",
        happy_fraction(records).map(|f| {
            format!(
                "{:.1}% {} commuters {}",
                f * 100.0,
                Mood::Happy,
                Mood::Happy.glyph()
            )
        }),
    );

    for view in durations_by_weather(records) {
        let mean = view
            .summary
            .map(|s| format!("{:.1} minutes", s.mean))
            .ok_or_else(|| CommuteError::EmptyGroup {
                group: format!("weather={}", view.weather),
            });
        line(&mut out, &format!("{} Average", view.weather.label()), mean);
    }

    for &mood in Mood::VARIANTS {
        let count = records.iter().filter(|r| r.mood() == mood).count();
        line(
            &mut out,
            &format!("{} {} Commutes", mood.glyph(), mood.label()),
            Ok::<_, CommuteError>(count),
        );
    }

    out
}

fn line<T: Display>(out: &mut String, label: &str, value: Result<T, CommuteError>) {
    let _ = match value {
        Ok(v) => writeln!(out, "{label}: {v}"),
        Err(e) => writeln!(out, "{label}: unavailable ({e})"),
    };
}
