use std::fmt::Write;

use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;

use crate::currency::{format_amount, format_signed};
use crate::forecast::{ForecastPoint, ForecastSummary, PointKind};
use crate::ledger::{RecurringRule, ScheduledOccurrence, ScheduledStatus};
use crate::simulation::ScenarioComparison;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Positive,
    Negative,
    Warning,
}

struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    fn money(value: Decimal) -> Self {
        Self {
            text: format_amount(value),
            tone: tone_for(value),
        }
    }

    fn delta(value: Decimal) -> Self {
        Self {
            text: format_signed(value),
            tone: tone_for(value),
        }
    }
}

fn tone_for(value: Decimal) -> Tone {
    if value < Decimal::ZERO {
        Tone::Negative
    } else if value > Decimal::ZERO {
        Tone::Positive
    } else {
        Tone::Plain
    }
}

fn paint(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Plain => text.to_string(),
        Tone::Positive => text.green().to_string(),
        Tone::Negative => text.red().to_string(),
        Tone::Warning => text.yellow().to_string(),
    }
}

/// Renders left-aligned text columns; width is computed before styling so
/// escape codes never skew alignment.
fn render_table(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.text.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{:<width$}", header, width = width))
        .collect();
    let _ = writeln!(out, "{}", header_line.join("  ").trim_end().bold());
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let padded = format!("{:<width$}", cell.text, width = width);
                paint(&padded, cell.tone)
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

pub fn section(title: &str) -> String {
    format!("=== {} ===", title.trim()).bold().to_string()
}

pub fn render_series(series: &[ForecastPoint]) -> String {
    let rows: Vec<Vec<Cell>> = series
        .iter()
        .enumerate()
        .map(|(offset, point)| {
            vec![
                Cell::plain(offset.to_string()),
                Cell::plain(point.date.to_string()),
                Cell::delta(point.change),
                Cell::money(point.balance),
                Cell::plain(match point.kind {
                    PointKind::Current => "current",
                    PointKind::Projected => "projected",
                }),
            ]
        })
        .collect();
    render_table(&["Day", "Date", "Change", "Balance", "Kind"], &rows)
}

pub fn render_summary(summary: &ForecastSummary) -> String {
    let negative = match summary.days_until_negative {
        Some(days) => Cell {
            text: format!("in {days} day(s)"),
            tone: Tone::Negative,
        },
        None => Cell::plain("never"),
    };
    let rows = vec![
        vec![Cell::plain("Current balance"), Cell::money(summary.current_balance)],
        vec![Cell::plain("Projected balance"), Cell::money(summary.projected_balance)],
        vec![Cell::plain("Highest balance"), Cell::money(summary.highest_balance)],
        vec![Cell::plain("Lowest balance"), Cell::money(summary.lowest_balance)],
        vec![Cell::plain("Goes negative"), negative],
        vec![
            Cell::plain("Average daily change"),
            Cell::delta(summary.average_daily_change),
        ],
    ];
    render_table(&["Metric", "Value"], &rows)
}

pub fn render_comparison(comparison: &ScenarioComparison) -> String {
    let negative = |summary: &ForecastSummary| match summary.days_until_negative {
        Some(days) => Cell {
            text: days.to_string(),
            tone: Tone::Negative,
        },
        None => Cell::plain("-"),
    };
    let rows = vec![
        vec![
            Cell::plain("Projected balance"),
            Cell::money(comparison.baseline.projected_balance),
            Cell::money(comparison.adjusted.projected_balance),
            Cell::delta(comparison.projected_delta),
        ],
        vec![
            Cell::plain("Lowest balance"),
            Cell::money(comparison.baseline.lowest_balance),
            Cell::money(comparison.adjusted.lowest_balance),
            Cell::delta(comparison.lowest_delta),
        ],
        vec![
            Cell::plain("Days until negative"),
            negative(&comparison.baseline),
            negative(&comparison.adjusted),
            Cell::plain(""),
        ],
    ];
    render_table(&["Metric", "Baseline", "Scenario", "Delta"], &rows)
}

fn status_cell(status: ScheduledStatus) -> Cell {
    Cell {
        text: status.label().to_string(),
        tone: match status {
            ScheduledStatus::Overdue => Tone::Negative,
            ScheduledStatus::DueSoon => Tone::Warning,
            ScheduledStatus::Upcoming => Tone::Plain,
        },
    }
}

pub fn render_rules(rules: &[RecurringRule], reference: NaiveDate, due_soon_days: i64) -> String {
    let rows: Vec<Vec<Cell>> = rules
        .iter()
        .map(|rule| {
            vec![
                Cell::plain(
                    rule.description
                        .clone()
                        .unwrap_or_else(|| rule.id.to_string()),
                ),
                Cell::plain(rule.frequency.label()),
                Cell::delta(rule.signed_amount()),
                Cell::plain(rule.next_date.to_string()),
                if rule.is_active {
                    status_cell(rule.status(reference, due_soon_days))
                } else {
                    Cell::plain("inactive")
                },
            ]
        })
        .collect();
    render_table(&["Rule", "Frequency", "Amount", "Next date", "Status"], &rows)
}

pub fn render_schedule(occurrences: &[ScheduledOccurrence]) -> String {
    if occurrences.is_empty() {
        return "No recurring activity inside the horizon.\n".to_string();
    }
    let rows: Vec<Vec<Cell>> = occurrences
        .iter()
        .map(|occurrence| {
            vec![
                Cell::plain(occurrence.date.to_string()),
                Cell::plain(
                    occurrence
                        .description
                        .clone()
                        .unwrap_or_else(|| occurrence.rule_id.to_string()),
                ),
                Cell::delta(occurrence.signed_amount),
                status_cell(occurrence.status),
            ]
        })
        .collect();
    render_table(&["Date", "Rule", "Amount", "Status"], &rows)
}
