//! Plain text rendition of the planner state.

use itertools::Itertools;
use std::io::{self, Write};
use time::{macros::format_description, Date};
use weekplan::{extract_links, models::Activity, models::Goal, DayColumn, SearchHit, WeekView};

const BAR_WIDTH: usize = 10;

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| date.to_string())
}

pub fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress
    )
}

fn activity_details(activity: &Activity) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(reminder) = &activity.reminder {
        let state = if reminder.enabled { "" } else { " (off)" };
        parts.push(format!("reminder {}{}", reminder.time_label(), state));
    }
    if let Some(target) = activity.target_count {
        parts.push(format!("{}/{}", activity.progress_count.unwrap_or(0), target));
    }
    if let Some(domain) = &activity.domain_id {
        parts.push(domain.to_string());
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn write_day<F>(out: &mut impl Write, column: &DayColumn, goal_for: &F) -> io::Result<()>
where
    F: Fn(&Activity) -> Option<Goal>,
{
    writeln!(
        out,
        "{:<9} {}  {}",
        column.day.weekday().to_string(),
        format_date(column.date),
        progress_bar(column.progress)
    )?;

    for activity in &column.activities {
        let mark = if activity.is_completed_on(column.day) { "x" } else { " " };
        writeln!(out, "  [{mark}] {}  ({})", activity.title, activity.id)?;
        if let Some(details) = activity_details(activity) {
            writeln!(out, "      {details}")?;
        }
        if let Some(goal) = goal_for(activity) {
            writeln!(out, "      goal: {}", goal.title)?;
        }
        if let Some(description) = &activity.description {
            let links = extract_links(description);
            if !links.is_empty() {
                writeln!(out, "      links: {}", links.iter().join(" "))?;
            }
        }
    }
    Ok(())
}

/// Write the week grid. `goal_for` resolves the goal line shown under an
/// activity; pass `|_| None` to hide goals.
pub fn write_week<F>(out: &mut impl Write, view: &WeekView, goal_for: F) -> io::Result<()>
where
    F: Fn(&Activity) -> Option<Goal>,
{
    let dates = view.week.dates();
    writeln!(
        out,
        "{} ({} - {})",
        capitalize(&view.week.to_string()),
        format_date(dates[0]),
        format_date(dates[6])
    )?;

    if view.is_empty() {
        writeln!(out, "No activities planned.")?;
    }

    for column in &view.days {
        writeln!(out)?;
        write_day(out, column, &goal_for)?;
    }
    Ok(())
}

pub fn render_hit(index: usize, hit: &SearchHit) -> String {
    let mark = if hit.completed { "x" } else { " " };
    format!(
        "{:>3}. [{mark}] {} {}  {}  ({}, #{})",
        index + 1,
        hit.day.weekday(),
        format_date(hit.date),
        hit.title,
        hit.week,
        hit.anchor()
    )
}

pub fn render_goals(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }
    goals
        .iter()
        .map(|goal| format!("{}  {}\n", goal.id, goal.title))
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
