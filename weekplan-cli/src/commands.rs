use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use weekplan::{
    models::{
        ActivityDraft, ActivityId, ActivityPatch, DayIndex, DeleteIntent, DeleteOutcome, DomainId,
        GoalId, Reminder, WeekId,
    },
    ports::inbound::PlannerService,
    PendingDelete, WeekSelection,
};

use crate::cli::{Commands, WeekArgs};
use crate::config::WeekplanConfig;
use crate::render;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Week used when no `--week` is given
    pub current_week: WeekId,
    pub show_goals: bool,
}

fn resolve_week(args: WeekArgs, current: WeekId) -> Result<WeekId> {
    match args.week {
        Some(week) => Ok(WeekId::new(week, args.year.unwrap_or(current.year()))?),
        None => Ok(current),
    }
}

fn parse_days(days: Vec<u8>) -> Result<BTreeSet<DayIndex>> {
    days.into_iter()
        .map(|d| DayIndex::new(d).map_err(anyhow::Error::from))
        .collect()
}

fn print_week<P: PlannerService>(
    planner: &P,
    week: WeekId,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<()> {
    let view = planner.week_view(week)?;
    if options.show_goals {
        render::write_week(out, &view, |a| planner.goal_for(a))?;
    } else {
        render::write_week(out, &view, |_| None)?;
    }
    Ok(())
}

/// Read a yes/no answer. An empty line confirms, end of input cancels.
fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{prompt} [Y/n] ")?;
    out.flush()?;
    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    if read == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(matches!(answer.trim(), "" | "y" | "Y" | "yes"))
}

/// Print the config path, writing a default config there if none exists.
pub fn config_path(out: &mut impl Write) -> Result<()> {
    let path = WeekplanConfig::config_path()?;
    if !path.exists() {
        WeekplanConfig::default().save_to(&path)?;
    }
    writeln!(out, "{}", path.display())?;
    Ok(())
}

pub fn run<P: PlannerService>(
    planner: &mut P,
    command: Commands,
    options: &RunOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Week {
            week,
            next,
            previous,
        } => {
            let mut selection = WeekSelection::new(options.current_week);
            if week.week.is_some() {
                selection.change_week(resolve_week(week, options.current_week)?);
            }
            if next {
                selection.next_week();
            } else if previous {
                selection.previous_week();
            }
            print_week(planner, selection.week(), options, out)?;
        }
        Commands::Add {
            title,
            day,
            description,
            domain,
            goal,
            reminder,
            target,
            week,
        } => {
            let week = resolve_week(week, options.current_week)?;
            let day = day.map(DayIndex::new).transpose()?;

            let mut draft = ActivityDraft::new(title);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            if let Some(domain) = domain {
                draft = draft.with_domain(DomainId::new(domain));
            }
            if let Some(goal) = goal {
                draft = draft.with_goal(GoalId::new(goal));
            }
            if let Some(reminder) = reminder {
                draft = draft.with_reminder(Reminder::parse(&reminder)?);
            }
            if let Some(target) = target {
                draft = draft.with_target(target);
            }

            let activity = planner.add_activity(draft, day, week)?;
            let day = activity.selected_days.iter().next().copied();
            if let Some(day) = day {
                writeln!(
                    out,
                    "Added '{}' ({}) on {} {}",
                    activity.title,
                    activity.id,
                    day.weekday(),
                    render::format_date(week.date_of(day))
                )?;
            }
        }
        Commands::Toggle { id, day } => {
            let day = DayIndex::new(day)?;
            let activity = planner.toggle_completion(&ActivityId::new(id), day)?;
            let state = if activity.is_completed_on(day) {
                "done"
            } else {
                "not done"
            };
            writeln!(out, "'{}' marked {} on {}", activity.title, state, day.weekday())?;
        }
        Commands::Reminder { id, day } => {
            let day = DayIndex::new(day)?;
            let activity = planner.toggle_reminder(&ActivityId::new(id), day)?;
            if let Some(reminder) = activity.reminder {
                let state = if reminder.enabled { "on" } else { "off" };
                writeln!(
                    out,
                    "Reminder for '{}' at {} is {}",
                    activity.title,
                    reminder.time_label(),
                    state
                )?;
            }
        }
        Commands::Progress { id, count } => {
            let activity = planner.record_progress(&ActivityId::new(id), count)?;
            writeln!(
                out,
                "'{}' progress {}/{}",
                activity.title,
                activity.progress_count.unwrap_or(0),
                activity.target_count.unwrap_or(0)
            )?;
        }
        Commands::Edit {
            id,
            title,
            description,
            clear_description,
            domain,
            clear_domain,
            goal,
            clear_goal,
            reminder,
            clear_reminder,
            target,
            clear_target,
            days,
        } => {
            let reminder = reminder.map(|r| Reminder::parse(&r)).transpose()?;
            let patch = ActivityPatch {
                title,
                description: if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                },
                domain_id: if clear_domain {
                    Some(None)
                } else {
                    domain.map(|d| Some(DomainId::new(d)))
                },
                goal_id: if clear_goal {
                    Some(None)
                } else {
                    goal.map(|g| Some(GoalId::new(g)))
                },
                reminder: if clear_reminder {
                    Some(None)
                } else {
                    reminder.map(Some)
                },
                target_count: if clear_target {
                    Some(None)
                } else {
                    target.map(Some)
                },
                selected_days: days.map(parse_days).transpose()?,
                ..Default::default()
            };
            if patch.is_empty() {
                bail!("Nothing to change, pass at least one field to edit");
            }

            let activity = planner.patch_activity(&ActivityId::new(id), patch)?;
            writeln!(out, "Updated '{}' ({})", activity.title, activity.id)?;
        }
        Commands::Delete { id, day, yes } => {
            let id = ActivityId::new(id);
            let activity = planner.activity(&id)?;

            let mut pending = PendingDelete::new();
            pending.request(match day {
                Some(day) => DeleteIntent::UnmarkDay(id, DayIndex::new(day)?),
                None => DeleteIntent::FullRemoval(id),
            });
            let prompt = match pending.pending() {
                Some(DeleteIntent::UnmarkDay(_, day)) => {
                    format!("Unmark '{}' on {}?", activity.title, day.weekday())
                }
                _ => format!("Delete '{}'?", activity.title),
            };

            if !yes && !confirm(&prompt, input, out)? {
                pending.cancel();
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }

            if let Some(intent) = pending.confirm() {
                match planner.delete(intent)? {
                    DeleteOutcome::Removed(removed) => {
                        writeln!(out, "Deleted '{}'", removed.title)?
                    }
                    DeleteOutcome::Unmarked(updated) => {
                        writeln!(out, "Unmarked '{}'", updated.title)?
                    }
                }
            }
        }
        Commands::Search { term, open } => {
            let hits = planner.search(&term)?;
            if hits.is_empty() {
                writeln!(out, "No activities match '{term}'.")?;
                return Ok(());
            }
            for (index, hit) in hits.iter().enumerate() {
                writeln!(out, "{}", render::render_hit(index, hit))?;
            }

            if let Some(position) = open {
                let Some(hit) = position.checked_sub(1).and_then(|i| hits.get(i)) else {
                    bail!("No search result number {position}, there are {}", hits.len());
                };
                let mut selection = WeekSelection::new(options.current_week);
                let jump = selection.jump_to(hit);
                writeln!(out)?;
                if jump.week_changed {
                    writeln!(out, "Switched to {}", selection.week())?;
                }
                writeln!(out, "Showing #{}", jump.anchor)?;
                writeln!(out)?;
                print_week(planner, selection.week(), options, out)?;
            }
        }
        Commands::Goals => {
            write!(out, "{}", render::render_goals(&planner.goals()))?;
        }
        Commands::ConfigPath => config_path(out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weekplan::{
        models::{Activity, Goal},
        services::PlannerServiceImpl,
        InMemoryActivityStore, StaticGoals,
    };

    type Planner = PlannerServiceImpl<InMemoryActivityStore, StaticGoals>;

    fn options() -> RunOptions {
        RunOptions {
            current_week: WeekId::new(15, 2025).unwrap(),
            show_goals: true,
        }
    }

    fn planner_with(activities: Vec<Activity>) -> Planner {
        PlannerServiceImpl::new(
            InMemoryActivityStore::with_activities(activities),
            StaticGoals::new(vec![Goal::new("g1", "Get fit")]),
        )
    }

    fn activity(title: &str, day: u8, week: WeekId) -> Activity {
        Activity::from_draft(ActivityDraft::new(title), DayIndex::new(day).unwrap(), week).unwrap()
    }

    fn exec(planner: &mut Planner, command: Commands, stdin: &str) -> Result<String> {
        let mut input = stdin.as_bytes();
        let mut out = Vec::new();
        run(planner, command, &options(), &mut input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn add(title: &str, day: Option<u8>) -> Commands {
        Commands::Add {
            title: title.to_string(),
            day,
            description: None,
            domain: None,
            goal: Some("g1".to_string()),
            reminder: Some("06:45".to_string()),
            target: None,
            week: WeekArgs::default(),
        }
    }

    #[test]
    fn add_then_week_shows_activity_with_goal() {
        let mut planner = planner_with(vec![]);
        let added = exec(&mut planner, add("Run", Some(1)), "").unwrap();
        assert!(added.starts_with("Added 'Run'"));
        assert!(added.contains("Tuesday 08/04/2025"));

        let week = exec(
            &mut planner,
            Commands::Week {
                week: WeekArgs::default(),
                next: false,
                previous: false,
            },
            "",
        )
        .unwrap();
        assert!(week.contains("[ ] Run"));
        assert!(week.contains("reminder 06:45"));
        assert!(week.contains("goal: Get fit"));
    }

    #[test]
    fn add_without_day_changes_nothing() {
        let mut planner = planner_with(vec![]);
        let err = exec(&mut planner, add("Run", None), "").unwrap_err();
        assert!(err.to_string().contains("day"));
        assert!(planner.store().is_empty());
    }

    #[test]
    fn toggle_reports_new_state() {
        let a = activity("Stretch", 3, options().current_week);
        let mut planner = planner_with(vec![a.clone()]);
        let toggle = || Commands::Toggle {
            id: a.id.to_string(),
            day: 3,
        };

        assert!(exec(&mut planner, toggle(), "").unwrap().contains("marked done"));
        assert!(exec(&mut planner, toggle(), "").unwrap().contains("marked not done"));
    }

    #[test]
    fn delete_asks_before_removing() {
        let a = activity("Stretch", 3, options().current_week);
        let mut planner = planner_with(vec![a.clone()]);
        let delete = || Commands::Delete {
            id: a.id.to_string(),
            day: None,
            yes: false,
        };

        let cancelled = exec(&mut planner, delete(), "n\n").unwrap();
        assert!(cancelled.contains("Cancelled."));
        assert_eq!(planner.store().len(), 1);

        let closed_stdin = exec(&mut planner, delete(), "").unwrap();
        assert!(closed_stdin.contains("Cancelled."));
        assert_eq!(planner.store().len(), 1);

        let deleted = exec(&mut planner, delete(), "\n").unwrap();
        assert!(deleted.contains("Deleted 'Stretch'"));
        assert!(planner.store().is_empty());
    }

    #[test]
    fn delete_with_day_only_unmarks() {
        let week = options().current_week;
        let mut a = activity("Stretch", 3, week);
        a.completed_days.insert(DayIndex::new(3).unwrap(), true);
        let mut planner = planner_with(vec![a.clone()]);

        let output = exec(
            &mut planner,
            Commands::Delete {
                id: a.id.to_string(),
                day: Some(3),
                yes: true,
            },
            "",
        )
        .unwrap();
        assert!(output.contains("Unmarked 'Stretch'"));
        let kept = planner.activity(&a.id).unwrap();
        assert!(!kept.is_completed_on(DayIndex::new(3).unwrap()));
    }

    #[test]
    fn search_open_switches_to_hit_week() {
        let other_week = WeekId::new(2, 2026).unwrap();
        let a = activity("Dentist", 4, other_week);
        let mut planner = planner_with(vec![a.clone()]);

        let output = exec(
            &mut planner,
            Commands::Search {
                term: "dent".to_string(),
                open: Some(1),
            },
            "",
        )
        .unwrap();
        assert!(output.contains(&format!("#activity-{}-4", a.id)));
        assert!(output.contains("Switched to week 2 of 2026"));
        assert!(output.contains("Week 2 of 2026"));
    }

    #[test]
    fn search_open_out_of_range_fails() {
        let a = activity("Dentist", 4, options().current_week);
        let mut planner = planner_with(vec![a]);
        let result = exec(
            &mut planner,
            Commands::Search {
                term: "dent".to_string(),
                open: Some(5),
            },
            "",
        );
        assert!(result.is_err());
    }

    #[test]
    fn edit_without_fields_fails() {
        let a = activity("Stretch", 3, options().current_week);
        let mut planner = planner_with(vec![a.clone()]);
        let result = exec(
            &mut planner,
            Commands::Edit {
                id: a.id.to_string(),
                title: None,
                description: None,
                clear_description: false,
                domain: None,
                clear_domain: false,
                goal: None,
                clear_goal: false,
                reminder: None,
                clear_reminder: false,
                target: None,
                clear_target: false,
                days: None,
            },
            "",
        );
        assert!(result.is_err());
    }

    #[test]
    fn edit_replaces_days() {
        let a = activity("Stretch", 3, options().current_week);
        let mut planner = planner_with(vec![a.clone()]);
        exec(
            &mut planner,
            Commands::Edit {
                id: a.id.to_string(),
                title: Some("Long stretch".to_string()),
                description: None,
                clear_description: false,
                domain: None,
                clear_domain: false,
                goal: None,
                clear_goal: false,
                reminder: None,
                clear_reminder: false,
                target: None,
                clear_target: false,
                days: Some(vec![0, 6]),
            },
            "",
        )
        .unwrap();

        let updated = planner.activity(&a.id).unwrap();
        assert_eq!(updated.title, "Long stretch");
        assert!(updated.is_scheduled_on(DayIndex::new(6).unwrap()));
        assert!(!updated.is_scheduled_on(DayIndex::new(3).unwrap()));
    }

    #[test]
    fn edit_sets_and_clears_domain() {
        let a = activity("Stretch", 3, options().current_week);
        let mut planner = planner_with(vec![a.clone()]);
        let edit = |domain: Option<&str>, clear_domain: bool| Commands::Edit {
            id: a.id.to_string(),
            title: None,
            description: None,
            clear_description: false,
            domain: domain.map(str::to_string),
            clear_domain,
            goal: None,
            clear_goal: false,
            reminder: None,
            clear_reminder: false,
            target: None,
            clear_target: false,
            days: None,
        };

        exec(&mut planner, edit(Some("health"), false), "").unwrap();
        assert_eq!(
            planner.activity(&a.id).unwrap().domain_id,
            Some(DomainId::new("health"))
        );

        exec(&mut planner, edit(None, true), "").unwrap();
        assert_eq!(planner.activity(&a.id).unwrap().domain_id, None);
    }

    #[test]
    fn week_flag_selects_another_week() {
        let other_week = WeekId::new(20, 2025).unwrap();
        let mut planner = planner_with(vec![activity("Hike", 5, other_week)]);

        let output = exec(
            &mut planner,
            Commands::Week {
                week: WeekArgs {
                    week: Some(20),
                    year: None,
                },
                next: false,
                previous: false,
            },
            "",
        )
        .unwrap();
        assert!(output.starts_with("Week 20 of 2025"));
        assert!(output.contains("[ ] Hike"));
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut planner = planner_with(vec![]);
        let err = exec(
            &mut planner,
            Commands::Progress {
                id: "missing".to_string(),
                count: 1,
            },
            "",
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn goals_are_listed() {
        let mut planner = planner_with(vec![]);
        let output = exec(&mut planner, Commands::Goals, "").unwrap();
        assert_eq!(output, "g1  Get fit\n");
    }
}
