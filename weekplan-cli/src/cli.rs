use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "weekplan")]
#[command(about = "Plan activities across the days of a week")]
pub struct Cli {
    /// Override the directory activities and goals are stored in
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which week to operate on. Defaults to the current ISO week.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct WeekArgs {
    /// ISO week number (1-53)
    #[arg(long, short)]
    pub week: Option<u8>,
    /// ISO week-numbering year, defaults to the current one
    #[arg(long, short, requires = "week")]
    pub year: Option<i32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the week grid with per-day progress
    Week {
        #[command(flatten)]
        week: WeekArgs,
        /// Show only the week after the selected one
        #[arg(long, conflicts_with = "previous")]
        next: bool,
        /// Show only the week before the selected one
        #[arg(long)]
        previous: bool,
    },
    /// Add an activity to one day of a week
    Add {
        title: String,
        /// Day of the week, 0 (Monday) to 6 (Sunday)
        #[arg(long, short)]
        day: Option<u8>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        /// Reminder time as HH:MM
        #[arg(long)]
        reminder: Option<String>,
        /// Number of repetitions to reach
        #[arg(long)]
        target: Option<u32>,
        #[command(flatten)]
        week: WeekArgs,
    },
    /// Mark or unmark an activity as done on a day
    Toggle { id: String, day: u8 },
    /// Enable or disable an activity's reminder
    Reminder { id: String, day: u8 },
    /// Record progress towards an activity's target
    Progress { id: String, count: u32 },
    /// Change fields of an activity
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long, conflicts_with = "clear_domain")]
        domain: Option<String>,
        #[arg(long)]
        clear_domain: bool,
        #[arg(long, conflicts_with = "clear_goal")]
        goal: Option<String>,
        #[arg(long)]
        clear_goal: bool,
        /// Reminder time as HH:MM
        #[arg(long, conflicts_with = "clear_reminder")]
        reminder: Option<String>,
        #[arg(long)]
        clear_reminder: bool,
        #[arg(long, conflicts_with = "clear_target")]
        target: Option<u32>,
        #[arg(long)]
        clear_target: bool,
        /// Replace the scheduled days, e.g. --days 0,2,4
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u8>>,
    },
    /// Delete an activity, or only undo one day's completion with --day
    Delete {
        id: String,
        #[arg(long)]
        day: Option<u8>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Search activities in every week
    Search {
        term: String,
        /// Jump to the Nth result (1-based) and show its week
        #[arg(long)]
        open: Option<usize>,
    },
    /// List the goals activities can link to
    Goals,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_week() {
        let cli = Cli::try_parse_from([
            "weekplan", "add", "Yoga", "--day", "2", "--week", "14", "--year", "2025",
        ])
        .unwrap();
        match cli.command {
            Commands::Add { title, day, week, .. } => {
                assert_eq!(title, "Yoga");
                assert_eq!(day, Some(2));
                assert_eq!(week.week, Some(14));
                assert_eq!(week.year, Some(2025));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn year_requires_week() {
        assert!(Cli::try_parse_from(["weekplan", "week", "--year", "2025"]).is_err());
    }

    #[test]
    fn edit_rejects_set_and_clear_together() {
        let result = Cli::try_parse_from([
            "weekplan",
            "edit",
            "a1",
            "--goal",
            "g1",
            "--clear-goal",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn edit_accepts_domain_or_clear_domain() {
        let cli = Cli::try_parse_from(["weekplan", "edit", "a1", "--clear-domain"]).unwrap();
        match cli.command {
            Commands::Edit {
                domain,
                clear_domain,
                ..
            } => {
                assert_eq!(domain, None);
                assert!(clear_domain);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from([
            "weekplan",
            "edit",
            "a1",
            "--domain",
            "health",
            "--clear-domain",
        ])
        .is_err());
    }

    #[test]
    fn edit_days_are_comma_separated() {
        let cli = Cli::try_parse_from(["weekplan", "edit", "a1", "--days", "0,2,4"]).unwrap();
        match cli.command {
            Commands::Edit { days, .. } => assert_eq!(days, Some(vec![0, 2, 4])),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn data_dir_is_global() {
        let cli =
            Cli::try_parse_from(["weekplan", "goals", "--data-dir", "/tmp/plans"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/plans")));
    }
}
