use chrono::Datelike;
use clap::{Parser, Subcommand};
use hero_core::catalog::{BONUS_PER_DAY, BONUS_THRESHOLD, POINTS_PER_EXERCISE};
use hero_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hero")]
#[command(about = "Daily exercise tracker with points and streaks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_date_key)]
    today: Option<DateKey>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stats bar and a day card (default)
    Show {
        /// Day to show (defaults to today)
        #[arg(long, value_parser = parse_date_key)]
        date: Option<DateKey>,
    },

    /// List every day of the calendar year
    Calendar {
        /// Only list this month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Tick or untick an exercise
    Toggle {
        #[arg(long, value_parser = parse_date_key)]
        date: Option<DateKey>,

        /// Exercise id or its position on the card (1, 2, ...)
        exercise: String,
    },

    /// Add a custom exercise
    Add {
        #[arg(long, value_parser = parse_date_key)]
        date: Option<DateKey>,

        /// Exercise name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Remove an exercise
    Remove {
        #[arg(long, value_parser = parse_date_key)]
        date: Option<DateKey>,

        /// Exercise id or its position on the card (1, 2, ...)
        exercise: String,
    },

    /// Collect the daily bonus
    Bonus {
        #[arg(long, value_parser = parse_date_key)]
        date: Option<DateKey>,
    },

    /// Print the current streak
    Streak,

    /// Print the total points
    Points,

    /// Share the streak (or a reminder) by text message
    Share {
        /// Send a reminder instead of the streak
        #[arg(long)]
        reminder: bool,

        /// Print the sms: link instead of opening it
        #[arg(long)]
        print: bool,
    },
}

fn parse_date_key(s: &str) -> std::result::Result<DateKey, String> {
    DateKey::parse(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        hero_core::logging::init_with_level("debug");
    } else {
        hero_core::logging::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli.today.unwrap_or_else(DateKey::today);

    let mut tracker = Tracker::open(config.store(&data_dir))?;

    match cli.command.unwrap_or(Commands::Show { date: None }) {
        Commands::Show { date } => {
            let date = date.unwrap_or(today);
            print_stats(tracker.ledger(), today);
            print_day(tracker.ledger(), date, today);
        }
        Commands::Calendar { month } => cmd_calendar(tracker.ledger(), &config, month, today)?,
        Commands::Toggle { date, exercise } => {
            let date = date.unwrap_or(today);
            let id = resolve_exercise(tracker.ledger(), date, today, &exercise);
            let outcome = tracker.toggle_exercise(date, &id)?;
            report(outcome);
            print_day(tracker.ledger(), date, today);
        }
        Commands::Add { date, name } => {
            let date = date.unwrap_or(today);
            tracker.add_exercise(date, &name.join(" "))?;
            print_day(tracker.ledger(), date, today);
        }
        Commands::Remove { date, exercise } => {
            let date = date.unwrap_or(today);
            let id = resolve_exercise(tracker.ledger(), date, today, &exercise);
            tracker.remove_exercise(date, &id)?;
            print_day(tracker.ledger(), date, today);
        }
        Commands::Bonus { date } => {
            let date = date.unwrap_or(today);
            let outcome = tracker.collect_daily_bonus(date)?;
            report(outcome);
            print_stats(tracker.ledger(), today);
            print_day(tracker.ledger(), date, today);
        }
        Commands::Streak => {
            println!("{}", tracker.ledger().current_streak(today));
        }
        Commands::Points => {
            println!("{}", tracker.ledger().total_points());
        }
        Commands::Share { reminder, print } => {
            let message = if reminder {
                share::reminder_message(&config.share.app_name)
            } else {
                share::streak_message(
                    &config.share.app_name,
                    tracker.ledger().current_streak(today),
                )
            };
            cmd_share(&message, print);
        }
    }

    Ok(())
}

/// Map a position or id to an exercise id; unknown references pass through
/// unchanged so the ledger can ignore them
fn resolve_exercise(ledger: &Ledger, date: DateKey, today: DateKey, reference: &str) -> String {
    let view = DayView::build(ledger, date, today);
    view.resolve_exercise(reference)
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::debug!("No exercise matches {:?} on {}", reference, date);
            reference.to_string()
        })
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::BonusCollected(points) => {
            println!("🎉 +{} XP! DAY BONUS EARNED! 🎉", points);
        }
        other => {
            if let Some(points) = other.points_awarded() {
                println!("+{} XP!", points);
            }
        }
    }
}

fn print_stats(ledger: &Ledger, today: DateKey) {
    println!(
        "🔥 STREAK: {}    ⭐ POWER XP: {}",
        ledger.current_streak(today),
        ledger.total_points()
    );
}

fn print_day(ledger: &Ledger, date: DateKey, today: DateKey) {
    let view = DayView::build(ledger, date, today);
    let today_marker = if view.is_today { "  (today)" } else { "" };

    println!();
    println!(
        "── {} {} {}{} ──",
        view.label.weekday, view.label.short_date, view.label.year, today_marker
    );

    if view.exercises.is_empty() {
        println!("  (no exercises)");
    }
    for (i, exercise) in view.exercises.iter().enumerate() {
        let (check, decor) = if exercise.completed {
            ("[x]", "⭐")
        } else {
            ("[ ]", "✨")
        };
        println!(
            "  {}. {} {}  +{} pts  {}",
            i + 1,
            check,
            exercise.name,
            POINTS_PER_EXERCISE,
            decor
        );
    }

    match view.bonus {
        BonusState::Collected => println!("  🏆 DAY BONUS EARNED!"),
        BonusState::Ready => println!("  🟢 Collect Daily Bonus! (run `hero bonus`)"),
        BonusState::Locked => println!(
            "  🎁 Bonus: +{} XP ({}/{} done)",
            BONUS_PER_DAY, view.completed_count, BONUS_THRESHOLD
        ),
    }
    println!();
}

fn cmd_calendar(ledger: &Ledger, config: &Config, month: Option<u32>, today: DateKey) -> Result<()> {
    let calendar = config.calendar()?;
    for key in calendar.filter(|k| month.map_or(true, |m| k.date().month() == m)) {
        let view = DayView::build(ledger, key, today);
        let bonus = match view.bonus {
            BonusState::Collected => "🏆",
            BonusState::Ready => "🟢",
            BonusState::Locked => "",
        };
        let today_marker = if view.is_today { " ◀ today" } else { "" };
        println!(
            "{}  {:<9} {:>5}  {}/{} {}{}",
            key,
            view.label.weekday,
            view.label.short_date,
            view.completed_count,
            view.exercises.len(),
            bonus,
            today_marker
        );
    }
    Ok(())
}

fn cmd_share(message: &str, print: bool) {
    let uri = share::sms_uri(message);
    if print {
        println!("{}", uri);
        return;
    }

    if let Err(e) = open::that(&uri) {
        tracing::warn!("Could not open the message composer: {}", e);
        println!("{}", message);
        println!("{}", uri);
    }
}
