use serde::Serialize;
use whquest_core::{CompletionStats, Quest};

use super::{bar, CliResult, Session};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    #[serde(flatten)]
    stats: CompletionStats,
    current_stage: u32,
    current_quest: Option<&'a Quest>,
    departure: Option<chrono::NaiveDate>,
    days_until_departure: Option<i64>,
}

pub fn run(json: bool) -> CliResult {
    let session = Session::open();
    let tracker = &session.tracker;
    let stats = tracker.stats();
    let progress = tracker.progress();

    if json {
        let view = StatusView {
            stats,
            current_stage: progress.current_stage(),
            current_quest: progress.current_quest(),
            departure: tracker.departure().date(),
            days_until_departure: tracker.days_until_departure(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{} {}% ({}/{} quests)",
        bar(stats.total_progress),
        stats.total_progress,
        stats.completed,
        stats.total
    );
    println!(
        "Rank: {}{} (level {}) - {} XP",
        session.glyph(stats.rank.glyph),
        stats.rank.title,
        stats.rank.level,
        stats.xp
    );
    match stats.next_rank {
        Some(next) => println!(
            "Next: {} in {} XP {} {}%",
            next.title,
            stats.xp_to_next_rank,
            bar(stats.xp_progress),
            stats.xp_progress
        ),
        None => println!("Top rank reached"),
    }
    println!("Streak: {} day(s)", stats.streak);
    println!(
        "Achievements: {}/{}",
        stats.unlocked_achievements.len(),
        stats.total_achievements
    );
    if stats.days_since_start == 0 {
        println!("Started today");
    } else {
        println!("Day {} of your journey", stats.days_since_start);
    }
    if let Some(milestone) = stats.next_milestone {
        println!("Next milestone: {milestone} quests");
    }
    match progress.current_quest() {
        Some(quest) => println!(
            "Up next (stage {}): {}{} [{}]",
            progress.current_stage(),
            session.glyph(&quest.glyph),
            quest.title,
            quest.id
        ),
        None => println!("All quests complete!"),
    }
    println!("{}", tracker.departure_label());
    Ok(())
}
