use serde::Serialize;
use whquest_core::game::{ACHIEVEMENTS, RANKS};
use whquest_core::Achievement;

use super::{CliResult, Session};

#[derive(Serialize)]
struct AchievementView {
    #[serde(flatten)]
    achievement: &'static Achievement,
    unlocked: bool,
}

pub fn achievements(json: bool) -> CliResult {
    let session = Session::open();
    let game = session.tracker.game();
    let views: Vec<AchievementView> = ACHIEVEMENTS
        .iter()
        .map(|achievement| AchievementView {
            achievement,
            unlocked: game.is_unlocked(achievement.id),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for view in &views {
        let check = if view.unlocked { "x" } else { " " };
        println!(
            "[{check}] {}{:<24} {}",
            session.glyph(view.achievement.glyph),
            view.achievement.title,
            view.achievement.description
        );
    }
    Ok(())
}

pub fn ranks(json: bool) -> CliResult {
    let session = Session::open();
    let current = session.tracker.game().current_rank();

    if json {
        println!("{}", serde_json::to_string_pretty(RANKS)?);
        return Ok(());
    }

    for rank in RANKS {
        let marker = if rank.level == current.level { ">" } else { " " };
        println!(
            "{marker} {}. {}{:<24} {:>4} XP",
            rank.level,
            session.glyph(rank.glyph),
            rank.title,
            rank.min_xp
        );
    }
    Ok(())
}
