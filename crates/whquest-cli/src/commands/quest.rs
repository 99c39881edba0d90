use clap::Subcommand;
use whquest_core::{CoreError, Event, ValidationError};

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum QuestAction {
    /// Mark a quest as completed
    Done {
        /// Quest ID (e.g. "1-2")
        id: String,
        /// Output events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a quest as not completed
    Undo {
        /// Quest ID
        id: String,
        /// Output events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a quest's completion
    Toggle {
        /// Quest ID
        id: String,
        /// Output events as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: QuestAction) -> CliResult {
    let mut session = Session::open();

    let (events, json) = match action {
        QuestAction::Done { id, json } => {
            ensure_unlocked(&session, &id)?;
            (session.tracker.complete_quest(&id), json)
        }
        QuestAction::Undo { id, json } => (session.tracker.uncomplete_quest(&id), json),
        QuestAction::Toggle { id, json } => {
            if !session.tracker.progress().is_quest_completed(&id) {
                ensure_unlocked(&session, &id)?;
            }
            (session.tracker.toggle_quest(&id), json)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else if events.is_empty() {
        println!("nothing changed");
    } else {
        for event in &events {
            println!("{}", describe(&session, event));
        }
    }
    session.warn_if_unsaved();
    Ok(())
}

/// Reject unknown quests and quests whose stage is still locked.
fn ensure_unlocked(session: &Session, quest_id: &str) -> CliResult {
    let stage = session
        .tracker
        .catalog()
        .stage_of(quest_id)
        .ok_or_else(|| ValidationError::UnknownQuest(quest_id.to_string()))?;
    if !session.tracker.progress().is_stage_unlocked(stage.id) {
        return Err(CoreError::Custom(format!(
            "stage {} is locked; finish the previous stage first",
            stage.id
        )));
    }
    Ok(())
}

fn describe(session: &Session, event: &Event) -> String {
    let catalog = session.tracker.catalog();
    match event {
        Event::QuestCompleted {
            quest_id,
            xp_gained,
            ..
        } => {
            let title = catalog
                .quest(quest_id)
                .map(|q| q.title.as_str())
                .unwrap_or(quest_id.as_str());
            format!("Completed {title} (+{xp_gained} XP)")
        }
        Event::QuestUncompleted {
            quest_id, xp_lost, ..
        } => format!("Reopened {quest_id} (-{xp_lost} XP)"),
        Event::LeveledUp {
            to_level, title, ..
        } => format!("Level up! You are now level {to_level}: {title}"),
        Event::AchievementUnlocked {
            achievement, title, ..
        } => format!(
            "Achievement unlocked: {}{title}",
            session.glyph(achievement.definition().glyph)
        ),
        Event::StageCleared { stage_id, .. } => match catalog.stage(*stage_id) {
            Some(stage) => format!("Stage {stage_id} cleared: {}", stage.title),
            None => format!("Stage {stage_id} cleared"),
        },
        Event::StreakUpdated { streak, .. } => format!("Streak: {streak} day(s)"),
        Event::ProgressReset { .. } => "Progress reset".to_string(),
    }
}
