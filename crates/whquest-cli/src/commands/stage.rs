use serde::Serialize;
use whquest_core::{Catalog, Quest, ValidationError};

use super::{bar, CliResult, Session};

pub fn list(json: bool) -> CliResult {
    let session = Session::open();
    let overview = session.tracker.progress().stage_overview();

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    for stage in &overview {
        let marker = if !stage.unlocked {
            "locked"
        } else if stage.cleared {
            "cleared"
        } else if stage.current {
            "current"
        } else {
            "open"
        };
        println!(
            "{}. {}{:<20} {} {:>3}% {}/{} ({marker})",
            stage.id,
            session.glyph(&stage.glyph),
            stage.title,
            bar(stage.progress),
            stage.progress,
            stage.completed,
            stage.total
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct QuestView<'a> {
    #[serde(flatten)]
    quest: &'a Quest,
    completed: bool,
}

#[derive(Serialize)]
struct StageView<'a> {
    id: u32,
    title: &'a str,
    description: &'a str,
    progress: u8,
    unlocked: bool,
    quests: Vec<QuestView<'a>>,
}

pub fn show(id: u32, json: bool) -> CliResult {
    let session = Session::open();
    let progress = session.tracker.progress();
    let stage = session
        .tracker
        .catalog()
        .stage(id)
        .ok_or(ValidationError::UnknownStage(id))?;

    let view = StageView {
        id: stage.id,
        title: &stage.title,
        description: &stage.description,
        progress: progress.stage_progress(id),
        unlocked: progress.is_stage_unlocked(id),
        quests: stage
            .quests
            .iter()
            .map(|quest| QuestView {
                quest,
                completed: progress.is_quest_completed(&quest.id),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}{}", session.glyph(&stage.glyph), stage.title);
    println!("{}", stage.description);
    println!("{} {}%", bar(view.progress), view.progress);
    if !view.unlocked {
        if let Some(hint) = lock_hint(session.tracker.catalog(), id) {
            println!("{hint}");
        }
    }
    for q in &view.quests {
        let check = if q.completed { "x" } else { " " };
        println!(
            "[{check}] {:<4} {}{}",
            q.quest.id,
            session.glyph(&q.quest.glyph),
            q.quest.title
        );
        if let Some(url) = &q.quest.guide_url {
            println!("         {url}");
        }
    }
    Ok(())
}

/// Names the stage that has to be cleared first, following catalog order.
fn lock_hint(catalog: &Catalog, stage_id: u32) -> Option<String> {
    catalog
        .previous_stage(stage_id)
        .map(|prev| format!("Locked: complete stage {} first.", prev.id))
}
