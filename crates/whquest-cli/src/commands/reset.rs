use whquest_core::CoreError;

use super::{CliResult, Session};

pub fn run(yes: bool) -> CliResult {
    if !yes {
        return Err(CoreError::Custom(
            "this erases all progress, XP and achievements; pass --yes to confirm".to_string(),
        ));
    }
    let mut session = Session::open();
    session.tracker.reset();
    println!("progress reset");
    session.warn_if_unsaved();
    Ok(())
}
