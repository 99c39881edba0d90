use clap::Subcommand;
use whquest_core::rules::parse_day;
use whquest_core::ValidationError;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum DepartureAction {
    /// Set the planned departure date
    Set {
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// Forget the departure date
    Clear,
    /// Show the countdown
    Show,
}

pub fn run(action: DepartureAction) -> CliResult {
    let mut session = Session::open();

    match action {
        DepartureAction::Set { date } => {
            let day = parse_day(&date).ok_or(ValidationError::InvalidDate { value: date })?;
            session.tracker.departure_mut().set(day);
            println!("{}", session.tracker.departure_label());
        }
        DepartureAction::Clear => {
            session.tracker.departure_mut().clear();
            println!("departure date cleared");
        }
        DepartureAction::Show => {
            if let Some(day) = session.tracker.departure().date() {
                println!("{day}");
            }
            println!("{}", session.tracker.departure_label());
        }
    }
    session.warn_if_unsaved();
    Ok(())
}
