use crate::app::AppState;
use crate::errors::WrapError;
use crate::wrap::Strategy;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Application control
    Quit,

    // Constraints
    Widen,
    Narrow,
    AddRow,
    RemoveRow,

    // Options
    ToggleCenter,
    ToggleNonBreakingSpaces,
    CycleStrategy,

    // Terminal width in cells
    Resize(u16),
}

pub fn execute_action(action: Action, app: &mut AppState) -> Result<()> {
    app.clear_message();

    let outcome = match action {
        Action::Quit => {
            app.running = false;
            Ok(())
        }
        Action::Widen => {
            let wider = app.requested_width.saturating_add(app.config.cell_width);
            set_requested_width(app, wider)
        }
        Action::Narrow => {
            let narrower = app.requested_width.saturating_sub(app.config.cell_width);
            if narrower == 0 {
                app.set_message("Width cannot go below one cell");
                Ok(())
            } else {
                set_requested_width(app, narrower)
            }
        }
        Action::AddRow => app.label.set_max_rows(app.label.max_rows() + 1),
        Action::RemoveRow => {
            if app.label.max_rows() <= 1 {
                app.set_message("A label needs at least one row");
                Ok(())
            } else {
                app.label.set_max_rows(app.label.max_rows() - 1)
            }
        }
        Action::ToggleCenter => {
            let options = app.label.options().clone();
            let center = !options.center;
            app.label.set_options(options.centered(center))
        }
        Action::ToggleNonBreakingSpaces => {
            let options = app.label.options().clone();
            let enabled = !options.non_breaking_spaces;
            app.label.set_options(options.non_breaking_spaces(enabled))
        }
        Action::CycleStrategy => {
            let options = app.label.options().clone();
            let next = next_strategy(options.strategy);
            app.label.set_options(options.strategy(next))
        }
        Action::Resize(width) => {
            app.terminal_width = width;
            app.fit_label()
        }
    };

    report(app, outcome)
}

fn set_requested_width(app: &mut AppState, width: u32) -> Result<(), WrapError> {
    app.requested_width = width;
    app.fit_label()
}

fn next_strategy(strategy: Strategy) -> Strategy {
    match strategy {
        Strategy::Auto => Strategy::Exhaustive,
        Strategy::Exhaustive => Strategy::Dynamic,
        Strategy::Dynamic => Strategy::Auto,
    }
}

// Wrapping problems are shown to the user; they never end the session.
fn report(app: &mut AppState, outcome: Result<(), WrapError>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(WrapError::Measurement(err)) => Err(err.into()),
        Err(err) => {
            app.set_message(err.to_string());
            Ok(())
        }
    }
}
