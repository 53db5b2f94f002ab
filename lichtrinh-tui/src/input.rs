use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use lichtrinh_core::wizard::WizardStep;

use crate::app::{App, FEEDBACK_OPTIONS, Feedback, Screen, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Send the generation request built from the selections.
    Generate,
    /// Rasterize the open infographic to disk.
    Export,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Wizard(WizardStep::Landing) => {
            if matches!(key.code, Enter | Char(' ') | Right) {
                app.choose();
            }
        }

        Screen::Wizard(WizardStep::Review) => match key.code {
            Up | Char('k') => app.move_cursor(false),
            Down | Char('j') => app.move_cursor(true),
            Char('e') => app.choose(),
            Enter => action = Action::Generate,
            Left | Esc => app.back(),
            _ => {}
        },

        Screen::Wizard(WizardStep::Vibe) => match key.code {
            Up | Char('k') => app.move_cursor(false),
            Down | Char('j') => app.move_cursor(true),
            Char(' ') => app.choose(),
            Enter | Right | Tab => {
                app.advance();
            }
            Left | Esc => app.back(),
            _ => {}
        },

        Screen::Wizard(_) => match key.code {
            Up | Char('k') => app.move_cursor(false),
            Down | Char('j') => app.move_cursor(true),
            Char(' ') => app.choose(),
            Enter => {
                app.choose();
                app.advance();
            }
            Right | Tab => {
                app.advance();
            }
            Left | Esc => app.back(),
            _ => {}
        },

        Screen::Loading => {}

        Screen::NotFound { .. } => {
            if key.code == Enter {
                app.deep_linked = false;
                app.go_to(WizardStep::Landing);
            }
        }

        Screen::Itinerary => action = handle_detail_key(key.code, app),
    }
    action
}

fn handle_detail_key(code: KeyCode, app: &mut App) -> Action {
    use KeyCode::{BackTab, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    let Some(detail) = app.detail.as_mut() else {
        return Action::None;
    };

    // Infographic preview is modal
    if detail.infographic.is_some() {
        match code {
            Up | Char('k') => detail.modal_scroll = detail.modal_scroll.saturating_sub(1),
            Down | Char('j') => detail.modal_scroll = detail.modal_scroll.saturating_add(1),
            Enter | Char('e') => return Action::Export,
            Esc | Char('i') => app.close_infographic(),
            _ => {}
        }
        return Action::None;
    }

    if let Some(Feedback::Choosing(index)) = detail.feedback {
        match code {
            Up | Char('k') => detail.feedback = Some(Feedback::Choosing(index.saturating_sub(1))),
            Down | Char('j') if index + 1 < FEEDBACK_OPTIONS.len() => {
                detail.feedback = Some(Feedback::Choosing(index + 1));
            }
            Enter => app.feedback_option(),
            Esc => detail.feedback = None,
            _ => {}
        }
        return Action::None;
    }

    match code {
        Tab | Right => detail.cycle_tab(true),
        BackTab | Left => detail.cycle_tab(false),
        Up | Char('k') => detail.move_selection(false),
        Down | Char('j') => detail.move_selection(true),
        Enter => detail.toggle_tips(),
        Char('m') => {
            detail.mode = match detail.mode {
                ViewMode::List => ViewMode::Map,
                ViewMode::Map => ViewMode::List,
            };
        }
        Char('i') => app.open_infographic(Local::now().date_naive()),
        Char('s') => app.share(),
        Char('b') => app.save(),
        Char('+') => app.feedback_good(),
        Char('-') => app.feedback_bad(),
        Char('o') => app.offline(),
        Char('n') => app.create_new(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use lichtrinh_core::model::{Itinerary, ItineraryId};
    use lichtrinh_core::ports::PortError;
    use lichtrinh_core::view::DayFilter;
    use lichtrinh_core::wizard::TripDefaults;

    use super::*;
    use crate::app::{AppEvent, Detail};

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    fn with_detail() -> App {
        let itinerary: Itinerary =
            serde_json::from_str(include_str!("../../testdata/itinerary.json"))
                .expect("sample itinerary");
        let mut app = App::new(TripDefaults::default(), String::new());
        app.detail = Some(Detail::new(itinerary.into()));
        app.screen = Screen::Itinerary;
        app
    }

    #[test]
    fn quit_shortcuts() {
        let mut app = App::new(TripDefaults::default(), String::new());
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut app), Action::Quit);
    }

    #[test]
    fn wizard_walkthrough_reaches_generate() {
        let mut app = App::new(TripDefaults::default(), String::new());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Duration));

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Vibe));

        // Enter without a vibe does not advance.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Vibe));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Review));
        assert_eq!(app.selections.budget.as_deref(), Some("comfortable"));

        assert_eq!(press(&mut app, KeyCode::Enter), Action::Generate);
    }

    #[test]
    fn modal_captures_keys() {
        let mut app = with_detail();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(press(&mut app, KeyCode::Char('e')), Action::Export);

        // Tab does not switch days behind the modal.
        press(&mut app, KeyCode::Tab);
        let detail = app.detail.as_ref().expect("detail");
        assert_eq!(detail.filter, DayFilter::Day(1));

        press(&mut app, KeyCode::Esc);
        assert!(app.detail.as_ref().is_some_and(|open| open.infographic.is_none()));
    }

    #[test]
    fn bad_feedback_picks_an_option() {
        let mut app = with_detail();
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(
            app.detail.as_ref().and_then(|detail| detail.feedback),
            Some(Feedback::Choosing(2))
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.detail.as_ref().and_then(|detail| detail.feedback),
            Some(Feedback::Sent)
        );
    }

    #[test]
    fn map_toggle_and_tabs() {
        let mut app = with_detail();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Left);
        let detail = app.detail.as_ref().expect("detail");
        assert_eq!(detail.mode, ViewMode::Map);
        assert_eq!(detail.filter, DayFilter::All);
    }

    #[tokio::test]
    async fn not_found_enter_goes_home() {
        let mut app = App::new(TripDefaults::default(), String::new());
        let id = ItineraryId("gone".to_owned());
        let ticket = app.begin_fetch(&id);
        app.apply(
            AppEvent::Fetched {
                ticket,
                result: Err(PortError::NotFound(id)),
            },
            Instant::now(),
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Landing));
        assert!(!app.deep_linked);
    }
}
