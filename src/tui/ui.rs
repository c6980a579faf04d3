use crate::core::state::{App, Mode};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CardDetail, CardList, HelpBar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

const PROMPT_HEIGHT: u16 = 3;
const HELP_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(HELP_HEIGHT)]);
    let [title_area, _, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(&app.status_message).render(frame, title_area);

    match (app.mode, &app.current_card) {
        (Mode::Detail, Some(view)) => {
            CardDetail::new(view, &mut tui.detail_scroll).render(frame, main_area);
        }
        (Mode::Search | Mode::Jump, _) => {
            let [list_area, prompt_area] =
                Layout::vertical([Min(0), Length(PROMPT_HEIGHT)]).areas(main_area);
            CardList::new(app, &mut tui.list_state).render(frame, list_area);
            draw_prompt(frame, prompt_area, app.mode, tui);
        }
        _ => CardList::new(app, &mut tui.list_state).render(frame, main_area),
    }

    HelpBar {
        mode: app.mode,
        searching: app.search_query.is_some(),
    }
    .render(frame, help_area);
}

fn draw_prompt(frame: &mut Frame, area: Rect, mode: Mode, tui: &mut TuiState) {
    if mode == Mode::Jump {
        tui.prompt.title = "Go to Card";
        tui.prompt.label = "Card number: ";
    } else {
        tui.prompt.title = "Search Cards";
        tui.prompt.label = "Query: ";
    }
    tui.prompt.render(frame, area);
}
