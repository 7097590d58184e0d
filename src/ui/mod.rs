pub mod dialog;
pub mod keybar;
pub mod layout;
pub mod lesson;
pub mod markdown;
pub mod question;
pub mod result;
pub mod sidebar;
pub mod statusbar;
pub mod titlebar;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();

    match state.screen {
        Screen::Lesson => draw_lesson_screen(f, area, state),
        Screen::Quiz => draw_working(f, area, state),
        Screen::Result => draw_result_screen(f, area, state),
    }

    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}

fn draw_lesson_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let layout = layout::compute_page_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    lesson::draw_lesson(f, layout.main, state);
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);
}

fn draw_working(f: &mut Frame, area: Rect, state: &AppState) {
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    sidebar::draw_sidebar(f, layout.sidebar, state);
    question::draw_question(f, layout.main, state);
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);
}

fn draw_result_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    sidebar::draw_sidebar(f, layout.sidebar, state);
    result::draw_result(f, layout.main, state);
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);
}
