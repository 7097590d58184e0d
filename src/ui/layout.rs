use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub titlebar: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub statusbar: Rect,
    pub keybar: Rect,
}

/// Lesson pages have no question list, so the main pane takes the full width.
pub struct PageLayout {
    pub titlebar: Rect,
    pub main: Rect,
    pub statusbar: Rect,
    pub keybar: Rect,
}

fn rows(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar
            Constraint::Min(5),    // content
            Constraint::Length(1), // statusbar
            Constraint::Length(1), // keybar
        ])
        .split(area)
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let vertical = rows(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // sidebar (icon + number + id)
            Constraint::Min(20),    // main content
        ])
        .split(vertical[1]);

    AppLayout {
        titlebar: vertical[0],
        sidebar: middle[0],
        main: middle[1],
        statusbar: vertical[2],
        keybar: vertical[3],
    }
}

pub fn compute_page_layout(area: Rect) -> PageLayout {
    let vertical = rows(area);
    PageLayout {
        titlebar: vertical[0],
        main: vertical[1],
        statusbar: vertical[2],
        keybar: vertical[3],
    }
}
