mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::engine::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        Phase::Idle => welcome::render(
            frame,
            area,
            app.source_label(),
            app.engine().time_limit(),
            app.notice(),
        ),
        Phase::Loading => welcome::render_loading(frame, area),
        Phase::InProgress => quiz::render(frame, area, app),
        Phase::Finished => result::render(frame, area, app),
    }
}
