use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    source_label: &str,
    time_limit: u32,
    notice: Option<&str>,
) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZMASTER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Test your knowledge".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(format!("{source_label} · multiple choice").fg(Color::DarkGray)),
        Line::from(format!("{time_limit} seconds per question").fg(Color::DarkGray)),
        Line::from("Can you score 100%?".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    if let Some(notice) = notice {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .fg(Color::Red);
        frame.render_widget(widget, chunks[2]);
    }
}

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from("q to quit".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
