use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::{Answer, Summary};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.engine().summary() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], summary);
    render_question_breakdown(frame, chunks[2], summary, app.result_scroll());
    render_controls(frame, chunks[3]);
}

/// Headline and colour for a final score.
fn grade(score: u32) -> (&'static str, Color) {
    match score {
        100..=u32::MAX => ("Excellent!", Color::Green),
        70..=99 => ("Great Job!", Color::Cyan),
        50..=69 => ("Good Effort!", Color::Yellow),
        _ => ("Keep Trying!", Color::Red),
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    let (headline, color) = grade(summary.score());

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("You scored ", Style::default().fg(Color::Gray)),
            Span::styled(
                summary.score().to_string(),
                Style::default().fg(color).bold(),
            ),
            Span::styled(
                format!(" / {} points", summary.max_score()),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, summary: &Summary, scroll: usize) {
    let lines: Vec<Line> = summary
        .answers()
        .iter()
        .zip(summary.questions().iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let (symbol, color) = match answer {
                Answer::TimeUp => ("⏱", Color::Yellow),
                answer if answer.is_correct_for(question) => ("+", Color::Green),
                Answer::Choice(_) => ("-", Color::Red),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_question(&question.text), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r try again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
