use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::QuizView;
use crate::presenter::OptionStatus;

const OPTION_LABELS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];
const LOW_TIME: u32 = 5;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.engine().current_question() else {
        return;
    };
    let view = app.engine().view();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], &view);
    render_gauge(frame, chunks[1], view.progress);
    render_status(frame, chunks[2], &view);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], &app.option_rows(), app.cursor(), view.can_answer);
    render_controls(frame, chunks[5], &view);
}

fn render_progress(frame: &mut Frame, area: Rect, view: &QuizView) {
    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let position = Paragraph::new(format!(
        "Question {} of {}",
        view.current_index + 1,
        view.total
    ))
    .fg(Color::Gray);
    let percent = Paragraph::new(format!("{:.0}% Complete", view.progress * 100.0))
        .alignment(Alignment::Right)
        .fg(Color::Gray);

    frame.render_widget(position, left);
    frame.render_widget(percent, right);
}

fn render_gauge(frame: &mut Frame, area: Rect, progress: f64) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .label("")
        .ratio(progress.clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &QuizView) {
    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let score = Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::Gray)),
        Span::styled(view.score.to_string(), Style::default().fg(Color::Cyan).bold()),
    ]);

    let timer_style = if view.time_remaining <= LOW_TIME {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Yellow)
    };
    let timer = Paragraph::new(Span::styled(format!("{}s", view.time_remaining), timer_style))
        .alignment(Alignment::Right);

    frame.render_widget(Paragraph::new(score), left);
    frame.render_widget(timer, right);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn option_style(status: OptionStatus) -> (Style, &'static str) {
    match status {
        OptionStatus::Neutral => (Style::default().fg(Color::White), "o"),
        OptionStatus::CorrectSelected | OptionStatus::CorrectRevealed => {
            (Style::default().fg(Color::Green).bold(), "✓")
        }
        OptionStatus::IncorrectSelected => (Style::default().fg(Color::Red).bold(), "✗"),
        OptionStatus::Disabled => (Style::default().fg(Color::DarkGray), "o"),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    rows: &[(String, OptionStatus)],
    cursor: usize,
    can_answer: bool,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() * 2);

    for (index, (option, status)) in rows.iter().enumerate() {
        let (mut style, marker) = option_style(*status);
        let pointed = can_answer && index == cursor;
        if pointed {
            style = Style::default().fg(Color::Cyan).bold();
        }
        let pointer = if pointed { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or(' ');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", pointer), style),
            Span::styled(format!("{} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: &QuizView) {
    let next = if view.is_last_question {
        "Finish Quiz"
    } else {
        "Next Question"
    };

    let line = if view.can_advance {
        let lead = if view.time_up { "Time's up!  ·  " } else { "" };
        Line::from(vec![
            Span::styled(lead, Style::default().fg(Color::Red)),
            Span::styled(format!("enter/n {}", next), Style::default().fg(Color::Green).bold()),
            Span::styled("  ·  q quit", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            "j/k navigate  ·  enter or 1-9 answer  ·  q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
