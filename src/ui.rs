use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    duration::TestDuration,
    scoring::{CharClass, Glyph},
    session::Phase,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const ACCENT: Color = Color::Rgb(45, 161, 255);

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let accent_style = Style::default().fg(ACCENT);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let passage_lines =
            ((session.passage().width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),              // title
                Constraint::Length(1),              // padding
                Constraint::Length(1),              // live stats
                Constraint::Length(1),              // phase hint
                Constraint::Min(passage_lines + 1), // passage
                Constraint::Length(1),              // durations + replay
                Constraint::Length(1),              // results
                Constraint::Length(1),              // padding
                Constraint::Length(1),              // legend
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("type", bold_style),
            Span::styled("test", bold_style.patch(accent_style)),
        ]))
        .alignment(Alignment::Center);
        title.render(chunks[0], buf);

        let stats = Paragraph::new(Line::from(vec![
            Span::styled("Timer ", accent_style),
            Span::styled(session.seconds_remaining().to_string(), bold_style),
            Span::raw("   "),
            Span::styled("Mistakes ", accent_style),
            Span::styled(session.mistakes().to_string(), bold_style),
            Span::raw("   "),
            Span::styled("WPM ", accent_style),
            Span::styled(session.live_wpm().to_string(), bold_style),
            Span::raw("   "),
            Span::styled("CapsLock ", accent_style),
            Span::styled(if session.caps_lock() { "On" } else { "Off" }, bold_style),
        ]))
        .alignment(Alignment::Center);
        stats.render(chunks[2], buf);

        let hint = match session.phase() {
            Phase::Idle => "start typing to begin the countdown",
            Phase::Running => "",
            Phase::Completed => "time's up",
        };
        Paragraph::new(Span::styled(hint, italic_style.add_modifier(Modifier::DIM)))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let cursor = match session.phase() {
            Phase::Completed => None,
            _ => Some(session.input().chars().count()),
        };
        let passage = Paragraph::new(Line::from(passage_spans(&session.glyphs(), cursor)))
            .alignment(if passage_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false });
        passage.render(chunks[4], buf);

        let replay_style = if self.is_replay_pulse_active(Instant::now()) {
            bold_style.patch(accent_style).add_modifier(Modifier::REVERSED)
        } else {
            bold_style
        };
        let mut controls = vec![Span::styled("↻", replay_style), Span::raw("   Duration: ")];
        controls.extend(duration_spans(session.duration()));
        Paragraph::new(Line::from(controls))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        let results = Paragraph::new(Line::from(vec![
            Span::styled(session.final_wpm().to_string(), bold_style),
            Span::raw(" WPM   Accuracy: "),
            Span::styled(session.accuracy().to_string(), bold_style),
            Span::raw(" %"),
        ]))
        .alignment(Alignment::Center);
        results.render(chunks[6], buf);

        let legend = Paragraph::new(Span::styled(
            "(tab) replay / (←/→) duration / (esc)ape",
            italic_style,
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[8], buf);
    }
}

fn passage_spans(glyphs: &[Glyph], cursor: Option<usize>) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);

    glyphs
        .iter()
        .enumerate()
        .map(|(idx, glyph)| {
            let (text, style) = match (glyph.class, glyph.is_space) {
                (CharClass::Correct, _) => (glyph.char.to_string(), green_bold_style),
                (CharClass::Incorrect, true) => ("·".to_owned(), red_bold_style),
                (CharClass::Incorrect, false) => (glyph.char.to_string(), red_bold_style),
                (CharClass::Untyped, _) => (glyph.char.to_string(), dim_bold_style),
            };
            let style = if cursor == Some(idx) {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            };
            Span::styled(text, style)
        })
        .collect()
}

fn duration_spans(active: TestDuration) -> Vec<Span<'static>> {
    TestDuration::ALL
        .iter()
        .map(|d| {
            if *d == active {
                Span::styled(
                    format!(" {d} "),
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!(" {d} "))
            }
        })
        .collect()
}
