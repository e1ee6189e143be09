use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use super::view::{FormView, SelectView, StatusTone};
use crate::form::{Field, Message};

const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
const COLOR_BORDER_IDLE: Color = Color::Rgb(88, 91, 112);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
const COLOR_DISABLED: Color = Color::Rgb(108, 112, 134);
const COLOR_SUCCESS: Color = Color::Rgb(166, 227, 161);
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);

const HELP: &str = "Tab/↑↓ move · ←→ choose · Enter select/submit · Del remove file · Ctrl-S submit · Esc quit";

/// Owns the terminal in raw/alternate-screen mode and restores it on drop.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, view: &FormView) -> Result<()> {
        self.terminal.draw(|frame| draw(frame, view))?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

struct FieldWidget<'a> {
    field: Field,
    title: &'static str,
    height: u16,
    enabled: bool,
    body: Vec<Line<'a>>,
}

pub fn draw(frame: &mut Frame, view: &FormView) {
    let message_height = if view.message == Message::Hidden { 0 } else { 3 };
    let [header, message, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(message_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, view);
    draw_message(frame, message, &view.message);
    draw_fields(frame, body, view);
    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(COLOR_TEXT_SECONDARY)),
        footer,
    );
}

fn draw_header(frame: &mut Frame, area: Rect, view: &FormView) {
    let dot_color = match view.status_tone {
        StatusTone::Neutral => COLOR_DISABLED,
        StatusTone::Good => COLOR_SUCCESS,
        StatusTone::Bad => COLOR_ERROR,
    };
    let mut status = vec![
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::raw(view.status_label),
    ];
    if let Some(at) = &view.checked_at {
        status.push(Span::styled(
            format!(" ({})", at),
            Style::default().fg(COLOR_TEXT_SECONDARY),
        ));
    }

    let [title, indicator] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(40)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Pub Quiz · Add a Question",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        title,
    );
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Right),
        indicator,
    );
}

fn draw_message(frame: &mut Frame, area: Rect, message: &Message) {
    let (text, color) = match message {
        Message::Hidden => return,
        Message::Success(text) => (text.as_str(), COLOR_SUCCESS),
        Message::Error(text) => (text.as_str(), COLOR_ERROR),
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color))),
        area,
    );
}

fn select_line(select: &SelectView) -> Line<'static> {
    let style = if !select.enabled {
        Style::default().fg(COLOR_DISABLED)
    } else if select.selected.is_none() {
        Style::default().fg(COLOR_TEXT_SECONDARY)
    } else {
        Style::default()
    };
    let arrows = if select.enabled { "◀ " } else { "  " };
    let tail = if select.enabled { " ▶" } else { "" };
    Line::from(vec![
        Span::styled(arrows, Style::default().fg(COLOR_ACCENT)),
        Span::styled(select.display().to_string(), style),
        Span::styled(tail, Style::default().fg(COLOR_ACCENT)),
    ])
}

fn field_widgets(view: &FormView) -> Vec<FieldWidget<'_>> {
    let mut widgets = vec![
        FieldWidget {
            field: Field::QuestionText,
            title: "Question",
            height: 5,
            enabled: true,
            body: view.question_text.lines().map(Line::from).collect(),
        },
        FieldWidget {
            field: Field::AnswerText,
            title: "Answer",
            height: 3,
            enabled: true,
            body: vec![Line::from(view.answer_text.as_str())],
        },
        FieldWidget {
            field: Field::QuestionType,
            title: "Question Type",
            height: 3,
            enabled: view.question_type.enabled,
            body: vec![select_line(&view.question_type)],
        },
        FieldWidget {
            field: Field::Category,
            title: "Category",
            height: 3,
            enabled: view.category.enabled,
            body: vec![select_line(&view.category)],
        },
        FieldWidget {
            field: Field::Subcategory,
            title: "Subcategory",
            height: 3,
            enabled: view.subcategory.enabled,
            body: vec![select_line(&view.subcategory)],
        },
    ];

    if let Some(media) = &view.media {
        let selected = match &media.file_name {
            Some(name) => Line::from(vec![
                Span::styled("Selected: ", Style::default().fg(COLOR_TEXT_SECONDARY)),
                Span::styled(name.as_str(), Style::default().fg(COLOR_SUCCESS)),
            ]),
            None => Line::from(Span::styled(
                format!("{} · {}", media.accept, media.hint),
                Style::default().fg(COLOR_TEXT_SECONDARY),
            )),
        };
        widgets.push(FieldWidget {
            field: Field::MediaFile,
            title: "Media File (type a path, Enter to select)",
            height: 4,
            enabled: true,
            body: vec![Line::from(media.path_input.as_str()), selected],
        });
    }

    widgets.push(FieldWidget {
        field: Field::Submit,
        title: "",
        height: 3,
        enabled: view.submit.enabled,
        body: vec![Line::from(view.submit.label)],
    });
    widgets
}

fn draw_fields(frame: &mut Frame, area: Rect, view: &FormView) {
    let widgets = field_widgets(view);
    let focus_index = widgets
        .iter()
        .position(|w| w.field == view.focus)
        .unwrap_or(0);

    // Drop fields from the top until the focused one fits.
    let mut start = 0;
    while start < focus_index
        && widgets[start..=focus_index]
            .iter()
            .map(|w| w.height)
            .sum::<u16>()
            > area.height
    {
        start += 1;
    }

    let mut y = area.y;
    for widget in widgets.into_iter().skip(start) {
        if y + widget.height > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, widget.height);
        y += widget.height;

        let focused = widget.field == view.focus;
        let border = if focused {
            Style::default().fg(COLOR_ACCENT)
        } else {
            Style::default().fg(COLOR_BORDER_IDLE)
        };
        let text_style = if widget.enabled {
            Style::default()
        } else {
            Style::default().fg(COLOR_DISABLED)
        };

        let mut block = Block::default().borders(Borders::ALL).border_style(border);
        if !widget.title.is_empty() {
            block = block.title(widget.title);
        }

        let mut paragraph = Paragraph::new(widget.body)
            .style(text_style)
            .wrap(Wrap { trim: false })
            .block(block);
        if widget.field == Field::Submit {
            paragraph = paragraph
                .alignment(Alignment::Center)
                .style(text_style.add_modifier(Modifier::BOLD));
        }
        frame.render_widget(paragraph, rect);
    }
}
