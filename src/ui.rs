use crate::app::{App, Mode};
use crate::state::{RequestStatus, SortKey};
use crate::utils::timestamp_to_elapsed;
use html2text::from_read;
use std::time::{Duration, Instant};
use tui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{List, ListItem, Paragraph, Wrap},
};

const SORT_KEYS: [SortKey; 3] = [SortKey::CreationDate, SortKey::AnswerCount, SortKey::ViewCount];

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> std::io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        app.poll_fetch();
        terminal.draw(|f| draw_ui(f, &mut app))?;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();
        if crossterm::event::poll(timeout)? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                use crossterm::event::KeyCode::*;
                if app.accepting_input() {
                    match key.code {
                        Enter => app.submit_fetch(),
                        Char(c) => app.input.push(c),
                        Backspace => {
                            app.input.pop();
                        }
                        Esc => return Ok(()),
                        _ => {}
                    }
                } else {
                    match key.code {
                        Char('q') => return Ok(()),
                        Esc => {
                            if app.in_viewer() {
                                app.on_back();
                            } else {
                                return Ok(());
                            }
                        }
                        Char('i') | Char('/') => app.edit_user_id(),
                        Char('1') => app.apply_sort(SortKey::CreationDate),
                        Char('2') => app.apply_sort(SortKey::AnswerCount),
                        Char('3') => app.apply_sort(SortKey::ViewCount),
                        Up => app.on_up(),
                        Down => app.on_down(),
                        PageUp => app.on_page_up(),
                        PageDown => app.on_page_down(),
                        Left | Backspace => app.on_back(),
                        Right | Enter => app.on_enter(),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

fn truncated(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

pub fn draw_ui<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let full_area = f.size();

    match &app.mode {
        Mode::Input => {
            let mut lines = vec![
                Spans::from(Span::styled(
                    "Get Stack Overflow Posts",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(""),
                Spans::from(vec![
                    Span::raw("User ID: "),
                    Span::styled(
                        app.input.clone(),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ),
                ]),
                Spans::from(""),
                Spans::from(Span::styled(
                    "Enter to fetch · Esc to quit",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            if app.query.status() == RequestStatus::Fail {
                lines.push(Spans::from(""));
                lines.push(Spans::from(Span::styled(
                    "Something went wrong",
                    Style::default().fg(Color::Red),
                )));
            }

            let paragraph =
                Paragraph::new(Text::from(lines)).style(Style::default().fg(Color::White));
            f.render_widget(paragraph, full_area);
        }

        Mode::Questions => {
            let mut header = vec![Spans::from(Span::styled(
                format!("Questions for user {}", app.query.user_id()),
                Style::default().add_modifier(Modifier::BOLD),
            ))];

            if let Some(owner) = app.query.first_owner() {
                let mut owner_spans = vec![
                    Span::styled(
                        owner.display_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" · {} reputation", owner.reputation),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                if let Some(image) = &owner.profile_image {
                    owner_spans.push(Span::styled(
                        format!(" · {image}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                header.push(Spans::from(owner_spans));
            }

            if app.query.status() == RequestStatus::Fail {
                header.push(Spans::from(Span::styled(
                    "Something went wrong",
                    Style::default().fg(Color::Red),
                )));
            } else {
                header.push(Spans::from(""));
            }

            let mut sort_spans = vec![Span::raw("Sort by:")];
            for (index, key) in SORT_KEYS.iter().enumerate() {
                let style = if *key == app.sort {
                    Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                sort_spans.push(Span::styled(
                    format!(" [{}] {}", index + 1, key.label()),
                    style,
                ));
            }
            header.push(Spans::from(sort_spans));

            let items: Vec<ListItem> = app
                .query
                .questions()
                .iter()
                .enumerate()
                .map(|(index, q)| {
                    let number_width = (index + 1).to_string().len() + 4;
                    let available_width =
                        (full_area.width as usize).saturating_sub(number_width);
                    let title = from_read(q.title.as_bytes(), available_width.max(1));
                    let title = truncated(title.trim_end(), available_width);

                    let title_style = if Some(index) == app.list.selected() {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let title_span = Spans::from(vec![
                        Span::styled(
                            format!("{}. ", index + 1),
                            Style::default().fg(Color::LightYellow),
                        ),
                        Span::styled(title, title_style),
                    ]);

                    let info_span = Spans::from(vec![
                        Span::raw(" ".repeat(number_width)),
                        Span::styled(
                            timestamp_to_elapsed(q.creation_date),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            format!(" · {} answers · {} views", q.answer_count, q.view_count),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]);
                    ListItem::new(vec![title_span, info_span])
                })
                .collect();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(full_area);

            let header_paragraph =
                Paragraph::new(Text::from(header)).style(Style::default().fg(Color::White));
            f.render_widget(header_paragraph, chunks[0]);

            let list = List::new(items)
                .style(Style::default().fg(Color::White))
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[1], &mut app.list);

            let footer = Paragraph::new(Span::styled(
                format!("Total of {} questions found", app.query.questions().len()),
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(footer, chunks[2]);
        }

        Mode::Viewer(pane) => {
            let wrap_width = (full_area.width.saturating_sub(4)).max(1) as usize;

            let mut lines: Vec<Spans> = vec![
                Spans::from(Span::styled(
                    from_read(pane.question.title.as_bytes(), wrap_width)
                        .trim_end()
                        .to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(Span::styled(
                    pane.question.link.clone(),
                    Style::default().fg(Color::LightBlue),
                )),
            ];

            if let Some(owner) = &pane.question.owner {
                lines.push(Spans::from(vec![
                    Span::styled(
                        owner.display_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" · "),
                    Span::styled(
                        timestamp_to_elapsed(pane.question.creation_date),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }

            lines.push(Spans::from(Span::styled(
                "─".repeat(wrap_width),
                Style::default().fg(Color::LightYellow),
            )));
            lines.extend(
                from_read(pane.body.as_bytes(), wrap_width)
                    .lines()
                    .map(|line| Spans::from(Span::raw(line.to_string()))),
            );

            let paragraph = Paragraph::new(Text::from(lines))
                .style(Style::default().fg(Color::White))
                .scroll((pane.scroll, 0))
                .wrap(Wrap { trim: false });

            f.render_widget(paragraph, full_area);
        }
    }
}
