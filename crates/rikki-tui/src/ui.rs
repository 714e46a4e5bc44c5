use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use rikki_core::content::{
    ASSISTANT_NAME, CALL_TO_ACTION_BODY, CALL_TO_ACTION_TITLE, CHAT_LOGS, DASHBOARD_STATS,
    FEATURES, HERO_BADGE, HERO_HEADLINE, HERO_INTRO,
};
use rikki_core::{ReplyMode, Screen};
use crate::app::{App, InputMode};

const LEAF: Color = Color::Green;
const ACCENT: Color = Color::Cyan;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    // Only the active screen is drawn
    match app.screen() {
        Screen::Landing => render_landing_screen(frame, body_area),
        Screen::Chat => render_chat_screen(app, frame, body_area),
        Screen::Dashboard => render_dashboard_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.show_attach_input {
        render_attach_input(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let subtitle = match app.screen() {
        Screen::Landing => "Eco-Friendly AI Assistant",
        Screen::Chat => "Your Eco-Friendly AI Assistant",
        Screen::Dashboard => "Dashboard - Track your eco-learning journey",
    };

    let title = Line::from(vec![
        Span::styled(format!(" {} ", ASSISTANT_NAME), Style::default().fg(LEAF).bold()),
        Span::styled(subtitle, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.screen() {
        Screen::Landing => " HOME ",
        Screen::Chat => " CHAT ",
        Screen::Dashboard => " DASHBOARD ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let pairs: &[(&str, &str)] = if app.show_attach_input {
        &[(" Enter ", " upload "), (" Esc ", " cancel ")]
    } else {
        match (app.screen(), app.input_mode) {
            (Screen::Landing, _) => &[
                (" Enter ", " start chatting "),
                (" d ", " dashboard "),
                (" q ", " quit "),
            ],
            (Screen::Chat, InputMode::Editing) => &[(" Enter ", " send "), (" Esc ", " commands ")],
            (Screen::Chat, InputMode::Normal) => &[
                (" i ", " type "),
                (" u ", " upload image "),
                (" j/k ", " scroll "),
                (" d ", " dashboard "),
                (" Esc ", " home "),
                (" q ", " quit "),
            ],
            (Screen::Dashboard, _) => &[
                (" j/k ", " select "),
                (" Enter ", " continue "),
                (" n ", " new chat "),
                (" Esc ", " home "),
                (" q ", " quit "),
            ],
        }
    };

    let mut spans = vec![
        Span::styled(mode_text, mode_style),
        Span::styled(" ", label_style),
    ];
    for (key, label) in pairs {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(*label, label_style));
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().bg(Color::Black).fg(Color::Red),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_landing_screen(frame: &mut Frame, area: Rect) {
    let [hero_area, features_area, cta_area] = Layout::vertical([
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .areas(area);

    let mut hero_lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("[ {} ]", HERO_BADGE),
            Style::default().fg(LEAF),
        )),
        Line::default(),
    ];
    for headline in HERO_HEADLINE {
        hero_lines.push(Line::from(Span::styled(
            headline,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    hero_lines.push(Line::default());
    hero_lines.push(Line::from(Span::styled(HERO_INTRO, Style::default().fg(Color::Gray))));

    let hero = Paragraph::new(Text::from(hero_lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, hero_area);

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(features_area);
    for (feature, column) in FEATURES.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(LEAF))
            .title(Span::styled(format!(" {} ", feature.title), Style::default().bold()));
        let card = Paragraph::new(feature.description)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(card, *column);
    }

    let cta_text = Text::from(vec![
        Line::from(Span::styled(CALL_TO_ACTION_TITLE, Style::default().bold())),
        Line::default(),
        Line::from(CALL_TO_ACTION_BODY),
        Line::default(),
        Line::from(vec![
            Span::styled(" Enter ", Style::default().bg(LEAF).fg(Color::Black).bold()),
            Span::raw(" Start Chatting with Rikki    "),
            Span::styled(" d ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" View Your Dashboard"),
        ]),
    ]);
    let cta = Paragraph::new(cta_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
    frame.render_widget(cta, cta_area);
}

fn render_chat_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    // Store areas and inner size for mouse hit-testing and scroll math
    app.chat_area = Some(chat_area);
    let inner = (chat_area.height.saturating_sub(2), chat_area.width.saturating_sub(2));
    if inner != (app.chat_height, app.chat_width) {
        (app.chat_height, app.chat_width) = inner;
        app.scroll_chat_to_bottom();
    }

    let mode_label = match app.reply_mode() {
        ReplyMode::Scripted => "demo replies",
        ReplyMode::Remote => "live replies",
    };
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.input_mode == InputMode::Normal {
            ACCENT
        } else {
            Color::DarkGray
        }))
        .title(format!(" {} ({}) ", ASSISTANT_NAME, mode_label));

    let typing = app.is_typing();
    let chat = chat_transcript(app)
        .block(chat_block)
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, chat_area);

    let input_border_color = if app.input_mode == InputMode::Editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let input_title = if typing {
        format!(" {} is typing... ", ASSISTANT_NAME)
    } else {
        " Type your message... ".to_string()
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(input_title);

    // Horizontal scrolling keeps the cursor visible; inner width excludes borders
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let cursor_pos = app.chat_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .chat_input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(ACCENT))
        .block(input_block);
    frame.render_widget(input, input_area);

    if app.input_mode == InputMode::Editing && !app.show_attach_input {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((input_area.x + cursor_x + 1, input_area.y + 1));
    }
}

/// Transcript of the mounted session, wrapped the way the chat panel draws it.
/// Scroll math counts rows from this same paragraph.
pub fn chat_transcript(app: &App) -> Paragraph<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    if let Some(session) = app.session.as_ref() {
        for msg in session.messages() {
            let (speaker, color) = if msg.is_user() {
                ("You", ACCENT)
            } else {
                (ASSISTANT_NAME, LEAF)
            };
            lines.push(Line::from(vec![
                Span::styled(speaker, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", msg.timestamp), Style::default().fg(Color::DarkGray)),
            ]));
            for line in msg.body.lines() {
                lines.push(Line::from(line.to_string()));
            }
            lines.push(Line::default());
        }

        if session.is_typing() {
            lines.push(Line::from(Span::styled(
                ASSISTANT_NAME,
                Style::default().fg(LEAF).add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("typing{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true })
}

fn render_dashboard_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [stats_area, logs_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(stats_area);
    for (stat, column) in DASHBOARD_STATS.iter().zip(columns.iter()) {
        let card = Paragraph::new(Text::from(vec![
            Line::from(Span::styled(stat.value, Style::default().bold())),
            Line::from(Span::styled(stat.change, Style::default().fg(LEAF))),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(LEAF))
                .title(format!(" {} ", stat.label)),
        );
        frame.render_widget(card, *column);
    }

    let items: Vec<ListItem> = CHAT_LOGS
        .iter()
        .map(|log| {
            let mut title = vec![Span::styled(log.title, Style::default().bold()), Span::raw("  ")];
            for topic in log.topics {
                title.push(Span::styled(
                    format!("[{}]", topic),
                    Style::default().fg(LEAF),
                ));
                title.push(Span::raw(" "));
            }
            let details = Line::from(Span::styled(
                format!(
                    "   {}  |  {}  |  {} messages  |  {}",
                    log.date, log.time, log.message_count, log.duration
                ),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(vec![Line::from(title), details, Line::default()])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(format!(" Recent Conversations - your chat history with {} ", ASSISTANT_NAME)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, logs_area, &mut app.dashboard_state);
}

fn render_attach_input(app: &App, frame: &mut Frame, area: Rect) {
    // Calculate popup size and position (centered)
    let popup_width = 64.min(area.width.saturating_sub(4));
    let popup_height = 6.min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Upload an image for analysis ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Rows stay inside the popup even when the terminal is shorter than it
    let [instructions_area, _, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let instructions = Paragraph::new("Path to a PNG, JPEG, GIF, WebP, BMP or HEIC file:")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(instructions, instructions_area);

    // Show the tail of long paths so the cursor stays visible
    let width = inner.width as usize;
    let char_count = app.attach_input.chars().count();
    let skip = char_count.saturating_sub(width.saturating_sub(1));
    let visible: String = app.attach_input.chars().skip(skip).collect();

    let cursor_x = visible.chars().count() as u16;
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().fg(ACCENT)),
        input_area,
    );
    if input_area.height > 0 {
        frame.set_cursor_position((input_area.x + cursor_x, input_area.y));
    }
}
