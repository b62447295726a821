use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use swipedo_core::{Mode, TagColor, TaskRow};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let rows = app.rows();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header / add line
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_task_list(f, app, &rows, content_chunks[0]);
    draw_detail_view(f, app, &rows, content_chunks[1]);

    let footer = Paragraph::new(help_text(app.session.mode()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    match app.session.mode() {
        Mode::ConfirmingDelete { id } => {
            let text = rows
                .iter()
                .find(|r| r.id == *id)
                .map(|r| r.text.clone())
                .unwrap_or_default();
            draw_confirm_dialog(f, &text, size);
        }
        Mode::PickingDate { date, .. } => draw_date_picker(f, app, *date, size),
        Mode::Adding { .. } => draw_tag_popup(f, app, main_chunks[1]),
        _ => {}
    }
}

fn help_text(mode: &Mode) -> &'static str {
    match mode {
        Mode::Idle => "a: Add | space: Done | e: Edit | l: Swipe | D: Delete | t: Due | q: Quit",
        Mode::Revealed { .. } => "x: Delete | h/Esc: Close | D: Delete with confirm",
        Mode::Adding { .. } => "Enter: Add | Tab: Tag / accept date | Esc: Cancel",
        Mode::Editing { .. } => "Enter: Save | Esc: Cancel",
        Mode::ConfirmingDelete { .. } => "y: Delete | n: Cancel",
        Mode::PickingDate { .. } => "h/l: Day | j/k: Week | t: Today | c: Clear | Enter: Set",
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let Mode::Adding {
        input,
        suggested,
        accept_suggestion,
    } = app.session.mode()
    else {
        let header = Paragraph::new("SWIPEDO")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(header, area);
        return;
    };

    let mut title = vec![Span::raw(" Add new task ")];
    if let Some(date) = suggested {
        let label = format!(" due {} ", date.format("%a %m-%d"));
        let style = if *accept_suggestion {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Green)
        };
        title.push(Span::styled(label, style));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(input.as_str()).block(block), area);
    set_input_cursor(f, input, app.cursor_position, area.x + 1, area.y + 1, area);
}

/// Places the terminal cursor `cursor` chars into `line`, kept inside the
/// borders of `bounds`.
fn set_input_cursor(f: &mut Frame, line: &str, cursor: usize, x: u16, y: u16, bounds: Rect) {
    let x = cursor_column(line, cursor, x, bounds.right().saturating_sub(2));
    let y = y.min(bounds.bottom().saturating_sub(2));
    f.set_cursor_position((x, y));
}

fn cursor_column(line: &str, cursor: usize, x: u16, max_x: u16) -> u16 {
    let byte_index: usize = line.chars().take(cursor).map(|c| c.len_utf8()).sum();
    let offset = u16::try_from(line[..byte_index].width()).unwrap_or(u16::MAX);
    x.saturating_add(offset).min(max_x)
}

fn draw_task_list(f: &mut Frame, app: &mut App, rows: &[TaskRow], area: Rect) {
    let today = app.session.today();
    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let status_icon = if row.completed { "✔" } else { "☐" };

            let due_style = if row.past_due {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let text_style = if row.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let text = match (row.editing, app.session.edit_buffer()) {
                (true, Some(buffer)) => Span::styled(
                    buffer.to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
                ),
                _ => Span::styled(row.text.clone(), text_style),
            };

            let action = if row.revealed || row.pending_delete {
                Span::styled(" 🗑 ", Style::default().fg(Color::White).bg(Color::Red))
            } else {
                Span::raw("")
            };

            Row::new(vec![
                Span::raw(status_icon),
                Span::styled(row.due_label(today), due_style),
                text,
                action,
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(9),  // Due
            Constraint::Min(10),    // Text
            Constraint::Length(4),  // Delete action
        ],
    )
    .header(Row::new(vec!["St", "Due", "Task", ""]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(" Tasks ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);

    // Inline edit cursor: border, highlight symbol, then the status and due columns.
    if let (Some(buffer), Some(selected)) = (app.session.edit_buffer(), app.state.selected()) {
        let visible = selected.saturating_sub(app.state.offset());
        let visible = u16::try_from(visible).unwrap_or(u16::MAX);
        let y = area.y.saturating_add(2).saturating_add(visible);
        let x = area.x.saturating_add(1 + 3 + 3 + 1 + 9 + 1);
        set_input_cursor(f, buffer, app.cursor_position, x, y, area);
    }
}

fn draw_detail_view(f: &mut Frame, app: &App, rows: &[TaskRow], area: Rect) {
    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(row) = app.state.selected().and_then(|i| rows.get(i)) else {
        f.render_widget(block, area);
        return;
    };

    let task = app.session.list().get(row.id);
    let due = match row.due {
        Some(d) if row.past_due => format!("{} (past due)", d),
        Some(d) => d.to_string(),
        None => "None".to_string(),
    };

    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(row.text.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(row.id.short()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(if row.completed { "Completed" } else { "Pending" }),
        ]),
        Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Blue)),
            Span::raw(due),
        ]),
    ];

    if let Some(task) = task {
        detail_text.push(Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Blue)),
            Span::raw(task.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]));
    }

    let detail_block = Paragraph::new(detail_text).block(block).wrap(Wrap { trim: true });
    f.render_widget(detail_block, area);
}

fn draw_confirm_dialog(f: &mut Frame, text: &str, area: Rect) {
    let popup = centered_rect(40, 7, area);
    let body = vec![
        Line::from(Span::styled(
            "Do you want to delete?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(text.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Cancel (n) ", Style::default().fg(Color::Black).bg(Color::Gray)),
            Span::raw("   "),
            Span::styled(" Delete (y) ", Style::default().fg(Color::White).bg(Color::Red)),
        ]),
    ];
    let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn draw_date_picker(f: &mut Frame, app: &App, date: chrono::NaiveDate, area: Rect) {
    let today = app.session.today();
    let popup = centered_rect(30, 5, area);
    let relative = (date - today).num_days();
    let hint = match relative {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        n if n > 0 => format!("in {} days", n),
        n => format!("{} days ago", -n),
    };
    let body = vec![
        Line::from(Span::styled(
            format!("◀ {} ▶", date.format("%a %Y-%m-%d")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let picker = Paragraph::new(body).alignment(Alignment::Center).block(
        Block::default()
            .title(" Due date ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(picker, popup);
}

fn draw_tag_popup(f: &mut Frame, app: &App, area: Rect) {
    let tags = app.session.tag_suggestions();
    if tags.is_empty() {
        return;
    }
    let height = (tags.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.x + 1, area.y, 24.min(area.width), height);
    let lines: Vec<Line> = tags
        .iter()
        .map(|tag| {
            Line::from(vec![
                Span::styled("● ", Style::default().fg(tag_color(&tag.color))),
                Span::raw(format!("#{}", tag.text)),
            ])
        })
        .collect();
    let list = Paragraph::new(lines).block(
        Block::default()
            .title(" Tags ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(Clear, popup);
    f.render_widget(list, popup);
}

fn tag_color(color: &TagColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
