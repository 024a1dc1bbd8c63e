//! 视图层模块
//!
//! build_view 生成视图描述，render 负责绘制

pub mod components;
pub mod layouts;
pub mod model;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use super::state::App;
use crate::storage::KeyValueStore;
use components::{pagination_line, render_dialog_framework, render_input_widget};
use layouts::centered_rect;
use model::{FormView, TableView, View, build_view};

/// 渲染 UI
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let view = build_view(app);
    draw(frame, &view);
}

pub fn draw(frame: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 表单
            Constraint::Min(5),    // 表格
            Constraint::Length(1), // 分页
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, view, chunks[0]);
    render_form(frame, &view.form, chunks[1]);
    render_table(frame, &view.table, chunks[2]);
    render_pagination(frame, view, chunks[3]);
    render_help(frame, view, chunks[4]);

    if let Some(prompt) = view.confirm {
        render_confirm_dialog(frame, prompt);
    }
}

fn render_title(frame: &mut Frame, view: &View, area: Rect) {
    let title = Paragraph::new(format!(
        "⏱ Work Hours Tracker    {}/{} entries",
        view.entry_count, view.max_entries
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_form(frame: &mut Frame, form: &FormView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Min(16),
        ])
        .split(area);

    for (i, field) in form.fields.iter().enumerate() {
        render_input_widget(
            frame,
            chunks[i],
            field.label,
            &field.value,
            field.focused,
            Color::Yellow,
        );
    }

    // 工时只读
    render_input_widget(
        frame,
        chunks[3],
        "Total Hours",
        &form.total_hours,
        false,
        Color::Gray,
    );

    let button_style = match (form.editing, form.active) {
        (true, _) => Style::default().fg(Color::Black).bg(Color::Yellow),
        (false, true) => Style::default().fg(Color::Black).bg(Color::Green),
        (false, false) => Style::default().fg(Color::Green),
    };
    let button = Paragraph::new(format!("[Enter] {}", form.submit_label))
        .alignment(Alignment::Center)
        .style(button_style.add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, chunks[4]);
}

fn render_table(frame: &mut Frame, table: &TableView, area: Rect) {
    let block = Block::default().title("Records").borders(Borders::ALL);

    let rows = match table {
        TableView::Empty(message) => {
            let empty = Paragraph::new(*message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }
        TableView::Rows(rows) => rows,
    };

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let actions = if row.selected { "[e] ✎  [d] ✗" } else { "✎  ✗" };
            let style = if row.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.date.clone()),
                Cell::from(row.time_start.clone()),
                Cell::from(row.time_end.clone()),
                Cell::from(row.total_hours.clone()),
                Cell::from(actions),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(["Date", "Start", "End", "Hours", "Actions"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let widget = Table::new(
        body,
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(widget, area);
}

fn render_pagination(frame: &mut Frame, view: &View, area: Rect) {
    let line = match &view.pagination {
        Some(pagination) => pagination_line(pagination),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_help(frame: &mut Frame, view: &View, area: Rect) {
    let text = match &view.message {
        Some(message) if !message.is_empty() => format!("{}  |  {}", view.help, message),
        _ => view.help.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_confirm_dialog(frame: &mut Frame, prompt: &str) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ Confirm");

    let dialog = Paragraph::new(format!("{prompt}\n\n[y] Confirm  [n] Cancel"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    frame.render_widget(dialog, inner);
}
