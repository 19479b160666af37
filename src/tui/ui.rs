//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::candidate::DeletionStatus;
use crate::console::{display_size, ConfirmationView, ConsoleView, RowView};
use crate::strategy::{RiskLevel, StrategyRegistry};

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &ConsoleView, registry: &StrategyRegistry, show_help: bool) {
    let chunks = main_layout(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_header(view, frame, chunks[0]);
    render_list(view, frame, body[0]);
    render_details(view, registry, frame, body[1]);
    render_footer(view, frame, chunks[2]);

    if let Some(confirmation) = &view.confirmation {
        render_confirm_dialog(confirmation, frame);
    } else if show_help {
        render_help_overlay(frame);
    }
}

fn main_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // List + details
            Constraint::Length(2), // Footer
        ])
        .split(area)
}

/// Rows available to the candidate list for a terminal of this size.
pub fn list_height(area: Rect) -> usize {
    main_layout(area)[1].height.saturating_sub(2) as usize
}

fn render_header(view: &ConsoleView, frame: &mut Frame, area: Rect) {
    let progress = if view.scanning { "scanning…" } else { "done" };
    let errors = if view.error_count > 0 {
        format!("  │  {} unreadable", view.error_count)
    } else {
        String::new()
    };

    let header_text = format!(
        " {}  │  {} projects, {} reclaimable  │  {}{}",
        view.root.display(),
        view.candidate_count,
        display_size(Some(view.total_bytes)),
        progress,
        errors
    );

    let block = Block::default()
        .title(" spektr ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_list(view: &ConsoleView, frame: &mut Frame, area: Rect) {
    let title = format!(
        " Projects {}/{} │ Sort: {} │ Filter: {} │ Page {}/{} ",
        view.visible_count,
        view.candidate_count,
        view.sort,
        view.filter,
        view.page + 1,
        view.page_count
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if view.rows.is_empty() {
        let message = if view.scanning {
            "Scanning..."
        } else if view.candidate_count > 0 {
            "No projects match the filter"
        } else {
            "Nothing to clean"
        };

        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));

        frame.render_widget(paragraph, area);
        return;
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    for (i, row) in view.rows.iter().take(inner_area.height as usize).enumerate() {
        let y = inner_area.y + i as u16;
        render_row(frame, row, inner_area.x, y, inner_area.width, i == view.cursor);
    }
}

fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn render_row(frame: &mut Frame, row: &RowView, x: u16, y: u16, width: u16, is_focused: bool) {
    let checkbox = if row.selected { "[x] " } else { "[ ] " };
    let tag = format!(" [{}]", row.strategy);

    let size_width = 10;
    let size_str = format!("{:>width$}", display_size(row.size), width = size_width);

    let status = match row.status {
        DeletionStatus::Deleting | DeletionStatus::Failed(_) => format!("  {}", row.status),
        _ => String::new(),
    };

    let fixed = checkbox.chars().count() + tag.chars().count() + size_width + 1;
    let name_width = (width as usize).saturating_sub(fixed + status.chars().count());

    // Truncate on char boundaries
    let name_char_count = row.name.chars().count();
    let display_name = if name_char_count > name_width && name_width > 1 {
        let truncated: String = row.name.chars().take(name_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    } else {
        row.name.clone()
    };
    let padding = " ".repeat(name_width.saturating_sub(display_name.chars().count()));

    let name_style = if row.status.is_deleting() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Blue).bold()
    };
    let status_style = if row.status.is_deleting() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Red)
    };

    let spans = vec![
        Span::styled(checkbox, Style::default().fg(Color::Green)),
        Span::styled(display_name, name_style),
        Span::styled(tag, Style::default().fg(Color::Cyan)),
        Span::raw(padding),
        Span::styled(status, status_style),
        Span::raw(" "),
        Span::styled(size_str, Style::default().fg(risk_color(row.risk))),
    ];

    let mut line = Line::from(spans);
    if is_focused {
        line = line.style(Style::default().bg(Color::DarkGray));
    }

    frame.render_widget(Paragraph::new(line), Rect::new(x, y, width, 1));
}

fn render_details(view: &ConsoleView, registry: &StrategyRegistry, frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut text = match view.focused() {
        Some(row) => {
            let estimate = registry
                .get(&row.strategy)
                .map(|s| s.rebuild_estimate())
                .unwrap_or("unknown");

            let mut lines = vec![
                Line::from(vec![Span::styled("Path: ", bold), Span::raw(row.path.display().to_string())]),
                Line::from(vec![Span::styled("Type: ", bold), Span::raw(row.strategy.clone())]),
                Line::from(vec![
                    Span::styled("Size: ", bold),
                    Span::styled(display_size(row.size), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::styled("Risk: ", bold),
                    Span::styled(row.risk.label(), Style::default().fg(risk_color(row.risk))),
                ]),
                Line::from(vec![Span::styled("Rebuild: ", bold), Span::raw(estimate)]),
                Line::from(vec![Span::styled("Targets:", bold)]),
            ];
            lines.extend(row.targets.iter().map(|t| {
                let shown = t.strip_prefix(&row.path).unwrap_or(t);
                Line::from(format!("  {}", shown.display()))
            }));
            lines
        }
        None => vec![Line::from("No project selected")],
    };

    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::styled("Selected: ", bold),
        Span::raw(format!(
            "{} ({})",
            view.selected_count,
            display_size(Some(view.selected_bytes))
        )),
    ]));
    text.push(Line::from(vec![
        Span::styled("Reclaimed: ", bold),
        Span::styled(
            display_size(Some(view.reclaimed_bytes)),
            Style::default().fg(Color::Green),
        ),
    ]));

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_footer(view: &ConsoleView, frame: &mut Frame, area: Rect) {
    let hints = if view.confirmation.is_some() {
        "[y] Delete  [n] Cancel"
    } else {
        "[↑↓] Move  [Space] Select  [a] All  [Enter] Delete  [s] Sort  [f] Filter  [c] Stop  [r] Rescan  [?] Help  [q] Quit"
    };

    let text = view.status.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dialog wording escalates with the riskiest frozen item.
fn confirm_wording(max_risk: RiskLevel) -> (&'static str, &'static str, Color) {
    match max_risk {
        RiskLevel::Low => (
            " Delete build artifacts ",
            "These are regenerated by the next build.",
            Color::Yellow,
        ),
        RiskLevel::Medium => (
            " Delete environments ",
            "Some targets are environments or caches you may have set up by hand.",
            Color::LightRed,
        ),
        RiskLevel::High => (
            " Delete - cannot be undone ",
            "Some targets may hold data that cannot be regenerated.",
            Color::Red,
        ),
    }
}

fn render_confirm_dialog(confirmation: &ConfirmationView, frame: &mut Frame) {
    let area = frame.area();

    let dialog_width = 60u16.min(area.width.saturating_sub(4));
    let dialog_height = 9u16.min(area.height);
    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    frame.render_widget(Clear, dialog_area);

    let (title, warning, color) = confirm_wording(confirmation.max_risk);
    let first = confirmation
        .paths
        .first()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let subject = match confirmation.paths.len() {
        1 => first,
        n => format!("{} projects", n),
    };

    let message = format!(
        "Delete artifacts of {}?\n\nSize: {}\n{}\n\n[y]es  [n]o",
        subject,
        display_size(Some(confirmation.total_bytes)),
        warning
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(message)
        .block(block)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, dialog_area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 50u16.min(area.width.saturating_sub(8));
    let help_height = 20u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k ↓/j    Move
 ←/h →/l    Previous / next page

 SELECTION
 ─────────────────────────────────
 Space      Toggle project
 a          Toggle all shown
 Enter/d    Delete selected

 VIEW
 ─────────────────────────────────
 s          Cycle sort order
 f/Tab      Cycle type filter
 c          Stop scanning
 r          Rescan
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}
