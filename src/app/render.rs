//! Drawing.

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::{
    dialog,
    events::Screen,
    input, layout,
    report::{MAXIMUM_CAPACITY, build_report},
    sender,
    shortcuts::{Shortcuts, format_keys},
    status::{ResourceKind, Rgb},
};

use super::App;

/// Highlight for the focused slider.
const FOCUS: Color = Color::Rgb(255, 140, 0);

/// Draw the whole screen.
pub fn draw(f: &mut Frame, app: &App) {
    let main_layout = layout::create_main_layout(f.area());
    let body_layout = layout::create_body_layout(main_layout.body);

    match app.ui.screen {
        Screen::Form => draw_form(f, app, body_layout.form),
        Screen::Settings => draw_settings(f, app, body_layout.form),
    }
    draw_side_panel(f, app, body_layout.side_panel);

    let help_bar = Paragraph::new(get_help_text(app))
        .block(Block::default().borders(Borders::ALL).title("HELP"))
        .wrap(Wrap { trim: true });
    f.render_widget(help_bar, main_layout.help_bar);

    f.render_widget(build_status_bar(app), main_layout.status_bar);

    if let Some(d) = &app.dialog {
        dialog::render_dialog(f, d, &dialog_help(d.can_retry(), &app.shortcuts));
    }
    if let Some(input_state) = &app.input_box {
        input::render_input_box(f, input_state);
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// One gauge per slider with its live label in the band color.
fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("SHELTER STATUS");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let selected = app.form.selected_kind();
    for (kind, row) in ResourceKind::ALL
        .into_iter()
        .zip(layout::create_slider_rows(inner))
    {
        let category = app.form.category(kind);
        let color = to_color(category.color);
        let focused = kind == selected;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} {}", if focused { "→" } else { " " }, kind.title()))
            // Live label as text in the band color, readable even when the bar is empty.
            .title(
                Line::from(Span::styled(
                    format!(" {} ", app.form.line(kind)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        if focused {
            block = block.border_style(Style::default().fg(FOCUS).add_modifier(Modifier::BOLD));
        }

        let percent = app.form.level(kind).percent();
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(u16::from(percent))
            .label(Span::styled(
                format!("{percent}%"),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        f.render_widget(gauge, row);
    }
}

/// Backend settings with the key that edits each field.
fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let sc = &app.shortcuts.settings;
    let endpoint = if app.base_url.trim().is_empty() {
        "(local only, reports are not transmitted)".to_string()
    } else {
        sender::status_url(&app.base_url, &app.shelter_id)
    };
    let token = if app.auth_token.is_empty() {
        "(none)".to_string()
    } else {
        "*".repeat(app.auth_token.chars().count().min(12))
    };
    let text = format!(
        "[{}] Base URL:   {}\n[{}] Shelter ID: {}\n[{}] Auth token: {}\n\nEndpoint: {}",
        format_keys(&sc.base_url),
        app.base_url,
        format_keys(&sc.shelter_id),
        app.shelter_id,
        format_keys(&sc.auth_token),
        token,
        endpoint,
    );
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("SETTINGS"))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

/// Payload preview plus recent log lines.
fn draw_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let report = build_report(&app.form.levels(), chrono::Utc::now());
    let json = report
        .to_json_pretty()
        .unwrap_or_else(|e| format!("payload error: {e}"));
    let log = app.ui.log.iter().cloned().collect::<Vec<_>>().join("\n");
    let text = format!(
        "Occupants: {}/{}\nStatus: {}\n\n{}\n\nLog:\n{}",
        report.capacity.current, MAXIMUM_CAPACITY, report.status, json, log
    );
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("PAYLOAD"))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn build_status_bar(app: &App) -> Paragraph<'static> {
    let screen_name = match app.ui.screen {
        Screen::Form => "Form",
        Screen::Settings => "Settings",
    };
    let delivery = if app.cfg.backend.is_remote() {
        "remote"
    } else {
        "local"
    };

    let status_text = if let Some(err) = &app.ui.error {
        format!("[{}] {} | ERROR: {}", screen_name, delivery, err)
    } else {
        format!("[{}] {} | {}", screen_name, delivery, app.ui.status)
    };

    let mut status_bar = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("STATUS"))
        .wrap(Wrap { trim: true });
    if app.ui.error.is_some() {
        status_bar = status_bar.style(Style::default().fg(Color::Red));
    }
    status_bar
}

fn get_help_text(app: &App) -> String {
    let sc = &app.shortcuts;
    match app.ui.screen {
        Screen::Form => format!(
            "{}/{}: select | {}/{}: adjust | {}/{}: ±{} | {}/{}: min/max | {}: type value | {}: submit | {}: settings | {}: quit",
            format_keys(&sc.form.up),
            format_keys(&sc.form.down),
            format_keys(&sc.form.decrease),
            format_keys(&sc.form.increase),
            format_keys(&sc.form.decrease_coarse),
            format_keys(&sc.form.increase_coarse),
            app.cfg.form.coarse_step,
            format_keys(&sc.form.min),
            format_keys(&sc.form.max),
            format_keys(&sc.form.edit_value),
            format_keys(&sc.form.submit),
            format_keys(&sc.form.settings),
            format_keys(&sc.form.quit),
        ),
        Screen::Settings => format!(
            "{}: base url | {}: shelter id | {}: auth token | {}: save | {}: cancel",
            format_keys(&sc.settings.base_url),
            format_keys(&sc.settings.shelter_id),
            format_keys(&sc.settings.auth_token),
            format_keys(&sc.settings.save),
            format_keys(&sc.settings.cancel),
        ),
    }
}

fn dialog_help(can_retry: bool, sc: &Shortcuts) -> String {
    if can_retry {
        format!(
            "{}=retry | {}/{}=dismiss",
            format_keys(&sc.dialog.retry),
            format_keys(&sc.dialog.confirm),
            format_keys(&sc.dialog.dismiss)
        )
    } else {
        format!("{}=OK", format_keys(&sc.dialog.confirm))
    }
}
