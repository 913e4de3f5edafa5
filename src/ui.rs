use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use tempo_core::{format_ms_cs, RunState};

use crate::theme::{self, AnimationKind, ControlLayout, Palette, Theme};
use crate::{settings_rows, Screen, SettingsRow, TempoApp};

// Dash window of the rotating ring, in perimeter cells
const DASH_CELLS: usize = 3;
const GAP_CELLS: usize = 2;

const RING_HEIGHT: u16 = 5;

const HEART_SMALL: [&str; 3] = ["     ", " ♥ ♥ ", "  ♥  "];
const HEART_LARGE: [&str; 3] = ["♥♥ ♥♥", "♥♥♥♥♥", " ♥♥♥ "];

pub fn draw(f: &mut Frame, app: &TempoApp) {
    match app.screen {
        Screen::Timer => draw_timer(f, app),
        Screen::Settings => draw_settings(f, app),
    }
}

fn draw_timer(f: &mut Frame, app: &TempoApp) {
    let settings = app.store.get();
    let palette = theme::palette(app.theme, settings.night_mode);
    let area = f.size();

    // Theme backdrop
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(7),    // Clock
            Constraint::Length(9), // Controls
        ])
        .split(area);

    draw_header(f, chunks[0], &palette);
    draw_clock(f, chunks[1], app, &palette);
    draw_controls(f, chunks[2], app, &palette);
}

fn draw_header(f: &mut Frame, area: Rect, palette: &Palette) {
    let hint = Paragraph::new(Line::from(Span::styled(
        "[s] Settings  [q] Quit ",
        Style::default().fg(palette.foreground),
    )))
    .alignment(Alignment::Right);
    f.render_widget(hint, area);
}

fn draw_clock(f: &mut Frame, area: Rect, app: &TempoApp, palette: &Palette) {
    let settings = app.store.get();
    let font = theme::DigitFont::from_name(&settings.selected_font);
    let readout = theme::style_readout(font, &format_ms_cs(app.engine.elapsed_secs()));
    let readout_style = Style::default()
        .fg(palette.foreground)
        .add_modifier(Modifier::BOLD);

    match theme::animation(app.theme, settings.enable_animations) {
        AnimationKind::DashedRing => {
            draw_ring_clock(f, area, app.anim_ticks, &readout, readout_style, palette)
        }
        AnimationKind::PulsingHeart => {
            draw_heart_clock(f, area, app.anim_ticks, &readout, readout_style)
        }
        AnimationKind::None => draw_plain_clock(f, area, &readout, readout_style),
    }
}

fn draw_plain_clock(f: &mut Frame, area: Rect, readout: &str, readout_style: Style) {
    let row = centered_rect(area.width, 1, area);
    let clock =
        Paragraph::new(Line::styled(readout.to_string(), readout_style)).alignment(Alignment::Center);
    f.render_widget(clock, row);
}

/// The rotating ring: a rounded border whose dash pattern slides around the
/// perimeter, one full revolution per animation period.
fn draw_ring_clock(
    f: &mut Frame,
    area: Rect,
    anim_ticks: u64,
    readout: &str,
    readout_style: Style,
    palette: &Palette,
) {
    let want_width = readout.chars().count() as u16 + 10;
    let ring = centered_rect(want_width, RING_HEIGHT, area);
    let width = ring.width as usize;
    let height = ring.height as usize;
    if width < 4 || height < 3 {
        draw_plain_clock(f, area, readout, readout_style);
        return;
    }

    let perimeter = 2 * width + 2 * (height - 2);
    let offset = theme::ring_offset(anim_ticks, perimeter);
    let lines: Vec<Line> = ring_grid(width, height, offset)
        .into_iter()
        .map(|row| {
            Line::styled(
                row.into_iter().collect::<String>(),
                Style::default().fg(palette.ring),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines), ring);

    // Readout sits on the ring's middle row, inset past the side cells
    let middle = Rect::new(ring.x + 1, ring.y + ring.height / 2, ring.width - 2, 1);
    let clock =
        Paragraph::new(Line::styled(readout.to_string(), readout_style)).alignment(Alignment::Center);
    f.render_widget(clock, middle);
}

fn draw_heart_clock(
    f: &mut Frame,
    area: Rect,
    anim_ticks: u64,
    readout: &str,
    readout_style: Style,
) {
    let art = if theme::heart_large(anim_ticks) {
        HEART_LARGE
    } else {
        HEART_SMALL
    };
    let block = centered_rect(area.width, 5, area);
    let mut lines: Vec<Line> = art
        .iter()
        .map(|row| Line::styled(row.to_string(), Style::default().fg(Color::White)))
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(readout.to_string(), readout_style));
    let clock = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(clock, block);
}

fn draw_controls(f: &mut Frame, area: Rect, app: &TempoApp, palette: &Palette) {
    let running = app.engine.state == RunState::Running;
    let (start_fill, start_text) = theme::start_button_colors(palette, running);
    let start_label = if running { "[Space] Stop" } else { "[Space] Start" };

    match theme::control_layout(app.theme) {
        ControlLayout::SideBySide => {
            // Both controls share one row and never hide
            let row = centered_rect(area.width, 3, area);
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row);
            draw_button(f, centered_rect(20, 3, halves[0]), start_label, start_fill, start_text);
            draw_button(
                f,
                centered_rect(20, 3, halves[1]),
                "[R] Reset",
                palette.reset_fill,
                palette.reset_text,
            );
        }
        ControlLayout::Stacked => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(area);
            draw_button(f, centered_rect(24, 3, rows[0]), start_label, start_fill, start_text);
            if theme::reset_visible(app.theme, running, app.engine.elapsed_secs()) {
                draw_button(
                    f,
                    centered_rect(24, 3, rows[2]),
                    "[R] Reset",
                    palette.reset_fill,
                    palette.reset_text,
                );
            }
        }
    }
}

fn draw_button(f: &mut Frame, area: Rect, label: &str, fill: Color, text: Color) {
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(text)
                .bg(fill)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(button, area);
}

fn draw_settings(f: &mut Frame, app: &TempoApp) {
    let settings = app.store.get();
    let rows = settings_rows(settings);
    let mut lines: Vec<Line> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if let Some(caption) = section_caption(*row) {
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(caption_line(caption));
        }
        lines.push(row_line(*row, app, i == app.settings_cursor));
    }

    // About
    lines.push(Line::raw(""));
    lines.push(caption_line("About"));
    lines.push(Line::raw(format!("    Version {}", env!("CARGO_PKG_VERSION"))));
    lines.push(contact_line("Contact", "destek@idemir.com"));
    lines.push(contact_line("Support", "buymeacoffee.com/idemir"));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  arrows=move  ENTER=select  left/right=adjust  q=back",
        Style::default().fg(Color::DarkGray),
    ));

    let panel = centered_rect(60, lines.len() as u16 + 2, f.size());
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Settings "),
    );
    f.render_widget(form, panel);
}

fn caption_line(caption: &'static str) -> Line<'static> {
    Line::styled(
        caption,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    )
}

/// Outbound references render underlined so they read as links; opening
/// them is left to the terminal.
fn contact_line(label: &'static str, target: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("    {:<10}", label)),
        Span::styled(target, Style::default().add_modifier(Modifier::UNDERLINED)),
    ])
}

fn section_caption(row: SettingsRow) -> Option<&'static str> {
    match row {
        SettingsRow::ThemePick(Theme::Original) => Some("Theme"),
        SettingsRow::CountdownMode => Some("Timer"),
        SettingsRow::Animations => Some("Appearance"),
        SettingsRow::Notifications => Some("Notifications"),
        _ => None,
    }
}

fn row_line(row: SettingsRow, app: &TempoApp, selected: bool) -> Line<'static> {
    let settings = app.store.get();
    let text = match row {
        SettingsRow::ThemePick(theme) => {
            let mark = if theme == app.theme { "*" } else { " " };
            format!("{} {:<14}", mark, theme.name())
        }
        SettingsRow::Font => format!("  {:<14} < {} >", "Font", settings.selected_font),
        SettingsRow::CountdownMode => format!(
            "  {:<16} {}",
            "Countdown mode",
            on_off(settings.is_countdown_mode)
        ),
        SettingsRow::StartTime => format!(
            "  {:<14} < {} s >",
            "Start time",
            settings.countdown_start_time
        ),
        SettingsRow::AutoStart => {
            format!("  {:<16} {}", "Auto start", on_off(settings.auto_start))
        }
        SettingsRow::Animations => format!(
            "  {:<16} {}",
            "Animations",
            on_off(settings.enable_animations)
        ),
        SettingsRow::Notifications => format!(
            "  {:<16} {}",
            "Notifications",
            on_off(settings.enable_notifications)
        ),
        SettingsRow::NotifyLead => {
            format!("  {:<14} < {} s >", "Lead time", settings.notification_time)
        }
    };

    let marker = if selected { "> " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::styled(format!("{}{}", marker, text), style)
}

fn on_off(value: bool) -> &'static str {
    if value {
        "[ON]"
    } else {
        "[OFF]"
    }
}

/// Character grid for the ring border with the dash window applied.
fn ring_grid(width: usize, height: usize, offset: usize) -> Vec<Vec<char>> {
    let mut grid = vec![vec![' '; width]; height];
    let mut idx = 0usize;

    // Clockwise from the top-left corner
    for col in 0..width {
        if dash_on(idx, offset) {
            grid[0][col] = border_char(0, col, width, height);
        }
        idx += 1;
    }
    for row in 1..height - 1 {
        if dash_on(idx, offset) {
            grid[row][width - 1] = border_char(row, width - 1, width, height);
        }
        idx += 1;
    }
    for col in (0..width).rev() {
        if dash_on(idx, offset) {
            grid[height - 1][col] = border_char(height - 1, col, width, height);
        }
        idx += 1;
    }
    for row in (1..height - 1).rev() {
        if dash_on(idx, offset) {
            grid[row][0] = border_char(row, 0, width, height);
        }
        idx += 1;
    }
    grid
}

fn dash_on(cell: usize, offset: usize) -> bool {
    (cell + offset) % (DASH_CELLS + GAP_CELLS) < DASH_CELLS
}

fn border_char(row: usize, col: usize, width: usize, height: usize) -> char {
    let bottom = height - 1;
    let right = width - 1;
    match (row, col) {
        (0, 0) => '╭',
        (0, c) if c == right => '╮',
        (r, c) if r == bottom && c == right => '╯',
        (r, 0) if r == bottom => '╰',
        (0, _) => '─',
        (r, _) if r == bottom => '─',
        _ => '│',
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
