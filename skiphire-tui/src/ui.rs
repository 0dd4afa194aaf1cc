use std::ops::Range;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use skiphire_core::{CHECKOUT_STEPS, CatalogState, SkipOption};

use crate::app::{App, GRID_COLUMNS};

const TILE_HEIGHT: u16 = 10;
const SKELETON_TILES: usize = 6;
const SUMMARY_HEIGHT: u16 = 12;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let sheet_height = if app.summary_open() {
        SUMMARY_HEIGHT.min(frame.area().height)
    } else {
        0
    };
    let [area, sheet_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(sheet_height)])
        .areas(frame.area());

    // Outer layout: title, steps, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, steps_area, content_area, status_area] = chunks else {
        return;
    };

    draw_header(frame, app, *header_area);
    draw_steps(frame, *steps_area);

    match app.catalog.state() {
        CatalogState::Failed(_) => draw_error(frame, *content_area),
        CatalogState::Idle | CatalogState::Loading => draw_skeleton(frame, *content_area),
        CatalogState::Loaded(options) if options.is_empty() => draw_empty(frame, *content_area),
        CatalogState::Loaded(options) => draw_grid(frame, app, options, *content_area),
    }

    draw_status(frame, app, *status_area);

    if let Some(option) = app.selected_option() {
        draw_summary(frame, option, sheet_area);
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let lines = vec![
        Line::from("Choose Your Skip Size").bold(),
        Line::from(vec![
            Span::styled(
                format!("📍 {}", app.query),
                Style::default().fg(Color::Blue),
            ),
            Span::raw("  "),
            Span::styled("🌱 Garden Waste", Style::default().fg(Color::Green)),
        ]),
    ];

    let header = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Skiphire"));
    frame.render_widget(header, area);
}

fn draw_steps(frame: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();
    for (idx, step) in CHECKOUT_STEPS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(Color::DarkGray)));
        }
        let span = if step.active {
            Span::styled(
                format!("● {}", step.label),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
        } else if step.completed {
            Span::styled(format!("✓ {}", step.label), Style::default().fg(Color::Green))
        } else {
            Span::styled(format!("○ {}", step.label), Style::default().fg(Color::Gray))
        };
        spans.push(span);
    }

    let steps = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(steps, area);
}

fn draw_error(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from("⚠ Oops! Something went wrong").bold(),
        Line::from(""),
        Line::from("Failed to load skip options. Please try again."),
        Line::from(""),
        Line::from("Press r or Enter to try again").fg(Color::Yellow),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title("Error"))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_empty(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from("No Skips Available").bold(),
        Line::from(""),
        Line::from(
            "We couldn't find any skip options for your location. \
             Please try a different postcode or contact us for assistance.",
        ),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_skeleton(frame: &mut Frame<'_>, area: Rect) {
    for (row_area, row) in grid_rows(area, SKELETON_TILES, 0) {
        for (tile_area, _) in row_tiles(row_area, row) {
            let lines = vec![
                Line::from("░░░░░░"),
                Line::from(""),
                Line::from("░░░░░░░░░░░░░░"),
                Line::from("░░░░░░░░░"),
                Line::from("░░░░"),
            ];
            let tile = Paragraph::new(lines)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(tile, tile_area);
        }
    }
}

fn draw_grid(frame: &mut Frame<'_>, app: &App, options: &[SkipOption], area: Rect) {
    let selection = app.selection.selection();
    let strip_height = if app.summary_open() { 3 } else { 0 };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(strip_height)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [tiles_area, strip_area] = chunks else {
        return;
    };

    for (row_area, row) in grid_rows(*tiles_area, options.len(), app.cursor) {
        for (tile_area, idx) in row_tiles(row_area, row) {
            let Some(option) = options.get(idx) else {
                continue;
            };
            let is_selected = selection.is_selected(&option.id);
            draw_tile(frame, option, is_selected, idx == app.cursor, tile_area);
        }
    }

    if let Some(option) = app.selected_option() {
        let strip = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Selected: {}", option.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" · {} · £{} Total Cost", option.hire_period, option.price)),
        ]))
        .style(Style::default().fg(Color::Blue))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(strip, *strip_area);
    }
}

fn draw_tile(
    frame: &mut Frame<'_>,
    option: &SkipOption,
    is_selected: bool,
    has_cursor: bool,
    area: Rect,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if has_cursor {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", option.size));
    if is_selected {
        block = block.title(Line::from(" ✓ Selected ").right_aligned());
    }

    let button = if is_selected {
        Line::from("[ Selected ]").fg(Color::Green)
    } else {
        Line::from("[ Select This Skip ]").fg(Color::Blue)
    };

    let lines = vec![
        Line::from(option.name.as_str()).bold(),
        Line::from(option.hire_period.as_str()).fg(Color::Gray),
        Line::from(option.description.as_str()).fg(Color::DarkGray),
        Line::from(format!("£{}", option.price)).bold().fg(Color::Blue),
        Line::from(""),
        button,
    ];

    let tile = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(tile, area);
}

/// The sheet owns the bottom rows of the frame; the rest of the screen is laid out above it.
fn draw_summary(frame: &mut Frame<'_>, option: &SkipOption, sheet_area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                option.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  £{}  Total Cost", option.price)),
        ]),
        Line::from(option.hire_period.as_str()),
        Line::from(option.description.as_str()).fg(Color::Gray),
        Line::from(""),
        Line::from(format!("Skip Hire ({})  £{}", option.size, option.price)),
        Line::from(vec![
            Span::raw("Includes: Delivery, Collection & Disposal  "),
            Span::styled("✓ Included", Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[b] Back", Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(
                "[Enter] Continue to Permit Check →",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[Esc] Close", Style::default().fg(Color::Gray)),
        ]),
    ];

    let sheet = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" ✓ Skip Selected "),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, sheet_area);
    frame.render_widget(sheet, sheet_area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let nav_hint = if app.catalog.error().is_some() {
        "r/Enter retry · q/Ctrl-C quit"
    } else if app.summary_open() {
        "←/→/↑/↓ move · Space toggle · Enter continue · b back · Esc close · q quit"
    } else {
        "←/→/↑/↓ move · Space/Enter select · q/Ctrl-C quit"
    };

    let status_text = if app.catalog.is_loading() {
        format!("Loading… · {nav_hint}")
    } else if let Some(err) = app.catalog.error() {
        format!("{err} · {nav_hint}")
    } else if let Some(msg) = &app.status_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.catalog.error().is_some() {
        Style::default().fg(Color::Red)
    } else if app.catalog.is_loading() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

/// Split `area` into tile rows, scrolled so the row holding `cursor` is visible.
///
/// Each row comes with the index range of the tiles it shows.
fn grid_rows(area: Rect, count: usize, cursor: usize) -> Vec<(Rect, Range<usize>)> {
    let visible_rows = usize::from((area.height / TILE_HEIGHT).max(1));
    let cursor_row = cursor / GRID_COLUMNS;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);
    let total_rows = count.div_ceil(GRID_COLUMNS);

    let mut rows = Vec::new();
    let mut y = area.y;
    for row in first_row..total_rows.min(first_row + visible_rows) {
        let height = TILE_HEIGHT.min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let start = row * GRID_COLUMNS;
        let end = (start + GRID_COLUMNS).min(count);
        rows.push((Rect { x: area.x, y, width: area.width, height }, start..end));
        y += height;
    }
    rows
}

fn row_tiles(row_area: Rect, tiles: Range<usize>) -> Vec<(Rect, usize)> {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); GRID_COLUMNS])
        .split(row_area);
    columns.iter().copied().zip(tiles).collect()
}
