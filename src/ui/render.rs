use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::models::{World, WorldSortColumn};
use crate::sync::SyncStatus;
use crate::utils::{format_count, truncate_string};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  Worldcards";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_world_table(frame, app, chunks[0]);
    render_world_detail(frame, app, chunks[1]);
}

fn render_world_table(frame: &mut Frame, app: &App, area: Rect) {
    let worlds = app.get_sorted_worlds();

    // Build header with sort indicators
    let sort_indicator = |col: WorldSortColumn| {
        if app.sort_column == col {
            if app.sort_ascending {
                " ▲"
            } else {
                " ▼"
            }
        } else {
            ""
        }
    };

    let header_cells = [
        Cell::from(format!("Name{}", sort_indicator(WorldSortColumn::Name))),
        Cell::from(format!("Visits{}", sort_indicator(WorldSortColumn::Visits))),
        Cell::from(format!("Favs{}", sort_indicator(WorldSortColumn::Favorites))),
        Cell::from(format!("Updated{}", sort_indicator(WorldSortColumn::Updated))),
    ];

    let header = Row::new(header_cells).style(styles::title_style()).height(1);

    let rows: Vec<Row> = worlds
        .iter()
        .enumerate()
        .map(|(i, world)| {
            let style = if i == app.selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(world.display_name().to_string()),
                Cell::from(format!("{:>9}", format_count(world.visits))),
                Cell::from(format!("{:>7}", format_count(world.favorites))),
                Cell::from(world.updated_display()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(3),    // Name
        Constraint::Length(10), // Visits
        Constraint::Length(8),  // Favorites
        Constraint::Length(13), // Updated
    ];

    let sort_help = "[n]ame [v]isits [f]avs [d]ate";
    let title = if app.search_query.is_empty() {
        format!(" Worlds ({}) - {} ", worlds.len(), sort_help)
    } else {
        format!(
            " Worlds ({}/{}) - /{} ",
            worlds.len(),
            app.worlds.len(),
            app.search_query
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_world_detail(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_world() {
        Some(world) => detail_lines(world, area.width),
        None => vec![
            Line::from(""),
            Line::from(Span::styled("  No world selected", styles::muted_style())),
        ],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines(world: &World, width: u16) -> Vec<Line<'_>> {
    let placeholder = "-";
    let mut lines = vec![
        Line::from(Span::styled(world.display_name(), styles::title_style())),
        Line::from(""),
    ];

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, styles::muted_style()),
            Span::raw(value),
        ])
    };

    let or_placeholder = |s: &str| {
        if s.is_empty() {
            placeholder.to_string()
        } else {
            s.to_string()
        }
    };

    lines.push(field("Author:    ", or_placeholder(&world.author)));
    lines.push(field("World ID:  ", world.id.clone()));
    lines.push(field("Visits:    ", format_count(world.visits)));
    lines.push(field("Favorites: ", format_count(world.favorites)));
    lines.push(field("Updated:   ", world.updated_display()));
    lines.push(field("Tags:      ", or_placeholder(&world.tags_display())));
    lines.push(field(
        "Image:     ",
        truncate_string(
            &or_placeholder(&world.image_url),
            width.saturating_sub(14) as usize,
        ),
    ));

    if !world.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Description",
            styles::highlight_style(),
        )));
        lines.push(Line::from(world.description.as_str()));
    }

    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]efresh | [/] search | [q]uit";
    let right_text = format!(" {} ", shortcuts);

    let (left_text, left_style) = if matches!(app.state, AppState::Searching) {
        (format!(" /{}_", app.search_query), styles::search_style())
    } else if let Some(ref msg) = app.status_message {
        let style = if msg.starts_with("Error:") {
            styles::error_style()
        } else {
            styles::muted_style()
        };
        (format!(" {} ", msg), style)
    } else {
        let age = app.cache_age.as_deref().unwrap_or("never");
        match app.sync_status {
            Some(status) => {
                let style = match status {
                    SyncStatus::Fresh => styles::success_style(),
                    SyncStatus::Cached => styles::highlight_style(),
                    SyncStatus::Empty => styles::muted_style(),
                };
                (format!(" {} · updated {} ", status.label(), age), style)
            }
            None => (format!(" updated {} ", age), styles::muted_style()),
        }
    };

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 20, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "            Worldcards",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("            version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        key_line("  ↑/↓ j/k   ", "Navigate list"),
        key_line("  PgUp/PgDn ", "Page up/down"),
        key_line("  Home/End  ", "Jump to first/last"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        key_line("  r         ", "Refresh from cloud"),
        key_line("  /         ", "Search"),
        key_line("  n v f d   ", "Sort by name/visits/favs/date"),
        key_line("  Esc       ", "Clear search"),
        key_line("  ?         ", "Toggle this help"),
        key_line("  q         ", "Quit"),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
