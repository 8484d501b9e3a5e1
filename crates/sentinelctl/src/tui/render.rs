//! Rendering - draws the console from App state
//!
//! Widgets are built from shared ViewNodes every frame. Nothing here
//! mutates the store.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use sentinel_shared::dashboard::RISK_DISTRIBUTION;
use sentinel_shared::render::{group_thousands, render_feed, render_guidelines, DetailPanel, ViewNode};
use sentinel_shared::services::ResponseServices;
use tracing::debug;

use super::layout::{self, modal_area};
use super::utils::{node_lines, notice_color};
use crate::app::{quick_actions, App, Section};

const ACCENT: Color = Color::Rgb(150, 200, 255);

pub fn draw_ui<S: ResponseServices>(f: &mut Frame, app: &App<S>) {
    let size = f.size();
    let grid = layout::compute_layout(size);

    draw_header(f, grid.header, app);
    draw_tabs(f, grid.tabs, app);

    if drawable(grid.body, "body") {
        match app.section() {
            Section::Dashboard => draw_dashboard(f, grid.body, app),
            Section::Guidelines => draw_guidelines(f, grid.body, app),
            section => draw_node_list(f, grid.body, section.title(), app.nodes(section), app.cursor()),
        }
    }

    if grid.feed.width > 0 {
        draw_feed(f, grid.feed, app);
    }

    draw_status_bar(f, grid.status_bar, app);

    if let Some(panel) = app.detail() {
        draw_detail_modal(f, modal_area(size), &panel);
    }
}

fn drawable(area: Rect, region: &str) -> bool {
    if area.width == 0 || area.height == 0 {
        debug!(region, "render region skipped");
        return false;
    }
    true
}

fn draw_header<S: ResponseServices>(f: &mut Frame, area: Rect, app: &App<S>) {
    if !drawable(area, "header") {
        return;
    }
    let live_style = if app.indicator().is_lit() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();

    let header = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "SENTINEL Disaster Monitoring",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("● LIVE", live_style),
        Span::raw("  "),
        Span::styled(clock, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(header).style(Style::default().bg(Color::Rgb(0, 0, 0))),
        area,
    );
}

fn draw_tabs<S: ResponseServices>(f: &mut Frame, area: Rect, app: &App<S>) {
    if !drawable(area, "tabs") {
        return;
    }
    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.section().index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_dashboard<S: ResponseServices>(f: &mut Frame, area: Rect, app: &App<S>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let summary = app.summary();
    let stat = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!(" {:<22}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        stat(
            "Open alerts",
            format!("{} ({} critical)", summary.open_alerts, summary.critical_alerts),
            Color::Red,
        ),
        stat(
            "Citizen reports",
            format!(
                "{} pending, {} verified",
                summary.pending_reports, summary.verified_reports
            ),
            Color::Yellow,
        ),
        stat(
            "Response teams",
            format!(
                "{} deployed, {} available ({} personnel out)",
                summary.deployed_teams, summary.available_teams, summary.personnel_deployed
            ),
            Color::Green,
        ),
        stat(
            "Affected population",
            group_thousands(summary.affected_population),
            Color::White,
        ),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().title("Overview").borders(Borders::ALL)),
        rows[0],
    );

    if !drawable(rows[1], "dashboard") {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Risk Distribution (%)")
                .borders(Borders::ALL),
        )
        .data(&RISK_DISTRIBUTION[..])
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Rgb(255, 140, 0)))
        .value_style(Style::default().fg(Color::Black).bg(Color::Rgb(255, 140, 0)));
    f.render_widget(chart, columns[0]);

    let items: Vec<ListItem> = quick_actions()
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let line = Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(kind.label()),
            ]);
            ListItem::new(line)
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(app.cursor()));
    let list = List::new(items)
        .block(
            Block::default()
                .title("Quick Actions / SOS")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶");
    f.render_stateful_widget(list, columns[1], &mut state);
}

fn draw_node_list(f: &mut Frame, area: Rect, title: &str, nodes: &[ViewNode], cursor: usize) {
    let items: Vec<ListItem> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let mut lines = node_lines(node, i == cursor);
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let selected = if nodes.is_empty() { None } else { Some(cursor) };
    let mut state = ListState::default().with_selected(selected);
    let list = List::new(items).block(
        Block::default()
            .title(format!("{} ({})", title, nodes.len()))
            .borders(Borders::ALL),
    );
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_guidelines<S: ResponseServices>(f: &mut Frame, area: Rect, app: &App<S>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<Line> = app
        .store()
        .guideline_sets()
        .iter()
        .map(|g| Line::from(g.disaster_type.clone()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("Safety Guidelines [ ]").borders(Borders::ALL))
        .select(app.guideline_tab())
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, rows[0]);

    if !drawable(rows[1], "guidelines") {
        return;
    }
    let lines: Vec<Line> = app
        .current_guidelines()
        .map(render_guidelines)
        .unwrap_or_default()
        .iter()
        .flat_map(|node| {
            let mut lines = node_lines(node, false);
            lines.push(Line::from(""));
            lines
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false }),
        rows[1],
    );
}

fn draw_feed<S: ResponseServices>(f: &mut Frame, area: Rect, app: &App<S>) {
    if !drawable(area, "feed") {
        return;
    }
    let items: Vec<ListItem> = render_feed(app.feed())
        .iter()
        .map(|node| ListItem::new(node_lines(node, false)))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title("Live Activity Feed")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn draw_status_bar<S: ResponseServices>(f: &mut Frame, area: Rect, app: &App<S>) {
    if !drawable(area, "status_bar") {
        return;
    }
    let mut spans = vec![Span::raw(" ")];
    if let Some(notice) = app.latest_notice() {
        spans.push(Span::styled(
            notice.message.clone(),
            Style::default().fg(notice_color(notice.level)),
        ));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(
        format!("Filter: {}", app.filter()),
        Style::default().fg(Color::Gray),
    ));
    spans.push(Span::styled(
        " | Tab sections  ↑↓ select  Enter open  v verify  f filter  q quit",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_detail_modal(f: &mut Frame, area: Rect, panel: &DetailPanel) {
    if !drawable(area, "modal") {
        return;
    }
    let mut lines: Vec<Line> = panel
        .rows
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    for (i, action) in panel.actions.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Cyan)),
            Span::raw(action.label()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "[Esc] Close",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(panel.title.clone())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black)),
        area,
    );
}
