//! Utilities - palette and ViewNode to text conversion

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sentinel_shared::dispatcher::NoticeLevel;
use sentinel_shared::render::{Badge, NodeLayout, Tone, ViewNode};

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Critical => Color::Red,
        Tone::High => Color::Rgb(255, 140, 0),
        Tone::Medium => Color::Yellow,
        Tone::Low => Color::Rgb(100, 180, 255),
        Tone::Success => Color::Green,
        Tone::Info => Color::Cyan,
        Tone::Warning => Color::Yellow,
        Tone::Neutral => Color::Gray,
    }
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

pub fn badge_span(badge: &Badge) -> Span<'static> {
    Span::styled(
        format!("[{}]", badge.text),
        Style::default()
            .fg(tone_color(badge.tone))
            .add_modifier(Modifier::BOLD),
    )
}

/// Lines for one node. Highlighted nodes get a marker and bold title.
pub fn node_lines(node: &ViewNode, highlighted: bool) -> Vec<Line<'static>> {
    let marker = if highlighted { "▶ " } else { "  " };
    let mut title_style = Style::default().fg(Color::White);
    if highlighted || node.layout == NodeLayout::Section {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let mut head = vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(node.title.clone(), title_style),
    ];
    if let Some(badge) = &node.badge {
        head.push(Span::raw(" "));
        head.push(badge_span(badge));
    }
    if !node.meta.is_empty() {
        head.push(Span::styled(
            format!("  {}", node.meta.join(" | ")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(head)];
    let bullet = if node.layout == NodeLayout::Section { "• " } else { "" };
    for text in &node.body {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("{}{}", bullet, text),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }
    if node.layout == NodeLayout::Card && !node.actions.is_empty() {
        let hints: Vec<&str> = node.actions.iter().map(|a| a.label()).collect();
        lines.push(Line::from(Span::styled(
            format!("    {}", hints.join("  ")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_shared::render::render_alerts;
    use sentinel_shared::seed;

    fn flatten(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_lines_include_badge_and_actions() {
        let nodes = render_alerts(&seed::sample_alerts());
        let lines = node_lines(&nodes[0], true);
        let head = flatten(&lines[0]);
        assert!(head.starts_with("▶ "));
        assert!(head.contains("[Critical]"));
        assert!(flatten(lines.last().unwrap()).contains("View Details"));
    }

    #[test]
    fn test_severity_palette() {
        assert_eq!(tone_color(Tone::Critical), Color::Red);
        assert_eq!(notice_color(NoticeLevel::Error), Color::Red);
    }
}
