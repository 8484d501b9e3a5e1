//! One-shot text or JSON rendering of a console section.

use anyhow::Result;
use owo_colors::OwoColorize;
use sentinel_shared::dashboard::{DashboardSummary, RISK_DISTRIBUTION};
use sentinel_shared::render::{group_thousands, render, render_guidelines, Tone, ViewNode};
use sentinel_shared::EntityStore;
use serde::Serialize;

use crate::app::Section;

#[derive(Serialize)]
struct DashboardJson<'a> {
    summary: DashboardSummary,
    risk_distribution: Vec<(&'a str, u64)>,
}

fn section_nodes(store: &EntityStore, section: Section) -> Vec<ViewNode> {
    match section {
        Section::Guidelines => store
            .guideline_sets()
            .iter()
            .flat_map(render_guidelines)
            .collect(),
        other => match other.kind() {
            Some(kind) => render(kind, &store.get_all(kind)),
            None => Vec::new(),
        },
    }
}

pub fn render_json(store: &EntityStore, section: Section) -> Result<String> {
    let text = match section {
        Section::Dashboard => serde_json::to_string_pretty(&DashboardJson {
            summary: DashboardSummary::from_store(store),
            risk_distribution: RISK_DISTRIBUTION.to_vec(),
        })?,
        other => serde_json::to_string_pretty(&section_nodes(store, other))?,
    };
    Ok(text)
}

pub fn render_text(store: &EntityStore, section: Section, color: bool) -> String {
    let mut out = String::new();
    let heading = format!("[{}]", section.title().to_uppercase());
    if color {
        out.push_str(&heading.bold().to_string());
    } else {
        out.push_str(&heading);
    }
    out.push('\n');

    if section == Section::Dashboard {
        let s = DashboardSummary::from_store(store);
        out.push_str(&format!(
            "  Open alerts:         {} ({} critical)\n",
            s.open_alerts, s.critical_alerts
        ));
        out.push_str(&format!(
            "  Citizen reports:     {} pending, {} verified\n",
            s.pending_reports, s.verified_reports
        ));
        out.push_str(&format!(
            "  Response teams:      {} deployed, {} available\n",
            s.deployed_teams, s.available_teams
        ));
        out.push_str(&format!(
            "  Affected population: {}\n",
            group_thousands(s.affected_population)
        ));
        out.push_str("  Risk distribution:\n");
        for (kind, share) in RISK_DISTRIBUTION {
            out.push_str(&format!("    {:<11} {:>3}%\n", kind, share));
        }
        return out;
    }

    for node in section_nodes(store, section) {
        let badge = node
            .badge
            .as_ref()
            .map(|b| paint(&format!("[{}]", b.text), b.tone, color))
            .unwrap_or_default();
        let id = node.key.as_ref().map(|k| format!("{} ", k.id)).unwrap_or_default();
        out.push_str(&format!("  {}{} {}\n", id, node.title, badge));
        for line in node.body.iter().chain(node.meta.iter()) {
            out.push_str(&format!("      {}\n", line));
        }
    }
    out
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Critical => text.red().bold().to_string(),
        Tone::High | Tone::Warning | Tone::Medium => text.yellow().to_string(),
        Tone::Success => text.green().to_string(),
        Tone::Low | Tone::Info => text.cyan().to_string(),
        Tone::Neutral => text.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_shared::seed;

    fn store() -> EntityStore {
        EntityStore::from_seed(seed::sample_data())
    }

    #[test]
    fn test_text_lists_reports_with_state() {
        let text = render_text(&store(), Section::Reports, false);
        assert!(text.starts_with("[CITIZEN REPORTS]"));
        assert!(text.contains("CR002 Fire Report [Pending Verification]"));
        assert!(text.contains("[Rejected - Location Mismatch]"));
    }

    #[test]
    fn test_dashboard_text() {
        let text = render_text(&store(), Section::Dashboard, false);
        assert!(text.contains("Affected population: 90,000"));
        assert!(text.lines().any(|l| l.contains("Flood") && l.ends_with("35%")));
    }

    #[test]
    fn test_json_teams() {
        let json = render_json(&store(), Section::Teams).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["badge"]["text"], "Deployed");
    }
}
