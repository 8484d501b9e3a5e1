//! View-tree rendering.
//!
//! Pure functions from store contents to presentation-neutral nodes. The same
//! snapshot always yields an equal tree, so callers can re-render whole
//! regions on every change notice and compare results.

use crate::action::{
    alert_detail_actions, report_card_actions, report_detail_actions, team_detail_actions, Action,
};
use crate::activity::{ActivityFeed, FeedTag};
use crate::alert::{Alert, Severity};
use crate::guideline::GuidelineSet;
use crate::report::{CitizenReport, VerificationState};
use crate::store::{Entity, EntityKind, EntityRef};
use crate::team::{ResponseTeam, TeamStatus};
use serde::Serialize;

/// Semantic colour slot; the front end decides the actual palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Critical,
    High,
    Medium,
    Low,
    Success,
    Info,
    Warning,
    Neutral,
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Self::Critical,
            Severity::High => Self::High,
            Severity::Medium => Self::Medium,
            Severity::Low => Self::Low,
        }
    }
}

impl From<FeedTag> for Tone {
    fn from(tag: FeedTag) -> Self {
        match tag {
            FeedTag::Success => Self::Success,
            FeedTag::Info => Self::Info,
            FeedTag::Warning => Self::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeLayout {
    Card,
    ListItem,
    Section,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    /// Entity behind the node; `None` for reference and feed content
    pub key: Option<EntityRef>,
    pub layout: NodeLayout,
    pub title: String,
    pub badge: Option<Badge>,
    pub body: Vec<String>,
    pub meta: Vec<String>,
    pub actions: Vec<Action>,
}

/// Content of the detail overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub key: EntityRef,
    pub title: String,
    pub rows: Vec<(String, String)>,
    pub actions: Vec<Action>,
}

/// Render every entity of `kind` in `entities`, in order.
/// Entities of other kinds are skipped.
pub fn render(kind: EntityKind, entities: &[Entity]) -> Vec<ViewNode> {
    entities
        .iter()
        .filter(|e| e.kind() == kind)
        .flat_map(|e| match e {
            Entity::Alert(a) => vec![alert_card(a)],
            Entity::Report(r) => vec![report_card(r)],
            Entity::Team(t) => vec![team_item(t)],
            Entity::Guideline(g) => render_guidelines(g),
        })
        .collect()
}

pub fn render_alerts(alerts: &[Alert]) -> Vec<ViewNode> {
    alerts.iter().map(alert_card).collect()
}

pub fn render_reports(reports: &[CitizenReport]) -> Vec<ViewNode> {
    reports.iter().map(report_card).collect()
}

pub fn render_teams(teams: &[ResponseTeam]) -> Vec<ViewNode> {
    teams.iter().map(team_item).collect()
}

pub fn alert_card(alert: &Alert) -> ViewNode {
    ViewNode {
        key: Some(EntityRef::new(EntityKind::Alert, &alert.id)),
        layout: NodeLayout::Card,
        title: alert.kind.clone(),
        badge: Some(Badge::new(alert.severity.to_string(), alert.severity.into())),
        body: vec![alert.location.name.clone(), alert.description.clone()],
        meta: vec![format!("Source: {}", alert.source), alert.time_label()],
        actions: vec![Action::ViewAlert(alert.id.clone())],
    }
}

pub fn verification_tone(state: VerificationState) -> Tone {
    match state {
        VerificationState::Verified => Tone::Success,
        VerificationState::Pending => Tone::Warning,
        VerificationState::Rejected => Tone::Critical,
    }
}

pub fn report_card(report: &CitizenReport) -> ViewNode {
    ViewNode {
        key: Some(EntityRef::new(EntityKind::Report, &report.id)),
        layout: NodeLayout::Card,
        title: format!("{} Report", report.kind),
        badge: Some(Badge::new(
            report.verification.to_string(),
            verification_tone(report.verification.state),
        )),
        body: vec![
            format!("By: {} | {}", report.reporter, report.time_label()),
            report.location.name.clone(),
            report.description.clone(),
        ],
        meta: Vec::new(),
        actions: report_card_actions(report),
    }
}

pub fn team_tone(status: TeamStatus) -> Tone {
    match status {
        TeamStatus::Deployed => Tone::Critical,
        TeamStatus::Ready => Tone::Success,
        TeamStatus::Standby => Tone::Info,
        TeamStatus::Returning => Tone::Neutral,
    }
}

pub fn team_item(team: &ResponseTeam) -> ViewNode {
    ViewNode {
        key: Some(EntityRef::new(EntityKind::Team, &team.id)),
        layout: NodeLayout::ListItem,
        title: team.kind.clone(),
        badge: Some(Badge::new(team.status.to_string(), team_tone(team.status))),
        body: vec![
            format!("{} → {}", team.current_location.name, team.destination),
            format!("ETA: {} | Personnel: {}", team.eta_label(), team.personnel),
        ],
        meta: Vec::new(),
        actions: vec![Action::ViewTeam(team.id.clone())],
    }
}

/// Do and don't sections for one disaster type
pub fn render_guidelines(set: &GuidelineSet) -> Vec<ViewNode> {
    let section = |title: String, items: &[String], tone: Tone| ViewNode {
        key: None,
        layout: NodeLayout::Section,
        title,
        badge: Some(Badge::new(
            if tone == Tone::Success { "DO" } else { "DON'T" },
            tone,
        )),
        body: items.to_vec(),
        meta: Vec::new(),
        actions: Vec::new(),
    };
    vec![
        section(
            format!("What TO DO during {}:", set.disaster_type),
            &set.do_list,
            Tone::Success,
        ),
        section(
            format!("What NOT to do during {}:", set.disaster_type),
            &set.dont_list,
            Tone::Critical,
        ),
    ]
}

/// Feed entries newest first
pub fn render_feed(feed: &ActivityFeed) -> Vec<ViewNode> {
    feed.iter()
        .map(|event| ViewNode {
            key: None,
            layout: NodeLayout::ListItem,
            title: event.title.clone(),
            badge: Some(Badge::new("Live", event.tag.into())),
            body: vec![event.description.clone()],
            meta: vec![event.timestamp.clone()],
            actions: Vec::new(),
        })
        .collect()
}

pub fn render_detail(entity: &Entity) -> DetailPanel {
    match entity {
        Entity::Alert(a) => alert_detail(a),
        Entity::Report(r) => report_detail(r),
        Entity::Team(t) => team_detail(t),
        Entity::Guideline(g) => guideline_detail(g),
    }
}

fn row(label: &str, value: impl ToString) -> (String, String) {
    (label.to_string(), value.to_string())
}

fn alert_detail(alert: &Alert) -> DetailPanel {
    DetailPanel {
        key: EntityRef::new(EntityKind::Alert, &alert.id),
        title: format!("{} Alert - {}", alert.kind, alert.severity),
        rows: vec![
            row("Location", &alert.location.name),
            row("Time", alert.time_label()),
            row("Source", &alert.source),
            row("Status", alert.status),
            row("Affected Population", group_thousands(alert.affected_population)),
            row("Description", &alert.description),
            row("Coordinates", alert.location.coordinates),
        ],
        actions: alert_detail_actions(&alert.id),
    }
}

fn report_detail(report: &CitizenReport) -> DetailPanel {
    DetailPanel {
        key: EntityRef::new(EntityKind::Report, &report.id),
        title: format!("Citizen Report - {}", report.kind),
        rows: vec![
            row("Reporter", &report.reporter),
            row("Location", &report.location.name),
            row("Time", report.time_label()),
            row("Priority", report.priority),
            row("Verification Status", &report.verification),
            row(
                "Location Verified",
                if report.location_verified { "Yes" } else { "No" },
            ),
            row("Description", &report.description),
            row("Photos", format!("{} attached", report.photos.len())),
            row("Coordinates", report.location.coordinates),
        ],
        actions: report_detail_actions(report),
    }
}

fn team_detail(team: &ResponseTeam) -> DetailPanel {
    DetailPanel {
        key: EntityRef::new(EntityKind::Team, &team.id),
        title: format!("{} - {}", team.kind, team.status),
        rows: vec![
            row("Type", &team.kind),
            row("Current Location", &team.current_location.name),
            row("Destination", &team.destination),
            row("Status", team.status),
            row("ETA", team.eta_label()),
            row("Personnel", team.personnel),
            row("Coordinates", team.current_location.coordinates),
        ],
        actions: team_detail_actions(&team.id),
    }
}

fn guideline_detail(set: &GuidelineSet) -> DetailPanel {
    let mut rows: Vec<_> = set.do_list.iter().map(|item| row("Do", item)).collect();
    rows.extend(set.dont_list.iter().map(|item| row("Don't", item)));
    DetailPanel {
        key: EntityRef::new(EntityKind::Guideline, &set.disaster_type),
        title: format!("Safety Guidelines - {}", set.disaster_type),
        rows,
        actions: Vec::new(),
    }
}

/// 25000 -> "25,000"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
