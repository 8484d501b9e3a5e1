//! Console state driven by the event loop and read by the renderer.
//!
//! All mutation goes through the dispatcher. Rendered nodes are cached per
//! section and rebuilt only for the kinds named in store change notices.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sentinel_shared::action::{Action, BulletinKind};
use sentinel_shared::activity::{ActivityFeed, FeedScheduler, LiveIndicator, SystemClock};
use sentinel_shared::dashboard::DashboardSummary;
use sentinel_shared::dispatcher::{Dispatcher, Notice, NoticeLevel, Outcome};
use sentinel_shared::guideline::GuidelineSet;
use sentinel_shared::render::{render_alerts, render_detail, render_reports, render_teams};
use sentinel_shared::render::{DetailPanel, ViewNode};
use sentinel_shared::selection::{CloseCause, SelectionController};
use sentinel_shared::services::ResponseServices;
use sentinel_shared::store::{ChangeNotice, SeedData};
use sentinel_shared::{EntityKind, EntityStore};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::str::FromStr;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::config::SentinelConfig;

/// Criteria offered by the filter control
pub const FILTER_CRITERIA: [&str; 5] = ["all", "critical", "high", "medium", "low"];

const NOTICE_HISTORY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Dashboard,
    Alerts,
    Reports,
    Teams,
    Guidelines,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Alerts,
        Section::Reports,
        Section::Teams,
        Section::Guidelines,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Alerts => "Alerts",
            Self::Reports => "Citizen Reports",
            Self::Teams => "Response Teams",
            Self::Guidelines => "Guidelines",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Alerts => 1,
            Self::Reports => 2,
            Self::Teams => 3,
            Self::Guidelines => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Entity kind listed in this section
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Dashboard => None,
            Self::Alerts => Some(EntityKind::Alert),
            Self::Reports => Some(EntityKind::Report),
            Self::Teams => Some(EntityKind::Team),
            Self::Guidelines => Some(EntityKind::Guideline),
        }
    }
}

impl FromStr for Section {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "alerts" | "alert" => Ok(Self::Alerts),
            "reports" | "report" => Ok(Self::Reports),
            "teams" | "team" => Ok(Self::Teams),
            "guidelines" | "guideline" => Ok(Self::Guidelines),
            other => Err(anyhow!("Unknown section: {}", other)),
        }
    }
}

/// Input after key and mouse decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    NextSection,
    PrevSection,
    GoTo(Section),
    CursorUp,
    CursorDown,
    /// Open the highlighted card, or run the highlighted quick action
    Activate,
    /// Inline verify on the highlighted report card
    Verify,
    /// Nth button in the open detail panel
    ModalAction(usize),
    Close(CloseCause),
    NextTab,
    PrevTab,
    CycleFilter,
    Quit,
}

/// Dashboard buttons: quick actions then SOS controls
pub fn quick_actions() -> Vec<BulletinKind> {
    BulletinKind::QUICK
        .iter()
        .chain(BulletinKind::SOS.iter())
        .copied()
        .collect()
}

#[derive(Debug, Default)]
struct ViewCache {
    alerts: Vec<ViewNode>,
    reports: Vec<ViewNode>,
    teams: Vec<ViewNode>,
    renders: u64,
}

impl ViewCache {
    fn build(store: &EntityStore) -> Self {
        let mut cache = Self::default();
        for kind in [EntityKind::Alert, EntityKind::Report, EntityKind::Team] {
            cache.refresh(kind, store);
        }
        cache
    }

    fn refresh(&mut self, kind: EntityKind, store: &EntityStore) {
        match kind {
            EntityKind::Alert => self.alerts = render_alerts(store.alerts()),
            EntityKind::Report => self.reports = render_reports(store.reports()),
            EntityKind::Team => self.teams = render_teams(store.teams()),
            // Guidelines are read-only and rendered per tab
            EntityKind::Guideline => return,
        }
        self.renders += 1;
    }
}

pub type ConsoleScheduler = FeedScheduler<SystemClock, StdRng>;

pub struct App<S> {
    store: EntityStore,
    selection: SelectionController,
    dispatcher: Dispatcher<S>,
    changes: UnboundedReceiver<ChangeNotice>,
    views: ViewCache,
    feed: ActivityFeed,
    scheduler: ConsoleScheduler,
    indicator: LiveIndicator,
    section: Section,
    cursors: [usize; 5],
    guideline_tab: usize,
    filter: usize,
    notices: VecDeque<Notice>,
    should_quit: bool,
}

impl<S: ResponseServices> App<S> {
    pub fn new(config: &SentinelConfig, seed: SeedData, services: S) -> Self {
        let mut store = EntityStore::from_seed(seed);
        let changes = store.subscribe(&[EntityKind::Alert, EntityKind::Report, EntityKind::Team]);
        let views = ViewCache::build(&store);

        let random = match config.feed.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scheduler = FeedScheduler::new(SystemClock, random, config.feed.interval());

        let guideline_tab = store
            .guideline_sets()
            .iter()
            .position(|g| g.disaster_type == config.ui.default_guideline)
            .unwrap_or(0);

        Self {
            store,
            selection: SelectionController::new(),
            dispatcher: Dispatcher::new(services, config.dispatch.clone()),
            changes,
            views,
            feed: ActivityFeed::new(config.feed.capacity),
            scheduler,
            indicator: LiveIndicator::default(),
            section: config.ui.start_section,
            cursors: [0; 5],
            guideline_tab,
            filter: 0,
            notices: VecDeque::new(),
            should_quit: false,
        }
    }

    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::NextSection => self.set_section(self.section.next()),
            Intent::PrevSection => self.set_section(self.section.prev()),
            Intent::GoTo(section) => self.set_section(section),
            Intent::CursorUp => {
                let cursor = &mut self.cursors[self.section.index()];
                *cursor = cursor.saturating_sub(1);
            }
            Intent::CursorDown => {
                let len = self.item_count(self.section);
                let cursor = &mut self.cursors[self.section.index()];
                if *cursor + 1 < len {
                    *cursor += 1;
                }
            }
            Intent::Activate => {
                if let Some(action) = self.highlighted_action() {
                    self.dispatch(action);
                }
            }
            Intent::Verify => {
                let verify = self
                    .highlighted_node()
                    .and_then(|node| {
                        node.actions
                            .iter()
                            .find(|a| matches!(a, Action::VerifyReport(_)))
                    })
                    .cloned();
                match verify {
                    Some(action) => {
                        self.dispatch(action);
                    }
                    None => debug!(section = ?self.section, "no verify action on highlighted card"),
                }
            }
            Intent::ModalAction(index) => {
                let action = self
                    .detail()
                    .and_then(|panel| panel.actions.get(index).cloned());
                if let Some(action) = action {
                    self.dispatch(action);
                }
            }
            Intent::Close(cause) => {
                self.selection.close(cause);
            }
            Intent::NextTab => self.shift_tab(1),
            Intent::PrevTab => self.shift_tab(-1),
            Intent::CycleFilter => {
                self.filter = (self.filter + 1) % FILTER_CRITERIA.len();
                let criterion = FILTER_CRITERIA[self.filter];
                // Criterion is recorded only; lists are not narrowed
                info!(criterion, section = ?self.section, "filter selected");
                self.post(Notice::new(
                    NoticeLevel::Info,
                    format!("Filter: {}", criterion),
                ));
            }
            Intent::Quit => self.should_quit = true,
        }
    }

    /// Route one action through the dispatcher and refresh dirty views
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let outcome = self
            .dispatcher
            .dispatch(&mut self.store, &mut self.selection, action);
        if !outcome.notice.message.is_empty() {
            self.post(outcome.notice.clone());
        }
        self.sync();
        outcome
    }

    /// Drain change notices and re-render the affected regions.
    /// Returns the kinds that were refreshed.
    pub fn sync(&mut self) -> Vec<EntityKind> {
        let mut dirty = HashSet::new();
        while let Ok(notice) = self.changes.try_recv() {
            debug!(kind = %notice.kind, id = %notice.id, revision = notice.revision, "change notice");
            dirty.insert(notice.kind);
        }

        let mut refreshed = Vec::new();
        for kind in [EntityKind::Alert, EntityKind::Report, EntityKind::Team] {
            if dirty.contains(&kind) {
                self.views.refresh(kind, &self.store);
                refreshed.push(kind);
            }
        }

        if let Some(selected) = self.selection.selected() {
            if !self.store.contains(selected) {
                debug!(entity = %selected, "selected entity disappeared");
                self.selection.close(CloseCause::Explicit);
            }
        }
        refreshed
    }

    pub fn on_feed_tick(&mut self) {
        let event = self.scheduler.tick(&mut self.feed);
        debug!(title = %event.title, tick = self.scheduler.ticks(), "feed event");
    }

    pub fn on_indicator_tick(&mut self) {
        self.indicator.toggle();
    }

    /// Detail panel for the open selection, rebuilt from current store state
    pub fn detail(&self) -> Option<DetailPanel> {
        let selected = self.selection.selected()?;
        self.store
            .get_by_id(selected.kind, &selected.id)
            .ok()
            .map(|entity| render_detail(&entity))
    }

    /// Close store subscriptions
    pub fn shutdown(&mut self) {
        self.store.shutdown();
        info!(revision = self.store.revision(), "console shut down");
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<S> {
        &mut self.dispatcher
    }

    pub fn feed(&self) -> &ActivityFeed {
        &self.feed
    }

    pub fn indicator(&self) -> &LiveIndicator {
        &self.indicator
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn cursor(&self) -> usize {
        self.cursors[self.section.index()]
    }

    pub fn nodes(&self, section: Section) -> &[ViewNode] {
        match section {
            Section::Alerts => &self.views.alerts,
            Section::Reports => &self.views.reports,
            Section::Teams => &self.views.teams,
            Section::Dashboard | Section::Guidelines => &[],
        }
    }

    /// Number of region re-renders since startup
    pub fn render_count(&self) -> u64 {
        self.views.renders
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_store(&self.store)
    }

    pub fn guideline_tab(&self) -> usize {
        self.guideline_tab
    }

    pub fn current_guidelines(&self) -> Option<&GuidelineSet> {
        self.store.guideline_sets().get(self.guideline_tab)
    }

    pub fn filter(&self) -> &'static str {
        FILTER_CRITERIA[self.filter]
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn set_section(&mut self, section: Section) {
        if section != self.section {
            debug!(from = ?self.section, to = ?section, "section changed");
            self.section = section;
        }
    }

    fn item_count(&self, section: Section) -> usize {
        match section {
            Section::Dashboard => quick_actions().len(),
            Section::Guidelines => 0,
            other => self.nodes(other).len(),
        }
    }

    fn highlighted_node(&self) -> Option<&ViewNode> {
        self.nodes(self.section).get(self.cursor())
    }

    fn highlighted_action(&self) -> Option<Action> {
        match self.section {
            Section::Dashboard => quick_actions().get(self.cursor()).map(|k| Action::Bulletin(*k)),
            Section::Guidelines => None,
            _ => self.highlighted_node().and_then(|node| {
                node.actions.iter().find(|a| a.is_view()).cloned()
            }),
        }
    }

    fn shift_tab(&mut self, step: isize) {
        let len = self.store.guideline_sets().len();
        if len == 0 {
            return;
        }
        let next = (self.guideline_tab as isize + step).rem_euclid(len as isize);
        self.guideline_tab = next as usize;
        self.section = Section::Guidelines;
    }

    fn post(&mut self, notice: Notice) {
        if self.notices.len() == NOTICE_HISTORY {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }
}
