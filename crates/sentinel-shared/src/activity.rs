//! Activity feed - bounded, newest-first log of synthesized status events.
//!
//! The scheduler stands in for a real event stream. It draws one candidate
//! per tick and prepends it; the feed drops its oldest entry once past
//! capacity. Nothing survives a restart.

use chrono::{Local, NaiveTime};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

pub const FEED_CAPACITY: usize = 5;

pub const DEFAULT_FEED_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_INDICATOR_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedTag {
    Success,
    Info,
    Warning,
}

impl std::fmt::Display for FeedTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Wall-clock time as HH:MM
    pub timestamp: String,
    pub title: String,
    pub description: String,
    pub tag: FeedTag,
}

#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub title: &'static str,
    pub description: &'static str,
    pub tag: FeedTag,
}

pub const CANDIDATES: [Candidate; 5] = [
    Candidate {
        title: "IoT Sensor Update",
        description: "Water level sensors reporting normal levels in Mumbai",
        tag: FeedTag::Success,
    },
    Candidate {
        title: "AI Prediction",
        description: "Weather AI model updated with satellite data",
        tag: FeedTag::Info,
    },
    Candidate {
        title: "Team Movement",
        description: "NDRF team repositioning to Delhi NCR",
        tag: FeedTag::Warning,
    },
    Candidate {
        title: "Citizen Report",
        description: "New flood report received and verified via Google Lens",
        tag: FeedTag::Success,
    },
    Candidate {
        title: "System Update",
        description: "Google Maps integration refreshed with live traffic",
        tag: FeedTag::Info,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFeed {
    events: VecDeque<ActivityEvent>,
    capacity: usize,
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new(FEED_CAPACITY)
    }
}

impl ActivityFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepend an event, evicting from the tail past capacity
    pub fn push(&mut self, event: ActivityEvent) {
        self.events.push_front(event);
        while self.events.len() > self.capacity {
            if let Some(evicted) = self.events.pop_back() {
                debug!(title = %evicted.title, "activity evicted");
            }
        }
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &ActivityEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Time source for feed timestamps
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock pinned to a fixed time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Uniform choice among `len` candidates
pub trait RandomSource {
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        use rand::Rng;
        if len == 0 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

pub struct FeedScheduler<C, R> {
    clock: C,
    random: R,
    interval: Duration,
    ticks: u64,
}

impl<C: Clock, R: RandomSource> FeedScheduler<C, R> {
    pub fn new(clock: C, random: R, interval: Duration) -> Self {
        Self {
            clock,
            random,
            interval,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Produce one event and prepend it to `feed`
    pub fn tick(&mut self, feed: &mut ActivityFeed) -> ActivityEvent {
        let candidate = CANDIDATES[self.random.pick(CANDIDATES.len()) % CANDIDATES.len()];
        let event = ActivityEvent {
            timestamp: self.clock.now().format("%H:%M").to_string(),
            title: candidate.title.to_string(),
            description: candidate.description.to_string(),
            tag: candidate.tag,
        };
        self.ticks += 1;
        debug!(tick = self.ticks, title = %event.title, "activity produced");
        feed.push(event.clone());
        event
    }
}

/// Blinking "live" marker, toggled by its own timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveIndicator {
    lit: bool,
}

impl Default for LiveIndicator {
    fn default() -> Self {
        Self { lit: true }
    }
}

impl LiveIndicator {
    pub fn toggle(&mut self) {
        self.lit = !self.lit;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
