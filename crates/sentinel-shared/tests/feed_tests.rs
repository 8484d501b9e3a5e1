//! Tests for activity.rs

use chrono::NaiveTime;
use sentinel_shared::activity::{
    ActivityFeed, FeedScheduler, FixedClock, RandomSource, FEED_CAPACITY,
};
use sentinel_shared::render::render_feed;
use std::time::Duration;

/// Walks the candidate list in order
struct RoundRobin(usize);

impl RandomSource for RoundRobin {
    fn pick(&mut self, len: usize) -> usize {
        let n = self.0 % len;
        self.0 += 1;
        n
    }
}

fn noon() -> FixedClock {
    FixedClock(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
}

#[test]
fn test_feed_holds_latest_five_newest_first() {
    let mut feed = ActivityFeed::default();
    let mut scheduler = FeedScheduler::new(noon(), RoundRobin(0), Duration::from_secs(30));

    let produced: Vec<_> = (0..12).map(|_| scheduler.tick(&mut feed)).collect();

    assert_eq!(feed.len(), FEED_CAPACITY);
    let expected: Vec<_> = produced.iter().rev().take(FEED_CAPACITY).cloned().collect();
    let actual: Vec<_> = feed.iter().cloned().collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_feed_below_capacity_keeps_all() {
    let mut feed = ActivityFeed::default();
    let mut scheduler = FeedScheduler::new(noon(), RoundRobin(0), Duration::from_secs(30));
    scheduler.tick(&mut feed);
    scheduler.tick(&mut feed);

    let titles: Vec<_> = feed.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["AI Prediction", "IoT Sensor Update"]);
}

#[test]
fn test_render_feed_matches_order() {
    let mut feed = ActivityFeed::default();
    let mut scheduler = FeedScheduler::new(noon(), RoundRobin(2), Duration::from_secs(30));
    scheduler.tick(&mut feed);

    let nodes = render_feed(&feed);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].title, "Team Movement");
    assert_eq!(nodes[0].meta, vec!["12:00".to_string()]);
    assert_eq!(nodes[0].badge.as_ref().unwrap().text, "Live");
}
