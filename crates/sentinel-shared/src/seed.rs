//! Built-in sample data set loaded at startup.

use crate::alert::{Alert, AlertStatus, Severity};
use crate::geo::{Coordinates, Location};
use crate::guideline::GuidelineSet;
use crate::report::{CitizenReport, Verification, ANONYMOUS};
use crate::store::SeedData;
use crate::team::{ResponseTeam, TeamStatus};
use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

/// All sample entries share one monitoring day
fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 8)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

fn place(name: &str, lat: f64, lon: f64) -> Location {
    Location::new(name, Coordinates::new_unchecked(lat, lon))
}

fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}

pub fn sample_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "ALT001".to_string(),
            kind: "Flood".to_string(),
            severity: Severity::Critical,
            location: place("Mumbai, Maharashtra", 19.0760, 72.8777),
            timestamp: at(14, 30),
            source: "IoT Sensors".to_string(),
            description: "Water level rising rapidly in Mithi River basin".to_string(),
            status: AlertStatus::Active,
            affected_population: 25_000,
        },
        Alert {
            id: "ALT002".to_string(),
            kind: "Earthquake".to_string(),
            severity: Severity::High,
            location: place("Delhi NCR", 28.6139, 77.2090),
            timestamp: at(13, 45),
            source: "AI Prediction Model".to_string(),
            description: "Seismic activity detected, magnitude 4.2 predicted".to_string(),
            status: AlertStatus::Monitoring,
            affected_population: 50_000,
        },
        Alert {
            id: "ALT003".to_string(),
            kind: "Cyclone".to_string(),
            severity: Severity::Medium,
            location: place("Visakhapatnam, Andhra Pradesh", 17.6868, 83.2185),
            timestamp: at(12, 15),
            source: "Weather Station".to_string(),
            description: "Cyclonic formation detected 200km offshore".to_string(),
            status: AlertStatus::Watch,
            affected_population: 15_000,
        },
    ]
}

pub fn sample_reports() -> Vec<CitizenReport> {
    vec![
        CitizenReport {
            id: "CR001".to_string(),
            kind: "Flood".to_string(),
            reporter: "Raj Singh".to_string(),
            location: place("Andheri, Mumbai", 19.1136, 72.8697),
            timestamp: at(14, 45),
            description: "Roads completely flooded, unable to move vehicles".to_string(),
            photos: vec![
                "flood_andheri_1.jpg".to_string(),
                "flood_andheri_2.jpg".to_string(),
            ],
            verification: Verification::verified("via Google Lens"),
            location_verified: true,
            priority: Severity::High,
        },
        CitizenReport {
            id: "CR002".to_string(),
            kind: "Fire".to_string(),
            reporter: "Priya Sharma".to_string(),
            location: place("Connaught Place, Delhi", 28.6304, 77.2177),
            timestamp: at(11, 30),
            description: "Smoke visible from building, fire department needed".to_string(),
            photos: vec!["fire_cp_1.jpg".to_string()],
            verification: Verification::pending(),
            location_verified: true,
            priority: Severity::Critical,
        },
        CitizenReport {
            id: "CR003".to_string(),
            kind: "Landslide".to_string(),
            reporter: ANONYMOUS.to_string(),
            location: place("Shimla, Himachal Pradesh", 31.1048, 77.1734),
            timestamp: at(9, 20),
            description: "Road blocked due to landslide after heavy rains".to_string(),
            photos: vec!["landslide_shimla_1.jpg".to_string()],
            verification: Verification::rejected("Location Mismatch"),
            location_verified: false,
            priority: Severity::Medium,
        },
    ]
}

pub fn sample_teams() -> Vec<ResponseTeam> {
    vec![
        ResponseTeam {
            id: "RT001".to_string(),
            kind: "Fire Brigade".to_string(),
            current_location: place("Bandra Fire Station", 19.0596, 72.8295),
            destination: "Andheri Flood Zone".to_string(),
            status: TeamStatus::Deployed,
            eta: minutes(15),
            personnel: 8,
        },
        ResponseTeam {
            id: "RT002".to_string(),
            kind: "NDRF Team".to_string(),
            current_location: place("Vasant Kunj", 28.5244, 77.1590),
            destination: "Delhi NCR".to_string(),
            status: TeamStatus::Standby,
            eta: minutes(30),
            personnel: 25,
        },
        ResponseTeam {
            id: "RT003".to_string(),
            kind: "Medical Team".to_string(),
            current_location: place("King George Hospital", 17.7231, 83.3106),
            destination: "Visakhapatnam".to_string(),
            status: TeamStatus::Ready,
            eta: minutes(10),
            personnel: 12,
        },
    ]
}

pub fn sample_guidelines() -> Vec<GuidelineSet> {
    vec![
        GuidelineSet::new(
            "flood",
            &[
                "Move to higher ground",
                "Turn off electricity",
                "Keep emergency kit ready",
                "Follow official evacuation routes",
            ],
            &[
                "Don't walk through flowing water",
                "Don't drive through flooded areas",
                "Don't touch electrical equipment",
                "Don't drink flood water",
            ],
        ),
        GuidelineSet::new(
            "earthquake",
            &[
                "Drop, Cover, Hold On",
                "Stay away from windows",
                "Exit building if safe",
                "Check for injuries",
            ],
            &[
                "Don't use elevators",
                "Don't stand in doorways",
                "Don't run during shaking",
                "Don't light matches",
            ],
        ),
        GuidelineSet::new(
            "fire",
            &[
                "Call fire department immediately",
                "Evacuate quickly",
                "Crawl under smoke",
                "Check doors for heat",
            ],
            &[
                "Don't use elevators",
                "Don't open hot doors",
                "Don't go back inside",
                "Don't break windows unnecessarily",
            ],
        ),
    ]
}

pub fn sample_data() -> SeedData {
    SeedData {
        alerts: sample_alerts(),
        reports: sample_reports(),
        teams: sample_teams(),
        guidelines: sample_guidelines(),
    }
}
