//! Safety guideline reference data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineSet {
    /// Lowercase disaster key, e.g. "flood"
    pub disaster_type: String,
    pub do_list: Vec<String>,
    pub dont_list: Vec<String>,
}

impl GuidelineSet {
    pub fn new(disaster_type: &str, do_list: &[&str], dont_list: &[&str]) -> Self {
        Self {
            disaster_type: disaster_type.to_string(),
            do_list: do_list.iter().map(|s| s.to_string()).collect(),
            dont_list: dont_list.iter().map(|s| s.to_string()).collect(),
        }
    }
}
