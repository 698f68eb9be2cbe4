//! Render counters and JSONL export for performance logs.

use serde::Serialize;

const STATS_JSONL_SCHEMA_VERSION: &str = "querypad-view-stats-v1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Blocks pushed to the surface.
    pub renders: u64,
    /// Window recomputes that landed on the stored range and did nothing.
    pub skipped_recomputes: u64,
    /// Lines in the most recent block.
    pub lines_materialized: usize,
    /// Frames requested from the surface.
    pub frames_requested: u64,
    /// Scroll/resize notifications folded into requested frames.
    pub coalesced_notifications: u64,
    /// Completed search scans.
    pub searches: u64,
}

#[derive(Serialize)]
struct StatsLine<'a> {
    schema_version: &'static str,
    event: &'a str,
    #[serde(flatten)]
    stats: &'a RenderStats,
}

impl RenderStats {
    /// One JSON object (no trailing newline) tagged with `event`.
    #[must_use]
    pub fn to_jsonl(&self, event: &str) -> String {
        let line = StatsLine {
            schema_version: STATS_JSONL_SCHEMA_VERSION,
            event,
            stats: self,
        };
        serde_json::to_string(&line).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsonl_is_flat_and_tagged() {
        let stats = RenderStats {
            renders: 3,
            skipped_recomputes: 1,
            lines_materialized: 90,
            ..RenderStats::default()
        };
        let line = stats.to_jsonl("scroll");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["schema_version"], STATS_JSONL_SCHEMA_VERSION);
        assert_eq!(value["event"], "scroll");
        assert_eq!(value["renders"], 3);
        assert_eq!(value["lines_materialized"], 90);
        assert!(!line.contains('\n'));
    }
}
