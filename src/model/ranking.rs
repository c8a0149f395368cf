use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::model::id::{EntityId, lenient, lenient_number, lenient_text};
use crate::model::master::lenient_list;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    /// Position in the rendered list. Whatever the server sent is overwritten
    /// by [`normalize_rankings`].
    pub rank: u32,
    pub score: Option<f64>,
    pub stroke_count: Option<f64>,
    pub nickname: Option<String>,
    pub wallet_address: Option<String>,
    pub caddie_id: Option<EntityId>,
    pub last_play_at: Option<String>,
    pub app_user_id: Option<EntityId>,
}

impl RankingEntry {
    #[must_use]
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

#[derive(Deserialize)]
struct RawRankingEntry {
    #[serde(default, deserialize_with = "lenient_number")]
    rank: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    app_user_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient")]
    basic_data: Option<RawBasicData>,
    #[serde(default, deserialize_with = "lenient")]
    data: Option<RawPlayData>,
}

#[derive(Deserialize, Default)]
struct RawBasicData {
    #[serde(default, deserialize_with = "lenient_text")]
    nick_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    wallet_address: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawPlayData {
    #[serde(default, deserialize_with = "lenient_number")]
    total_stroke_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    caddie_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient_text")]
    last_play_at: Option<String>,
}

impl From<RawRankingEntry> for RankingEntry {
    fn from(raw: RawRankingEntry) -> Self {
        let basic = raw.basic_data.unwrap_or_default();
        let play = raw.data.unwrap_or_default();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rank = raw.rank.filter(|r| *r >= 0.0).map_or(0, |r| r as u32);
        Self {
            rank,
            score: raw.score,
            stroke_count: play.total_stroke_count,
            nickname: basic.nick_name.filter(|s| !s.is_empty()),
            wallet_address: basic.wallet_address.filter(|s| !s.is_empty()),
            caddie_id: play.caddie_id,
            last_play_at: play.last_play_at,
            app_user_id: raw.app_user_id,
        }
    }
}

/// Pulls ranking entries out of the three envelopes the API has used:
/// a bare list, `{"rankings": [...]}` or `{"data": [...]}`. Anything else is empty.
#[must_use]
pub fn rankings_from_response(body: &Value) -> Vec<RankingEntry> {
    let list = match body {
        Value::Array(_) => Some(body),
        Value::Object(map) => ["rankings", "data"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|v| v.is_array()),
        _ => None,
    };
    lenient_list::<RawRankingEntry>(list, "rankings")
        .into_iter()
        .map(RankingEntry::from)
        .collect()
}

/// Sorts entries by ascending score (missing scores count as 0) and rewrites
/// `rank` as the 1-based position. Equal scores keep their input order.
#[must_use]
pub fn normalize_rankings(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    // -0.0 and 0.0 tie
    entries.sort_by(|a, b| {
        a.score_or_zero()
            .partial_cmp(&b.score_or_zero())
            .unwrap_or(Ordering::Equal)
    });
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = u32::try_from(idx + 1).unwrap_or(u32::MAX);
    }
    entries
}
