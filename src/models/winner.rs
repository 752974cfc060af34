use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::winner_entity;

/// 中奖记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WinnerEntry {
    pub name: String,
    pub won_at: DateTime<Utc>,
}

impl From<winner_entity::Model> for WinnerEntry {
    fn from(m: winner_entity::Model) -> Self {
        WinnerEntry {
            name: m.name,
            won_at: m.won_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerListResponse {
    pub winners: Vec<WinnerEntry>,
    pub count: usize,
}

/// 一次抽奖的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub winner: String,
    pub remaining_count: u64,
}

/// 抽奖 (Spin) 响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinResponse {
    pub winner: String,
    pub remaining_count: u64,
    pub message: String,
}

impl From<DrawOutcome> for SpinResponse {
    fn from(outcome: DrawOutcome) -> Self {
        let message = format!("Congratulations! The winner is: {}", outcome.winner);
        SpinResponse {
            winner: outcome.winner,
            remaining_count: outcome.remaining_count,
            message,
        }
    }
}
