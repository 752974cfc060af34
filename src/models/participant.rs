use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    #[schema(example = "Alice")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkAddParticipantsRequest {
    #[schema(example = json!(["Alice", "Bob", "  Carol  "]))]
    pub names: Vec<String>,
}

/// 当前奖池 (按加入时间倒序)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantListResponse {
    pub participants: Vec<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddParticipantResponse {
    /// 实际存储的名字 (已去除首尾空白)
    pub name: String,
    pub message: String,
}

/// 批量添加结果
/// - 空白条目被静默丢弃，不计入 added / skipped
/// - 重复名字 (已存在或批内重复) 计入 skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BulkAddOutcome {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkAddParticipantsResponse {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub added_count: usize,
    pub skipped_count: usize,
    pub message: String,
}

impl From<BulkAddOutcome> for BulkAddParticipantsResponse {
    fn from(outcome: BulkAddOutcome) -> Self {
        let added_count = outcome.added.len();
        let skipped_count = outcome.skipped.len();
        Self {
            added: outcome.added,
            skipped: outcome.skipped,
            added_count,
            skipped_count,
            message: format!("Added {added_count} participants"),
        }
    }
}

/// 清空类操作的通用响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClearResponse {
    pub removed: u64,
    pub message: String,
}
