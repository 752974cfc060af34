use crate::entities::participant_entity as participants;
use crate::error::{AppError, AppResult};
use crate::models::BulkAddOutcome;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

/// 单条插入的结果
enum InsertOutcome {
    Inserted(String),
    Duplicate(String),
}

/// 奖池 (参与者) 管理
#[derive(Clone)]
pub struct ParticipantService {
    pool: DatabaseConnection,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 获取全部参与者名字（最近加入的在前）
    pub async fn list_participants(&self) -> AppResult<Vec<String>> {
        let names = participants::Entity::find()
            .select_only()
            .column(participants::Column::Name)
            .order_by_desc(participants::Column::CreatedAt)
            .order_by_desc(participants::Column::Id)
            .into_tuple::<String>()
            .all(&self.pool)
            .await?;
        Ok(names)
    }

    /// 添加单个参与者
    ///
    /// 名字先去除首尾空白；空名字拒绝，重复名字返回 `DuplicateName`。
    /// 重复检查依赖唯一索引，并发添加同名时只有一个能成功。
    pub async fn add_participant(&self, name: &str) -> AppResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError(
                "Participant name must not be empty".into(),
            ));
        }

        match self.insert_trimmed(trimmed).await? {
            InsertOutcome::Inserted(name) => {
                log::info!("Participant added: {name}");
                Ok(name)
            }
            InsertOutcome::Duplicate(name) => Err(AppError::DuplicateName(name)),
        }
    }

    /// 批量添加
    ///
    /// 每个名字独立插入并立即提交：空白条目直接丢弃，重复的计入 skipped，
    /// 单个失败不会中断整批 (整批不是原子操作)。
    pub async fn add_participants_bulk(&self, names: &[String]) -> AppResult<BulkAddOutcome> {
        let mut outcome = BulkAddOutcome::default();

        for raw in names {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            match self.insert_trimmed(trimmed).await? {
                InsertOutcome::Inserted(name) => outcome.added.push(name),
                InsertOutcome::Duplicate(name) => outcome.skipped.push(name),
            }
        }

        log::info!(
            "Bulk add finished: {} added, {} skipped",
            outcome.added.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// 删除参与者（精确匹配，不做任何规范化）
    pub async fn remove_participant(&self, name: &str) -> AppResult<()> {
        let result = participants::Entity::delete_many()
            .filter(participants::Column::Name.eq(name))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Participant '{name}' not found")));
        }
        log::info!("Participant removed: {name}");
        Ok(())
    }

    /// 清空奖池，返回删除行数
    pub async fn clear_participants(&self) -> AppResult<u64> {
        let result = participants::Entity::delete_many()
            .exec(&self.pool)
            .await?;
        log::info!("Participants cleared: {} removed", result.rows_affected);
        Ok(result.rows_affected)
    }

    pub async fn count_participants(&self) -> AppResult<u64> {
        Ok(participants::Entity::find().count(&self.pool).await?)
    }

    async fn insert_trimmed(&self, trimmed: &str) -> Result<InsertOutcome, DbErr> {
        let inserted = participants::ActiveModel {
            name: Set(trimmed.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        match inserted {
            Ok(model) => Ok(InsertOutcome::Inserted(model.name)),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Ok(InsertOutcome::Duplicate(trimmed.to_string()))
                }
                _ => Err(err),
            },
        }
    }
}
