use crate::entities::winner_entity as winners;
use crate::error::AppResult;
use crate::models::WinnerEntry;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};

/// 中奖记录 (只追加，除整体清空外不修改)
#[derive(Clone)]
pub struct WinnerService {
    pool: DatabaseConnection,
}

impl WinnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 获取全部中奖记录（最近的在前）
    pub async fn list_winners(&self) -> AppResult<Vec<WinnerEntry>> {
        let list = winners::Entity::find()
            .order_by_desc(winners::Column::WonAt)
            .order_by_desc(winners::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 追加一条中奖记录，名字不要求唯一
    pub async fn record_winner(&self, name: &str) -> AppResult<WinnerEntry> {
        Ok(Self::record_winner_in(&self.pool, name).await?.into())
    }

    /// 在调用方提供的连接或事务中追加记录 (抽奖事务使用)
    pub async fn record_winner_in<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<winners::Model, DbErr> {
        winners::ActiveModel {
            name: Set(name.to_string()),
            won_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn count_winners(&self) -> AppResult<u64> {
        Ok(winners::Entity::find().count(&self.pool).await?)
    }

    /// 清空中奖记录，返回删除行数
    pub async fn clear_winners(&self) -> AppResult<u64> {
        let result = winners::Entity::delete_many().exec(&self.pool).await?;
        log::info!("Winner log cleared: {} records", result.rows_affected);
        Ok(result.rows_affected)
    }
}
