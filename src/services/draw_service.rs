use crate::entities::participant_entity as participants;
use crate::error::{AppError, AppResult};
use crate::models::DrawOutcome;
use crate::services::WinnerService;
use crate::utils::pick_index;
use rand::Rng;
use rand::rngs::OsRng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    // 同进程内的抽奖串行执行，clone 之间共享
    draw_lock: Arc<Mutex<()>>,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            pool,
            draw_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 抽奖 (Spin)，使用系统安全随机源
    pub async fn draw(&self) -> AppResult<DrawOutcome> {
        let mut rng = OsRng;
        self.draw_with_rng(&mut rng).await
    }

    /// 抽奖
    ///
    /// 逻辑 (单个事务内完成):
    /// 1. 先执行一条空写语句拿到 SQLite 写锁，再读取当前奖池，空池返回 `EmptyPool`
    /// 2. 均匀随机选出一人
    /// 3. 按 id 删除该参与者
    /// 4. 追加中奖记录，统计剩余人数后提交
    ///
    /// 写锁在读之前取得，其他连接的抽奖在 busy_timeout 内排队等待，
    /// 不会出现读锁升级写锁时的 SQLITE_BUSY。
    /// 任一步失败时事务随 `txn` drop 回滚，奖池与中奖记录都不变。
    pub async fn draw_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> AppResult<DrawOutcome> {
        let _guard = self.draw_lock.lock().await;
        let txn = self.pool.begin().await?;

        // 不修改任何行，只为占住写锁 (等价于 BEGIN IMMEDIATE)
        participants::Entity::update_many()
            .col_expr(
                participants::Column::Name,
                Expr::col(participants::Column::Name).into(),
            )
            .filter(Expr::val(1).eq(0))
            .exec(&txn)
            .await?;

        let pool = participants::Entity::find()
            .order_by_asc(participants::Column::Id)
            .all(&txn)
            .await?;

        let Some(index) = pick_index(pool.len(), rng) else {
            return Err(AppError::EmptyPool);
        };
        let chosen = &pool[index];

        let deleted = participants::Entity::delete_by_id(chosen.id)
            .exec(&txn)
            .await?;
        // 持有写锁时行不可能消失，出现即为数据库异常
        if deleted.rows_affected != 1 {
            return Err(DbErr::RecordNotFound(format!("participant id {}", chosen.id)).into());
        }

        WinnerService::record_winner_in(&txn, &chosen.name).await?;
        let remaining_count = participants::Entity::find().count(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Draw completed: winner={}, remaining={remaining_count}",
            chosen.name
        );
        Ok(DrawOutcome {
            winner: chosen.name.clone(),
            remaining_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{test_file_pool, test_pool};
    use crate::services::{ParticipantService, SettingsService};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    struct Fixture {
        participants: ParticipantService,
        winners: WinnerService,
        draws: DrawService,
    }

    async fn fixture(names: &[&str]) -> Fixture {
        let pool = test_pool().await;
        let participants = ParticipantService::new(pool.clone());
        for name in names {
            participants.add_participant(name).await.unwrap();
        }
        Fixture {
            participants,
            winners: WinnerService::new(pool.clone()),
            draws: DrawService::new(pool),
        }
    }

    #[tokio::test]
    async fn test_draw_moves_winner_to_log() {
        let f = fixture(&["Alice", "Bob", "Carol"]).await;

        let outcome = f.draws.draw().await.unwrap();
        assert_eq!(outcome.remaining_count, 2);

        let pool = f.participants.list_participants().await.unwrap();
        assert_eq!(pool.len(), 2);
        assert!(!pool.contains(&outcome.winner));

        let log = f.winners.list_winners().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].name, outcome.winner);
    }

    #[tokio::test]
    async fn test_draining_visits_everyone_once() {
        let names = ["A", "B", "C", "D", "E"];
        let f = fixture(&names).await;
        let mut rng = StdRng::seed_from_u64(42);

        let mut drawn = Vec::new();
        for expected_remaining in (0..names.len() as u64).rev() {
            let outcome = f.draws.draw_with_rng(&mut rng).await.unwrap();
            assert_eq!(outcome.remaining_count, expected_remaining);
            drawn.push(outcome.winner);
        }

        let unique: HashSet<_> = drawn.iter().cloned().collect();
        assert_eq!(unique.len(), names.len());
        assert!(names.iter().all(|n| unique.contains(*n)));

        let err = f.draws.draw_with_rng(&mut rng).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyPool));
        assert_eq!(f.winners.count_winners().await.unwrap(), names.len() as u64);
    }

    #[tokio::test]
    async fn test_single_participant() {
        let f = fixture(&["Solo"]).await;
        let outcome = f.draws.draw().await.unwrap();
        assert_eq!(outcome.winner, "Solo");
        assert_eq!(outcome.remaining_count, 0);
    }

    #[tokio::test]
    async fn test_empty_pool_changes_nothing() {
        let f = fixture(&[]).await;
        f.winners.record_winner("Earlier").await.unwrap();

        let err = f.draws.draw().await.unwrap_err();
        assert!(matches!(err, AppError::EmptyPool));
        assert_eq!(f.winners.count_winners().await.unwrap(), 1);
        assert_eq!(f.participants.count_participants().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seeded_draw_is_reproducible() {
        let names = ["A", "B", "C", "D"];
        let mut sequences = Vec::new();
        for _ in 0..2 {
            let f = fixture(&names).await;
            let mut rng = StdRng::seed_from_u64(7);
            let mut seq = Vec::new();
            for _ in 0..names.len() {
                seq.push(f.draws.draw_with_rng(&mut rng).await.unwrap().winner);
            }
            sequences.push(seq);
        }
        assert_eq!(sequences[0], sequences[1]);
    }

    #[tokio::test]
    async fn test_clears_leave_settings_untouched() {
        let pool = test_pool().await;
        let participants = ParticipantService::new(pool.clone());
        let winners = WinnerService::new(pool.clone());
        let settings = SettingsService::new(pool.clone());
        let draws = DrawService::new(pool);

        settings.set_title("Friday Raffle").await.unwrap();
        participants.add_participant("Alice").await.unwrap();
        participants.add_participant("Bob").await.unwrap();
        draws.draw().await.unwrap();

        participants.clear_participants().await.unwrap();
        winners.clear_winners().await.unwrap();

        assert_eq!(
            settings.get_title().await.unwrap(),
            ("Friday Raffle".to_string(), true)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_draws_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_file_pool(dir.path()).await;
        let participants = ParticipantService::new(pool.clone());
        let winners = WinnerService::new(pool.clone());
        let total = 20;
        for i in 0..total {
            participants.add_participant(&format!("P{i}")).await.unwrap();
        }

        // 两个独立实例不共享进程内锁，相当于两个进程抢同一个库文件
        let services = [DrawService::new(pool.clone()), DrawService::new(pool)];
        let handles: Vec<_> = (0..total)
            .map(|i| {
                let draws = services[i % services.len()].clone();
                tokio::spawn(async move { draws.draw().await })
            })
            .collect();

        let mut drawn = HashSet::new();
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            assert!(drawn.insert(outcome.winner));
        }

        assert_eq!(drawn.len(), total);
        assert_eq!(participants.count_participants().await.unwrap(), 0);
        assert_eq!(winners.count_winners().await.unwrap(), total as u64);
    }
}
