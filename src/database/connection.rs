use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        // 内存库只在连接存活期间存在，保持至少一个连接
        .min_connections(1)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let pool = Database::connect(options).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}

/// 测试用: 单连接内存库，已完成迁移
#[cfg(test)]
pub async fn test_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("in-memory sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}

/// 测试用: 临时目录下的文件库，多连接，已完成迁移
#[cfg(test)]
pub async fn test_file_pool(dir: &std::path::Path) -> DbPool {
    let pool = create_pool(&DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("wheel.db").display()),
        max_connections: 5,
    })
    .await
    .expect("file sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}
