// 数据库模块
// 连接池创建与用户存储库

mod user;

pub use user::UserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

/// 建立数据库连接池，每个连接都会标记 application_name
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'user_service';")
                    .await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
}
