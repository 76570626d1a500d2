use sqlx::PgPool;

use crate::routes::user::User;

const CREATE_USERS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS users (id SERIAL PRIMARY KEY, name TEXT, email TEXT)";

/// 用户存储库，持有共享连接池
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 建表（已存在则跳过）
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// 查询全部用户，按 id 升序；库中的 NULL 读作空字符串
    pub async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, COALESCE(name, '') AS name, COALESCE(email, '') AS email \
             FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(users) => {
                tracing::debug!("Listed {} users", users.len());
                Ok(users)
            }
            Err(e) => {
                tracing::error!("Failed to list users: {:?}", e);
                Err(e)
            }
        }
    }

    /// 插入一条用户记录，返回数据库分配的 id
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
    ) -> Result<i32, sqlx::Error> {
        let result = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => {
                tracing::info!("Created user: {}", id);
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to create user: {:?}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::{isolated_pool, unreachable_pool};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let repo = UserRepository::new(isolated_pool().await);
        repo.ensure_schema().await.expect("first ensure failed");
        repo.ensure_schema().await.expect("second ensure failed");

        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = 'users'",
        )
        .fetch_one(repo.pool())
        .await
        .expect("count failed");
        assert_eq!(tables, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn empty_table_lists_nothing() {
        let repo = UserRepository::new(isolated_pool().await);
        repo.ensure_schema().await.unwrap();

        let users = repo.list_users().await.unwrap();
        assert!(users.is_empty());
        assert_eq!(serde_json::to_string(&users).unwrap(), "[]");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn created_user_is_listed() {
        let repo = UserRepository::new(isolated_pool().await);
        repo.ensure_schema().await.unwrap();

        let id = repo
            .create_user("Ann", "ann@x.com")
            .await
            .unwrap();
        assert!(id > 0);

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, id);
        assert_eq!(users[0].name, "Ann");
        assert_eq!(users[0].email, "ann@x.com");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ids_increase_and_list_follows_them() {
        let repo = UserRepository::new(isolated_pool().await);
        repo.ensure_schema().await.unwrap();

        let mut ids = Vec::new();
        for i in 0..5 {
            let name = format!("user{i}");
            ids.push(repo.create_user(&name, "").await.unwrap());
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let listed: Vec<i32> = repo.list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn empty_fields_are_stored_as_empty_strings() {
        let repo = UserRepository::new(isolated_pool().await);
        repo.ensure_schema().await.unwrap();

        let id = repo.create_user("", "").await.unwrap();

        let (name, email): (Option<String>, Option<String>) =
            sqlx::query_as("SELECT name, email FROM users WHERE id = $1")
                .bind(id)
                .fetch_one(repo.pool())
                .await
                .unwrap();
        assert_eq!(name.as_deref(), Some(""));
        assert_eq!(email.as_deref(), Some(""));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn null_rows_from_other_writers_list_as_empty_strings() {
        let repo = UserRepository::new(isolated_pool().await);
        repo.ensure_schema().await.unwrap();

        sqlx::query("INSERT INTO users (name, email) VALUES (NULL, NULL)")
            .execute(repo.pool())
            .await
            .unwrap();

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "");
        assert_eq!(users[0].email, "");
    }

    #[tokio::test]
    async fn storage_failure_is_returned_not_fatal() {
        let repo = UserRepository::new(unreachable_pool());

        assert!(repo.list_users().await.is_err());
        assert!(repo.create_user("Ann", "").await.is_err());
    }
}
