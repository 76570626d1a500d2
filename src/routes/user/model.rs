use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// 创建用户请求，忽略 id 等多余字段；缺省或 null 的字段按空字符串处理
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateUserRequest {
    /// 直接从请求体解析，不检查 Content-Type
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
    }

    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
