use async_trait::async_trait;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{DataAccessError, Id};

/// 顧客リポジトリ
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// 顧客を登録し、採番されたIDを返す
    async fn create(&self, customer: &Customer) -> Result<CustomerId, DataAccessError>;
    /// 顧客をIDで検索する
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError>;
    /// 全ての顧客を取得する
    async fn find_all(&self) -> Result<Vec<Customer>, DataAccessError>;
    /// 顧客を上書き更新する。該当行がなければ`false`
    async fn update(&self, customer: &Customer) -> Result<bool, DataAccessError>;
    /// 顧客を削除する。該当行がなければ`false`
    async fn delete(&self, id: CustomerId) -> Result<bool, DataAccessError>;
}

/// 顧客ID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct CustomerId(i32);

impl Id for CustomerId {
    type Inner = i32;
}

/// 顧客エンティティ
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    id: CustomerId,
    #[serde(deserialize_with = "null_as_empty")]
    name: String,
    #[serde(deserialize_with = "null_as_empty")]
    email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    status: String,
}

/// JSONの`null`は空文字として受け取る
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Customer {
    pub fn new(id: CustomerId, name: String, email: String, status: String) -> Self {
        Self {
            id,
            name,
            email,
            status,
        }
    }

    /// IDを差し替えた顧客を返す
    pub fn with_id(self, id: CustomerId) -> Self {
        Self { id, ..self }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn email(&self) -> &String {
        &self.email
    }

    pub fn status(&self) -> &String {
        &self.status
    }
}
