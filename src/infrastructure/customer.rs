use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};

use crate::domain::customer::{Customer, CustomerId, CustomerRepository};
use crate::domain::DataAccessError;

#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// customersテーブルの行。text列はNULLを許すため空文字に寄せる
#[derive(FromRow)]
struct CustomerRow {
    id: i32,
    name: Option<String>,
    email: Option<String>,
    status: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer::new(
            row.id.into(),
            row.name.unwrap_or_default(),
            row.email.unwrap_or_default(),
            row.status.unwrap_or_default(),
        )
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<CustomerId, DataAccessError> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO customers (name, email, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(customer.name())
        .bind(customer.email())
        .bind(customer.status())
        .fetch_one(&self.pool)
        .await?;
        info!("顧客を登録しました id: {}", id);
        Ok(id.into())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email, status FROM customers WHERE id = $1",
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Customer::from))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DataAccessError> {
        let rows =
            sqlx::query_as::<_, CustomerRow>("SELECT id, name, email, status FROM customers")
                .fetch_all(&self.pool)
                .await?;
        debug!("顧客を全件取得しました count: {}", rows.len());
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn update(&self, customer: &Customer) -> Result<bool, DataAccessError> {
        let result =
            sqlx::query("UPDATE customers SET name = $2, email = $3, status = $4 WHERE id = $1")
                .bind(*customer.id())
                .bind(customer.name())
                .bind(customer.email())
                .bind(customer.status())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(*id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::customer::{Customer, CustomerId, CustomerRepository};
    use crate::infrastructure::connect;
    use crate::Database;

    use super::PostgresCustomerRepository;

    #[test]
    fn test_row_with_nulls() {
        let row = super::CustomerRow {
            id: 5,
            name: Some("Aiko".to_owned()),
            email: None,
            status: None,
        };
        assert_eq!(
            Customer::from(row),
            Customer::new(CustomerId::from(5), "Aiko".to_owned(), String::new(), String::new())
        );
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_repository() {
        // リポジトリ作成
        let url = std::env::var("DATABASE_URL").unwrap();
        let pool = connect(&Database { url }).await.unwrap();
        let repo = PostgresCustomerRepository::new(pool);

        // 顧客登録確認
        let customer = Customer::new(
            CustomerId::default(),
            "佐藤花子".to_owned(),
            "hanako@example.com".to_owned(),
            "active".to_owned(),
        );
        let id = repo.create(&customer).await.unwrap();
        assert!(*id > 0);
        let customer = customer.with_id(id);
        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(customer.clone()));
        assert!(repo.find_all().await.unwrap().contains(&customer));

        // 顧客更新確認
        let updated = Customer::new(
            id,
            "佐藤花子".to_owned(),
            "hanako@example.com".to_owned(),
            "inactive".to_owned(),
        );
        assert!(repo.update(&updated).await.unwrap());
        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(updated));

        // 顧客削除確認
        assert!(repo.delete(id).await.unwrap());
        assert_eq!(repo.find_by_id(id).await.unwrap(), None);
        assert!(!repo.delete(id).await.unwrap());
        assert!(!repo
            .update(&customer.with_id(CustomerId::from(-1)))
            .await
            .unwrap());
    }
}
