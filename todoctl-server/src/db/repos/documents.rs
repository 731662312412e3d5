//! Document repository
//!
//! Insert and find documents by collection. Ordering is always
//! insertion order (created_at, then id as a tiebreaker).

use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

use super::DbError;
use crate::models::{Collection, Document, Paginated, Pagination};

/// Document repository
pub struct DocumentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DocumentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one document into a collection.
    pub async fn insert_one(
        &self,
        collection: &Collection,
        body: JsonValue,
    ) -> Result<Document, DbError> {
        let doc: Document = sqlx::query_as(
            r#"
            INSERT INTO documents (collection, body)
            VALUES ($1, $2)
            RETURNING id, collection, body, created_at
            "#,
        )
        .bind(collection.as_str())
        .bind(&body)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(collection = %collection, id = %doc.id, "inserted document");
        Ok(doc)
    }

    /// Every document of a collection.
    pub async fn find(&self, collection: &Collection) -> Result<Vec<Document>, DbError> {
        let docs: Vec<Document> = sqlx::query_as(
            r#"
            SELECT id, collection, body, created_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(collection.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(docs)
    }

    /// One page of a collection, with the matching total count.
    ///
    /// With `string_field` set, only documents whose body holds a string
    /// under that key are paged and counted.
    pub async fn find_page(
        &self,
        collection: &Collection,
        string_field: Option<&str>,
        page: Pagination,
    ) -> Result<Paginated<Document>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                collection,
                body,
                created_at,
                COUNT(*) OVER() as total
            FROM documents
            WHERE collection = $1
              AND ($2::text IS NULL OR jsonb_typeof(body -> $2::text) = 'string')
            ORDER BY created_at ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(collection.as_str())
        .bind(string_field)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        // Past the last page there are no rows to carry the window count
        let total = match rows.first() {
            Some(r) => r.get::<i64, _>("total"),
            None => self.count(collection, string_field).await?,
        };

        let items = rows
            .into_iter()
            .map(|r| Document {
                id: r.get("id"),
                collection: r.get("collection"),
                body: r.get("body"),
                created_at: r.get("created_at"),
            })
            .collect();

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Number of documents in a collection, optionally only those holding
    /// a string under `string_field`.
    pub async fn count(
        &self,
        collection: &Collection,
        string_field: Option<&str>,
    ) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM documents
            WHERE collection = $1
              AND ($2::text IS NULL OR jsonb_typeof(body -> $2::text) = 'string')
            "#,
        )
        .bind(collection.as_str())
        .bind(string_field)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};
    use serde_json::json;

    // Run with: DATABASE_URL=... cargo test -p todoctl-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn scratch_collection() -> Collection {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Collection::new(&format!("test_{}", &suffix[..12])).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_find_in_order() {
        let pool = test_pool().await;
        let repo = DocumentRepo::new(&pool);
        let collection = scratch_collection();

        repo.insert_one(&collection, json!({"todo": "first"})).await.unwrap();
        repo.insert_one(&collection, json!({"todo": "second"})).await.unwrap();

        let docs = repo.find(&collection).await.unwrap();
        let texts: Vec<_> = docs.iter().filter_map(|d| d.str_field("todo")).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn collections_are_isolated() {
        let pool = test_pool().await;
        let repo = DocumentRepo::new(&pool);
        let a = scratch_collection();
        let b = scratch_collection();

        repo.insert_one(&a, json!({"name": "kuleep"})).await.unwrap();

        assert_eq!(repo.count(&a, None).await.unwrap(), 1);
        assert!(repo.find(&b).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn page_past_end_keeps_total() {
        let pool = test_pool().await;
        let repo = DocumentRepo::new(&pool);
        let collection = scratch_collection();

        for i in 0..3 {
            repo.insert_one(&collection, json!({"todo": i.to_string()})).await.unwrap();
        }

        let page = repo.find_page(&collection, None, Pagination::new(5, 2)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn string_field_filter_keeps_total_and_items_in_step() {
        let pool = test_pool().await;
        let repo = DocumentRepo::new(&pool);
        let collection = scratch_collection();

        repo.insert_one(&collection, json!({"todo": null})).await.unwrap();
        repo.insert_one(&collection, json!({"todo": "a"})).await.unwrap();
        repo.insert_one(&collection, json!({"todo": 7})).await.unwrap();
        repo.insert_one(&collection, json!({"todo": "b"})).await.unwrap();

        let page = repo
            .find_page(&collection, Some("todo"), Pagination::new(1, 2))
            .await
            .unwrap();
        let texts: Vec<_> = page.items.iter().filter_map(|d| d.str_field("todo")).collect();
        assert_eq!(texts, ["a", "b"]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages(), 1);

        assert_eq!(repo.count(&collection, Some("todo")).await.unwrap(), 2);
        assert_eq!(repo.count(&collection, None).await.unwrap(), 4);
    }
}
