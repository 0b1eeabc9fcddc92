use crate::services::config::StoreConfig;
use crate::services::logging::Logger;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use expense_domain::ExpenseStorage;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use shared::{Expense, NewExpense};

const COMPONENT: &str = "store";

/// Newest first, matching the order the list renders in
const ORDER_NEWEST_FIRST: &str = "expense_date.desc,created_at.desc";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Query parameters for listing the whole table
pub fn list_query() -> [(&'static str, &'static str); 2] {
    [("select", "*"), ("order", ORDER_NEWEST_FIRST)]
}

/// Row filter selecting one expense by id
pub fn id_filter(id: &str) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

/// Readable detail for a failed request, from its response body
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => match err.code {
            Some(code) => format!("{} ({})", err.message, code),
            None => err.message,
        },
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.to_string(),
    }
}

/// PATCH/DELETE with `return=representation` answer with the affected rows;
/// none means the id did not exist.
pub fn ensure_affected(rows: &[serde_json::Value], id: &str, action: &str) -> Result<()> {
    if rows.is_empty() {
        bail!("Failed to {}: expense {} not found", action, id);
    }
    Ok(())
}

/// Client for the hosted `expenses` table, spoken to over PostgREST
#[derive(Clone, Debug, PartialEq)]
pub struct SupabaseStore {
    config: StoreConfig,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", self.config.anon_key))
    }

    /// Turn a non-2xx response into an error carrying the store's message
    async fn check(response: Response, action: &str) -> Result<Response> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("Failed to {}: server error {}: {}", action, status, error_detail(&body))
    }

    async fn expect_affected(response: Response, id: &str, action: &str) -> Result<()> {
        let rows = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| anyhow!("Failed to parse {} response: {}", action, e))?;
        ensure_affected(&rows, id, action)
    }
}

#[async_trait(?Send)]
impl ExpenseStorage for SupabaseStore {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        Logger::debug_with_component(COMPONENT, "Fetching expenses");
        let response = self
            .authorized(Request::get(&self.config.table_url()))
            .query(list_query())
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;
        let response = Self::check(response, "fetch expenses").await?;
        response
            .json::<Vec<Expense>>()
            .await
            .map_err(|e| anyhow!("Failed to parse expenses: {}", e))
    }

    async fn insert_expense(&self, expense: &NewExpense) -> Result<()> {
        Logger::debug_with_component(COMPONENT, "Inserting expense");
        let response = self
            .authorized(Request::post(&self.config.table_url()))
            .header("Prefer", "return=minimal")
            .json(&[expense])
            .map_err(|e| anyhow!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;
        Self::check(response, "insert expense").await?;
        Ok(())
    }

    async fn update_expense(&self, id: &str, expense: &NewExpense) -> Result<()> {
        Logger::debug_with_component(COMPONENT, &format!("Updating expense {}", id));
        let response = self
            .authorized(Request::patch(&self.config.table_url()))
            .query(id_filter(id))
            .header("Prefer", "return=representation")
            .json(expense)
            .map_err(|e| anyhow!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;
        let response = Self::check(response, "update expense").await?;
        Self::expect_affected(response, id, "update expense").await
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        Logger::debug_with_component(COMPONENT, &format!("Deleting expense {}", id));
        let response = self
            .authorized(Request::delete(&self.config.table_url()))
            .query(id_filter(id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;
        let response = Self::check(response, "delete expense").await?;
        Self::expect_affected(response, id, "delete expense").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_orders_newest_first() {
        let query = list_query();
        assert_eq!(query[0], ("select", "*"));
        assert_eq!(query[1], ("order", "expense_date.desc,created_at.desc"));
    }

    #[test]
    fn test_id_filter_uses_equality_operator() {
        let [(column, value)] = id_filter("3f2a9c1e-0000-4000-8000-000000000001");
        assert_eq!(column, "id");
        assert_eq!(value, "eq.3f2a9c1e-0000-4000-8000-000000000001");
    }

    #[test]
    fn test_postgrest_error_body() {
        let err: PostgrestError =
            serde_json::from_str(r#"{"code":"23514","message":"new row violates check constraint","details":null,"hint":null}"#)
                .unwrap();
        assert_eq!(err.code.as_deref(), Some("23514"));
        assert_eq!(err.message, "new row violates check constraint");
    }

    #[test]
    fn test_error_detail_variants() {
        assert_eq!(
            error_detail(r#"{"code":"PGRST204","message":"Column 'amunt' not found"}"#),
            "Column 'amunt' not found (PGRST204)"
        );
        assert_eq!(error_detail(r#"{"message":"JWT expired"}"#), "JWT expired");
        assert_eq!(error_detail(""), "no response body");
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_empty_representation_means_not_found() {
        let err = ensure_affected(&[], "gone", "delete expense").unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete expense: expense gone not found");
    }

    #[test]
    fn test_affected_rows_mean_success() {
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(r#"[{"id":"a","paid_by":"Alice","amount":20}]"#).unwrap();
        assert!(ensure_affected(&rows, "a", "update expense").is_ok());
    }
}
