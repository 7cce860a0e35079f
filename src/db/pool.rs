use async_trait::async_trait;
use bytes::BytesMut;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;

use super::error::DbError;
use super::sink::RecordSink;
use super::types::{DbOperation, DbValue};
use crate::transformations::records::EventRecord;
use crate::types::config::PersistenceConfig;

pub struct DbPool {
    pool: Pool,
}

impl DbPool {
    pub async fn new(database_url: &str) -> Result<Self, DbError> {
        let config = database_url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| DbError::InvalidConnectionString(e.to_string()))?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(16)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(DbError::BuildError)?;

        let _conn = pool.get().await?;
        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Connect and, if configured, bring the schema up to date.
    pub async fn from_config(
        config: &PersistenceConfig,
        database_url: &str,
    ) -> Result<Self, DbError> {
        let pool = Self::new(database_url).await?;
        if config.run_migrations {
            pool.run_migrations().await?;
        }
        Ok(pool)
    }

    pub async fn execute_transaction(&self, operations: Vec<DbOperation>) -> Result<(), DbError> {
        if operations.is_empty() {
            return Ok(());
        }

        let mut client = self.pool.get().await?;
        let transaction = client.transaction().await?;

        for op in operations {
            let (sql, params) = match op {
                DbOperation::Upsert {
                    table,
                    columns,
                    values,
                    conflict_columns,
                    update_columns,
                } => build_upsert_sql(&table, &columns, &values, &conflict_columns, &update_columns),
            };

            let params_refs: Vec<&(dyn ToSql + Sync)> =
                params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

            if let Err(e) = transaction.execute(&sql, &params_refs[..]).await {
                let db_err: DbError = e.into();
                tracing::error!("SQL execution failed\n  SQL: {}\n  Error: {}", sql, db_err);
                return Err(db_err);
            }
        }

        transaction.commit().await?;
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), DbError> {
        super::migrations::run(&self.pool).await
    }
}

#[async_trait]
impl RecordSink for DbPool {
    async fn save(&self, record: &EventRecord) -> Result<(), DbError> {
        self.execute_transaction(vec![record.to_db_operation()]).await
    }

    /// All records of a receipt land in one transaction.
    async fn save_all(&self, records: &[EventRecord]) -> Result<(), DbError> {
        let operations = records.iter().map(EventRecord::to_db_operation).collect();
        self.execute_transaction(operations).await
    }
}

#[derive(Debug)]
enum SqlParam {
    Null,
    Bool(bool),
    Int64(i64),
    Text(String),
}

impl ToSql for SqlParam {
    fn to_sql(
        &self,
        ty: &tokio_postgres::types::Type,
        out: &mut BytesMut,
    ) -> Result<tokio_postgres::types::IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            SqlParam::Null => Ok(tokio_postgres::types::IsNull::Yes),
            SqlParam::Bool(v) => v.to_sql(ty, out),
            SqlParam::Int64(v) => v.to_sql(ty, out),
            SqlParam::Text(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(ty: &tokio_postgres::types::Type) -> bool {
        <bool as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

fn convert_db_value(value: &DbValue) -> SqlParam {
    match value {
        DbValue::Null => SqlParam::Null,
        DbValue::Bool(v) => SqlParam::Bool(*v),
        DbValue::Int64(v) => SqlParam::Int64(*v),
        DbValue::Text(v) => SqlParam::Text(v.clone()),
        DbValue::Numeric(Some(v)) => SqlParam::Text(v.clone()),
        DbValue::Numeric(None) => SqlParam::Null,
    }
}

fn convert_values_to_params(values: &[DbValue]) -> Vec<SqlParam> {
    values.iter().map(convert_db_value).collect()
}

/// Generate the SQL placeholder for a value at the given parameter index.
/// Numeric values, NULL included, are sent as text and cast by PostgreSQL,
/// so the parameter is always inferred as TEXT.
fn placeholder_for(value: &DbValue, param_idx: usize) -> String {
    match value {
        DbValue::Numeric(_) => format!("${}::text::numeric", param_idx),
        _ => format!("${}", param_idx),
    }
}

/// Wrap a column name in double quotes to handle reserved keywords.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

fn quote_cols(columns: &[String]) -> String {
    columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ")
}

fn build_upsert_sql(
    table: &str,
    columns: &[String],
    values: &[DbValue],
    conflict_columns: &[String],
    update_columns: &[String],
) -> (String, Vec<SqlParam>) {
    let cols = quote_cols(columns);
    let placeholders: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| placeholder_for(v, i + 1))
        .collect();
    let placeholders_str = placeholders.join(", ");

    let conflict_cols = quote_cols(conflict_columns);
    let updates: Vec<String> = update_columns
        .iter()
        .map(|c| format!("{} = EXCLUDED.{}", quote_ident(c), quote_ident(c)))
        .collect();
    let updates_str = updates.join(", ");

    let sql = if update_columns.is_empty() {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO NOTHING",
            table, cols, placeholders_str, conflict_cols
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
            table, cols, placeholders_str, conflict_cols, updates_str
        )
    };

    let params = convert_values_to_params(values);
    (sql, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::records::{NftCreateSeries, NftSetSeriesPrice};
    use tokio_postgres::types::{IsNull, Type};

    #[test]
    fn test_upsert_sql_updates_non_key_columns() {
        let (sql, params) = build_upsert_sql(
            "nft_buy",
            &["id".to_string(), "price".to_string(), "memo".to_string()],
            &[
                DbValue::Text("r1".to_string()),
                DbValue::Numeric(Some("1000".to_string())),
                DbValue::Null,
            ],
            &["id".to_string()],
            &["price".to_string(), "memo".to_string()],
        );

        assert_eq!(
            sql,
            "INSERT INTO nft_buy (\"id\", \"price\", \"memo\") VALUES ($1, $2::text::numeric, $3) \
             ON CONFLICT (\"id\") DO UPDATE SET \"price\" = EXCLUDED.\"price\", \"memo\" = EXCLUDED.\"memo\""
        );
        assert_eq!(params.len(), 3);
        assert!(matches!(params[2], SqlParam::Null));
    }

    #[test]
    fn test_unset_numeric_binds_as_text_null() {
        let record: EventRecord = NftSetSeriesPrice {
            id: "r1".to_string(),
            token_series_id: Some("12".to_string()),
            price: None,
            ..Default::default()
        }
        .into();
        let DbOperation::Upsert {
            table,
            columns,
            values,
            conflict_columns,
            update_columns,
        } = record.to_db_operation();

        let (sql, params) =
            build_upsert_sql(&table, &columns, &values, &conflict_columns, &update_columns);

        let price = columns.iter().position(|c| c == "price").unwrap();
        assert!(sql.contains(&format!("${}::text::numeric", price + 1)));
        assert!(matches!(params[price], SqlParam::Null));

        let mut out = BytesMut::new();
        let bound = params[price].to_sql_checked(&Type::TEXT, &mut out).unwrap();
        assert!(matches!(bound, IsNull::Yes));
    }

    #[test]
    fn test_every_null_placeholder_has_an_accepted_type() {
        let record: EventRecord = NftCreateSeries {
            id: "r1-0".to_string(),
            ..Default::default()
        }
        .into();
        let DbOperation::Upsert {
            table,
            columns,
            values,
            conflict_columns,
            update_columns,
        } = record.to_db_operation();
        let (sql, _) =
            build_upsert_sql(&table, &columns, &values, &conflict_columns, &update_columns);

        // Bare placeholders may only bind TEXT, BOOLEAN or BIGINT columns.
        for (i, value) in values.iter().enumerate() {
            if matches!(value, DbValue::Numeric(_)) {
                assert!(sql.contains(&format!("${}::text::numeric", i + 1)), "{}", columns[i]);
            }
        }
        assert!(!SqlParam::accepts(&Type::NUMERIC));
        assert!(SqlParam::accepts(&Type::TEXT));
    }

    #[test]
    fn test_upsert_sql_without_updates_does_nothing() {
        let (sql, _) = build_upsert_sql(
            "royalty",
            &["id".to_string()],
            &[DbValue::Text("r1".to_string())],
            &["id".to_string()],
            &[],
        );
        assert!(sql.ends_with("ON CONFLICT (\"id\") DO NOTHING"));
    }
}
