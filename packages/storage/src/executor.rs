// ABOUTME: Executes parameterized statements over a single SQLite connection
// ABOUTME: Classifies store failures and keeps the last error for message lookup

use std::str::FromStr;

use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteQueryResult, SqliteRow,
};
use sqlx::{Connection, Row};
use tracing::{debug, info, warn};

use todos_core::messages::{ErrorKey, MessageId};

use crate::commands::Command;
use crate::error::{ErrorSlot, StorageError, StorageResult};
use crate::StorageConfig;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// A positional statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
    Boolean(bool),
    Null,
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Boolean(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlParam::Null)
    }
}

/// Result of an INSERT, UPDATE or DELETE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: i64,
}

impl From<SqliteQueryResult> for ExecOutcome {
    fn from(result: SqliteQueryResult) -> Self {
        Self {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        }
    }
}

/// Runs commands against one connection for the length of a request
pub struct SqlExecutor {
    conn: SqliteConnection,
    error: ErrorSlot,
}

impl SqlExecutor {
    /// Open a connection and bring the schema up to date when configured to
    pub async fn connect(config: &StorageConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Ensure parent directory exists
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Connecting to database: {}", config.database_url);

        let mut conn = SqliteConnection::connect_with(&options).await?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut conn)
            .await?;

        info!("Database connection established");

        let mut executor = Self::from_connection(conn);
        if config.run_migrations {
            executor.run_migrations().await?;
        }
        Ok(executor)
    }

    pub fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            conn,
            error: ErrorSlot::new(),
        }
    }

    pub async fn run_migrations(&mut self) -> StorageResult<()> {
        MIGRATOR.run(&mut self.conn).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Run a SELECT and return its rows
    pub async fn fetch(
        &mut self,
        command: Command,
        params: &[SqlParam],
    ) -> StorageResult<Vec<SqliteRow>> {
        self.error.clear();
        debug!("{:?}: {} {:?}", command, command.sql().trim(), params);

        let result = bind_params(sqlx::query(command.sql()), params)
            .fetch_all(&mut self.conn)
            .await;

        result.map_err(|err| self.classify(err))
    }

    /// Run a SELECT that yields a single integer in its first column
    pub async fn fetch_scalar(
        &mut self,
        command: Command,
        params: &[SqlParam],
    ) -> StorageResult<i64> {
        let rows = self.fetch(command, params).await?;
        self.decode_scalar(command, &rows)
    }

    fn decode_scalar(&mut self, command: Command, rows: &[SqliteRow]) -> StorageResult<i64> {
        match rows.first() {
            Some(row) => row.try_get::<i64, _>(0).map_err(|err| self.classify(err)),
            None => self.error.reject(StorageError::Database(format!(
                "{:?} returned no rows",
                command
            ))),
        }
    }

    /// Run an INSERT, UPDATE or DELETE
    pub async fn execute(
        &mut self,
        command: Command,
        params: &[SqlParam],
    ) -> StorageResult<ExecOutcome> {
        self.error.clear();
        debug!("{:?}: {} {:?}", command, command.sql().trim(), params);

        let result = bind_params(sqlx::query(command.sql()), params)
            .execute(&mut self.conn)
            .await;

        result
            .map(ExecOutcome::from)
            .map_err(|err| self.classify(err))
    }

    /// Run several statements in one transaction; nothing is kept if any of them fails
    pub async fn execute_in_transaction(
        &mut self,
        steps: &[(Command, Vec<SqlParam>)],
    ) -> StorageResult<Vec<ExecOutcome>> {
        self.error.clear();

        let result = Self::run_steps(&mut self.conn, steps).await;
        result.map_err(|err| self.classify(err))
    }

    async fn run_steps(
        conn: &mut SqliteConnection,
        steps: &[(Command, Vec<SqlParam>)],
    ) -> Result<Vec<ExecOutcome>, sqlx::Error> {
        let mut tx = conn.begin().await?;
        let mut outcomes = Vec::with_capacity(steps.len());

        for (command, params) in steps {
            debug!("{:?}: {} {:?}", command, command.sql().trim(), params);
            let result = bind_params(sqlx::query(command.sql()), params)
                .execute(&mut *tx)
                .await?;
            outcomes.push(ExecOutcome::from(result));
        }

        tx.commit().await?;
        Ok(outcomes)
    }

    /// Overwrite the stored error
    pub fn save_error(&mut self, message: impl Into<MessageId<ErrorKey>>) {
        self.error.save(message);
    }

    /// Store an error unless one is already stored
    pub fn update_error(&mut self, message: impl Into<MessageId<ErrorKey>>) {
        self.error.update(message);
    }

    /// Record `error` and return it
    pub fn reject<T>(&mut self, error: StorageError) -> StorageResult<T> {
        self.error.reject(error)
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.message()
    }

    /// Close the connection
    pub async fn finish(self) -> StorageResult<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn classify(&mut self, err: sqlx::Error) -> StorageError {
        let error = match err {
            sqlx::Error::Database(db_err) => {
                let diagnostic = format!("{:?}: {}", db_err.kind(), db_err.message());
                if db_err.is_unique_violation() {
                    StorageError::UniqueViolation(diagnostic)
                } else {
                    StorageError::Database(diagnostic)
                }
            }
            other => StorageError::Sqlx(other),
        };

        warn!("Statement failed: {}", error);
        self.error.save(error.message_id());
        error
    }
}

fn bind_params<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlParam],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params.iter().fold(query, |query, param| match param {
        SqlParam::Integer(value) => query.bind(*value),
        SqlParam::Text(value) => query.bind(value.as_str()),
        SqlParam::Boolean(value) => query.bind(*value),
        SqlParam::Null => query.bind(None::<String>),
    })
}
