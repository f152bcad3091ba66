// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! SQLite persistence for debt records.
//!
//! The store owns the connection behind a mutex, so a record's
//! read-modify-write cycle ([`DebtStore::update_with`]) is serialized per
//! store handle — concurrent PATCHes cannot lose updates.

mod filter;

pub use filter::{build_where, escape_like_fragment, DebtFilter};

use chrono::{SecondsFormat, Utc};
use medipay_model::{DebtInput, DebtRecord, RiskLevel, RiskResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Mutex;

pub const SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Io,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Io => "io_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn internal(e: rusqlite::Error) -> Self {
        Self::new(StoreErrorCode::Internal, e.to_string())
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// One page of list results plus the unpaged total.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtPage {
    pub items: Vec<DebtRecord>,
    pub total: u64,
}

pub struct DebtStore {
    conn: Mutex<Connection>,
}

impl DebtStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        Self::bootstrap(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;
            CREATE TABLE IF NOT EXISTS medical_debts (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              patient_name TEXT NOT NULL,
              provider TEXT NOT NULL,
              income REAL NOT NULL,
              debt_amount REAL NOT NULL,
              credit_score INTEGER NOT NULL,
              repayment_months INTEGER NOT NULL,
              interest_rate REAL NOT NULL,
              down_payment REAL NOT NULL,
              risk_score REAL NOT NULL,
              risk_level TEXT NOT NULL,
              recommended_monthly_payment REAL NOT NULL,
              total_interest REAL NOT NULL,
              amount_after_down_payment REAL NOT NULL,
              estimated_payoff_months INTEGER NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_medical_debts_risk_level ON medical_debts(risk_level);
            CREATE INDEX IF NOT EXISTS idx_medical_debts_provider ON medical_debts(provider);
            CREATE INDEX IF NOT EXISTS idx_medical_debts_patient_name ON medical_debts(patient_name);
            CREATE INDEX IF NOT EXISTS idx_medical_debts_risk_provider ON medical_debts(risk_level, provider);
            ",
        )
        .map_err(StoreError::internal)?;
        conn.execute_batch(&format!("PRAGMA user_version={SCHEMA_VERSION};"))
            .map_err(StoreError::internal)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a validated input with its computed risk fields; both
    /// timestamps are set to now.
    pub fn insert(&self, input: &DebtInput, risk: &RiskResult) -> Result<DebtRecord, StoreError> {
        let conn = self.lock()?;
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO medical_debts (
               patient_name, provider, income, debt_amount, credit_score,
               repayment_months, interest_rate, down_payment,
               risk_score, risk_level, recommended_monthly_payment,
               total_interest, amount_after_down_payment, estimated_payoff_months,
               created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                input.patient_name,
                input.provider,
                input.income,
                input.debt_amount,
                input.credit_score,
                input.repayment_months,
                input.interest_rate,
                input.down_payment,
                risk.risk_score,
                risk.risk_level.as_str(),
                risk.recommended_monthly_payment,
                risk.total_interest,
                risk.amount_after_down_payment,
                risk.estimated_payoff_months,
                now,
                now,
            ],
        )
        .map_err(StoreError::internal)?;
        let id = conn.last_insert_rowid();
        Ok(DebtRecord {
            id,
            input: input.clone(),
            risk: risk.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get(&self, id: i64) -> Result<Option<DebtRecord>, StoreError> {
        let conn = self.lock()?;
        Self::get_with_conn(&conn, id)
    }

    /// Filtered, paginated listing plus the total count across all pages,
    /// newest first.
    pub fn list(
        &self,
        filter: &DebtFilter,
        limit: usize,
        offset: usize,
    ) -> Result<DebtPage, StoreError> {
        let conn = self.lock()?;
        let (clause, params) = build_where(filter);

        let total: u64 = conn
            .prepare_cached(&format!(
                "SELECT COUNT(*) FROM medical_debts{clause}"
            ))
            .map_err(StoreError::internal)?
            .query_row(params_from_iter(params.iter()), |row| row.get(0))
            .map_err(StoreError::internal)?;

        let mut page_params = params;
        page_params.push(Value::Integer(limit as i64));
        page_params.push(Value::Integer(offset as i64));
        let mut stmt = conn
            .prepare_cached(&format!(
                "SELECT {COLUMNS} FROM medical_debts{clause} \
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
            ))
            .map_err(StoreError::internal)?;
        let items = stmt
            .query_map(params_from_iter(page_params.iter()), row_to_record)
            .map_err(StoreError::internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::internal)?;

        Ok(DebtPage { items, total })
    }

    /// Serialized read-modify-write: fetch the record, run `apply` on it,
    /// and persist the result with a refreshed `updated_at` — all under one
    /// lock acquisition. A failed `apply` leaves the row untouched.
    pub fn update_with<F, E>(&self, id: i64, apply: F) -> Result<DebtRecord, StoreError>
    where
        F: FnOnce(&DebtRecord) -> Result<DebtRecord, E>,
        E: Display,
    {
        let conn = self.lock()?;
        let existing = Self::get_with_conn(&conn, id)?
            .ok_or_else(|| StoreError::new(StoreErrorCode::NotFound, format!("debt {id} not found")))?;
        let mut updated = apply(&existing)
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        updated.updated_at = now_rfc3339();
        conn.execute(
            "UPDATE medical_debts SET
               patient_name = ?1, provider = ?2, income = ?3, debt_amount = ?4,
               credit_score = ?5, repayment_months = ?6, interest_rate = ?7,
               down_payment = ?8, risk_score = ?9, risk_level = ?10,
               recommended_monthly_payment = ?11, total_interest = ?12,
               amount_after_down_payment = ?13, estimated_payoff_months = ?14,
               updated_at = ?15
             WHERE id = ?16",
            params![
                updated.input.patient_name,
                updated.input.provider,
                updated.input.income,
                updated.input.debt_amount,
                updated.input.credit_score,
                updated.input.repayment_months,
                updated.input.interest_rate,
                updated.input.down_payment,
                updated.risk.risk_score,
                updated.risk.risk_level.as_str(),
                updated.risk.recommended_monthly_payment,
                updated.risk.total_interest,
                updated.risk.amount_after_down_payment,
                updated.risk.estimated_payoff_months,
                updated.updated_at,
                id,
            ],
        )
        .map_err(StoreError::internal)?;
        Ok(updated)
    }

    /// Idempotent delete: absent ids are a successful no-op. Returns whether
    /// a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let removed = conn
            .execute("DELETE FROM medical_debts WHERE id = ?1", params![id])
            .map_err(StoreError::internal)?;
        Ok(removed > 0)
    }

    fn get_with_conn(conn: &Connection, id: i64) -> Result<Option<DebtRecord>, StoreError> {
        conn.prepare_cached(&format!(
            "SELECT {COLUMNS} FROM medical_debts WHERE id = ?1"
        ))
        .map_err(StoreError::internal)?
        .query_row(params![id], row_to_record)
        .optional()
        .map_err(StoreError::internal)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store lock poisoned"))
    }
}

const COLUMNS: &str = "id, patient_name, provider, income, debt_amount, credit_score, \
                       repayment_months, interest_rate, down_payment, risk_score, risk_level, \
                       recommended_monthly_payment, total_interest, amount_after_down_payment, \
                       estimated_payoff_months, created_at, updated_at";

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DebtRecord> {
    let level_raw: String = row.get(10)?;
    let risk_level = RiskLevel::parse(&level_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            10,
            rusqlite::types::Type::Text,
            format!("unknown risk level: {level_raw}").into(),
        )
    })?;
    Ok(DebtRecord {
        id: row.get(0)?,
        input: DebtInput {
            patient_name: row.get(1)?,
            provider: row.get(2)?,
            income: row.get(3)?,
            debt_amount: row.get(4)?,
            credit_score: row.get(5)?,
            repayment_months: row.get(6)?,
            interest_rate: row.get(7)?,
            down_payment: row.get(8)?,
        },
        risk: RiskResult {
            risk_score: row.get(9)?,
            risk_level,
            recommended_monthly_payment: row.get(11)?,
            total_interest: row.get(12)?,
            amount_after_down_payment: row.get(13)?,
            estimated_payoff_months: row.get(14)?,
        },
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
