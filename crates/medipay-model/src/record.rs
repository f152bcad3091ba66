// SPDX-License-Identifier: Apache-2.0

use crate::debt::DebtInput;
use crate::risk::RiskResult;
use serde::{Deserialize, Serialize};

/// Persisted debt record: the financial inputs, the derived risk fields that
/// were computed from them, and provenance.
///
/// Lifetime invariant: `risk` is always consistent with `input` — derived
/// fields are overwritten whenever a financial field changes, never patched
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub id: i64,
    pub input: DebtInput,
    pub risk: RiskResult,
    /// RFC 3339 UTC timestamps; `updated_at` is refreshed on every mutation.
    pub created_at: String,
    pub updated_at: String,
}
