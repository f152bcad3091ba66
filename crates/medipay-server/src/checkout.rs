//! Hosted-checkout session creation for a debt's recommended monthly
//! payment. The gateway speaks the Stripe Checkout wire shape: a
//! form-encoded POST returning `{id, url}`.

use medipay_model::DebtRecord;
use std::time::Duration;

pub const GATEWAY_MIN_AMOUNT_CENTS: i64 = 50;
pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.stripe.com";
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_SUCCESS_URL: &str = "http://localhost:8080/?payment=success";
const DEFAULT_CANCEL_URL: &str = "http://localhost:8080/?payment=cancelled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
}

pub struct CheckoutGateway {
    secret_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl CheckoutGateway {
    #[must_use]
    pub fn new(secret_key: Option<String>, base_url: String) -> Self {
        Self {
            secret_key: secret_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(None, DEFAULT_GATEWAY_BASE_URL.to_string())
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    pub async fn create_session(
        &self,
        record: &DebtRecord,
        amount_cents: i64,
        success_url: Option<&str>,
        cancel_url: Option<&str>,
    ) -> Result<CheckoutSession, String> {
        let Some(key) = self.secret_key.as_deref() else {
            return Err("gateway secret key is not configured".to_string());
        };
        let form = session_form(record, amount_cents, success_url, cancel_url);
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(key)
            .timeout(GATEWAY_TIMEOUT)
            .form(&form)
            .send()
            .await
            .map_err(|e| format!("gateway request failed: {e}"))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("gateway response was not JSON: {e}"))?;
        if !status.is_success() {
            let detail = body
                .pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown gateway error");
            return Err(format!("gateway returned {status}: {detail}"));
        }

        let session_id = body
            .get("id")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| "gateway response missing session id".to_string())?;
        let url = body
            .get("url")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| "gateway response missing session url".to_string())?;
        Ok(CheckoutSession {
            session_id: session_id.to_string(),
            url: url.to_string(),
        })
    }
}

/// Whole cents for the gateway; recommended payments are already rounded to
/// 2 decimal places.
#[must_use]
pub(crate) fn amount_cents(recommended_monthly_payment: f64) -> i64 {
    (recommended_monthly_payment * 100.0).round() as i64
}

fn session_form(
    record: &DebtRecord,
    amount_cents: i64,
    success_url: Option<&str>,
    cancel_url: Option<&str>,
) -> Vec<(&'static str, String)> {
    vec![
        ("mode", "payment".to_string()),
        (
            "success_url",
            success_url.unwrap_or(DEFAULT_SUCCESS_URL).to_string(),
        ),
        (
            "cancel_url",
            cancel_url.unwrap_or(DEFAULT_CANCEL_URL).to_string(),
        ),
        ("line_items[0][quantity]", "1".to_string()),
        (
            "line_items[0][price_data][currency]",
            "usd".to_string(),
        ),
        (
            "line_items[0][price_data][unit_amount]",
            amount_cents.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]",
            format!("Medical debt payment - {}", record.input.provider),
        ),
        (
            "line_items[0][price_data][product_data][description]",
            format!("Monthly payment for {}", record.input.patient_name),
        ),
        ("metadata[debt_id]", record.id.to_string()),
        (
            "metadata[patient_name]",
            record.input.patient_name.clone(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use medipay_model::{DebtInput, RiskLevel, RiskResult};

    fn record() -> DebtRecord {
        DebtRecord {
            id: 7,
            input: DebtInput {
                patient_name: "Jane Doe".to_string(),
                provider: "Carle Hospital".to_string(),
                debt_amount: 12_000.0,
                income: 55_000.0,
                credit_score: 640,
                repayment_months: 24,
                interest_rate: 0.0,
                down_payment: 0.0,
            },
            risk: RiskResult {
                risk_score: 0.0187,
                risk_level: RiskLevel::Low,
                recommended_monthly_payment: 500.0,
                total_interest: 0.0,
                amount_after_down_payment: 12_000.0,
                estimated_payoff_months: 24,
            },
            created_at: "2026-08-01T12:00:00Z".to_string(),
            updated_at: "2026-08-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn amount_cents_rounds_to_whole_cents() {
        assert_eq!(amount_cents(500.0), 50_000);
        assert_eq!(amount_cents(0.49), 49);
        assert_eq!(amount_cents(208.33), 20_833);
        assert_eq!(amount_cents(0.0), 0);
    }

    #[test]
    fn session_form_carries_debt_metadata_and_amount() {
        let form = session_form(&record(), 50_000, None, Some("https://example.test/back"));
        let get = |k: &str| {
            form.iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("50000"));
        assert_eq!(get("metadata[debt_id]"), Some("7"));
        assert_eq!(get("cancel_url"), Some("https://example.test/back"));
        assert_eq!(get("success_url"), Some(DEFAULT_SUCCESS_URL));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Medical debt payment - Carle Hospital")
        );
    }

    #[test]
    fn blank_secret_key_counts_as_unconfigured() {
        let gateway = CheckoutGateway::new(Some("  ".to_string()), "https://example.test".to_string());
        assert!(!gateway.is_configured());
        assert!(CheckoutGateway::unconfigured().secret_key.is_none());
        let gateway = CheckoutGateway::new(Some("sk_test_123".to_string()), "https://example.test/".to_string());
        assert!(gateway.is_configured());
        assert_eq!(gateway.base_url, "https://example.test");
    }
}
