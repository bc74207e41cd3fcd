//! Shared validation helpers applied at the request-model boundary.
//!
//! Request types call into these before any service work happens, so that
//! the basic business constraints (date ordering, known currency codes,
//! defined enum values) are rejected with the proper domain error code
//! instead of reaching a stored procedure.

use crate::errors::AppError;
use chrono::{DateTime, Utc};

/// ISO-4217 currency codes accepted on financial payloads. The list covers
/// the currencies the hotels operate in; anything else is rejected.
const CURRENCY_CODES: &[&str] = &[
    "AED", "AUD", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "IDR",
    "ILS", "INR", "JPY", "KES", "KRW", "MXN", "MYR", "NGN", "NOK", "NZD", "PHP", "PLN", "RON",
    "SAR", "SEK", "SGD", "THB", "TRY", "TZS", "UGX", "USD", "VND", "ZAR",
];

/// Checks a currency code against the ISO-4217 list.
pub fn validate_currency(code: &str) -> Result<(), AppError> {
    if CURRENCY_CODES.binary_search(&code).is_ok() {
        Ok(())
    } else {
        Err(AppError::InvalidCurrency {
            code: code.to_string(),
        })
    }
}

/// A range is valid only when it starts strictly before it ends.
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if start < end {
        Ok(())
    } else {
        Err(AppError::InvalidDateRange)
    }
}

/// Rejects empty or whitespace-only required fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn currency_list_is_sorted_for_binary_search() {
        let mut sorted = CURRENCY_CODES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, CURRENCY_CODES);
    }

    #[test]
    fn known_currency_passes() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("TZS").is_ok());
    }

    #[test]
    fn unknown_currency_is_rejected_with_transaction_code() {
        let err = validate_currency("BTC").unwrap_err();
        assert_eq!(err.code(), 4001);
    }

    #[test]
    fn date_range_must_be_strictly_increasing() {
        let now = Utc::now();
        assert!(validate_date_range(now, now + TimeDelta::days(1)).is_ok());
        assert!(validate_date_range(now, now).is_err());
        assert!(validate_date_range(now + TimeDelta::days(1), now).is_err());
    }

    #[test]
    fn required_field_rejects_blank_values() {
        assert!(validate_required("email", "guest@example.com").is_ok());
        let err = validate_required("email", "   ").unwrap_err();
        assert_eq!(err.code(), 3003);
    }
}
