use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{CurrentPriceUpdate, InvestmentInput, InvestmentType};

/// Fully-coerced investment input. Callers never re-coerce: whatever the
/// validator accepted is what gets stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvestment {
    pub name: String,
    pub investment_type: InvestmentType,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: Option<f64>,
    pub buy_date: DateTime<Utc>,
}

/// Checks a create/update payload. First violated rule wins; the message is
/// surfaced verbatim in the 400 body.
pub fn validate_investment_input(input: &InvestmentInput) -> Result<ValidatedInvestment, String> {
    let name = input.name.as_deref().map(str::trim).unwrap_or("");
    let type_raw = input.investment_type.as_deref().unwrap_or("");
    let buy_date_raw = input.buy_date.as_deref().map(str::trim).unwrap_or("");

    // Presence is distinct from zero: buyPrice 0 must pass, a missing field
    // must not.
    if name.is_empty()
        || type_raw.is_empty()
        || input.quantity.is_none()
        || input.buy_price.is_none()
        || buy_date_raw.is_empty()
    {
        return Err("Name, type, quantity, buy price, and buy date are required".to_string());
    }

    let investment_type =
        InvestmentType::parse(type_raw).ok_or_else(|| "Invalid investment type".to_string())?;

    let quantity = match input.quantity.as_ref().and_then(coerce_number) {
        Some(quantity) if quantity > 0.0 => quantity,
        _ => return Err("Quantity must be a valid positive number".to_string()),
    };

    let buy_price = match input.buy_price.as_ref().and_then(coerce_number) {
        Some(price) if price >= 0.0 => price,
        _ => {
            return Err(
                "Buy price must be a valid number greater than or equal to 0".to_string(),
            )
        }
    };

    let current_price = match input.current_price.as_ref() {
        None => None,
        Some(raw) => match coerce_number(raw) {
            Some(price) if price >= 0.0 => Some(price),
            _ => {
                return Err(
                    "Current price must be a valid number greater than or equal to 0".to_string(),
                )
            }
        },
    };

    let buy_date =
        parse_buy_date(buy_date_raw).ok_or_else(|| "Buy date must be a valid date".to_string())?;

    Ok(ValidatedInvestment {
        name: name.to_string(),
        investment_type,
        quantity,
        buy_price,
        current_price,
        buy_date,
    })
}

/// Checks the narrow current-price patch, where the price is required rather
/// than optional.
pub fn validate_current_price(input: &CurrentPriceUpdate) -> Result<f64, String> {
    let raw = input
        .current_price
        .as_ref()
        .ok_or_else(|| "Current price is required".to_string())?;

    match coerce_number(raw) {
        Some(price) if price >= 0.0 => Ok(price),
        _ => Err("Current price must be a valid number greater than or equal to 0".to_string()),
    }
}

/// Rejects malformed ids before any query runs.
pub fn validate_investment_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|_| "Invalid investment ID".to_string())
}

// JSON numbers and numeric strings coerce; anything else does not. NaN and
// infinities never pass.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

// Accepts a plain date (midnight UTC) or a full RFC 3339 timestamp.
fn parse_buy_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> InvestmentInput {
        InvestmentInput {
            name: Some("Apple".to_string()),
            investment_type: Some("stock".to_string()),
            quantity: Some(json!(10)),
            buy_price: Some(json!(150.5)),
            current_price: None,
            buy_date: Some("2023-01-01".to_string()),
        }
    }

    #[test]
    fn accepts_valid_input_without_current_price() {
        let validated = validate_investment_input(&valid_input()).unwrap();
        assert_eq!(validated.name, "Apple");
        assert_eq!(validated.investment_type, InvestmentType::Stock);
        assert_eq!(validated.quantity, 10.0);
        assert_eq!(validated.buy_price, 150.5);
        assert_eq!(validated.current_price, None);
    }

    #[test]
    fn trims_name_and_parses_date_to_midnight_utc() {
        let mut input = valid_input();
        input.name = Some("  Apple  ".to_string());
        let validated = validate_investment_input(&input).unwrap();
        assert_eq!(validated.name, "Apple");
        assert_eq!(validated.buy_date.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn accepts_rfc3339_buy_date() {
        let mut input = valid_input();
        input.buy_date = Some("2023-01-01T12:30:00Z".to_string());
        let validated = validate_investment_input(&input).unwrap();
        assert_eq!(validated.buy_date.to_rfc3339(), "2023-01-01T12:30:00+00:00");
    }

    #[test]
    fn rejects_missing_name() {
        let mut input = valid_input();
        input.name = None;
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Name, type, quantity, buy price, and buy date are required"
        );
    }

    #[test]
    fn rejects_blank_name() {
        let mut input = valid_input();
        input.name = Some("   ".to_string());
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Name, type, quantity, buy price, and buy date are required"
        );
    }

    #[test]
    fn missing_quantity_is_not_the_same_as_zero() {
        let mut input = valid_input();
        input.quantity = None;
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Name, type, quantity, buy price, and buy date are required"
        );

        let mut input = valid_input();
        input.quantity = Some(json!(0));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Quantity must be a valid positive number"
        );
    }

    #[test]
    fn rejects_unknown_type() {
        let mut input = valid_input();
        input.investment_type = Some("bogus".to_string());
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Invalid investment type"
        );
    }

    #[test]
    fn rejects_negative_quantity() {
        let mut input = valid_input();
        input.quantity = Some(json!(-5));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Quantity must be a valid positive number"
        );
    }

    #[test]
    fn rejects_negative_buy_price_but_accepts_zero() {
        let mut input = valid_input();
        input.buy_price = Some(json!(-1));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Buy price must be a valid number greater than or equal to 0"
        );

        let mut input = valid_input();
        input.buy_price = Some(json!(0));
        let validated = validate_investment_input(&input).unwrap();
        assert_eq!(validated.buy_price, 0.0);
    }

    #[test]
    fn rejects_negative_current_price() {
        let mut input = valid_input();
        input.current_price = Some(json!(-0.01));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Current price must be a valid number greater than or equal to 0"
        );
    }

    #[test]
    fn zero_current_price_is_a_set_price() {
        let mut input = valid_input();
        input.current_price = Some(json!(0));
        let validated = validate_investment_input(&input).unwrap();
        assert_eq!(validated.current_price, Some(0.0));
    }

    #[test]
    fn coerces_numeric_strings() {
        let mut input = valid_input();
        input.quantity = Some(json!("10"));
        input.buy_price = Some(json!(" 150.5 "));
        let validated = validate_investment_input(&input).unwrap();
        assert_eq!(validated.quantity, 10.0);
        assert_eq!(validated.buy_price, 150.5);
    }

    #[test]
    fn non_numeric_values_do_not_coerce() {
        let mut input = valid_input();
        input.quantity = Some(json!("ten"));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Quantity must be a valid positive number"
        );

        let mut input = valid_input();
        input.quantity = Some(json!(true));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Quantity must be a valid positive number"
        );

        let mut input = valid_input();
        input.quantity = Some(json!(""));
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Quantity must be a valid positive number"
        );
    }

    #[test]
    fn rejects_unparseable_buy_date() {
        let mut input = valid_input();
        input.buy_date = Some("not-a-date".to_string());
        assert_eq!(
            validate_investment_input(&input).unwrap_err(),
            "Buy date must be a valid date"
        );
    }

    #[test]
    fn current_price_patch_requires_a_value() {
        let update = CurrentPriceUpdate { current_price: None };
        assert_eq!(
            validate_current_price(&update).unwrap_err(),
            "Current price is required"
        );
    }

    #[test]
    fn current_price_patch_accepts_zero_and_rejects_negative() {
        let update = CurrentPriceUpdate {
            current_price: Some(json!(0)),
        };
        assert_eq!(validate_current_price(&update).unwrap(), 0.0);

        let update = CurrentPriceUpdate {
            current_price: Some(json!(-0.01)),
        };
        assert_eq!(
            validate_current_price(&update).unwrap_err(),
            "Current price must be a valid number greater than or equal to 0"
        );
    }

    #[test]
    fn investment_id_must_be_a_uuid() {
        assert!(validate_investment_id("2f6ad5e8-5f0a-4f0b-8c8e-0a4a8d8f6b1c").is_ok());
        assert_eq!(
            validate_investment_id("not-an-id").unwrap_err(),
            "Invalid investment ID"
        );
    }
}
