//! Per-record parsing of raw option-chain records.
//!
//! Chain endpoints are treated as untrusted: every record is validated on
//! its own and a bad record rejects only itself. Nothing is coerced — a
//! missing field, a string where a number belongs, a negative premium or an
//! unknown option tag all produce [`SignalError::MalformedQuote`] for that
//! record, and the rest of the batch parses normally.

use serde_json::Value;

use chain::errors::SignalError;
use chain::types::{OptionType, Quote};

/// Parse one raw chain record into a [`Quote`].
///
/// Expected shape:
/// ```json
/// { "symbol": "NIFTY", "optionType": "CE", "strikePrice": 23500, "price": 98.35 }
/// ```
/// `optionType` accepts `CE`/`CALL` and `PE`/`PUT`.
pub fn parse_quote_record(raw: &Value) -> Result<Quote, SignalError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| SignalError::MalformedQuote(format!("not an object: {raw}")))?;

    let symbol = obj
        .get("symbol")
        .and_then(Value::as_str)
        .ok_or_else(|| SignalError::MalformedQuote("missing or non-string symbol".into()))?;

    if symbol.is_empty() {
        return Err(SignalError::MalformedQuote("empty symbol".into()));
    }

    let option_type: OptionType = obj
        .get("optionType")
        .and_then(Value::as_str)
        .ok_or_else(|| SignalError::MalformedQuote("missing or non-string optionType".into()))?
        .parse()?;

    let strike_price = obj
        .get("strikePrice")
        .and_then(Value::as_i64)
        .ok_or_else(|| SignalError::MalformedQuote("missing or non-integer strikePrice".into()))?;

    let price = obj
        .get("price")
        .and_then(Value::as_f64)
        .ok_or_else(|| SignalError::MalformedQuote("missing or non-numeric price".into()))?;

    if !price.is_finite() || price < 0.0 {
        return Err(SignalError::MalformedQuote(format!(
            "price must be a non-negative number, got {price}"
        )));
    }

    Ok(Quote {
        symbol: symbol.to_string(),
        option_type,
        strike_price,
        price,
    })
}

/// Parse a whole chain snapshot with per-record partial success.
///
/// Returns the quotes that parsed plus the typed rejection for each record
/// that did not, in input order on both sides.
pub fn parse_chain(raw: &[Value]) -> (Vec<Quote>, Vec<SignalError>) {
    let mut quotes = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for record in raw {
        match parse_quote_record(record) {
            Ok(q) => quotes.push(q),
            Err(e) => rejected.push(e),
        }
    }

    (quotes, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_record() {
        let raw = json!({
            "symbol": "NIFTY",
            "optionType": "CE",
            "strikePrice": 23500,
            "price": 98.35
        });

        let q = parse_quote_record(&raw).unwrap();
        assert_eq!(q.symbol, "NIFTY");
        assert_eq!(q.option_type, OptionType::Call);
        assert_eq!(q.strike_price, 23500);
        assert_eq!(q.price, 98.35);
    }

    #[test]
    fn accepts_long_option_tags() {
        let raw = json!({
            "symbol": "RELIANCE",
            "optionType": "PUT",
            "strikePrice": 2900,
            "price": 104.0
        });

        assert_eq!(
            parse_quote_record(&raw).unwrap().option_type,
            OptionType::Put
        );
    }

    #[test]
    fn rejects_missing_field() {
        let raw = json!({ "symbol": "NIFTY", "optionType": "CE", "price": 98.0 });

        let err = parse_quote_record(&raw).unwrap_err();
        assert!(matches!(err, SignalError::MalformedQuote(_)));
    }

    #[test]
    fn rejects_non_numeric_price() {
        let raw = json!({
            "symbol": "NIFTY",
            "optionType": "CE",
            "strikePrice": 23500,
            "price": "98.35"
        });

        assert!(parse_quote_record(&raw).is_err());
    }

    #[test]
    fn rejects_negative_price() {
        let raw = json!({
            "symbol": "NIFTY",
            "optionType": "CE",
            "strikePrice": 23500,
            "price": -1.0
        });

        assert!(parse_quote_record(&raw).is_err());
    }

    #[test]
    fn rejects_unknown_option_tag() {
        let raw = json!({
            "symbol": "NIFTY",
            "optionType": "STRADDLE",
            "strikePrice": 23500,
            "price": 98.0
        });

        assert!(parse_quote_record(&raw).is_err());
    }

    #[test]
    fn rejects_empty_symbol() {
        let raw = json!({
            "symbol": "",
            "optionType": "PE",
            "strikePrice": 23500,
            "price": 98.0
        });

        assert!(parse_quote_record(&raw).is_err());
    }

    #[test]
    fn bad_record_rejects_itself_only() {
        let raw = vec![
            json!({ "symbol": "NIFTY", "optionType": "CE", "strikePrice": 23500, "price": 98.0 }),
            json!("not even an object"),
            json!({ "symbol": "NIFTY", "optionType": "PE", "strikePrice": 23500, "price": 91.0 }),
        ];

        let (quotes, rejected) = parse_chain(&raw);

        assert_eq!(quotes.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(quotes[0].option_type, OptionType::Call);
        assert_eq!(quotes[1].option_type, OptionType::Put);
    }
}
