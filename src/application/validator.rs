use crate::domain::card::CardDetails;
use crate::error::{Result, TokenizeError};
use serde_json::{Map, Value};

/// Fields a decrypted card payload must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = ["nameOnCard", "color", "number", "validThru", "cvv"];

/// Returns the required fields that are absent, null or empty, joined by
/// `", "` in the order of `required`. `None` when nothing is missing.
pub fn find_missing_fields(payload: &Map<String, Value>, required: &[&str]) -> Option<String> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| match payload.get(*name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(missing.join(", "))
    }
}

/// Checks the decrypted payload and moves its card fields into typed details.
///
/// Field strings are taken out of `payload` rather than copied, so the only
/// live copy of the number and security code is wiped when the details drop.
pub fn validate_card(payload: Value) -> Result<CardDetails> {
    let Value::Object(mut fields) = payload else {
        return Err(TokenizeError::InvalidArgument(
            "payload is not a valid object".to_string(),
        ));
    };

    if let Some(missing) = find_missing_fields(&fields, &REQUIRED_FIELDS) {
        return Err(TokenizeError::InvalidArgument(format!(
            "the following fields are required: {}",
            missing
        )));
    }

    let mut card = CardDetails::default();
    let slots = [
        (&mut card.name_on_card, "nameOnCard"),
        (&mut card.color, "color"),
        (&mut card.number, "number"),
        (&mut card.valid_thru, "validThru"),
        (&mut card.cvv, "cvv"),
    ];
    for (slot, name) in slots {
        *slot = take_text(&mut fields, name)?;
    }
    Ok(card)
}

fn take_text(fields: &mut Map<String, Value>, name: &str) -> Result<String> {
    match fields.remove(name) {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(TokenizeError::InvalidArgument(format!(
            "field {} must be a string",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_complete_payload_has_nothing_missing() {
        let payload = object(json!({
            "nameOnCard": "A B",
            "color": "blue",
            "number": "4111111111111111",
            "validThru": "12/30",
            "cvv": "123"
        }));
        assert_eq!(find_missing_fields(&payload, &REQUIRED_FIELDS), None);
    }

    #[test]
    fn test_missing_fields_follow_required_order() {
        // Input order deliberately differs from the required order.
        let payload = object(json!({
            "validThru": "",
            "color": "blue",
            "cvv": null,
            "extra": "ignored"
        }));
        assert_eq!(
            find_missing_fields(&payload, &REQUIRED_FIELDS).as_deref(),
            Some("nameOnCard, number, validThru, cvv")
        );
    }

    #[test]
    fn test_zero_and_false_are_present() {
        let payload = object(json!({ "a": 0, "b": false }));
        assert_eq!(find_missing_fields(&payload, &["a", "b", "c"]).as_deref(), Some("c"));
    }

    #[test]
    fn test_validate_card_rejects_non_object() {
        let err = validate_card(json!(["4111111111111111"])).unwrap_err();
        assert!(
            matches!(err, TokenizeError::InvalidArgument(m) if m == "payload is not a valid object")
        );
    }

    #[test]
    fn test_validate_card_lists_missing_without_values() {
        let err = validate_card(json!({
            "nameOnCard": "A B",
            "number": "4111111111111111"
        }))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.ends_with("the following fields are required: color, validThru, cvv"));
        assert!(!message.contains("4111"));
    }

    #[test]
    fn test_validate_card_accepts_numeric_fields() {
        let card = validate_card(json!({
            "nameOnCard": "A B",
            "color": "blue",
            "number": 4111111111111111u64,
            "validThru": "12/30",
            "cvv": 123
        }))
        .unwrap();

        assert_eq!(card.number, "4111111111111111");
        assert_eq!(card.cvv, "123");
    }

    #[test]
    fn test_validate_card_rejects_structured_field() {
        let err = validate_card(json!({
            "nameOnCard": "A B",
            "color": "blue",
            "number": { "digits": "4111" },
            "validThru": "12/30",
            "cvv": "123"
        }))
        .unwrap_err();

        assert!(
            matches!(err, TokenizeError::InvalidArgument(m) if m == "field number must be a string")
        );
    }
}
