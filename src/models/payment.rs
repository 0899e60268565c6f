use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::Entity;
use crate::models::parse_timestamp;

/// A recorded checkout payment. Card data is tokenized at creation:
/// the store keeps an opaque processor token and the last four digits.
/// The raw card number and security code never reach the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub payment_method: String,
    pub name: String,
    pub card_token: String,
    pub card_last4: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated checkout input. Carries the full card number only in
/// memory, for the duration of tokenization.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payment_method: String,
    pub name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
}

impl Payment {
    pub fn new(new: NewPayment) -> Self {
        let now = Utc::now();
        let digits: String = new.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        let card_last4 = digits[digits.len().saturating_sub(4)..].to_string();
        Self {
            id: Uuid::new_v4(),
            payment_method: new.payment_method,
            name: new.name,
            card_token: crate::allocator::payment_token(),
            card_last4,
            expiry_month: new.expiry_month,
            expiry_year: new.expiry_year,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Payment {
    const TABLE: &'static str = "payments";
    const NOUN: &'static str = "Payment";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "payment_method",
        "name",
        "card_token",
        "card_last4",
        "expiry_month",
        "expiry_year",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            payment_method: row.get(1)?,
            name: row.get(2)?,
            card_token: row.get(3)?,
            card_last4: row.get(4)?,
            expiry_month: row.get(5)?,
            expiry_year: row.get(6)?,
            created_at: parse_timestamp(&row.get::<_, String>(7)?),
            updated_at: parse_timestamp(&row.get::<_, String>(8)?),
        })
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.to_string()),
            Value::from(self.payment_method.clone()),
            Value::from(self.name.clone()),
            Value::from(self.card_token.clone()),
            Value::from(self.card_last4.clone()),
            Value::from(self.expiry_month.clone()),
            Value::from(self.expiry_year.clone()),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPayment {
        NewPayment {
            payment_method: "Card".into(),
            name: "A. Perera".into(),
            card_number: "4111 1111 1111 1234".into(),
            expiry_month: "09".into(),
            expiry_year: "2028".into(),
        }
    }

    #[test]
    fn tokenizes_and_keeps_last4_only() {
        let payment = Payment::new(sample());
        assert_eq!(payment.card_last4, "1234");
        assert!(payment.card_token.starts_with("tok_"));
        assert!(!payment.card_token.contains("4111"));
    }

    #[test]
    fn tokens_are_unique_per_payment() {
        let a = Payment::new(sample());
        let b = Payment::new(sample());
        assert_ne!(a.card_token, b.card_token);
    }

    #[test]
    fn stored_values_never_contain_card_number() {
        let payment = Payment::new(sample());
        for value in payment.insert_values() {
            if let Value::Text(s) = value {
                assert!(!s.contains("4111"), "card number leaked into {s}");
            }
        }
    }

    #[test]
    fn short_card_number_keeps_available_digits() {
        let payment = Payment::new(NewPayment {
            card_number: "12".into(),
            ..sample()
        });
        assert_eq!(payment.card_last4, "12");
    }
}
