use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::money::Money;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryKind::Expense => "Expense categories",
            CategoryKind::Income => "Income categories",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    /// Expenses are filed under expense categories, income under income ones.
    pub fn category_kind(self) -> CategoryKind {
        match self {
            TransactionKind::Expense => CategoryKind::Expense,
            TransactionKind::Income => CategoryKind::Income,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expenses",
            TransactionKind::Income => "Income",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            TransactionKind::Expense => "-",
            TransactionKind::Income => "+",
        }
    }
}

/// A point in time as sent by the server. Values without an offset are
/// wall-clock times and get placed in the viewer's zone when compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

impl Timestamp {
    pub fn parse(raw: &str) -> Option<Timestamp> {
        let raw = raw.trim();
        if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
            return Some(Timestamp::Zoned(zoned));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Timestamp::Naive(naive));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Timestamp::Naive)
    }

    /// `None` only for a local time that does not exist in `tz` (a DST gap).
    pub fn in_zone<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            Timestamp::Zoned(dt) => Some(dt.with_timezone(tz)),
            Timestamp::Naive(naive) => tz.from_local_datetime(naive).earliest(),
        }
    }

    pub fn date_label<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.in_zone(tz)
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
            Timestamp::Zoned(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}

/// One expense or income record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Money,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Transaction {
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTransaction {
    pub amount: Money,
    pub description: String,
    pub category_id: i64,
}

/// Partial update; fields left as `None` are not sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Utc};

    #[test]
    fn decodes_server_expense() {
        let raw = r#"{
            "id": 7,
            "amount": 349.9,
            "description": "Groceries",
            "category_id": 2,
            "date": "2024-05-01T10:00:00",
            "is_paid": true,
            "created_at": "2024-05-01T10:15:30.123456"
        }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id, 7);
        assert_eq!(tx.amount, Money::from_minor(34990));
        assert_eq!(tx.category_id, 2);
        let at = tx.created_at.unwrap().in_zone(&Utc).unwrap();
        assert_eq!((at.year(), at.month(), at.day(), at.hour()), (2024, 5, 1, 10));
    }

    #[test]
    fn missing_description_and_timestamp_are_allowed() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id":1,"amount":5,"category_id":3,"description":null}"#)
                .unwrap();
        assert_eq!(tx.description, None);
        assert_eq!(tx.created_at, None);
        assert_eq!(tx.description_or_empty(), "");
    }

    #[test]
    fn malformed_timestamp_is_a_decode_error() {
        let err = serde_json::from_str::<Transaction>(
            r#"{"id":1,"amount":5,"category_id":3,"created_at":"yesterday"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn zoned_timestamp_converts_between_zones() {
        let ts = Timestamp::parse("2024-03-10T23:30:00+03:00").unwrap();
        let utc = ts.in_zone(&Utc).unwrap();
        assert_eq!((utc.day(), utc.hour()), (10, 20));
    }

    #[test]
    fn bare_date_means_midnight() {
        let ts = Timestamp::parse("2024-03-10").unwrap();
        let at = ts.in_zone(&Utc).unwrap();
        assert_eq!((at.day(), at.hour(), at.minute()), (10, 0, 0));
    }

    #[test]
    fn token_response_requires_access_token() {
        assert!(serde_json::from_str::<TokenResponse>(r#"{"token_type":"bearer"}"#).is_err());
        let ok: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(ok.access_token, "abc");
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = TransactionPatch {
            description: Some("Taxi".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "description": "Taxi" })
        );
    }

    #[test]
    fn new_transaction_sends_amount_as_number() {
        let body = NewTransaction {
            amount: Money::from_minor(12050),
            description: String::new(),
            category_id: 4,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "amount": 120.5, "description": "", "category_id": 4 })
        );
    }
}
