use crate::error::ApiError;
use crate::models::{NewTransaction, Transaction, TransactionKind, TransactionPatch};

use super::{ApiClient, ApiRequest, Method, Scope};

fn collection(kind: TransactionKind) -> String {
    format!("/{}", kind.path_segment())
}

fn item(kind: TransactionKind, id: i64) -> String {
    format!("/{}/{}", kind.path_segment(), id)
}

pub fn list_request(kind: TransactionKind) -> ApiRequest {
    ApiRequest::get(Scope::Resource, collection(kind))
}

pub fn create_request(kind: TransactionKind, payload: &NewTransaction) -> Result<ApiRequest, ApiError> {
    ApiRequest::new(Method::Post, Scope::Resource, collection(kind)).with_json(payload)
}

pub fn update_request(
    kind: TransactionKind,
    id: i64,
    patch: &TransactionPatch,
) -> Result<ApiRequest, ApiError> {
    ApiRequest::new(Method::Patch, Scope::Resource, item(kind, id)).with_json(patch)
}

pub fn delete_request(kind: TransactionKind, id: i64) -> ApiRequest {
    ApiRequest::delete(Scope::Resource, item(kind, id))
}

impl ApiClient {
    pub async fn list_transactions(&self, kind: TransactionKind) -> Result<Vec<Transaction>, ApiError> {
        self.send(list_request(kind)).await
    }

    pub async fn create_transaction(
        &self,
        kind: TransactionKind,
        payload: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        self.send(create_request(kind, payload)?).await
    }

    pub async fn update_transaction(
        &self,
        kind: TransactionKind,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Transaction, ApiError> {
        self.send(update_request(kind, id, patch)?).await
    }

    pub async fn delete_transaction(&self, kind: TransactionKind, id: i64) -> Result<(), ApiError> {
        self.send_discarding(delete_request(kind, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Body;
    use crate::money::Money;

    #[test]
    fn expense_and_income_paths() {
        assert_eq!(list_request(TransactionKind::Expense).path, "/expense");
        assert_eq!(list_request(TransactionKind::Income).path, "/income");
        assert_eq!(delete_request(TransactionKind::Income, 9).path, "/income/9");
    }

    #[test]
    fn create_carries_amount_description_and_category() {
        let payload = NewTransaction {
            amount: Money::from_minor(25000),
            description: "Dinner".to_string(),
            category_id: 5,
        };
        let req = create_request(TransactionKind::Expense, &payload).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.scope, Scope::Resource);
        assert_eq!(
            req.body,
            Body::Json(serde_json::json!({ "amount": 250.0, "description": "Dinner", "category_id": 5 }))
        );
    }

    #[test]
    fn update_sends_only_changed_fields() {
        let patch = TransactionPatch {
            amount: Some(Money::from_minor(150)),
            ..Default::default()
        };
        let req = update_request(TransactionKind::Income, 4, &patch).unwrap();
        assert_eq!(req.method, Method::Patch);
        assert_eq!(req.path, "/income/4");
        assert_eq!(req.body, Body::Json(serde_json::json!({ "amount": 1.5 })));
    }
}
