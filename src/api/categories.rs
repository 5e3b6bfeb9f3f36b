use crate::error::ApiError;
use crate::models::{Category, CategoryKind, CategoryPayload};

use super::{ApiClient, ApiRequest, Method, Scope};

fn collection(kind: CategoryKind) -> String {
    format!("/category/{}", kind.path_segment())
}

fn item(kind: CategoryKind, id: i64) -> String {
    format!("/category/{}/{}", kind.path_segment(), id)
}

pub fn list_request(kind: CategoryKind) -> ApiRequest {
    ApiRequest::get(Scope::Resource, collection(kind))
}

pub fn create_request(kind: CategoryKind, name: &str) -> Result<ApiRequest, ApiError> {
    ApiRequest::new(Method::Post, Scope::Resource, collection(kind)).with_json(&CategoryPayload {
        name: name.to_string(),
    })
}

pub fn update_request(kind: CategoryKind, id: i64, name: &str) -> Result<ApiRequest, ApiError> {
    ApiRequest::new(Method::Patch, Scope::Resource, item(kind, id)).with_json(&CategoryPayload {
        name: name.to_string(),
    })
}

pub fn delete_request(kind: CategoryKind, id: i64) -> ApiRequest {
    ApiRequest::delete(Scope::Resource, item(kind, id))
}

impl ApiClient {
    pub async fn list_categories(&self, kind: CategoryKind) -> Result<Vec<Category>, ApiError> {
        self.send(list_request(kind)).await
    }

    pub async fn create_category(&self, kind: CategoryKind, name: &str) -> Result<Category, ApiError> {
        self.send(create_request(kind, name)?).await
    }

    pub async fn update_category(
        &self,
        kind: CategoryKind,
        id: i64,
        name: &str,
    ) -> Result<Category, ApiError> {
        self.send(update_request(kind, id, name)?).await
    }

    pub async fn delete_category(&self, kind: CategoryKind, id: i64) -> Result<(), ApiError> {
        self.send_discarding(delete_request(kind, id)).await
    }
}
