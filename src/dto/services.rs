use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::double_option;
use crate::models::{Category, Service};
use crate::response::PageMeta;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: String,
    pub normal_price: String,
    pub member_price: Option<String>,
    pub icon: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub normal_price: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub member_price: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceWithCategory {
    #[serde(flatten)]
    pub service: Service,
    pub category: Option<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServicePage {
    pub services: Vec<ServiceWithCategory>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServicePayload {
    pub service: ServiceWithCategory,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryWithServices {
    #[serde(flatten)]
    pub category: Category,
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub categories: Vec<CategoryWithServices>,
}
