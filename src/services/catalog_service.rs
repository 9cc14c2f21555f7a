use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    conversion::non_blank,
    dto::services::{
        CategoryList, CategoryWithServices, CreateServiceRequest, ServicePage, ServicePayload,
        ServiceWithCategory, UpdateServiceRequest,
    },
    entity::{
        booking_cart_items::{Column as ItemCol, Entity as Items},
        categories::{Column as CategoryCol, Entity as Categories},
        services::{
            ActiveModel as ServiceActive, Column as ServiceCol, Entity as Services,
            Model as ServiceModel,
        },
    },
    error::{AppError, AppResult},
    response::PageMeta,
    routes::params::ServiceListQuery,
    state::AppState,
};

use crate::entity::categories::Model as CategoryModel;

fn with_category(
    service: ServiceModel,
    category: Option<CategoryModel>,
) -> ServiceWithCategory {
    ServiceWithCategory {
        service: service.into(),
        category: category.map(Into::into),
    }
}

pub async fn list_services(
    state: &AppState,
    query: ServiceListQuery,
) -> AppResult<ServicePage> {
    let (page, page_size, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(q) = query.q.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(Expr::col(ServiceCol::Name).ilike(format!("%{}%", q.trim())));
    }
    if let Some(category) = query.category.as_deref().filter(|s| !s.trim().is_empty()) {
        let sub = Query::select()
            .column(CategoryCol::Id)
            .from(Categories)
            .and_where(Expr::col(CategoryCol::Name).ilike(format!("%{}%", category.trim())))
            .to_owned();
        condition = condition.add(ServiceCol::CategoryId.in_subquery(sub));
    }

    let finder = Services::find()
        .filter(condition)
        .order_by_desc(ServiceCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let services = finder
        .find_also_related(Categories)
        .limit(page_size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(service, category)| with_category(service, category))
        .collect();

    Ok(ServicePage {
        services,
        meta: PageMeta::new(total, page, page_size),
    })
}

pub async fn get_service(state: &AppState, id: Uuid) -> AppResult<ServicePayload> {
    let service = Services::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
    let category = service.find_related(Categories).one(&state.orm).await?;

    Ok(ServicePayload {
        service: with_category(service, category),
    })
}

async fn category_by_id(state: &AppState, id: Uuid) -> AppResult<CategoryModel> {
    Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}

pub async fn create_service(
    state: &AppState,
    payload: CreateServiceRequest,
) -> AppResult<ServicePayload> {
    let category = match payload.category_id {
        Some(category_id) => Some(category_by_id(state, category_id).await?),
        None => None,
    };

    let name = non_blank(Some(payload.name))
        .ok_or_else(|| AppError::BadRequest("name is required".into()))?;
    let normal_price = non_blank(Some(payload.normal_price))
        .ok_or_else(|| AppError::BadRequest("normalPrice is required".into()))?;

    let service = ServiceActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        normal_price: Set(normal_price),
        member_price: Set(non_blank(payload.member_price)),
        icon: Set(non_blank(payload.icon)),
        category_id: Set(payload.category_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_audit(
        &state.pool,
        None,
        "service_create",
        Some("services"),
        Some(serde_json::json!({ "serviceId": service.id })),
    )
    .await;

    Ok(ServicePayload {
        service: with_category(service, category),
    })
}

pub async fn update_service(
    state: &AppState,
    id: Uuid,
    payload: UpdateServiceRequest,
) -> AppResult<ServicePayload> {
    let existing = Services::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    let mut active: ServiceActive = existing.into();
    if let Some(name) = non_blank(payload.name) {
        active.name = Set(name);
    }
    if let Some(price) = non_blank(payload.normal_price) {
        active.normal_price = Set(price);
    }
    if let Some(value) = payload.member_price {
        active.member_price = Set(non_blank(value));
    }
    if let Some(value) = payload.icon {
        active.icon = Set(non_blank(value));
    }
    if let Some(value) = payload.category_id {
        if let Some(category_id) = value {
            category_by_id(state, category_id).await?;
        }
        active.category_id = Set(value);
    }

    let service = active.update(&state.orm).await?;
    let category = service.find_related(Categories).one(&state.orm).await?;

    log_audit(
        &state.pool,
        None,
        "service_update",
        Some("services"),
        Some(serde_json::json!({ "serviceId": service.id })),
    )
    .await;

    Ok(ServicePayload {
        service: with_category(service, category),
    })
}

/// Delete a catalog entry. Refused while any booking cart item still
/// references it; the staged cart links cascade at the schema level.
pub async fn delete_service(state: &AppState, id: Uuid) -> AppResult<()> {
    let referencing = Items::find()
        .filter(ItemCol::ServiceId.eq(id))
        .count(&state.orm)
        .await?;
    if referencing > 0 {
        return Err(AppError::BadRequest(
            "Service is referenced by booking cart items".into(),
        ));
    }

    let result = Services::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Service not found".into()));
    }

    log_audit(
        &state.pool,
        None,
        "service_delete",
        Some("services"),
        Some(serde_json::json!({ "serviceId": id })),
    )
    .await;

    Ok(())
}

/// Every category with its services, the browse-page data source.
pub async fn list_categories(state: &AppState) -> AppResult<CategoryList> {
    let rows = Categories::find()
        .order_by_asc(CategoryCol::Name)
        .find_with_related(Services)
        .all(&state.orm)
        .await?;

    Ok(CategoryList {
        categories: rows
            .into_iter()
            .map(|(category, services)| CategoryWithServices {
                category: category.into(),
                services: services.into_iter().map(Into::into).collect(),
            })
            .collect(),
    })
}
