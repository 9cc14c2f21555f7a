use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{DashboardMetrics, StatusCount, TrendingReport, TrendingService},
        booking_cart_items::{
            CreateBookingCartItemRequest, ItemList, ItemPayload, ItemWithService,
            UpdateBookingCartItemRequest,
        },
        bookings::{
            BookingDetail, BookingPage, BookingPayload, BookingWithUser, CreateBookingRequest,
            UpdateBookingRequest, UserBookingList,
        },
        cart::{CartPayload, CartWithServices, UpdateCartRequest},
        services::{
            CategoryList, CategoryWithServices, CreateServiceRequest, ServicePage,
            ServicePayload, ServiceWithCategory, UpdateServiceRequest,
        },
    },
    entity::bookings::BookingStatus,
    models::{Booking, BookingCartItem, Cart, Category, Service, User},
    response::{ApiResponse, PageMeta},
    routes::{admin, booking_cart_items, bookings, cart, categories, health, services},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        bookings::list_bookings,
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_booking,
        bookings::delete_booking,
        bookings::list_user_bookings,
        booking_cart_items::list_items,
        booking_cart_items::create_item,
        booking_cart_items::update_item,
        booking_cart_items::delete_item,
        cart::get_cart,
        cart::update_cart,
        services::list_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        categories::list_categories,
        admin::metrics,
        admin::trending_services
    ),
    components(
        schemas(
            User,
            Category,
            Service,
            Cart,
            Booking,
            BookingCartItem,
            BookingStatus,
            CreateBookingRequest,
            UpdateBookingRequest,
            BookingWithUser,
            BookingDetail,
            BookingPage,
            BookingPayload,
            UserBookingList,
            CreateBookingCartItemRequest,
            UpdateBookingCartItemRequest,
            ItemWithService,
            ItemList,
            ItemPayload,
            UpdateCartRequest,
            CartWithServices,
            CartPayload,
            CreateServiceRequest,
            UpdateServiceRequest,
            ServiceWithCategory,
            ServicePage,
            ServicePayload,
            CategoryWithServices,
            CategoryList,
            DashboardMetrics,
            StatusCount,
            TrendingReport,
            TrendingService,
            PageMeta,
            ApiResponse<BookingPage>,
            ApiResponse<BookingPayload>,
            ApiResponse<ItemList>,
            ApiResponse<CartPayload>,
            ApiResponse<ServicePage>,
            ApiResponse<CategoryList>,
            ApiResponse<DashboardMetrics>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Bookings", description = "Booking lifecycle endpoints"),
        (name = "BookingCartItems", description = "Scheduled cart item endpoints"),
        (name = "Cart", description = "Staged cart endpoints"),
        (name = "Services", description = "Catalog service endpoints"),
        (name = "Categories", description = "Catalog category endpoints"),
        (name = "Admin", description = "Dashboard reporting endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
