pub mod admin_service;
pub mod booking_cart_item_service;
pub mod booking_service;
pub mod cart_service;
pub mod catalog_service;
