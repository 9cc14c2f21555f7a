pub mod audit_logs;
pub mod booking_cart_items;
pub mod bookings;
pub mod cart_services;
pub mod carts;
pub mod categories;
pub mod services;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use booking_cart_items::Entity as BookingCartItems;
pub use bookings::Entity as Bookings;
pub use cart_services::Entity as CartServices;
pub use carts::Entity as Carts;
pub use categories::Entity as Categories;
pub use services::Entity as Services;
pub use users::Entity as Users;
