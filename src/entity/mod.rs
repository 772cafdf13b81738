pub mod audit_logs;
pub mod carts;
pub mod enums;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use carts::Entity as Carts;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use reports::Entity as Reports;
pub use users::Entity as Users;
