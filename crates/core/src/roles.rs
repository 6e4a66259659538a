//! Role name constants matching the `sales_persons.role` column.

pub const ROLE_SALES: &str = "sales";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";
