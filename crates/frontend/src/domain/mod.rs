pub mod customers;
pub mod emis;
pub mod projects;
pub mod roles;
