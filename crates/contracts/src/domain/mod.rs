pub mod customer;
pub mod project;
pub mod role;
