//! DTO, общие для фронтенда и REST API админки кредитования

pub mod domain;
pub mod shared;
pub mod system;
