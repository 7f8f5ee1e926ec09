//! Графики EMI приходят в разной форме в зависимости от того, как они
//! созданы. Строки остаются сырым JSON, колонки адресуют вложенные поля
//! путём через точку.

pub mod api;
pub mod ui;
