pub mod confirm_dialog;
pub mod data_table;
pub mod pagination_controls;
pub mod record_detail;
pub mod search_input;
pub mod table;
pub mod table_checkbox;
