pub mod number_format;
pub mod sortable_header_cell;

pub use sortable_header_cell::SortableHeaderCell;

/// Горизонтальное выравнивание заголовка и ячеек колонки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn class(self) -> &'static str {
        match self {
            Align::Left => "text-left",
            Align::Center => "text-center",
            Align::Right => "text-right",
        }
    }
}
