//! Состояние таблиц списков и конвейер фильтр → сортировка → страница,
//! который превращает его в строки для вывода.

use std::collections::HashSet;

use super::list_utils::{apply_filter, empty_rows, get_comparator, SortOrder, TableRow};

#[derive(Clone, Debug, PartialEq)]
pub struct TableState {
    /// С 0
    pub page: usize,
    pub rows_per_page: usize,
    pub order: SortOrder,
    pub order_by: String,
    pub selected: HashSet<String>,
    pub filter_name: String,
}

impl TableState {
    pub fn new(order_by: impl Into<String>, rows_per_page: usize) -> Self {
        Self {
            page: 0,
            rows_per_page: rows_per_page.max(1),
            order: SortOrder::Asc,
            order_by: order_by.into(),
            selected: HashSet::new(),
            filter_name: String::new(),
        }
    }

    /// Та же колонка меняет направление, новая начинает по возрастанию.
    /// Текущая страница сохраняется.
    pub fn on_sort(&mut self, column_id: &str) {
        if self.order_by == column_id {
            self.order = self.order.flipped();
        } else {
            self.order_by = column_id.to_string();
            self.order = SortOrder::Asc;
        }
    }

    pub fn on_select_row(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// `all_ids` это id после фильтра, а не весь набор данных.
    pub fn on_select_all_rows(&mut self, checked: bool, all_ids: &[String]) {
        if checked {
            self.selected = all_ids.iter().cloned().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn on_change_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn on_change_rows_per_page(&mut self, rows_per_page: usize) {
        if rows_per_page == 0 {
            return;
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
    }

    pub fn on_reset_page(&mut self) {
        self.page = 0;
    }

    pub fn on_filter(&mut self, filter_name: String) {
        if self.filter_name != filter_name {
            self.filter_name = filter_name;
            self.on_reset_page();
        }
    }

    /// Убирает из выбора id, которых больше нет среди `visible_ids`.
    pub fn retain_selection(&mut self, visible_ids: &[String]) {
        if self.selected.is_empty() {
            return;
        }
        let visible: HashSet<&str> = visible_ids.iter().map(String::as_str).collect();
        self.selected.retain(|id| visible.contains(id.as_str()));
    }

    /// Возвращает страницу в пределы `0..page_count` для `total` строк.
    pub fn clamp_page(&mut self, total: usize) {
        let page_count = page_count(total, self.rows_per_page);
        if self.page >= page_count {
            self.page = page_count - 1;
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }
}

/// Минимум одна страница, даже для пустой таблицы
pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    if total == 0 || rows_per_page == 0 {
        1
    } else {
        total.div_ceil(rows_per_page)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ViewOptions<'a> {
    pub search_by: &'a str,
    /// Выводить `data` как есть, без сортировки, фильтра и среза
    pub preserve_order: bool,
    pub disable_search: bool,
    pub disable_pagination: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableView<R> {
    /// Строки текущей страницы в порядке вывода
    pub rows: Vec<R>,
    /// Id после фильтра, до пагинации. Область действия «выбрать все».
    pub filtered_ids: Vec<String>,
    /// Количество строк после фильтра
    pub total: usize,
    pub empty_rows: usize,
    /// Поиск задан, и ничего не найдено
    pub is_not_found: bool,
}

pub fn build_view<R: TableRow>(data: &[R], state: &TableState, options: &ViewOptions) -> TableView<R> {
    let search_active = !options.preserve_order && !options.disable_search;

    let filtered = if options.preserve_order {
        data.to_vec()
    } else {
        let filter_name = if search_active { state.filter_name.as_str() } else { "" };
        apply_filter(
            data,
            get_comparator(state.order, &state.order_by),
            filter_name,
            options.search_by,
        )
    };

    let total = filtered.len();
    let filtered_ids = filtered.iter().map(|row| row.row_id()).collect();
    let is_not_found = total == 0 && search_active && !state.filter_name.trim().is_empty();

    if options.preserve_order || options.disable_pagination {
        return TableView {
            rows: filtered,
            filtered_ids,
            total,
            empty_rows: 0,
            is_not_found,
        };
    }

    let start = state.page * state.rows_per_page;
    let rows = filtered
        .into_iter()
        .skip(start)
        .take(state.rows_per_page)
        .collect();

    TableView {
        rows,
        filtered_ids,
        total,
        empty_rows: empty_rows(state.page, state.rows_per_page, total),
        is_not_found,
    }
}

/// Ключи строк для `<For>`. В ключ входит ревизия данных: после
/// перезагрузки строка с тем же id строится заново и показывает новое
/// содержимое.
pub fn keyed_rows<R: TableRow>(rows: &[R], revision: u64) -> Vec<(String, R)> {
    rows.iter()
        .map(|row| (format!("{}:{}", revision, row.row_id()), row.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{CellValue, JsonRow};
    use serde_json::json;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("r{i}")).collect()
    }

    fn rows(names: &[&str]) -> Vec<JsonRow> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| JsonRow::new(json!({ "id": format!("r{i}"), "name": name, "rank": i })))
            .collect()
    }

    #[test]
    fn test_sort_same_column_flips_direction() {
        let mut state = TableState::new("name", 10);
        state.on_sort("name");
        assert_eq!(state.order, SortOrder::Desc);
        state.on_sort("name");
        assert_eq!(state.order, SortOrder::Asc);
    }

    #[test]
    fn test_sort_new_column_is_ascending_and_keeps_page() {
        let mut state = TableState::new("name", 10);
        state.on_sort("name");
        state.on_change_page(3);
        state.on_sort("amount");
        assert_eq!(state.order_by, "amount");
        assert_eq!(state.order, SortOrder::Asc);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = TableState::new("name", 10);
        state.on_change_page(2);
        state.on_filter("asha".into());
        assert_eq!(state.page, 0);
        assert_eq!(state.filter_name, "asha");
    }

    #[test]
    fn test_select_row_toggles() {
        let mut state = TableState::new("name", 10);
        state.on_select_row("a");
        assert!(state.is_selected("a"));
        state.on_select_row("a");
        assert!(!state.is_selected("a"));
    }

    #[test]
    fn test_select_all_then_clear() {
        let mut state = TableState::new("name", 10);
        let all = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        state.on_select_all_rows(true, &all);
        assert_eq!(state.selected.len(), 3);
        state.on_select_all_rows(false, &all);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_rows_per_page_change_resets_page() {
        let mut state = TableState::new("name", 10);
        state.on_change_page(4);
        state.on_change_rows_per_page(25);
        assert_eq!(state.rows_per_page, 25);
        assert_eq!(state.page, 0);

        state.on_change_page(1);
        state.on_change_rows_per_page(0);
        assert_eq!(state.rows_per_page, 25);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_retain_selection_drops_hidden_ids() {
        let mut state = TableState::new("name", 10);
        state.on_select_all_rows(true, &ids(4));
        state.retain_selection(&ids(2));
        let mut selected: Vec<_> = state.selected.iter().cloned().collect();
        selected.sort();
        assert_eq!(selected, ids(2));
    }

    #[test]
    fn test_clamp_page() {
        let mut state = TableState::new("name", 10);
        state.on_change_page(5);
        state.clamp_page(15);
        assert_eq!(state.page, 1);
        state.clamp_page(0);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn test_preserve_order_renders_input_as_given() {
        let names = ["j", "b", "h", "a", "c", "i", "d", "g", "e", "f"];
        let data = rows(&names);
        let mut state = TableState::new("name", 5);
        state.on_filter("zzz".into());
        let options = ViewOptions {
            search_by: "name",
            preserve_order: true,
            ..Default::default()
        };

        let view = build_view(&data, &state, &options);
        assert_eq!(view.rows, data);
        assert_eq!(view.total, 10);
        assert_eq!(view.empty_rows, 0);
        assert!(!view.is_not_found);
    }

    #[test]
    fn test_client_pipeline_filters_sorts_and_pages() {
        let data = rows(&["Ravi", "Meera", "Kiran", "Devi", "Asha", "Raj"]);
        let mut state = TableState::new("name", 2);
        let options = ViewOptions {
            search_by: "name",
            ..Default::default()
        };

        let view = build_view(&data, &state, &options);
        let names: Vec<_> = view.rows.iter().map(|r| r.cell("name")).collect();
        assert_eq!(names, vec![CellValue::from("Asha"), CellValue::from("Devi")]);
        assert_eq!(view.total, 6);
        assert_eq!(view.filtered_ids.len(), 6);

        state.on_filter("ra".into());
        state.on_sort("name");
        let view = build_view(&data, &state, &options);
        let names: Vec<_> = view.rows.iter().map(|r| r.cell("name")).collect();
        assert_eq!(names, vec![CellValue::from("Ravi"), CellValue::from("Raj")]);
        assert_eq!(view.total, 4);

        state.on_change_page(1);
        let view = build_view(&data, &state, &options);
        let names: Vec<_> = view.rows.iter().map(|r| r.cell("name")).collect();
        assert_eq!(names, vec![CellValue::from("Meera"), CellValue::from("Kiran")]);
        assert_eq!(view.empty_rows, 0);

        state.on_change_rows_per_page(3);
        state.on_change_page(1);
        let view = build_view(&data, &state, &options);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.empty_rows, 2);
    }

    #[test]
    fn test_not_found_only_when_search_applied() {
        let data = rows(&["Ravi"]);
        let mut state = TableState::new("name", 10);
        let options = ViewOptions {
            search_by: "name",
            ..Default::default()
        };
        assert!(!build_view(&Vec::<JsonRow>::new(), &state, &options).is_not_found);

        state.on_filter("zzz-no-match".into());
        let view = build_view(&data, &state, &options);
        assert!(view.rows.is_empty());
        assert!(view.is_not_found);

        let server_side = ViewOptions {
            disable_search: true,
            ..options
        };
        let view = build_view(&data, &state, &server_side);
        assert_eq!(view.rows.len(), 1);
        assert!(!view.is_not_found);
    }

    #[test]
    fn test_disable_pagination_returns_every_filtered_row() {
        let data = rows(&["a", "b", "c", "d"]);
        let mut state = TableState::new("name", 2);
        state.on_change_page(1);
        let options = ViewOptions {
            search_by: "name",
            disable_pagination: true,
            ..Default::default()
        };
        let view = build_view(&data, &state, &options);
        assert_eq!(view.rows.len(), 4);
        assert_eq!(view.empty_rows, 0);
    }

    #[test]
    fn test_reloaded_row_gets_new_key() {
        let before = vec![JsonRow::new(json!({ "id": "r1", "isActive": false }))];
        let after = vec![JsonRow::new(json!({ "id": "r1", "isActive": true }))];

        let first = keyed_rows(&before, 0);
        let second = keyed_rows(&after, 1);
        assert_ne!(first[0].0, second[0].0);
        assert_eq!(second[0].1.cell("isActive"), CellValue::Bool(true));
    }

    #[test]
    fn test_keys_unique_within_revision() {
        let data = rows(&["a", "b", "c"]);
        let keys: HashSet<String> = keyed_rows(&data, 3).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 3);
    }
}
