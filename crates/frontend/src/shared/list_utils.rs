//! Доступ к полям строк, сортировка и фильтрация клиентских таблиц
//!
//! Здесь нет обращений к DOM, всё проверяется обычными unit-тестами.

use serde_json::Value;
use std::cmp::Ordering;

/// Значение одной ячейки строки
///
/// Значения разных видов упорядочены как `Null < Bool < число < Text`,
/// поэтому сравнение не падает, что бы ни было в строках.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Текст ячейки. Отсутствующее значение выводится пустой строкой.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Полный порядок на всех значениях ячеек
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64).total_cmp(b),
            (CellValue::Float(a), CellValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(CellValue::Int)
                .or_else(|| n.as_f64().map(CellValue::Float))
                .unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Строка, которую можно вывести в [`DataTable`](crate::shared::components::data_table::DataTable).
pub trait TableRow: Clone + PartialEq + Send + Sync + 'static {
    /// Уникальный id для выбора и ключей списка
    fn row_id(&self) -> String;

    /// Значение по пути колонки. Путь через точку адресует вложенные поля,
    /// например `customer.name`. `None`, если путь не найден.
    fn field(&self, path: &str) -> Option<CellValue>;

    fn cell(&self, path: &str) -> CellValue {
        self.field(path).unwrap_or(CellValue::Null)
    }
}

/// Находит значение по пути через точку. Элементы массива адресуются
/// числовыми сегментами (`items.0.name`). JSON `null` даёт `None`.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Строка без схемы для эндпоинтов, строки которых показываются как есть
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRow {
    pub value: Value,
    key: String,
}

fn json_id(value: &Value) -> Option<String> {
    ["id", "_id"].iter().find_map(|key| match value.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl JsonRow {
    /// Одна запись. Ключ берётся из `id` или `_id`.
    pub fn new(value: Value) -> Self {
        let key = json_id(&value).unwrap_or_default();
        Self { value, key }
    }

    /// Строки списка. Строке без `id`/`_id` ключ строится по её позиции,
    /// чтобы у каждой строки был свой ключ и своя отметка выбора.
    pub fn from_values(values: Vec<Value>) -> Vec<Self> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match json_id(&value) {
                Some(key) => Self { value, key },
                None => {
                    log::warn!("row {} has no id, keyed by position", index);
                    Self {
                        value,
                        key: format!("#{index}"),
                    }
                }
            })
            .collect()
    }
}

impl TableRow for JsonRow {
    fn row_id(&self) -> String {
        self.key.clone()
    }

    fn field(&self, path: &str) -> Option<CellValue> {
        lookup_path(&self.value, path).map(CellValue::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Компаратор строк по значению в `order_by`
///
/// Отсутствующие значения по возрастанию идут первыми. `Desc` обращает
/// результат сравнения по возрастанию.
pub fn get_comparator<'a, R: TableRow>(
    order: SortOrder,
    order_by: &'a str,
) -> impl Fn(&R, &R) -> Ordering + 'a {
    move |a, b| {
        let ascending = a.cell(order_by).total_cmp(&b.cell(order_by));
        match order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    }
}

/// Поиск подстроки в поле `search_by` без учёта регистра.
/// `needle` уже обрезан и в нижнем регистре.
fn matches_search<R: TableRow>(row: &R, search_by: &str, needle: &str) -> bool {
    row.cell(search_by).display().to_lowercase().contains(needle)
}

/// Сортирует `input` компаратором и оставляет строки, у которых поле
/// `search_by` содержит `filter_name`.
///
/// Равные строки сохраняют исходный порядок. Фильтр из одних пробелов
/// оставляет все строки.
pub fn apply_filter<R, F>(input: &[R], comparator: F, filter_name: &str, search_by: &str) -> Vec<R>
where
    R: TableRow,
    F: Fn(&R, &R) -> Ordering,
{
    let mut indexed: Vec<(usize, &R)> = input.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| comparator(*a, *b).then_with(|| ia.cmp(ib)));

    let needle = filter_name.trim().to_lowercase();
    indexed
        .into_iter()
        .map(|(_, row)| row)
        .filter(|row| needle.is_empty() || matches_search(*row, search_by, &needle))
        .cloned()
        .collect()
}

/// Число пустых строк-заполнителей, которые держат высоту таблицы на
/// неполной странице после первой
pub fn empty_rows(page: usize, rows_per_page: usize, total: usize) -> usize {
    if page == 0 {
        return 0;
    }
    ((page + 1) * rows_per_page)
        .saturating_sub(total)
        .min(rows_per_page)
}

/// Индикатор сортировки рядом с заголовком
pub fn get_sort_indicator(current_field: &str, field: &str, order: SortOrder) -> &'static str {
    if current_field == field {
        match order {
            SortOrder::Asc => " ▲",
            SortOrder::Desc => " ▼",
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Loan {
        id: &'static str,
        name: &'static str,
        amount: Option<i64>,
    }

    impl TableRow for Loan {
        fn row_id(&self) -> String {
            self.id.to_string()
        }

        fn field(&self, path: &str) -> Option<CellValue> {
            match path {
                "id" => Some(self.id.into()),
                "name" => Some(self.name.into()),
                "amount" => self.amount.map(CellValue::Int),
                _ => None,
            }
        }
    }

    fn loans() -> Vec<Loan> {
        vec![
            Loan { id: "a", name: "Ravi", amount: Some(300) },
            Loan { id: "b", name: "Meera", amount: Some(100) },
            Loan { id: "c", name: "arjun", amount: None },
            Loan { id: "d", name: "Kiran", amount: Some(100) },
            Loan { id: "e", name: "Devi", amount: Some(200) },
        ]
    }

    fn ids(rows: &[Loan]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_asc_and_desc_are_reverse_without_ties() {
        let rows = loans();
        let asc = apply_filter(&rows, get_comparator(SortOrder::Asc, "name"), "", "name");
        let desc = apply_filter(&rows, get_comparator(SortOrder::Desc, "name"), "", "name");
        let mut reversed = ids(&desc);
        reversed.reverse();
        assert_eq!(ids(&asc), reversed);
        // порядковое сравнение: заглавные раньше строчных
        assert_eq!(ids(&asc), vec!["e", "d", "b", "a", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = loans();
        let asc = apply_filter(&rows, get_comparator(SortOrder::Asc, "amount"), "", "name");
        assert_eq!(ids(&asc), vec!["c", "b", "d", "e", "a"]);

        let desc = apply_filter(&rows, get_comparator(SortOrder::Desc, "amount"), "", "name");
        // b и d равны (100) и сохраняют исходный порядок в обе стороны
        assert_eq!(ids(&desc), vec!["a", "e", "b", "d", "c"]);
    }

    #[test]
    fn test_missing_field_sorts_lowest() {
        let rows = loans();
        let asc = apply_filter(&rows, get_comparator(SortOrder::Asc, "no_such_field"), "", "name");
        // значений нет ни у кого, исходный порядок сохраняется
        assert_eq!(ids(&asc), ids(&rows));

        let asc = apply_filter(&rows, get_comparator(SortOrder::Asc, "amount"), "", "name");
        assert_eq!(asc[0].id, "c");
    }

    #[test]
    fn test_empty_filter_preserves_row_set() {
        let rows = loans();
        let out = apply_filter(&rows, get_comparator(SortOrder::Asc, "name"), "   ", "name");
        assert_eq!(out.len(), rows.len());
        let mut got = ids(&out);
        got.sort();
        assert_eq!(got, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_filter_is_trimmed_and_case_insensitive() {
        let rows = loans();
        let out = apply_filter(&rows, get_comparator(SortOrder::Asc, "name"), "  RA ", "name");
        assert_eq!(ids(&out), vec!["d", "b", "a"]);
    }

    #[test]
    fn test_filter_without_match_is_empty() {
        let rows = loans();
        let out = apply_filter(&rows, get_comparator(SortOrder::Asc, "name"), "zzz-no-match", "name");
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(empty_rows(1, 10, 15), 5);
        assert_eq!(empty_rows(0, 10, 3), 0);
        assert_eq!(empty_rows(1, 10, 20), 0);
        assert_eq!(empty_rows(2, 5, 11), 4);
        assert_eq!(empty_rows(9, 10, 15), 10);
    }

    #[test]
    fn test_cell_values_have_a_total_order() {
        let values = [
            CellValue::Text("a".into()),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Int(2),
            CellValue::Bool(true),
        ];
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(
            sorted,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Float(1.5),
                CellValue::Int(2),
                CellValue::Text("a".into()),
            ]
        );
        assert_eq!(CellValue::Float(f64::NAN).total_cmp(&CellValue::Float(f64::NAN)), Ordering::Equal);
    }

    #[test]
    fn test_lookup_path_resolves_nested_fields() {
        let value = json!({
            "customer": { "name": "Asha", "phones": ["111", "222"] },
            "amount": 1500,
            "note": null
        });
        assert_eq!(lookup_path(&value, "customer.name"), Some(&json!("Asha")));
        assert_eq!(lookup_path(&value, "customer.phones.1"), Some(&json!("222")));
        assert_eq!(lookup_path(&value, "customer.missing"), None);
        assert_eq!(lookup_path(&value, "amount.value"), None);
        assert_eq!(lookup_path(&value, "note"), None);
    }

    #[test]
    fn test_json_row_id_and_fields() {
        let row = JsonRow::new(json!({ "_id": "emi-7", "customer": { "name": "Asha" }, "amount": 12.5 }));
        assert_eq!(row.row_id(), "emi-7");
        assert_eq!(row.cell("customer.name"), CellValue::Text("Asha".into()));
        assert_eq!(row.cell("amount"), CellValue::Float(12.5));
        assert!(row.cell("project.name").is_null());
        assert_eq!(row.cell("project.name").display(), "");

        let numeric = JsonRow::new(json!({ "id": 42 }));
        assert_eq!(numeric.row_id(), "42");
    }

    #[test]
    fn test_json_rows_without_id_get_distinct_keys() {
        let rows = JsonRow::from_values(vec![
            json!({ "amount": 100 }),
            json!({ "id": "emi-2", "amount": 200 }),
            json!({ "amount": 300 }),
        ]);
        let ids: Vec<String> = rows.iter().map(|r| r.row_id()).collect();
        assert_eq!(ids, vec!["#0", "emi-2", "#2"]);
        assert_eq!(rows[2].cell("amount"), CellValue::Int(300));
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", SortOrder::Asc), " ▲");
        assert_eq!(get_sort_indicator("name", "name", SortOrder::Desc), " ▼");
        assert_eq!(get_sort_indicator("name", "amount", SortOrder::Asc), " ⇅");
    }
}
