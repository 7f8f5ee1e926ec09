//! Форматирование чисел для ячеек таблицы
//!
//! Индийская группировка разрядов: последние три цифры образуют одну группу,
//! все группы левее по две цифры (`12,34,567.89`).

fn group_indian(integer: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };
    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{}{},{}", sign, groups.join(","), tail)
}

/// Число с индийской группировкой и фиксированным числом знаков после запятой
///
/// ```
/// # use frontend::shared::components::table::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234567.891, 2), "12,34,567.89");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    match formatted.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_indian(integer), fraction),
        None => group_indian(&formatted),
    }
}

/// Сумма с двумя знаками и символом рупии
pub fn format_money(value: f64) -> String {
    format!("₹{}", format_number_with_decimals(value, 2))
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "₹1,234.56");
        assert_eq!(format_money(1234567.89), "₹12,34,567.89");
        assert_eq!(format_money(0.0), "₹0.00");
        assert_eq!(format_money(-1234.56), "₹-1,234.56");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(123456789.0, 2), "12,34,56,789.00");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(100.0), "100");
        assert_eq!(format_number_int(100000.0), "1,00,000");
        assert_eq!(format_number_int(-10000000.0), "-1,00,00,000");
    }
}
