//! Разбор и форматирование значений полей формы
//!
//! Поля форм хранятся строками (`RwSignal<String>`), в DTO уходят типизированными.

use chrono::NaiveDate;

/// Пустая строка -> `None`
pub fn opt_string(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

fn normalize_number(value: &str) -> String {
    // запятая как десятичный разделитель, пробелы-разделители тысяч
    value.trim().replace(' ', "").replace(',', ".")
}

pub fn parse_f64(label: &str, value: &str) -> Result<f64, String> {
    let v = normalize_number(value);
    if v.is_empty() {
        return Ok(0.0);
    }
    v.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("{}: '{}' is not a number", label, value.trim()))
}

pub fn parse_opt_f64(label: &str, value: &str) -> Result<Option<f64>, String> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_f64(label, value).map(Some)
    }
}

pub fn parse_i64(label: &str, value: &str) -> Result<i64, String> {
    let v = normalize_number(value);
    if v.is_empty() {
        return Ok(0);
    }
    v.parse::<i64>()
        .map_err(|_| format!("{}: '{}' is not a whole number", label, value.trim()))
}

pub fn parse_i32(label: &str, value: &str) -> Result<i32, String> {
    let n = parse_i64(label, value)?;
    i32::try_from(n).map_err(|_| format!("{}: {} is out of range", label, n))
}

/// `YYYY-MM-DD` или пусто
pub fn parse_date(label: &str, value: &str) -> Result<Option<NaiveDate>, String> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("{}: expected YYYY-MM-DD, got '{}'", label, v))
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Число для поля ввода: без хвостовых нулей
pub fn format_number(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Цена с разделителем тысяч и двумя знаками
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (int_part, frac) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    format!("{}{}.{}", sign, grouped, frac)
}

/// Список из текста: запятые и переводы строк разделяют значения
pub fn split_list(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in text.split(|c| c == ',' || c == '\n') {
        let v = part.trim();
        if !v.is_empty() && !out.iter().any(|x| x == v) {
            out.push(v.to_string());
        }
    }
    out
}

pub fn join_list(values: &[String]) -> String {
    values.join(", ")
}

/// Первая ошибка из набора результатов разбора
pub fn first_error(results: &[Result<(), String>]) -> Option<String> {
    results.iter().find_map(|r| r.clone().err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_f64("Price", " 12,50 "), Ok(12.5));
        assert_eq!(parse_f64("Price", ""), Ok(0.0));
        assert_eq!(parse_f64("Price", "1 200.5"), Ok(1200.5));
        assert!(parse_f64("Price", "abc").unwrap_err().starts_with("Price:"));
        assert_eq!(parse_opt_f64("Weight", "  "), Ok(None));
        assert_eq!(parse_opt_f64("Weight", "0.75"), Ok(Some(0.75)));
        assert_eq!(parse_i64("Qty", "-3"), Ok(-3));
        assert!(parse_i64("Qty", "1.5").is_err());
        assert!(parse_i32("Days", "99999999999").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("From", ""), Ok(None));
        assert_eq!(
            parse_date("From", "2024-03-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1))
        );
        assert!(parse_date("From", "01.03.2024").is_err());
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 3, 1)), "2024-03-01");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_format_number_and_money() {
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_money(1234567.891), "1 234 567.89");
        assert_eq!(format_money(-1234.5), "-1 234.50");
        assert_eq!(format_money(999.0), "999.00");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("10115, 10117\n10115,, 10119 "),
            vec!["10115", "10117", "10119"]
        );
        assert!(split_list(" , ").is_empty());
        assert_eq!(join_list(&split_list("a,b")), "a, b");
    }

    #[test]
    fn test_opt_string_and_first_error() {
        assert_eq!(opt_string("  "), None);
        assert_eq!(opt_string(" x "), Some("x".to_string()));
        assert_eq!(
            first_error(&[Ok(()), Err("bad".into()), Err("worse".into())]),
            Some("bad".to_string())
        );
    }
}
