//! 时间处理模块
//!
//! 服务端返回的 `created_at` 格式并不固定（RFC 3339、SQL 风格时间戳或纯日期），
//! 这里统一解析为 `NaiveDate` 用于展示。
//!
//! 带时区偏移的时间先换算到本地时区（浏览器中即用户所在时区）再取日期；
//! 不带偏移的时间与纯日期按原样取日期。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

const SQL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析创建时间（按本地时区），无法识别时返回 `None`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_in(raw, &Local)
}

/// 解析创建时间，带偏移的时间换算到 `tz` 后取日期
pub fn parse_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).date_naive());
    }

    for format in SQL_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// 以 `日/月/年` 格式展示日期；无法解析时原样返回
pub fn display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%-d/%-m/%Y").to_string(),
        None => raw.to_string(),
    }
}
