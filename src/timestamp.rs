//! 타임스탬프 변환 모듈
//!
//! 원본 문서의 시간 값을 epoch 밀리초로, 밀리초를 날짜 문자열로 변환합니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// 히스토리 버킷 날짜 형식
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// JSON 값을 epoch 밀리초로 변환
///
/// 문자열은 RFC 3339, 시간대 없는 ISO 날짜시간(UTC로 간주), `YYYY-MM-DD` 순으로
/// 시도하고, 숫자는 이미 밀리초로 간주합니다. 0 이하이거나, 해석할 수 없거나,
/// 날짜로 표현할 수 없는 범위면 `None`.
///
/// # Examples
/// ```
/// use dexie_migrate::timestamp::to_millis;
/// use serde_json::json;
///
/// assert_eq!(to_millis(&json!("2024-01-01T00:00:00Z")), Some(1704067200000));
/// assert_eq!(to_millis(&json!("not a date")), None);
/// ```
pub fn to_millis(value: &Value) -> Option<i64> {
    let millis = match value {
        Value::String(s) => parse_iso(s.trim())?,
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        _ => return None,
    };

    let representable = DateTime::<Utc>::from_timestamp_millis(millis).is_some();
    (millis > 0 && representable).then_some(millis)
}

/// 선택적 JSON 값을 epoch 초로 변환
pub fn to_seconds(value: Option<&Value>) -> Option<i64> {
    value.and_then(to_millis).map(|ms| ms / 1000)
}

/// 밀리초 타임스탬프를 UTC 기준 `YYYY-MM-DD` 문자열로 변환
pub fn date_string(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.format(DATE_FORMAT).to_string())
}

fn parse_iso(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}
