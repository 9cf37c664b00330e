//! 원본 문서 타입 모듈
//!
//! LinguaFlow JSON 내보내기의 섹션과 레코드 구조를 정의합니다.
//! 모든 필드는 선택적이며, camelCase / snake_case 이름을 모두 받습니다.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use std::path::Path;

use crate::error::{MigrateError, Result};

/// 원본 문서 섹션 이름
pub const CARDS: &str = "cards";
pub const REVLOG: &str = "revlog";
pub const PROFILE: &str = "profile";
pub const SETTINGS: &str = "settings";
pub const AGGREGATED_STATS: &str = "aggregatedStats";

/// 파싱된 원본 문서
///
/// 레코드 단위로 디코딩할 수 있도록 섹션은 원시 JSON 값으로 보관합니다.
#[derive(Debug, Default, Clone)]
pub struct SourceDocument {
    pub cards: Vec<Value>,
    pub revlog: Vec<Value>,
    pub profile: Option<Value>,
    pub settings: Option<Value>,
    pub aggregated_stats: Vec<Value>,
}

impl SourceDocument {
    /// 최상위 JSON 값으로부터 문서 생성
    ///
    /// 최상위 값이 객체가 아니면 에러를 반환합니다. 배열이어야 할 섹션이
    /// 배열이 아니거나 `null`이면 빈 섹션으로 취급합니다.
    pub fn from_value(value: Value, file: &Path) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(MigrateError::NotAnObject {
                file: file.to_path_buf(),
            });
        };

        Ok(Self {
            cards: take_array(&mut map, CARDS),
            revlog: take_array(&mut map, REVLOG),
            profile: take_present(&mut map, PROFILE),
            settings: take_present(&mut map, SETTINGS),
            aggregated_stats: take_array(&mut map, AGGREGATED_STATS),
        })
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn take_present(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

/// 원본 카드 레코드
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceCard {
    pub id: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<Value>,
    #[serde(rename = "lastSynced", alias = "last_synced")]
    pub last_synced: Option<Value>,
    #[serde(rename = "dueDate", alias = "due_date")]
    pub due_date: Option<Value>,
    #[serde(deserialize_with = "lenient_i64")]
    pub state: Option<i64>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub interval: Option<i64>,
    #[serde(rename = "easeFactor", alias = "ease_factor")]
    pub ease_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub reps: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub lapses: Option<i64>,
    pub stability: Option<Number>,
    pub difficulty: Option<Number>,
    #[serde(alias = "elapsedDays")]
    pub elapsed_days: Option<Number>,
    #[serde(alias = "scheduledDays")]
    pub scheduled_days: Option<Number>,
    pub language: Option<String>,
    #[serde(rename = "targetSentence", alias = "target_sentence")]
    pub target_sentence: Option<String>,
    #[serde(rename = "nativeTranslation", alias = "native_translation")]
    pub native_translation: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "targetWord", alias = "target_word")]
    pub target_word: Option<String>,
    #[serde(rename = "targetWordTranslation", alias = "target_word_translation")]
    pub target_word_translation: Option<String>,
    #[serde(
        rename = "targetWordPartOfSpeech",
        alias = "target_word_part_of_speech"
    )]
    pub target_word_part_of_speech: Option<String>,
    #[serde(rename = "isBookmarked", alias = "is_bookmarked")]
    pub is_bookmarked: Option<bool>,
    #[serde(rename = "isLeech", alias = "is_leech")]
    pub is_leech: Option<bool>,
}

impl SourceCard {
    /// 학습 상태 코드
    ///
    /// `state`가 없으면 앱의 `status` 문자열에서 유도하고, 둘 다 없으면 0(new).
    pub fn state_code(&self) -> i64 {
        self.state
            .or_else(|| self.status.as_deref().map(status_to_state))
            .unwrap_or(0)
    }
}

/// 앱의 카드 상태 문자열을 FSRS 상태 코드로 변환
pub fn status_to_state(status: &str) -> i64 {
    match status.trim().to_ascii_lowercase().as_str() {
        "learning" => 1,
        "review" | "known" => 2,
        "relearning" => 3,
        _ => 0,
    }
}

/// 원본 복습 로그 레코드
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceRevlogEntry {
    #[serde(alias = "cardId")]
    pub card_id: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<Value>,
    #[serde(deserialize_with = "lenient_i64")]
    pub grade: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub state: Option<i64>,
    #[serde(alias = "scheduledDays", deserialize_with = "lenient_i64")]
    pub scheduled_days: Option<i64>,
}

/// 원본 프로필 (단일 객체)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub xp: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub points: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub level: Option<i64>,
    #[serde(alias = "languageLevel")]
    pub language_level: Option<String>,
    #[serde(alias = "initialDeckGenerated")]
    pub initial_deck_generated: Option<bool>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<Value>,
    #[serde(alias = "updatedAt")]
    pub updated_at: Option<Value>,
}

/// 원본 설정 (단일 객체)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    #[serde(rename = "geminiApiKey", alias = "gemini_api_key")]
    pub gemini_api_key: Option<String>,
    pub tts: Option<SourceTtsSettings>,
}

/// 설정 내부의 TTS 하위 객체
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceTtsSettings {
    #[serde(rename = "googleApiKey", alias = "google_api_key")]
    pub google_api_key: Option<String>,
}

/// 원본 집계 통계 레코드
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceAggregatedStat {
    pub id: Option<String>,
    pub language: Option<String>,
    pub metric: Option<String>,
    pub value: Option<Value>,
    #[serde(alias = "updatedAt")]
    pub updated_at: Option<Value>,
}

/// 정수 필드를 관대하게 역직렬화
///
/// 실수는 버림으로, 숫자 문자열은 파싱해서 받습니다. 그 외 값은 타입 에러.
fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(|f| Some(f as i64))
            .map_err(|_| D::Error::custom(format!("정수가 아닌 값: {s:?}"))),
        Some(other) => Err(D::Error::custom(format!("정수가 아닌 값: {other}"))),
    }
}
