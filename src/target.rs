//! 대상 테이블 행 타입 모듈
//!
//! Dexie 가져오기 형식의 각 테이블 행 구조를 정의합니다.
//! 필드 이름은 대상 데이터베이스 스키마를 그대로 따릅니다.

use serde::Serialize;
use serde_json::{Number, Value};

/// notes 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: i64,
    /// 원본 카드 UUID
    pub guid: String,
    pub mid: i64,
    /// 수정 시각 (초)
    #[serde(rename = "mod")]
    pub modified: i64,
    pub usn: i64,
    pub tags: String,
    pub flds: String,
    pub sfld: String,
    pub csum: i64,
    pub language: Option<String>,
    pub user_id: String,
}

/// cards 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: i64,
    pub nid: i64,
    pub did: i64,
    pub ord: i64,
    #[serde(rename = "mod")]
    pub modified: i64,
    pub usn: i64,
    #[serde(rename = "type")]
    pub card_type: i64,
    pub queue: i64,
    pub due: i64,
    pub ivl: i64,
    pub factor: i64,
    pub reps: i64,
    pub lapses: i64,
    pub left: i64,
    pub odue: i64,
    pub odid: i64,

    // FSRS
    pub stability: Option<Number>,
    pub difficulty: Option<Number>,
    pub elapsed_days: Option<Number>,
    pub scheduled_days: Option<Number>,
    pub state: i64,

    pub language: Option<String>,
    #[serde(rename = "isBookmarked")]
    pub is_bookmarked: bool,
    #[serde(rename = "isLeech")]
    pub is_leech: bool,
    pub user_id: String,

    pub target_sentence: Option<String>,
    pub native_translation: Option<String>,
    pub notes: Option<String>,
    pub target_word: Option<String>,
    pub target_word_translation: Option<String>,
    pub target_word_part_of_speech: Option<String>,
    pub tags: String,
    pub created_at: i64,
}

/// revlog 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevlogEntry {
    /// 복습 시각 (밀리초)
    pub id: i64,
    pub cid: i64,
    pub usn: i64,
    pub ease: i64,
    pub ivl: i64,
    #[serde(rename = "lastIvl")]
    pub last_ivl: i64,
    pub factor: i64,
    pub time: i64,
    #[serde(rename = "type")]
    pub review_type: i64,
    pub user_id: String,
}

/// history 테이블 행 (복합 키: date + language)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryBucket {
    pub date: String,
    pub language: String,
    pub user_id: String,
    pub count: u64,
}

/// profile 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub xp: i64,
    pub points: i64,
    pub level: i64,
    pub language_level: String,
    pub initial_deck_generated: bool,
    pub created_at: Option<Value>,
    pub updated_at: Option<Value>,
}

/// settings 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub id: String,
    #[serde(rename = "geminiApiKey")]
    pub gemini_api_key: Option<String>,
    #[serde(rename = "googleTtsApiKey")]
    pub google_tts_api_key: String,
}

/// aggregated_stats 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedStat {
    pub id: String,
    pub language: Option<String>,
    pub metric: Option<String>,
    pub value: Option<Value>,
    pub updated_at: Option<Value>,
    pub user_id: String,
}

/// col 테이블 행 (컬렉션 메타데이터)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionMeta {
    pub id: i64,
    pub crt: i64,
    #[serde(rename = "mod")]
    pub modified: i64,
    pub scm: i64,
    pub ver: i64,
    pub conf: String,
    pub models: String,
    pub decks: String,
    pub dconf: String,
    pub tags: String,
}
