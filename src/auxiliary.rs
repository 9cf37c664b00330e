//! 부가 테이블 생성 모듈
//!
//! profile, settings, aggregated_stats 섹션을 기본값을 채워 복사하고,
//! 대상 형식이 요구하는 col 메타데이터 행을 하나 만듭니다.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::options::MigrateOptions;
use crate::source::{
    SourceAggregatedStat, SourceProfile, SourceSettings, AGGREGATED_STATS, PROFILE, SETTINGS,
};
use crate::stats::MigrationStats;
use crate::target::{AggregatedStat, CollectionMeta, Profile, Settings};

/// 설정 행의 고정 ID
pub const SETTINGS_ID: &str = "global_settings";

/// 빈 설정 블롭
const EMPTY_BLOB: &str = "{}";

/// profile 섹션 변환 (섹션이 없으면 빈 테이블)
pub fn migrate_profile(raw: Option<&Value>, stats: &mut MigrationStats) -> Vec<Profile> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match SourceProfile::deserialize(raw) {
        Ok(p) => vec![Profile {
            id: p.id.unwrap_or_else(|| "default".to_string()),
            username: p.username.unwrap_or_else(|| "User".to_string()),
            xp: p.xp.unwrap_or(0),
            points: p.points.unwrap_or(0),
            level: p.level.unwrap_or(1),
            language_level: p.language_level.unwrap_or_else(|| "A1".to_string()),
            initial_deck_generated: p.initial_deck_generated.unwrap_or(false),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }],
        Err(e) => {
            stats.skip(PROFILE, 0, e.to_string());
            Vec::new()
        }
    }
}

/// settings 섹션 변환
///
/// `tts.googleApiKey`는 최상위 `googleTtsApiKey`로 평탄화됩니다.
pub fn migrate_settings(raw: Option<&Value>, stats: &mut MigrationStats) -> Vec<Settings> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match SourceSettings::deserialize(raw) {
        Ok(s) => vec![Settings {
            id: SETTINGS_ID.to_string(),
            gemini_api_key: s.gemini_api_key,
            google_tts_api_key: s.tts.and_then(|t| t.google_api_key).unwrap_or_default(),
        }],
        Err(e) => {
            stats.skip(SETTINGS, 0, e.to_string());
            Vec::new()
        }
    }
}

/// aggregatedStats 섹션 변환
pub fn migrate_aggregated_stats(
    raw: &[Value],
    options: &MigrateOptions,
    stats: &mut MigrationStats,
) -> Vec<AggregatedStat> {
    let mut rows = Vec::with_capacity(raw.len());

    for (index, value) in raw.iter().enumerate() {
        match SourceAggregatedStat::deserialize(value) {
            Ok(stat) => rows.push(AggregatedStat {
                id: stat.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                language: stat.language,
                metric: stat.metric,
                value: stat.value,
                updated_at: stat.updated_at,
                user_id: options.user_id.clone(),
            }),
            Err(e) => stats.skip(AGGREGATED_STATS, index, e.to_string()),
        }
    }

    rows
}

/// col 메타데이터 행 생성
pub fn collection_meta(now_secs: i64) -> CollectionMeta {
    CollectionMeta {
        id: 1,
        crt: now_secs,
        modified: now_secs,
        scm: now_secs,
        ver: 1,
        conf: EMPTY_BLOB.to_string(),
        models: EMPTY_BLOB.to_string(),
        decks: EMPTY_BLOB.to_string(),
        dconf: EMPTY_BLOB.to_string(),
        tags: EMPTY_BLOB.to_string(),
    }
}
