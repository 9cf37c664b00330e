//! 내보내기 봉투 모듈
//!
//! 모든 테이블을 Dexie 가져오기 형식의 테이블 목록으로 감싸고 직렬화합니다.

use serde::Serialize;
use serde_json::Value;

use crate::error::{MigrateError, Result};
use crate::options::MigrateOptions;
use crate::target::{
    AggregatedStat, Card, CollectionMeta, HistoryBucket, Note, Profile, RevlogEntry, Settings,
};

/// 봉투 형식 이름
pub const FORMAT_NAME: &str = "dexie";

/// 봉투 형식 버전
pub const FORMAT_VERSION: u32 = 1;

/// 항상 출력되는 테이블 이름 (출력 순서)
pub const TABLE_NAMES: [&str; 8] = [
    "notes",
    "cards",
    "revlog",
    "history",
    "aggregated_stats",
    "settings",
    "profile",
    "col",
];

/// 변환된 전체 테이블 묶음
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub notes: Vec<Note>,
    pub cards: Vec<Card>,
    pub revlog: Vec<RevlogEntry>,
    pub history: Vec<HistoryBucket>,
    pub aggregated_stats: Vec<AggregatedStat>,
    pub settings: Vec<Settings>,
    pub profile: Vec<Profile>,
    pub col: Vec<CollectionMeta>,
}

/// 최상위 내보내기 문서
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DexieExport {
    pub format_name: String,
    pub format_version: u32,
    pub data: DexieDatabase,
}

/// 데이터베이스 설명과 테이블 목록
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DexieDatabase {
    pub database_name: String,
    pub database_version: u32,
    pub tables: Vec<Value>,
    pub data: Vec<TableExport>,
}

/// 테이블 하나의 행 목록
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableExport {
    pub table_name: String,
    pub inbound: bool,
    pub rows: Vec<Value>,
}

impl Tables {
    /// 봉투로 감싸기
    ///
    /// 행이 없는 테이블도 빠짐없이 포함됩니다.
    pub fn into_envelope(self, options: &MigrateOptions) -> Result<DexieExport> {
        let data = vec![
            table(TABLE_NAMES[0], &self.notes)?,
            table(TABLE_NAMES[1], &self.cards)?,
            table(TABLE_NAMES[2], &self.revlog)?,
            table(TABLE_NAMES[3], &self.history)?,
            table(TABLE_NAMES[4], &self.aggregated_stats)?,
            table(TABLE_NAMES[5], &self.settings)?,
            table(TABLE_NAMES[6], &self.profile)?,
            table(TABLE_NAMES[7], &self.col)?,
        ];

        Ok(DexieExport {
            format_name: FORMAT_NAME.to_string(),
            format_version: FORMAT_VERSION,
            data: DexieDatabase {
                database_name: options.database_name.clone(),
                database_version: options.database_version,
                tables: Vec::new(),
                data,
            },
        })
    }
}

impl DexieExport {
    /// JSON 텍스트로 직렬화
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .map_err(|e| MigrateError::SerializeError {
            table: "envelope".to_string(),
            reason: e.to_string(),
        })
    }
}

fn table<T: Serialize>(name: &str, rows: &[T]) -> Result<TableExport> {
    let rows = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| MigrateError::SerializeError {
            table: name.to_string(),
            reason: e.to_string(),
        })?;

    Ok(TableExport {
        table_name: name.to_string(),
        inbound: true,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auxiliary::collection_meta;
    use serde_json::json;

    #[test]
    fn test_empty_tables_all_present() {
        let envelope = Tables::default()
            .into_envelope(&MigrateOptions::new())
            .unwrap();

        let names: Vec<&str> = envelope
            .data
            .data
            .iter()
            .map(|t| t.table_name.as_str())
            .collect();
        assert_eq!(names, TABLE_NAMES);
        assert!(envelope.data.data.iter().all(|t| t.inbound && t.rows.is_empty()));
    }

    #[test]
    fn test_envelope_shape() {
        let tables = Tables {
            col: vec![collection_meta(10)],
            ..Default::default()
        };
        let envelope = tables
            .into_envelope(&MigrateOptions::new().with_database("db", 2))
            .unwrap();
        let value: Value = serde_json::from_str(&envelope.to_json(false).unwrap()).unwrap();

        assert_eq!(value["formatName"], json!("dexie"));
        assert_eq!(value["formatVersion"], json!(1));
        assert_eq!(value["data"]["databaseName"], json!("db"));
        assert_eq!(value["data"]["databaseVersion"], json!(2));
        assert_eq!(value["data"]["tables"], json!([]));
        assert_eq!(value["data"]["data"][7]["tableName"], json!("col"));
        assert_eq!(value["data"]["data"][7]["inbound"], json!(true));
        assert_eq!(value["data"]["data"][7]["rows"][0]["mod"], json!(10));
    }

    #[test]
    fn test_pretty_has_newlines() {
        let envelope = Tables::default()
            .into_envelope(&MigrateOptions::new())
            .unwrap();
        assert!(envelope.to_json(true).unwrap().contains('\n'));
        assert!(!envelope.to_json(false).unwrap().contains('\n'));
    }
}
