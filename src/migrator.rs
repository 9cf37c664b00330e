//! 마이그레이션 실행 모듈
//!
//! 단계들을 고정된 순서로 실행합니다. 뒤 단계는 앞 단계가 할당한 키에
//! 의존하므로 순서를 바꿀 수 없습니다.
//!
//! 1. 카드/노트 변환 (키 할당 + 매핑 기록)
//! 2. 복습 로그 변환 (매핑으로 부모 카드 연결)
//! 3. 히스토리 집계
//! 4. 부가 테이블 생성
//! 5. 봉투 조립

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::allocator::IdAllocator;
use crate::auxiliary;
use crate::cards::migrate_cards;
use crate::cli::WriteMode;
use crate::document::{read_source, write_output};
use crate::envelope::Tables;
use crate::error::Result;
use crate::history::build_history;
use crate::options::MigrateOptions;
use crate::revlog::migrate_revlog;
use crate::source::SourceDocument;
use crate::stats::{create_progress_bar, MigrationStats};

/// 한 번의 실행 결과
#[derive(Debug)]
pub struct MigrationOutput {
    pub tables: Tables,
    pub stats: MigrationStats,
}

/// 원본 문서 → 대상 테이블 변환기
#[derive(Debug, Clone)]
pub struct Migrator {
    options: MigrateOptions,
    now: DateTime<Utc>,
}

impl Migrator {
    /// 현재 시각을 기준으로 하는 변환기 생성
    pub fn new(options: MigrateOptions) -> Self {
        Self::at(options, Utc::now())
    }

    /// 고정 시각을 기준으로 하는 변환기 생성
    pub fn at(options: MigrateOptions, now: DateTime<Utc>) -> Self {
        Self { options, now }
    }

    /// 문서 전체 변환
    pub fn run(&self, doc: &SourceDocument) -> MigrationOutput {
        let mut stats = MigrationStats::new();
        let mut ids = IdAllocator::new();
        let now_secs = self.now.timestamp();
        let options = &self.options;

        let pb = create_progress_bar(doc.cards.len(), options.show_progress);
        let (notes, cards) = migrate_cards(&doc.cards, &mut ids, options, now_secs, &mut stats, &pb);

        let pb = create_progress_bar(doc.revlog.len(), options.show_progress);
        let revlog = migrate_revlog(&doc.revlog, &mut ids, options, &mut stats, &pb);

        let history = build_history(&revlog, &cards, &options.user_id);
        stats.history_buckets = history.len();

        let profile = auxiliary::migrate_profile(doc.profile.as_ref(), &mut stats);
        let settings = auxiliary::migrate_settings(doc.settings.as_ref(), &mut stats);
        let aggregated_stats =
            auxiliary::migrate_aggregated_stats(&doc.aggregated_stats, options, &mut stats);
        stats.auxiliary_rows = profile.len() + settings.len() + aggregated_stats.len();

        stats.key_collisions = ids.collisions();

        MigrationOutput {
            tables: Tables {
                notes,
                cards,
                revlog,
                history,
                aggregated_stats,
                settings,
                profile,
                col: vec![auxiliary::collection_meta(now_secs)],
            },
            stats,
        }
    }

    /// 입력 파일을 읽어 변환하고 출력 파일에 기록
    ///
    /// 봉투 전체를 메모리에서 직렬화한 뒤에만 출력 파일을 만듭니다.
    pub fn migrate_file(&self, input: &Path, output: &Path, mode: WriteMode) -> Result<MigrationStats> {
        let (doc, bytes_read) = read_source(input)?;

        let MigrationOutput { tables, mut stats } = self.run(&doc);
        let text = tables.into_envelope(&self.options)?.to_json(self.options.pretty)?;

        stats.bytes_read = bytes_read;
        stats.bytes_written = write_output(output, &text, mode)?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::path::PathBuf;

    fn migrator() -> Migrator {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        Migrator::at(MigrateOptions::new(), now)
    }

    fn doc(value: serde_json::Value) -> SourceDocument {
        SourceDocument::from_value(value, &PathBuf::from("test.json")).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let output = migrator().run(&doc(json!({})));

        assert!(output.tables.notes.is_empty());
        assert!(output.tables.cards.is_empty());
        assert!(output.tables.revlog.is_empty());
        assert!(output.tables.history.is_empty());
        assert!(output.tables.profile.is_empty());
        assert!(output.tables.settings.is_empty());
        assert!(output.tables.aggregated_stats.is_empty());
        assert_eq!(output.tables.col.len(), 1);
        assert_eq!(output.tables.col[0].crt, 1_717_200_000);
    }

    #[test]
    fn test_stage_counts() {
        let output = migrator().run(&doc(json!({
            "cards": [
                {"id": "c1", "created_at": "2024-01-01T00:00:00Z", "language": "es"},
                {"id": "c2", "created_at": "2024-01-01T00:00:00Z"},
                {"state": 2}
            ],
            "revlog": [
                {"card_id": "c1", "created_at": "2024-01-02T00:00:00Z", "grade": 3},
                {"card_id": "c2", "created_at": "2024-01-02T00:00:00Z", "grade": 1},
                {"card_id": "c3", "created_at": "2024-01-02T00:00:00Z"}
            ],
            "profile": {"xp": 5},
            "settings": {},
            "aggregatedStats": [{"id": "a"}]
        })));

        let stats = &output.stats;
        assert_eq!(stats.cards_seen, 3);
        assert_eq!(stats.cards_migrated, 2);
        assert_eq!(stats.revlog_seen, 3);
        assert_eq!(stats.revlog_migrated, 2);
        assert_eq!(stats.revlog_orphaned, 1);
        assert_eq!(stats.history_buckets, 1);
        assert_eq!(stats.auxiliary_rows, 3);
        // 카드 1회 + 복습 로그 1회
        assert_eq!(stats.key_collisions, 2);
        assert_eq!(stats.skipped.len(), 1);

        let c2 = &output.tables.cards[1];
        assert_eq!(c2.id, output.tables.cards[0].id + 1);
        assert_eq!(output.tables.revlog[1].cid, c2.id);
        assert_eq!(output.tables.history[0].count, 1);
    }

    #[test]
    fn test_out_of_range_timestamps_still_counted_in_history() {
        let output = migrator().run(&doc(json!({
            "cards": [
                {"id": "a", "created_at": 1e19, "language": "es"},
                {"id": "b", "created_at": 1e19, "language": "es"}
            ],
            "revlog": [
                {"card_id": "a", "created_at": 9e15},
                {"card_id": "b", "created_at": 9e15}
            ]
        })));

        let cards = &output.tables.cards;
        assert_eq!(cards[0].id, crate::allocator::ID_EPOCH_MS + 1);
        assert_eq!(cards[1].id, crate::allocator::ID_EPOCH_MS + 2);

        let revlog = &output.tables.revlog;
        assert_eq!(revlog.len(), 2);
        assert!(revlog.iter().all(|r| r.id > 0));

        let total: u64 = output.tables.history.iter().map(|b| b.count).sum();
        assert_eq!(total, revlog.len() as u64);
    }

    #[test]
    fn test_generated_keys_for_untimed_cards() {
        let output = migrator().run(&doc(json!({
            "cards": [{"id": "a"}, {"id": "b"}]
        })));

        let ids: Vec<i64> = output.tables.cards.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                crate::allocator::ID_EPOCH_MS + 1,
                crate::allocator::ID_EPOCH_MS + 2
            ]
        );
    }
}
