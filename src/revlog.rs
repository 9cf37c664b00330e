//! 복습 로그 변환 모듈
//!
//! 원본 복습 이벤트를 revlog 행으로 변환하고, 부모 카드 키를 할당기의
//! 매핑으로 다시 연결합니다. 부모 카드가 없는 로그는 조용히 버립니다.

use indicatif::ProgressBar;
use serde::Deserialize;
use serde_json::Value;

use crate::allocator::IdAllocator;
use crate::options::MigrateOptions;
use crate::source::{SourceRevlogEntry, REVLOG};
use crate::stats::MigrationStats;
use crate::target::RevlogEntry;
use crate::timestamp;

/// 복습 로그 섹션 전체 변환
pub fn migrate_revlog(
    raw_entries: &[Value],
    ids: &mut IdAllocator,
    options: &MigrateOptions,
    stats: &mut MigrationStats,
    pb: &ProgressBar,
) -> Vec<RevlogEntry> {
    let mut rows = Vec::with_capacity(raw_entries.len());
    stats.revlog_seen = raw_entries.len();

    for (index, raw) in raw_entries.iter().enumerate() {
        pb.inc(1);

        let source = match SourceRevlogEntry::deserialize(raw) {
            Ok(source) => source,
            Err(e) => {
                stats.skip(REVLOG, index, e.to_string());
                continue;
            }
        };

        match transform_revlog(&source, ids, options) {
            Some(row) => rows.push(row),
            None => stats.revlog_orphaned += 1,
        }
    }

    pb.finish_and_clear();
    stats.revlog_migrated = rows.len();
    rows
}

/// 복습 로그 하나 변환
///
/// 부모 카드가 변환되지 않았으면 `None`. 키는 복습 시각(밀리초)을 우선
/// 사용하고, 같은 밀리초가 이미 쓰였으면 1씩 올립니다.
pub fn transform_revlog(
    source: &SourceRevlogEntry,
    ids: &mut IdAllocator,
    options: &MigrateOptions,
) -> Option<RevlogEntry> {
    let cid = source
        .card_id
        .as_deref()
        .and_then(|card_id| ids.resolve(card_id))?;

    let created_ms = source.created_at.as_ref().and_then(timestamp::to_millis);
    let id = ids.claim_revlog_key(created_ms);

    Some(RevlogEntry {
        id,
        cid,
        usn: -1,
        ease: source.grade.unwrap_or(0),
        ivl: source.scheduled_days.unwrap_or(0),
        last_ivl: 0,
        factor: 0,
        time: 0,
        review_type: source.state.unwrap_or(0),
        user_id: options.user_id.clone(),
    })
}
