//! dexie-migrate - LINGUAFLOW → DEXIE MIGRATOR
//!
//! 플래시카드 앱의 JSON 내보내기(cards, revlog, profile, settings,
//! aggregatedStats)를 Dexie bulk-import 형식의 테이블 목록 문서로 변환하는
//! 일회성 오프라인 변환 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔑 **대리 키 할당**: 생성 시각 기반 정수 키, 충돌 시 선형 탐사
//! - 🔗 **외래 키 재연결**: 복습 로그를 변환된 카드 키로 연결, 고아 로그 제거
//! - 📅 **히스토리 집계**: (날짜, 언어) 별 복습 횟수 인덱스 생성
//! - ⚙️ **부가 테이블**: profile, settings, aggregated_stats, col
//! - 📊 **상세 통계**: 단계별 처리/건너뜀 수, 입출력 용량
//!
//! # 예제
//!
//! ```bash
//! migrate export.json dexie.json
//! migrate export.json dexie.json --compact --log skipped.log
//! ```

pub mod allocator;
pub mod auxiliary;
pub mod cards;
pub mod cli;
pub mod document;
pub mod envelope;
pub mod error;
pub mod history;
pub mod migrator;
pub mod options;
pub mod revlog;
pub mod source;
pub mod stats;
pub mod target;
pub mod timestamp;

// Re-exports for convenient access
pub use allocator::IdAllocator;
pub use cli::{Args, WriteMode};
pub use envelope::{DexieExport, Tables, TABLE_NAMES};
pub use error::{MigrateError, Result};
pub use migrator::{MigrationOutput, Migrator};
pub use options::MigrateOptions;
pub use source::SourceDocument;
pub use stats::{format_bytes, MigrationStats, SkippedRecord};
