//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::options::{MigrateOptions, DEFAULT_DATABASE_NAME, DEFAULT_USER_ID};

/// 출력 파일 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// migrate CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "migrate",
    author = "YourName <your@email.com>",
    version,
    about = "LinguaFlow JSON export → Dexie bulk-import 변환 도구",
    long_about = r#"
LINGUAFLOW → DEXIE MIGRATOR
===========================

LinguaFlow 앱의 JSON 내보내기 파일(cards, revlog, profile, settings,
aggregatedStats)을 읽어 Dexie 가져오기 형식의 단일 JSON 문서로 변환합니다.

예제:
  migrate export.json dexie.json
  migrate export.json dexie.json --compact
  migrate export.json dexie.json --mode error --verbose
  migrate export.json dexie.json --log skipped.log
"#
)]
pub struct Args {
    /// 원본 JSON 내보내기 파일 경로
    pub input: PathBuf,

    /// 생성될 Dexie 가져오기 파일 경로
    pub output: PathBuf,

    /// 출력 파일 모드
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 한 줄로 압축된 JSON 출력 (기본값: 들여쓰기 2칸)
    #[arg(long)]
    pub compact: bool,

    /// 모든 행에 기록될 소유자 태그
    #[arg(long, default_value = DEFAULT_USER_ID)]
    pub user_id: String,

    /// 대상 Dexie 데이터베이스 이름
    #[arg(long, default_value = DEFAULT_DATABASE_NAME)]
    pub database_name: String,

    /// 대상 Dexie 데이터베이스 버전
    #[arg(long, default_value_t = 1)]
    pub database_version: u32,

    /// 상세 출력 모드 (건너뛴 레코드 표시)
    #[arg(short, long)]
    pub verbose: bool,

    /// 건너뛴 레코드 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 진행률 바 숨기기
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// 인자로부터 마이그레이션 옵션 생성
    pub fn to_options(&self) -> MigrateOptions {
        MigrateOptions::new()
            .with_user_id(self.user_id.clone())
            .with_database(self.database_name.clone(), self.database_version)
            .with_pretty(!self.compact)
            .with_progress(!self.no_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals_required() {
        assert!(Args::try_parse_from(["migrate"]).is_err());
        assert!(Args::try_parse_from(["migrate", "in.json"]).is_err());

        let args = Args::try_parse_from(["migrate", "in.json", "out.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.json"));
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.mode, WriteMode::Overwrite);
        assert_eq!(args.user_id, DEFAULT_USER_ID);
    }

    #[test]
    fn test_to_options() {
        let args = Args::try_parse_from([
            "migrate",
            "in.json",
            "out.json",
            "--compact",
            "--user-id",
            "u42",
            "--database-version",
            "14",
            "--no-progress",
        ])
        .unwrap();

        let options = args.to_options();
        assert!(!options.pretty);
        assert!(!options.show_progress);
        assert_eq!(options.user_id, "u42");
        assert_eq!(options.database_name, DEFAULT_DATABASE_NAME);
        assert_eq!(options.database_version, 14);
    }

    #[test]
    fn test_write_mode_parse() {
        let args =
            Args::try_parse_from(["migrate", "in.json", "out.json", "--mode", "error"]).unwrap();
        assert_eq!(args.mode, WriteMode::Error);
        assert_eq!(args.mode.to_string(), "Error");
    }
}
