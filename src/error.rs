//! 에러 타입 정의 모듈
//!
//! 마이그레이션 실행 중 치명적인 에러만 이 타입으로 표현합니다.
//! 개별 레코드 문제는 [`crate::stats::SkippedRecord`]로 수집됩니다.

use std::path::PathBuf;
use thiserror::Error;

/// 마이그레이션에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum MigrateError {
    /// 입력 파일이 존재하지 않음
    #[error("입력 파일을 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// JSON 파싱 실패
    #[error("JSON 파싱 실패 ({file}): {reason}")]
    ParseError { file: PathBuf, reason: String },

    /// 최상위 값이 객체가 아님
    #[error("입력 문서의 최상위 값이 객체가 아닙니다 ({file})")]
    NotAnObject { file: PathBuf },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패 ({table}): {reason}")]
    SerializeError { table: String, reason: String },

    /// 출력 파일이 이미 존재 (Error 모드에서)
    #[error("출력 파일이 이미 존재합니다: {path}")]
    OutputExists { path: PathBuf },

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({path}): {reason}")]
    WriteError { path: PathBuf, reason: String },
}

/// 마이그레이션 결과 타입 별칭
pub type Result<T> = std::result::Result<T, MigrateError>;
