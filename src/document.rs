//! 문서 입출력 모듈
//!
//! 원본 JSON 문서 읽기/파싱과 결과 문서 쓰기를 담당합니다.

use memmap2::Mmap;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::cli::WriteMode;
use crate::error::{MigrateError, Result};
use crate::source::SourceDocument;

/// 이 크기 이상의 입력은 메모리 매핑으로 읽음 (10MB)
pub const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

/// 원본 문서 읽기
///
/// # Returns
/// 파싱된 문서와 입력 파일 크기(바이트)
pub fn read_source(path: &Path) -> Result<(SourceDocument, u64)> {
    if !path.exists() {
        return Err(MigrateError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let json = if file_size >= MMAP_THRESHOLD {
        parse_with_mmap(path)?
    } else {
        parse_with_reader(path)?
    };

    Ok((SourceDocument::from_value(json, path)?, file_size))
}

/// 결과 문서 쓰기
///
/// 같은 폴더의 임시 파일에 모두 쓴 뒤 대상 경로로 교체합니다. 실패하면
/// 기존 출력 파일은 그대로 남습니다.
///
/// # Returns
/// 기록한 바이트 수
pub fn write_output(path: &Path, text: &str, mode: WriteMode) -> Result<u64> {
    if mode == WriteMode::Error && path.exists() {
        return Err(MigrateError::OutputExists {
            path: path.to_path_buf(),
        });
    }

    let write_error = |e: std::io::Error| MigrateError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        writer.write_all(text.as_bytes()).map_err(write_error)?;
        writer.flush().map_err(write_error)?;
    }
    temp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(text.len() as u64)
}

/// 버퍼 리더를 사용한 JSON 파싱
fn parse_with_reader(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| MigrateError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| MigrateError::ParseError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 메모리 매핑을 사용한 JSON 파싱 (대용량 파일용)
fn parse_with_mmap(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| MigrateError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // 실행 중 입력 파일이 바뀌지 않는다고 가정
    let mmap = unsafe {
        Mmap::map(&file).map_err(|e| MigrateError::FileOpenError {
            file: path.to_path_buf(),
            reason: format!("메모리 매핑 실패: {}", e),
        })?
    };

    serde_json::from_slice(&mmap).map_err(|e| MigrateError::ParseError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, r#"{"cards": [{"id": "c1"}], "profile": {"xp": 1}}"#).unwrap();

        let (doc, size) = read_source(&path).unwrap();
        assert_eq!(doc.cards.len(), 1);
        assert!(doc.profile.is_some());
        assert_eq!(size, fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_source(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(MigrateError::InputNotFound { .. })));
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"cards": [broken"#).unwrap();

        assert!(matches!(
            read_source(&path),
            Err(MigrateError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_with_mmap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, r#"{"revlog": []}"#).unwrap();

        let value = parse_with_mmap(&path).unwrap();
        assert!(value.get("revlog").is_some());
    }

    #[test]
    fn test_write_modes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        assert_eq!(write_output(&path, "{}", WriteMode::Overwrite).unwrap(), 2);
        assert_eq!(
            write_output(&path, "{\"a\":1}", WriteMode::Overwrite).unwrap(),
            7
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}");

        let result = write_output(&path, "{}", WriteMode::Error);
        assert!(matches!(result, Err(MigrateError::OutputExists { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = TempDir::new().unwrap();
        let not_a_dir = dir.path().join("plain.txt");
        fs::write(&not_a_dir, "keep me").unwrap();

        let result = write_output(&not_a_dir.join("out.json"), "{}", WriteMode::Overwrite);
        assert!(matches!(result, Err(MigrateError::WriteError { .. })));
        assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "keep me");
    }

    #[test]
    fn test_failed_replace_keeps_existing_output() {
        let dir = TempDir::new().unwrap();
        // 비어 있지 않은 폴더는 파일로 교체할 수 없음
        let target = dir.path().join("out.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("previous.json"), "old").unwrap();

        let result = write_output(&target, "{\"new\":true}", WriteMode::Overwrite);
        assert!(matches!(result, Err(MigrateError::WriteError { .. })));
        assert_eq!(fs::read_to_string(target.join("previous.json")).unwrap(), "old");

        // 임시 파일이 남지 않음
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
