//! 통계 및 유틸리티 모듈
//!
//! 단계별 처리 통계 수집, 진행률 바, 포맷팅을 담당합니다.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::{Duration, Instant};

/// 건너뛴 레코드 정보
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 원본 섹션 이름 (예: "cards")
    pub section: &'static str,
    /// 섹션 내 인덱스
    pub index: usize,
    /// 건너뛴 이유
    pub reason: String,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.section, self.index, self.reason)
    }
}

/// 마이그레이션 통계 구조체
#[derive(Debug, Default)]
pub struct MigrationStats {
    /// 입력 카드 수
    pub cards_seen: usize,
    /// 변환된 Note/Card 쌍 수
    pub cards_migrated: usize,
    /// 입력 복습 로그 수
    pub revlog_seen: usize,
    /// 변환된 복습 로그 수
    pub revlog_migrated: usize,
    /// 부모 카드를 찾지 못해 버린 복습 로그 수
    pub revlog_orphaned: usize,
    /// 생성된 히스토리 버킷 수
    pub history_buckets: usize,
    /// profile/settings/aggregated_stats 행 수
    pub auxiliary_rows: usize,
    /// 키 충돌 해결 횟수
    pub key_collisions: usize,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 건너뛴 레코드 목록
    pub skipped: Vec<SkippedRecord>,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl MigrationStats {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 건너뛴 레코드 추가
    pub fn skip(&mut self, section: &'static str, index: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedRecord {
            section,
            index,
            reason: reason.into(),
        });
    }

    /// 특정 섹션에서 건너뛴 레코드 수
    pub fn skipped_in(&self, section: &str) -> usize {
        self.skipped.iter().filter(|s| s.section == section).count()
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 마이그레이션 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 카드:         {} / {}",
            "🃏".bright_cyan(),
            self.cards_migrated.to_string().green(),
            self.cards_seen
        );
        println!(
            "  {} 복습 로그:    {} / {}",
            "📝".bright_cyan(),
            self.revlog_migrated.to_string().green(),
            self.revlog_seen
        );

        if self.revlog_orphaned > 0 {
            println!(
                "  {} 고아 로그:    {}",
                "⚠️".bright_yellow(),
                self.revlog_orphaned.to_string().yellow()
            );
        }

        println!(
            "  {} 히스토리:     {}",
            "📅".bright_magenta(),
            self.history_buckets
        );
        println!(
            "  {} 부가 테이블:  {}",
            "⚙️".bright_white(),
            self.auxiliary_rows
        );
        println!(
            "  {} 키 충돌 해결: {}",
            "🔑".bright_white(),
            self.key_collisions
        );

        if self.skipped.is_empty() {
            println!("  {} 건너뜀:       {}", "✅".bright_green(), "0".green());
        } else {
            println!(
                "  {} 건너뜀:       {}",
                "❌".bright_red(),
                self.skipped.len().to_string().red()
            );
        }

        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 진행률 바 생성
///
/// `visible`이 거짓이면 아무것도 그리지 않는 숨김 바를 반환합니다.
pub fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use dexie_migrate::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.000초");
        assert_eq!(format_duration(Duration::from_secs(125)), "2분 5초");
    }

    #[test]
    fn test_skip_tracking() {
        let mut stats = MigrationStats::new();
        stats.skip("cards", 3, "id 없음");
        stats.skip("revlog", 0, "잘못된 타입");
        stats.skip("cards", 7, "객체가 아님");

        assert_eq!(stats.skipped.len(), 3);
        assert_eq!(stats.skipped_in("cards"), 2);
        assert_eq!(stats.skipped_in("profile"), 0);
        assert_eq!(stats.skipped[0].to_string(), "cards[3]: id 없음");
    }

    #[test]
    fn test_hidden_progress_bar() {
        let pb = create_progress_bar(10, false);
        assert!(pb.is_hidden());
    }
}
