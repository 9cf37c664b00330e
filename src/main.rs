//! dexie-migrate - LINGUAFLOW → DEXIE MIGRATOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use dexie_migrate::{
    cli::{Args, WriteMode},
    stats::{MigrationStats, SkippedRecord},
    Migrator,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 입력 파일 확인
    validate_input(&args)?;

    // 헤더 출력
    print_header(&args);

    let migrator = Migrator::new(args.to_options());

    println!("\n{}", "⚡ 변환 중...".bright_cyan());
    let stats = migrator
        .migrate_file(&args.input, &args.output, args.mode)
        .context("마이그레이션 실패")?;

    print_stages(&stats);

    // 건너뛴 레코드 출력
    print_skipped(&stats.skipped, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_skip_log(log_path, &stats.skipped)?;
    }

    // 통계 출력
    stats.print_summary();

    println!("\n{} 저장 완료: {:?}\n", "✅".bright_green(), args.output);

    Ok(())
}

/// 입력 경로 유효성 검사
fn validate_input(args: &Args) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("입력 파일이 존재하지 않습니다: {:?}", args.input);
    }

    if !args.input.is_file() {
        anyhow::bail!("입력 경로가 파일이 아닙니다: {:?}", args.input);
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 LINGUAFLOW → DEXIE MIGRATOR".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), args.input);
    println!("  {} 출력 파일: {:?}", "📄".bright_green(), args.output);
    println!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);
    println!(
        "  {} 데이터베이스: {} v{}",
        "🗄️".bright_magenta(),
        args.database_name,
        args.database_version
    );

    if args.mode == WriteMode::Error {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "기존 출력 파일이 있으면 중단합니다".yellow()
        );
    }

    if args.compact {
        println!("  {} {}", "✨".bright_magenta(), "압축 출력 모드".magenta());
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 단계별 처리 수 출력
fn print_stages(stats: &MigrationStats) {
    println!(
        "  {} 카드 {}개 처리",
        "🃏".bright_white(),
        stats.cards_seen.to_string().bright_green()
    );
    println!(
        "  {} 복습 로그 {}개 처리",
        "📝".bright_white(),
        stats.revlog_seen.to_string().bright_green()
    );
    println!(
        "  {} 히스토리 항목 {}개 생성",
        "📅".bright_white(),
        stats.history_buckets.to_string().bright_green()
    );
    println!(
        "  {} 설정/프로필/통계 {}행 이전",
        "⚙️".bright_white(),
        stats.auxiliary_rows.to_string().bright_green()
    );
}

/// 건너뛴 레코드 목록 출력
fn print_skipped(skipped: &[SkippedRecord], verbose: bool) {
    if skipped.is_empty() {
        return;
    }

    println!(
        "\n{} 건너뛴 레코드: {}",
        "❌".bright_red(),
        skipped.len().to_string().red()
    );
    if verbose {
        for record in skipped {
            println!("  {} {}", "•".red(), record.to_string().dimmed());
        }
    }
}

/// 건너뛴 레코드 로그 파일 작성
fn write_skip_log(log_path: &Path, skipped: &[SkippedRecord]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("로그 파일 생성 실패: {:?}", log_path))?;

    writeln!(log_file, "dexie-migrate 건너뜀 로그")?;
    writeln!(log_file, "생성 시간: {}", chrono::Utc::now().to_rfc3339())?;
    writeln!(log_file, "총 건너뜀 수: {}", skipped.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for record in skipped {
        writeln!(log_file, "\n섹션: {} #{}", record.section, record.index)?;
        writeln!(log_file, "이유: {}", record.reason)?;
    }

    println!("\n{} 건너뜀 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "migrate",
            temp_dir.path().to_str().unwrap(),
            "out.json",
        ])
        .unwrap();

        assert!(validate_input(&args).is_err());
    }

    #[test]
    fn test_write_skip_log() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("skipped.log");
        let skipped = vec![SkippedRecord {
            section: "cards",
            index: 2,
            reason: "id 필드가 없습니다".to_string(),
        }];

        write_skip_log(&log_path, &skipped).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("총 건너뜀 수: 1"));
        assert!(content.contains("섹션: cards #2"));
    }
}
