//! 카드/노트 변환 모듈
//!
//! 원본 카드 하나를 키를 공유하는 Note 행과 Card 행 한 쌍으로 변환합니다.

use indicatif::ProgressBar;
use serde::Deserialize;
use serde_json::Value;

use crate::allocator::IdAllocator;
use crate::options::MigrateOptions;
use crate::source::{SourceCard, CARDS};
use crate::stats::MigrationStats;
use crate::target::{Card, Note};
use crate::timestamp;

/// 기본 ease factor (permille 변환 전)
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// 대상 형식의 필드 구분자
pub const FIELD_SEPARATOR: &str = "\x1f";

/// 카드 섹션 전체 변환
///
/// 디코딩할 수 없거나 `id`가 없는 레코드는 통계에 기록하고 건너뜁니다.
pub fn migrate_cards(
    raw_cards: &[Value],
    ids: &mut IdAllocator,
    options: &MigrateOptions,
    now_secs: i64,
    stats: &mut MigrationStats,
    pb: &ProgressBar,
) -> (Vec<Note>, Vec<Card>) {
    let mut notes = Vec::with_capacity(raw_cards.len());
    let mut cards = Vec::with_capacity(raw_cards.len());
    stats.cards_seen = raw_cards.len();

    for (index, raw) in raw_cards.iter().enumerate() {
        pb.inc(1);

        let source = match SourceCard::deserialize(raw) {
            Ok(source) => source,
            Err(e) => {
                stats.skip(CARDS, index, e.to_string());
                continue;
            }
        };

        match transform_card(&source, ids, options, now_secs) {
            Some((note, card)) => {
                notes.push(note);
                cards.push(card);
            }
            None => stats.skip(CARDS, index, "id 필드가 없습니다"),
        }
    }

    pb.finish_and_clear();
    stats.cards_migrated = cards.len();
    (notes, cards)
}

/// 원본 카드 하나를 Note/Card 쌍으로 변환
///
/// `id`가 없거나 비어 있으면 `None`. 성공하면 원본 ID → 키 매핑을
/// 할당기에 기록합니다.
pub fn transform_card(
    source: &SourceCard,
    ids: &mut IdAllocator,
    options: &MigrateOptions,
    now_secs: i64,
) -> Option<(Note, Card)> {
    let original_id = source.id.as_deref().filter(|id| !id.is_empty())?;

    let created_ms = source.created_at.as_ref().and_then(timestamp::to_millis);
    let key = ids.claim_card_key(created_ms);
    ids.record(original_id, key);

    let modified = timestamp::to_seconds(source.last_synced.as_ref()).unwrap_or(now_secs);
    let state = source.state_code();

    let note = Note {
        id: key,
        guid: original_id.to_string(),
        mid: options.model_id,
        modified,
        usn: -1,
        tags: String::new(),
        flds: join_fields(source),
        sfld: source.target_sentence.clone().unwrap_or_default(),
        csum: 0,
        language: source.language.clone(),
        user_id: options.user_id.clone(),
    };

    let card = Card {
        id: key,
        nid: key,
        did: options.deck_id,
        ord: 0,
        modified,
        usn: -1,
        card_type: state,
        // new(0) 카드는 항상 queue 0
        queue: state,
        due: timestamp::to_seconds(source.due_date.as_ref()).unwrap_or(0),
        ivl: source.interval.unwrap_or(0),
        factor: ease_to_permille(source.ease_factor.unwrap_or(DEFAULT_EASE_FACTOR)),
        reps: source.reps.unwrap_or(0),
        lapses: source.lapses.unwrap_or(0),
        left: 0,
        odue: 0,
        odid: 0,
        stability: source.stability.clone(),
        difficulty: source.difficulty.clone(),
        elapsed_days: source.elapsed_days.clone(),
        scheduled_days: source.scheduled_days.clone(),
        state,
        language: source.language.clone(),
        is_bookmarked: source.is_bookmarked.unwrap_or(false),
        is_leech: source.is_leech.unwrap_or(false),
        user_id: options.user_id.clone(),
        target_sentence: source.target_sentence.clone(),
        native_translation: source.native_translation.clone(),
        notes: source.notes.clone(),
        target_word: source.target_word.clone(),
        target_word_translation: source.target_word_translation.clone(),
        target_word_part_of_speech: source.target_word_part_of_speech.clone(),
        tags: String::new(),
        created_at: key,
    };

    Some((note, card))
}

/// ease factor를 permille 정수로 변환 (버림)
pub fn ease_to_permille(ease: f64) -> i64 {
    (ease * 1000.0) as i64
}

/// 문장, 번역, 메모를 대상 형식의 `flds` 문자열로 결합
fn join_fields(source: &SourceCard) -> String {
    [
        source.target_sentence.as_deref(),
        source.native_translation.as_deref(),
        source.notes.as_deref(),
    ]
    .map(Option::unwrap_or_default)
    .join(FIELD_SEPARATOR)
}
