//! 히스토리 집계 모듈
//!
//! 변환된 복습 로그를 (날짜, 언어) 별 복습 횟수로 집계합니다.

use std::collections::{BTreeMap, HashMap};

use crate::target::{Card, HistoryBucket, RevlogEntry};
use crate::timestamp;

/// 복습 로그로부터 히스토리 버킷 생성
///
/// 카드 언어를 알 수 없는 로그는 어느 버킷에도 들어가지 않습니다.
/// 결과는 (날짜, 언어) 순으로 정렬됩니다.
pub fn build_history(revlog: &[RevlogEntry], cards: &[Card], user_id: &str) -> Vec<HistoryBucket> {
    let languages: HashMap<i64, &str> = cards
        .iter()
        .filter_map(|card| {
            card.language
                .as_deref()
                .filter(|lang| !lang.is_empty())
                .map(|lang| (card.id, lang))
        })
        .collect();

    let mut counts: BTreeMap<(String, &str), u64> = BTreeMap::new();
    for entry in revlog {
        let Some(language) = languages.get(&entry.cid) else {
            continue;
        };
        let Some(date) = timestamp::date_string(entry.id) else {
            continue;
        };
        *counts.entry((date, *language)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((date, language), count)| HistoryBucket {
            date,
            language: language.to_string(),
            user_id: user_id.to_string(),
            count,
        })
        .collect()
}
