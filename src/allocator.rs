//! 식별자 할당 모듈
//!
//! 대리 키(surrogate key) 생성과 원본 ID → 대리 키 매핑을 담당합니다.
//! 한 번의 실행에 하나의 [`IdAllocator`]만 사용합니다.

use std::collections::{HashMap, HashSet};

/// 생성 키의 기준 epoch (2023-01-01T00:00:00Z, 밀리초)
pub const ID_EPOCH_MS: i64 = 1_672_531_200_000;

/// 대리 키 할당기
///
/// Note/Card 키 공간과 Revlog 키 공간을 따로 관리합니다.
/// Card와 짝을 이루는 Note는 같은 키를 공유합니다.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counter: i64,
    mapping: HashMap<String, i64>,
    card_keys: HashSet<i64>,
    revlog_keys: HashSet<i64>,
    collisions: usize,
}

impl IdAllocator {
    /// 새 할당기 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 키 반환 (단조 증가)
    ///
    /// # Examples
    /// ```
    /// use dexie_migrate::allocator::{IdAllocator, ID_EPOCH_MS};
    ///
    /// let mut ids = IdAllocator::new();
    /// assert_eq!(ids.allocate(), ID_EPOCH_MS + 1);
    /// assert_eq!(ids.allocate(), ID_EPOCH_MS + 2);
    /// ```
    pub fn allocate(&mut self) -> i64 {
        self.counter += 1;
        ID_EPOCH_MS + self.counter
    }

    /// 원본 ID와 대리 키 매핑 기록
    pub fn record(&mut self, source_id: impl Into<String>, key: i64) {
        self.mapping.insert(source_id.into(), key);
    }

    /// 원본 ID에 매핑된 대리 키 조회
    pub fn resolve(&self, source_id: &str) -> Option<i64> {
        self.mapping.get(source_id).copied()
    }

    /// Note/Card 키 확보
    ///
    /// 타임스탬프가 있으면 그 값을, 없으면 [`allocate`](Self::allocate) 값을
    /// 후보로 삼고, 이미 쓰인 키라면 1씩 올려 가장 가까운 빈 키를 사용합니다.
    pub fn claim_card_key(&mut self, timestamp_ms: Option<i64>) -> i64 {
        let candidate = timestamp_ms.unwrap_or_else(|| self.allocate());
        let key = next_free_key(&self.card_keys, candidate, &mut self.collisions);
        self.card_keys.insert(key);
        key
    }

    /// Revlog 키 확보 (Revlog 키 공간 안에서만 충돌 검사)
    pub fn claim_revlog_key(&mut self, timestamp_ms: Option<i64>) -> i64 {
        let candidate = timestamp_ms.unwrap_or_else(|| self.allocate());
        let key = next_free_key(&self.revlog_keys, candidate, &mut self.collisions);
        self.revlog_keys.insert(key);
        key
    }

    /// 선형 탐사로 해결한 충돌 횟수
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// 기록된 매핑 수
    pub fn mapped_count(&self) -> usize {
        self.mapping.len()
    }
}

/// 후보부터 1씩 올려 비어 있는 가장 작은 키를 찾음 (i64 끝에 닿으면 epoch부터 다시)
fn next_free_key(used: &HashSet<i64>, candidate: i64, collisions: &mut usize) -> i64 {
    let mut key = candidate;
    while used.contains(&key) {
        key = key.checked_add(1).unwrap_or(ID_EPOCH_MS);
        *collisions += 1;
    }
    key
}
