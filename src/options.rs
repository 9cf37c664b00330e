//! 마이그레이션 옵션 모듈
//!
//! 실행 전체에서 공유되는 고정 상수와 사용자 설정 값을 담습니다.

/// 생성되는 모든 Note 행의 모델 ID
pub const DEFAULT_MODEL_ID: i64 = 1001;

/// 생성되는 모든 Card 행의 덱 ID
pub const DEFAULT_DECK_ID: i64 = 1;

/// 기본 소유자 태그
pub const DEFAULT_USER_ID: &str = "user_default";

/// 기본 대상 데이터베이스 이름
pub const DEFAULT_DATABASE_NAME: &str = "linguaflow-dexie";

/// 마이그레이션 옵션
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// 행에 기록될 소유자 태그
    pub user_id: String,
    /// Note 모델 ID
    pub model_id: i64,
    /// Card 덱 ID
    pub deck_id: i64,
    /// 봉투에 기록될 데이터베이스 이름
    pub database_name: String,
    /// 봉투에 기록될 데이터베이스 버전
    pub database_version: u32,
    /// Pretty 출력 여부
    pub pretty: bool,
    /// 진행률 바 표시 여부
    pub show_progress: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            model_id: DEFAULT_MODEL_ID,
            deck_id: DEFAULT_DECK_ID,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            database_version: 1,
            pretty: true,
            show_progress: false,
        }
    }
}

impl MigrateOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 소유자 태그 설정
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// 대상 데이터베이스 이름/버전 설정
    pub fn with_database(mut self, name: impl Into<String>, version: u32) -> Self {
        self.database_name = name.into();
        self.database_version = version;
        self
    }

    /// Pretty 출력 설정
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// 진행률 바 표시 설정
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
