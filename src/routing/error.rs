//! Routing Error Types
//!
//! 라우팅 에러 정의

use thiserror::Error;

use crate::lag::ProbeError;

// ============================================================================
// RoutingError - 라우팅 에러
// ============================================================================

/// 라우팅 에러
#[derive(Error, Debug)]
pub enum RoutingError {
    /// 설정 에러 (알 수 없는 옵션 키 등). 어떤 상태 변이나 I/O보다 먼저
    /// 발생합니다.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 레플리카 랙이 정책을 위반했고 폴백이 요청되지 않음
    #[error("Too much lag: {0}")]
    TooMuchLag(String),

    /// "레플리카 풀 없음" 이외의 프로브 실패
    #[error("Lag probe error: {0}")]
    Probe(#[from] ProbeError),

    /// 지연 쿼리 실체화 실패
    #[error("Query error: {0}")]
    Query(String),
}

impl RoutingError {
    /// 설정 에러 생성
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 랙 초과 에러 생성
    pub fn too_much_lag(msg: impl Into<String>) -> Self {
        Self::TooMuchLag(msg.into())
    }

    /// 쿼리 에러 생성
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// 설정 에러 여부
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// 랙 초과 에러 여부
    pub fn is_too_much_lag(&self) -> bool {
        matches!(self, Self::TooMuchLag(_))
    }
}

// ============================================================================
// Result Type
// ============================================================================

/// 라우팅 결과 타입
pub type RoutingResult<T> = Result<T, RoutingError>;

// ============================================================================
// Tests
// ============================================================================
