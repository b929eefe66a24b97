//! Scope Options
//!
//! 스코프 옵션 및 기본값 병합

use serde::{Deserialize, Serialize};

use super::error::{RoutingError, RoutingResult};
use crate::lag::LogicalDatabase;

/// 허용되는 스코프 옵션 키
pub const SCOPE_OPTION_KEYS: [&str; 6] = [
    "failover",
    "lag_failover",
    "lag_on",
    "max_lag",
    "primary",
    "replica",
];

// ============================================================================
// ScopeOptions - 스코프 옵션
// ============================================================================

/// 스코프 옵션
///
/// 한 번의 스코프 호출에 대한 오버레이 설정입니다. 모든 필드는 선택적이며,
/// 지정하지 않은 필드는 라우터의 기본 옵션을 상속합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeOptions {
    /// 프라이머리 자동 폴백 허용 (기본 true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failover: Option<bool>,
    /// 랙 위반 시 에러 대신 프라이머리로 폴백 (기본 false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_failover: Option<bool>,
    /// 랙을 검사할 논리 데이터베이스 목록 (`None`은 기본 데이터베이스 하나)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_on: Option<Vec<LogicalDatabase>>,
    /// 최대 허용 랙, 초 단위 (`None`은 랙 검사 비활성화)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lag: Option<f64>,
    /// 읽기도 프라이머리로 강제 (기본 false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// 명시적 레플리카 선호 (기본 미지정)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica: Option<bool>,
}

impl ScopeOptions {
    /// 새 옵션 생성 (모든 필드 미지정)
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 시작
    pub fn builder() -> ScopeOptionsBuilder {
        ScopeOptionsBuilder::new()
    }

    /// JSON 값에서 옵션 생성
    ///
    /// 허용된 여섯 개 키 외의 키가 있으면 해당 키들을 모두 나열하는 설정
    /// 에러를 반환합니다. 검증은 어떤 부수 효과보다 먼저 일어납니다.
    pub fn from_json(value: &serde_json::Value) -> RoutingResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| RoutingError::configuration("Options must be a JSON object"))?;

        let unknown: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !SCOPE_OPTION_KEYS.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(RoutingError::configuration(format!(
                "Unknown options: {}",
                unknown.join(", ")
            )));
        }

        serde_json::from_value(value.clone())
            .map_err(|e| RoutingError::configuration(format!("Invalid options: {e}")))
    }

    /// 기본 옵션과 병합하여 확정 옵션 생성
    ///
    /// 지정된 필드가 기본값보다 우선하며, 양쪽 모두 미지정인 필드는 고정
    /// 폴백 (failover=true, lag_failover=false, primary=false)을 갖습니다.
    pub(crate) fn resolve(&self, defaults: &ScopeOptions) -> ResolvedOptions {
        ResolvedOptions {
            failover: self.failover.or(defaults.failover).unwrap_or(true),
            lag_failover: self.lag_failover.or(defaults.lag_failover).unwrap_or(false),
            lag_on: self.lag_on.clone().or_else(|| defaults.lag_on.clone()),
            max_lag: self.max_lag.or(defaults.max_lag),
            primary: self.primary.or(defaults.primary).unwrap_or(false),
            replica: self.replica.or(defaults.replica),
        }
    }
}

// ============================================================================
// ScopeOptionsBuilder - 스코프 옵션 빌더
// ============================================================================

/// 스코프 옵션 빌더
#[derive(Debug, Default)]
pub struct ScopeOptionsBuilder {
    options: ScopeOptions,
}

impl ScopeOptionsBuilder {
    /// 새 빌더 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 자동 폴백 허용 설정
    pub fn with_failover(mut self, failover: bool) -> Self {
        self.options.failover = Some(failover);
        self
    }

    /// 랙 폴백 설정
    pub fn with_lag_failover(mut self, lag_failover: bool) -> Self {
        self.options.lag_failover = Some(lag_failover);
        self
    }

    /// 랙 검사 대상 데이터베이스 설정
    pub fn with_lag_on(mut self, databases: Vec<LogicalDatabase>) -> Self {
        self.options.lag_on = Some(databases);
        self
    }

    /// 랙 검사 대상 데이터베이스 추가
    pub fn with_lag_on_database(mut self, database: impl Into<LogicalDatabase>) -> Self {
        self.options
            .lag_on
            .get_or_insert_with(Vec::new)
            .push(database.into());
        self
    }

    /// 최대 허용 랙 설정 (초)
    pub fn with_max_lag(mut self, seconds: f64) -> Self {
        self.options.max_lag = Some(seconds);
        self
    }

    /// 프라이머리 강제 설정
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.options.primary = Some(primary);
        self
    }

    /// 레플리카 선호 설정
    pub fn with_replica(mut self, replica: bool) -> Self {
        self.options.replica = Some(replica);
        self
    }

    /// 빌드
    pub fn build(self) -> ScopeOptions {
        self.options
    }
}

// ============================================================================
// ResolvedOptions - 확정 옵션
// ============================================================================

/// 기본값 병합이 끝난 확정 옵션
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedOptions {
    pub failover: bool,
    pub lag_failover: bool,
    pub lag_on: Option<Vec<LogicalDatabase>>,
    pub max_lag: Option<f64>,
    pub primary: bool,
    pub replica: Option<bool>,
}

impl ResolvedOptions {
    /// 확정 옵션에서 라우팅 지시자 생성
    pub(crate) fn directive(&self) -> super::directive::RoutingDirective {
        super::directive::RoutingDirective::new(self.failover, self.primary, self.replica)
    }
}

// ============================================================================
// Tests
// ============================================================================
