//! Read Router
//!
//! 스코프 코디네이터
//!
//! 옵션 병합, 랙 정책 평가, 컨텍스트 설치/복원, 랙 폴백을 한 호출로
//! 조율합니다.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::context;
use super::error::{RoutingError, RoutingResult};
use super::options::{ResolvedOptions, ScopeOptions};
use crate::lag::{classify, LagReading, LagVerdict, LogicalDatabase, ProbeError, ReplicaLagProbe};
use crate::metrics::{self, MetricsSink, NoopSink, LAG_ERROR_EVENT, LAG_FAILOVER_EVENT};
use crate::query::DeferredQuery;

// ============================================================================
// RouterConfig - 라우터 설정
// ============================================================================

/// 라우터 설정
///
/// 라우터 생성 이후에는 불변입니다.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// 스코프 기본 옵션 (스코프에서 지정하지 않은 필드가 상속)
    pub defaults: ScopeOptions,
    /// `lag_on` 미지정 시 랙을 검사할 기본 논리 데이터베이스
    pub default_database: LogicalDatabase,
    /// 최외곽 스코프에서 지연 쿼리를 즉시 실체화할지 여부
    pub eager_load: bool,
}

impl RouterConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 시작
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::new()
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            defaults: ScopeOptions::default(),
            default_database: LogicalDatabase::new("default"),
            eager_load: false,
        }
    }
}

// ============================================================================
// RouterConfigBuilder - 설정 빌더
// ============================================================================

/// 라우터 설정 빌더
#[derive(Debug, Default)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    /// 새 빌더 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 스코프 기본 옵션 설정
    pub fn with_defaults(mut self, defaults: ScopeOptions) -> Self {
        self.config.defaults = defaults;
        self
    }

    /// 기본 논리 데이터베이스 설정
    pub fn with_default_database(mut self, database: impl Into<LogicalDatabase>) -> Self {
        self.config.default_database = database.into();
        self
    }

    /// 즉시 실체화 설정
    pub fn with_eager_load(mut self, eager_load: bool) -> Self {
        self.config.eager_load = eager_load;
        self
    }

    /// 빌드
    pub fn build(self) -> RouterConfig {
        self.config
    }
}

// ============================================================================
// ReadRouter - 읽기 라우터
// ============================================================================

/// 읽기 라우터
///
/// 레플리카 읽기 스코프의 공개 진입점입니다. 프로세스당 하나를 만들어
/// 공유하는 것이 일반적입니다.
pub struct ReadRouter {
    /// 랙 프로브
    probe: Arc<dyn ReplicaLagProbe>,
    /// 메트릭 싱크
    metrics: Arc<dyn MetricsSink>,
    /// 라우터 설정
    config: RouterConfig,
}

impl ReadRouter {
    /// 기본 설정으로 새 라우터 생성
    pub fn new(probe: Arc<dyn ReplicaLagProbe>) -> Self {
        Self::with_config(probe, RouterConfig::default())
    }

    /// 설정으로 라우터 생성
    pub fn with_config(probe: Arc<dyn ReplicaLagProbe>, config: RouterConfig) -> Self {
        Self {
            probe,
            metrics: Arc::new(NoopSink),
            config,
        }
    }

    /// 메트릭 싱크를 포함하여 라우터 생성
    pub fn with_metrics(
        probe: Arc<dyn ReplicaLagProbe>,
        metrics: Arc<dyn MetricsSink>,
        config: RouterConfig,
    ) -> Self {
        Self {
            probe,
            metrics,
            config,
        }
    }

    /// 라우터 설정
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// 레플리카 읽기 스코프 실행
    ///
    /// 옵션을 기본값과 병합해 라우팅 지시자를 만들어 태스크 로컬 슬롯에
    /// 설치하고, 랙 정책을 평가한 뒤 본문을 실행합니다. 슬롯은 어떤 종료
    /// 경로에서도 이전 값으로 복원됩니다.
    ///
    /// 랙 위반 시 `lag_failover`가 설정되어 있으면 활성 지시자를 프라이머리
    /// 강제로 바꾸고 본문을 계속 실행하며, 아니면 본문을 실행하지 않고
    /// [`RoutingError::TooMuchLag`]로 실패합니다.
    pub async fn scope<T, F, Fut>(&self, options: ScopeOptions, body: F) -> RoutingResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let resolved = options.resolve(&self.config.defaults);
        let directive = resolved.directive();

        context::scope(directive, async move {
            self.enforce_lag_policy(&resolved).await?;
            Ok(body().await)
        })
        .await
    }

    /// 지연 쿼리 후처리가 포함된 스코프 실행
    ///
    /// [`ReadRouter::scope`]와 같지만, 본문이 반환한 값이 최외곽 스코프에서
    /// 아직 실행되지 않은 지연 쿼리라면 설정에 따라 스코프 안에서 실체화하여
    /// 쿼리가 레플리카에서 실행되도록 합니다. 즉시 실체화가 꺼져 있으면 권고
    /// 로그만 남기고 값을 그대로 반환합니다.
    pub async fn scope_query<T, F, Fut>(&self, options: ScopeOptions, body: F) -> RoutingResult<T>
    where
        T: DeferredQuery,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let resolved = options.resolve(&self.config.defaults);
        let directive = resolved.directive();
        let outermost = context::current().is_none();

        context::scope(directive, async move {
            self.enforce_lag_policy(&resolved).await?;
            let value = body().await;
            self.settle_query(value, outermost).await
        })
        .await
    }

    /// 랙 정책 평가
    ///
    /// 설정된 순서대로 각 논리 데이터베이스를 검사하고, 첫 위반에서 단락
    /// 평가합니다. 스코프당 메트릭 이벤트는 최대 한 번 발생합니다.
    async fn enforce_lag_policy(&self, resolved: &ResolvedOptions) -> RoutingResult<()> {
        let Some(max_lag) = resolved.max_lag else {
            return Ok(());
        };
        if resolved.primary {
            return Ok(());
        }

        let explicit = resolved.lag_on.is_some();
        let databases: Vec<LogicalDatabase> = match &resolved.lag_on {
            Some(databases) => databases.clone(),
            None => vec![self.config.default_database.clone()],
        };

        for database in &databases {
            let reading = match self.probe.lag(database).await {
                Ok(reading) => reading,
                // 레플리카 풀이 아예 없는 경우는 프로브 실패가 아니라
                // "레플리카 없음" 측정 결과로 취급
                Err(ProbeError::NoReplicaPool { .. }) => LagReading::NoReplicaAvailable,
                Err(err) => return Err(err.into()),
            };

            let verdict = classify(reading, max_lag);
            if verdict.is_ok() {
                continue;
            }

            let message = verdict.message(max_lag, explicit.then_some(database));
            if resolved.lag_failover {
                context::force_primary();
                tracing::warn!("{message} Falling back to the primary pool for all databases.");
                self.report_lag(LAG_FAILOVER_EVENT, &verdict, database);
                break;
            }

            self.report_lag(LAG_ERROR_EVENT, &verdict, database);
            return Err(RoutingError::too_much_lag(message));
        }

        Ok(())
    }

    /// 지연 쿼리 후처리
    async fn settle_query<T: DeferredQuery>(&self, value: T, outermost: bool) -> RoutingResult<T> {
        if outermost && value.is_deferred() && !value.is_materialized() {
            if self.config.eager_load {
                return value.materialize().await;
            }
            tracing::info!(
                "Deferred query returned from read scope; materialize it inside the scope to run on the replica"
            );
        }
        Ok(value)
    }

    /// 랙 이벤트 보고
    fn report_lag(&self, event: &str, verdict: &LagVerdict, database: &LogicalDatabase) {
        // 차단 토글은 싱크 호출 전에 확인
        if metrics::reporting_suppressed() {
            return;
        }
        self.metrics
            .record(event, verdict.metric_value(), database.name());
    }
}

impl fmt::Debug for ReadRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadRouter")
            .field("default_database", &self.config.default_database)
            .field("eager_load", &self.config.eager_load)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
