//! Routing Context Stack
//!
//! 실행 단위별 라우팅 컨텍스트 슬롯
//!
//! 활성 라우팅 지시자는 태스크 로컬 슬롯에 저장됩니다. 슬롯은 태스크 간에
//! 절대 공유되지 않으므로 잠금이 필요 없고, 스코프 중첩 시 안쪽 지시자가
//! 바깥 지시자를 가립니다. 복원은 스코프 퓨처의 수명에 구조적으로 묶여
//! 있어서 정상 반환, 에러, 패닉, 취소 어느 경로로 빠져나가도 이전 값이
//! 돌아옵니다.

use std::cell::Cell;
use std::future::Future;

use super::directive::RoutingDirective;

tokio::task_local! {
    /// 현재 태스크의 활성 지시자 슬롯
    static ACTIVE_DIRECTIVE: Cell<Option<RoutingDirective>>;
}

/// 현재 실행 단위의 활성 지시자 조회
///
/// 활성 스코프가 없으면 (또는 태스크 로컬 저장소가 없는 컨텍스트에서
/// 호출되면) `None`을 반환합니다.
pub fn current() -> Option<RoutingDirective> {
    ACTIVE_DIRECTIVE.try_with(Cell::get).unwrap_or(None)
}

/// 지시자를 설치한 채로 퓨처 실행
///
/// 퓨처가 끝나면 (어떤 경로로든) 이전 슬롯 값이 복원됩니다. 같은 태스크에서
/// 중첩 호출하면 안쪽 지시자가 퓨처 수명 동안 바깥 지시자를 가립니다.
pub async fn scope<F>(directive: RoutingDirective, future: F) -> F::Output
where
    F: Future,
{
    ACTIVE_DIRECTIVE
        .scope(Cell::new(Some(directive)), future)
        .await
}

/// 활성 지시자에 대한 랙 폴백 변이
///
/// 활성 스코프가 없으면 아무 일도 하지 않습니다.
pub(crate) fn force_primary() {
    let _ = ACTIVE_DIRECTIVE.try_with(|slot| {
        if let Some(mut directive) = slot.get() {
            directive.force_primary();
            slot.set(Some(directive));
        }
    });
}

// ============================================================================
// Tests
// ============================================================================
