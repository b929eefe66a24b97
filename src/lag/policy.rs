//! Lag Policy Evaluator
//!
//! 랙 정책 평가기
//!
//! 측정 결과와 임계값으로부터 판정을 내리는 순수 함수입니다.

use super::probe::{LagReading, LogicalDatabase};
use crate::metrics::UNKNOWN_LAG;

// ============================================================================
// LagVerdict - 랙 판정
// ============================================================================

/// 랙 판정
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LagVerdict {
    /// 랙이 임계값 이내
    Ok,
    /// 복제가 멈춤
    Stopped,
    /// 검사할 레플리카 없음
    Unavailable,
    /// 측정된 랙이 임계값 초과
    OverThreshold(f64),
}

/// 측정 결과 분류
///
/// 임계값과 정확히 같은 랙은 허용입니다 (포함 경계).
pub fn classify(reading: LagReading, max_lag: f64) -> LagVerdict {
    match reading {
        LagReading::ReplicationStopped => LagVerdict::Stopped,
        LagReading::NoReplicaAvailable => LagVerdict::Unavailable,
        LagReading::Measured(seconds) if seconds > max_lag => LagVerdict::OverThreshold(seconds),
        LagReading::Measured(_) => LagVerdict::Ok,
    }
}

impl LagVerdict {
    /// 허용 판정 여부
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// 위반 판정 여부
    pub fn is_violation(&self) -> bool {
        !self.is_ok()
    }

    /// 메트릭 이벤트에 기록할 값
    ///
    /// 측정값이 없는 위반 (멈춤, 레플리카 없음)은 [`UNKNOWN_LAG`] 센티널로
    /// 기록됩니다.
    pub fn metric_value(&self) -> f64 {
        match self {
            Self::Ok => 0.0,
            Self::OverThreshold(seconds) => *seconds,
            Self::Stopped | Self::Unavailable => UNKNOWN_LAG,
        }
    }

    /// 사용자에게 보여줄 위반 메시지 생성
    ///
    /// `database`가 주어지면 (랙 검사 대상이 명시적이었으면) 어느 데이터베이스
    /// 연결에서 위반이 났는지 덧붙입니다.
    pub fn message(&self, max_lag: f64, database: Option<&LogicalDatabase>) -> String {
        let message = match self {
            Self::Ok => "Replica lag within threshold".to_string(),
            Self::Stopped => "Replication stopped".to_string(),
            Self::Unavailable => "No replicas available for lag check".to_string(),
            Self::OverThreshold(seconds) => {
                format!("Replica lag {} over {} seconds", seconds, max_lag)
            }
        };

        match database {
            Some(db) => format!("{} on {} connection", message, db),
            None => message,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
