//! Lag Probe Interface
//!
//! 랙 측정 인터페이스 정의

use std::fmt;
use std::io;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// LogicalDatabase - 논리 데이터베이스
// ============================================================================

/// 논리 데이터베이스
///
/// 프라이머리 하나와 0개 이상의 레플리카를 가질 수 있는 이름 있는 연결
/// 그룹입니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalDatabase {
    name: String,
}

impl LogicalDatabase {
    /// 새 논리 데이터베이스 생성
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// 데이터베이스 이름
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for LogicalDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<String> for LogicalDatabase {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for LogicalDatabase {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ============================================================================
// LagReading - 랙 측정 결과
// ============================================================================

/// 랙 측정 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LagReading {
    /// 측정된 랙 (초)
    Measured(f64),
    /// 복제가 멈춤
    ReplicationStopped,
    /// 검사할 레플리카 없음
    NoReplicaAvailable,
}

impl LagReading {
    /// 측정값 여부
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }

    /// 측정된 초 (측정값이 아니면 `None`)
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Measured(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for LagReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured(s) => write!(f, "{}s", s),
            Self::ReplicationStopped => write!(f, "replication stopped"),
            Self::NoReplicaAvailable => write!(f, "no replica available"),
        }
    }
}

// ============================================================================
// ProbeError - 프로브 에러
// ============================================================================

/// 프로브 에러
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 레플리카 풀이 설정되지 않음. 코디네이터는 이 경우를
    /// [`LagReading::NoReplicaAvailable`]로 취급하고 전파하지 않습니다.
    #[error("No replica pool configured for {database}")]
    NoReplicaPool {
        /// 대상 데이터베이스 이름
        database: String,
    },

    /// 복제 상태 조회 실패
    #[error("Replication status query failed: {0}")]
    Query(String),

    /// I/O 에러
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ProbeError {
    /// 레플리카 풀 없음 에러 생성
    pub fn no_replica_pool(database: impl Into<String>) -> Self {
        Self::NoReplicaPool {
            database: database.into(),
        }
    }

    /// 조회 실패 에러 생성
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// 레플리카 풀 없음 여부
    pub fn is_no_replica_pool(&self) -> bool {
        matches!(self, Self::NoReplicaPool { .. })
    }
}

// ============================================================================
// ReplicaLagProbe - 랙 프로브
// ============================================================================

/// 랙 프로브
///
/// 논리 데이터베이스 하나의 레플리카 랙을 측정하는 외부 협력자입니다.
/// 보통 레플리카 연결로 복제 상태 질의를 실행하여 구현합니다.
#[async_trait]
pub trait ReplicaLagProbe: Send + Sync {
    /// 지정된 논리 데이터베이스의 랙 측정
    async fn lag(&self, database: &LogicalDatabase) -> Result<LagReading, ProbeError>;
}

// ============================================================================
// Tests
// ============================================================================
