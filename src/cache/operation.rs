//! Namespaces do cache e os valores armazenados em cada um.

use serde::{Deserialize, Serialize};

use crate::types::reports::{
    ComparisonSummary, LifetimePrediction, PerformanceReport, ValidationFlags,
};
use crate::types::Battery;
use crate::BateriaError;

/// Operação memoizada; cada uma tem seu próprio namespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CacheOperation {
    CalculateBatteryHealth,
    AnalyzeBatteryPerformance,
    ValidateBatteryData,
    PredictBatteryLifetime,
    CompareBatteries,
}

impl CacheOperation {
    /// Todas as operações, na ordem de declaração.
    pub const ALL: [CacheOperation; 5] = [
        CacheOperation::CalculateBatteryHealth,
        CacheOperation::AnalyzeBatteryPerformance,
        CacheOperation::ValidateBatteryData,
        CacheOperation::PredictBatteryLifetime,
        CacheOperation::CompareBatteries,
    ];

    /// Nome da operação.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::CalculateBatteryHealth => "calculate_battery_health",
            CacheOperation::AnalyzeBatteryPerformance => "analyze_battery_performance",
            CacheOperation::ValidateBatteryData => "validate_battery_data",
            CacheOperation::PredictBatteryLifetime => "predict_battery_lifetime",
            CacheOperation::CompareBatteries => "compare_batteries",
        }
    }
}

impl std::fmt::Display for CacheOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CacheOperation {
    type Err = BateriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CacheOperation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| BateriaError::UnknownOperation(name.to_string()))
    }
}

/// Valor guardado no cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Health(Battery),
    Performance(PerformanceReport),
    Validation(ValidationFlags),
    Lifetime(LifetimePrediction),
    Comparison(ComparisonSummary),
}

/// Saída de uma operação memoizada.
pub trait CachedOutput: Clone {
    /// Namespace da operação que produz este tipo.
    const OPERATION: CacheOperation;

    /// Embala o valor para o cache.
    fn into_cached(self) -> CachedValue;

    /// Extrai o valor; `None` se a variante não corresponder.
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

impl CachedOutput for Battery {
    const OPERATION: CacheOperation = CacheOperation::CalculateBatteryHealth;

    fn into_cached(self) -> CachedValue {
        CachedValue::Health(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Health(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl CachedOutput for PerformanceReport {
    const OPERATION: CacheOperation = CacheOperation::AnalyzeBatteryPerformance;

    fn into_cached(self) -> CachedValue {
        CachedValue::Performance(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Performance(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl CachedOutput for ValidationFlags {
    const OPERATION: CacheOperation = CacheOperation::ValidateBatteryData;

    fn into_cached(self) -> CachedValue {
        CachedValue::Validation(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Validation(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl CachedOutput for LifetimePrediction {
    const OPERATION: CacheOperation = CacheOperation::PredictBatteryLifetime;

    fn into_cached(self) -> CachedValue {
        CachedValue::Lifetime(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Lifetime(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl CachedOutput for ComparisonSummary {
    const OPERATION: CacheOperation = CacheOperation::CompareBatteries;

    fn into_cached(self) -> CachedValue {
        CachedValue::Comparison(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Comparison(v) => Some(v.clone()),
            _ => None,
        }
    }
}
