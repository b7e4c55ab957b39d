//! Motor de análise de baterias.
//!
//! Este módulo reúne os cálculos determinísticos sobre dados de teste:
//!
//! - **Saúde e carga**: SOH e SOC limitados a [0, 100]
//! - **Vida útil**: projeção de ciclos restantes pela taxa de perda de capacidade
//! - **Validação**: testes contra perfis, perfis editados e dados de bateria
//! - **Anomalias**: outliers por métrica, com média e desvio populacional
//! - **Agregados**: resumos, estatísticas, comparações e agrupamentos
//!
//! ## Exemplo
//!
//! ```rust,ignore
//! use bateria::analysis::AnalysisEngine;
//!
//! let engine = AnalysisEngine::default();
//! let soh = engine.state_of_health(&result, &battery)?;
//! let anomalies = engine.detect_anomalies(&results);
//! ```

mod battery;
mod engine;
pub mod statistics;

pub use battery::rated_cycle_life;
pub use engine::{AnalysisEngine, GroupingCriteria};
pub use statistics::{detect_outliers, mean_and_std_dev, DEFAULT_OUTLIER_MULTIPLIER};
