//! # Bateria
//!
//! Motor de análise de testes de bateria com cache de resultados.
//!
//! Calcula saúde, carga, vida útil, validações e anomalias sobre dados de
//! teste já carregados, e memoiza as análises de nível de bateria num cache
//! LRU por operação com expiração por TTL.
//!
//! ## Módulos
//!
//! - [`types`] - Entidades, relatórios, configuração e erros
//! - [`analysis`] - Motor de análise e primitivas estatísticas
//! - [`cache`] - Cache LRU para resultados de análise
//! - [`service`] - Fachada usada pelos chamadores externos
//! - `cli` - Interface de linha de comando (feature `cli`)

pub mod analysis;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod service;
pub mod types;

pub use service::BatteryAnalysisService;
pub use types::config::Config;
pub use types::errors::{BateriaError, BateriaResult};
