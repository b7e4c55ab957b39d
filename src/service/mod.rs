//! Fachada de serviço do Bateria.
//!
//! Fluxo de uma chamada memoizada:
//!
//! ```text
//! chamador → BatteryAnalysisService → AnalysisCache (chave)
//!                                   ↳ [miss] → AnalysisEngine → AnalysisCache (put)
//! ```
//!
//! ## Exemplo
//!
//! ```rust,ignore
//! use bateria::service::BatteryAnalysisService;
//! use bateria::Config;
//!
//! let service = BatteryAnalysisService::from_config(&Config::default())?;
//! let prediction = service.predict_battery_lifetime(&battery);
//! println!("hit rate: {}%", service.cache_stats().hit_rate);
//! ```

mod analysis_service;

pub use analysis_service::BatteryAnalysisService;
