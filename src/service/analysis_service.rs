//! Serviço de análise de baterias.
//!
//! Ponto de entrada único para chamadores externos: as operações de nível de
//! bateria passam pelo cache, as demais são repassadas ao motor.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::analysis::{AnalysisEngine, GroupingCriteria};
use crate::cache::{
    generate_cache_key, AnalysisCache, CacheOperation, CacheStats, CachedOutput, KeyPart,
};
use crate::types::config::{AnalysisConfig, CacheConfig, Config};
use crate::types::reports::{
    AnomalyRecord, ComparisonReport, ComparisonSummary, CycleLifeReport, LifetimePrediction,
    MetricsReport, PerformanceReport, StatsReport, SummaryReport, ValidationFlags,
    ValidationReport,
};
use crate::types::{Battery, TestProfile, TestResult};
use crate::BateriaResult;

/// Serviço de análise com cache de resultados.
///
/// O cache é do serviço: instâncias diferentes nunca compartilham entradas.
pub struct BatteryAnalysisService {
    engine: AnalysisEngine,
    cache: Mutex<AnalysisCache>,
    cache_enabled: bool,
}

impl BatteryAnalysisService {
    /// Cria um serviço a partir das configurações de cache e análise.
    pub fn new(cache_config: &CacheConfig, analysis_config: AnalysisConfig) -> BateriaResult<Self> {
        let cache = AnalysisCache::from_config(cache_config)?;
        Ok(Self {
            engine: AnalysisEngine::new(analysis_config),
            cache: Mutex::new(cache),
            cache_enabled: cache_config.enabled,
        })
    }

    /// Cria um serviço a partir da configuração completa.
    pub fn from_config(config: &Config) -> BateriaResult<Self> {
        Self::new(&config.cache, config.analysis.clone())
    }

    /// Cria um serviço com motor e cache já construídos.
    pub fn with_cache(engine: AnalysisEngine, cache: AnalysisCache) -> Self {
        Self {
            engine,
            cache: Mutex::new(cache),
            cache_enabled: true,
        }
    }

    /// Motor de análise subjacente.
    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// Consulta o cache e, em caso de erro, calcula e armazena.
    ///
    /// Falhas do cache (lock envenenado) viram cálculo direto: o valor
    /// retornado nunca depende da saúde do cache.
    fn memoize<T: CachedOutput>(&self, key: String, compute: impl FnOnce() -> T) -> T {
        if !self.cache_enabled {
            return compute();
        }
        let op = T::OPERATION;

        match self.cache.lock() {
            Ok(mut cache) => {
                if let Some(hit) = cache.get(op, &key).and_then(T::from_cached) {
                    return hit;
                }
            }
            Err(_) => {
                tracing::warn!(operation = %op, "Cache lock poisoned, computing without cache");
                return compute();
            }
        }

        let value = compute();

        match self.cache.lock() {
            Ok(mut cache) => cache.put(op, key, value.clone().into_cached()),
            Err(_) => {
                tracing::warn!(operation = %op, "Cache lock poisoned, result not stored");
            }
        }

        value
    }

    fn entity_key(op: CacheOperation, battery: &Battery) -> String {
        generate_cache_key(op.as_str(), &[KeyPart::entity(battery)])
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Operações memoizadas
    // ═══════════════════════════════════════════════════════════════════════

    /// Classifica a saúde da bateria.
    ///
    /// Retorna uma cópia atualizada com `health_status` preenchido; a bateria
    /// recebida não é alterada.
    pub fn calculate_battery_health(&self, battery: &Battery) -> Battery {
        let key = Self::entity_key(CacheOperation::CalculateBatteryHealth, battery);
        self.memoize(key, || self.engine.battery_health(battery))
    }

    /// Analisa o desempenho nominal da bateria.
    pub fn analyze_battery_performance(&self, battery: &Battery) -> PerformanceReport {
        let key = Self::entity_key(CacheOperation::AnalyzeBatteryPerformance, battery);
        self.memoize(key, || self.engine.battery_performance(battery))
    }

    /// Prevê a vida útil restante.
    pub fn predict_battery_lifetime(&self, battery: &Battery) -> LifetimePrediction {
        let key = Self::entity_key(CacheOperation::PredictBatteryLifetime, battery);
        self.memoize(key, || self.engine.battery_lifetime(battery))
    }

    /// Compara um conjunto de baterias.
    ///
    /// A chave considera apenas os números de série, sem ordem.
    pub fn compare_batteries(&self, batteries: &[Battery]) -> ComparisonSummary {
        let key = generate_cache_key(
            CacheOperation::CompareBatteries.as_str(),
            &[KeyPart::collection(batteries)],
        );
        self.memoize(key, || self.engine.compare_batteries(batteries))
    }

    /// Verifica a integridade estrutural dos dados da bateria.
    pub fn validate_battery_data(&self, battery: &Battery) -> ValidationFlags {
        let key = Self::entity_key(CacheOperation::ValidateBatteryData, battery);
        self.memoize(key, || self.engine.validate_battery_data(battery))
    }

    /// Estatísticas do cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    /// Limpa uma operação ou todo o cache.
    pub fn clear_cache(&self, op: Option<CacheOperation>) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear(op);
    }

    /// Limpa o cache pelo nome da operação.
    pub fn clear_cache_by_name(&self, name: Option<&str>) -> BateriaResult<()> {
        let op = name.map(str::parse::<CacheOperation>).transpose()?;
        self.clear_cache(op);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Operações do motor (sem cache)
    // ═══════════════════════════════════════════════════════════════════════

    /// Grava SOH, SOC e saúde na bateria a partir de um teste.
    pub fn update_battery_state(
        &self,
        battery: &mut Battery,
        result: &TestResult,
    ) -> BateriaResult<()> {
        self.engine.update_battery_state(battery, result)
    }

    /// Projeção de vida útil pelo histórico de ciclos.
    pub fn analyze_cycle_life(
        &self,
        results: &[TestResult],
        battery: &Battery,
    ) -> BateriaResult<CycleLifeReport> {
        self.engine.analyze_cycle_life(results, battery)
    }

    /// Valida um teste contra perfil e bateria.
    pub fn validate_test_result(
        &self,
        result: &TestResult,
        profile: &TestProfile,
        battery: &Battery,
    ) -> ValidationReport {
        self.engine.validate_test_result(result, profile, battery)
    }

    /// Métricas de desempenho de um teste.
    pub fn performance_metrics(
        &self,
        result: &TestResult,
        battery: &Battery,
    ) -> BateriaResult<MetricsReport> {
        self.engine.performance_metrics(result, battery)
    }

    /// Medições anômalas.
    pub fn detect_anomalies(&self, results: &[TestResult]) -> Vec<AnomalyRecord> {
        self.engine.detect_anomalies(results)
    }

    /// Diferenças entre dois testes.
    pub fn compare_test_results(&self, a: &TestResult, b: &TestResult) -> ComparisonReport {
        self.engine.compare_test_results(a, b)
    }

    /// Verificações estruturais de um perfil.
    pub fn validate_test_profile(&self, profile: &TestProfile) -> ValidationReport {
        self.engine.validate_test_profile(profile)
    }

    /// Novo ID de teste para a bateria.
    pub fn generate_test_id(&self, battery: &Battery) -> String {
        self.engine.generate_test_id(battery)
    }

    /// Resumo de testes.
    pub fn test_summary(&self, results: &[TestResult]) -> SummaryReport {
        self.engine.test_summary(results)
    }

    /// Estatísticas de testes.
    pub fn test_statistics(&self, results: &[TestResult]) -> StatsReport {
        self.engine.test_statistics(results)
    }

    /// Agrupa testes por critério.
    pub fn group_test_results(
        &self,
        results: &[TestResult],
        criteria: &GroupingCriteria,
    ) -> BTreeMap<String, Vec<TestResult>> {
        self.engine.group_test_results(results, criteria)
    }
}

impl Default for BatteryAnalysisService {
    fn default() -> Self {
        Self::with_cache(AnalysisEngine::default(), AnalysisCache::default_config())
    }
}
