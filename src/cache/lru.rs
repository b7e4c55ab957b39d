//! Cache LRU por operação para resultados de análise.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::types::config::CacheConfig;
use crate::BateriaResult;

use super::clock::{Clock, SystemClock};
use super::operation::{CacheOperation, CachedValue};

/// Resultado em cache.
#[derive(Debug, Clone)]
pub struct CachedResult {
    /// Resultado da análise.
    pub value: CachedValue,

    /// Momento em que foi cacheado.
    pub cached_at: DateTime<Utc>,
}

impl CachedResult {
    /// Cria um novo resultado em cache.
    pub fn new(value: CachedValue, cached_at: DateTime<Utc>) -> Self {
        Self { value, cached_at }
    }

    /// Verifica se a entrada expirou em `now`.
    ///
    /// Uma entrada inserida em `T` vale enquanto `now < T + ttl`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let elapsed = now
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed >= ttl
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,

    /// Número de entradas removidas por capacidade.
    pub evictions: u64,

    /// Taxa de acerto em %, com 2 casas.
    pub hit_rate: f64,

    /// Entradas somadas de todas as operações.
    pub total_cache_size: usize,

    /// Capacidade por operação.
    pub max_cache_size: usize,

    /// Tempo de vida das entradas, em segundos.
    pub ttl_secs: u64,

    /// Entradas por operação.
    pub per_operation: BTreeMap<CacheOperation, usize>,
}

/// Cache LRU com um namespace por operação.
///
/// Cada namespace guarda a ordem de acesso (LRU) e o instante de inserção
/// de cada chave. Os contadores são globais.
pub struct AnalysisCache {
    namespaces: BTreeMap<CacheOperation, LruCache<String, CachedResult>>,
    max_size: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl AnalysisCache {
    /// Cria um novo cache com o relógio do sistema.
    ///
    /// # Argumentos
    /// - `max_size`: Entradas máximas por operação (mínimo 1)
    /// - `ttl`: Tempo de vida das entradas
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self::with_clock(max_size, ttl, Arc::new(SystemClock))
    }

    /// Cria um cache com um relógio específico.
    pub fn with_clock(max_size: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let namespaces = CacheOperation::ALL
            .into_iter()
            .map(|op| (op, LruCache::unbounded()))
            .collect();

        Self {
            namespaces,
            max_size: max_size.max(1),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Cria um cache a partir da configuração, validando os limites.
    pub fn from_config(config: &CacheConfig) -> BateriaResult<Self> {
        config.validate()?;
        Ok(Self::new(config.max_size, config.ttl()))
    }

    /// Cria um cache com configuração padrão.
    pub fn default_config() -> Self {
        let config = CacheConfig::default();
        Self::new(config.max_size, config.ttl())
    }

    fn namespace_mut(&mut self, op: CacheOperation) -> &mut LruCache<String, CachedResult> {
        self.namespaces.entry(op).or_insert_with(LruCache::unbounded)
    }

    /// Verifica se a chave existe e ainda não expirou, sem alterar a ordem LRU.
    pub fn is_valid(&self, op: CacheOperation, key: &str) -> bool {
        let now = self.clock.now();
        self.namespaces
            .get(&op)
            .and_then(|ns| ns.peek(key))
            .is_some_and(|entry| !entry.is_expired(self.ttl, now))
    }

    /// Busca no cache.
    ///
    /// Retorna `None` se não encontrado ou se expirado. Uma entrada expirada
    /// não é removida aqui: a próxima inserção da mesma chave a sobrescreve.
    pub fn get(&mut self, op: CacheOperation, key: &str) -> Option<&CachedValue> {
        if !self.is_valid(op, key) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(operation = %op, key, "Cache miss");
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(operation = %op, key, "Cache hit");
        // Acessa via get para mover a chave para o fim mais recente
        self.namespace_mut(op).get(key).map(|entry| &entry.value)
    }

    /// Insere no cache.
    ///
    /// Antes de inserir, remove entradas do fim menos recente até o namespace
    /// ficar abaixo do limite, contando uma eviction por entrada removida.
    pub fn put(&mut self, op: CacheOperation, key: String, value: CachedValue) {
        let max_size = self.max_size;
        let now = self.clock.now();
        let mut evicted = 0u64;

        let namespace = self.namespace_mut(op);
        while namespace.len() >= max_size {
            match namespace.pop_lru() {
                Some((old_key, _)) => {
                    evicted += 1;
                    tracing::debug!(operation = %op, key = %old_key, "Evicting LRU entry");
                }
                None => break,
            }
        }
        namespace.put(key, CachedResult::new(value, now));

        if evicted > 0 {
            self.evictions.fetch_add(evicted, Ordering::Relaxed);
        }
    }

    /// Invalida uma entrada específica.
    pub fn invalidate(&mut self, op: CacheOperation, key: &str) {
        self.namespace_mut(op).pop(key);
    }

    /// Limpa uma operação ou, sem argumento, todas.
    pub fn clear(&mut self, op: Option<CacheOperation>) {
        match op {
            Some(op) => {
                self.namespace_mut(op).clear();
                tracing::info!(operation = %op, "Cache namespace cleared");
            }
            None => {
                for namespace in self.namespaces.values_mut() {
                    namespace.clear();
                }
                tracing::info!("Cache cleared");
            }
        }
    }

    /// Remove entradas expiradas e retorna quantas saíram.
    ///
    /// Remoções por expiração não contam como evictions.
    pub fn cleanup_expired(&mut self, op: Option<CacheOperation>) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut removed = 0;

        for (name, namespace) in self.namespaces.iter_mut() {
            if op.is_some_and(|target| target != *name) {
                continue;
            }

            // Coleta chaves expiradas
            let expired_keys: Vec<String> = namespace
                .iter()
                .filter(|(_, v)| v.is_expired(ttl, now))
                .map(|(k, _)| k.clone())
                .collect();

            // Remove cada uma
            for key in expired_keys {
                namespace.pop(&key);
                removed += 1;
            }
        }

        removed
    }

    /// Entradas atuais de uma operação.
    pub fn len(&self, op: CacheOperation) -> usize {
        self.namespaces.get(&op).map_or(0, |ns| ns.len())
    }

    /// Verifica se não há entradas em nenhuma operação.
    pub fn is_empty(&self) -> bool {
        self.namespaces.values().all(|ns| ns.is_empty())
    }

    /// Capacidade por operação.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Tempo de vida das entradas.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
        };

        let per_operation: BTreeMap<CacheOperation, usize> = self
            .namespaces
            .iter()
            .map(|(op, ns)| (*op, ns.len()))
            .collect();

        CacheStats {
            hits,
            misses,
            evictions: self.evictions.load(Ordering::Relaxed),
            hit_rate,
            total_cache_size: per_operation.values().sum(),
            max_cache_size: self.max_size,
            ttl_secs: self.ttl.as_secs(),
            per_operation,
        }
    }
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish()
    }
}
