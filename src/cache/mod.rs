//! Cache LRU para resultados de análise.
//!
//! Este módulo memoiza as operações de nível de bateria: cada operação tem
//! seu namespace, com capacidade própria, expiração por TTL e remoção do
//! item menos usado recentemente. Os contadores de acertos, erros e
//! evictions são compartilhados entre namespaces.

mod clock;
mod key;
mod lru;
mod operation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{fingerprint, generate_cache_key, CacheKeyable, KeyPart};
pub use self::lru::{AnalysisCache, CacheStats, CachedResult};
pub use operation::{CacheOperation, CachedOutput, CachedValue};
