//! Geração de chaves de cache.
//!
//! A chave é um hash SHA256 de uma impressão textual dos argumentos. Cada
//! tipo que pode ser argumento de uma operação memoizada declara seus campos
//! de identidade por [`CacheKeyable`]; nenhum atributo é inspecionado fora disso.

use sha2::{Digest, Sha256};

use crate::types::{Battery, TestProfile, TestResult};

/// Capacidade de gerar campos canônicos para a chave de cache.
pub trait CacheKeyable {
    /// Identidade estável (número de série, ID do teste...).
    fn cache_identity(&self) -> String;

    /// Campos que definem o resultado do cálculo, em ordem fixa.
    fn key_fields(&self) -> Vec<String>;
}

/// Um argumento de operação memoizada.
pub enum KeyPart<'a> {
    /// Entidade: identidade seguida dos campos definidores.
    Entity(&'a dyn CacheKeyable),
    /// Lista de entidades: identidades ordenadas.
    Collection(Vec<String>),
    /// Valor simples, pela forma textual.
    Scalar(String),
}

impl<'a> KeyPart<'a> {
    /// Argumento do tipo entidade.
    pub fn entity(item: &'a dyn CacheKeyable) -> Self {
        KeyPart::Entity(item)
    }

    /// Argumento do tipo lista; a ordem dos itens não afeta a chave.
    pub fn collection<T: CacheKeyable>(items: &[T]) -> Self {
        let mut ids: Vec<String> = items.iter().map(|i| i.cache_identity()).collect();
        ids.sort();
        KeyPart::Collection(ids)
    }

    /// Argumento escalar.
    pub fn scalar(value: impl ToString) -> Self {
        KeyPart::Scalar(value.to_string())
    }

    fn fingerprint(&self) -> String {
        match self {
            KeyPart::Entity(item) => {
                let mut fields = vec![item.cache_identity()];
                fields.extend(item.key_fields());
                format!("e({})", join_fields(&fields))
            }
            KeyPart::Collection(ids) => format!("c({})", join_fields(ids)),
            KeyPart::Scalar(value) => format!("s({})", join_fields(std::slice::from_ref(value))),
        }
    }
}

/// Prefixa cada campo com seu tamanho, para que separadores dentro dos
/// valores não gerem impressões iguais para argumentos diferentes.
fn join_fields(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| format!("{}:{}", f.len(), f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Impressão textual (antes do hash) de uma chamada.
pub fn fingerprint(operation: &str, parts: &[KeyPart<'_>]) -> String {
    let mut text = operation.to_string();
    for part in parts {
        text.push('|');
        text.push_str(&part.fingerprint());
    }
    text
}

/// Gera a chave de cache de uma chamada.
///
/// Argumentos logicamente iguais sempre produzem a mesma chave.
pub fn generate_cache_key(operation: &str, parts: &[KeyPart<'_>]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fingerprint(operation, parts).as_bytes());
    hex::encode(hasher.finalize())
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

impl CacheKeyable for Battery {
    fn cache_identity(&self) -> String {
        self.serial_number.clone()
    }

    fn key_fields(&self) -> Vec<String> {
        vec![
            self.model.clone(),
            self.manufacturer.clone(),
            self.chemistry.clone(),
            self.nominal_capacity.to_string(),
            self.nominal_voltage.to_string(),
            self.max_voltage.to_string(),
            self.min_voltage.to_string(),
            self.weight.to_string(),
            opt(self.state_of_health),
            opt(self.state_of_charge),
        ]
    }
}

impl CacheKeyable for TestResult {
    fn cache_identity(&self) -> String {
        self.test_id.clone()
    }

    fn key_fields(&self) -> Vec<String> {
        vec![
            self.battery_serial_number.clone(),
            self.temperature.to_string(),
            self.humidity.to_string(),
            self.voltage.to_string(),
            self.current.to_string(),
            self.capacity.to_string(),
            self.internal_resistance.to_string(),
            self.cycle_count.to_string(),
            self.max_temperature.to_string(),
            self.min_temperature.to_string(),
        ]
    }
}

impl CacheKeyable for TestProfile {
    fn cache_identity(&self) -> String {
        format!("{}@{}", self.profile_id, self.version)
    }

    fn key_fields(&self) -> Vec<String> {
        vec![
            self.test_voltage.to_string(),
            self.test_current.to_string(),
            self.max_cycles.to_string(),
            self.test_temperature.to_string(),
            self.min_temperature.to_string(),
            self.max_temperature.to_string(),
            self.charge_voltage.to_string(),
            self.discharge_voltage.to_string(),
            self.cut_off_voltage.to_string(),
            self.sampling_interval.to_string(),
        ]
    }
}
