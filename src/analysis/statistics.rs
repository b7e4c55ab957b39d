//! Primitivas estatísticas usadas pela detecção de anomalias.

use crate::types::reports::AnomalyRecord;
use crate::types::TestResult;

/// Multiplicador padrão de desvios para marcar um outlier.
pub const DEFAULT_OUTLIER_MULTIPLIER: f64 = 2.5;

/// Média e desvio padrão populacional (divide por N).
///
/// Retorna `(0.0, 0.0)` para uma sequência vazia.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

/// Verifica se o elemento `index` da série é um outlier.
///
/// Um valor é marcado quando `|valor - média| > multiplier * desvio`.
/// Séries com desvio zero nunca geram anomalias. `stats` permite reaproveitar
/// `(média, desvio)` já calculados para a série inteira.
///
/// Nunca falha: entradas degeneradas (série vazia ou unitária, índice fora
/// da faixa, resultado de contexto ausente) retornam lista vazia.
pub fn detect_outliers(
    values: &[f64],
    field_name: &str,
    index: usize,
    context_results: &[TestResult],
    stats: Option<(f64, f64)>,
    multiplier: f64,
) -> Vec<AnomalyRecord> {
    if values.len() < 2 {
        return Vec::new();
    }
    let (Some(&value), Some(result)) = (values.get(index), context_results.get(index)) else {
        return Vec::new();
    };

    let (mean, std_dev) = stats.unwrap_or_else(|| mean_and_std_dev(values));
    // Ruído de arredondamento numa série constante conta como desvio zero.
    if !std_dev.is_finite() || std_dev <= f64::EPSILON * mean.abs().max(1.0) {
        return Vec::new();
    }

    let deviation = (value - mean).abs();
    if deviation <= multiplier * std_dev {
        return Vec::new();
    }

    vec![AnomalyRecord {
        field: field_name.to_string(),
        test_id: result.test_id.clone(),
        value,
        mean,
        std_dev,
        reason: format!(
            "{} = {} desvia {:.2}σ da média {:.4} (limite {}σ)",
            field_name,
            value,
            deviation / std_dev,
            mean,
            multiplier
        ),
    }]
}

/// Arredonda para `decimals` casas decimais.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Média simples; `0.0` para lista vazia.
pub fn mean(values: &[f64]) -> f64 {
    mean_and_std_dev(values).0
}
