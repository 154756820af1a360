use std::collections::HashMap;

use super::{Calculator, MethodCalculator, PackageCalculator, ProjectCalculator, TypeCalculator};
use crate::config::MetricsConfig;
use crate::core::{Error, NodeKind, Result};

/// Calculators of one run, validated so no two at the same level produce a
/// metric of the same name.
#[derive(Debug, Clone)]
pub struct CalculatorRegistry {
    calculators: Vec<Calculator>,
}

impl CalculatorRegistry {
    pub fn new(calculators: Vec<Calculator>) -> Result<Self> {
        let mut producers: HashMap<(NodeKind, &'static str), &'static str> = HashMap::new();
        for calculator in &calculators {
            for &metric in calculator.metric_names() {
                if let Some(first) = producers.insert((calculator.level(), metric), calculator.id()) {
                    return Err(Error::MetricCollision {
                        metric: metric.to_string(),
                        level: calculator.level(),
                        first,
                        second: calculator.id(),
                    });
                }
            }
        }
        Ok(Self { calculators })
    }

    /// Every built-in calculator.
    pub fn reference() -> Self {
        Self {
            calculators: reference_set(),
        }
    }

    /// The reference set minus the calculators listed in `metrics.disabled`.
    pub fn from_config(config: &MetricsConfig) -> Result<Self> {
        let calculators = reference_set();
        if let Some(unknown) = config
            .disabled
            .iter()
            .find(|id| !calculators.iter().any(|c| c.id() == id.as_str()))
        {
            return Err(Error::Configuration(format!(
                "unknown calculator `{unknown}` in metrics.disabled"
            )));
        }
        Self::new(
            calculators
                .into_iter()
                .filter(|c| !config.disabled.iter().any(|id| id == c.id()))
                .collect(),
        )
    }

    /// Adds `calculator`, rejecting a metric-name collision.
    pub fn with(self, calculator: impl Into<Calculator>) -> Result<Self> {
        let mut calculators = self.calculators;
        calculators.push(calculator.into());
        Self::new(calculators)
    }

    pub fn at_level(&self, level: NodeKind) -> impl Iterator<Item = &Calculator> + '_ {
        self.calculators.iter().filter(move |c| c.level() == level)
    }

    pub fn calculators(&self) -> &[Calculator] {
        &self.calculators
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::reference()
    }
}

fn reference_set() -> Vec<Calculator> {
    MethodCalculator::REFERENCE
        .into_iter()
        .map(Calculator::from)
        .chain(TypeCalculator::REFERENCE.into_iter().map(Calculator::from))
        .chain(PackageCalculator::REFERENCE.into_iter().map(Calculator::from))
        .chain(ProjectCalculator::REFERENCE.into_iter().map(Calculator::from))
        .collect()
}
