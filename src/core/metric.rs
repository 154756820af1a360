use crate::numeric::NumericValue;

/// A named measurement attached to a tree node. Equality compares name,
/// description and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    description: String,
    value: NumericValue,
}

impl Metric {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<NumericValue>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value: value.into(),
        }
    }

    /// Short name, the key under which the metric is stored on its node.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> &NumericValue {
        &self.value
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
