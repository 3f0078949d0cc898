//! Named counters and values recorded by a search invocation.
//!
//! Keys are kept in a `BTreeMap` so iteration and JSON output are
//! deterministic.

use std::collections::BTreeMap;

/// Count of nodes whose children were enumerated.
pub const METRIC_NODES_EXPANDED: &str = "nodesExpanded";

/// Path cost of the returned solution (0 when there is none).
pub const METRIC_PATH_COST: &str = "pathCost";

/// A single metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(u64),
    Float(f64),
}

impl MetricValue {
    fn to_json_value(self) -> serde_json::Value {
        match self {
            Self::Int(v) => serde_json::json!(v),
            Self::Float(v) => serde_json::json!(v),
        }
    }
}

/// Mapping from metric name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    values: BTreeMap<String, MetricValue>,
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_int(&mut self, name: &str, value: u64) {
        self.values.insert(name.to_string(), MetricValue::Int(value));
    }

    pub fn set_float(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), MetricValue::Float(value));
    }

    /// Add one to an integer metric. A missing or float-valued metric
    /// restarts at 1.
    pub fn increment_int(&mut self, name: &str) {
        let next = match self.values.get(name) {
            Some(MetricValue::Int(v)) => v.saturating_add(1),
            _ => 1,
        };
        self.values.insert(name.to_string(), MetricValue::Int(next));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.values.get(name).copied()
    }

    /// Integer value of `name`, or `None` if missing or not an integer.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<u64> {
        match self.values.get(name)? {
            MetricValue::Int(v) => Some(*v),
            MetricValue::Float(_) => None,
        }
    }

    /// Numeric value of `name` as `f64`. Integer metrics are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.values.get(name)? {
            MetricValue::Int(v) => Some(*v as f64),
            MetricValue::Float(v) => Some(*v),
        }
    }

    /// Iterate metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object with one entry per metric, keys in name order.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();
        serde_json::Value::Object(map)
    }
}
