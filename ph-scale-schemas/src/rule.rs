use crate::command::Command;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    LessThan,
    GreaterThan,
    EqualTo,
    NotEqualTo,
}

/// An observable solution quantity a rule can test.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionParameter {
    Ph,
    TotalVolume,
    SoluteVolume,
    WaterVolume,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    AtTick {
        tick: u64,
    },
    EveryTicks {
        interval: u64,
    },
    SolutionValue {
        parameter: SolutionParameter,
        operator: ComparisonOperator,
        value: f64,
    },
    BeakerEmpty,
    BeakerFull,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    pub name: String,
    pub condition: Condition,
    pub action: Command,
    /// When set, the rule is retired after it first fires.
    #[serde(default)]
    pub once: bool,
}
