/// Ordered rule-table classification
///
/// A `RuleSet` is validated once at construction: it must be non-empty and
/// end in an unconditional default. After that, classification is a pure,
/// total function: the first rule whose predicate holds decides the label.
use crate::classify::rule::Rule;
use crate::config::types::{QaError, Result};
use crate::config::validator::validate_rules;

/// Which rule decided a classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a, L> {
    /// Position of the rule in declaration order
    pub index: usize,
    pub rule_name: &'a str,
    pub label: &'a L,
    /// True when no conditional rule fired and the default decided
    pub is_default: bool,
}

/// Validated, total rule table
#[derive(Debug)]
pub struct RuleSet<O: ?Sized, L> {
    conditional: Vec<Rule<O, L>>,
    fallback: Rule<O, L>,
}

impl<O: ?Sized, L> RuleSet<O, L> {
    /// Validate and build a rule set
    ///
    /// Fails with `QaError::Configuration` if `rules` is empty or its last
    /// entry is not an unconditional default.
    pub fn new(mut rules: Vec<Rule<O, L>>) -> Result<Self> {
        let validation = validate_rules(&rules);
        for warning in &validation.warnings {
            log::warn!("rule set: {}", warning);
        }

        if !validation.is_valid() {
            return Err(QaError::Configuration(validation.errors.join("; ")));
        }

        let fallback = rules.pop().ok_or_else(|| {
            QaError::Configuration("rule set must contain at least one rule".to_string())
        })?;

        Ok(Self {
            conditional: rules,
            fallback,
        })
    }

    /// Build from conditional rules plus a default label; total by construction
    pub fn with_default(conditional: Vec<Rule<O, L>>, default_label: L) -> Self {
        Self {
            conditional,
            fallback: Rule::otherwise(default_label),
        }
    }

    /// Label of the first rule matching `observation`
    pub fn classify(&self, observation: &O) -> &L {
        self.explain(observation).label
    }

    /// Classify and report which rule decided
    pub fn explain(&self, observation: &O) -> Match<'_, L> {
        if let Some((index, rule)) = self
            .conditional
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(observation))
        {
            return Match {
                index,
                rule_name: rule.name(),
                label: rule.label(),
                is_default: false,
            };
        }

        Match {
            index: self.conditional.len(),
            rule_name: self.fallback.name(),
            label: self.fallback.label(),
            is_default: true,
        }
    }

    /// Number of rules, including the default
    pub fn len(&self) -> usize {
        self.conditional.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Rules in declaration order
    pub fn rules(&self) -> impl Iterator<Item = &Rule<O, L>> {
        self.conditional.iter().chain(std::iter::once(&self.fallback))
    }

    /// Labels in declaration order, duplicates included
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.rules().map(|r| r.label())
    }
}

/// Classify `observation` against a validated rule set
pub fn classify<'a, O: ?Sized, L>(rules: &'a RuleSet<O, L>, observation: &O) -> &'a L {
    rules.classify(observation)
}
