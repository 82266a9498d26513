/// Rule table entries: a predicate over an observation paired with a label
use std::fmt;

/// Condition under which a rule fires
pub enum Predicate<O: ?Sized> {
    /// Unconditional; the covering default of a rule set
    Always,
    /// Fires when the closure returns true for the observation
    When(Box<dyn Fn(&O) -> bool + Send + Sync>),
}

impl<O: ?Sized> Predicate<O> {
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Predicate::When(Box::new(f))
    }

    pub fn matches(&self, observation: &O) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::When(f) => f(observation),
        }
    }

    pub fn is_unconditional(&self) -> bool {
        matches!(self, Predicate::Always)
    }
}

impl<O: ?Sized> fmt::Debug for Predicate<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => write!(f, "Always"),
            Predicate::When(_) => write!(f, "When(..)"),
        }
    }
}

/// A named predicate -> label pair
#[derive(Debug)]
pub struct Rule<O: ?Sized, L> {
    name: String,
    predicate: Predicate<O>,
    label: L,
}

impl<O: ?Sized, L> Rule<O, L> {
    /// Conditional rule
    pub fn when<F>(name: impl Into<String>, f: F, label: L) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Predicate::when(f),
            label,
        }
    }

    /// Covering default rule, matches every observation
    pub fn otherwise(label: L) -> Self {
        Self {
            name: "default".to_string(),
            predicate: Predicate::Always,
            label,
        }
    }

    pub fn new(name: impl Into<String>, predicate: Predicate<O>, label: L) -> Self {
        Self {
            name: name.into(),
            predicate,
            label,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn predicate(&self) -> &Predicate<O> {
        &self.predicate
    }

    pub fn matches(&self, observation: &O) -> bool {
        self.predicate.matches(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_matches_everything() {
        let rule: Rule<i64, &str> = Rule::otherwise("any");
        assert!(rule.matches(&0));
        assert!(rule.matches(&i64::MIN));
        assert!(rule.predicate().is_unconditional());
        assert_eq!(rule.name(), "default");
    }

    #[test]
    fn test_when_uses_closure() {
        let rule: Rule<i64, &str> = Rule::when("negative", |n| *n < 0, "neg");
        assert!(rule.matches(&-3));
        assert!(!rule.matches(&3));
        assert!(!rule.predicate().is_unconditional());
        assert_eq!(*rule.label(), "neg");
    }

    #[test]
    fn test_unsized_observation() {
        let rule: Rule<str, u8> = Rule::when("empty", |s: &str| s.is_empty(), 1);
        assert!(rule.matches(""));
        assert!(!rule.matches("x"));
    }
}
