//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules sequentially: the next rule is consulted only
//! when all previous rules tie, and a final tie-breaker makes the order total.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore};
use crate::error::{ChargeError, Result};
use crate::models::Shuttle;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave ties equal; the waiting queue then serves them in insertion order.
    None,
    /// Deterministic by shuttle ID (lowest first).
    #[default]
    ById,
}

/// A composable rule engine for shuttle prioritization.
///
/// # Example
/// ```
/// use u_charge::dispatching::RuleEngine;
/// use u_charge::models::Shuttle;
/// use std::cmp::Ordering;
///
/// let engine = RuleEngine::default_policy();
/// let a = Shuttle::new(1, 5, 0, 10);
/// let b = Shuttle::new(3, 5, 2, 4);
/// assert_eq!(engine.compare(&a, &b), Ordering::Less);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine with the `ById` tie-breaker.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::ById,
        }
    }

    /// Highest priority, then earliest arrival, then lowest id.
    pub fn default_policy() -> Self {
        Self::new()
            .with_rule(rules::HighestPriority)
            .with_rule(rules::Fifo)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Builds an engine from a comma-separated list of rule names,
    /// e.g. `"PRIORITY,FIFO"`. The `ById` tie-breaker is always applied.
    ///
    /// # Errors
    /// [`ChargeError::MalformedInput`] for an empty list or unknown rule name.
    pub fn parse_policy(policy: &str) -> Result<Self> {
        let mut engine = Self::new();
        for name in policy.split(',').filter(|n| !n.trim().is_empty()) {
            let rule = rules::by_name(name).ok_or_else(|| {
                ChargeError::malformed(format!("unknown dispatching rule '{}'", name.trim()))
            })?;
            engine.rules.push(rule);
        }
        if engine.rules.is_empty() {
            return Err(ChargeError::malformed("dispatching policy has no rules"));
        }
        Ok(engine)
    }

    /// Appends a rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Orders two shuttles. `Less` means `a` is dispatched before `b`.
    pub fn compare(&self, a: &Shuttle, b: &Shuttle) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::None => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }

    /// Evaluates a single shuttle and returns scores from each rule.
    pub fn evaluate(&self, shuttle: &Shuttle) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(shuttle)).collect()
    }

    /// Returns indices into `shuttles` in dispatch order (stable on ties).
    pub fn sort_indices(&self, shuttles: &[Shuttle]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..shuttles.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&shuttles[a], &shuttles[b]));
        indices
    }

    /// Returns the index of the shuttle dispatched first.
    pub fn select_best(&self, shuttles: &[Shuttle]) -> Option<usize> {
        self.sort_indices(shuttles).first().copied()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::default_policy()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_priority_first() {
        let shuttles = vec![
            Shuttle::new(1, 1, 0, 5),
            Shuttle::new(2, 9, 50, 5),
            Shuttle::new(3, 4, 10, 5),
        ];
        let engine = RuleEngine::default_policy();

        let indices = engine.sort_indices(&shuttles);
        let ids: Vec<_> = indices.iter().map(|&i| shuttles[i].id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_default_policy_arrival_breaks_priority_tie() {
        let late = Shuttle::new(1, 5, 8, 5);
        let early = Shuttle::new(2, 5, 3, 5);
        let engine = RuleEngine::default_policy();
        assert_eq!(engine.compare(&early, &late), Ordering::Less);
        assert_eq!(engine.compare(&late, &early), Ordering::Greater);
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let b = Shuttle::new(8, 5, 3, 5);
        let a = Shuttle::new(4, 5, 3, 5);
        let engine = RuleEngine::default_policy();
        assert_eq!(engine.compare(&a, &b), Ordering::Less);
        assert_eq!(engine.select_best(&[b, a]), Some(1));
    }

    #[test]
    fn test_no_tie_breaker_leaves_equal() {
        let a = Shuttle::new(1, 5, 3, 5);
        let b = Shuttle::new(2, 5, 3, 5);
        let engine = RuleEngine::new()
            .with_rule(rules::HighestPriority)
            .with_final_tie_breaker(TieBreaker::None);
        assert_eq!(engine.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_spt_policy() {
        let shuttles = vec![Shuttle::new(1, 9, 0, 50), Shuttle::new(2, 0, 0, 5)];
        let engine = RuleEngine::new().with_rule(rules::Spt);
        assert_eq!(engine.select_best(&shuttles), Some(1));
    }

    #[test]
    fn test_parse_policy() {
        let engine = RuleEngine::parse_policy("fifo, spt").unwrap();
        assert_eq!(engine.rule_names(), vec!["FIFO", "SPT"]);
    }

    #[test]
    fn test_parse_policy_unknown_rule() {
        let err = RuleEngine::parse_policy("PRIORITY,EDD").unwrap_err();
        assert!(err.to_string().contains("EDD"));
    }

    #[test]
    fn test_parse_policy_empty() {
        assert!(RuleEngine::parse_policy(" , ").is_err());
    }

    #[test]
    fn test_evaluate_scores() {
        let engine = RuleEngine::default_policy();
        assert_eq!(engine.evaluate(&Shuttle::new(1, 5, 2, 4)), vec![-5, 2]);
    }

    #[test]
    fn test_empty_input() {
        let engine = RuleEngine::default_policy();
        assert!(engine.sort_indices(&[]).is_empty());
        assert!(engine.select_best(&[]).is_none());
    }
}
