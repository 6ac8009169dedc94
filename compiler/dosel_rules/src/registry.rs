use std::collections::BTreeMap;

use dosel_type::ExecutionError;
use lazy_static::lazy_static;
use log::debug;

use crate::builtin;
use crate::interactions::InteractionTable;
use crate::rule::DrugRule;

lazy_static! {
    /// The built-in demo registry, constructed on first use.
    pub static ref BUILTIN_RULES: RuleRegistry = RuleRegistry::builtin();
}

/// Drug name -> dosing rule, plus the interaction table.
///
/// Drug names are stored lower-cased; lookups lower-case their argument.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    drugs: BTreeMap<String, DrugRule>,
    conditions: BTreeMap<String, Vec<String>>,
    interactions: InteractionTable,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The ten demo drugs and three interaction notes
    pub fn builtin() -> Self {
        let registry = builtin::registry();
        debug!(
            "built-in registry: {} drugs, {} interaction notes",
            registry.drugs.len(),
            registry.interactions.len()
        );
        registry
    }

    pub fn insert_drug(&mut self, name: &str, rule: DrugRule) {
        self.drugs.insert(name.to_lowercase(), rule);
    }

    pub fn set_suggested_conditions(&mut self, drug: &str, conditions: &[&str]) {
        self.conditions.insert(
            drug.to_lowercase(),
            conditions.iter().map(|c| c.to_string()).collect(),
        );
    }

    pub fn set_interactions(&mut self, interactions: InteractionTable) {
        self.interactions = interactions;
    }

    pub fn get(&self, drug: &str) -> Option<&DrugRule> {
        self.drugs.get(&drug.to_lowercase())
    }

    /// Like [`get`](Self::get), failing with `UnknownDrug` for unlisted drugs
    pub fn require(&self, drug: &str) -> Result<&DrugRule, ExecutionError> {
        self.get(drug)
            .ok_or_else(|| ExecutionError::UnknownDrug(drug.to_string()))
    }

    /// Supported drug names in alphabetical order
    pub fn drug_names(&self) -> Vec<&str> {
        self.drugs.keys().map(String::as_str).collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &DrugRule)> {
        self.drugs.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Conditions commonly treated with `drug`; empty when none are listed
    pub fn suggested_conditions(&self, drug: &str) -> &[String] {
        self.conditions
            .get(&drug.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn interaction(&self, a: &str, b: &str) -> Option<&str> {
        self.interactions.lookup(a, b)
    }
}
