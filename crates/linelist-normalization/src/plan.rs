//! Ordering of cleaning and derivation steps.
//!
//! Schema columns are cleaned first, in schema order. Derived columns follow
//! in dependency order; ties keep declaration order. All dependency problems
//! are reported when the plan is built, before any data is touched.

use std::collections::{BTreeSet, HashMap, HashSet};

use linelist_model::{CleaningConfig, ColumnSpec, DeriveRule, DerivedColumn, ValueKind};

use crate::error::PlanError;

/// One unit of work applied to the whole frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    /// Clean a schema column in place.
    Clean(ColumnSpec),
    /// Append (or replace) a derived column.
    Derive(DerivedColumn),
}

impl PlanStep {
    /// Name of the column this step writes.
    pub fn column(&self) -> &str {
        match self {
            Self::Clean(spec) => &spec.name,
            Self::Derive(derived) => &derived.name,
        }
    }
}

/// Validated, ordered list of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan {
    steps: Vec<PlanStep>,
    required: Vec<String>,
}

impl ColumnPlan {
    /// Validate a configuration and order its steps.
    pub fn build(config: &CleaningConfig) -> Result<Self, PlanError> {
        let derived_names = check_derived_names(config)?;

        let mut required = Vec::new();
        for column in &config.derived {
            check_output(column)?;
            for dependency in column.dependencies() {
                if config.columns.contains(dependency) {
                    if !required.iter().any(|name| name == dependency) {
                        required.push(dependency.to_string());
                    }
                } else if !derived_names.contains(dependency) {
                    return Err(PlanError::UnknownDependency {
                        column: column.name.clone(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        let snapshot_columns = config
            .complete_case_columns
            .iter()
            .chain(std::iter::once(&config.impute.column));
        for name in snapshot_columns {
            if config.columns.contains(name) {
                if !required.contains(name) {
                    required.push(name.clone());
                }
            } else if !derived_names.contains(name.as_str()) {
                return Err(PlanError::UnknownSnapshotColumn(name.clone()));
            }
        }

        let mut steps: Vec<PlanStep> = config.columns.iter().cloned().map(PlanStep::Clean).collect();
        steps.extend(order_derived(&config.derived)?.into_iter().cloned().map(PlanStep::Derive));

        Ok(Self { steps, required })
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Schema columns that derived columns or snapshots read; the input must
    /// have them.
    pub fn required_inputs(&self) -> &[String] {
        &self.required
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn check_derived_names(config: &CleaningConfig) -> Result<HashSet<&str>, PlanError> {
    let mut names = HashSet::with_capacity(config.derived.len());
    for column in &config.derived {
        if config.columns.contains(&column.name) {
            return Err(PlanError::ShadowedColumn(column.name.clone()));
        }
        if !names.insert(column.name.as_str()) {
            return Err(PlanError::DuplicateDerived(column.name.clone()));
        }
    }
    Ok(names)
}

fn check_output(column: &DerivedColumn) -> Result<(), PlanError> {
    if let DeriveRule::Recode { table, output, .. } = &column.rule
        && matches!(output, ValueKind::Int | ValueKind::Float)
        && table.kind() == ValueKind::Text
        && !(table.is_empty() && table.missing().is_none())
    {
        return Err(PlanError::IncompatibleOutput {
            column: column.name.clone(),
            output: output.as_str(),
        });
    }
    Ok(())
}

/// Kahn's algorithm over derived-on-derived edges.
fn order_derived(derived: &[DerivedColumn]) -> Result<Vec<&DerivedColumn>, PlanError> {
    let index: HashMap<&str, usize> = derived
        .iter()
        .enumerate()
        .map(|(idx, column)| (column.name.as_str(), idx))
        .collect();

    let mut in_degree = vec![0usize; derived.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); derived.len()];
    for (idx, column) in derived.iter().enumerate() {
        for dependency in column.dependencies() {
            if let Some(&source) = index.get(dependency) {
                in_degree[idx] += 1;
                dependents[source].push(idx);
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..derived.len()).filter(|&idx| in_degree[idx] == 0).collect();
    let mut ordered = Vec::with_capacity(derived.len());
    while let Some(idx) = ready.pop_first() {
        ordered.push(&derived[idx]);
        for &next in &dependents[idx] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.insert(next);
            }
        }
    }

    if ordered.len() < derived.len() {
        let cycle = derived
            .iter()
            .zip(&in_degree)
            .filter(|(_, degree)| **degree > 0)
            .map(|(column, _)| column.name.clone())
            .collect();
        return Err(PlanError::DependencyCycle(cycle));
    }
    Ok(ordered)
}
