//! Scoring policy for migration readiness.
//!
//! The weights add up to [`MAX_SCORE`] for a complete mapping whose tables
//! cover the whole inventory.

pub const MAX_SCORE: u32 = 100;

/// Awarded when at least one source is defined.
pub const SOURCES_PRESENT: u32 = 20;

/// Awarded when at least one query is defined.
pub const QUERIES_PRESENT: u32 = 20;

/// Scaled by the share of inventory tables that are mapped.
pub const INVENTORY_COVERAGE: u32 = 30;

/// Flat coverage credit when no inventory was supplied.
pub const COVERAGE_WITHOUT_INVENTORY: u32 = 15;

/// Budget eroded by TODO/TBD markers.
pub const TODO_BUDGET: u32 = 20;
pub const TODO_PENALTY: u32 = 2;

/// Budget eroded by blocking structural issues.
pub const REQUIRED_BUDGET: u32 = 10;
pub const REQUIRED_PENALTY: u32 = 3;

/// Inputs to [`score`], all derived from the mapping and inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreInputs {
    pub source_count: usize,
    pub query_count: usize,
    /// Mapped tables that appear in the inventory
    pub covered_tables: usize,
    /// Zero when no inventory was supplied
    pub inventory_tables: usize,
    pub todo_count: usize,
    pub missing_required: usize,
}

fn budget_left(budget: u32, count: usize, penalty: u32) -> u32 {
    let spent = u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(penalty)
        .min(budget);
    budget - spent
}

/// Coverage term: `floor(30 * covered / inventory)`, or the flat credit.
pub fn coverage_points(covered: usize, inventory: usize) -> u32 {
    if inventory == 0 {
        return COVERAGE_WITHOUT_INVENTORY;
    }
    let covered = covered.min(inventory) as u64;
    (u64::from(INVENTORY_COVERAGE) * covered / inventory as u64) as u32
}

/// Readiness score in `0..=MAX_SCORE`.
pub fn score(inputs: &ScoreInputs) -> u32 {
    let mut total = 0;
    if inputs.source_count > 0 {
        total += SOURCES_PRESENT;
    }
    if inputs.query_count > 0 {
        total += QUERIES_PRESENT;
    }
    total += coverage_points(inputs.covered_tables, inputs.inventory_tables);
    total += budget_left(TODO_BUDGET, inputs.todo_count, TODO_PENALTY);
    total += budget_left(REQUIRED_BUDGET, inputs.missing_required, REQUIRED_PENALTY);
    total.min(MAX_SCORE)
}
