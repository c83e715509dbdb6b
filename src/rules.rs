// 🏷️ Scoring Rules - Receipt → reward points
// Seven independent rules, each contributing a non-negative number of points.
// The engine is a pure function: no I/O, no shared state, safe to call from
// any number of request handlers at once.

use crate::receipt::{Item, Receipt};
use chrono::{Datelike, Timelike};
use tracing::debug;

// ============================================================================
// RULE CONSTANTS
// ============================================================================

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// Only 14:xx earns the afternoon bonus; 15:xx and 16:00 do not.
const AFTERNOON_HOUR: u32 = 14;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// +1 per ASCII alphanumeric character in the retailer name
    RetailerName,
    /// +50 when the total has no cents
    RoundDollar,
    /// +25 when the total is a multiple of 0.25
    QuarterMultiple,
    /// +5 for every two items
    ItemPairs,
    /// ceil(price * 0.2) for items whose trimmed description length is a multiple of 3
    DescriptionLength,
    /// +6 when the purchase day of month is odd
    OddDay,
    /// +10 when the purchase happened during the 14:00 hour
    AfternoonWindow,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::RetailerName,
        Rule::RoundDollar,
        Rule::QuarterMultiple,
        Rule::ItemPairs,
        Rule::DescriptionLength,
        Rule::OddDay,
        Rule::AfternoonWindow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rule::RetailerName => "Retailer name",
            Rule::RoundDollar => "Round dollar total",
            Rule::QuarterMultiple => "Total multiple of 0.25",
            Rule::ItemPairs => "Item pairs",
            Rule::DescriptionLength => "Description length",
            Rule::OddDay => "Odd purchase day",
            Rule::AfternoonWindow => "Afternoon purchase",
        }
    }
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub contributions: Vec<RuleContribution>,

    /// Set when `total` did not parse. The receipt then scores zero and
    /// `contributions` is empty.
    pub unscoreable_total: bool,
}

impl ScoreBreakdown {
    fn unscoreable() -> Self {
        ScoreBreakdown {
            contributions: Vec::new(),
            unscoreable_total: true,
        }
    }

    /// Total points across all rules, saturating at `u64::MAX`
    pub fn points(&self) -> u64 {
        self.contributions
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.points))
    }

    /// Points contributed by a single rule (0 if it did not apply)
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .find(|c| c.rule == rule)
            .map(|c| c.points)
            .unwrap_or(0)
    }
}

// ============================================================================
// SCORING ENGINE
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        ScoringEngine
    }

    /// Score a receipt
    pub fn compute(&self, receipt: &Receipt) -> u64 {
        self.breakdown(receipt).points()
    }

    /// Score a receipt, keeping each rule's contribution
    pub fn breakdown(&self, receipt: &Receipt) -> ScoreBreakdown {
        // An unreadable total voids the whole receipt, not just rules 2 and 3
        let total = match receipt.total_value() {
            Some(total) => total,
            None => {
                debug!(total = %receipt.total, "Total is not a number, scoring receipt as 0");
                return ScoreBreakdown::unscoreable();
            }
        };

        let contributions = vec![
            RuleContribution {
                rule: Rule::RetailerName,
                points: retailer_points(&receipt.retailer),
            },
            RuleContribution {
                rule: Rule::RoundDollar,
                points: if is_round_dollar(total) { ROUND_DOLLAR_POINTS } else { 0 },
            },
            RuleContribution {
                rule: Rule::QuarterMultiple,
                points: if is_quarter_multiple(total) { QUARTER_MULTIPLE_POINTS } else { 0 },
            },
            RuleContribution {
                rule: Rule::ItemPairs,
                points: (receipt.items.len() as u64 / 2) * POINTS_PER_ITEM_PAIR,
            },
            RuleContribution {
                rule: Rule::DescriptionLength,
                points: receipt
                    .items
                    .iter()
                    .map(description_points)
                    .fold(0u64, u64::saturating_add),
            },
            RuleContribution {
                rule: Rule::OddDay,
                points: odd_day_points(receipt),
            },
            RuleContribution {
                rule: Rule::AfternoonWindow,
                points: afternoon_points(receipt),
            },
        ];

        ScoreBreakdown {
            contributions,
            unscoreable_total: false,
        }
    }
}

// ============================================================================
// INDIVIDUAL RULES
// ============================================================================

fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

fn is_round_dollar(total: f64) -> bool {
    total.is_finite() && total.fract() == 0.0
}

/// Compared in cents so the check does not depend on how 0.25 divides a
/// binary fraction.
fn is_quarter_multiple(total: f64) -> bool {
    if !total.is_finite() {
        return false;
    }
    let cents = total * 100.0;
    cents.fract() == 0.0 && cents % 25.0 == 0.0
}

fn description_points(item: &Item) -> u64 {
    let length = item.trimmed_description().len();
    if length == 0 || length % 3 != 0 {
        return 0;
    }

    // Unparsable prices count as free
    let price = item.price_value().unwrap_or(0.0);
    let bonus = (price * DESCRIPTION_PRICE_MULTIPLIER).ceil();
    if !bonus.is_finite() || bonus <= 0.0 {
        return 0;
    }
    // `as` saturates; the caller sums with saturating_add
    bonus as u64
}

fn odd_day_points(receipt: &Receipt) -> u64 {
    match receipt.purchase_date_value() {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

fn afternoon_points(receipt: &Receipt) -> u64 {
    match receipt.purchase_time_value() {
        Some(time) if time.hour() == AFTERNOON_HOUR => AFTERNOON_POINTS,
        _ => 0,
    }
}

// ============================================================================
// TESTS
// ============================================================================
