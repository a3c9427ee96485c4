use chrono::{Datelike, NaiveDate};

use crate::models::analysis::ProductionPlan;

/// Harvest multiplier by calendar month: January dips after the cold peak,
/// November and February are shoulder months.
pub fn month_multiplier(month: u32) -> f64 {
    match month {
        1 => 0.8,
        11 | 2 => 1.1,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyYield {
    pub yield_kg: f64,
    pub revenue: f64,
}

/// Spreads the winter yield evenly over `dates`, then weights each day by its
/// month. The weighted total is not renormalised.
pub fn allocate_winter(total_yield_kg: f64, market_price: f64, dates: &[NaiveDate]) -> Vec<DailyYield> {
    let base = total_yield_kg / dates.len().max(1) as f64;
    dates
        .iter()
        .map(|d| {
            let yield_kg = base * month_multiplier(d.month());
            DailyYield { yield_kg, revenue: yield_kg * market_price }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummerResult {
    pub revenue: f64,
    pub cost: f64,
    pub net_profit: f64,
}

/// Flat-rate summer crop: no day-by-day model.
pub fn summer(plan: &ProductionPlan) -> SummerResult {
    let revenue = plan.summer_total_yield_kg * plan.summer_price;
    let cost = revenue * plan.summer_cost_ratio;
    SummerResult { revenue, cost, net_profit: revenue - cost }
}
