//! Fixed-rate annuity conversions between principal and monthly payment
//!
//! With `r = annual_rate / 100 / 12` and `n = years * 12`:
//! - principal from payment: `P = M * (1 - (1 + r)^-n) / r`
//! - payment from principal: `M = P * r / (1 - (1 + r)^-n)`
//!
//! A zero rate falls back to the linear limit and a zero duration yields zero.

/// Below this monthly rate the linear limit is used
const RATE_EPSILON: f64 = 1e-12;

/// Monthly periodic rate from an annual percentage
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// `1 - (1 + r)^-n`, computed without cancellation for small `r`
fn discounted_complement(r: f64, periods: u32) -> f64 {
    -(-(periods as f64) * r.ln_1p()).exp_m1()
}

/// Number of monthly periods, saturating for absurd durations
fn periods(years: u32) -> u32 {
    years.saturating_mul(12)
}

/// Principal that a monthly payment repays over `years`
pub fn monthly_to_capital(monthly: f64, annual_rate_pct: f64, years: u32) -> f64 {
    let periods = periods(years);
    if periods == 0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_pct);
    if r.abs() < RATE_EPSILON {
        return monthly * periods as f64;
    }
    monthly * discounted_complement(r, periods) / r
}

/// Monthly payment that repays `capital` over `years`
pub fn capital_to_monthly(capital: f64, annual_rate_pct: f64, years: u32) -> f64 {
    let periods = periods(years);
    if periods == 0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_pct);
    if r.abs() < RATE_EPSILON {
        return capital / periods as f64;
    }
    capital * r / discounted_complement(r, periods)
}

/// Monthly borrower insurance, charged on the property price
pub fn monthly_insurance(price: f64, insurance_rate_pct: f64) -> f64 {
    price * insurance_rate_pct / 100.0 / 12.0
}

/// Monthly amount available for new debt service under the debt ceiling
pub fn max_monthly_payment(
    monthly_income: f64,
    existing_charges: f64,
    debt_ratio_pct: f64,
    count_existing_charges: bool,
) -> f64 {
    let charges = if count_existing_charges { existing_charges } else { 0.0 };
    (monthly_income * debt_ratio_pct / 100.0 - charges).max(0.0)
}
