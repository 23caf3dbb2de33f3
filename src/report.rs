//! Plain-text rendering of simulation results

use std::fmt;

use crate::household::{AcquisitionProfile, Household};
use crate::simulation::SimulationResult;

/// Thousands-separated whole amount, e.g. `332 915`
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Summary of the simulation inputs
pub struct InputsSummary<'a> {
    pub household: &'a Household,
    pub profile: &'a AcquisitionProfile,
}

impl fmt::Display for InputsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.household;
        let loan = &self.profile.loan;
        writeln!(f, "Household")?;
        writeln!(f, "  Monthly income:     {:>12}", format_amount(h.monthly_income))?;
        writeln!(f, "  Existing charges:   {:>12}", format_amount(h.monthly_charges))?;
        writeln!(f, "  Savings:            {:>12}", format_amount(h.liquidity))?;
        writeln!(f, "  Debt ratio:         {:>11.1}%", h.debt_ratio_pct)?;
        writeln!(f, "  Reference income:   {:>12}", format_amount(h.reference_income))?;
        writeln!(f, "  Household size:     {:>12}", h.household_size)?;
        writeln!(f, "  Zone:               {:>12}", h.zone.as_str())?;
        writeln!(f, "Acquisition: {}", self.profile.acquisition.label())?;
        writeln!(
            f,
            "  Loan: {:.2}% over {} years, insurance {:.2}%",
            loan.annual_rate_pct, loan.duration_years, loan.insurance_rate_pct
        )
    }
}

/// Detail card of one solved scenario
pub struct ResultCard<'a> {
    pub rank: usize,
    pub result: &'a SimulationResult,
}

impl fmt::Display for ResultCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(f, "#{} {}", self.rank, r.label)?;
        writeln!(f, "  Borrowing capacity: {:>12}", format_amount(r.borrowing_capacity))?;
        writeln!(f, "  Property price:     {:>12}", format_amount(r.property_price))?;
        writeln!(f, "  Notary fees:        {:>12}", format_amount(r.notary_fee))?;
        writeln!(f, "  Contribution:       {:>12}", format_amount(r.contribution))?;
        writeln!(
            f,
            "  Main loan:          {:>12}  ({}/month)",
            format_amount(r.loan_principal),
            format_amount(r.loan_monthly)
        )?;
        if r.zero_interest_amount > 0.0 {
            writeln!(
                f,
                "  Zero-interest loan: {:>12}  ({}/month)",
                format_amount(r.zero_interest_amount),
                format_amount(r.zero_interest_monthly)
            )?;
        }
        if r.employer_amount > 0.0 {
            writeln!(
                f,
                "  Employer loan:      {:>12}  ({}/month)",
                format_amount(r.employer_amount),
                format_amount(r.employer_monthly)
            )?;
        }
        writeln!(f, "  Insurance:          {:>12}/month", format_amount(r.insurance_monthly))?;
        writeln!(f, "  Total monthly:      {:>12}", format_amount(r.total_monthly_payment))?;
        if !r.converged {
            writeln!(f, "  (approximate: funding gap {})", format_amount(r.funding_gap))?;
        }
        Ok(())
    }
}

/// Ranked list of result cards, optionally truncated
pub struct Report<'a> {
    pub results: &'a [SimulationResult],
    pub limit: Option<usize>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return writeln!(f, "No financing scenario is feasible for this household.");
        }
        let shown = self.limit.unwrap_or(self.results.len()).min(self.results.len());
        for (i, result) in self.results.iter().take(shown).enumerate() {
            writeln!(f, "{}", ResultCard { rank: i + 1, result })?;
        }
        if shown < self.results.len() {
            writeln!(f, "... ({} more scenarios)", self.results.len() - shown)?;
        }
        Ok(())
    }
}

pub fn format_inputs(household: &Household, profile: &AcquisitionProfile) -> String {
    InputsSummary { household, profile }.to_string()
}

pub fn format_result(rank: usize, result: &SimulationResult) -> String {
    ResultCard { rank, result }.to_string()
}

pub fn format_report(results: &[SimulationResult], limit: Option<usize>) -> String {
    Report { results, limit }.to_string()
}
