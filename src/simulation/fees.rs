//! Notary fees and VAT regimes by acquisition category

use crate::household::{Acquisition, NotaryRegime};

/// Standard VAT rate, in percent
pub const STANDARD_VAT_PCT: f64 = 20.0;

/// Reduced VAT rate on eligible new housing, in percent
pub const REDUCED_VAT_PCT: f64 = 5.5;

/// Notary fee rates as a share of the property price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotaryRates {
    /// New build with fees waived
    pub new_build_waived: f64,
    /// New build under the reduced regime
    pub new_build_reduced: f64,
    pub recent: f64,
    pub existing: f64,
}

impl Default for NotaryRates {
    fn default() -> Self {
        Self {
            new_build_waived: 0.0,
            new_build_reduced: 0.025,
            recent: 0.04,
            existing: 0.08,
        }
    }
}

impl NotaryRates {
    pub fn rate_for(&self, acquisition: &Acquisition) -> f64 {
        match acquisition {
            Acquisition::NewBuild { notary: NotaryRegime::None, .. } => self.new_build_waived,
            Acquisition::NewBuild { notary: NotaryRegime::Reduced, .. } => self.new_build_reduced,
            Acquisition::Recent => self.recent,
            Acquisition::Existing { .. } => self.existing,
        }
    }

    pub fn fee(&self, acquisition: &Acquisition, price: f64) -> f64 {
        price * self.rate_for(acquisition)
    }
}

/// VAT rates to explore for an acquisition
///
/// Only new builds can test the reduced rate, and when they do the standard rate is
/// not explored alongside it.
pub fn vat_rates_for(acquisition: &Acquisition) -> Vec<f64> {
    match acquisition {
        Acquisition::NewBuild { test_reduced_vat: true, .. } => vec![REDUCED_VAT_PCT],
        _ => vec![STANDARD_VAT_PCT],
    }
}
