//! Planning parameters for a replenishment run.

use serde::{Deserialize, Serialize};

use crate::error::{RestockError, Result};

/// Days of sales history every velocity is computed over.
pub const SALES_WINDOW_DAYS: f64 = 60.0;

/// Days of demand the physical warehouse keeps in reserve.
pub const RESERVE_DAYS: f64 = 30.0;

/// Horizon, lead time and expected growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplenishmentParams {
    /// Days of demand the fulfillment stock should cover.
    pub horizon_days: u32,
    /// Supplier lead time in days, added to the horizon.
    pub lead_time_days: u32,
    /// Expected monthly demand growth, in percent. May be negative.
    pub growth_percent: f64,
}

impl Default for ReplenishmentParams {
    fn default() -> Self {
        Self {
            horizon_days: 60,
            lead_time_days: 0,
            growth_percent: 0.0,
        }
    }
}

impl ReplenishmentParams {
    pub fn new(horizon_days: u32, lead_time_days: u32, growth_percent: f64) -> Self {
        Self {
            horizon_days,
            lead_time_days,
            growth_percent,
        }
    }

    pub fn with_horizon(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    pub fn with_growth(mut self, percent: f64) -> Self {
        self.growth_percent = percent;
        self
    }

    /// Reject parameters the formulas cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(RestockError::InvalidParameter(
                "horizon_days must be greater than zero".to_string(),
            ));
        }
        if !self.growth_percent.is_finite() || self.growth_percent <= -100.0 {
            return Err(RestockError::InvalidParameter(format!(
                "growth_percent must be a finite number above -100, got {}",
                self.growth_percent
            )));
        }
        Ok(())
    }

    /// `(1 + growth/100)^(horizon/30)`: monthly growth compounded over the horizon.
    pub fn growth_factor(&self) -> f64 {
        (1.0 + self.growth_percent / 100.0).powf(f64::from(self.horizon_days) / 30.0)
    }

    /// Horizon plus lead time.
    pub fn coverage_days(&self) -> u32 {
        self.horizon_days.saturating_add(self.lead_time_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = ReplenishmentParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.growth_factor(), 1.0);
        assert_eq!(params.coverage_days(), 60);
    }

    #[test]
    fn test_validation() {
        assert!(ReplenishmentParams::default().with_horizon(0).validate().is_err());
        assert!(ReplenishmentParams::default().with_growth(-100.0).validate().is_err());
        assert!(ReplenishmentParams::default().with_growth(f64::NAN).validate().is_err());
        assert!(ReplenishmentParams::default().with_growth(-50.0).validate().is_ok());

        let err = ReplenishmentParams::default()
            .with_horizon(0)
            .validate()
            .unwrap_err();
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_growth_factor_compounds_monthly() {
        let params = ReplenishmentParams::new(60, 0, 10.0);
        assert!((params.growth_factor() - 1.21).abs() < 1e-12);

        let params = ReplenishmentParams::new(15, 0, 44.0);
        assert!((params.growth_factor() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_partial() {
        let params: ReplenishmentParams = serde_json::from_str(r#"{"lead_time_days": 7}"#).unwrap();
        assert_eq!(params, ReplenishmentParams::new(60, 7, 0.0));
    }
}
