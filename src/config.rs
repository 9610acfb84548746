//! Vault configuration and strategy parameters.

use crate::domain::{Ppm, Shares, PPM_DENOMINATOR};
use crate::error::{Result, VaultError};

/// Largest supported token decimal count. `10^38` still fits in `u128`.
const MAX_TOKEN_DECIMALS: u8 = 38;

/// Tunable strategy parameters for range selection and rebalancing.
///
/// These are the knobs governance may retune over the vault's lifetime;
/// everything else in [`VaultConfig`] is fixed at initialization.
///
/// # Validation
///
/// - `twap_window` must be greater than zero.
/// - `range_multiplier` must be greater than zero.
/// - `protocol_fee_ppm` must be a proper fraction (below 100%).
/// - `price_impact_ppm` must be a proper fraction (below 100%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyParams {
    twap_window: u32,
    max_twap_deviation: u32,
    range_multiplier: u32,
    protocol_fee_ppm: Ppm,
    price_impact_ppm: Ppm,
}

impl StrategyParams {
    /// Creates validated strategy parameters.
    ///
    /// # Arguments
    ///
    /// - `twap_window` — trailing observation window, in seconds, for the
    ///   time-weighted average tick.
    /// - `max_twap_deviation` — largest tolerated distance, in ticks,
    ///   between the spot tick and the average tick. Operations succeed at
    ///   exactly this distance and abort beyond it.
    /// - `range_multiplier` — position half-width as a multiple of the
    ///   pool's tick spacing.
    /// - `protocol_fee_ppm` — share of harvested fees kept for the
    ///   protocol, in parts per million.
    /// - `price_impact_ppm` — full price-impact budget for a rebalancing
    ///   swap; the limit price sits half this distance from spot.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if any parameter
    /// violates the rules listed on the type.
    pub fn new(
        twap_window: u32,
        max_twap_deviation: u32,
        range_multiplier: u32,
        protocol_fee_ppm: Ppm,
        price_impact_ppm: Ppm,
    ) -> Result<Self> {
        let params = Self {
            twap_window,
            max_twap_deviation,
            range_multiplier,
            protocol_fee_ppm,
            price_impact_ppm,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates all parameter invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] naming the violated
    /// rule.
    pub fn validate(&self) -> Result<()> {
        if self.twap_window == 0 {
            return Err(VaultError::InvalidConfiguration(
                "twap window must be greater than zero",
            ));
        }
        if self.range_multiplier == 0 {
            return Err(VaultError::InvalidConfiguration(
                "range multiplier must be greater than zero",
            ));
        }
        if self.protocol_fee_ppm.get() >= PPM_DENOMINATOR {
            return Err(VaultError::InvalidConfiguration(
                "protocol fee must be below 100%",
            ));
        }
        if self.price_impact_ppm.get() >= PPM_DENOMINATOR {
            return Err(VaultError::InvalidConfiguration(
                "price impact budget must be below 100%",
            ));
        }
        Ok(())
    }

    /// Returns the TWAP window in seconds.
    #[must_use]
    pub const fn twap_window(&self) -> u32 {
        self.twap_window
    }

    /// Returns the maximum tolerated spot/TWAP tick distance.
    #[must_use]
    pub const fn max_twap_deviation(&self) -> u32 {
        self.max_twap_deviation
    }

    /// Returns the range half-width multiplier.
    #[must_use]
    pub const fn range_multiplier(&self) -> u32 {
        self.range_multiplier
    }

    /// Returns the protocol fee rate.
    #[must_use]
    pub const fn protocol_fee_ppm(&self) -> Ppm {
        self.protocol_fee_ppm
    }

    /// Returns the rebalancing price-impact budget.
    #[must_use]
    pub const fn price_impact_ppm(&self) -> Ppm {
        self.price_impact_ppm
    }
}

/// Immutable vault configuration plus the retunable [`StrategyParams`].
///
/// # Validation
///
/// - The embedded strategy must itself validate.
/// - `max_total_supply` must be greater than zero ([`Shares::MAX`] acts as
///   "effectively uncapped").
/// - Token decimal counts must not exceed 38, so `10^decimals` fits in
///   `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VaultConfig {
    strategy: StrategyParams,
    max_total_supply: Shares,
    token0_decimals: u8,
    token1_decimals: u8,
}

impl VaultConfig {
    /// Creates a validated vault configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if any invariant
    /// listed on the type is violated.
    pub fn new(
        strategy: StrategyParams,
        max_total_supply: Shares,
        token0_decimals: u8,
        token1_decimals: u8,
    ) -> Result<Self> {
        let config = Self {
            strategy,
            max_total_supply,
            token0_decimals,
            token1_decimals,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] naming the violated
    /// rule.
    pub fn validate(&self) -> Result<()> {
        self.strategy.validate()?;
        if self.max_total_supply.is_zero() {
            return Err(VaultError::InvalidConfiguration(
                "supply cap must be greater than zero",
            ));
        }
        if self.token0_decimals > MAX_TOKEN_DECIMALS || self.token1_decimals > MAX_TOKEN_DECIMALS {
            return Err(VaultError::InvalidConfiguration(
                "token decimals must not exceed 38",
            ));
        }
        Ok(())
    }

    /// Returns the strategy parameters.
    #[must_use]
    pub const fn strategy(&self) -> StrategyParams {
        self.strategy
    }

    /// Returns the share supply cap.
    #[must_use]
    pub const fn max_total_supply(&self) -> Shares {
        self.max_total_supply
    }

    /// Returns token0's decimal count.
    #[must_use]
    pub const fn token0_decimals(&self) -> u8 {
        self.token0_decimals
    }

    /// Returns token1's decimal count.
    #[must_use]
    pub const fn token1_decimals(&self) -> u8 {
        self.token1_decimals
    }

    /// Replaces the strategy parameters, revalidating the replacement.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if the new strategy is
    /// invalid; the existing strategy is kept in that case.
    pub fn set_strategy(&mut self, strategy: StrategyParams) -> Result<()> {
        strategy.validate()?;
        self.strategy = strategy;
        Ok(())
    }

    /// Replaces the share supply cap.
    ///
    /// Lowering the cap below the current supply is allowed; it only
    /// blocks further deposits.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if the new cap is zero.
    pub fn set_max_total_supply(&mut self, cap: Shares) -> Result<()> {
        if cap.is_zero() {
            return Err(VaultError::InvalidConfiguration(
                "supply cap must be greater than zero",
            ));
        }
        self.max_total_supply = cap;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const fn ppm(v: u32) -> Ppm {
        Ppm::new(v)
    }

    fn valid_strategy() -> StrategyParams {
        let Ok(s) = StrategyParams::new(600, 100, 10, ppm(100_000), ppm(5_000)) else {
            panic!("expected Ok");
        };
        s
    }

    fn valid_config() -> VaultConfig {
        let Ok(c) = VaultConfig::new(valid_strategy(), Shares::MAX, 18, 6) else {
            panic!("expected Ok");
        };
        c
    }

    // -- strategy validation ------------------------------------------------

    #[test]
    fn valid_strategy_accepted() {
        assert!(StrategyParams::new(600, 100, 10, ppm(100_000), ppm(5_000)).is_ok());
    }

    #[test]
    fn zero_twap_window_rejected() {
        let result = StrategyParams::new(0, 100, 10, ppm(0), ppm(0));
        assert!(matches!(result, Err(VaultError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_range_multiplier_rejected() {
        let result = StrategyParams::new(600, 100, 0, ppm(0), ppm(0));
        assert!(matches!(result, Err(VaultError::InvalidConfiguration(_))));
    }

    #[test]
    fn full_protocol_fee_rejected() {
        let result = StrategyParams::new(600, 100, 10, Ppm::ONE, ppm(0));
        assert!(matches!(result, Err(VaultError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_deviation_tolerance_is_allowed() {
        // A zero tolerance is strict but legal: only an exactly-converged
        // spot/TWAP pair passes the guard.
        assert!(StrategyParams::new(600, 0, 10, ppm(0), ppm(0)).is_ok());
    }

    // -- config validation --------------------------------------------------

    #[test]
    fn valid_config_accepted() {
        assert!(VaultConfig::new(valid_strategy(), Shares::MAX, 18, 6).is_ok());
    }

    #[test]
    fn zero_supply_cap_rejected() {
        let result = VaultConfig::new(valid_strategy(), Shares::ZERO, 18, 6);
        assert!(matches!(result, Err(VaultError::InvalidConfiguration(_))));
    }

    #[test]
    fn oversized_decimals_rejected() {
        let result = VaultConfig::new(valid_strategy(), Shares::MAX, 39, 6);
        assert!(matches!(result, Err(VaultError::InvalidConfiguration(_))));
    }

    #[test]
    fn invalid_embedded_strategy_rejected() {
        let Ok(cfg) = VaultConfig::new(valid_strategy(), Shares::MAX, 18, 6) else {
            panic!("expected Ok");
        };
        let mut cfg = cfg;
        let bad = StrategyParams {
            twap_window: 0,
            max_twap_deviation: 0,
            range_multiplier: 1,
            protocol_fee_ppm: ppm(0),
            price_impact_ppm: ppm(0),
        };
        assert!(cfg.set_strategy(bad).is_err());
        // The previous strategy survives a rejected update.
        assert_eq!(cfg.strategy(), valid_strategy());
    }

    // -- updates ------------------------------------------------------------

    #[test]
    fn set_strategy_replaces_params() {
        let mut cfg = valid_config();
        let Ok(new_strategy) = StrategyParams::new(1_200, 50, 20, ppm(50_000), ppm(1_000)) else {
            panic!("expected Ok");
        };
        let Ok(()) = cfg.set_strategy(new_strategy) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.strategy(), new_strategy);
    }

    #[test]
    fn set_cap_below_supply_is_allowed() {
        let mut cfg = valid_config();
        let Ok(()) = cfg.set_max_total_supply(Shares::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.max_total_supply(), Shares::new(1));
    }

    #[test]
    fn set_zero_cap_rejected() {
        let mut cfg = valid_config();
        assert!(cfg.set_max_total_supply(Shares::ZERO).is_err());
    }

    // -- accessors ----------------------------------------------------------

    #[test]
    fn accessors() {
        let cfg = valid_config();
        assert_eq!(cfg.strategy().twap_window(), 600);
        assert_eq!(cfg.strategy().max_twap_deviation(), 100);
        assert_eq!(cfg.strategy().range_multiplier(), 10);
        assert_eq!(cfg.strategy().protocol_fee_ppm(), ppm(100_000));
        assert_eq!(cfg.strategy().price_impact_ppm(), ppm(5_000));
        assert_eq!(cfg.token0_decimals(), 18);
        assert_eq!(cfg.token1_decimals(), 6);
    }
}
