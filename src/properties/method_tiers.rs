//! Method-tier selection for albedos and diameters.
//!
//! Methods are grouped into tiers of decreasing reliability ([`METHOD_TIERS`]):
//!
//! | tier | methods                                   |
//! |------|-------------------------------------------|
//! | 1    | SPACE                                     |
//! | 2    | ADAM, KOALA, SAGE, Radar                  |
//! | 3    | LC+TPM, TPM, LC+AO, LC+Occ, TE-IM         |
//! | 4    | AO, Occ, IM                               |
//! | 5    | NEATM                                     |
//! | 6    | STM                                       |
//!
//! Only the first tier holding at least one measurement contributes, and all of its members
//! are combined. NEATM and STM uncertainties are inflated with a 10 % systematic floor,
//! `σ' = √(σ² + (0.1·x)²)`, before averaging. The floor only enters the average: the
//! records keep their published uncertainty.
use itertools::Itertools;
use tracing::debug;

use super::{weighted_average, AggregationResult, Observation};
use crate::{
    constants::{METHOD_TIERS, THERMAL_MODEL_FLOOR, THERMAL_MODEL_METHODS},
    rocks_errors::RocksError,
};

/// Select and combine the preferred albedo measurements.
///
/// Arguments
/// -----------------
/// * `observations`: every albedo measurement of one asteroid; `selected` flags are rewritten.
///
/// Return
/// ----------
/// * The weighted mean of the preferred tier.
/// * [`RocksError::EmptyInput`] if no measurement has a positive value.
/// * [`RocksError::NoRankedMethod`] if no remaining method belongs to a tier.
/// * Any error of [`weighted_average`] (e.g. a zero uncertainty in the preferred tier).
pub fn select_albedo(observations: &mut [Observation]) -> Result<AggregationResult, RocksError> {
    select_by_method_tier(observations)
}

/// Select and combine the preferred diameter measurements, with the albedo ranking.
pub fn select_diameter(observations: &mut [Observation]) -> Result<AggregationResult, RocksError> {
    select_by_method_tier(observations)
}

fn select_by_method_tier(
    observations: &mut [Observation],
) -> Result<AggregationResult, RocksError> {
    observations.iter_mut().for_each(|obs| obs.selected = false);

    // non-positive values are diameter-only rows carrying a placeholder albedo
    let candidates = observations
        .iter()
        .positions(|obs| obs.value > 0.0)
        .collect_vec();

    if candidates.is_empty() {
        return Err(RocksError::EmptyInput);
    }

    let (rank, preferred) = METHOD_TIERS
        .iter()
        .enumerate()
        .find_map(|(rank, tier)| {
            let members = candidates
                .iter()
                .copied()
                .filter(|&i| in_tier(&observations[i].method, tier))
                .collect_vec();
            (!members.is_empty()).then_some((rank, members))
        })
        .ok_or(RocksError::NoRankedMethod)?;

    let (values, uncertainties): (Vec<f64>, Vec<f64>) = preferred
        .iter()
        .map(|&i| {
            let obs = &observations[i];
            (obs.value, effective_uncertainty(obs))
        })
        .unzip();

    let (value, uncertainty) = weighted_average(&values, &uncertainties)?;

    for &i in &preferred {
        observations[i].selected = true;
    }
    debug!(
        tier = rank + 1,
        selected = preferred.len(),
        total = observations.len(),
        "method tier selected"
    );

    Ok(AggregationResult { value, uncertainty })
}

fn in_tier(method: &str, tier: &[&str]) -> bool {
    let method = method.trim();
    tier.iter().any(|m| m.eq_ignore_ascii_case(method))
}

/// Uncertainty used for averaging, with the systematic floor of simple thermal models.
fn effective_uncertainty(obs: &Observation) -> f64 {
    if in_tier(&obs.method, &THERMAL_MODEL_METHODS) {
        obs.uncertainty.hypot(THERMAL_MODEL_FLOOR * obs.value)
    } else {
        obs.uncertainty
    }
}
