//! Atmospheric parameters for severe convective storms.
//!
//! This module turns a surface observation into the quantities a storm
//! chaser reads off a mesoanalysis page:
//! - Base parameters from surface temperature, dewpoint and pressure
//!   (CAPE, CIN, shear, helicity, LCL height)
//! - Composite indices (SCP, STP, EHI, BRN, SHIP, VGP, CHP, SREH)
//! - Bunkers right-mover storm motion
//!
//! # Scientific Background
//!
//! Organized severe storms need four ingredients: moisture, instability,
//! lift and vertical wind shear. Supercells additionally need low-level
//! helicity, and tornadoes favor low cloud bases and weak capping. The
//! formulas here are closed-form surface proxies, not sounding analysis;
//! they are tuned to be bounded and repeatable rather than exact.
//!
//! # References
//!
//! - Doswell, C.A. et al. (1996). "Flash flood forecasting: An
//!   ingredients-based methodology." Wea. Forecasting, 11, 560-581.
//! - Thompson, R.L. et al. (2003). "Close proximity soundings within supercell
//!   environments obtained from the Rapid Update Cycle." Wea. Forecasting, 18.

mod composite;
mod derived;

pub use composite::{
    bulk_richardson_number, bunkers_right_mover, cin_factor, compute_composite_indices,
    dewpoint_factor, lcl_factor,
};
pub use derived::{
    cape_estimate, derive_base_parameters, lcl_height, mixing_ratio, saturation_vapor_pressure,
};
