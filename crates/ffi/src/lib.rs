//! C ABI for the storm chase engine.
//!
//! Every entry point returns a [`StormChaseErrorCode`]; on failure the
//! message is available from [`storm_chase_get_last_error`]. All values
//! cross the boundary by copy, so callers own every buffer.

mod error;
mod helpers;
mod types;

pub use error::{
    storm_chase_get_last_error, storm_chase_get_last_error_code, StormChaseErrorCode,
};
pub use types::{
    StormChaseIndices, StormChaseObservation, StormChaseParameterSource, StormChaseParameters,
    StormChaseSeverity, StormChaseStormMode, StormChaseTarget, StormChaseTargetType,
    STORM_CHASE_LABEL_LEN, STORM_CHASE_RATIONALE_LEN,
};

use error::DefaultStormChaseError;
use helpers::{handle_ffi_result, mut_from_ptr, ref_from_ptr, require_finite};
use rand::rngs::StdRng;
use rand::SeedableRng;
use storm_chase_core::{
    compute_composite_indices, derive_base_parameters, score_chasability, BaseParameters,
    CompositeIndices, GeneratorConfig, SurfaceObservation, TargetGenerator,
};

/// Derive base storm parameters from a surface observation.
///
/// Missing observation fields fall back to defaults and the result's
/// `source` reports the degradation.
///
/// # Safety
/// - `observation` must point to a valid `StormChaseObservation`.
/// - `out` must point to writable memory for one `StormChaseParameters`.
#[no_mangle]
pub unsafe extern "C" fn storm_chase_derive_parameters(
    observation: *const StormChaseObservation,
    out: *mut StormChaseParameters,
) -> StormChaseErrorCode {
    handle_ffi_result(|| {
        let observation = unsafe { ref_from_ptr(observation, "observation") }?;
        let out = unsafe { mut_from_ptr(out, "out") }?;

        let params = derive_base_parameters(&SurfaceObservation::from(observation));
        *out = StormChaseParameters::from(&params);
        Ok(())
    })
}

/// Compute composite indices for a parameter set.
///
/// # Safety
/// - `params` must point to a valid `StormChaseParameters`.
/// - `out` must point to writable memory for one `StormChaseIndices`.
#[no_mangle]
pub unsafe extern "C" fn storm_chase_composite_indices(
    params: *const StormChaseParameters,
    out: *mut StormChaseIndices,
) -> StormChaseErrorCode {
    handle_ffi_result(|| {
        let params = unsafe { ref_from_ptr(params, "params") }?;
        let out = unsafe { mut_from_ptr(out, "out") }?;

        let indices = compute_composite_indices(&BaseParameters::from(params));
        *out = StormChaseIndices::from(&indices);
        Ok(())
    })
}

/// Score a location's chasability (0-100).
///
/// # Safety
/// - `params` and `indices` must point to valid values.
/// - `out_score` must point to one writable byte.
#[no_mangle]
pub unsafe extern "C" fn storm_chase_score(
    params: *const StormChaseParameters,
    indices: *const StormChaseIndices,
    latitude: f64,
    longitude: f64,
    out_score: *mut u8,
) -> StormChaseErrorCode {
    handle_ffi_result(|| {
        let params = unsafe { ref_from_ptr(params, "params") }?;
        let indices = unsafe { ref_from_ptr(indices, "indices") }?;
        let out_score = unsafe { mut_from_ptr(out_score, "out_score") }?;
        let latitude = require_finite("latitude", latitude)?;
        let longitude = require_finite("longitude", longitude)?;

        *out_score = score_chasability(
            &BaseParameters::from(params),
            &CompositeIndices::from(indices),
            latitude,
            longitude,
        );
        Ok(())
    })
}

/// Generate ranked chase targets around a base location.
///
/// Perturbations are drawn from a generator seeded with `seed`, so equal
/// inputs give equal targets. `hour` is the local hour (0-23) used to pick
/// the initiation window. At most `capacity` targets are written to
/// `out_targets`; `out_len` receives the number written.
///
/// # Safety
/// - `params` must point to a valid `StormChaseParameters`.
/// - `out_targets` must be valid for writes of `capacity` targets. It may
///   be null only when `capacity` is 0.
/// - `out_len` must point to one writable `usize`.
#[no_mangle]
#[expect(clippy::too_many_arguments)]
pub unsafe extern "C" fn storm_chase_generate_targets(
    base_latitude: f64,
    base_longitude: f64,
    params: *const StormChaseParameters,
    radius_miles: f64,
    seed: u64,
    hour: u32,
    out_targets: *mut StormChaseTarget,
    capacity: usize,
    out_len: *mut usize,
) -> StormChaseErrorCode {
    handle_ffi_result(|| {
        let params = unsafe { ref_from_ptr(params, "params") }?;
        let out_len = unsafe { mut_from_ptr(out_len, "out_len") }?;
        if capacity > 0 && out_targets.is_null() {
            return Err(DefaultStormChaseError::null_pointer("out_targets"));
        }
        let base_latitude = require_finite("base_latitude", base_latitude)?;
        let base_longitude = require_finite("base_longitude", base_longitude)?;
        let radius_miles = require_finite("radius_miles", radius_miles)?;
        if radius_miles < 0.0 {
            return Err(DefaultStormChaseError::invalid_parameter("radius_miles", radius_miles));
        }
        if hour > 23 {
            return Err(DefaultStormChaseError::invalid_parameter("hour", f64::from(hour)));
        }

        let generator = TargetGenerator::new(GeneratorConfig {
            hour: Some(hour),
            ..GeneratorConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(seed);
        let targets = generator.generate(
            base_latitude,
            base_longitude,
            &BaseParameters::from(params),
            radius_miles,
            &mut rng,
        );

        let written = targets.len().min(capacity);
        for (i, target) in targets.iter().take(written).enumerate() {
            unsafe { out_targets.add(i).write(StormChaseTarget::from(target)) };
        }
        *out_len = written;
        Ok(())
    })
}
