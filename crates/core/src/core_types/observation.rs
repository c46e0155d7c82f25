//! Primitive surface observation handed in by the weather data provider.

use super::units::{Fahrenheit, HectoPascals};
use serde::{Deserialize, Serialize};

/// A single surface observation at the query location.
///
/// Every field is optional because mesonet and forecast feeds routinely
/// drop values. The derived-parameter calculator substitutes documented
/// defaults for anything missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceObservation {
    /// Air temperature (°F).
    pub temperature: Option<Fahrenheit>,

    /// Dewpoint temperature (°F).
    pub dewpoint: Option<Fahrenheit>,

    /// Station pressure (hPa). Defaults to 1013.25 when absent.
    pub pressure: Option<HectoPascals>,
}

impl SurfaceObservation {
    /// Temperature assumed when the feed omits it.
    pub const DEFAULT_TEMPERATURE: Fahrenheit = Fahrenheit::new(70.0);

    /// Dewpoint assumed when the feed omits it.
    pub const DEFAULT_DEWPOINT: Fahrenheit = Fahrenheit::new(60.0);

    /// Create an observation with temperature and dewpoint in °F.
    #[must_use]
    pub fn new(temperature_f: f64, dewpoint_f: f64) -> Self {
        Self {
            temperature: Some(Fahrenheit::new(temperature_f)),
            dewpoint: Some(Fahrenheit::new(dewpoint_f)),
            pressure: None,
        }
    }

    /// Set station pressure in hPa.
    #[must_use]
    pub fn with_pressure(mut self, pressure_hpa: f64) -> Self {
        self.pressure = Some(HectoPascals::new(pressure_hpa));
        self
    }

    /// Whether either required field had to be defaulted.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.temperature.is_none() || self.dewpoint.is_none()
    }

    /// Temperature, falling back to 70 °F.
    #[must_use]
    pub fn temperature_or_default(&self) -> Fahrenheit {
        self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE)
    }

    /// Dewpoint, falling back to 60 °F.
    #[must_use]
    pub fn dewpoint_or_default(&self) -> Fahrenheit {
        self.dewpoint.unwrap_or(Self::DEFAULT_DEWPOINT)
    }

    /// Pressure, falling back to standard sea-level pressure.
    #[must_use]
    pub fn pressure_or_default(&self) -> HectoPascals {
        self.pressure.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let obs = SurfaceObservation::default();
        assert!(obs.is_incomplete());
        assert_eq!(*obs.temperature_or_default(), 70.0);
        assert_eq!(*obs.dewpoint_or_default(), 60.0);
        assert_eq!(*obs.pressure_or_default(), 1013.25);
    }

    #[test]
    fn builder_sets_pressure() {
        let obs = SurfaceObservation::new(85.0, 68.0).with_pressure(1002.0);
        assert!(!obs.is_incomplete());
        assert_eq!(*obs.pressure_or_default(), 1002.0);
    }
}
