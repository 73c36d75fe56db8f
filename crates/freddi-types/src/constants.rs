// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Constants
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Physical constants and unit conversions, CGS throughout.

/// Gravitational constant [cm³ g⁻¹ s⁻²].
pub const GRAVITATIONAL_CONSTANT: f64 = 6.673e-8;

/// Speed of light [cm/s].
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e10;

/// Stefan-Boltzmann constant [erg cm⁻² s⁻¹ K⁻⁴].
pub const STEFAN_BOLTZMANN: f64 = 5.670_400_473_74e-5;

/// Planck constant [erg s].
pub const PLANCK: f64 = 6.626_068_96e-27;

/// Boltzmann constant [erg/K].
pub const BOLTZMANN: f64 = 1.380_650_4e-16;

/// Universal gas constant [erg K⁻¹ mol⁻¹].
pub const GAS_CONSTANT: f64 = 8.314_472e7;

/// Electron volt [erg].
pub const ELECTRON_VOLT: f64 = 1.602_176_487e-12;

/// Solar mass [g].
pub const SOLAR_MASS: f64 = 1.988_92e33;

/// Solar radius [cm].
pub const SOLAR_RADIUS: f64 = 6.955e10;

/// Parsec [cm].
pub const PARSEC: f64 = 3.085_677_581_35e18;

/// Kiloparsec [cm].
pub const KILOPARSEC: f64 = 1000.0 * PARSEC;

/// Day [s].
pub const DAY: f64 = 86_400.0;

/// Ångström [cm].
pub const ANGSTROM: f64 = 1e-8;

/// Jansky [erg s⁻¹ cm⁻² Hz⁻¹].
pub const JANSKY: f64 = 1e-23;

/// Photon frequency of 1 keV [Hz].
pub const KEV_FREQUENCY: f64 = 1000.0 * ELECTRON_VOLT / PLANCK;
