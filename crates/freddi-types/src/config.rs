// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Config
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANGSTROM, DAY, GRAVITATIONAL_CONSTANT, JANSKY, KEV_FREQUENCY, KILOPARSEC, SOLAR_MASS,
    SOLAR_RADIUS, SPEED_OF_LIGHT,
};
use crate::error::{FreddiError, FreddiResult};

/// Top-level run configuration.
///
/// Every section and field has a default, so `{}` is a valid configuration
/// describing a 10 M☉ black hole with a 1 M☉ companion on a one-day orbit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskConfig {
    pub binary: BinaryConfig,
    pub disk: DiskModelConfig,
    pub irradiation: IrradiationConfig,
    pub numerics: NumericsConfig,
    pub output: OutputConfig,
}

/// Binary system parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinaryConfig {
    /// Central object mass [M☉].
    #[serde(rename = "Mx")]
    pub mx: f64,
    /// Optical companion mass [M☉].
    #[serde(rename = "Mopt")]
    pub mopt: f64,
    /// Orbital period [days].
    pub period: f64,
    /// Dimensionless Kerr parameter of the central black hole.
    pub kerr: f64,
    /// Inclination [degrees].
    pub inclination: f64,
    /// Distance [kpc].
    pub distance: f64,
    /// Inner disk radius override in units of 6GM/c². ISCO when absent.
    #[serde(rename = "rin", skip_serializing_if = "Option::is_none")]
    pub r_in: Option<f64>,
    /// Outer disk radius override [R☉]. Tidal radius when absent.
    #[serde(rename = "rout", skip_serializing_if = "Option::is_none")]
    pub r_out: Option<f64>,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        BinaryConfig {
            mx: 10.0,
            mopt: 1.0,
            period: 1.0,
            kerr: 0.0,
            inclination: 0.0,
            distance: 10.0,
            r_in: None,
            r_out: None,
        }
    }
}

impl BinaryConfig {
    pub fn mx_grams(&self) -> f64 {
        self.mx * SOLAR_MASS
    }

    pub fn mopt_grams(&self) -> f64 {
        self.mopt * SOLAR_MASS
    }

    pub fn period_seconds(&self) -> f64 {
        self.period * DAY
    }

    pub fn distance_cm(&self) -> f64 {
        self.distance * KILOPARSEC
    }

    pub fn cos_inclination(&self) -> f64 {
        self.inclination.to_radians().cos()
    }

    /// Inner radius override converted to cm.
    pub fn r_in_cm(&self) -> Option<f64> {
        let gm = GRAVITATIONAL_CONSTANT * self.mx_grams();
        self.r_in
            .map(|r| r * 6.0 * gm / (SPEED_OF_LIGHT * SPEED_OF_LIGHT))
    }

    /// Outer radius override converted to cm.
    pub fn r_out_cm(&self) -> Option<f64> {
        self.r_out.map(|r| r * SOLAR_RADIUS)
    }
}

/// Disk model selection: viscosity, opacity law, outer boundary policy and
/// initial torque profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskModelConfig {
    /// Shakura-Sunyaev viscosity parameter.
    pub alpha: f64,
    /// Mean molecular weight.
    pub mu: f64,
    pub opacity: OpacityLaw,
    pub boundary: BoundaryCondition,
    pub initial: InitialCondition,
}

impl Default for DiskModelConfig {
    fn default() -> Self {
        DiskModelConfig {
            alpha: 0.25,
            mu: 0.62,
            opacity: OpacityLaw::default(),
            boundary: BoundaryCondition::default(),
            initial: InitialCondition::default(),
        }
    }
}

/// Opacity law of the hot disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpacityLaw {
    /// κ ∝ ρ T^(-7/2)
    #[default]
    Kramers,
    /// κ ∝ ρ T^(-5/2), fit to OPAL tables
    #[serde(rename = "OPAL")]
    Opal,
}

impl FromStr for OpacityLaw {
    type Err = FreddiError;

    fn from_str(s: &str) -> FreddiResult<Self> {
        match s {
            "Kramers" => Ok(OpacityLaw::Kramers),
            "OPAL" => Ok(OpacityLaw::Opal),
            other => Err(FreddiError::ConfigError(format!(
                "unknown opacity law '{other}', expected Kramers or OPAL"
            ))),
        }
    }
}

impl fmt::Display for OpacityLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpacityLaw::Kramers => f.write_str("Kramers"),
            OpacityLaw::Opal => f.write_str("OPAL"),
        }
    }
}

/// Rule that moves the outer edge of the hot disk inward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum BoundaryCondition {
    /// Keep the photospheric temperature at the edge above `t_hot` [K].
    #[serde(rename = "Teff")]
    Teff {
        #[serde(rename = "Thot", default)]
        t_hot: f64,
    },
    /// Keep the irradiation temperature at the edge above `t_hot` [K].
    #[serde(rename = "Tirr")]
    Tirr {
        #[serde(rename = "Thot", default)]
        t_hot: f64,
    },
    /// Keep the surface density above four times the critical value.
    #[serde(rename = "fourSigmaCrit")]
    FourSigmaCrit,
    /// Outer mass loss `Mdot_out = -k Mdot_in`, edge at the critical
    /// surface density.
    #[serde(rename = "MdotOut")]
    MdotOut {
        #[serde(rename = "kMdotOut", default = "default_k_mdot_out")]
        k_mdot_out: f64,
    },
}

fn default_k_mdot_out() -> f64 {
    2.0
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        BoundaryCondition::Teff { t_hot: 0.0 }
    }
}

impl BoundaryCondition {
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryCondition::Teff { .. } => "Teff",
            BoundaryCondition::Tirr { .. } => "Tirr",
            BoundaryCondition::FourSigmaCrit => "fourSigmaCrit",
            BoundaryCondition::MdotOut { .. } => "MdotOut",
        }
    }
}

/// How the initial torque amplitude is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TorqueNormalization {
    /// Viscous torque at the outer edge [dyn cm].
    #[serde(rename = "F0")]
    Torque(f64),
    /// Initial inner accretion rate [g/s]; the torque amplitude is solved for.
    #[serde(rename = "Mdot0")]
    AccretionRate(f64),
}

impl Default for TorqueNormalization {
    fn default() -> Self {
        TorqueNormalization::Torque(DEFAULT_F0)
    }
}

impl TorqueNormalization {
    pub fn initial_accretion_rate(&self) -> Option<f64> {
        match *self {
            TorqueNormalization::AccretionRate(mdot) => Some(mdot),
            TorqueNormalization::Torque(_) => None,
        }
    }
}

const DEFAULT_F0: f64 = 1e36;

fn default_f0() -> f64 {
    DEFAULT_F0
}
fn default_power_order() -> f64 {
    6.0
}
fn default_gauss_width() -> f64 {
    5.0
}
fn default_gauss_cut() -> f64 {
    0.01
}

/// Shape of the initial torque profile in ξ = (h - h_in) / (h_out - h_in).
///
/// Each variant carries only the parameters its shape uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", deny_unknown_fields)]
pub enum InitialCondition {
    /// F ∝ ξ^order
    #[serde(rename = "powerF", alias = "power")]
    PowerF {
        #[serde(rename = "F0", default = "default_f0")]
        f0: f64,
        #[serde(rename = "powerorder", default = "default_power_order")]
        order: f64,
    },
    /// Σ ∝ ξ^order
    #[serde(rename = "powerSigma")]
    PowerSigma {
        #[serde(rename = "F0", default = "default_f0")]
        f0: f64,
        #[serde(rename = "powerorder", default = "default_power_order")]
        order: f64,
    },
    /// F ∝ sin(ξ π/2)
    #[serde(rename = "sinusF", alias = "sinus")]
    SinusF {
        #[serde(default)]
        normalization: TorqueNormalization,
    },
    /// Gaussian torque bump at the outer edge on top of a weak sinusoid.
    #[serde(rename = "sinusgauss")]
    SinusGauss {
        #[serde(rename = "F0", default = "default_f0")]
        f0: f64,
        /// h_out divided by the Gaussian width in h.
        #[serde(default = "default_gauss_width")]
        width_factor: f64,
        /// Radius of the Gaussian cutoff relative to r_out, inverted.
        #[serde(default = "default_gauss_cut")]
        cut_to_r_out: f64,
    },
    /// Sinusoid with a parabolic tail and a fixed outer mass loss rate.
    #[serde(rename = "sinusparabola")]
    SinusParabola {
        #[serde(rename = "kMdotOut", default = "default_k_mdot_out")]
        k_mdot_out: f64,
    },
    /// Self-similar quasi-stationary profile.
    #[serde(rename = "quasistat")]
    Quasistat {
        #[serde(default)]
        normalization: TorqueNormalization,
    },
}

impl Default for InitialCondition {
    fn default() -> Self {
        InitialCondition::PowerF {
            f0: DEFAULT_F0,
            order: default_power_order(),
        }
    }
}

impl InitialCondition {
    pub fn name(&self) -> &'static str {
        match self {
            InitialCondition::PowerF { .. } => "powerF",
            InitialCondition::PowerSigma { .. } => "powerSigma",
            InitialCondition::SinusF { .. } => "sinusF",
            InitialCondition::SinusGauss { .. } => "sinusgauss",
            InitialCondition::SinusParabola { .. } => "sinusparabola",
            InitialCondition::Quasistat { .. } => "quasistat",
        }
    }

    /// Initial accretion rate implied by the configuration, zero if none.
    pub fn initial_accretion_rate(&self) -> f64 {
        match self {
            InitialCondition::SinusF { normalization }
            | InitialCondition::Quasistat { normalization } => {
                normalization.initial_accretion_rate().unwrap_or(0.0)
            }
            _ => 0.0,
        }
    }

    /// Shapes whose Tirr boundary switches to the photosphere criterion while
    /// the accretion rate grows.
    // TODO: replace with a monotonicity test on the edge temperature so the
    // switch stops depending on the initial shape.
    pub fn tracks_photosphere_on_rise(&self) -> bool {
        matches!(
            self,
            InitialCondition::PowerF { .. } | InitialCondition::SinusGauss { .. }
        )
    }
}

/// Irradiation factor model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrradiationKind {
    /// C_irr independent of the disk shape.
    #[default]
    Const,
    /// C_irr scaled by (H/R)².
    Square,
}

impl FromStr for IrradiationKind {
    type Err = FreddiError;

    fn from_str(s: &str) -> FreddiResult<Self> {
        match s {
            "const" => Ok(IrradiationKind::Const),
            "square" => Ok(IrradiationKind::Square),
            other => Err(FreddiError::ConfigError(format!(
                "unknown irradiation factor type '{other}', expected const or square"
            ))),
        }
    }
}

/// X-ray emission and irradiation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrradiationConfig {
    #[serde(rename = "Cirr")]
    pub c_irr: f64,
    #[serde(rename = "irrfactortype")]
    pub kind: IrradiationKind,
    /// Color correction (dilution) factor.
    pub dilution: f64,
    /// Lower bound of the X-ray band [keV].
    pub numin: f64,
    /// Upper bound of the X-ray band [keV].
    pub numax: f64,
}

impl Default for IrradiationConfig {
    fn default() -> Self {
        IrradiationConfig {
            c_irr: 0.0,
            kind: IrradiationKind::Const,
            dilution: 1.7,
            numin: 1.0,
            numax: 12.0,
        }
    }
}

impl IrradiationConfig {
    pub fn nu_min_hz(&self) -> f64 {
        self.numin * KEV_FREQUENCY
    }

    pub fn nu_max_hz(&self) -> f64 {
        self.numax * KEV_FREQUENCY
    }
}

/// Spacing of the angular momentum grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridScale {
    #[default]
    Log,
    Linear,
}

impl FromStr for GridScale {
    type Err = FreddiError;

    fn from_str(s: &str) -> FreddiResult<Self> {
        match s {
            "log" => Ok(GridScale::Log),
            "linear" => Ok(GridScale::Linear),
            other => Err(FreddiError::ConfigError(format!(
                "unknown grid scale '{other}', expected log or linear"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumericsConfig {
    /// Number of grid points.
    #[serde(rename = "Nx")]
    pub nx: usize,
    #[serde(rename = "gridscale")]
    pub grid_scale: GridScale,
    /// Time step [days].
    pub tau: f64,
    /// Evolution horizon [days].
    pub time: f64,
    /// Relative tolerance of the implicit diffusion solve.
    pub eps: f64,
    /// Newton iteration budget per time step.
    pub max_iterations: usize,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        NumericsConfig {
            nx: 1000,
            grid_scale: GridScale::Log,
            tau: 0.25,
            time: 25.0,
            eps: 1e-6,
            max_iterations: 1000,
        }
    }
}

impl NumericsConfig {
    pub fn tau_seconds(&self) -> f64 {
        self.tau * DAY
    }

    pub fn horizon_seconds(&self) -> f64 {
        self.time * DAY
    }
}

/// Photometric band used for optical magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhotometricBand {
    pub name: String,
    /// Effective wavelength [Å].
    pub lambda: f64,
    /// Zero-magnitude flux density [erg s⁻¹ cm⁻² Å⁻¹].
    pub zero_point: f64,
}

impl PhotometricBand {
    pub fn new(name: &str, lambda: f64, zero_point: f64) -> Self {
        PhotometricBand {
            name: name.to_string(),
            lambda,
            zero_point,
        }
    }

    /// Band whose zero point is given as a flux density per unit frequency [Jy].
    pub fn from_jansky(name: &str, lambda: f64, flux_jy: f64) -> Self {
        let lambda_cm = lambda * ANGSTROM;
        let per_cm = flux_jy * JANSKY * SPEED_OF_LIGHT / (lambda_cm * lambda_cm);
        PhotometricBand::new(name, lambda, per_cm * ANGSTROM)
    }

    pub fn lambda_cm(&self) -> f64 {
        self.lambda * ANGSTROM
    }

    /// Zero point per unit wavelength in cm.
    pub fn zero_point_cgs(&self) -> f64 {
        self.zero_point / ANGSTROM
    }
}

/// UBVRI from Allen's Astrophysical Quantities (4th ed.), J from
/// Campins et al. (1985).
pub fn default_bands() -> Vec<PhotometricBand> {
    vec![
        PhotometricBand::new("U", 3600.0, 4.22e-9),
        PhotometricBand::new("B", 4400.0, 6.4e-9),
        PhotometricBand::new("V", 5500.0, 3.75e-9),
        PhotometricBand::new("R", 7100.0, 1.75e-9),
        PhotometricBand::new("I", 9700.0, 0.84e-9),
        PhotometricBand::from_jansky("J", 12600.0, 1600.0),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Prefix of output file names; the summary goes to PREFIX.dat.
    pub prefix: String,
    /// Output directory. It must exist.
    pub dir: String,
    /// Write PREFIX_<step>.dat radial snapshots for every step.
    pub fulldata: bool,
    pub bands: Vec<PhotometricBand>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            prefix: "freddi".to_string(),
            dir: ".".to_string(),
            fulldata: false,
            bands: default_bands(),
        }
    }
}

fn require_positive(name: &str, value: f64) -> FreddiResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FreddiError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

impl DiskConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> FreddiResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse JSON and validate. Unknown enumerated values are configuration
    /// errors, not JSON errors.
    pub fn from_json_str(contents: &str) -> FreddiResult<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| FreddiError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> FreddiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject out-of-range values and contradictory combinations before any
    /// time step runs.
    pub fn validate(&self) -> FreddiResult<()> {
        let b = &self.binary;
        require_positive("Mx", b.mx)?;
        require_positive("Mopt", b.mopt)?;
        require_positive("period", b.period)?;
        require_positive("distance", b.distance)?;
        // |a| = 1 puts the inner edge on a double root of the Page-Thorne cubic.
        if !b.kerr.is_finite() || b.kerr.abs() >= 1.0 {
            return Err(FreddiError::ConfigError(format!(
                "kerr must lie in (-1, 1), got {}",
                b.kerr
            )));
        }
        if !b.inclination.is_finite() || !(0.0..90.0).contains(&b.inclination) {
            return Err(FreddiError::ConfigError(format!(
                "inclination must lie in [0, 90) degrees, got {}",
                b.inclination
            )));
        }
        if let Some(r_in) = b.r_in {
            require_positive("rin", r_in)?;
        }
        if let Some(r_out) = b.r_out {
            require_positive("rout", r_out)?;
        }

        let d = &self.disk;
        require_positive("alpha", d.alpha)?;
        require_positive("mu", d.mu)?;
        match d.boundary {
            BoundaryCondition::Teff { t_hot } | BoundaryCondition::Tirr { t_hot } => {
                if !t_hot.is_finite() || t_hot < 0.0 {
                    return Err(FreddiError::ConfigError(format!(
                        "Thot must be finite and >= 0, got {t_hot}"
                    )));
                }
            }
            BoundaryCondition::MdotOut { k_mdot_out } => {
                if !k_mdot_out.is_finite() {
                    return Err(FreddiError::ConfigError(
                        "kMdotOut must be finite".to_string(),
                    ));
                }
            }
            BoundaryCondition::FourSigmaCrit => {}
        }
        if matches!(d.boundary, BoundaryCondition::Tirr { .. }) && self.irradiation.c_irr <= 0.0
        {
            return Err(FreddiError::ConfigError(
                "boundary condition Tirr requires Cirr > 0".to_string(),
            ));
        }
        match d.initial {
            InitialCondition::PowerF { f0, order } | InitialCondition::PowerSigma { f0, order } => {
                require_positive("F0", f0)?;
                if !order.is_finite() || order < 0.0 {
                    return Err(FreddiError::ConfigError(format!(
                        "powerorder must be finite and >= 0, got {order}"
                    )));
                }
            }
            InitialCondition::SinusF { normalization }
            | InitialCondition::Quasistat { normalization } => match normalization {
                TorqueNormalization::Torque(f0) => require_positive("F0", f0)?,
                TorqueNormalization::AccretionRate(mdot) => require_positive("Mdot0", mdot)?,
            },
            InitialCondition::SinusGauss {
                f0,
                width_factor,
                cut_to_r_out,
            } => {
                require_positive("F0", f0)?;
                require_positive("width_factor", width_factor)?;
                require_positive("cut_to_r_out", cut_to_r_out)?;
            }
            InitialCondition::SinusParabola { k_mdot_out } => {
                require_positive("kMdotOut", k_mdot_out)?;
            }
        }

        let x = &self.irradiation;
        if !x.c_irr.is_finite() || x.c_irr < 0.0 {
            return Err(FreddiError::ConfigError(format!(
                "Cirr must be finite and >= 0, got {}",
                x.c_irr
            )));
        }
        require_positive("dilution", x.dilution)?;
        require_positive("numin", x.numin)?;
        require_positive("numax", x.numax)?;
        if x.numin >= x.numax {
            return Err(FreddiError::ConfigError(format!(
                "X-ray band must satisfy numin < numax, got [{}, {}]",
                x.numin, x.numax
            )));
        }

        let n = &self.numerics;
        if n.nx < 2 {
            return Err(FreddiError::ConfigError(format!(
                "Nx must be >= 2, got {}",
                n.nx
            )));
        }
        require_positive("tau", n.tau)?;
        if !n.time.is_finite() || n.time < 0.0 {
            return Err(FreddiError::ConfigError(format!(
                "time must be finite and >= 0, got {}",
                n.time
            )));
        }
        require_positive("eps", n.eps)?;
        if n.max_iterations == 0 {
            return Err(FreddiError::ConfigError(
                "max_iterations must be >= 1".to_string(),
            ));
        }

        for band in &self.output.bands {
            require_positive(&format!("band {} lambda", band.name), band.lambda)?;
            require_positive(&format!("band {} zero_point", band.name), band.zero_point)?;
        }
        Ok(())
    }
}
