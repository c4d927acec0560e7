//! Embedded biomarker panel: CONTROL vs. ECI measurements
//!
//! Four markers (GFAP, Ki67, DCX, CB), one CONTROL and one ECI sample
//! each, four measurements per sample. Samples are immutable once built.

use std::fmt;

/// Experimental group a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Control,
    Eci,
}

impl Group {
    /// Display name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Group::Control => "CONTROL",
            Group::Eci => "ECI",
        }
    }

    /// The other group of the pair
    pub fn other(&self) -> Group {
        match self {
            Group::Control => Group::Eci,
            Group::Eci => Group::Control,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Biomarker identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Gfap,
    Ki67,
    Dcx,
    Cb,
}

impl Marker {
    /// Panel order used throughout reports
    pub const ALL: [Marker; 4] = [Marker::Gfap, Marker::Ki67, Marker::Dcx, Marker::Cb];

    /// Display name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Marker::Gfap => "GFAP",
            Marker::Ki67 => "Ki67",
            Marker::Dcx => "DCX",
            Marker::Cb => "CB",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A marker with its CONTROL and ECI measurement samples
#[derive(Debug, Clone)]
pub struct MarkerPair {
    pub marker: Marker,
    pub control: Vec<f64>,
    pub eci: Vec<f64>,
}

impl MarkerPair {
    /// Create a marker pair from raw measurements
    pub fn new(marker: Marker, control: Vec<f64>, eci: Vec<f64>) -> Self {
        Self {
            marker,
            control,
            eci,
        }
    }

    /// Validate the panel invariant: both samples present, equal length,
    /// and at least `min_len` observations each
    pub fn validate(&self, min_len: usize) -> Result<(), String> {
        if self.control.len() != self.eci.len() {
            return Err(format!(
                "{}: CONTROL and ECI samples must have equal length ({} vs {})",
                self.marker,
                self.control.len(),
                self.eci.len()
            ));
        }

        if self.control.len() < min_len {
            return Err(format!(
                "{}: need at least {} observations per group, got {}",
                self.marker,
                min_len,
                self.control.len()
            ));
        }

        Ok(())
    }

    /// Sample for a given group
    pub fn sample(&self, group: Group) -> &[f64] {
        match group {
            Group::Control => &self.control,
            Group::Eci => &self.eci,
        }
    }
}

/// The embedded CONTROL vs. ECI panel (four measurements per group)
pub fn builtin_panel() -> Vec<MarkerPair> {
    vec![
        MarkerPair::new(
            Marker::Gfap,
            vec![0.000_144_30, 0.000_299_1, 0.000_465_2, 0.000_216],
            vec![0.000_403_639, 0.000_348_07, 0.000_298, 0.000_13],
        ),
        MarkerPair::new(
            Marker::Ki67,
            vec![0.000_073_12, 0.000_247_77, 0.000_136_13, 0.000_443],
            vec![0.000_039_6, 0.000_044_999_3, 0.000_076_5, 0.000_58],
        ),
        MarkerPair::new(
            Marker::Dcx,
            vec![0.000_416_15, 0.000_338_35, 0.000_352_744, 0.000_357],
            vec![0.000_288_45, 0.000_178_043, 0.000_303, 0.000_430_5],
        ),
        MarkerPair::new(
            Marker::Cb,
            vec![26_528.432_3, 11_969.211, 42_891.911_3, 93_528.26],
            vec![15_550.297, 15_226.414_5, 17_100.714, 49_788.77],
        ),
    ]
}
