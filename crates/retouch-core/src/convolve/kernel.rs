//! Convolution kernels and the built-in preset catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::InputError;

/// A square matrix of signed weights, flattened row-major.
///
/// The side length is always odd so the kernel has a center cell; the
/// radius used to center it over a destination pixel is `side / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Kernel {
    weights: Vec<f64>,
    side: usize,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// Fails with [`InputError::InvalidKernel`] unless `weights.len()` is the
    /// square of a positive odd integer.
    pub fn new(weights: Vec<f64>) -> Result<Self, InputError> {
        let len = weights.len();
        let side = (len as f64).sqrt().round() as usize;
        if len == 0 || side * side != len || side % 2 == 0 {
            return Err(InputError::InvalidKernel { len });
        }
        Ok(Self { weights, side })
    }

    /// Side length of the square.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Radius from the center cell to the edge (`side / 2`).
    #[inline]
    pub fn half_side(&self) -> usize {
        self.side / 2
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at row `cy`, column `cx`.
    #[inline]
    pub fn weight(&self, cy: usize, cx: usize) -> f64 {
        self.weights[cy * self.side + cx]
    }
}

impl TryFrom<Vec<f64>> for Kernel {
    type Error = InputError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<Kernel> for Vec<f64> {
    fn from(kernel: Kernel) -> Self {
        kernel.weights
    }
}

impl From<KernelPreset> for Kernel {
    fn from(preset: KernelPreset) -> Self {
        preset.kernel()
    }
}

/// Named spatial filters offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelPreset {
    /// Unsharp 3x3 cross; shown to users as "clarity".
    #[serde(alias = "clarity")]
    Sharpen,
    /// Diagonal relief.
    Emboss,
}

impl KernelPreset {
    /// Every preset, in display order.
    pub const ALL: [KernelPreset; 2] = [KernelPreset::Sharpen, KernelPreset::Emboss];

    /// Row-major 3x3 coefficients.
    pub fn weights(self) -> [f64; 9] {
        match self {
            KernelPreset::Sharpen => [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
            KernelPreset::Emboss => [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0],
        }
    }

    pub fn kernel(self) -> Kernel {
        Kernel {
            weights: self.weights().to_vec(),
            side: 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KernelPreset::Sharpen => "sharpen",
            KernelPreset::Emboss => "emboss",
        }
    }
}

impl fmt::Display for KernelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharpen" | "clarity" => Ok(KernelPreset::Sharpen),
            "emboss" => Ok(KernelPreset::Emboss),
            other => Err(format!("unknown kernel preset: {other}")),
        }
    }
}
