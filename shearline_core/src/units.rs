//! # Unit Types
//!
//! Type-safe wrappers for engineering units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Shear wall work uses a small, consistent set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! The core solvers operate on raw `f64` fields with unit suffixes in their
//! names (`span_ft`, `vx_lb`); these wrappers are for API boundaries and
//! display conversions.
//!
//! ## US Customary Units (Primary)
//!
//! Shearline uses US customary units internally as this matches US building codes:
//! - Length: feet (ft), inches (in)
//! - Force: pounds (lb), kips (k = 1000 lb)
//! - Moment: foot-pounds (ft-lb), kip-feet (k-ft)
//! - Distributed load: pounds per linear foot (plf), kips per linear foot (klf)
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::units::{Feet, Kips, Pounds};
//!
//! let span = Feet(26.0);
//! let shear = Pounds(42_500.0);
//! let shear_kips: Kips = shear.into();
//! assert_eq!(shear_kips.0, 42.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in kips (1 kip = 1000 pounds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

impl From<Pounds> for Kips {
    fn from(lb: Pounds) -> Self {
        Kips(lb.0 / 1000.0)
    }
}

impl From<Kips> for Pounds {
    fn from(k: Kips) -> Self {
        Pounds(k.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in foot-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtLb(pub f64);

/// Moment in kip-feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KipFt(pub f64);

impl From<FtLb> for KipFt {
    fn from(ftlb: FtLb) -> Self {
        KipFt(ftlb.0 / 1000.0)
    }
}

impl From<KipFt> for FtLb {
    fn from(kipft: KipFt) -> Self {
        FtLb(kipft.0 * 1000.0)
    }
}

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Distributed load in pounds per linear foot (plf)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlF(pub f64);

/// Distributed load in kips per linear foot (klf)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KlF(pub f64);

impl From<PlF> for KlF {
    fn from(plf: PlF) -> Self {
        KlF(plf.0 / 1000.0)
    }
}

impl From<KlF> for PlF {
    fn from(klf: KlF) -> Self {
        PlF(klf.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Pounds);
impl_arithmetic!(Kips);
impl_arithmetic!(FtLb);
impl_arithmetic!(KipFt);
impl_arithmetic!(PlF);
impl_arithmetic!(KlF);
