// SPDX-License-Identifier: MPL-2.0

//! Filter catalog and per-pixel transforms
//!
//! Each filter is an ordered list of color adjustments with fixed parameters.
//! The math follows the CSS Filter Effects definitions on normalized channels,
//! clamping to [0, 1] after every step, so the CSS expression returned by
//! [`FilterDescriptor::css`] renders the same look in a web preview.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};

/// Filter types for preview and capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// No filter applied
    #[default]
    Normal,
    /// Faded sepia print
    Vintage,
    /// High contrast black & white
    Noir,
    /// Punchy saturation and contrast
    Chrome,
    /// Lifted, muted colors
    Fade,
    /// Amber tint
    Warm,
}

/// One color adjustment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Multiply every channel
    Brightness(f32),
    /// Scale distance from mid-gray
    Contrast(f32),
    /// Saturation (1.0 = unchanged, 0.0 = gray)
    Saturate(f32),
    /// Desaturate by amount (1.0 = fully gray)
    Grayscale(f32),
    /// Sepia tone by amount (1.0 = full sepia)
    Sepia(f32),
}

impl Adjustment {
    /// Apply to a normalized RGB triple, clamping the result
    #[inline]
    pub fn apply(&self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let out = match *self {
            Adjustment::Brightness(a) => [r * a, g * a, b * a],
            Adjustment::Contrast(a) => [
                (r - 0.5) * a + 0.5,
                (g - 0.5) * a + 0.5,
                (b - 0.5) * a + 0.5,
            ],
            Adjustment::Saturate(s) => mul(&saturate_matrix(s), [r, g, b]),
            Adjustment::Grayscale(a) => mul(&grayscale_matrix(a), [r, g, b]),
            Adjustment::Sepia(a) => mul(&sepia_matrix(a), [r, g, b]),
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }

    /// CSS filter function for this step
    pub fn css(&self) -> String {
        match self {
            Adjustment::Brightness(a) => format!("brightness({})", a),
            Adjustment::Contrast(a) => format!("contrast({})", a),
            Adjustment::Saturate(a) => format!("saturate({})", a),
            Adjustment::Grayscale(a) => format!("grayscale({})", a),
            Adjustment::Sepia(a) => format!("sepia({})", a),
        }
    }
}

type Matrix = [[f32; 3]; 3];

#[inline]
fn mul(m: &Matrix, v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

/// Immutable catalog entry: identity, label and transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDescriptor {
    pub id: FilterType,
    pub label: &'static str,
    pub adjustments: &'static [Adjustment],
}

const CATALOG: [FilterDescriptor; 6] = [
    FilterDescriptor {
        id: FilterType::Normal,
        label: "Normal",
        adjustments: &[],
    },
    FilterDescriptor {
        id: FilterType::Vintage,
        label: "Vintage",
        adjustments: &[
            Adjustment::Sepia(0.5),
            Adjustment::Contrast(1.1),
            Adjustment::Brightness(1.05),
        ],
    },
    FilterDescriptor {
        id: FilterType::Noir,
        label: "Noir",
        adjustments: &[
            Adjustment::Grayscale(1.0),
            Adjustment::Contrast(1.4),
            Adjustment::Brightness(0.9),
        ],
    },
    FilterDescriptor {
        id: FilterType::Chrome,
        label: "Chrome",
        adjustments: &[Adjustment::Saturate(1.5), Adjustment::Contrast(1.2)],
    },
    FilterDescriptor {
        id: FilterType::Fade,
        label: "Fade",
        adjustments: &[
            Adjustment::Brightness(1.1),
            Adjustment::Contrast(0.85),
            Adjustment::Saturate(0.7),
        ],
    },
    FilterDescriptor {
        id: FilterType::Warm,
        label: "Warm",
        adjustments: &[
            Adjustment::Sepia(0.3),
            Adjustment::Saturate(1.3),
            Adjustment::Brightness(1.05),
        ],
    },
];

impl FilterType {
    /// Get all filter variants for UI iteration
    pub const ALL: [FilterType; 6] = [
        FilterType::Normal,
        FilterType::Vintage,
        FilterType::Noir,
        FilterType::Chrome,
        FilterType::Fade,
        FilterType::Warm,
    ];

    /// Catalog entry for this filter
    pub fn descriptor(self) -> &'static FilterDescriptor {
        // CATALOG is declared in ALL order
        &CATALOG[self as usize]
    }

    /// Stable lowercase tag (also the serde representation)
    pub fn tag(self) -> &'static str {
        match self {
            FilterType::Normal => "normal",
            FilterType::Vintage => "vintage",
            FilterType::Noir => "noir",
            FilterType::Chrome => "chrome",
            FilterType::Fade => "fade",
            FilterType::Warm => "warm",
        }
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn is_identity(self) -> bool {
        self.descriptor().adjustments.is_empty()
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for FilterType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FilterType::ALL
            .into_iter()
            .find(|f| f.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::UnknownFilter(wanted.to_string()))
    }
}

impl FilterDescriptor {
    /// Transform one normalized RGB triple
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.adjustments
            .iter()
            .fold(rgb, |acc, adjustment| adjustment.apply(acc))
    }

    /// Transform one 8-bit RGBA pixel in place (alpha untouched)
    #[inline]
    pub fn apply_pixel(&self, px: &mut [u8]) {
        if self.adjustments.is_empty() {
            return;
        }
        let rgb = [px[0], px[1], px[2]].map(|c| c as f32 / 255.0);
        let out = self.apply_rgb(rgb);
        for (dst, c) in px.iter_mut().zip(out) {
            *dst = (c * 255.0).round() as u8;
        }
    }

    /// Transform a packed RGBA buffer in place
    pub fn apply_rgba(&self, data: &mut [u8]) {
        if self.adjustments.is_empty() {
            return;
        }
        for px in data.chunks_exact_mut(4) {
            self.apply_pixel(px);
        }
    }

    /// CSS `filter` value producing the same look, `"none"` for identity
    pub fn css(&self) -> String {
        if self.adjustments.is_empty() {
            return "none".to_string();
        }
        self.adjustments
            .iter()
            .map(Adjustment::css)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
