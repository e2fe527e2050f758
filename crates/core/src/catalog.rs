//! Product catalog: project categories, glass types, tints and frames.
//!
//! The wizard submits display labels (`"Clear Glass"`, `"Other: Low-E 8mm"`),
//! while API clients may send ids (`"clear"`). [`find`] accepts either.

use serde::Serialize;

/// Base rate (PHP per m²) used when a category cannot be resolved.
pub const DEFAULT_BASE_RATE: f64 = 1200.0;
/// Multiplier used when a glass type or frame cannot be resolved.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Id shared by every "Other – please specify" option.
pub const OTHER_ID: &str = "other";

// ---------------------------------------------------------------------------
// Option types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// PHP per square meter.
    pub base_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlassType {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
    pub thickness: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameMaterial {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
}

/// Anything addressable by id or label.
pub trait CatalogOption: Copy {
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

macro_rules! impl_catalog_option {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl CatalogOption for $ty {
                fn id(&self) -> &'static str {
                    self.id
                }
                fn label(&self) -> &'static str {
                    self.label
                }
            }
        )+
    };
}

impl_catalog_option!(ProjectCategory, GlassType, ColorOption, FrameMaterial);

// ---------------------------------------------------------------------------
// Catalog data
// ---------------------------------------------------------------------------

pub const PROJECT_CATEGORIES: &[ProjectCategory] = &[
    ProjectCategory {
        id: "storefront",
        label: "Storefront",
        description: "Full commercial front with door & windows",
        base_rate: 1800.0,
    },
    ProjectCategory {
        id: "sliding-window",
        label: "Sliding Window",
        description: "Horizontal sliding window panel",
        base_rate: 1200.0,
    },
    ProjectCategory {
        id: "glass-door",
        label: "Glass Door",
        description: "Swing or sliding door with frame",
        base_rate: 2200.0,
    },
    ProjectCategory {
        id: "glass-partition",
        label: "Glass Partition",
        description: "Interior divider or office partition",
        base_rate: 1500.0,
    },
    ProjectCategory {
        id: "awning-window",
        label: "Awning Window",
        description: "Top-hinged outward opening window",
        base_rate: 1100.0,
    },
    ProjectCategory {
        id: "fixed-window",
        label: "Fixed Window",
        description: "Non-operable picture window",
        base_rate: 900.0,
    },
    ProjectCategory {
        id: OTHER_ID,
        label: "Other",
        description: "Other – Please specify",
        base_rate: DEFAULT_BASE_RATE,
    },
];

pub const GLASS_TYPES: &[GlassType] = &[
    GlassType {
        id: "clear",
        label: "Clear Glass",
        description: "Standard transparency, maximum light",
        multiplier: 1.0,
        thickness: "6mm standard",
    },
    GlassType {
        id: "bronze",
        label: "Bronze Glass",
        description: "Warm tint, reduces glare & heat",
        multiplier: 1.25,
        thickness: "6mm tinted",
    },
    GlassType {
        id: "frosted",
        label: "Frosted Glass",
        description: "Diffused light, privacy-enhancing",
        multiplier: 1.35,
        thickness: "6mm acid-etched",
    },
    GlassType {
        id: "tempered",
        label: "Tempered Glass",
        description: "Safety-grade, 5× stronger than clear",
        multiplier: 1.6,
        thickness: "10mm tempered",
    },
    GlassType {
        id: OTHER_ID,
        label: "Other",
        description: "Other – Please specify",
        multiplier: DEFAULT_MULTIPLIER,
        thickness: "Custom",
    },
];

pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption { id: "clear", label: "Clear", description: "No tint" },
    ColorOption { id: "bronze", label: "Bronze", description: "Warm amber tint" },
    ColorOption { id: "gray", label: "Gray", description: "Neutral gray tint" },
    ColorOption { id: "green", label: "Green", description: "Green tint" },
    ColorOption { id: "blue", label: "Blue", description: "Blue tint" },
    ColorOption { id: OTHER_ID, label: "Other", description: "Other – Please specify" },
];

pub const FRAME_MATERIALS: &[FrameMaterial] = &[
    FrameMaterial {
        id: "aluminum",
        label: "Aluminum Frame",
        description: "Lightweight, rust-proof, standard finish",
        multiplier: 1.0,
    },
    FrameMaterial {
        id: "steel",
        label: "Steel Frame",
        description: "Heavy-duty, industrial look",
        multiplier: 1.3,
    },
    FrameMaterial {
        id: "stainless",
        label: "Stainless Frame",
        description: "Premium finish, corrosion-resistant",
        multiplier: 1.5,
    },
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// True when a submitted value selects an "Other" option
/// (`"other"`, `"Other"`, `"Other: custom storefront"`).
pub fn is_other(value: &str) -> bool {
    value.trim().to_lowercase().starts_with(OTHER_ID)
}

/// Resolve a submitted id or label against `options`, case-insensitively.
///
/// "Other" values resolve to the option whose id is `other`, if the list
/// has one.
pub fn find<T: CatalogOption>(options: &[T], value: &str) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if is_other(value) {
        return options.iter().copied().find(|o| o.id() == OTHER_ID);
    }
    options
        .iter()
        .copied()
        .find(|o| o.id().eq_ignore_ascii_case(value) || o.label().eq_ignore_ascii_case(value))
}

/// Base rate for a category, defaulting to [`DEFAULT_BASE_RATE`].
pub fn base_rate_for(category: &str) -> f64 {
    find(PROJECT_CATEGORIES, category).map_or(DEFAULT_BASE_RATE, |c| c.base_rate)
}

/// Glass multiplier, defaulting to [`DEFAULT_MULTIPLIER`].
pub fn glass_multiplier_for(glass: &str) -> f64 {
    find(GLASS_TYPES, glass).map_or(DEFAULT_MULTIPLIER, |g| g.multiplier)
}

/// Frame multiplier, defaulting to [`DEFAULT_MULTIPLIER`].
pub fn frame_multiplier_for(frame: &str) -> f64 {
    find(FRAME_MATERIALS, frame).map_or(DEFAULT_MULTIPLIER, |f| f.multiplier)
}

/// The full catalog, as served to the quotation wizard.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub project_categories: &'static [ProjectCategory],
    pub glass_types: &'static [GlassType],
    pub colors: &'static [ColorOption],
    pub frame_materials: &'static [FrameMaterial],
}

pub fn catalog() -> Catalog {
    Catalog {
        project_categories: PROJECT_CATEGORIES,
        glass_types: GLASS_TYPES,
        colors: COLOR_OPTIONS,
        frame_materials: FRAME_MATERIALS,
    }
}
