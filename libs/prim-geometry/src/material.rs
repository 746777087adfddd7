//! # Face Materials
//!
//! Per-facet colour, texture, material type and UV transform of a prim.
//! Each lookup falls back to the prim-wide default when the facet has no
//! entry of its own.

use std::collections::BTreeMap;

use config::constants::{
    DEFAULT_COLOR, FALLBACK_MATERIAL, MATERIAL_SUFFIXES, MATERIAL_TYPE_FULLBRIGHT,
    VARIATION_FULLBRIGHT, VARIATION_VERTEX_COLOR, VARIATION_VERTEX_COLOR_ALPHA,
};
use serde::{Deserialize, Serialize};

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        let [r, g, b, a] = DEFAULT_COLOR;
        Self::new(r, g, b, a)
    }
}

/// Texture placement on a face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvTransform {
    pub repeat_u: f64,
    pub repeat_v: f64,
    pub offset_u: f64,
    pub offset_v: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Default for UvTransform {
    fn default() -> Self {
        Self {
            repeat_u: 1.0,
            repeat_v: 1.0,
            offset_u: 0.0,
            offset_v: 0.0,
            rotation: 0.0,
        }
    }
}

/// Per-facet texture placement. Each field left unset keeps the prim's
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvOverride {
    pub repeat_u: Option<f64>,
    pub repeat_v: Option<f64>,
    pub offset_u: Option<f64>,
    pub offset_v: Option<f64>,
    pub rotation: Option<f64>,
}

impl UvOverride {
    /// Overrides only the rotation.
    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    /// `base` with the set fields replaced.
    ///
    /// # Examples
    /// ```
    /// use prim_geometry::{UvOverride, UvTransform};
    /// let base = UvTransform { repeat_u: 4.0, ..UvTransform::default() };
    /// let merged = UvOverride::rotation(1.0).apply(base);
    /// assert_eq!((merged.repeat_u, merged.rotation), (4.0, 1.0));
    /// ```
    pub fn apply(&self, base: UvTransform) -> UvTransform {
        UvTransform {
            repeat_u: self.repeat_u.unwrap_or(base.repeat_u),
            repeat_v: self.repeat_v.unwrap_or(base.repeat_v),
            offset_u: self.offset_u.unwrap_or(base.offset_u),
            offset_v: self.offset_v.unwrap_or(base.offset_v),
            rotation: self.rotation.unwrap_or(base.rotation),
        }
    }
}

/// A material that replaces every per-face material of the prim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialOverride {
    pub name: String,
    /// False while the renderer cannot provide the material yet.
    pub available: bool,
}

impl MaterialOverride {
    /// The override name, or the fallback material while it is unavailable.
    pub fn resolved_name(&self) -> &str {
        if self.available {
            &self.name
        } else {
            FALLBACK_MATERIAL
        }
    }
}

/// Material data of a prim, keyed by facet id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceMaterials {
    pub default_color: Color,
    pub colors: BTreeMap<usize, Color>,
    pub default_texture: String,
    pub textures: BTreeMap<usize, String>,
    pub default_material_type: u8,
    pub material_types: BTreeMap<usize, u8>,
    pub default_uv: UvTransform,
    pub uv_overrides: BTreeMap<usize, UvOverride>,
    pub material_override: Option<MaterialOverride>,
}

impl FaceMaterials {
    pub fn color(&self, facet: usize) -> Color {
        self.colors
            .get(&facet)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn texture(&self, facet: usize) -> &str {
        self.textures
            .get(&facet)
            .map_or(self.default_texture.as_str(), String::as_str)
    }

    pub fn is_fullbright(&self, facet: usize) -> bool {
        let material_type = self
            .material_types
            .get(&facet)
            .copied()
            .unwrap_or(self.default_material_type);
        material_type & MATERIAL_TYPE_FULLBRIGHT != 0
    }

    pub fn uv_transform(&self, facet: usize) -> UvTransform {
        self.uv_overrides
            .get(&facet)
            .map_or(self.default_uv, |uv| uv.apply(self.default_uv))
    }

    /// Name of the material a facet drawn in `color` renders with.
    ///
    /// The texture id gets the suffix of the face's material variation
    /// unless a material override is set.
    ///
    /// # Examples
    /// ```
    /// use prim_geometry::{Color, FaceMaterials};
    /// let materials = FaceMaterials {
    ///     default_texture: "brick".to_string(),
    ///     ..FaceMaterials::default()
    /// };
    /// assert_eq!(materials.material_name(0, Color::default()), "brickvcol");
    /// ```
    pub fn material_name(&self, facet: usize, color: Color) -> String {
        if let Some(material_override) = &self.material_override {
            return material_override.resolved_name().to_string();
        }
        let variation = material_variation(color.a, self.is_fullbright(facet));
        format!("{}{}", self.texture(facet), material_suffix(variation))
    }
}

/// Material variation of a vertex-coloured face.
pub fn material_variation(alpha: f32, fullbright: bool) -> usize {
    let variation = if alpha < 1.0 {
        VARIATION_VERTEX_COLOR_ALPHA
    } else {
        VARIATION_VERTEX_COLOR
    };
    if fullbright {
        variation | VARIATION_FULLBRIGHT
    } else {
        variation
    }
}

/// Material name suffix of a variation; unknown variations have none.
pub fn material_suffix(variation: usize) -> &'static str {
    MATERIAL_SUFFIXES.get(variation).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials() -> FaceMaterials {
        let mut materials = FaceMaterials {
            default_texture: "stone".to_string(),
            ..FaceMaterials::default()
        };
        materials.textures.insert(2, "wood".to_string());
        materials.colors.insert(1, Color::new(1.0, 0.0, 0.0, 0.5));
        materials.material_types.insert(3, MATERIAL_TYPE_FULLBRIGHT);
        materials
    }

    #[test]
    fn test_lookups_fall_back_to_defaults() {
        let materials = materials();
        assert_eq!(materials.texture(0), "stone");
        assert_eq!(materials.texture(2), "wood");
        assert_eq!(materials.color(0), Color::default());
        assert_eq!(materials.color(1).a, 0.5);
        assert!(!materials.is_fullbright(0));
        assert!(materials.is_fullbright(3));
        assert_eq!(materials.uv_transform(5), UvTransform::default());
    }

    #[test]
    fn test_uv_override_keeps_unset_defaults() {
        let mut materials = materials();
        materials.default_uv = UvTransform {
            repeat_u: 2.0,
            repeat_v: 3.0,
            offset_u: 0.1,
            offset_v: 0.2,
            rotation: 0.0,
        };
        materials.uv_overrides.insert(4, UvOverride::rotation(0.5));

        let facet = materials.uv_transform(4);
        assert_eq!(facet.rotation, 0.5);
        assert_eq!(facet.repeat_u, 2.0);
        assert_eq!(facet.repeat_v, 3.0);
        assert_eq!(facet.offset_u, 0.1);
        assert_eq!(facet.offset_v, 0.2);
        assert_eq!(materials.uv_transform(0), materials.default_uv);
    }

    #[test]
    fn test_uv_override_parses_partial_entries() {
        let uv: UvOverride = serde_json::from_str(r#"{ "offset_v": 0.75 }"#).unwrap();
        assert_eq!(uv.offset_v, Some(0.75));
        assert_eq!(uv.repeat_u, None);
        assert_eq!(uv.rotation, None);
    }

    #[test]
    fn test_variation_suffixes() {
        assert_eq!(material_suffix(material_variation(1.0, false)), "vcol");
        assert_eq!(material_suffix(material_variation(0.5, false)), "vcolalpha");
        assert_eq!(material_suffix(material_variation(1.0, true)), "fbvcol");
        assert_eq!(material_suffix(material_variation(0.5, true)), "fbvcolalpha");
        assert_eq!(material_suffix(42), "");
    }

    #[test]
    fn test_material_names() {
        let materials = materials();
        assert_eq!(materials.material_name(0, materials.color(0)), "stonevcol");
        assert_eq!(materials.material_name(1, materials.color(1)), "stonevcolalpha");
        assert_eq!(materials.material_name(2, materials.color(2)), "woodvcol");
        assert_eq!(materials.material_name(3, materials.color(3)), "stonefbvcol");
    }

    #[test]
    fn test_override_replaces_every_material() {
        let mut materials = materials();
        materials.material_override = Some(MaterialOverride {
            name: "Glow".to_string(),
            available: true,
        });
        assert_eq!(materials.material_name(2, Color::default()), "Glow");

        materials.material_override = Some(MaterialOverride {
            name: "Glow".to_string(),
            available: false,
        });
        assert_eq!(materials.material_name(2, Color::default()), FALLBACK_MATERIAL);
    }
}
