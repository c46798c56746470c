use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub decorations: Vec<DecorationRule>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            flat: Flat::default(),
            height: Height::default(),
            surface: Surface::default(),
            decorations: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    Flat,
}

fn default_mode() -> Mode {
    Mode::Normal
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_thickness")]
    pub thickness: i32,
}
fn default_flat_thickness() -> i32 {
    4
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            thickness: default_flat_thickness(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_freq")]
    pub frequency: f32,
    #[serde(default = "default_min_y_ratio")]
    pub min_y_ratio: f32,
    #[serde(default = "default_max_y_ratio")]
    pub max_y_ratio: f32,
}
fn default_height_freq() -> f32 {
    0.02
}
fn default_min_y_ratio() -> f32 {
    0.15
}
fn default_max_y_ratio() -> f32 {
    0.55
}
impl Default for Height {
    fn default() -> Self {
        Self {
            frequency: default_height_freq(),
            min_y_ratio: default_min_y_ratio(),
            max_y_ratio: default_max_y_ratio(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_topsoil")]
    pub topsoil_thickness: i32,
    #[serde(default = "default_top_name")]
    pub top: String,
    #[serde(default)]
    pub subsoil: SubsoilNames,
}
#[derive(Clone, Debug, Deserialize)]
pub struct SubsoilNames {
    pub near_surface: String,
    pub deep: String,
}
fn default_topsoil() -> i32 {
    3
}
fn default_top_name() -> String {
    "grass".into()
}
impl Default for SubsoilNames {
    fn default() -> Self {
        Self {
            near_surface: "dirt".into(),
            deep: "stone".into(),
        }
    }
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            topsoil_thickness: default_topsoil(),
            top: default_top_name(),
            subsoil: SubsoilNames::default(),
        }
    }
}

/// One entry of the decoration pass: which catalog feature to run and how
/// many seed positions to draw for it.
#[derive(Clone, Debug, Deserialize)]
pub struct DecorationRule {
    pub feature: String,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Per-seed probability gate; unset means every seed is attempted.
    #[serde(default)]
    pub chance: Option<f32>,
}
fn default_count() -> u32 {
    8
}

// Flattened params used by generation and the decoration driver (snapshot
// of config)
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub flat_thickness: i32,
    pub height_frequency: f32,
    pub min_y_ratio: f32,
    pub max_y_ratio: f32,
    pub topsoil_thickness: i32,
    pub top: String,
    pub sub_near: String,
    pub sub_deep: String,
    pub decorations: Vec<DecorationRule>,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            flat_thickness: cfg.flat.thickness,
            height_frequency: cfg.height.frequency,
            min_y_ratio: cfg.height.min_y_ratio,
            max_y_ratio: cfg.height.max_y_ratio,
            topsoil_thickness: cfg.surface.topsoil_thickness,
            top: cfg.surface.top.clone(),
            sub_near: cfg.surface.subsoil.near_surface.clone(),
            sub_deep: cfg.surface.subsoil.deep.clone(),
            decorations: cfg.decorations.clone(),
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    Ok(toml::from_str(&s)?)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    Ok(WorldGenParams::from_config(&load_config_from_path(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: WorldGenConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.mode, Mode::Normal);
        let params = WorldGenParams::from_config(&cfg);
        assert_eq!(params.top, "grass");
        assert_eq!(params.sub_deep, "stone");
        assert!(params.decorations.is_empty());
    }

    #[test]
    fn decoration_rules_parse_with_defaults() {
        let cfg: WorldGenConfig = toml::from_str(
            r#"
            mode = "flat"

            [[decorations]]
            feature = "toadstool"
            count = 3

            [[decorations]]
            feature = "big_dripleaf"
            chance = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, Mode::Flat);
        assert_eq!(cfg.decorations.len(), 2);
        assert_eq!(cfg.decorations[0].count, 3);
        assert_eq!(cfg.decorations[1].count, 8);
        assert_eq!(cfg.decorations[1].chance, Some(0.5));
    }
}
