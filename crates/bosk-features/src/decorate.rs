use hashbrown::HashMap;
use rand::Rng;

use bosk_blocks::BlockRegistry;
use bosk_geom::Pos3;
use bosk_world::{DecorationRule, GridBuf};

use crate::catalog::FeatureCatalog;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureCount {
    pub attempts: u32,
    pub placed: u32,
}

#[derive(Default, Clone, Debug)]
pub struct DecorationStats {
    pub attempts: u32,
    pub placed: u32,
    pub by_feature: HashMap<String, FeatureCount>,
}

/// Run the decoration rules over a generated grid. This is the stand-in
/// for the host's per-chunk decoration hook: one driver invocation per
/// drawn seed position.
pub fn decorate<R: Rng + ?Sized>(
    grid: &mut GridBuf,
    reg: &BlockRegistry,
    catalog: &FeatureCatalog,
    rules: &[DecorationRule],
    rng: &mut R,
) -> DecorationStats {
    let mut stats = DecorationStats::default();
    for rule in rules {
        let Some(feature) = catalog.get(&rule.feature) else {
            log::warn!(target: "decorate", "unknown feature '{}' in decoration rules", rule.feature);
            continue;
        };
        let counts = stats.by_feature.entry(rule.feature.clone()).or_default();
        for _ in 0..rule.count {
            let x = rng.gen_range(0..grid.sx as i32);
            let z = rng.gen_range(0..grid.sz as i32);
            if let Some(chance) = rule.chance {
                if rng.r#gen::<f32>() >= chance {
                    continue;
                }
            }
            // Seed one above the column surface; drivers descend from
            // there to true ground contact.
            let y = grid
                .top_non_air(x, z)
                .map(|top| (top + 1).min(grid.sy as i32 - 1))
                .unwrap_or(0);
            let origin = Pos3::new(x, y, z);
            counts.attempts += 1;
            stats.attempts += 1;
            if feature.place(grid, reg, origin, rng) {
                counts.placed += 1;
                stats.placed += 1;
                log::debug!(target: "decorate", "{} placed at ({}, {}, {})", rule.feature, x, y, z);
            }
        }
    }
    log::info!(
        target: "decorate",
        "decoration pass: {} rules, {}/{} placements",
        rules.len(),
        stats.placed,
        stats.attempts
    );
    stats
}
