use crate::conf::RenderConfig;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// How cell fill relates to request volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Every requested cell gets the same fill.
    #[default]
    Presence,
    /// Fill alpha scales with the cell's share of the busiest cell's count.
    ByCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub fill: Rgba<u8>,
    pub outline: Rgba<u8>,
    pub shading: Shading,
    pub opacity_step: u8,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for OverlayStyle {
    fn from(cfg: &RenderConfig) -> Self {
        Self {
            fill: Rgba(cfg.fill),
            outline: Rgba(cfg.outline),
            shading: cfg.shading,
            opacity_step: cfg.opacity_step,
        }
    }
}

impl OverlayStyle {
    /// Fill colour for a cell requested `count` times when the busiest cell has `max`.
    pub(crate) fn fill_for(&self, count: usize, max: usize) -> Rgba<u8> {
        match self.shading {
            Shading::Presence => self.fill,
            Shading::ByCount => {
                let Rgba([r, g, b, a]) = self.fill;
                let scaled = (usize::from(a) * count).div_ceil(max.max(1));
                Rgba([r, g, b, scaled.max(1).min(usize::from(a)) as u8])
            }
        }
    }
}
