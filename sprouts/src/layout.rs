//! Initial dot placement strategies.

use crate::config::GameConfig;
use crate::geometry::math::distance;
use crate::model::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Optional shape mask; candidates it rejects are never placed.
pub type Mask = Box<dyn Fn(Vec2) -> bool>;

pub trait Layout {
    /// Up to `count` positions inside the configured board. May return fewer
    /// when the strategy runs out of room.
    fn place(&mut self, count: usize, config: &GameConfig) -> Vec<Vec2>;
}

impl<L: Layout + ?Sized> Layout for Box<L> {
    fn place(&mut self, count: usize, config: &GameConfig) -> Vec<Vec2> {
        (**self).place(count, config)
    }
}

/// Uniform random scatter with a minimum spacing between dots.
pub struct ScatterLayout {
    rng: StdRng,
    mask: Option<Mask>,
}

impl ScatterLayout {
    pub fn new(seed: u64) -> Self {
        ScatterLayout { rng: StdRng::seed_from_u64(seed), mask: None }
    }

    pub fn with_mask(mut self, mask: impl Fn(Vec2) -> bool + 'static) -> Self {
        self.mask = Some(Box::new(mask));
        self
    }
}

impl Layout for ScatterLayout {
    fn place(&mut self, count: usize, config: &GameConfig) -> Vec<Vec2> {
        let span_x = (config.width - 2.0 * config.margin).max(0.0);
        let span_y = (config.height - 2.0 * config.margin).max(0.0);
        let mut out: Vec<Vec2> = Vec::with_capacity(count);
        let mut tries = 0usize;
        while out.len() < count && tries < count * 200 {
            tries += 1;
            let p = Vec2::new(
                config.margin + self.rng.gen::<f32>() * span_x,
                config.margin + self.rng.gen::<f32>() * span_y,
            );
            if self.mask.as_ref().map_or(false, |m| !m(p)) {
                continue;
            }
            if out.iter().any(|&q| distance(p, q) < config.min_dot_spacing) {
                continue;
            }
            out.push(p);
        }
        if out.len() < count {
            tracing::warn!(requested = count, placed = out.len(), tries, "scatter layout ran out of room");
        }
        out
    }
}

/// Evenly spaced cells over the playable area, row by row.
#[derive(Default)]
pub struct GridLayout {
    mask: Option<Mask>,
}

impl GridLayout {
    pub fn new() -> Self {
        GridLayout { mask: None }
    }

    pub fn with_mask(mut self, mask: impl Fn(Vec2) -> bool + 'static) -> Self {
        self.mask = Some(Box::new(mask));
        self
    }

    fn cells(cells: usize, config: &GameConfig) -> Vec<Vec2> {
        let w = (config.width - 2.0 * config.margin).max(1.0);
        let h = (config.height - 2.0 * config.margin).max(1.0);
        let cols = ((cells as f32 * w / h).sqrt().ceil() as usize).max(1);
        let rows = cells.div_ceil(cols).max(1);
        let (cw, ch) = (w / cols as f32, h / rows as f32);
        let mut pts = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                pts.push(Vec2::new(
                    config.margin + (c as f32 + 0.5) * cw,
                    config.margin + (r as f32 + 0.5) * ch,
                ));
            }
        }
        pts
    }
}

impl Layout for GridLayout {
    fn place(&mut self, count: usize, config: &GameConfig) -> Vec<Vec2> {
        if count == 0 {
            return Vec::new();
        }
        // Refine the grid until enough cells survive the mask.
        for density in 1..=32 {
            let mut pts = GridLayout::cells(count * density, config);
            if let Some(mask) = &self.mask {
                pts.retain(|&p| mask(p));
            }
            if pts.len() >= count {
                let step = pts.len() as f32 / count as f32;
                return (0..count).map(|i| pts[(i as f32 * step) as usize]).collect();
            }
        }
        tracing::warn!(requested = count, "grid layout mask admits too few cells");
        let mut pts = GridLayout::cells(count * 32, config);
        if let Some(mask) = &self.mask {
            pts.retain(|&p| mask(p));
        }
        pts
    }
}

/// Explicit positions, used for scripted boards.
#[derive(Clone, Debug, Default)]
pub struct FixedLayout(pub Vec<Vec2>);

impl Layout for FixedLayout {
    fn place(&mut self, count: usize, _config: &GameConfig) -> Vec<Vec2> {
        self.0.iter().copied().take(count).collect()
    }
}
