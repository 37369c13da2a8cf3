use std::collections::HashMap;
use std::path::Path;

use garden_grammar::prelude::*;
use glam::Vec2;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Fill color of a terminal symbol.
pub fn default_color(symbol: Symbol) -> [u8; 3] {
    match symbol {
        Symbol::GrassRect => [118, 170, 82],
        Symbol::PathRect => [214, 196, 160],
        Symbol::TreeCircle => [46, 104, 48],
        Symbol::WaterCircle | Symbol::WaterRect => [82, 150, 214],
        Symbol::Fountain => [150, 200, 235],
        Symbol::RoseBed => [206, 64, 92],
        Symbol::TulipBed => [240, 170, 60],
        Symbol::Garden | Symbol::Area | Symbol::PathSystem | Symbol::FlowerArea => [200, 0, 200],
    }
}

/// Image size, plot extent and palette used to draw a layout.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels.
    pub image_size: (u32, u32),
    /// Plot size in garden units, mapped onto the whole image.
    pub extent: Vec2,
    pub background: [u8; 3],
    colors: HashMap<Symbol, [u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), extent: Vec2) -> Self {
        Self {
            image_size,
            extent,
            background: [238, 232, 214],
            colors: HashMap::new(),
        }
    }

    /// Config sized to `plot` at `pixels_per_unit`.
    pub fn for_plot(plot: &Plot, pixels_per_unit: f32) -> Self {
        let w = (plot.width * pixels_per_unit).round().max(1.0) as u32;
        let h = (plot.height * pixels_per_unit).round().max(1.0) as u32;
        Self::new((w, h), Vec2::new(plot.width, plot.height))
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn set_color(&mut self, symbol: Symbol, color: [u8; 3]) {
        self.colors.insert(symbol, color);
    }

    pub fn color(&self, symbol: Symbol) -> [u8; 3] {
        self.colors
            .get(&symbol)
            .copied()
            .unwrap_or_else(|| default_color(symbol))
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.image_size.0 as f32 / self.extent.x.max(f32::EPSILON),
            self.image_size.1 as f32 / self.extent.y.max(f32::EPSILON),
        )
    }
}

/// Draws the terminals of `graph` in draw-layer order.
pub fn render_layout(graph: &Graph, config: &RenderConfig) -> RgbImage {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let scale = config.scale();

    for node in layout(graph) {
        let symbol = node.symbol();
        if symbol.is_nonterminal() {
            continue;
        }
        let color = Rgb(config.color(symbol));
        match node.shape() {
            Shape::Rect(r) => fill_rect(&mut img, &r, scale, color),
            Shape::Circle(c) => fill_circle(&mut img, &c, scale, color),
        }
    }

    img
}

/// Renders `graph` and writes it to `path` as PNG.
pub fn render_layout_to_png(
    graph: &Graph,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let img = render_layout(graph, config);
    img.save(path.as_ref())?;
    tracing::info!("Wrote {}.", path.as_ref().display());
    Ok(())
}

fn pixel_span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
    let lo = lo.floor().max(0.0) as u32;
    let hi = (hi.ceil().max(0.0) as u32).min(limit);
    lo.min(hi)..hi
}

fn fill_rect(img: &mut RgbImage, r: &Rect, scale: Vec2, color: Rgb<u8>) {
    let xs = pixel_span(r.x * scale.x, r.right() * scale.x, img.width());
    let ys = pixel_span(r.y * scale.y, r.bottom() * scale.y, img.height());
    for y in ys {
        for x in xs.clone() {
            img.put_pixel(x, y, color);
        }
    }
}

fn fill_circle(img: &mut RgbImage, c: &Circle, scale: Vec2, color: Rgb<u8>) {
    let b = c.bounds();
    let xs = pixel_span(b.x * scale.x, b.right() * scale.x, img.width());
    let ys = pixel_span(b.y * scale.y, b.bottom() * scale.y, img.height());
    let r2 = c.r * c.r;
    for y in ys {
        for x in xs.clone() {
            let p = Vec2::new((x as f32 + 0.5) / scale.x, (y as f32 + 0.5) / scale.y);
            if p.distance_squared(c.center) <= r2 {
                img.put_pixel(x, y, color);
            }
        }
    }
}
