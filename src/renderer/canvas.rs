//! Canvas 2D renderer
//!
//! Images are created lazily the first time a sprite is drawn. A sprite drawn
//! before its image finished loading is silently skipped; one whose image
//! failed to load is logged once and skipped from then on.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::assets::Sprite;
use crate::error::GameError;
use crate::sim::{DrawCommand, Frame, Star, Viewport};

const BACKGROUND: &str = "black";
const STAR_COLOR: &str = "white";

/// Draws simulated frames onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    images: HashMap<Sprite, HtmlImageElement>,
    missing: HashSet<Sprite>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport) -> Self {
        Self {
            ctx,
            viewport,
            images: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    /// Replay a frame's display list in order
    pub fn render(&mut self, frame: &Frame) {
        for command in &frame.commands {
            match command {
                DrawCommand::Clear => self.clear(),
                DrawCommand::Star(star) => self.star(star),
                DrawCommand::Sprite { sprite, pos } => {
                    self.blit(*sprite, pos.x as f64, pos.y as f64)
                }
            }
        }
    }

    fn clear(&self) {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
    }

    fn star(&self, star: &Star) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(star.pos.x as f64, star.pos.y as f64, star.radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(STAR_COLOR);
        self.ctx.fill();
    }

    fn blit(&mut self, sprite: Sprite, x: f64, y: f64) {
        if self.missing.contains(&sprite) {
            return;
        }
        let Some(image) = self.image(sprite) else {
            return;
        };
        if !image.complete() {
            return;
        }
        if image.natural_width() == 0 {
            let err = GameError::MissingAsset { path: sprite.path() };
            log::warn!("{err}, sprite will not be drawn");
            self.missing.insert(sprite);
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element(&image, x, y);
    }

    fn image(&mut self, sprite: Sprite) -> Option<HtmlImageElement> {
        if let Some(image) = self.images.get(&sprite) {
            return Some(image.clone());
        }
        match HtmlImageElement::new() {
            Ok(image) => {
                image.set_src(&sprite.path());
                self.images.insert(sprite, image.clone());
                Some(image)
            }
            Err(e) => {
                log::error!("Failed to create image element: {:?}", e);
                self.missing.insert(sprite);
                None
            }
        }
    }
}
