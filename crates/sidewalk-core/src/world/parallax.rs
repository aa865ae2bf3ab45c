/// One background strip. The renderer draws `texture` tiled at `offset()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxLayer {
    pub name: &'static str,
    /// Multiplier on the world scroll speed.
    pub speed: f64,
    pub scale: f64,
    /// Unscaled width of one texture tile.
    pub tile_width: f64,
    pub scroll_x: f64,
}

impl ParallaxLayer {
    pub const fn new(name: &'static str, speed: f64, scale: f64, tile_width: f64) -> Self {
        Self {
            name,
            speed,
            scale,
            tile_width,
            scroll_x: 0.0,
        }
    }

    pub fn advance(&mut self, scroll_speed: f64, dt: f64, direction: f64) {
        self.scroll_x += scroll_speed * self.speed * dt * direction;
    }

    /// Scroll position folded into a single tile.
    pub fn offset(&self) -> f64 {
        let tile = self.tile_width * self.scale;
        if tile > 0.0 {
            self.scroll_x.rem_euclid(tile)
        } else {
            0.0
        }
    }
}

/// Sky, buildings, trees, then the fence and sidewalk the player runs on.
pub fn default_layers() -> Vec<ParallaxLayer> {
    vec![
        ParallaxLayer::new("sky", 0.1, 1.0, 1863.0),
        ParallaxLayer::new("buildings", 0.4, 1.4, 900.0),
        ParallaxLayer::new("trees", 0.7, 1.3, 912.0),
        ParallaxLayer::new("fence", 1.0, 1.5, 1000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_scroll_at_their_own_rate() {
        let mut layers = default_layers();
        for layer in &mut layers {
            layer.advance(250.0, 1.0, 1.0);
        }
        let moved: Vec<f64> = layers.iter().map(|l| l.scroll_x).collect();
        assert_eq!(moved, vec![25.0, 100.0, 175.0, 250.0]);
    }

    #[test]
    fn offset_stays_inside_one_tile() {
        let mut fence = ParallaxLayer::new("fence", 1.0, 1.5, 1000.0);
        fence.scroll_x = -100.0;
        assert_eq!(fence.offset(), 1400.0);
        fence.scroll_x = 3100.0;
        assert_eq!(fence.offset(), 100.0);
    }
}
