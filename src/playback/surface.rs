/// Rectangular bounds of the output surface, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Full-screen visual layer the engine renders into
///
/// Created once per session, sized to the display bounds, and reused across
/// item replacements. The player handle is detachable — teardown removes
/// it — so a layer can outlive its engine, which is exactly the state the
/// session's no-player guard protects against.
#[derive(Debug)]
pub struct PlayerLayer<E> {
    bounds: SurfaceBounds,
    needs_display_on_bounds_change: bool,
    player: Option<E>,
}

impl<E> PlayerLayer<E> {
    /// Attach a player to a fresh layer sized to `bounds`
    ///
    /// The layer redraws on bounds changes from the start, matching how the
    /// surface is configured on first play.
    pub fn attached(bounds: SurfaceBounds, player: E) -> Self {
        Self {
            bounds,
            needs_display_on_bounds_change: true,
            player: Some(player),
        }
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    /// Resize the layer, e.g. on display rotation
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
    }

    pub fn needs_display_on_bounds_change(&self) -> bool {
        self.needs_display_on_bounds_change
    }

    pub fn player(&self) -> Option<&E> {
        self.player.as_ref()
    }

    /// Mutable access to the attached player, if any
    pub fn player_mut(&mut self) -> Option<&mut E> {
        self.player.as_mut()
    }

    /// Remove and return the attached player
    pub fn detach_player(&mut self) -> Option<E> {
        self.player.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_attachment_and_detach() {
        let mut layer = PlayerLayer::attached(SurfaceBounds::new(1920.0, 1080.0), 42u32);
        assert!(layer.needs_display_on_bounds_change());
        assert_eq!(layer.player(), Some(&42));

        let player = layer.detach_player();
        assert_eq!(player, Some(42));
        assert!(layer.player().is_none());
        assert!(layer.detach_player().is_none());
    }

    #[test]
    fn test_bounds_update() {
        let mut layer = PlayerLayer::attached(SurfaceBounds::new(100.0, 50.0), ());
        layer.set_bounds(SurfaceBounds::new(50.0, 100.0));
        assert_eq!(layer.bounds(), SurfaceBounds::new(50.0, 100.0));
    }
}
