//! Page fraction to scene window mapping.

use scrollytale_core::progress::{SCENE_COUNT, SceneIndex};

/// Five disjoint, equal windows over the whole page, one per scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneWindows;

impl SceneWindows {
    /// Share of the page each scene occupies.
    pub const WINDOW: f64 = 1.0 / SCENE_COUNT as f64;

    /// Returns the scene containing `page_fraction` and the progress within
    /// it. The fraction is clamped to `[0, 1]` first; NaN counts as 0.
    /// The very bottom of the page is scene 5 at progress 1.
    #[must_use]
    pub fn locate(self, page_fraction: f64) -> (SceneIndex, f64) {
        let fraction = if page_fraction.is_nan() {
            0.0
        } else {
            page_fraction.clamp(0.0, 1.0)
        };

        let scaled = fraction * f64::from(SCENE_COUNT);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = (scaled.floor() as u8).min(SCENE_COUNT - 1);
        let progress = (scaled - f64::from(position)).clamp(0.0, 1.0);

        let scene = SceneIndex::all()
            .nth(usize::from(position))
            .unwrap_or(SceneIndex::LAST);
        (scene, progress)
    }

    /// The page fraction range covered by `scene`.
    #[must_use]
    pub fn bounds(self, scene: SceneIndex) -> (f64, f64) {
        let start = f64::from(scene.get() - 1) * Self::WINDOW;
        (start, start + Self::WINDOW)
    }
}
