use std::ops::RangeInclusive;

/// Debugging switches consulted at the start of each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugOptions {
    /// Draw the cast rays on the map
    pub show_rays: bool,
    /// Overlay the top-down map
    pub show_map: bool,
    /// Cast only the centre column
    pub one_ray: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            show_rays: false,
            show_map: true,
            one_ray: false,
        }
    }
}

impl DebugOptions {
    /// Rays are only worth recording when they will be drawn.
    #[inline]
    pub fn record_rays(&self) -> bool {
        self.show_rays && self.show_map
    }

    /// Screen columns to cast for a viewport `width` columns wide.
    pub fn column_range(&self, width: usize) -> RangeInclusive<usize> {
        if self.one_ray {
            width / 2..=width / 2
        } else {
            0..=width.saturating_sub(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_map_only() {
        let options = DebugOptions::default();
        assert!(options.show_map);
        assert!(!options.show_rays);
        assert!(!options.one_ray);
        assert!(!options.record_rays());
    }

    #[test]
    fn rays_need_the_map() {
        let options = DebugOptions {
            show_rays: true,
            show_map: false,
            one_ray: false,
        };
        assert!(!options.record_rays());
    }

    #[test]
    fn column_ranges() {
        let all = DebugOptions::default();
        assert_eq!(all.column_range(300), 0..=299);

        let one = DebugOptions {
            one_ray: true,
            ..DebugOptions::default()
        };
        assert_eq!(one.column_range(300), 150..=150);
        assert_eq!(one.column_range(301), 150..=150);
    }
}
