//! Rendering surface abstraction
//!
//! The updater never touches a real document tree. Everything it needs from
//! the renderer (lanes of cell slots, tick markers, the scrollable viewport and
//! the full redraw entry point) goes through [`RenderSurface`].

/// Capabilities the updater needs from a timing diagram renderer
///
/// Lanes are addressed by index from 0. Each lane is a sequence of half-tick
/// slots holding a symbolic reference; two consecutive slots (`2*t`, `2*t+1`)
/// form tick `t`.
pub trait RenderSurface {
    /// Regenerate every lane, cell and marker from the complete waveform description
    fn full_redraw(&mut self);

    /// Number of slots in a lane, or `None` if the lane does not exist
    fn lane_len(&self, lane: usize) -> Option<usize>;

    /// Number of lanes in the diagram
    ///
    /// The default probes [`RenderSurface::lane_len`] from 0 until the first
    /// missing lane. Renderers that know their lane count should override it.
    fn lane_count(&self) -> usize {
        let mut count = 0;
        while self.lane_len(count).is_some() {
            count += 1;
        }
        count
    }

    /// Symbolic reference stored in a slot
    fn slot(&self, lane: usize, pos: usize) -> Option<&str>;

    /// Overwrite the symbolic reference of a slot.
    /// Returns `false` (and changes nothing) if the slot does not exist.
    fn set_slot(&mut self, lane: usize, pos: usize, symbol: &str) -> bool;

    /// Number of tick-boundary markers
    fn marker_count(&self) -> usize;

    /// Style class of a marker
    fn marker_class(&self, index: usize) -> Option<&str>;

    /// Hide a marker until the next full redraw
    fn hide_marker(&mut self, index: usize);

    /// Scroll the viewport to its maximal horizontal extent
    fn scroll_to_end(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface with fixed lane lengths that only implements the required methods
    struct ProbeOnly {
        lanes: Vec<usize>,
    }

    impl RenderSurface for ProbeOnly {
        fn full_redraw(&mut self) {}

        fn lane_len(&self, lane: usize) -> Option<usize> {
            self.lanes.get(lane).copied()
        }

        fn slot(&self, _lane: usize, _pos: usize) -> Option<&str> {
            None
        }

        fn set_slot(&mut self, _lane: usize, _pos: usize, _symbol: &str) -> bool {
            false
        }

        fn marker_count(&self) -> usize {
            0
        }

        fn marker_class(&self, _index: usize) -> Option<&str> {
            None
        }

        fn hide_marker(&mut self, _index: usize) {}

        fn scroll_to_end(&mut self) {}
    }

    #[test]
    fn test_default_lane_count_probes() {
        assert_eq!(ProbeOnly { lanes: vec![] }.lane_count(), 0);
        assert_eq!(ProbeOnly { lanes: vec![6, 6, 0] }.lane_count(), 3);
    }
}
