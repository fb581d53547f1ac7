use crate::core::Viewport;

/// Source of the size a responsive chart should render at.
pub trait SizeSource {
    /// Current measurement, `None` until the host has reported one.
    fn measure(&self) -> Option<Viewport>;
}

/// Size of the parent container, updated by the host on layout changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParentSize {
    measured: Option<Viewport>,
}

impl ParentSize {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new measurement; zero-sized parents count as unmeasured.
    pub fn update(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        self.measured = viewport.is_valid().then_some(viewport);
    }
}

impl SizeSource for ParentSize {
    fn measure(&self) -> Option<Viewport> {
        self.measured
    }
}

/// Window size minus a fixed reserve for surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSize {
    window: Option<(u32, u32)>,
    reserve_width: u32,
    reserve_height: u32,
}

impl ScreenSize {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reserve(mut self, width: u32, height: u32) -> Self {
        self.reserve_width = width;
        self.reserve_height = height;
        self
    }

    /// Applied immediately; hosts that want debouncing do it upstream.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.window = Some((width, height));
    }
}

impl SizeSource for ScreenSize {
    fn measure(&self) -> Option<Viewport> {
        let (width, height) = self.window?;
        let viewport = Viewport::new(
            width.saturating_sub(self.reserve_width),
            height.saturating_sub(self.reserve_height),
        );
        viewport.is_valid().then_some(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::{ParentSize, ScreenSize, SizeSource};
    use crate::core::Viewport;

    #[test]
    fn screen_size_subtracts_reserve() {
        let mut screen = ScreenSize::new().with_reserve(40, 20);
        assert_eq!(screen.measure(), None);
        screen.on_resize(800, 600);
        assert_eq!(screen.measure(), Some(Viewport::new(760, 580)));
        screen.on_resize(30, 600);
        assert_eq!(screen.measure(), None);
    }

    #[test]
    fn parent_size_ignores_zero_measurements() {
        let mut parent = ParentSize::new();
        parent.update(0, 100);
        assert_eq!(parent.measure(), None);
        parent.update(300, 200);
        assert_eq!(parent.measure(), Some(Viewport::new(300, 200)));
    }
}
