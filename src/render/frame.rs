use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{PrimitiveCounts, PrimitiveGroup};

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub root: PrimitiveGroup,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            root: PrimitiveGroup::new("chart"),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: PrimitiveGroup) -> Self {
        self.root.push_child(group);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        self.root.validate()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> PrimitiveCounts {
        self.root.counts()
    }

    #[must_use]
    pub fn find(&self, class: &str) -> Option<&PrimitiveGroup> {
        self.root.find(class)
    }

    #[must_use]
    pub fn find_all<'a>(&'a self, class: &str) -> Vec<&'a PrimitiveGroup> {
        self.root.find_all(class)
    }
}
