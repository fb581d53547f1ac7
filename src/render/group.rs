use crate::error::ChartResult;

use super::{CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Path(path) => path.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Primitive counts across a group subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimitiveCounts {
    pub lines: usize,
    pub rects: usize,
    pub circles: usize,
    pub paths: usize,
    pub texts: usize,
}

impl PrimitiveCounts {
    #[must_use]
    pub fn total(self) -> usize {
        self.lines + self.rects + self.circles + self.paths + self.texts
    }
}

/// Node of the output tree. Coordinates of `primitives` and `children` are
/// relative to the group origin, which sits at `translate` in parent space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveGroup {
    pub class: String,
    pub translate: (f64, f64),
    pub primitives: Vec<Primitive>,
    pub children: Vec<PrimitiveGroup>,
}

impl PrimitiveGroup {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn translated(mut self, x: f64, y: f64) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.primitives.push(Primitive::Line(line));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.primitives.push(Primitive::Rect(rect));
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.primitives.push(Primitive::Circle(circle));
    }

    pub fn push_path(&mut self, path: PathPrimitive) {
        self.primitives.push(Primitive::Path(path));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.primitives.push(Primitive::Text(text));
    }

    pub fn push_child(&mut self, child: PrimitiveGroup) {
        self.children.push(child);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.children.iter().all(PrimitiveGroup::is_empty)
    }

    /// Depth-first search, including `self`.
    #[must_use]
    pub fn find(&self, class: &str) -> Option<&PrimitiveGroup> {
        if self.class == class {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(class))
    }

    /// All groups with `class` in depth-first order, including `self`.
    #[must_use]
    pub fn find_all<'a>(&'a self, class: &str) -> Vec<&'a PrimitiveGroup> {
        let mut found = Vec::new();
        self.collect_class(class, &mut found);
        found
    }

    fn collect_class<'a>(&'a self, class: &str, found: &mut Vec<&'a PrimitiveGroup>) {
        if self.class == class {
            found.push(self);
        }
        for child in &self.children {
            child.collect_class(class, found);
        }
    }

    /// Texts directly owned by this group.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Lines directly owned by this group.
    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    #[must_use]
    pub fn counts(&self) -> PrimitiveCounts {
        let mut counts = PrimitiveCounts::default();
        self.accumulate_counts(&mut counts);
        counts
    }

    fn accumulate_counts(&self, counts: &mut PrimitiveCounts) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line(_) => counts.lines += 1,
                Primitive::Rect(_) => counts.rects += 1,
                Primitive::Circle(_) => counts.circles += 1,
                Primitive::Path(_) => counts.paths += 1,
                Primitive::Text(_) => counts.texts += 1,
            }
        }
        for child in &self.children {
            child.accumulate_counts(counts);
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.translate.0.is_finite() || !self.translate.1.is_finite() {
            return Err(crate::error::ChartError::InvalidData(format!(
                "group `{}` translation must be finite",
                self.class
            )));
        }
        for primitive in &self.primitives {
            primitive.validate()?;
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}
