//! Geometry primitives for scroll math
//!
//! Offsets, velocities and translations share the [`Point`] type. By
//! convention a content offset is the translation applied to the content, so
//! the viewport shows `{x: -offset.x, y: -offset.y, width, height}` in
//! content coordinates.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// One of the two scroll axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis (default)
    #[default]
    X,
    /// Vertical axis
    Y,
}

/// Per-axis on/off flags, used for drag direction locking and bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisMask {
    pub x: bool,
    pub y: bool,
}

impl AxisMask {
    pub const BOTH: AxisMask = AxisMask { x: true, y: true };

    pub const fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }

    /// Mask with only `axis` enabled
    pub fn only(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::new(true, false),
            Axis::Y => Self::new(false, true),
        }
    }

    pub fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Zero the components of `p` on disabled axes
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            if self.x { p.x } else { 0.0 },
            if self.y { p.y } else { 0.0 },
        )
    }
}

/// A 2D point, offset or velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`
    #[inline]
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Copy with the component along `axis` replaced
    #[inline]
    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
        self
    }

    /// Apply `f` to both components
    #[inline]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y))
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Replace non-finite components with zero
    pub fn sanitized(self) -> Self {
        self.map(|v| if v.is_finite() { v } else { 0.0 })
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Width and height of a viewport or of scrollable content
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Copy with the extent along `axis` replaced
    #[inline]
    pub fn with_extent(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => self.width = value,
            Axis::Y => self.height = value,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Clamp negative and non-finite dimensions to zero
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self::new(fix(self.width), fix(self.height))
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Leading edge along `axis`
    #[inline]
    pub fn start(&self, axis: Axis) -> f32 {
        self.origin().get(axis)
    }

    /// Trailing edge along `axis`
    #[inline]
    pub fn end(&self, axis: Axis) -> f32 {
        self.start(axis) + self.size().extent(axis)
    }

    /// Whether an item occupying `self` should be rendered for the visible
    /// rect `visible`. The visible rect is padded by a quarter of its extent
    /// on each side so items are ready just before they scroll in.
    pub fn needs_render(&self, visible: &Rect) -> bool {
        [Axis::X, Axis::Y].into_iter().all(|axis| {
            let v_start = visible.start(axis);
            let v_extent = visible.size().extent(axis);
            v_start - 0.25 * v_extent <= self.end(axis) && self.start(axis) <= v_start + 1.25 * v_extent
        })
    }

    /// The visible rect expressed in this item's own coordinate space
    pub fn visible_rect_in(&self, visible: &Rect) -> Rect {
        Rect::new(
            visible.x - self.x,
            visible.y - self.y,
            visible.width,
            visible.height,
        )
    }
}
