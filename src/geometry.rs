//! Axis-aligned rectangles in page units with a bottom-left origin.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Rect {
    pub fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Builds a rectangle from an origin (bottom-left corner) and a size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.top - self.bottom).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }

    /// Area shared by both rectangles; zero when they do not intersect.
    pub fn intersection_area(&self, other: &Self) -> f32 {
        let left = self.left.max(other.left);
        let bottom = self.bottom.max(other.bottom);
        let right = self.right.min(other.right);
        let top = self.top.min(other.top);

        if right <= left || top <= bottom {
            return 0.0;
        }
        (right - left) * (top - bottom)
    }

    /// Fraction of the smaller rectangle covered by the intersection.
    pub fn overlap_ratio(&self, other: &Self) -> f32 {
        let smaller = self.area().min(other.area());
        if smaller <= 0.0 {
            return 0.0;
        }
        self.intersection_area(other) / smaller
    }

    /// Horizontal distance from the right edge of `self` to the left edge of `next`.
    pub fn horizontal_gap(&self, next: &Self) -> f32 {
        next.left - self.right
    }

    pub fn padded(&self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.bottom - amount,
            self.right + amount,
            self.top + amount,
        )
    }

    pub fn clamped_to(&self, bounds: &Self) -> Self {
        Self::new(
            self.left.max(bounds.left),
            self.bottom.max(bounds.bottom),
            self.right.min(bounds.right),
            self.top.min(bounds.top),
        )
    }

    /// Union of every rectangle in the iterator, or `None` when it is empty.
    pub fn union_all<'a, I>(rects: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| match acc {
                Some(u) => Some(u.union(r)),
                None => Some(*r),
            })
    }
}
