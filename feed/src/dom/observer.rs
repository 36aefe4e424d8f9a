//! Intersection observation
//!
//! Models the browser's `IntersectionObserver` closely enough to drive the
//! staggered reveal: a threshold, a root margin applied to the viewport,
//! and a set of observed posts that each receive entries until unobserved.

use std::collections::BTreeSet;

use crate::markup::Element;

/// Axis-aligned rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two rectangles, `None` when disjoint
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < x || bottom < y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

/// CSS-style margin around the root, in pixels (negative shrinks)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Grow (or shrink) `rect` by the margin
    pub fn apply(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x - self.left,
            rect.y - self.top,
            rect.width + self.left + self.right,
            rect.height + self.top + self.bottom,
        )
    }
}

impl std::fmt::Display for RootMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction of the target required to count as intersecting
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Compute the entry for a post laid out at `target` inside `viewport`
    ///
    /// Entries are only delivered when the threshold is crossed, so
    /// `is_intersecting` already folds in the threshold.
    pub fn measure(&self, index: usize, target: &Rect, viewport: &Rect) -> IntersectionEntry {
        let root = self.root_margin.apply(viewport);
        let ratio = match target.intersection(&root) {
            Some(overlap) if target.area() > 0.0 => overlap.area() / target.area(),
            Some(_) => 1.0,
            None => 0.0,
        };
        IntersectionEntry {
            index,
            ratio,
            is_intersecting: ratio > 0.0 && ratio >= self.threshold,
        }
    }

    pub fn intersects(&self, target: &Rect, viewport: &Rect) -> bool {
        self.measure(0, target, viewport).is_intersecting
    }
}

/// One observation result for a post (by feed index)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub index: usize,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// What the callback wants done with the target afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Keep,
    Unobserve,
}

pub type IntersectionCallback =
    Box<dyn Fn(&IntersectionEntry, &mut Element) -> Observation + Send + Sync>;

pub struct IntersectionObserver {
    options: ObserverOptions,
    observed: BTreeSet<usize>,
    callback: IntersectionCallback,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions, callback: IntersectionCallback) -> Self {
        Self {
            options,
            observed: BTreeSet::new(),
            callback,
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn observe(&mut self, index: usize) {
        self.observed.insert(index);
    }

    pub fn unobserve(&mut self, index: usize) {
        self.observed.remove(&index);
    }

    pub fn is_observing(&self, index: usize) -> bool {
        self.observed.contains(&index)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Run the callback for an observed target
    pub(crate) fn notify(&mut self, entry: &IntersectionEntry, target: &mut Element) {
        if !self.is_observing(entry.index) {
            return;
        }
        if (self.callback)(entry, target) == Observation::Unobserve {
            self.unobserve(entry.index);
        }
    }
}

impl std::fmt::Debug for IntersectionObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntersectionObserver")
            .field("options", &self.options)
            .field("observed", &self.observed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal_options() -> ObserverOptions {
        ObserverOptions {
            threshold: 0.15,
            root_margin: RootMargin {
                bottom: -80.0,
                ..RootMargin::default()
            },
        }
    }

    #[test]
    fn root_margin_display() {
        assert_eq!(
            reveal_options().root_margin.to_string(),
            "0px 0px -80px 0px"
        );
    }

    #[test]
    fn positive_margin_grows_viewport() {
        let margin = RootMargin {
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
            left: 10.0,
        };
        let root = margin.apply(&Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(root, Rect::new(-10.0, -10.0, 120.0, 120.0));
    }

    #[test]
    fn negative_bottom_margin_shrinks_viewport() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let root = reveal_options().root_margin.apply(&viewport);
        assert_eq!(root.bottom(), 720.0);
    }

    #[test]
    fn post_below_fold_is_not_intersecting() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let post = Rect::new(0.0, 900.0, 600.0, 400.0);
        assert!(!reveal_options().intersects(&post, &viewport));
    }

    #[test]
    fn post_peeking_into_margin_is_not_intersecting() {
        // Top 60px are inside the viewport but below the -80px margin
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let post = Rect::new(0.0, 740.0, 600.0, 400.0);
        assert!(!reveal_options().intersects(&post, &viewport));
    }

    #[test]
    fn threshold_boundary() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        // 80px of a 400px post inside the root: 20% >= 15%
        let enough = Rect::new(0.0, 640.0, 600.0, 400.0);
        // 40px of 400px: 10% < 15%
        let too_little = Rect::new(0.0, 680.0, 600.0, 400.0);

        let entry = reveal_options().measure(3, &enough, &viewport);
        assert_eq!(entry.index, 3);
        assert!((entry.ratio - 0.2).abs() < 1e-9);
        assert!(entry.is_intersecting);
        assert!(!reveal_options().intersects(&too_little, &viewport));
    }

    #[test]
    fn observer_tracks_targets() {
        let mut observer = IntersectionObserver::new(
            reveal_options(),
            Box::new(|_: &IntersectionEntry, _: &mut Element| Observation::Unobserve),
        );
        observer.observe(0);
        observer.observe(1);
        assert_eq!(observer.observed_count(), 2);

        let mut target = Element::new("article");
        let entry = IntersectionEntry {
            index: 1,
            ratio: 1.0,
            is_intersecting: true,
        };
        observer.notify(&entry, &mut target);

        assert!(observer.is_observing(0));
        assert!(!observer.is_observing(1));
    }

    #[test]
    fn unobserved_targets_are_not_notified() {
        let mut observer = IntersectionObserver::new(
            reveal_options(),
            Box::new(|_: &IntersectionEntry, target: &mut Element| {
                target.add_class("touched");
                Observation::Keep
            }),
        );
        let mut target = Element::new("article");
        let entry = IntersectionEntry {
            index: 5,
            ratio: 1.0,
            is_intersecting: true,
        };

        observer.notify(&entry, &mut target);

        assert!(!target.has_class("touched"));
    }
}
