//! Per-pass snapshots for visualizing a consolidation run.
//!
//! The driver hands each snapshot to a [`FrameSink`] as a shared borrow of
//! the working set, so a sink can render or copy it but never alter it.

use std::fmt;

use crate::footprint::FootprintSet;

/// Position of a snapshot within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLabel {
    /// State before the pass with this zero-based index.
    Pass(usize),
    /// State after the run ended.
    Final,
}

/// Read-only view of the working set at a pass boundary.
#[derive(Debug)]
pub struct PassSnapshot<'a, G> {
    pub label: FrameLabel,
    pub footprints: &'a FootprintSet<G>,
}

impl<G> Clone for PassSnapshot<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for PassSnapshot<'_, G> {}

impl<'a, G> PassSnapshot<'a, G> {
    #[must_use]
    pub fn pass(index: usize, footprints: &'a FootprintSet<G>) -> Self {
        Self {
            label: FrameLabel::Pass(index),
            footprints,
        }
    }

    #[must_use]
    pub fn final_frame(footprints: &'a FootprintSet<G>) -> Self {
        Self {
            label: FrameLabel::Final,
            footprints,
        }
    }

    /// Number of footprints in the snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        self.footprints.len()
    }

    /// Index of the upcoming pass, or `None` for the final frame.
    #[must_use]
    pub fn pass_index(&self) -> Option<usize> {
        match self.label {
            FrameLabel::Pass(index) => Some(index),
            FrameLabel::Final => None,
        }
    }
}

/// Counter text drawn on animation frames, e.g. `Iter 2 | 14 bboxes`.
impl<G> fmt::Display for PassSnapshot<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            FrameLabel::Pass(index) => write!(f, "Iter {index} | {} bboxes", self.count()),
            FrameLabel::Final => write!(f, "Final | {} bboxes", self.count()),
        }
    }
}

/// Receiver of pass snapshots.
///
/// Delivery is fire-and-forget: the driver ignores what the sink does and
/// continues with the next pass once `deliver` returns.
pub trait FrameSink<G> {
    fn deliver(&mut self, snapshot: PassSnapshot<'_, G>);
}

/// Discards every snapshot.
impl<G> FrameSink<G> for () {
    fn deliver(&mut self, _snapshot: PassSnapshot<'_, G>) {}
}

/// An owned copy of one snapshot.
#[derive(Debug, Clone)]
pub struct RecordedFrame<G> {
    pub label: FrameLabel,
    pub caption: String,
    pub footprints: FootprintSet<G>,
}

/// Sink that keeps an independent copy of every snapshot.
#[derive(Debug, Clone)]
pub struct RecordingSink<G> {
    frames: Vec<RecordedFrame<G>>,
}

impl<G> Default for RecordingSink<G> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<G> RecordingSink<G> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded frames in delivery order.
    #[must_use]
    pub fn frames(&self) -> &[RecordedFrame<G>] {
        &self.frames
    }

    /// Captions of the recorded frames.
    #[must_use]
    pub fn captions(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.caption.as_str()).collect()
    }

    #[must_use]
    pub fn into_frames(self) -> Vec<RecordedFrame<G>> {
        self.frames
    }
}

impl<G: Clone> FrameSink<G> for RecordingSink<G> {
    fn deliver(&mut self, snapshot: PassSnapshot<'_, G>) {
        self.frames.push(RecordedFrame {
            label: snapshot.label,
            caption: snapshot.to_string(),
            footprints: snapshot.footprints.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::Crs;
    use geo::{coord, Geometry, Rect};

    fn unit_squares(n: usize) -> FootprintSet {
        FootprintSet::from_geometries(
            Crs::LAMBERT_93,
            (0..n).map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64 * 2.0;
                let rect = Rect::new(coord! { x: x, y: 0.0 }, coord! { x: x + 1.0, y: 1.0 });
                Geometry::Polygon(rect.to_polygon())
            }),
        )
    }

    #[test]
    fn captions_match_counter_text() {
        let set = unit_squares(3);
        assert_eq!(PassSnapshot::pass(4, &set).to_string(), "Iter 4 | 3 bboxes");
        assert_eq!(PassSnapshot::final_frame(&set).to_string(), "Final | 3 bboxes");
        assert_eq!(PassSnapshot::final_frame(&set).pass_index(), None);
    }

    #[test]
    fn recording_sink_copies_snapshots() {
        let mut set = unit_squares(2);
        let mut sink = RecordingSink::new();
        sink.deliver(PassSnapshot::pass(0, &set));
        set = unit_squares(1);
        sink.deliver(PassSnapshot::final_frame(&set));

        assert_eq!(sink.captions(), vec!["Iter 0 | 2 bboxes", "Final | 1 bboxes"]);
        assert_eq!(sink.frames()[0].footprints.len(), 2);
        assert_eq!(sink.frames()[1].label, FrameLabel::Final);

        let frames = sink.into_frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].label, FrameLabel::Pass(0));
        assert_eq!(frames[1].footprints.len(), 1);
    }
}
