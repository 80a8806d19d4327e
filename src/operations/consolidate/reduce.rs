use std::collections::HashSet;

use crate::error::Result;
use crate::footprint::{Footprint, FootprintId, FootprintSet};
use crate::geometry::{require_polygonal, Planar};

use super::params::{ConsolidationParams, OverlapPolicy};
use super::score::OverlapScorer;

type Entry<'s, G> = (FootprintId, &'s Footprint<G>);

/// Outcome of one reduction pass.
#[derive(Debug, Clone)]
pub struct PassOutput<G> {
    /// Carried-forward footprints in their original order, then merged ones.
    pub footprints: FootprintSet<G>,
    /// Number of overlapping pairs resolved during the pass.
    pub resolved: usize,
}

/// One greedy overlap-resolution sweep over a footprint set.
///
/// Each footprint is resolved at most once per pass. For a footprint `a`,
/// the first later, still unresolved, non-degenerate footprint whose score
/// exceeds the threshold is taken as its partner. No attempt is made to find
/// the best partner, so the result depends on scan order.
#[derive(Debug, Clone, Copy)]
pub struct ReducePass {
    params: ConsolidationParams,
    scorer: OverlapScorer,
}

impl ReducePass {
    /// Creates a new `ReducePass` operation.
    #[must_use]
    pub fn new(params: ConsolidationParams) -> Self {
        Self {
            params,
            scorer: OverlapScorer::new(params.scoring),
        }
    }

    /// Executes one pass over `set`, returning its successor.
    ///
    /// The input is only read. Zero-area footprints are carried forward
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidGeometryKind` if any footprint is not a
    /// polygon or multi-polygon, `GeometryError::UnprojectedCoordinateSystem`
    /// if the set is in geographic coordinates, or `ConfigError` for invalid
    /// parameters. No partial result is produced.
    pub fn execute<G: Planar>(&self, set: &FootprintSet<G>) -> Result<PassOutput<G>> {
        self.params.validate()?;
        set.crs().require_projected()?;

        let snapshot: Vec<Entry<'_, G>> = set.iter().collect();
        for &(id, footprint) in &snapshot {
            require_polygonal(id, footprint.geometry())?;
        }

        let mut consumed: HashSet<FootprintId> = HashSet::with_capacity(snapshot.len());
        let mut dropped: HashSet<FootprintId> = HashSet::new();
        let mut merged: Vec<G> = Vec::new();
        let mut resolved = 0;

        for (i, &(id_a, a)) in snapshot.iter().enumerate() {
            if !consumed.insert(id_a) || a.is_degenerate() {
                continue;
            }
            let Some((id_b, b)) = self.first_match((id_a, a), &snapshot[i + 1..], &consumed)?
            else {
                continue;
            };
            consumed.insert(id_b);
            resolved += 1;

            match self.params.policy {
                OverlapPolicy::RemoveSmaller => {
                    let loser = if b.area() > a.area() { id_a } else { id_b };
                    dropped.insert(loser);
                }
                OverlapPolicy::MergeEnvelope => {
                    dropped.insert(id_a);
                    dropped.insert(id_b);
                    merged.push(a.geometry().union_envelope(b.geometry()));
                }
            }
        }

        Ok(PassOutput {
            footprints: set.carry_forward(|id| !dropped.contains(&id), merged),
            resolved,
        })
    }

    fn first_match<'s, G: Planar>(
        &self,
        a: Entry<'s, G>,
        later: &[Entry<'s, G>],
        consumed: &HashSet<FootprintId>,
    ) -> Result<Option<Entry<'s, G>>> {
        for &(id_b, b) in later {
            if consumed.contains(&id_b) || b.is_degenerate() {
                continue;
            }
            let score = self.scorer.score(a, (id_b, b))?;
            if score.exceeds(self.params.threshold) {
                tracing::trace!(a = ?a.0, b = ?id_b, ratio = score.ratio, "overlap found");
                return Ok(Some((id_b, b)));
            }
        }
        Ok(None)
    }
}
