use crate::error::Result;
use crate::footprint::FootprintSet;
use crate::geometry::Planar;

use super::params::ConsolidationParams;
use super::reduce::ReducePass;

/// Where a [`ConsolidationRun`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// More passes may change the set.
    Running,
    /// The last pass left the footprint count unchanged.
    Converged,
    /// The pass budget ran out before convergence.
    BudgetExhausted,
}

/// Final result of a consolidation.
#[derive(Debug, Clone)]
pub struct Consolidation<G> {
    pub footprints: FootprintSet<G>,
    /// Number of passes executed, never more than the budget.
    pub passes: usize,
    /// `false` if the run stopped on its pass budget.
    pub converged: bool,
}

/// Working state of one consolidation, advanced one pass at a time.
///
/// The run owns its working set. Each [`step`](Self::step) executes exactly
/// one pass, so callers needing a deadline can stop between steps.
#[derive(Debug, Clone)]
pub struct ConsolidationRun<G> {
    pass: ReducePass,
    current: FootprintSet<G>,
    pass_index: usize,
    previous_count: Option<usize>,
    max_passes: usize,
    state: RunState,
}

impl<G: Planar> ConsolidationRun<G> {
    /// Starts a run over `footprints`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid parameters, or
    /// `GeometryError::UnprojectedCoordinateSystem` for geographic input.
    pub fn new(footprints: FootprintSet<G>, params: ConsolidationParams) -> Result<Self> {
        params.validate()?;
        footprints.crs().require_projected()?;
        let state = if params.max_passes == 0 {
            RunState::BudgetExhausted
        } else {
            RunState::Running
        };
        Ok(Self {
            pass: ReducePass::new(params),
            current: footprints,
            pass_index: 0,
            previous_count: None,
            max_passes: params.max_passes,
            state,
        })
    }

    /// Executes the next pass unless the run has finished.
    ///
    /// On error the working set is left as it was before the pass.
    ///
    /// # Errors
    ///
    /// Propagates any error of the pass unchanged.
    pub fn step(&mut self) -> Result<RunState> {
        if self.is_finished() {
            return Ok(self.state);
        }
        let before = self.current.len();
        let output = self.pass.execute(&self.current)?;
        self.current = output.footprints;
        self.pass_index += 1;
        self.previous_count = Some(before);

        let after = self.current.len();
        tracing::debug!(
            pass = self.pass_index,
            before,
            after,
            resolved = output.resolved,
            "reduction pass complete"
        );

        self.state = if after == before {
            RunState::Converged
        } else if self.pass_index >= self.max_passes {
            RunState::BudgetExhausted
        } else {
            RunState::Running
        };
        Ok(self.state)
    }
}

impl<G> ConsolidationRun<G> {
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state != RunState::Running
    }

    /// Number of passes executed so far.
    #[must_use]
    pub fn pass_index(&self) -> usize {
        self.pass_index
    }

    /// Footprint count before the most recent pass.
    #[must_use]
    pub fn previous_count(&self) -> Option<usize> {
        self.previous_count
    }

    #[must_use]
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// The working set.
    #[must_use]
    pub fn current(&self) -> &FootprintSet<G> {
        &self.current
    }

    /// Ends the run, handing back the working set.
    #[must_use]
    pub fn into_consolidation(self) -> Consolidation<G> {
        Consolidation {
            footprints: self.current,
            passes: self.pass_index,
            converged: self.state == RunState::Converged,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::footprint::Crs;
    use geo::{coord, point, Geometry, Rect};

    fn unit_square() -> Geometry<f64> {
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        Geometry::Polygon(rect.to_polygon())
    }

    #[test]
    fn steps_until_count_stabilizes() {
        let set = FootprintSet::from_geometries(Crs::LAMBERT_93, (0..4).map(|_| unit_square()));
        let mut run = ConsolidationRun::new(set, ConsolidationParams::new()).unwrap();
        assert_eq!(run.max_passes(), ConsolidationParams::new().max_passes);

        assert_eq!(run.step().unwrap(), RunState::Running);
        assert_eq!(run.current().len(), 2);
        assert_eq!(run.previous_count(), Some(4));
        assert_eq!(run.step().unwrap(), RunState::Running);
        assert_eq!(run.current().len(), 1);
        assert_eq!(run.step().unwrap(), RunState::Converged);
        assert_eq!(run.current().len(), 1);

        // Finished runs do not execute further passes.
        assert_eq!(run.step().unwrap(), RunState::Converged);
        assert_eq!(run.pass_index(), 3);
        let done = run.into_consolidation();
        assert!(done.converged);
        assert_eq!(done.passes, 3);
    }

    #[test]
    fn zero_budget_never_runs() {
        let set = FootprintSet::from_geometries(Crs::LAMBERT_93, (0..2).map(|_| unit_square()));
        let params = ConsolidationParams::new().with_max_passes(0);
        let mut run = ConsolidationRun::new(set, params).unwrap();
        assert_eq!(run.state(), RunState::BudgetExhausted);
        assert_eq!(run.step().unwrap(), RunState::BudgetExhausted);
        let done = run.into_consolidation();
        assert_eq!(done.passes, 0);
        assert_eq!(done.footprints.len(), 2);
        assert!(!done.converged);
    }

    #[test]
    fn failed_pass_leaves_working_set_intact() {
        let mut set =
            FootprintSet::from_geometries(Crs::LAMBERT_93, (0..2).map(|_| unit_square()));
        set.push(point! { x: 0.0, y: 0.0 }.into());
        let mut run = ConsolidationRun::new(set, ConsolidationParams::new()).unwrap();
        assert!(run.step().is_err());
        assert_eq!(run.pass_index(), 0);
        assert_eq!(run.current().len(), 3);
        assert_eq!(run.state(), RunState::Running);
    }

    #[test]
    fn rejects_geographic_input_up_front() {
        let set = FootprintSet::from_geometries(Crs::WGS84, vec![unit_square()]);
        assert!(ConsolidationRun::new(set, ConsolidationParams::new()).is_err());
    }

    #[test]
    fn rejects_invalid_threshold_up_front() {
        let set = FootprintSet::from_geometries(Crs::LAMBERT_93, vec![unit_square()]);
        let params = ConsolidationParams::new().with_threshold(2.0);
        assert!(ConsolidationRun::new(set, params).is_err());
    }
}
