use crate::error::Result;
use crate::footprint::FootprintSet;
use crate::frame::{FrameSink, PassSnapshot};
use crate::geometry::Planar;

use super::params::ConsolidationParams;
use super::run::{Consolidation, ConsolidationRun, RunState};

/// Repeats reduction passes until the footprint count stops changing or the
/// pass budget is spent.
///
/// Count stability is the convergence criterion: a pass that resolves no
/// pair leaves the count unchanged and ends the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Consolidate {
    params: ConsolidationParams,
}

impl Consolidate {
    /// Creates a new `Consolidate` operation.
    #[must_use]
    pub fn new(params: ConsolidationParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &ConsolidationParams {
        &self.params
    }

    /// Executes the consolidation, taking ownership of the input set.
    ///
    /// # Errors
    ///
    /// Returns the first configuration or geometry error; a failed pass ends
    /// the run without a result.
    pub fn execute<G: Planar>(&self, footprints: FootprintSet<G>) -> Result<Consolidation<G>> {
        self.execute_with_sink(footprints, &mut ())
    }

    /// Executes the consolidation, delivering a snapshot to `sink` before
    /// every pass and once more after the last one.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn execute_with_sink<G, S>(
        &self,
        footprints: FootprintSet<G>,
        sink: &mut S,
    ) -> Result<Consolidation<G>>
    where
        G: Planar,
        S: FrameSink<G> + ?Sized,
    {
        let initial = footprints.len();
        let mut run = ConsolidationRun::new(footprints, self.params)?;
        while !run.is_finished() {
            sink.deliver(PassSnapshot::pass(run.pass_index(), run.current()));
            run.step()?;
        }
        sink.deliver(PassSnapshot::final_frame(run.current()));

        let (passes, count) = (run.pass_index(), run.current().len());
        match run.state() {
            RunState::Converged => {
                tracing::info!(passes, initial, count, "consolidation converged");
            }
            RunState::BudgetExhausted => {
                tracing::warn!(passes, initial, count, "pass budget exhausted before convergence");
            }
            RunState::Running => {}
        }
        Ok(run.into_consolidation())
    }
}
