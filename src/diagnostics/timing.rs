use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Phases of a clustering run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Index,
    Expand,
    Assemble,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Index => "index",
            Stage::Expand => "expand",
            Stage::Assemble => "assemble",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Wall-clock trace of one run. `total_ms` covers the whole call, so it also
/// includes the gaps between stages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTimings {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl RunTimings {
    /// Runs `f` and appends its wall time under `stage`.
    pub(crate) fn measure<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.stages.push(StageTiming {
            stage,
            elapsed_ms: elapsed_ms(start),
        });
        out
    }

    pub fn stage_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }

    /// `index=0.120ms expand=1.400ms ...` in execution order.
    pub fn stage_summary(&self) -> String {
        self.stages
            .iter()
            .map(|s| format!("{}={:.3}ms", s.stage.name(), s.elapsed_ms))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_recorded_in_order() {
        let mut timings = RunTimings::default();
        let n = timings.measure(Stage::Index, || 3);
        timings.measure(Stage::Expand, || ());
        assert_eq!(n, 3);
        assert!(timings.stage_ms(Stage::Index).is_some());
        assert!(timings.stage_ms(Stage::Assemble).is_none());
        let summary = timings.stage_summary();
        assert!(summary.starts_with("index="), "{summary}");
        assert!(summary.contains(" expand="), "{summary}");
    }

    #[test]
    fn serializes_stage_names() {
        let mut timings = RunTimings::default();
        timings.measure(Stage::Assemble, || ());
        let json = serde_json::to_value(&timings).unwrap();
        assert_eq!(json["stages"][0]["stage"], "assemble");
        assert!(json["totalMs"].is_number());
    }
}
