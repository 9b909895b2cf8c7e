use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Wall-clock durations of pipeline steps, in execution order.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        self.steps.push(StepTiming {
            name: name.clone(),
            duration,
        });
        *self.step_map.entry(name).or_insert(Duration::ZERO) += duration;
    }

    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Sum of all steps recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn summary(&self) -> String {
        let total = self.total_duration();
        let mut out = String::new();
        out.push_str("Pipeline Timing Summary:\n");
        out.push_str(&format!("{:-<60}\n", ""));
        for step in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                "{:<30} {:>12.3}ms ({:>5.1}%)\n",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                percentage
            ));
        }
        out.push_str(&format!("{:-<60}\n", ""));
        out.push_str(&format!(
            "{:<30} {:>12.3}ms\n",
            "Total",
            total.as_secs_f64() * 1000.0
        ));
        out
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_accumulate_by_name() {
        let mut timings = PipelineTimings::new();
        timings.add_step("demosaic", Duration::from_millis(5));
        timings.add_step("decode", Duration::from_millis(1));
        timings.add_step("demosaic", Duration::from_millis(7));

        assert_eq!(timings.steps().len(), 3);
        assert_eq!(timings.get_step("demosaic"), Some(Duration::from_millis(12)));
        assert_eq!(timings.get_step("encode"), None);
        assert_eq!(timings.total_duration(), Duration::from_millis(13));
    }

    #[test]
    fn test_summary_lists_every_step() {
        let mut timings = PipelineTimings::new();
        timings.record(Timer::start("decode"));
        timings.add_step("write", Duration::from_millis(2));

        let summary = timings.summary();
        assert!(summary.contains("decode"));
        assert!(summary.contains("write"));
        assert!(summary.contains("Total"));
    }
}
