use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::trial::{SuccessRecord, TrialOutcome, TrialRunner};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use tracing::{info, instrument};

pub const DISCLAIMER: &str =
    "Note: This is a toy model illustrating narrow viable windows and basic chemical filtering.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub outside_window: u64,
    pub parse_failed: u64,
    pub unstable: u64,
    pub descriptor_faults: u64,
    pub successes: u64,
}

impl OutcomeTally {
    fn record(&mut self, outcome: &TrialOutcome) {
        let slot = match outcome {
            TrialOutcome::OutsideWindow => &mut self.outside_window,
            TrialOutcome::ParseFailed => &mut self.parse_failed,
            TrialOutcome::Unstable => &mut self.unstable,
            TrialOutcome::DescriptorFault => &mut self.descriptor_faults,
            TrialOutcome::Success(_) => &mut self.successes,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.outside_window
            + self.parse_failed
            + self.unstable
            + self.descriptor_faults
            + self.successes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub trials: u64,
    pub tally: OutcomeTally,
    pub records: Vec<SuccessRecord>,
}

impl SimulationReport {
    pub fn successes(&self) -> u64 {
        self.tally.successes
    }

    pub fn success_rate_percent(&self) -> f64 {
        self.successes() as f64 / self.trials as f64 * 100.0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Abiogenesis success rate after {} trials: {:.3}%",
            format_thousands(self.trials),
            self.success_rate_percent()
        )
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n{}", self.summary_line(), DISCLAIMER)
    }
}

/// Formats an integer with `,` between groups of three digits.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Runs independent trials sequentially and aggregates their outcomes.
pub struct SimulationDriver<'a> {
    runner: TrialRunner,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a> SimulationDriver<'a> {
    pub fn new(runner: TrialRunner, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { runner, reporter }
    }

    #[instrument(level = "info", skip_all, fields(trials = trials))]
    pub fn run(&self, trials: u64, rng: &mut dyn RngCore) -> Result<SimulationReport, EngineError> {
        if trials == 0 {
            return Err(EngineError::InvalidTrialCount { requested: trials });
        }

        self.reporter.report(Progress::PhaseStart { name: "Trials" });
        self.reporter.report(Progress::TaskStart { total_steps: trials });
        info!("Running {} trials.", trials);

        let mut tally = OutcomeTally::default();
        let mut records = Vec::new();
        for _ in 0..trials {
            let outcome = self.runner.run_one(rng);
            tally.record(&outcome);
            if let TrialOutcome::Success(record) = outcome {
                self.reporter.report(Progress::TrialSucceeded(record.clone()));
                records.push(record);
            }
            self.reporter.report(Progress::TaskIncrement);
        }

        self.reporter.report(Progress::TaskFinish);
        self.reporter.report(Progress::PhaseFinish);

        let report = SimulationReport {
            trials,
            tally,
            records,
        };
        info!(
            successes = report.successes(),
            outside_window = tally.outside_window,
            parse_failed = tally.parse_failed,
            unstable = tally.unstable,
            descriptor_faults = tally.descriptor_faults,
            "Simulation finished with a success rate of {:.3}%.",
            report.success_rate_percent()
        );
        Ok(report)
    }
}

/// Validates `config`, seeds a [`StdRng`] from it and runs the simulation with the default
/// collaborators.
#[instrument(
    skip_all,
    name = "simulation_workflow",
    fields(trials = config.trials, seed = config.seed)
)]
pub fn run(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<SimulationReport, EngineError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let runner = TrialRunner::new(config);
    SimulationDriver::new(runner, reporter).run(config.trials, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptors::DescriptorError;
    use crate::core::descriptors::DescriptorService;
    use crate::core::models::molecule::Molecule;
    use crate::engine::config::{ConfigError, SimulationConfigBuilder};
    use crate::engine::environment::{EnvironmentSample, EnvironmentSampler};
    use std::sync::Mutex;

    struct AlwaysViable;

    impl EnvironmentSampler for AlwaysViable {
        fn sample(&self, _: &mut dyn RngCore) -> EnvironmentSample {
            EnvironmentSample {
                temperature: 40.0,
                ph: 7.0,
                concentration: 1.0,
            }
        }
    }

    struct StableDescriptors;

    impl DescriptorService for StableDescriptors {
        fn molecular_weight(&self, _: &Molecule) -> Result<f64, DescriptorError> {
            Ok(500.0)
        }
        fn log_p(&self, _: &Molecule) -> Result<f64, DescriptorError> {
            Ok(0.0)
        }
        fn compute_2d_layout(&self, _: &mut Molecule) -> Result<(), DescriptorError> {
            Ok(())
        }
    }

    fn config(trials: u64, seed: u64) -> SimulationConfig {
        SimulationConfigBuilder::new()
            .trials(trials)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn thousands_are_grouped_with_commas() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(20_000), "20,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn default_run_prints_the_summary_and_disclaimer() {
        let report = run(&SimulationConfig::default(), &ProgressReporter::new()).unwrap();
        let text = report.to_string();
        let summary = "Abiogenesis success rate after 20,000 trials: ";
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(""));
        let line = lines.next().unwrap();
        assert!(line.starts_with(summary));
        let rate = line[summary.len()..].strip_suffix('%').unwrap();
        assert_eq!(rate.split('.').nth(1).map(str::len), Some(3));
        assert_eq!(lines.next(), Some(DISCLAIMER));
        assert_eq!(lines.next(), None);

        assert_eq!(report.tally.total(), 20_000);
        assert!(report.tally.outside_window > 0);
        assert!(report.tally.unstable > 0);
    }

    #[test]
    fn identical_seeds_reproduce_the_report() {
        let reporter = ProgressReporter::new();
        let first = run(&config(3_000, 11), &reporter).unwrap();
        let second = run(&config(3_000, 11), &reporter).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn successes_and_rate_stay_in_bounds() {
        let report = run(&config(2_000, 3), &ProgressReporter::new()).unwrap();
        assert!(report.successes() <= report.trials);
        assert_eq!(report.records.len() as u64, report.successes());
        let rate = report.success_rate_percent();
        assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn zero_trials_are_rejected_by_the_driver() {
        let driver_reporter = ProgressReporter::new();
        let driver = SimulationDriver::new(TrialRunner::default(), &driver_reporter);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            driver.run(0, &mut rng),
            Err(EngineError::InvalidTrialCount { requested: 0 })
        ));
    }

    #[test]
    fn invalid_configs_are_rejected_before_running() {
        let config = SimulationConfig {
            trials: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::Config(ConfigError::ZeroTrials))
        ));
    }

    #[test]
    fn stubbed_stable_trials_all_succeed_and_are_reported() {
        let events = Mutex::new((0u64, Vec::new()));
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            let mut events = events.lock().unwrap();
            match event {
                Progress::TaskIncrement => events.0 += 1,
                Progress::TrialSucceeded(record) => events.1.push(record.to_string()),
                _ => {}
            }
        }));
        let runner = TrialRunner::default()
            .with_sampler(AlwaysViable)
            .with_descriptors(StableDescriptors);
        let mut rng = StdRng::seed_from_u64(42);

        let report = SimulationDriver::new(runner, &reporter)
            .run(50, &mut rng)
            .unwrap();
        drop(reporter);

        assert_eq!(report.successes(), 50);
        assert_eq!(report.success_rate_percent(), 100.0);
        assert!(report.summary_line().ends_with("after 50 trials: 100.000%"));
        assert!(report.records.iter().all(|r| (4..=20).contains(&r.length)));

        let (ticks, lines) = events.into_inner().unwrap();
        assert_eq!(ticks, 50);
        assert_eq!(lines.len(), 50);
        assert!(lines.iter().all(|line| line.starts_with("Success: Polyglycine length ")));
    }
}
