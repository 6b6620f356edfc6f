//! Trial loop and greedy shrink search.

use crate::config::Config;
use crate::property::{Property, TestResult};
use crate::rng::RandomSource;
use crate::tree::Tree;

/// Final report of a property check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every trial passed
    Passed { trials: usize },
    /// A trial failed; `minimal` is the local minimum the greedy shrink
    /// search settled on (not necessarily a global one)
    Failed {
        /// Index of the failing trial
        trial: usize,
        /// Arguments originally drawn for the failing trial
        original: Vec<String>,
        /// Arguments of the shrunk counterexample
        minimal: Vec<String>,
        /// Number of successful shrink steps taken
        shrink_steps: usize,
    },
}

impl RunStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, RunStatus::Passed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed { .. })
    }

    /// The minimal counterexample's arguments, if the check failed
    pub fn minimal_arguments(&self) -> Option<&[String]> {
        match self {
            RunStatus::Passed { .. } => None,
            RunStatus::Failed { minimal, .. } => Some(minimal),
        }
    }
}

/// Receives progress notifications while a check runs.
pub trait Reporter {
    /// All trials passed
    fn passed(&mut self, trials: usize);
    /// A trial produced a failing result
    fn trial_failed(&mut self, trial: usize, result: &TestResult);
    /// Shrink search found a smaller failing candidate
    fn shrunk_to(&mut self, result: &TestResult);
    /// Shrink search stopped; this is the minimal result found
    fn gave_up_at(&mut self, result: &TestResult);
}

/// Prints the run's progress to stdout.
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn render(arguments: &[String]) -> String {
        format!("({})", arguments.join(", "))
    }
}

impl Reporter for ConsoleReporter {
    fn passed(&mut self, trials: usize) {
        println!("Success: {} tests passed.", trials);
    }

    fn trial_failed(&mut self, trial: usize, result: &TestResult) {
        println!(
            "Fail: at test {} with arguments {}.",
            trial,
            Self::render(&result.arguments)
        );
        if let Some(fault) = &result.fault {
            println!("Fail: {}", fault);
        }
    }

    fn shrunk_to(&mut self, result: &TestResult) {
        println!(
            "Shrinking: found smaller arguments {}",
            Self::render(&result.arguments)
        );
    }

    fn gave_up_at(&mut self, result: &TestResult) {
        println!(
            "Shrinking: gave up at arguments {}",
            Self::render(&result.arguments)
        );
    }
}

/// Discards all progress notifications; useful when embedding checks.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn passed(&mut self, _trials: usize) {}
    fn trial_failed(&mut self, _trial: usize, _result: &TestResult) {}
    fn shrunk_to(&mut self, _result: &TestResult) {}
    fn gave_up_at(&mut self, _result: &TestResult) {}
}

/// Check a property with the default configuration, reporting to stdout.
pub fn check(property: &Property) -> RunStatus {
    check_with_config(property, &Config::default())
}

/// Check a property with an explicit configuration, reporting to stdout.
pub fn check_with_config(property: &Property, config: &Config) -> RunStatus {
    check_with_reporter(property, config, &mut ConsoleReporter)
}

/// Run up to `config.trials` trials; on the first failing trial, search its
/// shrink tree for a smaller counterexample.
///
/// The search is greedy depth-first: at each level it descends into the
/// first failing candidate and never backtracks, so the reported minimum is
/// a fixed point of "first failing candidate", not a global minimum.
pub fn check_with_reporter(
    property: &Property,
    config: &Config,
    reporter: &mut dyn Reporter,
) -> RunStatus {
    let source = match config.seed {
        Some(seed) => RandomSource::with_seed(seed),
        None => RandomSource::new(),
    };

    for trial in 0..config.trials {
        let tree = property.generate(&source);
        if tree.value().is_success {
            continue;
        }

        reporter.trial_failed(trial, tree.value());
        let original = tree.value().arguments.clone();
        let (minimal_result, shrink_steps) = shrink_search(tree, config.max_shrink_steps, reporter);
        reporter.gave_up_at(&minimal_result);

        return RunStatus::Failed {
            trial,
            original,
            minimal: minimal_result.arguments,
            shrink_steps,
        };
    }

    reporter.passed(config.trials);
    RunStatus::Passed {
        trials: config.trials,
    }
}

/// Greedy descent: keep taking the first failing candidate until a node has
/// none (or the step cap is hit), then report that node's result.
fn shrink_search(
    root: Tree<TestResult>,
    max_steps: usize,
    reporter: &mut dyn Reporter,
) -> (TestResult, usize) {
    let mut current = root;
    let mut steps = 0;

    while steps < max_steps {
        let next = current.children().find(|c| !c.value().is_success);
        match next {
            Some(smaller) => {
                reporter.shrunk_to(smaller.value());
                current = smaller;
                steps += 1;
            }
            None => break,
        }
    }

    (current.value().clone(), steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Gen, int_between, list_of};
    use crate::property::for_all;

    /// Records every notification for assertions on the report contract.
    #[derive(Default)]
    struct RecordingReporter {
        passed: Option<usize>,
        failed_trial: Option<usize>,
        shrink_progress: Vec<Vec<String>>,
        final_arguments: Option<Vec<String>>,
    }

    impl Reporter for RecordingReporter {
        fn passed(&mut self, trials: usize) {
            self.passed = Some(trials);
        }

        fn trial_failed(&mut self, trial: usize, _result: &TestResult) {
            self.failed_trial = Some(trial);
        }

        fn shrunk_to(&mut self, result: &TestResult) {
            self.shrink_progress.push(result.arguments.clone());
        }

        fn gave_up_at(&mut self, result: &TestResult) {
            self.final_arguments = Some(result.arguments.clone());
        }
    }

    fn silent_check(property: &Property, config: &Config) -> RunStatus {
        check_with_reporter(property, config, &mut SilentReporter)
    }

    #[test]
    fn test_passing_property_reports_all_trials() {
        let property = for_all(&int_between(0, 100), |&n| n >= 0);
        let mut reporter = RecordingReporter::default();
        let status = check_with_reporter(&property, &Config::default(), &mut reporter);
        assert_eq!(status, RunStatus::Passed { trials: 100 });
        assert_eq!(reporter.passed, Some(100));
        assert!(reporter.shrink_progress.is_empty());
    }

    #[test]
    fn test_constant_failure_gives_up_at_the_root() {
        let property = for_all(&Gen::constant(9i64), |_| false);
        let mut reporter = RecordingReporter::default();
        let status = check_with_reporter(&property, &Config::default(), &mut reporter);
        match status {
            RunStatus::Failed {
                trial,
                original,
                minimal,
                shrink_steps,
            } => {
                assert_eq!(trial, 0);
                assert_eq!(original, vec!["9".to_string()]);
                assert_eq!(minimal, original);
                assert_eq!(shrink_steps, 0);
            }
            RunStatus::Passed { .. } => panic!("constant-false property passed"),
        }
        assert_eq!(reporter.failed_trial, Some(0));
        assert_eq!(reporter.final_arguments, Some(vec!["9".to_string()]));
    }

    #[test]
    fn test_greedy_shrink_reaches_a_local_minimum() {
        // n <= 3 fails for any n > 3; halving toward 0 settles in 4..=6
        // (6's candidates are 3, 2, 1, 0, all passing), never on anything
        // that still satisfies the predicate.
        let property = for_all(&int_between(0, 20), |&n| n <= 3);
        for seed in 0..20u64 {
            let status = silent_check(&property, &Config::default().with_seed(seed));
            if let RunStatus::Failed {
                original, minimal, ..
            } = status
            {
                let original: i64 = original[0].parse().unwrap();
                let minimal: i64 = minimal[0].parse().unwrap();
                assert!(minimal > 3, "shrunk to a passing value {}", minimal);
                assert!(minimal <= 6, "local minimum should be in 4..=6, got {}", minimal);
                assert!(minimal <= original);
                return;
            }
        }
        panic!("n <= 3 never failed across 20 seeded runs");
    }

    #[test]
    fn test_shrink_progress_is_strictly_failing() {
        let property = for_all(&int_between(0, 100), |&n| n < 10);
        let mut reporter = RecordingReporter::default();
        let status = check_with_reporter(
            &property,
            &Config::default().with_seed(3),
            &mut reporter,
        );
        if status.is_failed() {
            // Every progress step names arguments that still fail: values >= 10.
            for arguments in &reporter.shrink_progress {
                let value: i64 = arguments[0].parse().unwrap();
                assert!(value >= 10);
            }
            assert_eq!(
                reporter.final_arguments.as_deref(),
                status.minimal_arguments()
            );
        }
    }

    #[test]
    fn test_list_property_shrinks_length_first() {
        // Fails for any list with two or more elements; minimal
        // counterexample must be a two-element list.
        let property = for_all(&list_of(&int_between(-10, 10)), |list: &Vec<i64>| {
            list.len() < 2
        });
        for seed in 0..50u64 {
            let status = silent_check(&property, &Config::default().with_seed(seed));
            if let RunStatus::Failed { minimal, .. } = status {
                let rendered = &minimal[0];
                let elements = rendered.matches(',').count() + 1;
                assert_eq!(elements, 2, "expected a two-element list, got {}", rendered);
                return;
            }
        }
        panic!("length property never failed across 50 seeded runs");
    }

    #[test]
    fn test_nested_property_minimal_keeps_both_arguments() {
        let property = for_all(&int_between(0, 20), |&a| {
            for_all(&int_between(0, 20), move |&b| a + b <= 30)
        });
        for seed in 0..50u64 {
            let status = silent_check(&property, &Config::default().with_seed(seed));
            if let RunStatus::Failed { minimal, .. } = status {
                assert_eq!(minimal.len(), 2);
                let a: i64 = minimal[0].parse().unwrap();
                let b: i64 = minimal[1].parse().unwrap();
                assert!(a + b > 30);
                return;
            }
        }
        panic!("a + b <= 30 never failed across 50 seeded runs");
    }

    #[test]
    fn test_shrink_step_cap_is_honored() {
        let property = for_all(&int_between(0, 1_000_000), |&n| n < 1);
        let status = silent_check(
            &property,
            &Config::default().with_seed(1).with_max_shrink_steps(1),
        );
        if let RunStatus::Failed { shrink_steps, .. } = status {
            assert!(shrink_steps <= 1);
        }
    }

    #[test]
    fn test_trial_count_is_configurable() {
        let property = for_all(&int_between(0, 10), |&n| n >= 0);
        let status = silent_check(&property, &Config::default().with_trials(7));
        assert_eq!(status, RunStatus::Passed { trials: 7 });
    }
}
