//! Properties: generators of pass/fail outcomes carrying their inputs.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::PropertyError;
use crate::generator::Gen;

/// The outcome of one property evaluation: a verdict plus the arguments
/// that produced it, rendered outermost-first.
///
/// A captured predicate panic is recorded in `fault` rather than aborting
/// the run; a faulted result is never a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub is_success: bool,
    pub arguments: Vec<String>,
    pub fault: Option<PropertyError>,
}

impl TestResult {
    /// A plain verdict over a single argument
    pub fn from_verdict(is_success: bool, argument: String) -> Self {
        TestResult {
            is_success,
            arguments: vec![argument],
            fault: None,
        }
    }

    /// A failure caused by a panicking predicate
    pub fn from_fault(argument: String, fault: PropertyError) -> Self {
        TestResult {
            is_success: false,
            arguments: vec![argument],
            fault: Some(fault),
        }
    }

    /// Re-wrap a nested result under an enclosing argument
    fn nest_under(&self, argument: String) -> Self {
        let mut arguments = Vec::with_capacity(self.arguments.len() + 1);
        arguments.push(argument);
        arguments.extend_from_slice(&self.arguments);
        TestResult {
            is_success: self.is_success,
            arguments,
            fault: self.fault.clone(),
        }
    }
}

/// A property is a generator of test results
pub type Property = Gen<TestResult>;

/// What a predicate may return: a plain verdict, or a nested property for
/// multi-argument `for_all(.., |a| for_all(.., |b| ..))` chains.
///
/// A closed union, so the engine distinguishes the two shapes at the type
/// level instead of inspecting values at runtime.
pub enum Outcome {
    Verdict(bool),
    Nested(Property),
}

impl From<bool> for Outcome {
    fn from(verdict: bool) -> Self {
        Outcome::Verdict(verdict)
    }
}

impl From<Gen<TestResult>> for Outcome {
    fn from(property: Gen<TestResult>) -> Self {
        Outcome::Nested(property)
    }
}

/// Build a property: for all values of `generator`, `predicate` holds.
///
/// The predicate may return `bool` or a nested [`Property`]; nesting
/// accumulates arguments outermost-first. A panicking predicate is captured
/// as a failing result carrying [`PropertyError::PredicateFault`].
pub fn for_all<T, O, P>(generator: &Gen<T>, predicate: P) -> Property
where
    T: Clone + fmt::Debug + 'static,
    O: Into<Outcome>,
    P: Fn(&T) -> O + 'static,
{
    generator.bind(move |value| {
        let argument = format!("{:?}", value);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| predicate(value)));
        match outcome {
            Err(payload) => {
                let fault = PropertyError::predicate_fault(panic_message(payload.as_ref()));
                Gen::constant(TestResult::from_fault(argument, fault))
            }
            Ok(outcome) => match outcome.into() {
                Outcome::Verdict(verdict) => {
                    Gen::constant(TestResult::from_verdict(verdict, argument))
                }
                Outcome::Nested(property) => {
                    property.map(move |inner| inner.nest_under(argument.clone()))
                }
            },
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
