use std::fmt;
use std::ops::Not;
use std::rc::Rc;

use crate::Blackboard;

/// Evaluation rule of a [`Condition`].
///
/// Implementations must only read the blackboard; schedulers re-evaluate conditions every tick.
pub trait Predicate: 'static {
    fn test(&self, blackboard: &Blackboard) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Blackboard) -> bool + 'static,
{
    fn test(&self, blackboard: &Blackboard) -> bool {
        self(blackboard)
    }
}

/// A boolean predicate over a [`Blackboard`], optionally inverted.
///
/// The built-in rules treat a missing key or a value of another type as `false` before inversion,
/// so `Condition::flag("threat").inverted()` holds while `threat` is unset.
#[derive(Clone)]
pub struct Condition {
    rule: Rc<dyn Predicate>,
    inverted: bool,
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("inverted", &self.inverted)
            .finish_non_exhaustive()
    }
}

impl Condition {
    pub fn new(rule: impl Predicate) -> Self {
        Self {
            rule: Rc::new(rule),
            inverted: false,
        }
    }

    pub fn always() -> Self {
        Self::new(|_: &Blackboard| true)
    }

    pub fn never() -> Self {
        Self::new(|_: &Blackboard| false)
    }

    /// Holds when `key` stores `true`.
    pub fn flag(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(move |bb: &Blackboard| bb.get_or(&key, false))
    }

    pub fn equals<T>(key: impl Into<String>, value: T) -> Self
    where
        T: PartialEq + 'static,
    {
        let key = key.into();
        Self::new(move |bb: &Blackboard| bb.get::<T>(&key).is_ok_and(|v| *v == value))
    }

    /// Holds when `key` stores a value strictly greater than `threshold`.
    pub fn above<T>(key: impl Into<String>, threshold: T) -> Self
    where
        T: PartialOrd + 'static,
    {
        let key = key.into();
        Self::new(move |bb: &Blackboard| bb.get::<T>(&key).is_ok_and(|v| *v > threshold))
    }

    /// Holds when `key` stores a value strictly less than `threshold`.
    pub fn below<T>(key: impl Into<String>, threshold: T) -> Self
    where
        T: PartialOrd + 'static,
    {
        let key = key.into();
        Self::new(move |bb: &Blackboard| bb.get::<T>(&key).is_ok_and(|v| *v < threshold))
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn evaluate(&self, blackboard: &Blackboard) -> bool {
        self.rule.test(blackboard) ^ self.inverted
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Self::Output {
        self.inverted()
    }
}
