//! Equation systems driven by the solver.

use crate::history::DelayedValues;

/// A system of boolean delay equations.
///
/// Given the delayed values of the state variables (`state[d][v]`) and of the
/// forcing inputs (`inputs[d][i]`), both looked up at `t - delays[d]`, a model returns
/// the next value of every state variable at `t`. Systems without forcing inputs
/// simply ignore the (empty) `inputs` argument.
///
/// Models must be pure: the solver evaluates them once per candidate instant and
/// assumes the result depends on the arguments only.
///
/// Any `Fn(&DelayedValues, &DelayedValues) -> Vec<bool>` is a model:
///
/// ```
/// use bde_rs::history::DelayedValues;
/// use bde_rs::model::Model;
///
/// let (x1, x2) = (0, 1);
/// let (tau1, tau2) = (0, 1);
/// let model = move |z: &DelayedValues, _: &DelayedValues| vec![z[tau1][x2], !z[tau2][x1]];
/// # fn is_model(_: &impl Model) {}
/// # is_model(&model);
/// ```
pub trait Model {
    fn eval(&self, state: &DelayedValues, inputs: &DelayedValues) -> Vec<bool>;
}

impl<F> Model for F
where
    F: Fn(&DelayedValues, &DelayedValues) -> Vec<bool>,
{
    fn eval(&self, state: &DelayedValues, inputs: &DelayedValues) -> Vec<bool> {
        self(state, inputs)
    }
}

/// Adapts a model that takes no forcing inputs.
///
/// ```
/// use bde_rs::model::Unforced;
///
/// let oscillator = Unforced(|z: &bde_rs::history::DelayedValues| vec![!z[0][0]]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Unforced<F>(pub F);

impl<F> Model for Unforced<F>
where
    F: Fn(&DelayedValues) -> Vec<bool>,
{
    fn eval(&self, state: &DelayedValues, _inputs: &DelayedValues) -> Vec<bool> {
        (self.0)(state)
    }
}
