//! Results paired with the cost of producing them.

use crate::OperationCost;

/// A value together with the cost of computing it.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Wrapped operation's return value.
    pub value: T,
    /// Cost of the operation.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Take the value out, adding its cost to `acc_cost`.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Take the value out and discard the cost.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Borrow the cost.
    pub fn cost(&self) -> &OperationCost {
        &self.cost
    }

    /// Borrow the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Transform the value, keeping the cost.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }

    /// Add previously accumulated cost.
    pub fn add_cost(mut self, cost: OperationCost) -> Self {
        self.cost += cost;
        self
    }
}

/// `Result` wrapped into a [`CostContext`].
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Transform the `Ok` value, keeping the cost.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }

    /// Transform the `Err` value, keeping the cost.
    pub fn map_err<B>(self, f: impl FnOnce(E) -> B) -> CostResult<T, B> {
        self.map(|result| result.map_err(f))
    }

    /// Split into the plain result and the cost.
    pub fn into_parts(self) -> (Result<T, E>, OperationCost) {
        (self.value, self.cost)
    }
}

/// Extension trait to attach a cost to any value.
pub trait CostsExt {
    /// Wrap `self` with the given cost.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// `?` for `CostResult`: unwraps the result, adding its cost into `$cost`,
/// or returns early with the error and everything accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// `?` for a plain `Result` inside a function returning `CostResult`: no cost
/// is added, early returns carry what `$cost` accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
