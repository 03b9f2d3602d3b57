//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Implementors interpret the operation described by `Args` (for example, a
/// [`Select`]ion of values by some selector) and resolve it asynchronously.
///
/// [`Select`]: crate::operations::Select
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
