//! [`Handler`] abstraction.

use std::future::Future;

/// Asynchronous handler of `Args`.
///
/// Commands, queries, databases and storages are all expressed as a set of
/// [`Handler`] implementations, one per supported operation.
pub trait Handler<Args = ()> {
    /// Successful result of the handling.
    type Ok;

    /// Error of the handling.
    type Err;

    /// Handles the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
