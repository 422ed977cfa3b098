/// Lifts a module error into its [`commute::Error`](crate::Error) variant,
/// so a `?` on a graph, path or matrix operation yields the crate error.
///
/// The variant must wrap the lifted type as its only field. `crate::error`
/// lifts every module error this way:
///
/// ```rust,ignore
/// use commute::graph::GraphError;
/// use commute::matrix::MatrixError;
///
/// commute::impl_err!(GraphError, Graph);
/// commute::impl_err!(MatrixError, Matrix);
/// ```
pub mod lift {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
