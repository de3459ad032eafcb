/// Converts errors from their error type (of the submodule) to that of
/// a pk_tools::Error variant.
///
/// ```rust,ignore
/// use pk_tools::resolve::ResolveError;
/// pk_tools::impl_err!(ResolveError, Resolve);
/// ```
pub mod err_macro {
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
}
