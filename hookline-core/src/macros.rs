/// Build an argument list, converting each expression with `Value::from`.
///
/// ```rust
/// use hookline_core::{args, Value};
///
/// let arguments = args!["move", 3, 1.5, vec![1, 2]];
/// assert_eq!(arguments.len(), 4);
/// assert_eq!(arguments[1], Value::Int(3));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($argument:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($argument)),+]
    };
}
