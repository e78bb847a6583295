/// Checks that a numerical value is in the provided interval `[a,b]` and returns early
/// with [`Error::InvalidArgument`](crate::Error::InvalidArgument) if not
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// check_interval!(alpha, 0.0, 1.0);
/// ```
/// This returns an error with the message "Invalid value for \`alpha\`: 2. Must be in the interval \[0, 1\]."
///
/// `NaN` never passes the check.
#[macro_export]
macro_rules! check_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::InvalidArgument(format!(
                "Invalid value for `{}`: {}. Must be in the interval [{}, {}].",
                stringify!($var),
                $var,
                $a,
                $b,
            )));
        }
    };
}
