//! Tracked-field gathering.

use fieldkit_mirror::snapshot;
use serde::Serialize;

/// Labels of the immediate fields wrapped in [`fieldkit_mirror::Tracked`],
/// in declaration order.
///
/// ```rust
/// use fieldkit_mirror::Tracked;
/// use fieldkit_ops::gather_tracked;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct SignUp {
///     email: Tracked<String>,
///     password: Tracked<String>,
///     remember_me: bool,
/// }
///
/// let form = SignUp {
///     email: Tracked::default(),
///     password: Tracked::default(),
///     remember_me: false,
/// };
/// assert_eq!(gather_tracked(&form), vec!["email", "password"]);
/// ```
pub fn gather_tracked<T: Serialize + ?Sized>(v: &T) -> Vec<String> {
    snapshot(v)
        .into_children()
        .into_iter()
        .filter(|c| c.tracked)
        .filter_map(|c| c.label)
        .collect()
}
