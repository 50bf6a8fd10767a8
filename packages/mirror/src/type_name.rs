//! Short, human-facing type names.

/// Strip module paths from a fully qualified type name.
///
/// `alloc::vec::Vec<my_app::Person>` becomes `Vec<Person>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            c if c.is_alphanumeric() || c == '_' => out.push(c),
            other => {
                out.push(other);
                segment_start = out.len();
            }
        }
    }
    out
}

/// The short name of `T`.
pub fn type_name_of<T: ?Sized>() -> String {
    short_type_name(std::any::type_name::<T>())
}

/// The short static type name of a value.
pub fn type_name_of_val<T: ?Sized>(_value: &T) -> String {
    type_name_of::<T>()
}
