//! Positional formatting with a runtime template.
//!
//! The [`format`] function substitutes each `{}` placeholder in a template with the next
//! argument. Unlike [`std::format!`], the template need not be known at compile time, so it can
//! come from user input or configuration.
//!
//! A template with unbalanced braces is not an error: the result is instead the string
//! `"FORMATTING ERROR: GOT STRING: "` followed by the template, which keeps the formatter usable
//! from error paths that must not themselves fail. A template without arguments is returned
//! unchanged, whether or not its braces balance.

use std::fmt;

/// Prefix of the string returned for a template with unbalanced braces.
pub const FORMATTING_ERROR: &str = "FORMATTING ERROR: GOT STRING: ";

/// A value that can be substituted into a template.
pub trait FormatArg {
    /// Appends the value to the output.
    fn write_arg(&self, out: &mut String);
}

macro_rules! impl_format_arg_via_display {
    ($($t:ty),+ $(,)?) => {
        $(
            impl FormatArg for $t {
                fn write_arg(&self, out: &mut String) {
                    out.push_str(&self.to_string());
                }
            }
        )+
    };
}

impl_format_arg_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl FormatArg for str {
    fn write_arg(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl FormatArg for String {
    fn write_arg(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl<T> FormatArg for &T
where
    T: FormatArg + ?Sized,
{
    fn write_arg(&self, out: &mut String) {
        (**self).write_arg(out)
    }
}

/// Sequences are written as `{a,b,c}`.
impl<T> FormatArg for [T]
where
    T: FormatArg,
{
    fn write_arg(&self, out: &mut String) {
        out.push('{');
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            value.write_arg(out);
        }
        out.push('}');
    }
}

impl<T, const N: usize> FormatArg for [T; N]
where
    T: FormatArg,
{
    fn write_arg(&self, out: &mut String) {
        self.as_slice().write_arg(out)
    }
}

impl<T> FormatArg for Vec<T>
where
    T: FormatArg,
{
    fn write_arg(&self, out: &mut String) {
        self.as_slice().write_arg(out)
    }
}

/// Wrapper to substitute any displayable value.
#[derive(Clone, Copy, Debug)]
pub struct Shown<T>(pub T);

impl<T> FormatArg for Shown<T>
where
    T: fmt::Display,
{
    fn write_arg(&self, out: &mut String) {
        out.push_str(&self.0.to_string());
    }
}

/// Substitutes `{}` placeholders in a template with arguments, in order.
///
/// Anything between a `{` and the following `}` is replaced. Placeholders beyond the number of
/// arguments are left as they are, as are arguments beyond the number of placeholders. Substituted
/// text is never scanned for placeholders.
///
/// See the [module docs](self) for the handling of unbalanced braces.
pub fn format(template: &str, args: &[&dyn FormatArg]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    if template.matches('{').count() != template.matches('}').count() {
        return format!("{FORMATTING_ERROR}{template}");
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let Some(arg) = args.next() else {
            break;
        };

        result.push_str(&rest[..start]);
        arg.write_arg(&mut result);
        rest = &rest[start + len + 1..];
    }

    result.push_str(rest);
    result
}

/// Formats a runtime template with positional arguments, see [`format`](crate::format::format).
///
/// # Examples
///
/// ```
/// use h5kit_core::fallback_format;
///
/// assert_eq!(fallback_format!("{} and {}", 1, "two"), "1 and two");
/// ```
#[macro_export]
macro_rules! fallback_format {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::format($template, &[$(&$arg as &dyn $crate::format::FormatArg),*])
    };
}
