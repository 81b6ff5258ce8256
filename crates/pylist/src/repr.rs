use std::cell::RefCell;
use std::fmt;

/// Source-literal rendering of an element, as it appears inside a printed
/// list: strings are quoted, booleans are `True`/`False`.
pub trait Repr {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn type_name(&self) -> &'static str;
}

pub fn repr<T: Repr + ?Sized>(value: &T) -> impl fmt::Display + '_ {
    struct Shown<'a, T: ?Sized>(&'a T);

    impl<T: Repr + ?Sized> fmt::Display for Shown<'_, T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fmt_repr(f)
        }
    }

    Shown(value)
}

thread_local! {
    static IN_PROGRESS: RefCell<Vec<*const ()>> = const { RefCell::new(Vec::new()) };
}

/// Runs `body` unless `container` is already being rendered further up the
/// stack, in which case `[...]` is written instead.
pub(crate) fn guard_recursion(
    container: *const (),
    f: &mut fmt::Formatter<'_>,
    body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    let entered = IN_PROGRESS.with_borrow_mut(|stack| {
        if stack.contains(&container) {
            false
        } else {
            stack.push(container);
            true
        }
    });
    if !entered {
        return f.write_str("[...]");
    }

    struct Leave;

    impl Drop for Leave {
        fn drop(&mut self) {
            IN_PROGRESS.with_borrow_mut(|stack| stack.pop());
        }
    }

    let _leave = Leave;
    body(f)
}

pub(crate) fn fmt_float(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        f.write_str("nan")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "inf" } else { "-inf" })
    } else {
        let sci = format!("{value:e}");
        match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
            Some((mantissa, Ok(exp))) if !(-4..16).contains(&exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            _ => {
                let plain = value.to_string();
                if plain.contains('.') {
                    f.write_str(&plain)
                } else {
                    write!(f, "{plain}.0")
                }
            }
        }
    }
}

pub(crate) fn fmt_quoted(text: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

macro_rules! repr_int {
    ($($ty:ty),*) => {
        $(
            impl Repr for $ty {
                fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{self}")
                }

                fn type_name(&self) -> &'static str {
                    "int"
                }
            }
        )*
    };
}

repr_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Repr for f64 {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_float(*self, f)
    }

    fn type_name(&self) -> &'static str {
        "float"
    }
}

impl Repr for f32 {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_float(f64::from(*self), f)
    }

    fn type_name(&self) -> &'static str {
        "float"
    }
}

impl Repr for bool {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if *self { "True" } else { "False" })
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }
}

impl Repr for str {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_quoted(self, f)
    }

    fn type_name(&self) -> &'static str {
        "str"
    }
}

impl Repr for String {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_quoted(self, f)
    }

    fn type_name(&self) -> &'static str {
        "str"
    }
}

impl<T: Repr + ?Sized> Repr for &T {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_repr(f)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: Repr> Repr for Option<T> {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(v) => v.fmt_repr(f),
            None => f.write_str("None"),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Some(v) => v.type_name(),
            None => "NoneType",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(repr(&42_i64).to_string(), "42");
        assert_eq!(repr(&-7_i32).to_string(), "-7");
        assert_eq!(repr(&true).to_string(), "True");
        assert_eq!(repr(&false).to_string(), "False");
        assert_eq!(repr(&Option::<i64>::None).to_string(), "None");
    }

    #[test]
    fn floats_keep_a_fraction() {
        assert_eq!(repr(&2.75_f64).to_string(), "2.75");
        assert_eq!(repr(&1.0_f64).to_string(), "1.0");
        assert_eq!(repr(&-0.5_f64).to_string(), "-0.5");
        assert_eq!(repr(&f64::INFINITY).to_string(), "inf");
        assert_eq!(repr(&f64::NAN).to_string(), "nan");
        assert_eq!(repr(&-0.0_f64).to_string(), "-0.0");
    }

    #[test]
    fn floats_switch_to_exponent_form() {
        assert_eq!(repr(&1e16_f64).to_string(), "1e+16");
        assert_eq!(repr(&1.5e16_f64).to_string(), "1.5e+16");
        assert_eq!(repr(&1e15_f64).to_string(), "1000000000000000.0");
        assert_eq!(repr(&1e-5_f64).to_string(), "1e-05");
        assert_eq!(repr(&0.0001_f64).to_string(), "0.0001");
        assert_eq!(repr(&-2.5e-7_f64).to_string(), "-2.5e-07");
        assert_eq!(repr(&1e100_f64).to_string(), "1e+100");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(repr("pie").to_string(), "'pie'");
        assert_eq!(repr(&String::from("it's")).to_string(), "\"it's\"");
        assert_eq!(repr("a'b\"c").to_string(), "'a\\'b\"c'");
        assert_eq!(repr("tab\there").to_string(), "'tab\\there'");
    }

    struct Exploding;

    impl Repr for Exploding {
        fn fmt_repr(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("render failed");
        }

        fn type_name(&self) -> &'static str {
            "exploding"
        }
    }

    #[test]
    fn recursion_guard_unwinds_on_panic() {
        let list = crate::List::from(vec![Exploding]);
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| list.to_string()));
        assert!(outcome.is_err());
        assert!(IN_PROGRESS.with_borrow(Vec::is_empty));

        list.clear();
        assert_eq!(list.to_string(), "[]");
    }

    #[test]
    fn type_names() {
        assert_eq!(7_u8.type_name(), "int");
        assert_eq!(2.5_f64.type_name(), "float");
        assert_eq!("x".type_name(), "str");
        assert_eq!(Some(true).type_name(), "bool");
    }
}
