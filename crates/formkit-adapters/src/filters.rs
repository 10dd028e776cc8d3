//! Text IO filters.
//!
//! Each filter rewrites text on its way into a field and passes stored text
//! out unchanged.

use formkit_core::domain::Direction;

pub fn trim(s: String, direction: Direction) -> String {
    on_input(s, direction, |s| s.trim().to_owned())
}

pub fn trim_start(s: String, direction: Direction) -> String {
    on_input(s, direction, |s| s.trim_start().to_owned())
}

pub fn trim_end(s: String, direction: Direction) -> String {
    on_input(s, direction, |s| s.trim_end().to_owned())
}

pub fn to_upper(s: String, direction: Direction) -> String {
    on_input(s, direction, |s| s.to_uppercase())
}

pub fn to_lower(s: String, direction: Direction) -> String {
    on_input(s, direction, |s| s.to_lowercase())
}

/// Lift a text filter to `Option<String>` fields.
pub fn optional(
    filter: fn(String, Direction) -> String,
) -> impl Fn(Option<String>, Direction) -> Option<String> {
    move |value, direction| value.map(|s| filter(s, direction))
}

fn on_input(s: String, direction: Direction, f: impl FnOnce(&str) -> String) -> String {
    match direction {
        Direction::Input => f(&s),
        Direction::Output => s,
    }
}

#[cfg(test)]
mod tests {
    use formkit_core::domain::Field;

    use super::*;

    #[test]
    fn filters_only_touch_input() {
        assert_eq!(trim("  a b  ".into(), Direction::Input), "a b");
        assert_eq!(trim("  a b  ".into(), Direction::Output), "  a b  ");
        assert_eq!(trim_start("  x ".into(), Direction::Input), "x ");
        assert_eq!(trim_end("  x ".into(), Direction::Input), "  x");
        assert_eq!(to_upper("abc".into(), Direction::Input), "ABC");
        assert_eq!(to_lower("ABC".into(), Direction::Output), "ABC");
    }

    #[test]
    fn optional_passes_none_through() {
        let f = optional(trim);
        assert_eq!(f(None, Direction::Input), None);
        assert_eq!(f(Some(" Kodansha ".into()), Direction::Input).as_deref(), Some("Kodansha"));
    }

    #[test]
    fn filter_installed_on_field() {
        let mut field = Field::new("Publisher", None::<String>).filtered_by(optional(to_lower));

        field.set_value(Some("SHOGAKUKAN".into())).unwrap();

        assert_eq!(field.value().as_deref(), Some("shogakukan"));
    }
}
