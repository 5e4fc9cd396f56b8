/// Environment variable consulted by [`EnvMotion`]. Truthy values: `1`,
/// `true`, `yes`, `on` (case-insensitive).
pub const REDUCED_MOTION_ENV: &str = "SEAMWAVE_REDUCED_MOTION";

/// Read-only capability for the ambient "prefers reduced motion" signal.
///
/// The divider takes this as a parameter instead of reading a hidden global,
/// so embedders can wire in their platform's media query and tests can pin
/// either state.
pub trait MotionPrefs {
    fn reduced_motion(&self) -> bool;
}

/// Fixed preference, for tests and embedders that resolve it themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticMotion(pub bool);

impl MotionPrefs for StaticMotion {
    fn reduced_motion(&self) -> bool {
        self.0
    }
}

/// Preference sourced from [`REDUCED_MOTION_ENV`].
///
/// The variable is re-read on every call; the preference can change while a
/// process is running and must not be cached.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvMotion;

impl MotionPrefs for EnvMotion {
    fn reduced_motion(&self) -> bool {
        parse_flag(std::env::var(REDUCED_MOTION_ENV).ok().as_deref())
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    let Some(v) = value else {
        return false;
    };
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_motion_reports_what_it_holds() {
        assert!(StaticMotion(true).reduced_motion());
        assert!(!StaticMotion(false).reduced_motion());
    }

    #[test]
    fn flag_parsing_accepts_common_truthy_spellings() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" YES ")));
        assert!(parse_flag(Some("on")));
    }

    #[test]
    fn flag_parsing_defaults_to_full_motion() {
        assert!(!parse_flag(None));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("reduce")));
    }
}
