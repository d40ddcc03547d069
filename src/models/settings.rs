/// Platform account mode, read from the `user_mode` setting row.
///
/// The team gate only enforces anything while the platform runs in team mode;
/// any other (or missing) value disables enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMode {
    Teams,
    Users,
}

pub const USER_MODE_KEY: &str = "user_mode";

impl PlatformMode {
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("teams") => PlatformMode::Teams,
            _ => PlatformMode::Users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlatformMode;

    #[test]
    fn teams_value_enables_team_mode() {
        assert_eq!(
            PlatformMode::from_setting(Some("teams")),
            PlatformMode::Teams
        );
        assert_eq!(
            PlatformMode::from_setting(Some(" Teams ")),
            PlatformMode::Teams
        );
    }

    #[test]
    fn anything_else_defaults_to_user_mode() {
        assert_eq!(
            PlatformMode::from_setting(Some("users")),
            PlatformMode::Users
        );
        assert_eq!(PlatformMode::from_setting(None), PlatformMode::Users);
        assert_eq!(PlatformMode::from_setting(Some("")), PlatformMode::Users);
    }
}
