//! Project folder name derivation.
//!
//! Folder names are a pure function of the wall clock at minute granularity:
//! `<prefix>_<MM>_<DD>_<YYYY>_<HHMM>`. Two runs within the same minute derive
//! the same name; the workflow treats that as an explicit collision rather
//! than silently reusing the existing folder.

use chrono::NaiveDateTime;

/// Source of "now" for name derivation.
///
/// The workflow takes a `Clock` rather than reading the system time directly,
/// so tests can pin the derivation to a fixed instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(any(test, feature = "test-utils"))]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Derive the project folder name for the given instant.
///
/// Month and day are zero-padded; hour and minute are concatenated with no
/// separator. Example: 2024-03-05 14:07 with prefix `Project` yields
/// `Project_03_05_2024_1407`.
#[must_use]
pub fn project_folder_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{prefix}_{}", now.format("%m_%d_%Y_%H%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_folder_name_format() {
        let name = project_folder_name("Project", at(2024, 3, 5, 14, 7));
        assert_eq!(name, "Project_03_05_2024_1407");
    }

    #[test]
    fn test_folder_name_zero_padding() {
        let name = project_folder_name("Project", at(2024, 1, 9, 4, 5));
        assert_eq!(name, "Project_01_09_2024_0405");
    }

    #[test]
    fn test_folder_name_custom_prefix() {
        let name = project_folder_name("Run", at(2025, 12, 31, 23, 59));
        assert_eq!(name, "Run_12_31_2025_2359");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let clock = FixedClock(at(2024, 3, 5, 14, 7));
        let a = project_folder_name("Project", clock.now());
        let b = project_folder_name("Project", clock.now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_seconds_do_not_affect_name() {
        let with_secs = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 59)
            .unwrap();
        assert_eq!(
            project_folder_name("Project", with_secs),
            "Project_03_05_2024_1407"
        );
    }
}
