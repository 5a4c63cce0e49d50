use std::path::{Path, PathBuf};

use chrono::Datelike;

use super::schema::FAVICON_SENTINEL;


/// Returns the path of the favicon shipped with this crate,
/// which is at `{crate directory}/resources/favicon.png`.
pub fn get_bundled_favicon_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join(FAVICON_SENTINEL)
}

/// Number of processors available to this process, or 0 if that can't be determined.
pub fn default_cpus() -> i64 {
    std::thread::available_parallelism()
        .map(|count| i64::try_from(count.get()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Parses the loose boolean spellings accepted in project files.
pub fn str_to_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_spellings() {
        for text in ["true", "True", "YES", "y", "1", " yes "] {
            assert_eq!(str_to_bool(text), Some(true), "{text}");
        }

        for text in ["false", "FALSE", "No", "n", "0"] {
            assert_eq!(str_to_bool(text), Some(false), "{text}");
        }

        for text in ["maybe", "", "2", "truthy"] {
            assert_eq!(str_to_bool(text), None, "{text}");
        }
    }

    #[test]
    fn bundled_favicon_is_absolute() {
        let favicon = get_bundled_favicon_path();

        assert!(favicon.is_absolute());
        assert!(favicon.ends_with("resources/favicon.png"));
    }
}
