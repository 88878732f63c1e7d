// components/media_downloader/src/utils.rs
use std::path::{Path, PathBuf};

/// Longest file stem, in characters, that `sanitize_filename` produces
pub const MAX_NAME_CHARS: usize = 150;

/// Longest error detail, in characters, carried on a failed outcome
pub const MAX_DETAIL_CHARS: usize = 80;

/// Reduce a track name to a file stem that is safe on every filesystem
///
/// Keeps letters, digits and `space - _ . ( )`, trims, and caps the length.
/// The result feeds the already-downloaded check, so it must never change
/// between runs, and sanitizing its own output returns it unchanged.
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '(' | ')'))
        .collect();

    let capped: String = kept.trim().chars().take(MAX_NAME_CHARS).collect();
    capped.trim_end().to_string()
}

/// `<stem>.<extension>`, leaving any dots already in the stem alone
pub fn append_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// First `MAX_DETAIL_CHARS` characters of an error message
pub fn truncate_detail(text: &str) -> String {
    text.trim().chars().take(MAX_DETAIL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Song A - Artist X", "Song A - Artist X")]
    #[case("AC/DC - Back In Black", "ACDC - Back In Black")]
    #[case("What's Up? - 4 Non Blondes", "Whats Up - 4 Non Blondes")]
    #[case("Song (Live) [2011 Remaster]", "Song (Live) 2011 Remaster")]
    #[case("  padded  ", "padded")]
    #[case("Beyoncé - Halo", "Beyoncé - Halo")]
    #[case("a_b.c", "a_b.c")]
    #[case("***", "")]
    fn keeps_only_safe_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    #[test]
    fn caps_length_at_150_characters() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn cap_counts_characters_not_bytes() {
        let long = "é".repeat(200);
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized.chars().count(), MAX_NAME_CHARS);
    }

    #[rstest]
    #[case("Song A - Artist X")]
    #[case("Weird | name: with / everything * ?")]
    #[case("  (leading) and trailing.  ")]
    fn sanitizing_twice_changes_nothing(#[case] input: &str) {
        let once = sanitize_filename(input);
        assert_eq!(sanitize_filename(&once), once);
    }

    #[test]
    fn sanitizing_a_capped_name_twice_changes_nothing() {
        for input in [format!("{} tail", "y".repeat(149)), "ab ".repeat(100)] {
            let once = sanitize_filename(&input);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn truncated_name_does_not_end_in_space() {
        let input = format!("{} tail", "y".repeat(149));
        assert_eq!(sanitize_filename(&input), "y".repeat(149));
    }

    #[test]
    fn extension_is_appended_after_dotted_stems() {
        assert_eq!(
            append_extension(Path::new("songs/Mr. Brightside - The Killers"), "mp3"),
            PathBuf::from("songs/Mr. Brightside - The Killers.mp3")
        );
    }

    #[test]
    fn detail_is_cut_to_80_characters() {
        let long = "e".repeat(200);
        assert_eq!(truncate_detail(&long).len(), MAX_DETAIL_CHARS);
        assert_eq!(truncate_detail("  short  "), "short");
    }
}
