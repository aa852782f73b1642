use std::sync::LazyLock;

use regex::Regex;

/// Placeholder for frames whose opening marker carries no title.
pub const NO_TITLE: &str = "(no title)";

// \begin{frame}<overlay>[options]{Title}
static BEGIN_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\begin\{frame\}(?:<[^>]*>)?(?:\[[^\]]*\])?\{([^}]*)\}")
        .expect("static regex is valid")
});

// \frame{\titlepage}
static SHORTHAND_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\frame\{\\(\w+)\}").expect("static regex is valid"));

/// Extract a display title from frame text that starts at the opening marker.
pub fn frame_title(opening: &str) -> String {
    if let Some(caps) = BEGIN_TITLE.captures(opening) {
        return caps[1].to_string();
    }
    if let Some(caps) = SHORTHAND_COMMAND.captures(opening) {
        return format!("\\{}", &caps[1]);
    }
    NO_TITLE.to_string()
}
