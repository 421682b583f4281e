//! Directive parsing for the `link A to B` marker-file language.
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Grammar of a link directive: the literal word `link`, an optionally
/// double-quoted source operand (lazy match), the literal word `to`, and an
/// optionally double-quoted destination operand running to end of line.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    let re = Regex::new(r#"^link "?(.*?)"?\s*to\s+"?(.*?)"?\s*$"#)
        .expect("link directive pattern is valid");
    re
});

/// One parsed `link A to B` instruction with both paths fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Link source, resolved relative to the owning unit's directory.
    pub source: PathBuf,
    /// Link destination, with a leading `~` expanded to the home directory.
    pub dest: PathBuf,
}

/// Parse a single marker-file line into at most one [`Directive`].
///
/// Whitespace around the line is ignored. A line that does not match the
/// grammar — blank lines, comments, malformed directives — yields `None`
/// and the caller skips it; ordinary malformed input is never an error.
///
/// The source operand is joined onto `unit_dir`; the destination operand
/// has a leading `~` segment expanded against `home`, which is passed in
/// explicitly so parsing stays independent of ambient process state.
#[must_use]
pub fn parse_line(line: &str, unit_dir: &Path, home: &Path) -> Option<Directive> {
    let caps = LINK_RE.captures(line.trim())?;
    let source = caps.get(1)?.as_str();
    let dest = caps.get(2)?.as_str();
    Some(Directive {
        source: unit_dir.join(source),
        dest: expand_home(dest, home),
    })
}

/// Expand a leading `~` segment into the given home directory.
///
/// `~` alone resolves to `home`, `~/x` to `home/x`; anything else is used
/// verbatim (a `~` in the middle of a path has no special meaning).
fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}
