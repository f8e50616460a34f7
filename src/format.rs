//! Inline markup for instructional text.
//!
//! Exercise prose embeds `tag[span]` markers (`cmd[git log]`,
//! `fs[file1.txt]`, ...) that are rendered with a fixed terminal style per
//! tag. Text outside the markers and markers with an unknown tag pass
//! through untouched.

use std::sync::LazyLock;

use console::Style;
use regex::{Captures, Regex};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]+)\[([^\]]*)\]").expect("tag pattern is valid"));

/// Returns the style rendered for a markup tag, if the tag is known.
pub fn tag_style(tag: &str) -> Option<Style> {
    let style = match tag {
        "cmd" | "opt" => Style::new().green().bright().italic(),
        "fs" => Style::new().white().bright().bold().italic(),
        "sv" => Style::new().red().bright().bold(),
        "bad" => Style::new().red().bright(),
        "ok" => Style::new().green(),
        "old" => Style::new().red(),
        "new" => Style::new().blue().bright(),
        "msg" => Style::new().yellow().bright(),
        "ext" => Style::new().yellow(),
        "hash" => Style::new().yellow().bright().italic(),
        "bname" => Style::new().red().bright().italic(),
        "nb" => Style::new().red().bold().underlined(),
        "stress" => Style::new().italic().underlined(),
        "title" => Style::new().bold().underlined(),
        "bold" => Style::new().bold(),
        "italic" => Style::new().italic(),
        "under" => Style::new().underlined(),
        _ => return None,
    };
    Some(style)
}

/// Replaces every `tag[span]` marker with its styled span.
pub fn format(text: &str) -> String {
    TAG_RE
        .replace_all(text, |caps: &Captures<'_>| match tag_style(&caps[1]) {
            Some(style) => style.apply_to(&caps[2]).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(format("foo bar"), "foo bar");
    }

    #[test]
    fn formats_tagged_spans_only() {
        let text = "foo sv[NOTE] cmd[bar] baz cmd[bla] xxx fs[file1.txt]";
        let expected = format!(
            "foo {} {} baz {} xxx {}",
            tag_style("sv").unwrap().apply_to("NOTE"),
            tag_style("cmd").unwrap().apply_to("bar"),
            tag_style("cmd").unwrap().apply_to("bla"),
            tag_style("fs").unwrap().apply_to("file1.txt"),
        );
        assert_eq!(format(text), expected);
    }

    #[test]
    fn unknown_tags_are_left_alone() {
        assert_eq!(format("see wat[this]"), "see wat[this]");
    }

    #[test]
    fn empty_span_is_styled_empty() {
        let expected = tag_style("ok").unwrap().apply_to("").to_string();
        assert_eq!(format("ok[]"), expected);
    }
}
