//! Social link list parsing

use lazy_static::lazy_static;
use regex::Regex;

use super::SocialItem;

lazy_static! {
    /// `- [Label](href)`, with any number of leading dashes
    static ref SOCIAL_LINE: Regex = Regex::new(r"^-+\s*\[([^\]]+)\]\(([^)]+)\)\s*$").unwrap();
}

/// Parse one line; anything that is not a bullet link yields `None`
pub fn parse_social_line(line: &str) -> Option<SocialItem> {
    let caps = SOCIAL_LINE.captures(line.trim())?;
    Some(SocialItem {
        label: caps[1].trim().to_string(),
        href: caps[2].trim().to_string(),
    })
}

/// Parse every bullet link in a markdown body, in file order
pub fn parse_social_items(body: &str) -> Vec<SocialItem> {
    body.lines().filter_map(parse_social_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let item = parse_social_line("- [Discord](https://discord.gg/x)").unwrap();
        assert_eq!(item.label, "Discord");
        assert_eq!(item.href, "https://discord.gg/x");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let item = parse_social_line("   --  [ Steam ]( https://steamcommunity.com/id/me )  ").unwrap();
        assert_eq!(item.label, "Steam");
        assert_eq!(item.href, "https://steamcommunity.com/id/me");
    }

    #[test]
    fn test_non_matching_lines_dropped() {
        assert!(parse_social_line("just text").is_none());
        assert!(parse_social_line("* [Star](https://x.y)").is_none());
        assert!(parse_social_line("- [Trailing](https://x.y) extra").is_none());
        assert!(parse_social_line("- [](https://x.y)").is_none());
        assert!(parse_social_line("").is_none());
    }

    #[test]
    fn test_items_in_file_order() {
        let body = "- [Discord](https://discord.gg/x)\njust text\n\n- [Twitter](https://twitter.com/me)\r\n";
        let items = parse_social_items(body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Discord");
        assert_eq!(items[1].label, "Twitter");
        assert_eq!(items[1].href, "https://twitter.com/me");
    }
}
