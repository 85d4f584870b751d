//! Output formatting for the merged timeline

use colored::Colorize;
use troupe_domain::{AgentId, PERSONA_DEFAULTS, Timeline};

/// Formats the merged timeline for the console and for export
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human-readable listing with per-agent attribution.
    pub fn format(timeline: &Timeline) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} ({} comments)\n\n",
            "Merged Comment Timeline".bold(),
            timeline.len()
        ));

        for comment in timeline.iter() {
            let attribution = comment
                .agent_id
                .map(Self::display_label)
                .unwrap_or_default();
            let command = if comment.command.is_empty() {
                String::new()
            } else {
                format!(" [{}]", comment.command.dimmed())
            };
            out.push_str(&format!(
                "{}{}  {}  {}\n",
                comment.time.cyan(),
                command,
                comment.comment,
                attribution.dimmed()
            ));
        }
        out
    }

    /// JSON array of comment records (`time`, `command`, `comment`, `agentId`).
    pub fn format_json(timeline: &Timeline) -> String {
        serde_json::to_string_pretty(timeline).expect("timeline serializes infallibly")
    }

    /// Niconico-style XML comment document.
    ///
    /// `vpos` is the comment position in centiseconds from the video start,
    /// derived from the timestamp; the styling command maps to the `mail`
    /// attribute.
    pub fn format_xml(timeline: &Timeline) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<packet>\n");
        for comment in timeline.iter() {
            let vpos = parse_vpos(&comment.time).unwrap_or(0);
            let mail = xml_escape(&comment.command);
            let body = xml_escape(&comment.comment);
            out.push_str(&format!(
                "  <chat vpos=\"{vpos}\" mail=\"{mail}\">{body}</chat>\n"
            ));
        }
        out.push_str("</packet>\n");
        out
    }

    fn display_label(agent: AgentId) -> String {
        PERSONA_DEFAULTS
            .iter()
            .find(|d| d.id == agent)
            .map(|d| format!("{} {}", d.icon, d.name))
            .unwrap_or_else(|| agent.to_string())
    }
}

/// Parse an `HH:MM:SS.ss`-style timestamp into centiseconds.
///
/// Shorter forms (`MM:SS.ss`, `SS.ss`) are accepted; each colon-separated
/// segment is one sexagesimal place.
fn parse_vpos(time: &str) -> Option<u64> {
    let mut seconds = 0.0f64;
    for segment in time.split(':') {
        let value: f64 = segment.trim().parse().ok()?;
        seconds = seconds * 60.0 + value;
    }
    if seconds < 0.0 {
        return None;
    }
    Some((seconds * 100.0).round() as u64)
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use troupe_domain::Comment;

    fn timeline() -> Timeline {
        let mut timeline = Timeline::new();
        timeline.merge(vec![
            Comment::new("00:00:05.50", "ue pink", "kita!").tagged(AgentId::Gal),
            Comment::new("00:01:00.00", "", "naruhodo <w>").tagged(AgentId::Professor),
        ]);
        timeline
    }

    #[test]
    fn test_full_format_lists_every_comment() {
        let out = ConsoleFormatter::format(&timeline());
        assert!(out.contains("kita!"));
        assert!(out.contains("naruhodo"));
        assert!(out.contains("Gal Agent"));
    }

    #[test]
    fn test_json_format_shape() {
        let out = ConsoleFormatter::format_json(&timeline());
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["time"], "00:00:05.50");
        assert_eq!(parsed[0]["agentId"], "gal");
        assert_eq!(parsed[1]["command"], "");
    }

    #[test]
    fn test_xml_vpos_and_escaping() {
        let out = ConsoleFormatter::format_xml(&timeline());
        // 5.50s -> 550 centiseconds; 1 minute -> 6000.
        assert!(out.contains("vpos=\"550\""));
        assert!(out.contains("vpos=\"6000\""));
        assert!(out.contains("mail=\"ue pink\""));
        assert!(out.contains("naruhodo &lt;w&gt;"));
    }

    #[test]
    fn test_parse_vpos_forms() {
        assert_eq!(parse_vpos("00:00:05.50"), Some(550));
        assert_eq!(parse_vpos("01:00.00"), Some(6000));
        assert_eq!(parse_vpos("12.34"), Some(1234));
        assert_eq!(parse_vpos("not a time"), None);
    }
}
