//! Recognizers for CLI commands and parameter values in free text.
//!
//! Commands start at a fixed set of CLI prefixes. Inside fenced code and
//! inline code spans a command runs to the end of the line or span; in prose
//! it stops at punctuation, non-ASCII text or a connecting word.

use std::sync::LazyLock;

use regex::Regex;

/// Leading words that identify a command line.
pub const COMMAND_PREFIXES: [&str; 8] = [
    "nv",
    "net",
    "vtysh",
    "sudo",
    "ping",
    "traceroute",
    "display",
    "undo",
];

/// Second words that make `net ...` an NCLU command rather than prose.
const NCLU_VERBS: [&str; 6] = ["add", "del", "show", "commit", "pending", "abort"];

/// Words that end a command written inline in prose.
const PROSE_BREAKS: [&str; 26] = [
    "on", "to", "for", "and", "then", "in", "at", "the", "with", "from", "after", "before",
    "each", "every", "which", "that", "this", "it", "if", "when", "or", "so", "is", "are",
    "will", "should",
];

const TRAILING_PUNCTUATION: [char; 10] = ['.', ',', ';', ':', '!', '?', '。', '，', '；', '：'];

static CODE_COMMAND_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_-])((?:nv|net|vtysh|sudo|ping|traceroute|display|undo)(?:[ \t]+[!-~]+)+)").ok()
});

static PROSE_COMMAND_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^A-Za-z0-9_-])((?:nv|net|vtysh|sudo|ping|traceroute|display|undo)(?:[ \t]+[A-Za-z0-9_./:@=<>*+!#%~-]+)+)",
    )
    .ok()
});

static ADDRESS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:\.\d{1,3}){3}(?:/\d{1,2})?").ok());

static INTERFACE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)swp\d+(?:s\d+)?|eth\d+|bond\d+|vlan\d+|peerlink(?:\.\d+)?|(?:10|25|40|100)?ge\d+/\d+/\d+|ethernet\d+/\d+(?:/\d+)?",
    )
    .ok()
});

static KEYED_PARAMETER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(mtu|priority|vni|asn|remote-as|area|cost|weight|timeout|threshold|queue|pcp|dscp|traffic-class)[ \t]+(\d+)",
    )
    .ok()
});

static UNIT_PARAMETER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)[ \t]*(gbps|mbps|bytes|kb|mb|gb|ms)").ok()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Code,
    Prose,
}

/// Every command in `text`, whitespace-normalized, first occurrence order.
pub fn extract_commands(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            commands_in(line, Context::Code, &mut out);
            continue;
        }
        // Odd segments sit between backticks.
        for (i, segment) in line.split('`').enumerate() {
            let context = if i % 2 == 1 {
                Context::Code
            } else {
                Context::Prose
            };
            commands_in(segment, context, &mut out);
        }
    }

    let mut seen = std::collections::HashSet::new();
    out.retain(|c| seen.insert(c.clone()));
    out
}

fn commands_in(segment: &str, context: Context, out: &mut Vec<String>) {
    let re = match context {
        Context::Code => CODE_COMMAND_RE.as_ref(),
        Context::Prose => PROSE_COMMAND_RE.as_ref(),
    };
    let Some(re) = re else { return };

    for caps in re.captures_iter(segment) {
        let Some(raw) = caps.get(1) else { continue };
        let raw = raw.as_str();
        let command = match context {
            Context::Code => normalize(strip_comment(raw)),
            Context::Prose => normalize(&cut_at_prose(raw)),
        };
        if is_command(&command) {
            out.push(command);
        }
    }
}

fn strip_comment(raw: &str) -> &str {
    match raw.find(" #") {
        Some(i) => &raw[..i],
        None => raw,
    }
}

fn cut_at_prose(raw: &str) -> String {
    raw.split_whitespace()
        .enumerate()
        .take_while(|(i, word)| *i < 2 || !PROSE_BREAKS.contains(&word.to_ascii_lowercase().as_str()))
        .map(|(_, word)| word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A prefix plus at least one argument, with `net` limited to NCLU verbs.
fn is_command(command: &str) -> bool {
    let mut words = command.split(' ');
    let (Some(first), Some(second)) = (words.next(), words.next()) else {
        return false;
    };
    if first == "net" {
        return NCLU_VERBS.contains(&second);
    }
    COMMAND_PREFIXES.contains(&first) && !PROSE_BREAKS.contains(&second)
}

/// Collapse whitespace and drop trailing sentence punctuation.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(|c: char| c == ' ' || TRAILING_PUNCTUATION.contains(&c))
        .to_string()
}

/// `needle` occurs in `haystack` with no ASCII word character on either side.
pub fn contains_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack
        .match_indices(needle)
        .any(|(start, _)| is_bounded(haystack, start, start + needle.len()))
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let before = text[..start].chars().next_back().map_or(true, |c| !word(c));
    let after = text[end..].chars().next().map_or(true, |c| !word(c));
    before && after
}

/// IPv4 addresses and CIDR blocks with valid octets.
pub fn addresses(text: &str) -> Vec<String> {
    let Some(re) = ADDRESS_RE.as_ref() else {
        return Vec::new();
    };
    re.find_iter(text)
        .filter(|m| {
            let before = text[..m.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_ascii_digit() && c != '.');
            let after = text[m.end()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_digit());
            before && after
        })
        .map(|m| m.as_str())
        .filter(|a| valid_octets(a))
        .map(str::to_string)
        .collect()
}

fn valid_octets(address: &str) -> bool {
    let ip = address.split('/').next().unwrap_or(address);
    ip.split('.')
        .all(|o| o.parse::<u16>().is_ok_and(|v| v <= 255) && (o.len() == 1 || !o.starts_with('0')))
}

/// Interface names, lowercased.
pub fn interfaces(text: &str) -> Vec<String> {
    let Some(re) = INTERFACE_RE.as_ref() else {
        return Vec::new();
    };
    re.find_iter(text)
        .filter(|m| is_bounded(text, m.start(), m.end()))
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

/// A numeric value mentioned in an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Phrase as it reads in the answer, lowercased.
    pub phrase: String,
    /// Word that must appear alongside the value, e.g. `mtu` or `kb`.
    pub qualifier: String,
    pub value: String,
}

/// Keyed (`mtu 9216`) and unit-bearing (`1500 KB`) numeric values.
pub fn parameters(text: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    if let Some(re) = KEYED_PARAMETER_RE.as_ref() {
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            if !is_bounded(text, whole.start(), whole.end()) {
                continue;
            }
            out.push(Parameter {
                phrase: normalize(whole.as_str()).to_ascii_lowercase(),
                qualifier: key.as_str().to_ascii_lowercase(),
                value: value.as_str().to_string(),
            });
        }
    }
    if let Some(re) = UNIT_PARAMETER_RE.as_ref() {
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(value), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            if !is_bounded(text, whole.start(), whole.end()) {
                continue;
            }
            out.push(Parameter {
                phrase: normalize(whole.as_str()).to_ascii_lowercase(),
                qualifier: unit.as_str().to_ascii_lowercase(),
                value: value.as_str().to_string(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_command_after_cjk_colon() {
        assert_eq!(extract_commands("执行命令：nv commit"), ["nv commit"]);
    }

    #[test]
    fn prose_command_stops_at_connecting_word() {
        assert_eq!(
            extract_commands("Run nv set qos roce mode lossless on each leaf."),
            ["nv set qos roce mode lossless"]
        );
        assert_eq!(extract_commands("ping 10.0.0.1 from the spine"), ["ping 10.0.0.1"]);
    }

    #[test]
    fn prose_command_stops_at_cjk_text() {
        assert_eq!(extract_commands("使用nv config apply命令生效"), ["nv config apply"]);
    }

    #[test]
    fn fenced_lines_keep_full_arguments() {
        let text = "Steps:\n```bash\ncumulus@leaf01:~$ nv set interface swp1 link mtu 9216  # jumbo\nvtysh -c \"show ip bgp summary\"\n```";
        assert_eq!(
            extract_commands(text),
            [
                "nv set interface swp1 link mtu 9216",
                "vtysh -c \"show ip bgp summary\""
            ]
        );
    }

    #[test]
    fn inline_code_span_is_one_command() {
        assert_eq!(
            extract_commands("Verify with `nv show qos roce` and then save."),
            ["nv show qos roce"]
        );
    }

    #[test]
    fn prose_lookalikes_are_ignored() {
        assert!(extract_commands("The net effect is lower latency.").is_empty());
        assert!(extract_commands("These counters display the pause frames.").is_empty());
        assert!(extract_commands("Use nv").is_empty());
        assert!(extract_commands("envoy nv-like tooling").is_empty());
    }

    #[test]
    fn nclu_commands_are_recognized() {
        assert_eq!(extract_commands("net add vlan 10"), ["net add vlan 10"]);
    }

    #[test]
    fn duplicates_collapse() {
        let text = "nv config apply\n\n`nv config apply`";
        assert_eq!(extract_commands(text), ["nv config apply"]);
    }

    #[test]
    fn normalize_collapses_whitespace_and_trailing_punctuation() {
        assert_eq!(normalize("  nv   config\tapply。 "), "nv config apply");
    }

    #[test]
    fn bounded_containment() {
        assert!(contains_bounded("nv set vlan 10 done", "nv set vlan 10"));
        assert!(!contains_bounded("nv set vlan 100", "nv set vlan 10"));
        assert!(!contains_bounded("anything", ""));
    }

    #[test]
    fn address_and_interface_scanning() {
        assert_eq!(addresses("peer 10.1.1.2 in 10.1.0.0/16, not 1.2.3.999"), ["10.1.1.2", "10.1.0.0/16"]);
        assert_eq!(interfaces("接口swp1 and Ethernet1/0/3 plus bond0"), ["swp1", "ethernet1/0/3", "bond0"]);
    }

    #[test]
    fn parameter_scanning() {
        let found = parameters("Set MTU 9216 and keep ECN min at 150 KB.");
        let phrases: Vec<_> = found.iter().map(|p| p.phrase.as_str()).collect();
        assert_eq!(phrases, ["mtu 9216", "150 kb"]);
        assert_eq!(found[1].qualifier, "kb");
        assert_eq!(found[1].value, "150");
    }
}
