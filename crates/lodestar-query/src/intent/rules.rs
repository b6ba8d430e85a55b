//! Declared intent rules, evaluated in order.
//!
//! Every matching term contributes the rule's weight to its intent; a
//! pattern rule contributes its weight once. Rules are listed in intent
//! priority order only for readability: the winner is decided by
//! [`Intent::PRIORITY`], never by position in this table.

use std::sync::LazyLock;

use lodestar_core::Intent;
use regex::Regex;

use crate::matching::contains_term;

pub enum Matcher {
    /// Lowercase terms; ASCII terms must stand alone as words.
    Terms(&'static [&'static str]),
    /// Regex applied to the lowercased query.
    Pattern(&'static str),
}

pub struct Rule {
    pub intent: Intent,
    pub weight: f64,
    pub label: &'static str,
    pub matcher: Matcher,
}

pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Troubleshoot,
        weight: 3.0,
        label: "failure vocabulary",
        matcher: Matcher::Terms(&[
            "why", "problem", "error", "errors", "fail", "failed", "fails", "failure",
            "not working", "down", "flapping", "flap", "dropped", "drops", "timeout",
            "troubleshoot", "debug", "issue", "broken", "unreachable", "为什么", "故障",
            "问题", "报错", "错误", "失败", "不通", "异常", "丢包", "中断", "排查", "排错",
        ]),
    },
    Rule {
        intent: Intent::Troubleshoot,
        weight: 3.0,
        label: "inability phrase",
        matcher: Matcher::Pattern(r"\b(?:can'?t|cannot|unable to|won'?t|doesn'?t)\s+\w+|无法|不能"),
    },
    Rule {
        intent: Intent::Performance,
        weight: 3.0,
        label: "performance vocabulary",
        matcher: Matcher::Terms(&[
            "performance", "latency", "throughput", "slow", "bandwidth", "optimize",
            "optimization", "tuning", "tune", "bottleneck", "性能", "延迟", "时延", "吞吐",
            "带宽", "优化", "调优", "瓶颈",
        ]),
    },
    Rule {
        intent: Intent::BestPractice,
        weight: 3.0,
        label: "recommendation vocabulary",
        matcher: Matcher::Terms(&[
            "best practice", "best practices", "recommend", "recommended",
            "recommendation", "should i", "guideline", "guidelines", "最佳实践", "建议",
            "推荐", "规范",
        ]),
    },
    Rule {
        intent: Intent::Verification,
        weight: 2.0,
        label: "verification vocabulary",
        matcher: Matcher::Terms(&[
            "verify", "check", "confirm", "validate", "status", "make sure", "验证",
            "检查", "确认", "查看", "状态",
        ]),
    },
    Rule {
        intent: Intent::Verification,
        weight: 2.0,
        label: "state question",
        matcher: Matcher::Pattern(r"\bis\s+\S+\s+(?:enabled|running|up|active|working)\b"),
    },
    Rule {
        intent: Intent::Configuration,
        weight: 2.0,
        label: "configuration vocabulary",
        matcher: Matcher::Terms(&[
            "configure", "configuration", "config", "set up", "setup", "enable",
            "disable", "set", "配置", "设置", "开启", "启用", "关闭", "禁用", "部署",
        ]),
    },
    Rule {
        intent: Intent::Configuration,
        weight: 2.0,
        label: "how-to-configure phrase",
        matcher: Matcher::Pattern(
            r"(?:如何|怎么|怎样)(?:配置|设置|开启|启用)|\bhow\s+(?:do\s+i|to|can\s+i)\s+(?:configure|set\s+up|enable|disable)\b",
        ),
    },
    Rule {
        intent: Intent::Explanation,
        weight: 2.0,
        label: "explanation vocabulary",
        matcher: Matcher::Terms(&[
            "explain", "what is", "what are", "meaning", "means", "definition",
            "overview", "introduction", "how does", "原理", "是什么", "含义", "解释", "介绍",
            "概念", "作用",
        ]),
    },
    Rule {
        intent: Intent::Comparison,
        weight: 3.0,
        label: "comparison vocabulary",
        matcher: Matcher::Terms(&[
            "compare", "comparison", "difference", "differences", "versus", "vs",
            "better than", "区别", "对比", "比较", "差异", "不同",
        ]),
    },
    Rule {
        intent: Intent::Command,
        weight: 2.0,
        label: "command vocabulary",
        matcher: Matcher::Terms(&["command", "commands", "cli", "syntax", "命令", "指令", "语法"]),
    },
    Rule {
        intent: Intent::Command,
        weight: 2.0,
        label: "bare cli invocation",
        matcher: Matcher::Pattern(r"^\s*(?:sudo\s+)?(?:nv|net|vtysh)\s+\S+"),
    },
    Rule {
        intent: Intent::Question,
        weight: 1.0,
        label: "question word",
        matcher: Matcher::Terms(&[
            "how", "what", "which", "where", "when", "can i", "如何", "怎么", "怎样", "什么",
            "哪些", "哪个", "是否", "能否",
        ]),
    },
    Rule {
        intent: Intent::Question,
        weight: 1.0,
        label: "question mark",
        matcher: Matcher::Pattern(r"[?？]\s*$|吗\s*$"),
    },
];

/// Compiled pattern per rule, `None` for term rules or a pattern that failed to compile.
static COMPILED: LazyLock<Vec<Option<Regex>>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| match rule.matcher {
            Matcher::Pattern(p) => Regex::new(p).ok(),
            Matcher::Terms(_) => None,
        })
        .collect()
});

/// Accumulated per-intent scores for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Indexed by [`Intent::priority`].
    pub scores: [f64; Intent::COUNT],
    pub reasons: Vec<String>,
}

impl Evaluation {
    pub fn score(&self, intent: Intent) -> f64 {
        self.scores.get(intent.priority()).copied().unwrap_or(0.0)
    }

    /// Highest-priority intent with a positive score and its normalized
    /// confidence, or `General` with zero confidence.
    pub fn winner(&self) -> (Intent, f64) {
        let max = self.scores.iter().copied().fold(0.0_f64, f64::max);
        Intent::PRIORITY
            .iter()
            .copied()
            .find(|&intent| self.score(intent) > 0.0)
            .map(|intent| (intent, (self.score(intent) / max).min(1.0)))
            .unwrap_or((Intent::General, 0.0))
    }
}

/// Run every rule over `text`.
pub fn evaluate(text: &str) -> Evaluation {
    let lower = text.to_lowercase();
    let mut scores = [0.0; Intent::COUNT];
    let mut reasons = Vec::new();

    for (idx, rule) in RULES.iter().enumerate() {
        let hits = match rule.matcher {
            Matcher::Terms(terms) => {
                let matched: Vec<&str> = terms
                    .iter()
                    .copied()
                    .filter(|t| contains_term(&lower, t))
                    .collect();
                if !matched.is_empty() {
                    reasons.push(format!("{}: {} ({})", rule.intent, rule.label, matched.join(", ")));
                }
                matched.len()
            }
            Matcher::Pattern(_) => {
                let hit = COMPILED
                    .get(idx)
                    .and_then(Option::as_ref)
                    .is_some_and(|re| re.is_match(&lower));
                if hit {
                    reasons.push(format!("{}: {}", rule.intent, rule.label));
                }
                usize::from(hit)
            }
        };
        if let Some(slot) = scores.get_mut(rule.intent.priority()) {
            *slot += rule.weight * hits as f64;
        }
    }

    Evaluation { scores, reasons }
}
