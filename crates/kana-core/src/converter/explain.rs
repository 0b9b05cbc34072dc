use serde::Serialize;

use crate::kana::KanaTables;
use crate::ops::ConvertOps;
use crate::unicode::{classify, CharClass};

use super::rules::Rule;
use super::scan::{Engine, Scan, Step};

/// Step-by-step record of a conversion.
#[derive(Debug, Serialize)]
pub struct Explanation {
    pub input: String,
    pub output: String,
    /// Mnemonic spelling of the operations that were applied.
    pub mode: String,
    pub keep_diacritic_marks_apart: bool,
    pub steps: Vec<ExplainStep>,
}

/// One turn of the scan.
#[derive(Debug, Serialize)]
pub struct ExplainStep {
    /// Character index in the input.
    pub index: usize,
    /// Class of the character whose turn this was.
    pub class: CharClass,
    /// Consumed input: one character, or two when a mark was fused.
    pub input: String,
    /// Emitted output: one character, or two when a mark was split off.
    pub output: String,
    pub rule: Option<Rule>,
    pub ignored: bool,
}

impl From<Step> for ExplainStep {
    fn from(step: Step) -> Self {
        let mut input = String::from(step.input);
        input.extend(step.fused);
        let mut output = String::new();
        step.write_to(&mut output);
        Self {
            index: step.index,
            class: classify(step.input),
            input,
            output,
            rule: step.rule,
            ignored: step.ignored,
        }
    }
}

/// Run a conversion and record which rule handled each position.
///
/// `explanation.output` is always identical to [`convert`](super::convert)'s result.
pub fn explain(text: &str, ops: ConvertOps, ignore: &str) -> Explanation {
    let mut steps = Vec::new();
    let mut output = String::with_capacity(text.len());

    // No-op requests still list every character as a pass-through.
    let engine = Engine::new(ops, KanaTables::global());
    let mut scan = Scan::new(text, ignore);
    while let Some(step) = engine.next_step(&mut scan) {
        step.write_to(&mut output);
        steps.push(ExplainStep::from(step));
    }

    Explanation {
        input: text.to_string(),
        output,
        mode: ops.to_mnemonic(),
        keep_diacritic_marks_apart: ops.contains(ConvertOps::KEEP_DIACRITIC_MARKS_APART),
        steps,
    }
}

impl Explanation {
    /// Number of steps where a rule fired.
    pub fn changed(&self) -> usize {
        self.steps.iter().filter(|s| s.rule.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::convert;

    #[test]
    fn explain_matches_convert() {
        let ops = ConvertOps::from_mnemonic("KVa");
        for text in ["ｶﾞｷﾞｸﾞ ＡＢＣ", "ﾊﾟﾝ", "", "ＡﾞＢ"] {
            assert_eq!(explain(text, ops, "").output, convert(text, ops, ""));
        }
    }

    #[test]
    fn explain_records_fusion_and_split() {
        let e = explain("ｶﾞ", ConvertOps::HAN_KATA_TO_ZEN_KATA, "");
        assert_eq!(e.steps.len(), 1);
        assert_eq!(e.steps[0].input, "ｶﾞ");
        assert_eq!(e.steps[0].output, "ガ");
        assert_eq!(e.steps[0].rule, Some(Rule::HanKataToZenKana));
        assert_eq!(e.steps[0].class, CharClass::HankakuKatakana);

        let e = explain("ガ", ConvertOps::ZEN_KATA_TO_HAN_KATA, "");
        assert_eq!(e.steps[0].input, "ガ");
        assert_eq!(e.steps[0].output, "ｶﾞ");
        assert_eq!(e.changed(), 1);
    }

    #[test]
    fn explain_no_op_lists_every_character() {
        let e = explain("あa", ConvertOps::empty(), "");
        assert_eq!(e.output, "あa");
        assert_eq!(e.steps.len(), 2);
        assert_eq!(e.changed(), 0);
        assert_eq!(e.mode, "");
    }

    #[test]
    fn explain_serializes_rule_names() {
        let e = explain("A", ConvertOps::HAN_ASCII_TO_ZEN_ASCII, "");
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"rule\":\"han_ascii_to_zen_ascii\""));
        assert!(json.contains("\"mode\":\"A\""));
        assert!(json.contains("\"class\":\"hankaku_ascii\""));
    }
}
