use crate::kana::KanaTables;
use crate::ops::ConvertOps;

use super::rules::{run_chain, Rule, RuleContext};

/// Left-to-right cursor over the input with a variable stride.
pub(super) struct Scan<'a> {
    chars: Vec<char>,
    pos: usize,
    ignore: &'a str,
}

impl<'a> Scan<'a> {
    pub fn new(text: &str, ignore: &'a str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            ignore,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn lookahead(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self, stride: usize) {
        self.pos += stride;
    }
}

/// What happened to one input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Step {
    /// Character index of `input` in the original text.
    pub index: usize,
    pub input: char,
    /// Mark fused into `output` from the following position.
    pub fused: Option<char>,
    pub output: char,
    pub suffix: Option<char>,
    pub rule: Option<Rule>,
    pub ignored: bool,
}

impl Step {
    pub fn write_to(&self, out: &mut String) {
        out.push(self.output);
        if let Some(suffix) = self.suffix {
            out.push(suffix);
        }
    }

    fn passthrough(index: usize, c: char, ignored: bool) -> Self {
        Self {
            index,
            input: c,
            fused: None,
            output: c,
            suffix: None,
            rule: None,
            ignored,
        }
    }
}

/// Applies the rule chain to a [`Scan`], one step per turn.
pub(super) struct Engine<'t> {
    ops: ConvertOps,
    tables: &'t KanaTables,
}

impl<'t> Engine<'t> {
    pub fn new(ops: ConvertOps, tables: &'t KanaTables) -> Self {
        Self { ops, tables }
    }

    pub fn next_step(&self, scan: &mut Scan<'_>) -> Option<Step> {
        let index = scan.pos;
        let current = scan.current()?;

        // Ignored characters skip their own turn only; they can still be
        // fused as the previous character's lookahead.
        if scan.ignore.contains(current) {
            scan.advance(1);
            return Some(Step::passthrough(index, current, true));
        }

        let next = scan.lookahead();
        let cx = RuleContext::new(self.ops, self.tables, current, next);
        let step = match run_chain(&cx) {
            Some((rule, r)) => Step {
                index,
                input: current,
                fused: if r.consumes_next { next } else { None },
                output: r.out,
                suffix: r.suffix,
                rule: Some(rule),
                ignored: false,
            },
            None => Step::passthrough(index, current, false),
        };
        scan.advance(if step.fused.is_some() { 2 } else { 1 });
        Some(step)
    }
}
