use std::fmt;

use serde::Serialize;

use crate::kana::KanaTables;
use crate::ops::ConvertOps;
use crate::unicode::{
    is_hankaku_ascii, is_hankaku_letter, is_hankaku_number, is_hankaku_space, is_zenkaku_ascii,
    is_zenkaku_hiragana_with_katakana_equivalent, is_zenkaku_katakana_with_hiragana_equivalent,
    is_zenkaku_letter, is_zenkaku_number, is_zenkaku_space, shift, HANKAKU_SPACE,
    OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII, OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA,
    ZENKAKU_SPACE,
};

/// One link of the per-character rule chain, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    HanAsciiToZenAscii,
    HanLetterToZenLetter,
    HanNumberToZenNumber,
    HanSpaceToZenSpace,
    HanKataToZenKana,
    ZenAsciiToHanAscii,
    ZenLetterToHanLetter,
    ZenNumberToHanNumber,
    ZenSpaceToHanSpace,
    ZenKataToHanKata,
    ZenHiraToKata,
    ZenKataToZenHira,
}

impl Rule {
    pub const CHAIN: [Rule; 12] = [
        Rule::HanAsciiToZenAscii,
        Rule::HanLetterToZenLetter,
        Rule::HanNumberToZenNumber,
        Rule::HanSpaceToZenSpace,
        Rule::HanKataToZenKana,
        Rule::ZenAsciiToHanAscii,
        Rule::ZenLetterToHanLetter,
        Rule::ZenNumberToHanNumber,
        Rule::ZenSpaceToHanSpace,
        Rule::ZenKataToHanKata,
        Rule::ZenHiraToKata,
        Rule::ZenKataToZenHira,
    ];

    /// Flags that enable this rule; any one of them is enough.
    pub fn gate(self) -> ConvertOps {
        match self {
            Rule::HanAsciiToZenAscii => ConvertOps::HAN_ASCII_TO_ZEN_ASCII,
            Rule::HanLetterToZenLetter => ConvertOps::HAN_LETTER_TO_ZEN_LETTER,
            Rule::HanNumberToZenNumber => ConvertOps::HAN_NUMBER_TO_ZEN_NUMBER,
            Rule::HanSpaceToZenSpace => ConvertOps::HAN_SPACE_TO_ZEN_SPACE,
            Rule::HanKataToZenKana => {
                ConvertOps::HAN_KATA_TO_ZEN_KATA | ConvertOps::HAN_KATA_TO_ZEN_HIRA
            }
            Rule::ZenAsciiToHanAscii => ConvertOps::ZEN_ASCII_TO_HAN_ASCII,
            Rule::ZenLetterToHanLetter => ConvertOps::ZEN_LETTER_TO_HAN_LETTER,
            Rule::ZenNumberToHanNumber => ConvertOps::ZEN_NUMBER_TO_HAN_NUMBER,
            Rule::ZenSpaceToHanSpace => ConvertOps::ZEN_SPACE_TO_HAN_SPACE,
            Rule::ZenKataToHanKata => ConvertOps::ZEN_KATA_TO_HAN_KATA,
            Rule::ZenHiraToKata => {
                ConvertOps::ZEN_HIRA_TO_ZEN_KATA | ConvertOps::ZEN_HIRA_TO_HAN_KATA
            }
            Rule::ZenKataToZenHira => ConvertOps::ZEN_KATA_TO_ZEN_HIRA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::HanAsciiToZenAscii => "han-ascii->zen-ascii",
            Rule::HanLetterToZenLetter => "han-letter->zen-letter",
            Rule::HanNumberToZenNumber => "han-number->zen-number",
            Rule::HanSpaceToZenSpace => "han-space->zen-space",
            Rule::HanKataToZenKana => "han-kata->zen-kana",
            Rule::ZenAsciiToHanAscii => "zen-ascii->han-ascii",
            Rule::ZenLetterToHanLetter => "zen-letter->han-letter",
            Rule::ZenNumberToHanNumber => "zen-number->han-number",
            Rule::ZenSpaceToHanSpace => "zen-space->han-space",
            Rule::ZenKataToHanKata => "zen-kata->han-kata",
            Rule::ZenHiraToKata => "zen-hira->kata",
            Rule::ZenKataToZenHira => "zen-kata->zen-hira",
        }
    }

    /// Try this rule on the current character. Gating is the caller's job.
    pub(super) fn apply(self, cx: &RuleContext<'_>) -> Outcome {
        let c = cx.current;
        match self {
            Rule::HanAsciiToZenAscii => {
                if is_hankaku_ascii(c) {
                    Outcome::replace(shift(c, OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII))
                } else if is_hankaku_space(c) {
                    Outcome::replace(ZENKAKU_SPACE)
                } else {
                    Outcome::Unchanged
                }
            }
            Rule::HanLetterToZenLetter => {
                shift_if(c, is_hankaku_letter(c), OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII)
            }
            Rule::HanNumberToZenNumber => {
                shift_if(c, is_hankaku_number(c), OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII)
            }
            Rule::HanSpaceToZenSpace if is_hankaku_space(c) => Outcome::replace(ZENKAKU_SPACE),
            Rule::HanKataToZenKana => han_kata_to_zen_kana(cx),
            Rule::ZenAsciiToHanAscii => {
                if is_zenkaku_ascii(c) {
                    Outcome::replace(shift(c, -OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII))
                } else if is_zenkaku_space(c) {
                    Outcome::replace(HANKAKU_SPACE)
                } else {
                    Outcome::Unchanged
                }
            }
            Rule::ZenLetterToHanLetter => {
                shift_if(c, is_zenkaku_letter(c), -OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII)
            }
            Rule::ZenNumberToHanNumber => {
                shift_if(c, is_zenkaku_number(c), -OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII)
            }
            Rule::ZenSpaceToHanSpace if is_zenkaku_space(c) => Outcome::replace(HANKAKU_SPACE),
            Rule::ZenKataToHanKata => narrow(cx.tables, c),
            Rule::ZenHiraToKata => zen_hira_to_kata(cx),
            Rule::ZenKataToZenHira => Outcome::replace(cx.as_hiragana),
            Rule::HanSpaceToZenSpace | Rule::ZenSpaceToHanSpace => Outcome::Unchanged,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a rule may look at for one character's turn.
pub(super) struct RuleContext<'t> {
    pub ops: ConvertOps,
    pub tables: &'t KanaTables,
    pub current: char,
    /// Raw next input character, ignored or not.
    pub next: Option<char>,
    /// `current` shifted to hiragana when it is a convertible katakana,
    /// otherwise `current` itself.
    pub as_hiragana: char,
}

impl<'t> RuleContext<'t> {
    pub fn new(ops: ConvertOps, tables: &'t KanaTables, current: char, next: Option<char>) -> Self {
        Self {
            ops,
            tables,
            current,
            next,
            as_hiragana: katakana_to_hiragana(current),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Replacement {
    pub out: char,
    /// Half-width mark to emit right after `out`.
    pub suffix: Option<char>,
    /// The lookahead character was fused into `out`.
    pub consumes_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Outcome {
    Unchanged,
    Replaced(Replacement),
}

impl Outcome {
    fn replace(out: char) -> Self {
        Outcome::Replaced(Replacement {
            out,
            suffix: None,
            consumes_next: false,
        })
    }
}

/// Run the chain; the first rule that changes the character wins.
pub(super) fn run_chain(cx: &RuleContext<'_>) -> Option<(Rule, Replacement)> {
    Rule::CHAIN.iter().find_map(|&rule| {
        if !cx.ops.intersects(rule.gate()) {
            return None;
        }
        match rule.apply(cx) {
            // A rule that maps a character onto itself has not fired.
            Outcome::Replaced(r) if r.out != cx.current || r.consumes_next => Some((rule, r)),
            _ => None,
        }
    })
}

fn shift_if(c: char, applies: bool, delta: i32) -> Outcome {
    if applies {
        Outcome::replace(shift(c, delta))
    } else {
        Outcome::Unchanged
    }
}

fn katakana_to_hiragana(c: char) -> char {
    if is_zenkaku_katakana_with_hiragana_equivalent(c) {
        shift(c, -OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA)
    } else {
        c
    }
}

/// Half-width katakana → full-width katakana (or hiragana when only `H` was
/// requested), fusing a following voiced/aspirated mark unless told not to.
fn han_kata_to_zen_kana(cx: &RuleContext<'_>) -> Outcome {
    let fused = if cx.ops.contains(ConvertOps::KEEP_DIACRITIC_MARKS_APART) {
        None
    } else {
        cx.next.and_then(|next| cx.tables.fuse(cx.current, next))
    };

    let (wide, consumes_next) = match fused {
        Some(wide) => (wide, true),
        None => match cx.tables.widen(cx.current) {
            Some(wide) => (wide, false),
            None => return Outcome::Unchanged,
        },
    };

    let out = if cx.ops.contains(ConvertOps::HAN_KATA_TO_ZEN_KATA) {
        wide
    } else {
        katakana_to_hiragana(wide)
    };
    Outcome::Replaced(Replacement {
        out,
        suffix: None,
        consumes_next,
    })
}

fn narrow(tables: &KanaTables, c: char) -> Outcome {
    match tables.narrow(c) {
        Some(out) => Outcome::Replaced(Replacement {
            out,
            suffix: tables.diacritic_suffix(c),
            consumes_next: false,
        }),
        None => Outcome::Unchanged,
    }
}

/// Hiragana → full-width katakana, then on to half-width if `h` was requested.
///
/// Convertible full-width katakana never enter here, so a character the
/// zen→han rule left alone cannot be narrowed by this one.
fn zen_hira_to_kata(cx: &RuleContext<'_>) -> Outcome {
    let c = cx.current;
    if is_zenkaku_katakana_with_hiragana_equivalent(c) {
        return Outcome::Unchanged;
    }
    let kata = if is_zenkaku_hiragana_with_katakana_equivalent(c) {
        shift(c, OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA)
    } else {
        c
    };
    if cx.ops.contains(ConvertOps::ZEN_HIRA_TO_HAN_KATA) {
        if let Outcome::Replaced(r) = narrow(cx.tables, kata) {
            return Outcome::Replaced(r);
        }
    }
    Outcome::replace(kata)
}
