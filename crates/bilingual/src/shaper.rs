//! Arabic presentation-form shaping
//!
//! The PDF layer draws glyphs exactly as encoded, with no text engine in
//! between, so Arabic has to arrive already in visual order with contextual
//! forms applied. This module converts logical-order Arabic text to Unicode
//! Presentation Forms-B and reverses it for left-to-right emission.
//!
//! The reverse is unconditional and applies to the whole string, which is
//! right for the short label-like strings this crate translates. Mixed
//! bidirectional paragraphs are out of scope.

/// Presentation forms and joining behavior of one Arabic letter
struct Letter {
    isolated: u32,
    final_: u32,
    initial: u32,
    medial: u32,
    /// Whether the letter connects to the following letter
    joins_forward: bool,
    /// Whether the letter connects to the preceding letter
    joins_backward: bool,
}

/// A dual-joining letter: the four forms sit at consecutive codepoints in
/// isolated, final, initial, medial order
const fn dual(base: u32) -> Letter {
    Letter {
        isolated: base,
        final_: base + 1,
        initial: base + 2,
        medial: base + 3,
        joins_forward: true,
        joins_backward: true,
    }
}

/// A right-joining letter: only isolated and final forms exist
const fn tail(base: u32) -> Letter {
    Letter {
        isolated: base,
        final_: base + 1,
        initial: base,
        medial: base + 1,
        joins_forward: false,
        joins_backward: true,
    }
}

fn letter_forms(c: char) -> Option<Letter> {
    let letter = match c {
        // hamza
        'ء' => Letter {
            isolated: 0xFE80,
            final_: 0xFE80,
            initial: 0xFE80,
            medial: 0xFE80,
            joins_forward: false,
            joins_backward: false,
        },
        'آ' => tail(0xFE81), // alef with madda
        'أ' => tail(0xFE83), // alef with hamza above
        'ؤ' => tail(0xFE85), // waw with hamza
        'إ' => tail(0xFE87), // alef with hamza below
        'ئ' => dual(0xFE89), // yeh with hamza
        'ا' => tail(0xFE8D), // alef
        'ب' => dual(0xFE8F), // beh
        'ة' => tail(0xFE93), // teh marbuta
        'ت' => dual(0xFE95), // teh
        'ث' => dual(0xFE99), // theh
        'ج' => dual(0xFE9D), // jeem
        'ح' => dual(0xFEA1), // hah
        'خ' => dual(0xFEA5), // khah
        'د' => tail(0xFEA9), // dal
        'ذ' => tail(0xFEAB), // thal
        'ر' => tail(0xFEAD), // reh
        'ز' => tail(0xFEAF), // zain
        'س' => dual(0xFEB1), // seen
        'ش' => dual(0xFEB5), // sheen
        'ص' => dual(0xFEB9), // sad
        'ض' => dual(0xFEBD), // dad
        'ط' => dual(0xFEC1), // tah
        'ظ' => dual(0xFEC5), // zah
        'ع' => dual(0xFEC9), // ain
        'غ' => dual(0xFECD), // ghain
        // tatweel keeps its own codepoint and joins on both sides
        'ـ' => Letter {
            isolated: 0x0640,
            final_: 0x0640,
            initial: 0x0640,
            medial: 0x0640,
            joins_forward: true,
            joins_backward: true,
        },
        'ف' => dual(0xFED1), // feh
        'ق' => dual(0xFED5), // qaf
        'ك' => dual(0xFED9), // kaf
        'ل' => dual(0xFEDD), // lam
        'م' => dual(0xFEE1), // meem
        'ن' => dual(0xFEE5), // noon
        'ه' => dual(0xFEE9), // heh
        'و' => tail(0xFEED), // waw
        'ى' => tail(0xFEEF), // alef maksura
        'ي' => dual(0xFEF1), // yeh
        _ => return None,
    };
    Some(letter)
}

/// Isolated and final ligature forms for lam followed by an alef variant
fn lam_alef_ligature(alef: char) -> Option<(u32, u32)> {
    match alef {
        'آ' => Some((0xFEF5, 0xFEF6)),
        'أ' => Some((0xFEF7, 0xFEF8)),
        'إ' => Some((0xFEF9, 0xFEFA)),
        'ا' => Some((0xFEFB, 0xFEFC)),
        _ => None,
    }
}

/// Harakat and other combining marks the target fonts position poorly
fn is_arabic_mark(c: char) -> bool {
    matches!(c as u32, 0x0610..=0x061A | 0x064B..=0x065F | 0x0670)
}

/// Shape logical-order Arabic text into visual-order presentation forms
///
/// Combining marks are stripped, lam-alef collapses into its ligature, and
/// every other letter picks its contextual form from its neighbors. Characters
/// outside the Arabic block pass through unchanged.
///
/// ```
/// use bilingual::shape_arabic;
/// assert_eq!(shape_arabic("لا"), "\u{FEFB}");
/// ```
pub fn shape_arabic(text: &str) -> String {
    let letters: Vec<char> = text.chars().filter(|c| !is_arabic_mark(*c)).collect();
    let mut shaped: Vec<char> = Vec::with_capacity(letters.len());
    let mut prev_joins_forward = false;
    let mut i = 0;
    while i < letters.len() {
        let c = letters[i];
        let Some(letter) = letter_forms(c) else {
            shaped.push(c);
            prev_joins_forward = false;
            i += 1;
            continue;
        };
        if c == 'ل' && i + 1 < letters.len() {
            if let Some((isolated, final_)) = lam_alef_ligature(letters[i + 1]) {
                let connected = prev_joins_forward && letter.joins_backward;
                let code = if connected { final_ } else { isolated };
                shaped.push(char::from_u32(code).unwrap_or(c));
                // the ligature ends in alef, which never joins forward
                prev_joins_forward = false;
                i += 2;
                continue;
            }
        }
        let connects_left = prev_joins_forward && letter.joins_backward;
        let connects_right = letter.joins_forward
            && letters
                .get(i + 1)
                .and_then(|next| letter_forms(*next))
                .is_some_and(|next| next.joins_backward);
        let code = match (connects_left, connects_right) {
            (false, false) => letter.isolated,
            (false, true) => letter.initial,
            (true, false) => letter.final_,
            (true, true) => letter.medial,
        };
        shaped.push(char::from_u32(code).unwrap_or(c));
        prev_joins_forward = letter.joins_forward;
        i += 1;
    }
    shaped.into_iter().rev().collect()
}
