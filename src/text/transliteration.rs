/*!
 * Romanized input to native script.
 *
 * Users type Sinhala and Tamil with Latin letters. The native-script
 * rendering is shown alongside the translation and stored in the history
 * record; it plays no part in sign lookup.
 *
 * Both mappings are simplified phonetic tables, not full orthographic
 * converters.
 */

use crate::language_utils::LanguageMode;

const SINHALA_HAL: char = '\u{0DCA}';
const TAMIL_PULLI: char = '\u{0BCD}';

/// Ordered substitutions, longest patterns first
const SINHALA_RULES: &[(&str, &str)] = &[
    // Independent vowels
    ("aee", "ඈ"),
    ("aa", "ආ"),
    ("ae", "ඇ"),
    ("ii", "ඊ"),
    ("ee", "ඊ"),
    ("oo", "ඌ"),
    ("au", "ඖ"),
    // Aspirated and clustered consonants carrying an inherent vowel
    ("kha", "ඛ"),
    ("gha", "ඝ"),
    ("nga", "ඞ"),
    ("cha", "ඡ"),
    ("jha", "ඣ"),
    ("nya", "ඤ"),
    ("tta", "ට්ට"),
    ("dda", "ඩ්ඩ"),
    ("nna", "ණ"),
    ("tha", "ථ"),
    ("dha", "ධ"),
    ("pha", "ඵ"),
    ("bha", "භ"),
    ("sha", "ශ"),
    // Digraphs without a vowel
    ("th", "ත්"),
    ("ch", "ච්"),
    ("sh", "ෂ්"),
    // Single vowels
    ("a", "අ"),
    ("i", "ඉ"),
    ("u", "උ"),
    ("e", "එ"),
    ("o", "ඔ"),
    // Single consonants
    ("k", "ක්"),
    ("g", "ග්"),
    ("c", "ච්"),
    ("j", "ජ්"),
    ("t", "ට්"),
    ("d", "ද්"),
    ("n", "න්"),
    ("p", "ප්"),
    ("b", "බ්"),
    ("m", "ම්"),
    ("y", "ය්"),
    ("r", "ර්"),
    ("l", "ල්"),
    ("v", "ව්"),
    ("w", "ව්"),
    ("s", "ස්"),
    ("h", "හ්"),
];

/// Independent vowel following a hal kirima becomes a dependent vowel sign
const SINHALA_VOWEL_SIGNS: &[(char, &str)] = &[
    ('අ', ""),
    ('ආ', "ා"),
    ('ඇ', "ැ"),
    ('ඈ', "ෑ"),
    ('ඉ', "ි"),
    ('ඊ', "ී"),
    ('උ', "ු"),
    ('ඌ', "ූ"),
    ('එ', "ෙ"),
    ('ඒ', "ේ"),
    ('ඔ', "ො"),
    ('ඕ', "ෝ"),
];

/// Tamil vowels, longest first: (latin, independent form, dependent sign)
const TAMIL_VOWELS: &[(&str, &str, &str)] = &[
    ("ee", "ஈ", "ீ"),
    ("aa", "ஆ", "ா"),
    ("ae", "ஏ", "ே"),
    ("ai", "ஐ", "ை"),
    ("oa", "ஓ", "ோ"),
    ("au", "ஔ", "ௌ"),
    ("oo", "ஊ", "ூ"),
    ("a", "அ", ""),
    ("i", "இ", "ி"),
    ("u", "உ", "ு"),
    ("e", "எ", "ெ"),
    ("o", "ஒ", "ொ"),
];

/// Tamil consonants without pulli, longest first.
/// Upper-case keys are matched case-sensitively (retroflex series).
const TAMIL_CONSONANTS: &[(&str, char)] = &[
    ("ng", 'ங'),
    ("ny", 'ஞ'),
    ("th", 'த'),
    ("dh", 'த'),
    ("nh", 'ன'),
    ("sh", 'ஷ'),
    ("L", 'ள'),
    ("R", 'ற'),
    ("N", 'ண'),
    ("S", 'ஸ'),
    ("k", 'க'),
    ("g", 'க'),
    ("c", 'ச'),
    ("s", 'ச'),
    ("j", 'ஜ'),
    ("t", 'ட'),
    ("d", 'ட'),
    ("n", 'ந'),
    ("p", 'ப'),
    ("b", 'ப'),
    ("m", 'ம'),
    ("y", 'ய'),
    ("r", 'ர'),
    ("l", 'ல'),
    ("v", 'வ'),
    ("z", 'ழ'),
    ("h", 'ஹ'),
];

const TAMIL_DIGITS: [char; 10] = ['௦', '௧', '௨', '௩', '௪', '௫', '௬', '௭', '௮', '௯'];

/// Render romanized text in the native script of the given mode.
/// English input has no native script and yields `None`.
pub fn to_native_script(text: &str, mode: LanguageMode) -> Option<String> {
    match mode {
        LanguageMode::Sinhala => Some(to_sinhala_script(text)),
        LanguageMode::Tamil => Some(to_tamil_script(text)),
        LanguageMode::English => None,
    }
}

/// Transliterate romanized Sinhala to Sinhala script
pub fn to_sinhala_script(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut raw = String::with_capacity(lowered.len() * 3);
    let mut i = 0;

    'outer: while i < chars.len() {
        for (pattern, replacement) in SINHALA_RULES {
            if matches_at(&chars, i, pattern) {
                raw.push_str(replacement);
                i += pattern.chars().count();
                continue 'outer;
            }
        }
        raw.push(chars[i]);
        i += 1;
    }

    // Fold "consonant + hal + independent vowel" into consonant + vowel sign
    let mut result = String::with_capacity(raw.len());
    let mut iter = raw.chars().peekable();
    while let Some(c) = iter.next() {
        if c == SINHALA_HAL {
            if let Some(next) = iter.peek().copied() {
                if let Some((_, sign)) = SINHALA_VOWEL_SIGNS.iter().find(|(vowel, _)| *vowel == next) {
                    result.push_str(sign);
                    iter.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// Transliterate romanized Tamil to Tamil script
pub fn to_tamil_script(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() * 3);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(digit) = c.to_digit(10) {
            result.push(TAMIL_DIGITS[digit as usize]);
            i += 1;
            continue;
        }

        if let Some((latin, independent, _)) = find_tamil_vowel(&chars, i) {
            result.push_str(independent);
            i += latin.len();
            continue;
        }

        if let Some((latin, base)) = find_tamil_consonant(&chars, i) {
            i += latin.len();
            result.push(base);
            match find_tamil_vowel(&chars, i) {
                Some((vowel, _, sign)) => {
                    result.push_str(sign);
                    i += vowel.len();
                }
                None => result.push(TAMIL_PULLI),
            }
            continue;
        }

        result.push(c);
        i += 1;
    }

    result
}

fn matches_at(chars: &[char], start: usize, pattern: &str) -> bool {
    let mut offset = start;
    for p in pattern.chars() {
        match chars.get(offset) {
            Some(c) if *c == p => offset += 1,
            _ => return false,
        }
    }
    true
}

fn matches_at_ignore_case(chars: &[char], start: usize, pattern: &str) -> bool {
    let mut offset = start;
    for p in pattern.chars() {
        match chars.get(offset) {
            Some(c) if c.to_ascii_lowercase() == p => offset += 1,
            _ => return false,
        }
    }
    true
}

fn find_tamil_vowel(chars: &[char], start: usize) -> Option<(&'static str, &'static str, &'static str)> {
    TAMIL_VOWELS
        .iter()
        .find(|(latin, _, _)| matches_at_ignore_case(chars, start, latin))
        .copied()
}

fn find_tamil_consonant(chars: &[char], start: usize) -> Option<(&'static str, char)> {
    TAMIL_CONSONANTS
        .iter()
        .find(|(latin, _)| {
            if latin.chars().any(|c| c.is_ascii_uppercase()) {
                matches_at(chars, start, latin)
            } else {
                matches_at_ignore_case(chars, start, latin)
            }
        })
        .copied()
}
