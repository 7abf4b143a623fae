/*! Token classification.

Tags tokens with a coarse part of speech.

Punctuation and symbols are detected using the Unicode general category of the token characters,
while nouns and verbs are guessed from Polish inflectional suffixes.
The suffix tables favour precision on the frequent parliamentary vocabulary
(`-acja`, `-ość`, `-anie`, infinitives and past tense forms) rather than coverage.
!*/
use unic_ucd::GeneralCategory;

/// Coarse part of speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Noun,
    Verb,
    Propn,
    Num,
    Punct,
    Sym,
    Other,
}

const VERB_SUFFIXES: &[&str] = &[
    // infinitives
    "ować", "ywać", "iwać", "ać", "eć", "ić", "yć", "ąć", "uć", "ść", "źć",
    // past tense
    "liśmy", "łyśmy", "liście", "łyście", "łem", "łam", "łeś", "łaś", "ali", "eli", "ili",
    "yli", "ały", "iały", "ieli", "ał", "ała", "ało", "ił", "iła", "iło", "ył", "yła", "yło",
    "ęła", "ął",
    // present tense
    "ujemy", "ujecie", "ujesz", "ują", "uje", "ają", "eją", "amy", "emy", "imy", "ymy",
    "acie", "ecie", "jesz", "isz", "ysz", "esz",
];

const NOUN_SUFFIXES: &[&str] = &[
    "acja", "acji", "acje", "acją", "ość", "ości", "ością", "anie", "enie", "ania", "enia",
    "aniu", "eniu", "aniem", "eniem", "stwo", "stwa", "stwie", "stwem", "sja", "sji", "zja",
    "zji", "cja", "cji", "izm", "izmu", "ista", "isty", "nik", "nika", "niku", "ników",
    "nicy", "arz", "arza", "tor", "tora", "torzy", "ment", "mentu", "ura", "ury", "ów",
    "ami", "ach", "ka", "ki", "ek",
];

/// Minimal number of characters left once the suffix is removed.
const MIN_STEM: usize = 2;

/// Tag a (non-whitespace) token.
pub fn tag(token: &str) -> Tag {
    if token.chars().all(is_punctuation) {
        return Tag::Punct;
    }

    if token.chars().all(is_symbol) {
        return Tag::Sym;
    }

    if token.chars().any(|c| c.is_numeric())
        && token
            .chars()
            .all(|c| c.is_numeric() || c == '.' || c == ',')
    {
        return Tag::Num;
    }

    if !token.chars().any(char::is_alphabetic) {
        return Tag::Other;
    }

    // the longest matching suffix wins, verbs win ties
    let lowered = token.to_lowercase();
    match (
        longest_suffix(&lowered, VERB_SUFFIXES),
        longest_suffix(&lowered, NOUN_SUFFIXES),
    ) {
        (Some(verb), Some(noun)) if noun > verb => return Tag::Noun,
        (Some(_), _) => return Tag::Verb,
        (None, Some(_)) => return Tag::Noun,
        (None, None) => (),
    }

    if token.chars().next().map_or(false, char::is_uppercase) {
        Tag::Propn
    } else {
        Tag::Other
    }
}

/// Length (in chars) of the longest suffix of `word` found in `suffixes`.
fn longest_suffix(word: &str, suffixes: &[&str]) -> Option<usize> {
    let len = word.chars().count();
    suffixes
        .iter()
        .filter(|suffix| word.ends_with(*suffix))
        .map(|suffix| suffix.chars().count())
        .filter(|suffix_len| len >= suffix_len + MIN_STEM)
        .max()
}

#[inline]
fn is_punctuation(c: char) -> bool {
    GeneralCategory::of(c).is_punctuation()
}

#[inline]
fn is_symbol(c: char) -> bool {
    GeneralCategory::of(c).is_symbol()
}
