//! Valence-lexicon polarity analyzer.
//!
//! Each known word carries a valence in roughly `[-4, 4]`. Word valences are
//! adjusted by nearby intensity modifiers ("very", "barely"), flipped and
//! damped by negations within three tokens, reweighted around a contrastive
//! "but", and pushed further by shouting (ALL CAPS) and `!`/`?` runs. The sum
//! is normalized into `[-1, 1]` with `x / sqrt(x^2 + ALPHA)`.
//!
//! Word valences are compiled in from `valence.tsv`.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::traits::PolarityAnalyzer;

/// Normalization constant approximating the max expected sum.
const ALPHA: f64 = 15.0;
/// Increment applied by a booster word.
const BOOST_INCR: f64 = 0.293;
/// Extra weight for an ALL CAPS sentiment word in mixed-case text.
const CAPS_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const NEGATION_SCALAR: f64 = -0.74;
/// Per-`!` emphasis, up to four marks.
const EXCLAMATION_INCR: f64 = 0.292;
/// Per-`?` emphasis, up to three marks (only when more than one).
const QUESTION_INCR: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;

static VALENCE_TABLE: &str = include_str!("valence.tsv");

lazy_static! {
    static ref LEXICON: HashMap<&'static str, f64> = parse_valences(VALENCE_TABLE);

    static ref BOOSTERS: HashMap<&'static str, f64> = {
        let up = [
            "absolutely", "amazingly", "completely", "considerably", "deeply", "especially",
            "exceptionally", "extremely", "fully", "greatly", "highly", "hugely",
            "incredibly", "insanely", "really", "remarkably", "so", "super", "thoroughly",
            "totally", "tremendously", "truly", "unbelievably", "utterly", "very",
        ];
        let down = [
            "almost", "barely", "hardly", "kinda", "less", "little", "marginally",
            "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
        ];
        up.into_iter()
            .map(|w| (w, BOOST_INCR))
            .chain(down.into_iter().map(|w| (w, -BOOST_INCR)))
            .collect()
    };

    static ref NEGATIONS: Vec<&'static str> = vec![
        "aint", "cannot", "cant", "didnt", "doesnt", "dont", "isnt", "neither", "never",
        "no", "nobody", "none", "nor", "not", "nothing", "nowhere", "wasnt", "without",
        "wont", "wouldnt",
    ];
}

/// Reads `word<TAB>valence` lines. Comments, blanks and lines whose valence
/// does not parse are skipped.
fn parse_valences(table: &str) -> HashMap<&str, f64> {
    table
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (word, valence) = line.split_once('\t')?;
            Some((word.trim(), valence.trim().parse().ok()?))
        })
        .collect()
}

/// Lexicon-backed [`PolarityAnalyzer`]. Stateless and cheap to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl Token<'_> {
    fn is_shouting(&self) -> bool {
        self.raw.chars().any(char::is_alphabetic)
            && self.raw.chars().count() > 1
            && self.raw.chars().all(|c| !c.is_lowercase())
    }

    fn is_negation(&self) -> bool {
        let bare = self.lower.replace('\'', "");
        NEGATIONS.contains(&bare.as_str()) || self.lower.ends_with("n't")
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * EXCLAMATION_INCR;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n => (n as f64 * QUESTION_INCR).min(QUESTION_MAX),
    };
    exclamations + questions
}

fn valence_at(tokens: &[Token<'_>], i: usize, caps_differential: bool) -> f64 {
    let token = &tokens[i];
    if BOOSTERS.contains_key(token.lower.as_str()) {
        return 0.0;
    }
    let Some(&base) = LEXICON.get(token.lower.as_str()) else {
        return 0.0;
    };

    let direction = base.signum();
    let mut valence = base;
    if caps_differential && token.is_shouting() {
        valence += CAPS_INCR * direction;
    }

    let mut negated = false;
    for (distance, damping) in [(1usize, 1.0), (2, 0.95), (3, 0.9)] {
        let Some(j) = i.checked_sub(distance) else {
            break;
        };
        let prev = &tokens[j];
        if let Some(&boost) = BOOSTERS.get(prev.lower.as_str()) {
            let mut scalar = boost * direction;
            if caps_differential && prev.is_shouting() {
                scalar += CAPS_INCR * direction;
            }
            valence += scalar * damping;
        }
        negated |= prev.is_negation();
    }
    if negated {
        valence *= NEGATION_SCALAR;
    }
    valence
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let shouting = tokens.iter().filter(|t| t.is_shouting()).count();
        let caps_differential = shouting > 0 && shouting < tokens.len();

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|i| valence_at(&tokens, i, caps_differential))
            .collect();

        // Clauses after a contrastive "but" dominate the ones before it.
        if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        let emphasis = punctuation_emphasis(text);
        sum += emphasis * sum.signum();

        (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}
