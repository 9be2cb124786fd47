// src/extract/clean.rs
// =============================================================================
// Turns a raw text passage into a "clean sentence" for training data.
//
// Cleaning means:
// 1. Lower-case the passage
// 2. Split it into word tokens
// 3. Drop tokens that aren't purely alphabetic (numbers, "abc123", ...)
// 4. Drop stop words (English + French)
// 5. Join what's left with single spaces
//
// The cleaner is a pure function of its input - no I/O.
// =============================================================================

use std::collections::HashSet;

const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const FRENCH_STOPWORDS: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux", "il",
    "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me", "même", "mes", "moi",
    "mon", "ne", "nos", "notre", "nous", "on", "ou", "par", "pas", "pour", "qu", "que", "qui",
    "sa", "se", "ses", "son", "sur", "ta", "te", "tes", "toi", "ton", "tu", "un", "une", "vos",
    "votre", "vous", "c", "d", "j", "l", "à", "m", "n", "s", "t", "y", "été", "étée", "étées",
    "étés", "étant", "étante", "étants", "étantes", "suis", "es", "est", "sommes", "êtes",
    "sont", "serai", "seras", "sera", "serons", "serez", "seront", "serais", "serait",
    "serions", "seriez", "seraient", "étais", "était", "étions", "étiez", "étaient", "fus",
    "fut", "fûmes", "fûtes", "furent", "sois", "soit", "soyons", "soyez", "soient", "fusse",
    "fusses", "fût", "fussions", "fussiez", "fussent", "ayant", "ayante", "ayantes", "ayants",
    "eu", "eue", "eues", "eus", "ai", "as", "avons", "avez", "ont", "aurai", "auras", "aura",
    "aurons", "aurez", "auront", "aurais", "aurait", "aurions", "auriez", "auraient", "avais",
    "avait", "avions", "aviez", "avaient", "eut", "eûmes", "eûtes", "eurent", "aie", "aies",
    "ait", "ayons", "ayez", "aient", "eusse", "eusses", "eût", "eussions", "eussiez",
    "eussent",
];

// Common French words that aren't in the base list above
const ADDITIONAL_FRENCH_STOPWORDS: &[&str] = &[
    "a", "les", "plus", "comme", "ils", "tout", "si", "tous", "cela", "celle", "celui",
];

// Token filter applied to every passage before it becomes a row
#[derive(Debug, Clone)]
pub struct SentenceCleaner {
    stopwords: HashSet<String>,
}

impl Default for SentenceCleaner {
    fn default() -> Self {
        let stopwords = ENGLISH_STOPWORDS
            .iter()
            .chain(FRENCH_STOPWORDS)
            .chain(ADDITIONAL_FRENCH_STOPWORDS)
            .map(|word| word.to_string())
            .collect();

        Self { stopwords }
    }
}

impl SentenceCleaner {
    // Adds more stop words on top of the built-in lists
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    // Splits a passage into lower-cased, alphabetic, non-stop-word tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .filter(|token| token.chars().all(char::is_alphabetic))
            .filter(|token| !self.is_stopword(token))
            .map(str::to_string)
            .collect()
    }

    // Tokenizes a passage and joins the surviving tokens back together
    //
    // Example:
    //   "The 3 cats are sleeping on the sofa!" -> "cats sleeping sofa"
    pub fn clean(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }
}
