//! 评价文本的词袋情感分类与关键词提取
//!
//! 刻意保持简单：正负词表各计 ±1，总分决定极性；
//! 不做词干化，也不处理否定词。

use serde::Serialize;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "delicious", "tasty", "fresh", "friendly",
    "fast", "love", "loved", "nice", "perfect", "awesome", "best", "wonderful",
    "helpful", "clean", "recommend", "happy",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "slow", "cold", "awful", "terrible", "rude", "dirty", "stale", "worst",
    "hate", "hated", "poor", "disappointing", "disappointed", "expensive", "wrong",
    "late", "horrible", "bland", "unhelpful",
];

const STOPWORDS: &[&str] = &[
    "the", "and", "was", "were", "with", "that", "this", "have", "has", "had", "for",
    "are", "but", "not", "you", "your", "they", "them", "their", "its", "our", "out",
    "very", "just", "from", "there", "here", "what", "when", "will", "would", "been",
    "being", "also", "too", "can", "could", "should", "did", "does", "about", "after",
    "before", "over", "under", "more", "most", "some", "such", "only", "than", "then",
    "these", "those", "into", "onto",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Keyword {
    pub word: String,
    pub count: u32,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// 情感得分：正面词 +1，负面词 -1
pub fn score(text: &str) -> i32 {
    tokenize(text)
        .iter()
        .map(|token| {
            if POSITIVE_WORDS.contains(&token.as_str()) {
                1
            } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                -1
            } else {
                0
            }
        })
        .sum()
}

/// 文本极性，得分为零 (含平局) 时为中性
pub fn classify(text: &str) -> Sentiment {
    match score(text) {
        s if s > 0 => Sentiment::Positive,
        s if s < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

/// 提取出现频率最高的 K 个关键词
///
/// 长度小于 3 的 token 和停用词被排除；
/// 频率相同时按首次出现的先后排序。
pub fn top_keywords<'a>(texts: impl IntoIterator<Item = &'a str>, k: usize) -> Vec<Keyword> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, u32> = std::collections::HashMap::new();

    for text in texts {
        for token in tokenize(text) {
            if token.len() < 3 || STOPWORDS.contains(&token.as_str()) {
                continue;
            }
            match counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.clone(), 1);
                    order.push(token);
                }
            }
        }
    }

    let mut ranked: Vec<(usize, String, u32)> = order
        .into_iter()
        .enumerate()
        .map(|(first_seen, word)| {
            let count = counts[&word];
            (first_seen, word, count)
        })
        .collect();
    // 频率降序，平局保持首次出现顺序
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(k)
        .map(|(_, word, count)| Keyword { word, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        assert_eq!(classify("The food was great and the staff friendly"), Sentiment::Positive);
    }

    #[test]
    fn test_negative_text() {
        assert_eq!(classify("Slow service and cold food"), Sentiment::Negative);
    }

    #[test]
    fn test_no_lexicon_words_is_neutral() {
        assert_eq!(classify("The order arrived on a rainy afternoon"), Sentiment::Neutral);
    }

    #[test]
    fn test_tie_is_neutral() {
        // good (+1) 和 bad (-1) 抵消
        assert_eq!(classify("good portions but bad location"), Sentiment::Neutral);
        assert_eq!(score("good portions but bad location"), 0);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(classify(""), Sentiment::Neutral);
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        assert_eq!(classify("GREAT!!! Absolutely great."), Sentiment::Positive);
        assert_eq!(score("GREAT!!! Absolutely great."), 2);
    }

    #[test]
    fn test_keywords_exclude_short_and_stopwords() {
        let keywords = top_keywords(vec!["the pizza is ok", "pizza was the best pizza"], 5);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        // "the"/"was" 是停用词，"is"/"ok" 太短
        assert!(words.contains(&"pizza"));
        assert!(!words.contains(&"the"));
        assert!(!words.contains(&"ok"));
        assert_eq!(keywords[0], Keyword { word: "pizza".into(), count: 3 });
    }

    #[test]
    fn test_keywords_tie_breaks_by_first_seen() {
        let keywords = top_keywords(vec!["alpha beta", "beta alpha gamma"], 3);
        assert_eq!(keywords[0].word, "alpha");
        assert_eq!(keywords[1].word, "beta");
        assert_eq!(keywords[0].count, 2);
        assert_eq!(keywords[1].count, 2);
        assert_eq!(keywords[2], Keyword { word: "gamma".into(), count: 1 });
    }

    #[test]
    fn test_keywords_limited_to_k() {
        let keywords = top_keywords(vec!["uno dos tres cuatro cinco seis"], 3);
        assert_eq!(keywords.len(), 3);
    }
}
