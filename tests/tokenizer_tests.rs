use tweet_token_counts::{Error, Language, Post, PostTokenizer, DEFAULT_TOKEN_PATTERN};

#[cfg(test)]
mod post_tokenizer_tests {
    use super::*;

    fn english_tokenizer() -> PostTokenizer {
        PostTokenizer::new(DEFAULT_TOKEN_PATTERN, Language::En).unwrap()
    }

    #[test]
    fn test_lowercases_tokens() {
        let tokens = english_tokenizer().tokenize("Protests CONTINUE Downtown");
        assert_eq!(tokens, vec!["protests", "continue", "downtown"]);
    }

    #[test]
    fn test_default_pattern_requires_three_letters() {
        let tokens = english_tokenizer().tokenize("we go to the city");
        assert_eq!(tokens, vec!["the", "city"]);
    }

    #[test]
    fn test_default_pattern_keeps_internal_punctuation() {
        let tokens = english_tokenizer().tokenize("A well-known place, don't worry!");
        assert_eq!(tokens, vec!["well-known", "place", "don't", "worry"]);
    }

    #[test]
    fn test_strips_urls_handles_and_retweet_marker() {
        let text = "RT @reporter: Protests in the city! https://t.co/abc123 #justice &amp; peace";
        let tokens = english_tokenizer().tokenize(text);
        assert_eq!(tokens, vec!["protests", "the", "city", "justice", "peace"]);
    }

    #[test]
    fn test_tokenize_empty_string() {
        let tokens = english_tokenizer().tokenize("");
        assert_eq!(tokens, Vec::<String>::new());
    }

    #[test]
    fn test_custom_token_pattern() {
        let tokenizer = PostTokenizer::new(r"\w+", Language::En).unwrap();
        let tokens = tokenizer.tokenize("we go to the city");
        assert_eq!(tokens, vec!["we", "go", "to", "the", "city"]);
    }

    #[test]
    fn test_invalid_token_pattern() {
        let result = PostTokenizer::new("[unclosed", Language::En);
        assert!(matches!(result, Err(Error::InvalidTokenPattern(_))));
    }

    #[test]
    fn test_arabic_normalization() {
        let tokenizer = PostTokenizer::new(DEFAULT_TOKEN_PATTERN, Language::Ar).unwrap();
        let tokens = tokenizer.tokenize("مُظَاهَرَات في المدينة");
        assert_eq!(tokens, vec!["مظاهرات", "المدينة"]);
    }

    #[test]
    fn test_tokenize_post_joins_tokens_with_spaces() {
        let post: Post = serde_json::from_str(
            r#"{"text": "RT @someone: Curfew tonight…", "retweeted_status": {"text": "Curfew announced tonight"}}"#,
        )
        .unwrap();

        let document = english_tokenizer().tokenize_post(&post);
        assert_eq!(document, "curfew announced tonight");
    }
}
