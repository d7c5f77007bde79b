
use std::fs;
use std::path::PathBuf;
use test_utils::{protest_posts, read_to_string, write_gzipped_posts, write_word_list};
use tweet_token_counts::{
    aggregate_token_counts, count_tokens_in_files, CountVectorizer, Error, FrequencyTable,
    OutputConfig, OutputFormat, TokenCountConfig, VECTORIZER_FILE_NAME,
};

#[cfg(test)]
mod token_count_pipeline_tests {
    use super::*;

    fn config(min_count: usize) -> TokenCountConfig {
        TokenCountConfig {
            min_count,
            ..TokenCountConfig::default()
        }
    }

    fn output(output_dir: PathBuf, output_format: OutputFormat) -> OutputConfig {
        OutputConfig {
            output_format,
            ..OutputConfig::new(output_dir)
        }
    }

    #[test]
    fn test_writes_tsv_and_vectorizer() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let input_file = write_gzipped_posts(input_dir.path(), "posts.json.gz", &protest_posts());

        let summary = count_tokens_in_files(
            &[&input_file],
            config(2),
            output(output_dir.path().to_path_buf(), OutputFormat::Tsv),
        )
        .unwrap();

        assert_eq!(summary.written, 1);
        assert_eq!(summary.empty, 0);
        assert!(summary.vectorizer_saved);
        assert_eq!(
            read_to_string(&output_dir.path().join("posts.json.gz.tsv")),
            "#filename\tdowntown\tprotest\ttonight\nposts.json.gz\t2\t2\t2\n"
        );

        let vectorizer = CountVectorizer::load(output_dir.path().join(VECTORIZER_FILE_NAME)).unwrap();
        assert_eq!(
            vectorizer.feature_names().unwrap(),
            vec!["downtown", "protest", "tonight"]
        );
    }

    #[test]
    fn test_no_overwrite_skips_existing_output() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let input_file = write_gzipped_posts(input_dir.path(), "posts.json.gz", &protest_posts());
        let existing_output = output_dir.path().join("posts.json.gz.raw");
        fs::write(&existing_output, "existing\t1\n").unwrap();
        let modified = fs::metadata(&existing_output).unwrap().modified().unwrap();

        let output = OutputConfig {
            no_overwrite: true,
            ..output(output_dir.path().to_path_buf(), OutputFormat::Raw)
        };
        let summary = count_tokens_in_files(&[&input_file], config(1), output).unwrap();

        assert_eq!(summary.skipped_existing, 1);
        assert_eq!(summary.written, 0);
        assert!(!summary.vectorizer_saved);
        assert_eq!(read_to_string(&existing_output), "existing\t1\n");
        assert_eq!(
            fs::metadata(&existing_output).unwrap().modified().unwrap(),
            modified
        );
    }

    #[test]
    fn test_file_without_features_still_gets_an_output() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let input_file = write_gzipped_posts(input_dir.path(), "posts.json.gz", &protest_posts());

        let summary = count_tokens_in_files(
            &[&input_file],
            config(10),
            output(output_dir.path().to_path_buf(), OutputFormat::Tsv),
        )
        .unwrap();

        assert_eq!(summary.written, 1);
        assert_eq!(summary.empty, 1);
        assert!(!summary.vectorizer_saved);
        assert_eq!(
            read_to_string(&output_dir.path().join("posts.json.gz.tsv")),
            "#filename\nposts.json.gz\n"
        );
    }

    #[test]
    fn test_raw_outputs_aggregate_into_global_counts() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let first = write_gzipped_posts(input_dir.path(), "first.json.gz", &protest_posts());
        let second = write_gzipped_posts(
            input_dir.path(),
            "second.json.gz",
            &[serde_json::json!({"text": "Protest continues tonight"})],
        );

        let output = OutputConfig {
            threads: 2,
            ..output(output_dir.path().to_path_buf(), OutputFormat::Raw)
        };
        let summary = count_tokens_in_files(&[&first, &second], config(1), output).unwrap();
        assert_eq!(summary.written, 2);

        let report = aggregate_token_counts(output_dir.path()).unwrap();

        let expected: FrequencyTable = [
            ("continues", 1),
            ("downtown", 2),
            ("lovely", 1),
            ("march", 1),
            ("protest", 3),
            ("tonight", 3),
            ("weather", 1),
        ]
        .iter()
        .map(|(token, count)| (token.to_string(), *count))
        .collect();
        assert_eq!(report.token_counts, expected);
        assert_eq!(&report.top_tokens[..3], &["protest", "tonight", "downtown"]);
    }

    #[test]
    fn test_inputs_sharing_a_file_name_write_in_input_order() {
        let input_dir = tempfile::tempdir().unwrap();
        let first_dir = input_dir.path().join("a");
        let second_dir = input_dir.path().join("b");
        fs::create_dir_all(&first_dir).unwrap();
        fs::create_dir_all(&second_dir).unwrap();
        let first = write_gzipped_posts(&first_dir, "posts.json.gz", &protest_posts());
        let second = write_gzipped_posts(
            &second_dir,
            "posts.json.gz",
            &[serde_json::json!({"text": "Protest continues tonight"})],
        );

        for _ in 0..20 {
            let output_dir = tempfile::tempdir().unwrap();
            let output = OutputConfig {
                threads: 2,
                ..output(output_dir.path().to_path_buf(), OutputFormat::Raw)
            };

            let summary = count_tokens_in_files(&[&first, &second], config(1), output).unwrap();

            assert_eq!(summary.written, 2);
            assert!(summary.vectorizer_saved);
            assert_eq!(
                read_to_string(&output_dir.path().join("posts.json.gz.raw")),
                "continues\t1\nprotest\t1\ntonight\t1\n"
            );
            let vectorizer =
                CountVectorizer::load(output_dir.path().join(VECTORIZER_FILE_NAME)).unwrap();
            assert_eq!(vectorizer.feature_names().unwrap().len(), 6);
        }
    }

    #[test]
    fn test_valid_vocab_file() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let input_file = write_gzipped_posts(input_dir.path(), "posts.json.gz", &protest_posts());
        let vocab_file = write_word_list(input_dir.path(), "vocab.txt", &["protest", "", "curfew"]);

        let config = TokenCountConfig {
            valid_vocab_file: Some(vocab_file),
            ..config(10)
        };
        count_tokens_in_files(
            &[&input_file],
            config,
            output(output_dir.path().to_path_buf(), OutputFormat::Raw),
        )
        .unwrap();

        assert_eq!(
            read_to_string(&output_dir.path().join("posts.json.gz.raw")),
            "curfew\t0\nprotest\t2\n"
        );
    }

    #[test]
    fn test_invalid_token_pattern_fails_before_counting() {
        let output_dir = tempfile::tempdir().unwrap();
        let config = TokenCountConfig {
            token_pattern: Some("(".to_string()),
            ..config(1)
        };
        let input_files: Vec<PathBuf> = Vec::new();

        let result = count_tokens_in_files(
            &input_files,
            config,
            output(output_dir.path().to_path_buf(), OutputFormat::Raw),
        );
        assert!(matches!(result, Err(Error::InvalidTokenPattern(_))));
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let output_dir = tempfile::tempdir().unwrap();
        let missing = output_dir.path().join("missing.json.gz");

        let result = count_tokens_in_files(
            &[&missing],
            config(1),
            output(output_dir.path().to_path_buf(), OutputFormat::Raw),
        );
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
