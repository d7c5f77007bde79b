
use test_utils::read_to_string;
use tweet_token_counts::models::{write_raw_counts, write_token_counts, write_tsv};
use tweet_token_counts::{OutputFormat, TokenCounts};

#[cfg(test)]
mod count_writer_tests {
    use super::*;

    fn token_counts() -> TokenCounts {
        TokenCounts::new(vec!["curfew".to_string(), "riot police".to_string()], vec![1, 2])
    }

    #[test]
    fn test_write_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("posts.json.gz.tsv");

        write_tsv(&output_file, "posts.json.gz", &token_counts()).unwrap();

        assert_eq!(
            read_to_string(&output_file),
            "#filename\tcurfew\triot police\nposts.json.gz\t1\t2\n"
        );
    }

    #[test]
    fn test_write_raw_counts() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("posts.json.gz.raw");

        write_raw_counts(&output_file, &token_counts()).unwrap();

        assert_eq!(read_to_string(&output_file), "curfew\t1\nriot police\t2\n");
    }

    #[test]
    fn test_scaled_counts_are_written_as_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("posts.json.gz.raw");
        let scaled = token_counts().scale_by_posts(4).unwrap();

        write_token_counts(&output_file, "posts.json.gz", OutputFormat::Raw, &scaled).unwrap();

        assert_eq!(read_to_string(&output_file), "curfew\t0.25\nriot police\t0.5\n");
    }

    #[test]
    fn test_empty_counts() {
        let dir = tempfile::tempdir().unwrap();
        let tsv_file = dir.path().join("posts.json.gz.tsv");
        let raw_file = dir.path().join("posts.json.gz.raw");

        write_token_counts(&tsv_file, "posts.json.gz", OutputFormat::Tsv, &TokenCounts::empty())
            .unwrap();
        write_token_counts(&raw_file, "posts.json.gz", OutputFormat::Raw, &TokenCounts::empty())
            .unwrap();

        assert_eq!(read_to_string(&tsv_file), "#filename\nposts.json.gz\n");
        assert_eq!(read_to_string(&raw_file), "");
    }

    #[test]
    fn test_overwrites_and_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("posts.json.gz.raw");
        std::fs::write(&output_file, "stale\t100\n").unwrap();

        write_raw_counts(&output_file, &token_counts()).unwrap();

        assert_eq!(read_to_string(&output_file), "curfew\t1\nriot police\t2\n");
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("posts.json.gz.raw")]);
    }

    #[test]
    fn test_concurrent_writes_to_one_path_stay_whole() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("posts.json.gz.raw");
        let first = TokenCounts::new(vec!["curfew".to_string()], vec![1]);
        let second = TokenCounts::new(vec!["protest".to_string()], vec![2]);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        write_raw_counts(&output_file, &first).unwrap();
                        write_raw_counts(&output_file, &second).unwrap();
                    }
                });
            }
        });

        let contents = read_to_string(&output_file);
        assert!(contents == "curfew\t1\n" || contents == "protest\t2\n");
    }
}
