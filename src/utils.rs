pub mod merge_frequency_tables;
pub mod read_word_list;
pub mod sort_results;
pub mod write_atomically;

pub use merge_frequency_tables::merge_frequency_tables;
pub use read_word_list::{read_vocabulary, read_word_list};
pub use sort_results::{sort_frequency_table, top_k_tokens};
pub use write_atomically::write_atomically;
