pub mod fix_list;
pub mod manager;
pub mod morphology;
pub mod spelling_data;
pub mod word_list;

pub use fix_list::{FixList, SpellingFix, SpellingFixKind};
pub use spelling_data::{SpellingData, SpellingDataPaths};
pub use word_list::{SaveMode, WordComparer, WordList};
