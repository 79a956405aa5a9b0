mod extractor;

pub use extractor::{build_fold_regions, FoldRegionExtractor};
