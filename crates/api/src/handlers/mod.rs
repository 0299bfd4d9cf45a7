pub mod cellar;
pub mod storage_units;
pub mod suggestions;
pub mod wines;
