//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod slot_repo;
pub mod storage_unit_repo;
pub mod suggestion_repo;
pub mod wine_repo;

pub use slot_repo::SlotRepo;
pub use storage_unit_repo::StorageUnitRepo;
pub use suggestion_repo::SuggestionRepo;
pub use wine_repo::WineRepo;
