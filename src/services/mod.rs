mod dialoguer_confirm;
pub mod embedded_assets;
mod http_user_repository;
mod memory_user_repository;

pub use dialoguer_confirm::DialoguerConfirm;
pub use embedded_assets::{SeedData, load_role_content_catalog, load_seed_data};
pub use http_user_repository::HttpUserRepository;
pub use memory_user_repository::MemoryUserRepository;
