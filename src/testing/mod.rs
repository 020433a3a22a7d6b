mod fake_user_repository;
mod scripted_confirm;

pub use fake_user_repository::FakeUserRepository;
pub use scripted_confirm::ScriptedConfirm;
