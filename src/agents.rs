pub mod downloads;
pub mod fetcher;
pub mod library;
pub mod notifier;
pub mod player;
