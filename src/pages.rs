pub mod fetch_page;
pub mod library_page;
