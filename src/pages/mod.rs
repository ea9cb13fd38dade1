//! Page objects for the Talento Lab site.
//!
//! Each page object borrows the session for its lifetime and builds its
//! flows from [`PageActions`] calls on its own locator constants.

pub mod base_page;
pub mod clients_page;
pub mod contact_page;
pub mod home_page;
pub mod register_page;
pub mod services_page;

pub use base_page::{BasePage, PageActions};
pub use clients_page::ClientsPage;
pub use contact_page::ContactPage;
pub use home_page::HomePage;
pub use register_page::RegisterPage;
pub use services_page::ServicesPage;

/// Public address of the site under test.
pub const DEFAULT_BASE_URL: &str = "https://talentolab-test.netlify.app";
