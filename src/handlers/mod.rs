// Public: root, health and token issuance.
// Resources: reads are open, writes pass the bearer-token guard in `app`.
pub mod auth;
pub mod catalog;
pub mod developers;
pub mod projects;
pub mod root;

pub use catalog::CatalogResource;
