mod fetcher_factory;
mod presenter_factory;

pub use fetcher_factory::{FetcherFactory, SbomSource};
pub use presenter_factory::{PresenterFactory, PresenterType};
