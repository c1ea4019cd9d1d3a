mod no_search_provider;
mod search_provider_factory;
mod serper_client;

pub use no_search_provider::NoSearchProvider;
pub use search_provider_factory::SearchProviderFactory;
pub use serper_client::{DEFAULT_NUM_RESULTS, SERPER_BASE_URL, SerperClient};
