mod apps;
mod listing;
mod portfolio;

pub use apps::AppDetailView;
pub use listing::ListingView;
