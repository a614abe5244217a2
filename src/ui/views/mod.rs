mod car_detail;
mod car_list;
mod home;
mod listing;
mod search;

pub use car_detail::CarDetailView;
pub use car_list::CarListView;
pub use home::HomeView;
pub use search::SearchView;
