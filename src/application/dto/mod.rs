pub mod actor;
pub mod pagination;
pub mod reviews;
pub mod stores;

pub use actor::Actor;
pub use pagination::Page;
pub use reviews::ReviewDto;
pub use stores::{
    HeartStateDto, LocationDto, NearbyStoreDto, StoreDto, TagCountDto, TopStoreDto,
};
