//! Facility directory core: pure selection state machine, field resolution
//! and count aggregation.
mod counts;
mod effect;
mod fields;
mod ids;
mod media;
mod model;
mod msg;
mod resolve;
mod selection;
mod state;
mod sync;
mod update;
mod view_model;

pub use counts::{CountMap, ALL_BUCKET};
pub use effect::Effect;
pub use fields::record_subcategory_id;
pub use ids::EntityId;
pub use media::complete_url;
pub use model::{parse_categories, parse_subcategories, Category, SubCategory};
pub use msg::Msg;
pub use resolve::{
    resolve_address, resolve_id, resolve_image, resolve_name, resolve_provider, resolve_rating,
    resolve_review_count, resolve_type, ProviderCard, ResolveContext, ADDRESS_NOT_AVAILABLE,
    PLACEHOLDER_IMAGE_URL, TYPE_NOT_AVAILABLE, UNNAMED,
};
pub use selection::{Selection, SelectionError};
pub use state::AppState;
pub use sync::{FetchTicket, Slice, StalePolicy};
pub use update::update;
pub use view_model::{DirectoryViewModel, SubCategoryChip, ALL_CHIP_LABEL};
