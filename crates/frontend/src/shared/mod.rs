pub mod api_utils;
pub mod icons;
pub mod ordered_list;
pub mod page_frame;
pub mod quantity_matrix;
