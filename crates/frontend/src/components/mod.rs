pub mod filter_bar;
pub mod loading_overlay;
pub mod map_controls;
pub mod map_view;
pub mod marker_pin;
pub mod marker_sheet;
