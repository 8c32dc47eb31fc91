pub mod admin_panel;
pub mod category_bar;
pub mod masonry_grid;
pub mod navbar;
pub mod parallax_slider;
pub mod project_card;

pub use admin_panel::AdminPanel;
pub use category_bar::CategoryBar;
pub use masonry_grid::MasonryGrid;
pub use navbar::Navbar;
pub use parallax_slider::ParallaxSlider;
pub use project_card::ProjectCard;
