pub mod card_panel;
pub mod menu;
pub mod stats_line;
